use std::fmt;

use serde::{Deserialize, Serialize};

/// How much of a date/time value was actually written out.
///
/// Ordered from coarsest to finest, so `Precision::Month < Precision::Second`
/// holds. Fields below the stated precision were absent in the source text and
/// default to their minimum (month/day = 1, time fields = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
            Precision::Hour => "hour",
            Precision::Minute => "minute",
            Precision::Second => "second",
            Precision::Millisecond => "millisecond",
        };
        f.write_str(name)
    }
}
