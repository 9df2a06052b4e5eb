use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::precision::Precision;
use crate::prefix::SearchPrefix;
use crate::value::{self, max_instant, min_instant};

/// Inclusive instant window a search predicate tests against.
///
/// `invert = true` (the `ne` prefix) means the predicate is "outside
/// `[start, end]`" rather than inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub invert: bool,
}

impl Bounds {
    pub fn contains(&self, candidate: DateTime<Utc>) -> bool {
        let in_range = candidate >= self.start && candidate <= self.end;
        if self.invert {
            !in_range
        } else {
            in_range
        }
    }
}

/// The inclusive instant range a value spans at its own precision,
/// independent of any comparison prefix.
///
/// A year-precision value spans Jan 1 00:00:00.000 through Dec 31
/// 23:59:59.999 of that year; a millisecond-precision value is a zero-width
/// span. Month ceilings are leap-year aware.
pub fn value_span(instant: DateTime<Utc>, precision: Precision) -> (DateTime<Utc>, DateTime<Utc>) {
    let (y, mo, d) = (instant.year(), instant.month(), instant.day());
    let (h, mi, s) = (instant.hour(), instant.minute(), instant.second());
    match precision {
        Precision::Year => (
            rebuild(y, 1, 1, 0, 0, 0, 0),
            rebuild(y, 12, 31, 23, 59, 59, 999),
        ),
        Precision::Month => (
            rebuild(y, mo, 1, 0, 0, 0, 0),
            rebuild(y, mo, days_in_month(y, mo), 23, 59, 59, 999),
        ),
        Precision::Day => (
            rebuild(y, mo, d, 0, 0, 0, 0),
            rebuild(y, mo, d, 23, 59, 59, 999),
        ),
        Precision::Hour => (
            rebuild(y, mo, d, h, 0, 0, 0),
            rebuild(y, mo, d, h, 59, 59, 999),
        ),
        Precision::Minute => (
            rebuild(y, mo, d, h, mi, 0, 0),
            rebuild(y, mo, d, h, mi, 59, 999),
        ),
        Precision::Second => (
            rebuild(y, mo, d, h, mi, s, 0),
            rebuild(y, mo, d, h, mi, s, 999),
        ),
        Precision::Millisecond => (instant, instant),
    }
}

/// Combines a comparison prefix with the value's own span into the final
/// predicate window.
///
/// Every prefix is defined in terms of [`value_span`]; there is no per-prefix
/// calendar arithmetic to drift out of sync. The predicate is inclusive on
/// both ends, so the strict prefixes step one millisecond past the span
/// boundary instead of reusing it exclusively.
pub fn resolve_bounds(
    prefix: SearchPrefix,
    instant: DateTime<Utc>,
    precision: Precision,
) -> Bounds {
    let (floor, ceil) = value_span(instant, precision);
    match prefix {
        SearchPrefix::Eq => Bounds {
            start: floor,
            end: ceil,
            invert: false,
        },
        SearchPrefix::Ne => Bounds {
            start: floor,
            end: ceil,
            invert: true,
        },
        SearchPrefix::Gt | SearchPrefix::Sa => Bounds {
            start: ceil + Duration::milliseconds(1),
            end: max_instant(),
            invert: false,
        },
        SearchPrefix::Lt | SearchPrefix::Eb => Bounds {
            start: min_instant(),
            end: floor - Duration::milliseconds(1),
            invert: false,
        },
        SearchPrefix::Ge => Bounds {
            start: floor,
            end: max_instant(),
            invert: false,
        },
        SearchPrefix::Le => Bounds {
            start: min_instant(),
            end: ceil,
            invert: false,
        },
        SearchPrefix::Ap => {
            let (start, end) = approximate_span(instant, precision, floor, ceil);
            Bounds {
                start,
                end,
                invert: false,
            }
        }
    }
}

/// `ap` widens the equality span by one unit of the value's precision
/// (100ms at millisecond precision), recomputing full calendar boundaries
/// so month and year margins roll over correctly. Clamped to the
/// representable range near the calendar extremes.
fn approximate_span(
    instant: DateTime<Utc>,
    precision: Precision,
    floor: DateTime<Utc>,
    ceil: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let (start, end) = match precision {
        Precision::Year => {
            let y = instant.year();
            let start = if y > 1 {
                rebuild(y - 1, 1, 1, 0, 0, 0, 0)
            } else {
                min_instant()
            };
            let end = if y < 9999 {
                rebuild(y + 1, 12, 31, 23, 59, 59, 999)
            } else {
                max_instant()
            };
            (start, end)
        }
        Precision::Month => {
            let (y, mo) = (instant.year(), instant.month());
            let start = if y == 1 && mo == 1 {
                min_instant()
            } else {
                let (py, pm) = if mo == 1 { (y - 1, 12) } else { (y, mo - 1) };
                rebuild(py, pm, 1, 0, 0, 0, 0)
            };
            let end = if y == 9999 && mo == 12 {
                max_instant()
            } else {
                let (ny, nm) = if mo == 12 { (y + 1, 1) } else { (y, mo + 1) };
                rebuild(ny, nm, days_in_month(ny, nm), 23, 59, 59, 999)
            };
            (start, end)
        }
        Precision::Day => (floor - Duration::days(1), ceil + Duration::days(1)),
        Precision::Hour => (floor - Duration::hours(1), ceil + Duration::hours(1)),
        Precision::Minute => (floor - Duration::minutes(1), ceil + Duration::minutes(1)),
        Precision::Second => (floor - Duration::seconds(1), ceil + Duration::seconds(1)),
        Precision::Millisecond => (
            instant - Duration::milliseconds(100),
            instant + Duration::milliseconds(100),
        ),
    };
    (start.max(min_instant()), end.min(max_instant()))
}

fn rebuild(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
) -> DateTime<Utc> {
    value::from_fields(year, month, day, hour, minute, second, millisecond)
        .expect("span boundaries derive from a valid instant")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .expect("every month has a last day")
}
