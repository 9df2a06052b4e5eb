use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

use crate::precision::Precision;

/// A successfully parsed FHIR date/time search value.
///
/// `instant` is always normalized to UTC, even when the source text carried an
/// explicit offset. Re-applying `original_offset` (see [`ParsedInstant::local`])
/// reproduces the wall-clock fields exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInstant {
    pub instant: DateTime<Utc>,
    pub precision: Precision,
    /// Offset written in the source text. `None` when no timezone marker was
    /// present; zero when the marker was literally `Z`.
    pub original_offset: Option<FixedOffset>,
}

impl ParsedInstant {
    /// The value as a wall clock in its original offset.
    ///
    /// Values without a timezone marker are treated as already UTC, so the
    /// local view equals the UTC view for them.
    pub fn local(&self) -> DateTime<FixedOffset> {
        let offset = self.original_offset.unwrap_or_else(|| Utc.fix());
        self.instant.with_timezone(&offset)
    }

    /// Renders the value back in wire form at its own precision.
    ///
    /// Sub-millisecond fraction digits from the source are not retained, so a
    /// nine-digit fraction comes back truncated to three.
    pub fn to_wire(&self) -> String {
        let local = self.local();
        let body = match self.precision {
            Precision::Year => local.format("%Y").to_string(),
            Precision::Month => local.format("%Y-%m").to_string(),
            Precision::Day => local.format("%Y-%m-%d").to_string(),
            Precision::Hour => local.format("%Y-%m-%dT%H").to_string(),
            Precision::Minute => local.format("%Y-%m-%dT%H:%M").to_string(),
            Precision::Second => local.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Precision::Millisecond => local.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        };
        if self.precision < Precision::Hour {
            return body;
        }
        format!("{}{}", body, self.offset_suffix())
    }

    fn offset_suffix(&self) -> String {
        match self.original_offset {
            None => String::new(),
            Some(offset) if offset.local_minus_utc() == 0 => "Z".to_string(),
            Some(offset) => {
                let minutes = offset.local_minus_utc() / 60;
                let sign = if minutes < 0 { '-' } else { '+' };
                format!("{}{:02}:{:02}", sign, minutes.abs() / 60, minutes.abs() % 60)
            }
        }
    }
}

/// Smallest representable search instant: 0001-01-01T00:00:00.000Z.
pub fn min_instant() -> DateTime<Utc> {
    from_fields(1, 1, 1, 0, 0, 0, 0).expect("minimum instant is a valid calendar date")
}

/// Largest representable search instant: 9999-12-31T23:59:59.999Z.
pub fn max_instant() -> DateTime<Utc> {
    from_fields(9999, 12, 31, 23, 59, 59, 999).expect("maximum instant is a valid calendar date")
}

pub(crate) fn from_fields(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)?;
    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
