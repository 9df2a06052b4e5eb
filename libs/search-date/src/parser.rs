use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::precision::Precision;
use crate::value::ParsedInstant;

// FHIR date/time grammar, anchored. Each component is optional but only if its
// parent is present; a timezone marker is only legal once an hour exists.
// Offsets range sign 00:00..13:59 plus the literal 14:00 (UTC+14 exists).
const GRAMMAR: &str = r"^(?P<year>\d{4})(?:-(?P<month>0[1-9]|1[0-2])(?:-(?P<day>0[1-9]|[12]\d|3[01])(?:T(?P<hour>[01]\d|2[0-3])(?::(?P<minute>[0-5]\d)(?::(?P<second>[0-5]\d|60)(?:\.(?P<fraction>\d{1,9}))?)?)?(?P<tz>Z|[+-](?:(?:0\d|1[0-3]):[0-5]\d|14:00))?)?)?)?$";

fn grammar() -> &'static Regex {
    static GRAMMAR_RE: OnceLock<Regex> = OnceLock::new();
    GRAMMAR_RE.get_or_init(|| Regex::new(GRAMMAR).expect("date/time grammar must compile"))
}

/// Parses a FHIR partial-precision date/time literal.
///
/// Accepts anything from a bare year down to a millisecond-precision instant
/// with a `Z` or `±hh:mm` marker, e.g. `1990`, `2024-02`, or
/// `2020-06-15T12:30:45.123+05:30`. Fails with [`Error::EmptyInput`] on blank
/// input and [`Error::Format`] on anything that breaks the grammar or does not
/// exist on the calendar (month 13, Feb 30, leap-second literals).
pub fn parse(input: &str) -> Result<ParsedInstant> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let caps = grammar()
        .captures(input)
        .ok_or_else(|| Error::format(input, "does not match the FHIR date/time grammar"))?;

    let year = component(&caps, "year", 0) as i32;
    if year == 0 {
        return Err(Error::format(input, "year must be between 0001 and 9999"));
    }
    let month = component(&caps, "month", 1);
    let day = component(&caps, "day", 1);
    let hour = component(&caps, "hour", 0);
    let minute = component(&caps, "minute", 0);
    let second = component(&caps, "second", 0);
    let millisecond = fraction_millis(&caps);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::format(input, "no such calendar day"))?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)
        .ok_or_else(|| Error::format(input, "no such time of day"))?;
    let local = NaiveDateTime::new(date, time);

    let original_offset = timezone_offset(&caps, input)?;
    let instant = match original_offset {
        Some(offset) => offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| Error::format(input, "not representable in the given offset"))?
            .with_timezone(&Utc),
        // No marker means the wall clock is taken as already UTC. Deliberate:
        // guessing server-local time would silently shift search windows.
        None => DateTime::from_naive_utc_and_offset(local, Utc),
    };

    Ok(ParsedInstant {
        instant,
        precision: classify(&caps),
        original_offset,
    })
}

/// Finest group that matched wins; a timezone marker alone never raises
/// precision.
fn classify(caps: &Captures<'_>) -> Precision {
    if caps.name("fraction").is_some() {
        Precision::Millisecond
    } else if caps.name("second").is_some() {
        Precision::Second
    } else if caps.name("minute").is_some() {
        Precision::Minute
    } else if caps.name("hour").is_some() {
        Precision::Hour
    } else if caps.name("day").is_some() {
        Precision::Day
    } else if caps.name("month").is_some() {
        Precision::Month
    } else {
        Precision::Year
    }
}

fn component(caps: &Captures<'_>, name: &str, default: u32) -> u32 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default)
}

fn fraction_millis(caps: &Captures<'_>) -> u32 {
    match caps.name("fraction") {
        Some(m) => {
            // Right-pad/truncate to exactly three digits; sub-millisecond
            // precision is not retained.
            let digits: String = m.as_str().chars().take(3).collect();
            format!("{:0<3}", digits).parse().unwrap_or(0)
        }
        None => 0,
    }
}

fn timezone_offset(caps: &Captures<'_>, input: &str) -> Result<Option<FixedOffset>> {
    let tz = match caps.name("tz") {
        None => return Ok(None),
        Some(m) => m.as_str(),
    };
    if tz == "Z" {
        return Ok(Some(Utc.fix()));
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let hours: i32 = tz[1..3].parse().unwrap_or(0);
    let minutes: i32 = tz[4..6].parse().unwrap_or(0);
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(Some)
        .ok_or_else(|| Error::format(input, "time zone offset out of range"))
}
