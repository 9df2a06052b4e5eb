//! Property-based tests using QuickCheck

use chrono::{DateTime, Datelike, Timelike, Utc};
use ferrum_search_date::{
    max_instant, min_instant, parse, resolve_bounds, value_span, Precision, SearchPrefix,
};
use quickcheck::{QuickCheck, TestResult};

// Seconds since the epoch for 0001-01-01T00:00:00Z and 9999-12-31T23:59:59Z.
const MIN_SECS: i64 = -62_135_596_800;
const MAX_SECS: i64 = 253_402_300_799;

fn instant_from_seed(seed: i64, millis_seed: u16) -> DateTime<Utc> {
    let secs = seed.rem_euclid(MAX_SECS - MIN_SECS + 1) + MIN_SECS;
    let nanos = u32::from(millis_seed % 1000) * 1_000_000;
    DateTime::from_timestamp(secs, nanos).expect("seeded timestamp is in range")
}

fn precision_from_seed(seed: u8) -> Precision {
    match seed % 7 {
        0 => Precision::Year,
        1 => Precision::Month,
        2 => Precision::Day,
        3 => Precision::Hour,
        4 => Precision::Minute,
        5 => Precision::Second,
        _ => Precision::Millisecond,
    }
}

/// A grammatical datetime literal built from bounded seeds, together with the
/// wall-clock fields it encodes and its offset in minutes.
fn literal_from_seeds(
    y: u16,
    mo: u8,
    d: u8,
    h: u8,
    mi: u8,
    s: u8,
    off: i16,
) -> (String, (i32, u32, u32, u32, u32, u32), i32) {
    let year = i32::from(y % 9999) + 1;
    let month = u32::from(mo % 12) + 1;
    // Day 1..28 is valid in every month; day-in-month edge cases are covered
    // by the unit tests.
    let day = u32::from(d % 28) + 1;
    let hour = u32::from(h % 24);
    let minute = u32::from(mi % 60);
    let second = u32::from(s % 60);
    let offset_minutes = i32::from(off % 841);

    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let text = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
        year,
        month,
        day,
        hour,
        minute,
        second,
        sign,
        offset_minutes.abs() / 60,
        offset_minutes.abs() % 60,
    );
    (text, (year, month, day, hour, minute, second), offset_minutes)
}

/// Property: re-applying the original offset to the stored UTC instant
/// reproduces the wall-clock fields exactly as written.
#[test]
fn prop_offset_round_trip() {
    fn prop(y: u16, mo: u8, d: u8, h: u8, mi: u8, s: u8, off: i16) -> TestResult {
        let (text, (year, month, day, hour, minute, second), offset_minutes) =
            literal_from_seeds(y, mo, d, h, mi, s, off);

        let parsed = match parse(&text) {
            Ok(v) => v,
            Err(e) => return TestResult::error(format!("{text}: {e}")),
        };
        let offset = match parsed.original_offset {
            Some(o) => o,
            None => return TestResult::error(format!("{text}: offset lost")),
        };
        if offset.local_minus_utc() != offset_minutes * 60 {
            return TestResult::failed();
        }

        let local = parsed.local();
        TestResult::from_bool(
            local.year() == year
                && local.month() == month
                && local.day() == day
                && local.hour() == hour
                && local.minute() == minute
                && local.second() == second,
        )
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(u16, u8, u8, u8, u8, u8, i16) -> TestResult);
}

/// Property: parsing the same literal twice yields identical values.
#[test]
fn prop_parse_is_idempotent() {
    fn prop(y: u16, mo: u8, d: u8, h: u8, mi: u8, s: u8, off: i16) -> TestResult {
        let (text, _, _) = literal_from_seeds(y, mo, d, h, mi, s, off);
        match (parse(&text), parse(&text)) {
            (Ok(a), Ok(b)) => TestResult::from_bool(a == b),
            _ => TestResult::error(format!("{text} failed to parse")),
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(u16, u8, u8, u8, u8, u8, i16) -> TestResult);
}

/// Property: spanOf(a).floor <= a <= spanOf(a).ceil at every precision, and
/// the span stays inside the representable range.
#[test]
fn prop_span_brackets_the_value() {
    fn prop(seed: i64, ms: u16, prec: u8) -> TestResult {
        let instant = instant_from_seed(seed, ms);
        let precision = precision_from_seed(prec);
        let (floor, ceil) = value_span(instant, precision);
        TestResult::from_bool(
            floor <= instant
                && instant <= ceil
                && floor >= min_instant()
                && ceil <= max_instant(),
        )
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(i64, u16, u8) -> TestResult);
}

/// Property: spanOf is non-decreasing in its input.
#[test]
fn prop_span_is_monotonic() {
    fn prop(seed_a: i64, ms_a: u16, seed_b: i64, ms_b: u16, prec: u8) -> TestResult {
        let mut a = instant_from_seed(seed_a, ms_a);
        let mut b = instant_from_seed(seed_b, ms_b);
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        let precision = precision_from_seed(prec);
        let (floor_a, ceil_a) = value_span(a, precision);
        let (floor_b, ceil_b) = value_span(b, precision);
        TestResult::from_bool(floor_a <= floor_b && ceil_a <= ceil_b)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(i64, u16, i64, u16, u8) -> TestResult);
}

/// Property: for every candidate, the `ne` predicate is the exact logical
/// negation of the `eq` predicate.
#[test]
fn prop_eq_ne_complementarity() {
    fn prop(value_seed: i64, ms: u16, prec: u8, cand_seed: i64, cand_ms: u16) -> TestResult {
        let value = instant_from_seed(value_seed, ms);
        let precision = precision_from_seed(prec);
        let candidate = instant_from_seed(cand_seed, cand_ms);

        let eq = resolve_bounds(SearchPrefix::Eq, value, precision);
        let ne = resolve_bounds(SearchPrefix::Ne, value, precision);
        TestResult::from_bool(eq.contains(candidate) != ne.contains(candidate))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(i64, u16, u8, i64, u16) -> TestResult);
}

/// Property: the value itself never satisfies its own strict exclusions, and
/// always satisfies its own inclusive windows.
#[test]
fn prop_strict_prefixes_exclude_the_value() {
    fn prop(seed: i64, ms: u16, prec: u8) -> TestResult {
        let instant = instant_from_seed(seed, ms);
        let precision = precision_from_seed(prec);

        let inside = [SearchPrefix::Eq, SearchPrefix::Ge, SearchPrefix::Le, SearchPrefix::Ap]
            .iter()
            .all(|p| resolve_bounds(*p, instant, precision).contains(instant));
        let outside = [
            SearchPrefix::Gt,
            SearchPrefix::Lt,
            SearchPrefix::Sa,
            SearchPrefix::Eb,
            SearchPrefix::Ne,
        ]
        .iter()
        .all(|p| !resolve_bounds(*p, instant, precision).contains(instant));
        TestResult::from_bool(inside && outside)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(i64, u16, u8) -> TestResult);
}
