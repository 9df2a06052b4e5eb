//! FHIR date/time search parameter engine.
//!
//! Implements the FHIR partial-precision date/time grammar and its search
//! prefix semantics as a pure, stateless library:
//!
//! ```text
//! "ge2024-02"
//!      |
//!   SearchPrefix::split -> (Ge, "2024-02")
//!      |
//!   parse -> ParsedInstant { instant (UTC), precision, original_offset }
//!      |
//!   resolve_bounds -> Bounds { start, end, invert }
//!      |
//!   Bounds::contains / DateSearchExt::filter_date
//! ```
//!
//! A value only specifies as much as it was written with: `2024-02` is the
//! whole of February, so `eq2024-02` matches any instant inside
//! `[2024-02-01T00:00:00.000Z, 2024-02-29T23:59:59.999Z]` and `gt2024-02`
//! only matches instants after the whole month. Every prefix window is
//! derived from the single [`value_span`] primitive.
//!
//! Values without a timezone marker are taken as already UTC rather than
//! server-local time; search-range correctness depends on that policy.

#![forbid(unsafe_code)]

mod bounds;
mod error;
mod parser;
mod precision;
mod prefix;
mod search;
mod value;

pub use bounds::{resolve_bounds, value_span, Bounds};
pub use error::{Error, Result};
pub use parser::parse;
pub use precision::Precision;
pub use prefix::SearchPrefix;
pub use search::{DateFilter, DateSearchExt, FilterDate, SearchExpression};
pub use value::{max_instant, min_instant, ParsedInstant};
