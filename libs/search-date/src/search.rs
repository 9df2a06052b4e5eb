use chrono::{DateTime, Utc};

use crate::bounds::{resolve_bounds, Bounds};
use crate::error::Result;
use crate::parser;
use crate::prefix::SearchPrefix;
use crate::value::ParsedInstant;

/// A prefix plus a parsed date/time value, e.g. `ge2024-02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchExpression {
    pub prefix: SearchPrefix,
    pub value: ParsedInstant,
}

impl SearchExpression {
    pub fn bounds(&self) -> Bounds {
        resolve_bounds(self.prefix, self.value.instant, self.value.precision)
    }
}

/// A date search parameter as received on the wire.
///
/// An empty or whitespace-only raw value is not an error; it is the absence
/// of a filter, and matches every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Unfiltered,
    Filtered(SearchExpression),
}

impl DateFilter {
    /// Parses a raw search parameter value: an optional two-letter comparison
    /// prefix followed by a FHIR date/time literal. A missing prefix means
    /// `eq`.
    pub fn parse(raw: &str) -> Result<DateFilter> {
        if raw.trim().is_empty() {
            return Ok(DateFilter::Unfiltered);
        }
        let (prefix, rest) = SearchPrefix::split(raw);
        let value = parser::parse(rest)?;
        Ok(DateFilter::Filtered(SearchExpression {
            prefix: prefix.unwrap_or(SearchPrefix::Eq),
            value,
        }))
    }

    /// The resolved predicate window, or `None` when no filter was given.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            DateFilter::Unfiltered => None,
            DateFilter::Filtered(expr) => Some(expr.bounds()),
        }
    }

    pub fn matches(&self, candidate: DateTime<Utc>) -> bool {
        match self.bounds() {
            None => true,
            Some(bounds) => bounds.contains(candidate),
        }
    }
}

/// Applies a [`DateFilter`] to any sequence with a comparable instant field.
///
/// This is the only hook storage or query layers need; translating the same
/// window into e.g. a SQL range predicate is their concern, not this crate's.
pub trait DateSearchExt: Iterator + Sized {
    fn filter_date<F>(self, filter: &DateFilter, date_of: F) -> FilterDate<Self, F>
    where
        F: FnMut(&Self::Item) -> DateTime<Utc>,
    {
        FilterDate {
            iter: self,
            bounds: filter.bounds(),
            date_of,
        }
    }
}

impl<I: Iterator> DateSearchExt for I {}

/// Iterator adapter returned by [`DateSearchExt::filter_date`].
pub struct FilterDate<I, F> {
    iter: I,
    bounds: Option<Bounds>,
    date_of: F,
}

impl<I, F> Iterator for FilterDate<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> DateTime<Utc>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.iter.next()?;
            let keep = match &self.bounds {
                None => true,
                Some(bounds) => bounds.contains((self.date_of)(&item)),
            };
            if keep {
                return Some(item);
            }
        }
    }
}
