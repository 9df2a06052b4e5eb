use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// FHIR search comparison prefix. `eq` applies when no prefix is written.
///
/// `sa`/`eb` are the precision-aware strict forms of `gt`/`lt`: they exclude
/// the value's whole span, not a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPrefix {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Sa,
    Eb,
    Ap,
}

const TOKENS: [(&str, SearchPrefix); 9] = [
    ("eq", SearchPrefix::Eq),
    ("ne", SearchPrefix::Ne),
    ("gt", SearchPrefix::Gt),
    ("lt", SearchPrefix::Lt),
    ("ge", SearchPrefix::Ge),
    ("le", SearchPrefix::Le),
    ("sa", SearchPrefix::Sa),
    ("eb", SearchPrefix::Eb),
    ("ap", SearchPrefix::Ap),
];

impl SearchPrefix {
    /// Strips a leading comparison prefix off a raw search value.
    ///
    /// Prefixes only apply when they are immediately at the start of the
    /// string; matching is case-insensitive. Returns `None` plus the untouched
    /// input when the first two characters are not a known token.
    pub fn split(value: &str) -> (Option<Self>, &str) {
        if let Some(head) = value.get(..2) {
            for (token, prefix) in TOKENS {
                if head.eq_ignore_ascii_case(token) {
                    return (Some(prefix), &value[2..]);
                }
            }
        }
        (None, value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPrefix::Eq => "eq",
            SearchPrefix::Ne => "ne",
            SearchPrefix::Gt => "gt",
            SearchPrefix::Lt => "lt",
            SearchPrefix::Ge => "ge",
            SearchPrefix::Le => "le",
            SearchPrefix::Sa => "sa",
            SearchPrefix::Eb => "eb",
            SearchPrefix::Ap => "ap",
        }
    }
}

impl fmt::Display for SearchPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchPrefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TOKENS
            .iter()
            .find(|(token, _)| s.eq_ignore_ascii_case(token))
            .map(|(_, prefix)| *prefix)
            .ok_or_else(|| Error::format(s, "not a search comparison prefix"))
    }
}
