use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("date search value must not be empty")]
    EmptyInput,

    #[error("invalid FHIR date/time '{input}': {reason}")]
    Format {
        input: String,
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn format(input: &str, reason: &'static str) -> Self {
        Error::Format {
            input: input.to_string(),
            reason,
        }
    }
}
