use std::io;

use thiserror::Error;

/// Errors that abort a filtering session.
///
/// Per-row comparability problems never surface here; they are absorbed as
/// non-matching rows inside the filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A cell or pattern that should be a host address is not one.
    #[error("'{value}' is not a valid IP address")]
    InvalidAddress { value: String },

    /// A network specification is neither CIDR nor a bare address.
    #[error("'{pattern}' is not a valid network or address")]
    InvalidNetwork { pattern: String },

    /// A criterion was rejected while building the round's predicate.
    #[error("criterion for column '{column}': {source}")]
    Criterion {
        column: String,
        #[source]
        source: Box<FilterError>,
    },

    /// A criterion names a column outside the table's schema.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// The prompt collaborator failed to read or write.
    #[error("prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

impl FilterError {
    /// Fatal input errors stem from malformed addresses or networks.
    pub fn is_input_error(&self) -> bool {
        match self {
            FilterError::InvalidAddress { .. } | FilterError::InvalidNetwork { .. } => true,
            FilterError::Criterion { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}
