use crate::raw::RawVoteRecord;
use crate::reference::ReferenceKind;
use crate::tally::TallyGroup;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
///
/// The first four variants are the normalization failures. Each one is terminal for
/// the record being processed and carries enough of the offending input to be logged
/// without re-deriving context.
#[derive(Error, Debug)]
pub enum Error {
    /// The record cannot be assigned a variant, or the variant's structural
    /// prerequisites are missing.
    #[error("Cannot classify roll call {} ({}): {reason}", .record.roll_call, .record.question)]
    Classification {
        reason: String,
        record: Box<RawVoteRecord>,
    },

    /// A bill/amendment/nomination reference does not have the expected shape.
    #[error("Malformed {kind} reference: {value:?}")]
    MalformedReference { kind: ReferenceKind, value: String },

    /// A tally value is missing or not numeric.
    #[error("Tally value for {group}.{key} is not numeric: {}", .value.as_deref().unwrap_or("<missing>"))]
    TallyParse {
        group: TallyGroup,
        key: String,
        value: Option<String>,
    },

    /// A binding name lookup matched no (or more than one) member.
    #[error("Member not found: {search:?} ({context})")]
    MemberNotFound { search: String, context: String },

    #[error("Too many failures: {failures} records failed (threshold {threshold})")]
    TooManyFailures { failures: usize, threshold: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("File path error: {0}")]
    Path(String),
}

impl Error {
    pub(crate) fn classification(reason: impl Into<String>, record: &RawVoteRecord) -> Self {
        Error::Classification {
            reason: reason.into(),
            record: Box::new(record.clone()),
        }
    }

    /// Whether this is one of the per-record normalization failures (as opposed to
    /// an I/O or configuration problem).
    pub fn is_normalization(&self) -> bool {
        matches!(
            self,
            Error::Classification { .. }
                | Error::MalformedReference { .. }
                | Error::TallyParse { .. }
                | Error::MemberNotFound { .. }
        )
    }
}
