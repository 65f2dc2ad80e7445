//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors from `entity_api` are translated here so that `web` only ever matches on
/// `DomainErrorKind` to choose an HTTP status. The `source` field holds the original
/// error and `message` the human readable explanation surfaced to the test harness.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
    pub message: String,
}

/// Enum representing the kinds of errors a broker operation can end in.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The configured behaviors cannot answer the request. Fatal to the request.
    Configuration,
    /// A record dump was requested for an id the broker never stored.
    NotFound,
    /// A submitted configuration or request document was rejected.
    Invalid,
    Other,
}

impl Error {
    pub fn new(error_kind: DomainErrorKind, message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let error_kind = match err.error_kind {
            EntityApiErrorKind::BehaviorNotConfigured { .. } => DomainErrorKind::Configuration,
            EntityApiErrorKind::UnsupportedAction(_) => DomainErrorKind::Configuration,
            EntityApiErrorKind::RecordNotFound => DomainErrorKind::NotFound,
            EntityApiErrorKind::InvalidConfiguration(_) => DomainErrorKind::Invalid,
            _ => DomainErrorKind::Other,
        };

        Error {
            message: err.to_string(),
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            message: err.to_string(),
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Other,
        }
    }
}
