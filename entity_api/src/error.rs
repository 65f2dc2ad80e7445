//! Error types for entity API
use std::error::Error as StdError;
use std::fmt;

use entity::Action;
use serde::Serialize;

/// Errors while executing operations against the broker data.
/// The intent is to categorize errors into two major types:
///  * Errors related to what the broker was configured with. Ex a missing `default` behavior
///  * Errors related to loading or (de)serializing broker data. Ex an unreadable seed file
#[derive(Debug)]
pub struct Error {
    // Underlying error emitted from serde_json or the filesystem
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // Neither the requested plan nor `default` has a behavior for the action
    BehaviorNotConfigured {
        action: Action,
        plan_id: Option<String>,
    },
    // The action's behavior has a different shape than the one requested
    UnsupportedAction(Action),
    // Record not found
    RecordNotFound,
    // A seed or merge payload that does not describe valid broker data
    InvalidConfiguration(String),
    // The seed document could not be read
    SeedUnreadable,
    // Broker data could not be rendered as JSON
    Serialization,
}

impl Error {
    pub(crate) fn behavior_not_configured(action: Action, plan_id: Option<&str>) -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::BehaviorNotConfigured {
                action,
                plan_id: plan_id.map(str::to_owned),
            },
        }
    }

    pub(crate) fn invalid_configuration(err: serde_json::Error) -> Self {
        Error {
            error_kind: EntityApiErrorKind::InvalidConfiguration(err.to_string()),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn record_not_found() -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            EntityApiErrorKind::BehaviorNotConfigured { action, plan_id } => write!(
                f,
                "No behavior configured for action '{action}' and plan id {plan_id:?}, and no '{}' behavior to fall back to",
                entity::DEFAULT_PLAN
            ),
            EntityApiErrorKind::UnsupportedAction(action) => {
                write!(f, "Action '{action}' is not configured with this kind of behavior")
            }
            EntityApiErrorKind::RecordNotFound => {
                write!(f, "No record is stored under the requested id")
            }
            EntityApiErrorKind::InvalidConfiguration(reason) => {
                write!(f, "Invalid broker configuration: {reason}")
            }
            _ => write!(f, "Entity API Error: {:?}", self),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: EntityApiErrorKind::Serialization,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: EntityApiErrorKind::SeedUnreadable,
        }
    }
}
