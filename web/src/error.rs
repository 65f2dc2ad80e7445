use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError};

use crate::middleware::error_report::ErrorReport;

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{}", self.0)
    }
}

// Broker-facing failures carry a `description` the way the broker API formats errors.
// Anything the configuration cannot answer becomes a 500 report for the test harness.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "description": self.0.message })),
            )
                .into_response(),
            DomainErrorKind::Invalid => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "description": self.0.message })),
            )
                .into_response(),
            DomainErrorKind::Configuration | DomainErrorKind::Other => {
                error!("Unable to answer request: {}", self.0);
                ErrorReport::new(self.0.message).into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
