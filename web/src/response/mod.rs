//! Writes domain replies and dumps onto the wire.
use crate::Error;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::emitter::{Payload, Reply};
use domain::error::{DomainErrorKind, Error as DomainError};
use domain::RequestData;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Emits a reply with its configured status. JSON bodies are labelled as such;
/// raw bodies go out as plain text, exactly as configured.
pub(crate) fn render(reply: Reply) -> Result<Response, Error> {
    let status = StatusCode::from_u16(reply.status).map_err(|_| {
        DomainError::new(
            DomainErrorKind::Configuration,
            format!(
                "Configured status {} is not a valid HTTP status code",
                reply.status
            ),
        )
    })?;

    let response = match reply.payload {
        Payload::Json(body) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
        Payload::Raw(body) => (status, body).into_response(),
    };

    Ok(response)
}

/// A pretty-printed configuration dump.
pub(crate) fn dump(document: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        document,
    )
        .into_response()
}

/// A stored request document, as submitted.
pub(crate) fn record(document: RequestData) -> Response {
    (StatusCode::OK, Json(document)).into_response()
}
