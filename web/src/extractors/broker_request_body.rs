use crate::extractors::RejectionType;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use domain::RequestData;
use serde_json::Value;

/// A broker request document: a JSON object, or an empty body read as `{}`.
///
/// Unlike `Json`, no `Content-Type` is required since broker clients are not
/// consistent about sending one.
#[derive(Debug)]
pub(crate) struct BrokerRequestBody(pub RequestData);

impl<S> FromRequest<S> for BrokerRequestBody
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.body_text()))?;

        parse(&bytes).map(BrokerRequestBody)
    }
}

fn parse(bytes: &[u8]) -> Result<RequestData, RejectionType> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestData::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err((
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object".to_string(),
        )),
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            format!("Request body is not valid JSON: {err}"),
        )),
    }
}
