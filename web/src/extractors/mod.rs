pub(crate) mod broker_request_body;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
