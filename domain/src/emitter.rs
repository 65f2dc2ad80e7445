//! Turns resolved behaviors into replies.
//!
//! Every configured reply sleeps for the behavior's `sleep_seconds` first. The
//! delay is real wall-clock time and only parks the current request.
use crate::error::{DomainErrorKind, Error};
use entity_api::Behavior;
use serde::Serialize;
use std::time::Duration;

use log::*;

pub const ASYNC_REQUIRED_STATUS: u16 = 422;
/// Fixed body sent to callers that omit `accepts_incomplete` for an async-only plan.
pub const ASYNC_REQUIRED_BODY: &str = r#"{"error":"AsyncRequired","description":"This service plan requires client support for asynchronous service operations."}"#;

/// What a broker reply carries on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Serialized JSON document.
    Json(String),
    /// Literal text, possibly not JSON at all.
    Raw(String),
}

impl Payload {
    pub fn as_str(&self) -> &str {
        match self {
            Payload::Json(body) | Payload::Raw(body) => body,
        }
    }
}

/// A status code and payload ready to be written as an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub payload: Payload,
}

/// Body of a `last_operation` reply the broker answers without consulting behaviors.
#[derive(Debug, Serialize)]
pub struct LastOperation<'a> {
    pub state: &'a str,
    pub description: &'a str,
}

impl Reply {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Reply {
            status,
            payload: Payload::Json(serde_json::to_string(body)?),
        })
    }

    /// `body` wins over `raw_body`; a behavior with neither replies with an empty payload.
    pub fn from_behavior(behavior: &Behavior) -> Self {
        let payload = match (&behavior.body, &behavior.raw_body) {
            (Some(body), _) => Payload::Json(body.to_string()),
            (None, Some(raw_body)) => Payload::Raw(raw_body.clone()),
            (None, None) => Payload::Raw(String::new()),
        };

        Reply {
            status: behavior.status,
            payload,
        }
    }

    pub fn async_required() -> Self {
        Reply {
            status: ASYNC_REQUIRED_STATUS,
            payload: Payload::Json(ASYNC_REQUIRED_BODY.to_string()),
        }
    }
}

/// Emits the behavior as configured.
pub async fn respond(behavior: Behavior) -> Result<Reply, Error> {
    delay(&behavior).await?;
    Ok(Reply::from_behavior(&behavior))
}

/// Emits the behavior unless it is async-only and the caller did not accept incomplete operations.
pub async fn respond_gated(behavior: Behavior, accepts_incomplete: bool) -> Result<Reply, Error> {
    delay(&behavior).await?;

    if behavior.async_only && !accepts_incomplete {
        warn!("Rejecting request without accepts_incomplete for an async-only plan");
        return Ok(Reply::async_required());
    }

    Ok(Reply::from_behavior(&behavior))
}

/// Zero, negative and NaN delays are skipped. A delay too long to represent is
/// a configuration error rather than a sleep.
async fn delay(behavior: &Behavior) -> Result<(), Error> {
    let seconds = behavior.sleep_seconds;
    if seconds.is_nan() || seconds <= 0.0 {
        return Ok(());
    }

    let duration = Duration::try_from_secs_f64(seconds).map_err(|err| {
        Error::new(
            DomainErrorKind::Configuration,
            format!("Configured sleep_seconds {seconds} is not a usable delay: {err}"),
        )
    })?;

    debug!("Sleeping {seconds}s before responding");
    tokio::time::sleep(duration).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;

    fn behavior(value: serde_json::Value) -> Behavior {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn body_takes_priority_over_raw_body() {
        let reply = Reply::from_behavior(&behavior(json!({
            "status": 201,
            "body": {"foo": "bar"},
            "raw_body": "ignored"
        })));

        assert_eq!(reply.status, 201);
        assert_eq!(reply.payload, Payload::Json(r#"{"foo":"bar"}"#.to_string()));
    }

    #[test]
    fn raw_body_is_emitted_verbatim() {
        let reply = Reply::from_behavior(&behavior(json!({"status": 201, "raw_body": "ok"})));

        assert_eq!(reply.payload, Payload::Raw("ok".to_string()));
    }

    #[test]
    fn async_required_payload_is_fixed() {
        let reply = Reply::async_required();

        let body: serde_json::Value = serde_json::from_str(reply.payload.as_str()).unwrap();

        assert_eq!(reply.status, 422);
        assert_eq!(body["error"], "AsyncRequired");
        assert_eq!(
            body["description"],
            "This service plan requires client support for asynchronous service operations."
        );
    }

    #[tokio::test]
    async fn respond_gated_rejects_async_only_without_accepts_incomplete() {
        let async_only = behavior(json!({"status": 202, "body": {}, "async_only": true}));

        let rejected = respond_gated(async_only.clone(), false).await.unwrap();
        let accepted = respond_gated(async_only, true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
        assert_eq!(accepted.payload, Payload::Json("{}".to_string()));
    }

    #[tokio::test]
    async fn respond_gated_ignores_the_flag_for_regular_plans() {
        let reply = respond_gated(behavior(json!({"status": 200, "body": {}})), false)
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
    }

    #[tokio::test]
    async fn respond_sleeps_for_the_configured_time() {
        let start = Instant::now();

        respond(behavior(json!({"status": 200, "sleep_seconds": 0.3})))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn nonsensical_delays_are_skipped() {
        let start = Instant::now();

        respond(behavior(json!({"status": 200, "sleep_seconds": -1.0})))
            .await
            .unwrap();

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn unrepresentable_delay_is_a_configuration_error() {
        let err = respond(behavior(json!({"status": 200, "sleep_seconds": 1e20})))
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, DomainErrorKind::Configuration);
        assert!(err.to_string().contains("sleep_seconds"));
    }
}
