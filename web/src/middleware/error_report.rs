//! Structured 500 reports for configuration errors and panics.
//!
//! Handlers and the panic catcher only know the failure. The report is attached to
//! the response as an extension and [`report_server_errors`] fills in the request
//! path on the way out.
//!
//! A panic report carries the backtrace of the panic itself, recorded by the hook
//! from [`install_panic_hook`]. Reports for handler errors carry the backtrace of
//! the site that rendered the error.
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::sync::Once;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

use log::*;

#[derive(Clone, Debug, Serialize)]
pub(crate) struct ErrorReport {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    backtrace: Vec<String>,
}

thread_local! {
    static PANIC_BACKTRACE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chains a panic hook that records the panicking thread's backtrace for
/// [`panic_report`]. Installing more than once is a no-op.
pub(crate) fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let lines = backtrace_lines(&Backtrace::force_capture());
            PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(lines));
            previous(info);
        }));
    });
}

fn backtrace_lines(backtrace: &Backtrace) -> Vec<String> {
    backtrace
        .to_string()
        .lines()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

impl ErrorReport {
    /// A report whose backtrace points at the caller.
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self::with_backtrace(error, backtrace_lines(&Backtrace::force_capture()))
    }

    fn with_backtrace(error: impl Into<String>, backtrace: Vec<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
            timestamp: Utc::now().to_rfc3339(),
            backtrace,
        }
    }
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Handler for `CatchPanicLayer`.
pub(crate) fn panic_report(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!("Request handler panicked: {message}");

    // CatchPanicLayer calls this on the thread that unwound.
    match PANIC_BACKTRACE.with(|slot| slot.borrow_mut().take()) {
        Some(backtrace) => ErrorReport::with_backtrace(message, backtrace).into_response(),
        None => ErrorReport::new(message).into_response(),
    }
}

/// Rewrites any outgoing [`ErrorReport`] to include the request path.
///
/// Backtraces are dropped when running in production.
pub(crate) async fn report_server_errors(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>() else {
        return response;
    };

    let mut report = report.clone();
    if app_state.config.is_production() {
        report.backtrace.clear();
    }
    warn!("Responding 500 to {path}: {}", report.error);
    report.path = Some(path);

    report.into_response()
}
