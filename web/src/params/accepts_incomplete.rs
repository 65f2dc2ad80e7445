use domain::RequestData;
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

const ACCEPTS_INCOMPLETE_KEY: &str = "accepts_incomplete";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct AcceptsIncompleteParams {
    /// `true` when the client supports asynchronous operations. May also be sent
    /// as a top-level field of the request body.
    pub(crate) accepts_incomplete: Option<String>,
}

impl AcceptsIncompleteParams {
    /// The query parameter or the body field, whichever says `true`.
    pub(crate) fn accepts_incomplete(&self, body: &RequestData) -> bool {
        let from_query = self.accepts_incomplete.as_deref().is_some_and(is_true);
        let from_body = match body.get(ACCEPTS_INCOMPLETE_KEY) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => is_true(flag),
            _ => false,
        };

        from_query || from_body
    }
}

fn is_true(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}
