use crate::extractors::broker_request_body::BrokerRequestBody;
use crate::response::dump;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::Response;
use domain::broker_config as BrokerConfigApi;

use log::*;

/// GET the live configuration without instances and bindings
#[utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, description = "Pretty-printed behaviors and limits"),
    )
)]
pub async fn read(State(app_state): State<AppState>) -> Result<Response, Error> {
    debug!("GET Sanitized configuration");

    Ok(dump(BrokerConfigApi::sanitized(app_state.store()).await?))
}

/// GET the live configuration including every stored instance and binding
#[utoipa::path(
    get,
    path = "/config/all",
    responses(
        (status = 200, description = "Pretty-printed behaviors, limits and records"),
    )
)]
pub async fn read_all(State(app_state): State<AppState>) -> Result<Response, Error> {
    debug!("GET Full configuration");

    Ok(dump(BrokerConfigApi::full(app_state.store()).await?))
}

/// POST merge a partial configuration into the live one
#[utoipa::path(
    post,
    path = "/config",
    responses(
        (status = 200, description = "The merged configuration without instances and bindings"),
        (status = 400, description = "Request body is not a JSON object"),
        (status = 422, description = "The merged document is not a valid configuration")
    )
)]
pub async fn merge(
    State(app_state): State<AppState>,
    BrokerRequestBody(payload): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("POST Merge configuration: {payload:?}");

    Ok(dump(BrokerConfigApi::merge(app_state.store(), payload).await?))
}

/// POST return to the seed configuration
#[utoipa::path(
    post,
    path = "/config/reset",
    responses(
        (status = 200, description = "The seed configuration without instances and bindings"),
    )
)]
pub async fn reset(State(app_state): State<AppState>) -> Result<Response, Error> {
    info!("POST Reset configuration to seed");

    Ok(dump(BrokerConfigApi::reset(app_state.store()).await?))
}
