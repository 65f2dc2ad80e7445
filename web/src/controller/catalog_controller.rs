use crate::response::render;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::Response;
use domain::catalog as CatalogApi;

use log::*;

/// GET the service catalog
#[utoipa::path(
    get,
    path = "/v2/catalog",
    responses(
        (status = 200, description = "The configured catalog behavior"),
        (status = 500, description = "No catalog behavior configured")
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<Response, Error> {
    debug!("GET catalog");

    let reply = CatalogApi::fetch(app_state.store()).await?;

    render(reply)
}
