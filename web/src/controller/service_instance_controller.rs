use crate::extractors::broker_request_body::BrokerRequestBody;
use crate::params::accepts_incomplete::AcceptsIncompleteParams;
use crate::response::{self, render};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use domain::service_instance as ServiceInstanceApi;

use log::*;

/// PUT provision a new service instance
#[utoipa::path(
    put,
    path = "/v2/service_instances/{instance_id}",
    params(
        AcceptsIncompleteParams,
        ("instance_id" = String, Path, description = "Service instance id to provision")
    ),
    responses(
        (status = 200, description = "The provision behavior configured for the requested plan"),
        (status = 400, description = "Request body is not a JSON object"),
        (status = 422, description = "The plan is async only and the client did not send accepts_incomplete=true"),
        (status = 500, description = "No provision behavior configured for the plan")
    )
)]
pub async fn provision(
    State(app_state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(params): Query<AcceptsIncompleteParams>,
    BrokerRequestBody(provision_data): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("PUT Provision service instance {instance_id} from: {provision_data:?}");

    let accepts_incomplete = params.accepts_incomplete(&provision_data);
    let reply = ServiceInstanceApi::provision(
        app_state.store(),
        &instance_id,
        provision_data,
        accepts_incomplete,
    )
    .await?;

    render(reply)
}

/// PATCH update an existing service instance
#[utoipa::path(
    patch,
    path = "/v2/service_instances/{instance_id}",
    params(
        AcceptsIncompleteParams,
        ("instance_id" = String, Path, description = "Service instance id to update")
    ),
    responses(
        (status = 200, description = "The update behavior configured for the requested plan"),
        (status = 400, description = "Request body is not a JSON object"),
        (status = 422, description = "The plan is async only and the client did not send accepts_incomplete=true"),
        (status = 500, description = "No update behavior configured for the plan")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(params): Query<AcceptsIncompleteParams>,
    BrokerRequestBody(changes): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("PATCH Update service instance {instance_id} with: {changes:?}");

    let accepts_incomplete = params.accepts_incomplete(&changes);
    let reply =
        ServiceInstanceApi::update(app_state.store(), &instance_id, changes, accepts_incomplete)
            .await?;

    render(reply)
}

/// DELETE deprovision a service instance
#[utoipa::path(
    delete,
    path = "/v2/service_instances/{instance_id}",
    params(
        AcceptsIncompleteParams,
        ("instance_id" = String, Path, description = "Service instance id to deprovision")
    ),
    responses(
        (status = 200, description = "The deprovision behavior configured for the instance's plan"),
        (status = 422, description = "The plan is async only and the client did not send accepts_incomplete=true"),
        (status = 500, description = "No deprovision behavior configured for the plan")
    )
)]
pub async fn deprovision(
    State(app_state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(params): Query<AcceptsIncompleteParams>,
    BrokerRequestBody(body): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("DELETE Deprovision service instance {instance_id}");

    let accepts_incomplete = params.accepts_incomplete(&body);
    let reply =
        ServiceInstanceApi::deprovision(app_state.store(), &instance_id, accepts_incomplete)
            .await?;

    render(reply)
}

/// GET the state of the last operation on a service instance
#[utoipa::path(
    get,
    path = "/v2/service_instances/{instance_id}/last_operation",
    params(
        ("instance_id" = String, Path, description = "Service instance id to poll")
    ),
    responses(
        (status = 200, description = "The in_progress or finished fetch behavior, or a failed state for unknown instances"),
        (status = 500, description = "No fetch behavior configured for the plan")
    )
)]
pub async fn last_operation(
    State(app_state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Result<Response, Error> {
    debug!("GET Last operation of service instance {instance_id}");

    let reply = ServiceInstanceApi::last_operation(app_state.store(), &instance_id).await?;

    render(reply)
}

/// GET the provision data stored for a service instance
#[utoipa::path(
    get,
    path = "/v2/service_instances/{instance_id}",
    params(
        ("instance_id" = String, Path, description = "Service instance id to dump")
    ),
    responses(
        (status = 200, description = "The provision data as submitted"),
        (status = 404, description = "No service instance stored under this id")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Result<Response, Error> {
    debug!("GET Service instance {instance_id}");

    let provision_data = ServiceInstanceApi::find_by_id(app_state.store(), &instance_id).await?;

    Ok(response::record(provision_data))
}
