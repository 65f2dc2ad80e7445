use crate::extractors::broker_request_body::BrokerRequestBody;
use crate::params::accepts_incomplete::AcceptsIncompleteParams;
use crate::response::{self, render};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use domain::service_binding as ServiceBindingApi;

use log::*;

/// PUT bind a service instance
#[utoipa::path(
    put,
    path = "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
    params(
        AcceptsIncompleteParams,
        ("instance_id" = String, Path, description = "Service instance id to bind"),
        ("binding_id" = String, Path, description = "Service binding id to create")
    ),
    responses(
        (status = 201, description = "The bind behavior configured for the requested plan"),
        (status = 400, description = "Request body is not a JSON object"),
        (status = 422, description = "The plan is async only and the client did not send accepts_incomplete=true"),
        (status = 500, description = "No bind behavior configured for the plan")
    )
)]
pub async fn bind(
    State(app_state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    Query(params): Query<AcceptsIncompleteParams>,
    BrokerRequestBody(binding_data): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("PUT Bind {binding_id} to service instance {instance_id} from: {binding_data:?}");

    let accepts_incomplete = params.accepts_incomplete(&binding_data);
    let reply = ServiceBindingApi::bind(
        app_state.store(),
        &instance_id,
        &binding_id,
        binding_data,
        accepts_incomplete,
    )
    .await?;

    render(reply)
}

/// DELETE unbind a service instance
#[utoipa::path(
    delete,
    path = "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
    params(
        AcceptsIncompleteParams,
        ("instance_id" = String, Path, description = "Service instance id the binding belongs to"),
        ("binding_id" = String, Path, description = "Service binding id to remove")
    ),
    responses(
        (status = 200, description = "The unbind behavior configured for the binding's plan"),
        (status = 422, description = "The plan is async only and the client did not send accepts_incomplete=true"),
        (status = 500, description = "No unbind behavior configured for the plan")
    )
)]
pub async fn unbind(
    State(app_state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    Query(params): Query<AcceptsIncompleteParams>,
    BrokerRequestBody(body): BrokerRequestBody,
) -> Result<Response, Error> {
    debug!("DELETE Unbind {binding_id} from service instance {instance_id}");

    let accepts_incomplete = params.accepts_incomplete(&body);
    let reply =
        ServiceBindingApi::unbind(app_state.store(), &binding_id, accepts_incomplete).await?;

    render(reply)
}

/// GET the state of the last operation on a service binding
#[utoipa::path(
    get,
    path = "/v2/service_instances/{instance_id}/service_bindings/{binding_id}/last_operation",
    params(
        ("instance_id" = String, Path, description = "Service instance id the binding belongs to"),
        ("binding_id" = String, Path, description = "Service binding id to poll")
    ),
    responses(
        (status = 200, description = "Always succeeded"),
    )
)]
pub async fn last_operation(
    Path((instance_id, binding_id)): Path<(String, String)>,
) -> Result<Response, Error> {
    debug!("GET Last operation of binding {binding_id} on service instance {instance_id}");

    render(ServiceBindingApi::last_operation()?)
}

/// GET the binding data stored for a service binding
#[utoipa::path(
    get,
    path = "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
    params(
        ("instance_id" = String, Path, description = "Service instance id the binding belongs to"),
        ("binding_id" = String, Path, description = "Service binding id to dump")
    ),
    responses(
        (status = 200, description = "The binding data as submitted"),
        (status = 404, description = "No service binding stored under this id")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
) -> Result<Response, Error> {
    debug!("GET Binding {binding_id} on service instance {instance_id}");

    let binding_data = ServiceBindingApi::find_by_id(app_state.store(), &binding_id).await?;

    Ok(response::record(binding_data))
}
