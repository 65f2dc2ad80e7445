use crate::controller::{
    catalog_controller, config_controller, health_check_controller, service_binding_controller,
    service_instance_controller,
};
use crate::middleware::error_report::{install_panic_hook, panic_report, report_server_errors};
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Mock Service Broker API"
        ),
        paths(
            catalog_controller::index,
            config_controller::read,
            config_controller::read_all,
            config_controller::merge,
            config_controller::reset,
            health_check_controller::health_check,
            service_binding_controller::bind,
            service_binding_controller::unbind,
            service_binding_controller::last_operation,
            service_binding_controller::read,
            service_instance_controller::provision,
            service_instance_controller::update,
            service_instance_controller::deprovision,
            service_instance_controller::last_operation,
            service_instance_controller::read,
        ),
        components(
            schemas(
                domain::Behavior,
                domain::PhasedBehavior,
            )
        ),
        tags(
            (name = "mock_broker", description = "Configurable mock of the Open Service Broker API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    install_panic_hook();

    Router::new()
        .merge(catalog_routes(app_state.clone()))
        .merge(config_routes(app_state.clone()))
        .merge(health_routes())
        .merge(service_binding_routes(app_state.clone()))
        .merge(service_instance_routes(app_state.clone()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(CatchPanicLayer::custom(panic_report))
        .layer(from_fn_with_state(app_state, report_server_errors))
}

fn catalog_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/v2/catalog", get(catalog_controller::index))
        .with_state(app_state)
}

fn config_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/config", get(config_controller::read))
        .route("/config", post(config_controller::merge))
        .route("/config/all", get(config_controller::read_all))
        .route("/config/reset", post(config_controller::reset))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn service_binding_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
            put(service_binding_controller::bind)
                .delete(service_binding_controller::unbind)
                .get(service_binding_controller::read),
        )
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}/last_operation",
            get(service_binding_controller::last_operation),
        )
        .with_state(app_state)
}

fn service_instance_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/v2/service_instances/{instance_id}",
            put(service_instance_controller::provision)
                .patch(service_instance_controller::update)
                .delete(service_instance_controller::deprovision)
                .get(service_instance_controller::read),
        )
        .route(
            "/v2/service_instances/{instance_id}/last_operation",
            get(service_instance_controller::last_operation),
        )
        .with_state(app_state)
}
