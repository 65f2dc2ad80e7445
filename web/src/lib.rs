use tokio::net::TcpListener;

pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod response;
pub mod router;

pub use error::{Error, Result};

use log::*;

/// Binds the configured interface and port and serves the broker until the process exits.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state.config.interface().to_owned();
    let port = app_state.config.port;
    let listener = TcpListener::bind((host.as_str(), port)).await?;

    info!("Mock service broker listening on {}", listener.local_addr()?);

    serve(listener, app_state).await
}

/// Serves the broker on an already bound listener.
pub async fn serve(listener: TcpListener, app_state: AppState) -> std::io::Result<()> {
    let app = router::define_routes(app_state);

    axum::serve(listener, app).await
}
