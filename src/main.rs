use entity_api::{seed, Store};
use log::*;
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting mock service broker [{}] with seed {}",
        config.runtime_env(),
        config.seed_path().display()
    );

    let seed = match seed::load_seed(config.seed_path()) {
        Ok(seed) => seed,
        Err(e) => {
            error!("Failed to load seed configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(Store::new(seed));
    let app_state = AppState::new(config, &store);

    if let Err(e) = web::init_server(app_state).await {
        error!("Mock service broker stopped: {e}");
        std::process::exit(1);
    }
}
