use entity_api::{config::sanitized_dump, seed};
use log::*;
use service::{config::Config, logging::Logger};

fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!("Checking seed [{}]...", config.seed_path().display());

    let dump = seed::load_seed(config.seed_path())
        .and_then(|data| sanitized_dump(&data));

    match dump {
        Ok(dump) => println!("{dump}"),
        Err(e) => {
            error!("Seed {} is not a usable configuration: {e}", config.seed_path().display());
            std::process::exit(1);
        }
    }
}
