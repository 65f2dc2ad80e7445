use super::error::Error;
use entity::BrokerData;
use std::path::Path;

use log::*;

/// Reads and validates the seed document the broker starts from and resets to.
pub fn load_seed(path: impl AsRef<Path>) -> Result<BrokerData, Error> {
    let path = path.as_ref();
    debug!("Reading seed configuration from {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    parse_seed(&contents)
}

pub fn parse_seed(contents: &str) -> Result<BrokerData, Error> {
    serde_json::from_str(contents).map_err(Error::invalid_configuration)
}
