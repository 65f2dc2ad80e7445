//! The configuration control plane: dumps, merges and resets of the store.
use crate::error::Error;
use entity_api::{config, RequestData, Store};

/// Every behavior, limit and stored record.
pub async fn full(store: &Store) -> Result<String, Error> {
    let data = store.read().await;
    Ok(config::full_dump(&data)?)
}

/// The configuration without instances and bindings.
pub async fn sanitized(store: &Store) -> Result<String, Error> {
    let data = store.read().await;
    Ok(config::sanitized_dump(&data)?)
}

/// Merges `payload` into the live configuration and returns the sanitized result.
pub async fn merge(store: &Store, payload: RequestData) -> Result<String, Error> {
    let mut data = store.write().await;
    config::merge(&mut data, payload)?;

    Ok(config::sanitized_dump(&data)?)
}

/// Returns the store to its seed and reports the sanitized seed.
pub async fn reset(store: &Store) -> Result<String, Error> {
    store.reset().await;
    sanitized(store).await
}
