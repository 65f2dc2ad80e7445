use entity::BrokerData;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::*;

/// The broker's state, shared by every request handler.
///
/// Holds the live data plus the seed it was created from, so a reset never
/// depends on the seed file still being readable.
#[derive(Debug)]
pub struct Store {
    data: RwLock<BrokerData>,
    seed: BrokerData,
}

impl Store {
    pub fn new(seed: BrokerData) -> Self {
        Self {
            data: RwLock::new(seed.clone()),
            seed,
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, BrokerData> {
        self.data.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, BrokerData> {
        self.data.write().await
    }

    /// Discards every behavior change and stored record.
    pub async fn reset(&self) {
        *self.data.write().await = self.seed.clone();
        info!("Broker data reset to seed configuration");
    }

    #[cfg(test)]
    fn seed(&self) -> &BrokerData {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{seed, service_instance};
    use serde_json::json;

    #[tokio::test]
    async fn reset_restores_the_seed() {
        let store = Store::new(
            seed::parse_seed(r#"{"behaviors": {"catalog": {"status": 200}}}"#).unwrap(),
        );
        {
            let mut data = store.write().await;
            data.max_fetch_service_instance_requests = 5;
            service_instance::provision(&mut data, "i1", json!({}).as_object().cloned().unwrap());
        }

        store.reset().await;

        let data = store.read().await;
        assert_eq!(*data, *store.seed());
        assert!(data.service_instances.is_empty());
    }
}
