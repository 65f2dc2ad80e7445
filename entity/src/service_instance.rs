use crate::RequestData;
use serde::{Deserialize, Serialize};

/// A provisioned service instance.
///
/// Deleted instances keep their record and only flip `deleted`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceInstance {
    /// Document submitted at provision time, merged with every successful update.
    #[serde(default)]
    pub provision_data: RequestData,
    /// Number of status fetches since the last provision, update or delete.
    #[serde(default)]
    pub fetch_count: u64,
    #[serde(default)]
    pub deleted: bool,
}

impl ServiceInstance {
    pub fn new(provision_data: RequestData) -> Self {
        Self {
            provision_data,
            fetch_count: 0,
            deleted: false,
        }
    }

    pub fn plan_id(&self) -> Option<&str> {
        crate::plan_id(&self.provision_data)
    }

    /// Shallow-merges `changes` into the provision data and restarts the fetch cycle.
    pub fn update(&mut self, changes: RequestData) {
        self.provision_data.extend(changes);
        self.fetch_count = 0;
    }

    /// Records one status fetch and returns the new count.
    pub fn fetch(&mut self) -> u64 {
        self.fetch_count += 1;
        self.fetch_count
    }

    pub fn delete(&mut self) {
        self.deleted = true;
        self.fetch_count = 0;
    }
}
