use crate::RequestData;
use serde::{Deserialize, Serialize};

/// A service binding, stored in the same keyspace as service instances.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceBinding {
    pub binding_data: RequestData,
    pub instance_id: String,
}

impl ServiceBinding {
    pub fn new(instance_id: impl Into<String>, binding_data: RequestData) -> Self {
        Self {
            binding_data,
            instance_id: instance_id.into(),
        }
    }

    pub fn plan_id(&self) -> Option<&str> {
        crate::plan_id(&self.binding_data)
    }
}
