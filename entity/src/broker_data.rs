use crate::{Behaviors, ServiceBinding, ServiceInstance};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fetches allowed to report `in_progress` before an instance reports `finished`.
pub const DEFAULT_MAX_FETCH_SERVICE_INSTANCE_REQUESTS: u64 = 1;

/// Top-level key holding instance and binding records.
pub const SERVICE_INSTANCES_KEY: &str = "service_instances";

/// One entry of the shared instance/binding keyspace.
///
/// Bindings are tried first: their fields are mandatory, while every instance
/// field has a default and would otherwise match any object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Binding(ServiceBinding),
    Instance(ServiceInstance),
}

impl StoredRecord {
    pub fn as_instance(&self) -> Option<&ServiceInstance> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Binding(_) => None,
        }
    }

    pub fn as_instance_mut(&mut self) -> Option<&mut ServiceInstance> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Binding(_) => None,
        }
    }

    pub fn as_binding(&self) -> Option<&ServiceBinding> {
        match self {
            Self::Binding(binding) => Some(binding),
            Self::Instance(_) => None,
        }
    }
}

/// Everything the broker knows: behaviors, limits and stored records.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrokerData {
    pub behaviors: Behaviors,
    #[serde(default = "default_max_fetch_service_instance_requests")]
    pub max_fetch_service_instance_requests: u64,
    #[serde(default)]
    pub service_instances: BTreeMap<String, StoredRecord>,
    /// Top-level keys the broker does not interpret, kept so dumps round-trip.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_max_fetch_service_instance_requests() -> u64 {
    DEFAULT_MAX_FETCH_SERVICE_INSTANCE_REQUESTS
}
