use serde_json::{Map, Value};

pub mod action;
pub mod behavior;
pub mod broker_data;
pub mod service_binding;
pub mod service_instance;

pub use action::Action;
pub use behavior::{Behavior, Behaviors, PhasedBehavior, PlanBehaviors, DEFAULT_PLAN};
pub use broker_data::{BrokerData, StoredRecord};
pub use service_binding::ServiceBinding;
pub use service_instance::ServiceInstance;

/// A submitted request document (provision, update or bind body) as it was received.
pub type RequestData = Map<String, Value>;

/// Key under which every broker request document carries its plan identifier.
pub const PLAN_ID_KEY: &str = "plan_id";

/// Returns the plan identifier of a request document, if it names one.
pub fn plan_id(data: &RequestData) -> Option<&str> {
    data.get(PLAN_ID_KEY).and_then(Value::as_str)
}
