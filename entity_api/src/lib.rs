pub use entity::{
    broker_data, Action, Behavior, Behaviors, BrokerData, PhasedBehavior, PlanBehaviors,
    plan_id, RequestData, ServiceBinding, ServiceInstance, StoredRecord, DEFAULT_PLAN,
};

pub mod behavior;
pub mod config;
pub mod error;
pub mod seed;
pub mod service_binding;
pub mod service_instance;
pub mod store;

pub use store::Store;
