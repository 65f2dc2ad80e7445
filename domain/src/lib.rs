//! Broker operations, one module per protocol resource.
//!
//! Every operation takes the shared [`Store`] explicitly so that tests and servers
//! can each own an isolated broker.
pub use entity_api::{Action, Behavior, PhasedBehavior, RequestData, Store};

pub mod broker_config;
pub mod catalog;
pub mod emitter;
pub mod error;
pub mod service_binding;
pub mod service_instance;
