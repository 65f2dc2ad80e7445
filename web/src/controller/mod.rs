pub(crate) mod catalog_controller;
pub(crate) mod config_controller;
pub(crate) mod health_check_controller;
pub(crate) mod service_binding_controller;
pub(crate) mod service_instance_controller;
