use super::error::Error;
use entity::{BrokerData, RequestData, ServiceBinding, StoredRecord};

use log::*;

/// Stores a binding under `id` in the shared instance/binding keyspace.
pub fn create(
    data: &mut BrokerData,
    id: &str,
    instance_id: &str,
    binding_data: RequestData,
) -> ServiceBinding {
    debug!("Binding {id} to service instance {instance_id} with: {binding_data:?}");

    let binding = ServiceBinding::new(instance_id, binding_data);
    data.service_instances
        .insert(id.to_owned(), StoredRecord::Binding(binding.clone()));

    binding
}

/// Removes the binding, returning it when one was stored under `id`.
pub fn delete_by_id(data: &mut BrokerData, id: &str) -> Option<ServiceBinding> {
    if find_by_id(data, id).is_err() {
        debug!("Service binding {id} not found, nothing to delete");
        return None;
    }

    match data.service_instances.remove(id) {
        Some(StoredRecord::Binding(binding)) => Some(binding),
        _ => None,
    }
}

pub fn find_by_id<'a>(data: &'a BrokerData, id: &str) -> Result<&'a ServiceBinding, Error> {
    data.service_instances
        .get(id)
        .and_then(StoredRecord::as_binding)
        .ok_or_else(Error::record_not_found)
}
