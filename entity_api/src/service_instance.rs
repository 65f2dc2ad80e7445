use super::error::Error;
use entity::{BrokerData, RequestData, ServiceInstance, StoredRecord};

use log::*;

/// Outcome of a status fetch against a stored instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRecord {
    pub plan_id: Option<String>,
    pub fetch_count: u64,
}

/// Creates the instance, overwriting whatever record held `id` before.
pub fn provision(data: &mut BrokerData, id: &str, provision_data: RequestData) -> ServiceInstance {
    debug!("Provisioning service instance {id} with: {provision_data:?}");

    let instance = ServiceInstance::new(provision_data);
    data.service_instances
        .insert(id.to_owned(), StoredRecord::Instance(instance.clone()));

    instance
}

/// Merges `changes` into an existing instance. Returns `false` when there is no instance to update.
pub fn update(data: &mut BrokerData, id: &str, changes: RequestData) -> bool {
    match find_mut(data, id) {
        Some(instance) => {
            debug!("Existing service instance {id} to be updated with: {changes:?}");
            instance.update(changes);
            true
        }
        None => {
            debug!("Service instance {id} not found, nothing to update");
            false
        }
    }
}

/// Counts one status fetch of the instance, if it exists.
pub fn record_fetch(data: &mut BrokerData, id: &str) -> Option<FetchRecord> {
    let instance = find_mut(data, id)?;
    let fetch_count = instance.fetch();

    debug!("Service instance {id} fetched {fetch_count} time(s)");

    Some(FetchRecord {
        plan_id: instance.plan_id().map(str::to_owned),
        fetch_count,
    })
}

/// Flags the instance as deleted. The record stays in the store.
pub fn delete<'a>(data: &'a mut BrokerData, id: &str) -> Option<&'a ServiceInstance> {
    let instance = find_mut(data, id)?;
    instance.delete();

    debug!("Service instance {id} flagged as deleted");

    Some(&*instance)
}

pub fn find_by_id<'a>(data: &'a BrokerData, id: &str) -> Result<&'a ServiceInstance, Error> {
    data.service_instances
        .get(id)
        .and_then(StoredRecord::as_instance)
        .ok_or_else(Error::record_not_found)
}

fn find_mut<'a>(data: &'a mut BrokerData, id: &str) -> Option<&'a mut ServiceInstance> {
    data.service_instances
        .get_mut(id)
        .and_then(StoredRecord::as_instance_mut)
}
