//! Dumping and merging the broker configuration.
//!
//! Merge precedence: a top-level key whose current and submitted values are both
//! objects is merged key by key, and each of those keys is replaced wholesale.
//! Every other top-level value, `service_instances` included, is replaced.
use super::error::{EntityApiErrorKind, Error};
use entity::broker_data::SERVICE_INSTANCES_KEY;
use entity::{BrokerData, RequestData};
use serde_json::Value;

use log::*;

/// Depth below the top level at which submitted objects stop merging and start replacing.
const MERGE_DEPTH: usize = 1;

/// Pretty-printed dump of everything, instances and bindings included.
pub fn full_dump(data: &BrokerData) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Pretty-printed dump without instances and bindings, suitable for posting back as configuration.
pub fn sanitized_dump(data: &BrokerData) -> Result<String, Error> {
    let mut value = serde_json::to_value(data)?;
    if let Value::Object(map) = &mut value {
        map.remove(SERVICE_INSTANCES_KEY);
    }

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Merges `payload` into `data`. On error `data` is left untouched.
pub fn merge(data: &mut BrokerData, payload: RequestData) -> Result<(), Error> {
    debug!("Merging broker configuration: {payload:?}");

    let mut current = match serde_json::to_value(&*data)? {
        Value::Object(map) => map,
        _ => {
            return Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::Serialization,
            })
        }
    };

    for (key, value) in payload {
        if key == SERVICE_INSTANCES_KEY {
            current.insert(key, value);
            continue;
        }

        match current.get_mut(&key) {
            Some(existing) => merge_json(existing, value, MERGE_DEPTH),
            None => {
                current.insert(key, value);
            }
        }
    }

    *data = serde_json::from_value(Value::Object(current)).map_err(Error::invalid_configuration)?;

    info!("Broker configuration updated");

    Ok(())
}

/// Merges `overlay` into `base`.
///
/// While `depth` is non-zero and both sides are objects, keys are merged one by one
/// with `depth - 1`. Anything else replaces `base` outright.
pub fn merge_json(base: &mut Value, overlay: Value, depth: usize) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) if depth > 0 => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value, depth - 1),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{seed, service_instance};
    use serde_json::json;

    fn data() -> BrokerData {
        seed::parse_seed(
            &json!({
                "behaviors": {
                    "catalog": {"status": 200, "body": {"services": []}},
                    "provision": {
                        "fake-async-plan-guid": {"status": 202, "body": {}, "async_only": true},
                        "default": {"status": 200, "body": {}}
                    },
                    "deprovision": {"default": {"status": 200, "body": {}}}
                },
                "max_fetch_service_instance_requests": 1
            })
            .to_string(),
        )
        .unwrap()
    }

    fn payload(value: Value) -> RequestData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_json_replaces_below_the_depth_limit() {
        let mut base = json!({"a": {"x": {"keep": 1}, "y": 2}, "b": 3});

        merge_json(&mut base, json!({"a": {"x": {"new": 1}}, "b": [1]}), 1);

        assert_eq!(base, json!({"a": {"x": {"new": 1}, "y": 2}, "b": [1]}));
    }

    #[test]
    fn merge_json_with_zero_depth_replaces_objects() {
        let mut base = json!({"a": 1});

        merge_json(&mut base, json!({"b": 2}), 0);

        assert_eq!(base, json!({"b": 2}));
    }

    #[test]
    fn merge_replaces_only_the_submitted_action() {
        let mut data = data();

        merge(
            &mut data,
            payload(json!({
                "behaviors": {"provision": {"default": {"status": 400, "body": {}}}}
            })),
        )
        .unwrap();

        assert_eq!(data.behaviors.provision.default_behavior().unwrap().status, 400);
        assert!(data.behaviors.provision.get("fake-async-plan-guid").is_none());
        assert_eq!(data.behaviors.deprovision.default_behavior().unwrap().status, 200);
        assert_eq!(data.max_fetch_service_instance_requests, 1);
    }

    #[test]
    fn merge_replaces_scalars_and_instances_wholesale() {
        let mut data = data();
        service_instance::provision(&mut data, "old", payload(json!({})));

        merge(
            &mut data,
            payload(json!({
                "max_fetch_service_instance_requests": 3,
                "service_instances": {
                    "seeded": {"provision_data": {"plan_id": "fake-plan-guid"}, "fetch_count": 2}
                }
            })),
        )
        .unwrap();

        assert_eq!(data.max_fetch_service_instance_requests, 3);
        assert!(service_instance::find_by_id(&data, "old").is_err());
        let seeded = service_instance::find_by_id(&data, "seeded").unwrap();
        assert_eq!(seeded.fetch_count, 2);
        assert!(!seeded.deleted);
    }

    #[test]
    fn invalid_merge_payload_is_rejected_and_leaves_data_untouched() {
        let mut data = data();
        let before = data.clone();

        let err = merge(
            &mut data,
            payload(json!({"behaviors": {"provision": {"default": {"body": {}}}}})),
        )
        .unwrap_err();

        assert!(matches!(
            err.error_kind,
            EntityApiErrorKind::InvalidConfiguration(_)
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn sanitized_dump_round_trips_through_merge() {
        let mut data = data();
        service_instance::provision(&mut data, "i1", payload(json!({})));
        let dumped = sanitized_dump(&data).unwrap();

        let posted: Value = serde_json::from_str(&dumped).unwrap();
        merge(&mut data, posted.as_object().cloned().unwrap()).unwrap();

        assert_eq!(sanitized_dump(&data).unwrap(), dumped);
        assert!(service_instance::find_by_id(&data, "i1").is_ok());
    }

    #[test]
    fn dumps_differ_only_in_instances() {
        let mut data = data();
        service_instance::provision(&mut data, "i1", payload(json!({"plan_id": "p"})));

        let full: Value = serde_json::from_str(&full_dump(&data).unwrap()).unwrap();
        let sanitized: Value = serde_json::from_str(&sanitized_dump(&data).unwrap()).unwrap();

        assert_eq!(
            full[SERVICE_INSTANCES_KEY]["i1"]["provision_data"],
            json!({"plan_id": "p"})
        );
        assert!(sanitized.get(SERVICE_INSTANCES_KEY).is_none());
        assert_eq!(full["behaviors"], sanitized["behaviors"]);
    }
}
