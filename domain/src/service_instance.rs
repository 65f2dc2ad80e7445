//! Provision, update, deprovision and status polling of service instances.
//!
//! Each operation mutates the store and resolves its behavior under the write
//! lock, then releases the lock before the behavior's delay starts.
use crate::emitter::{self, LastOperation, Reply};
use crate::error::Error;
use entity_api::service_instance::{self, FetchRecord};
use entity_api::{behavior, Action, RequestData, Store};

use log::*;

/// Status of the fixed reply for instances the broker never stored.
const UNKNOWN_INSTANCE_STATUS: u16 = 200;

pub async fn provision(
    store: &Store,
    instance_id: &str,
    provision_data: RequestData,
    accepts_incomplete: bool,
) -> Result<Reply, Error> {
    let behavior = {
        let mut data = store.write().await;
        let plan_id = service_instance::provision(&mut data, instance_id, provision_data)
            .plan_id()
            .map(str::to_owned);

        info!("Provisioned service instance {instance_id} on plan {plan_id:?}");

        behavior::find_behavior(&data.behaviors, Action::Provision, plan_id.as_deref())?.clone()
    };

    emitter::respond_gated(behavior, accepts_incomplete).await
}

/// Resolves the behavior by the plan in `changes`, then applies `changes` only
/// when that behavior reports success.
pub async fn update(
    store: &Store,
    instance_id: &str,
    changes: RequestData,
    accepts_incomplete: bool,
) -> Result<Reply, Error> {
    let plan_id = entity_api::plan_id(&changes).map(str::to_owned);

    let behavior = {
        let mut data = store.write().await;
        let behavior =
            behavior::find_behavior(&data.behaviors, Action::Update, plan_id.as_deref())?.clone();

        if behavior.applies_update() && service_instance::update(&mut data, instance_id, changes) {
            info!("Updated service instance {instance_id} to plan {plan_id:?}");
        }

        behavior
    };

    emitter::respond_gated(behavior, accepts_incomplete).await
}

pub async fn deprovision(
    store: &Store,
    instance_id: &str,
    accepts_incomplete: bool,
) -> Result<Reply, Error> {
    let behavior = {
        let mut data = store.write().await;
        let plan_id = service_instance::delete(&mut data, instance_id)
            .and_then(|instance| instance.plan_id())
            .map(str::to_owned);

        info!("Deprovisioned service instance {instance_id} on plan {plan_id:?}");

        behavior::find_behavior(&data.behaviors, Action::Deprovision, plan_id.as_deref())?
            .clone()
    };

    emitter::respond_gated(behavior, accepts_incomplete).await
}

/// Polls an instance's last operation.
///
/// Reports `in_progress` until the instance has been fetched more than
/// `max_fetch_service_instance_requests` times, `finished` from then on.
pub async fn last_operation(store: &Store, instance_id: &str) -> Result<Reply, Error> {
    let behavior = {
        let mut data = store.write().await;
        let max_fetches = data.max_fetch_service_instance_requests;

        let Some(FetchRecord {
            plan_id,
            fetch_count,
        }) = service_instance::record_fetch(&mut data, instance_id)
        else {
            debug!("Last operation requested for unknown service instance {instance_id}");
            let description =
                format!("Broker could not find service instance by the given id {instance_id}");
            return Ok(Reply::json(
                UNKNOWN_INSTANCE_STATUS,
                &LastOperation {
                    state: "failed",
                    description: &description,
                },
            )?);
        };

        let phased =
            behavior::find_phased_behavior(&data.behaviors, Action::Fetch, plan_id.as_deref())?;

        if fetch_count > max_fetches {
            phased.finished.clone()
        } else {
            phased.in_progress.clone()
        }
    };

    emitter::respond(behavior).await
}

/// The provision data stored for an instance, deleted or not.
pub async fn find_by_id(store: &Store, instance_id: &str) -> Result<RequestData, Error> {
    let data = store.read().await;
    let instance = service_instance::find_by_id(&data, instance_id)?;

    Ok(instance.provision_data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Payload;
    use crate::error::DomainErrorKind;
    use entity_api::seed;
    use serde_json::{json, Value};

    fn store() -> Store {
        Store::new(
            seed::parse_seed(
                &json!({
                    "max_fetch_service_instance_requests": 1,
                    "behaviors": {
                        "catalog": {"status": 200, "body": {}},
                        "provision": {
                            "fake-async-only-plan-guid": {"status": 202, "body": {}, "async_only": true},
                            "default": {"status": 201, "raw_body": "ok"}
                        },
                        "update": {
                            "fake-failing-plan-guid": {"status": 400, "body": {}},
                            "default": {"status": 202, "body": {}}
                        },
                        "deprovision": {
                            "fake-plan-guid": {"status": 202, "raw_body": "plan"},
                            "default": {"status": 200, "raw_body": "default"}
                        },
                        "fetch": {
                            "default": {
                                "in_progress": {"status": 200, "body": {"state": "in progress"}},
                                "finished": {"status": 200, "body": {"state": "succeeded"}}
                            }
                        }
                    }
                })
                .to_string(),
            )
            .unwrap(),
        )
    }

    fn async_only_store() -> Store {
        Store::new(
            seed::parse_seed(
                &json!({
                    "behaviors": {
                        "catalog": {"status": 200, "body": {}},
                        "provision": {"default": {"status": 201, "body": {}}},
                        "update": {
                            "fake-async-only-plan-guid": {"status": 202, "body": {}, "async_only": true},
                            "default": {"status": 200, "body": {}}
                        },
                        "deprovision": {
                            "fake-async-only-plan-guid": {"status": 202, "body": {}, "async_only": true},
                            "default": {"status": 200, "body": {}}
                        }
                    }
                })
                .to_string(),
            )
            .unwrap(),
        )
    }

    fn request(value: Value) -> RequestData {
        value.as_object().cloned().unwrap()
    }

    fn state(reply: &Reply) -> Value {
        serde_json::from_str::<Value>(reply.payload.as_str()).unwrap()["state"].clone()
    }

    #[tokio::test]
    async fn provision_replies_with_the_default_behavior() {
        let store = store();

        let reply = provision(&store, "i1", request(json!({})), false).await.unwrap();

        assert_eq!(reply.status, 201);
        assert_eq!(reply.payload, Payload::Raw("ok".to_string()));
        assert!(find_by_id(&store, "i1").await.is_ok());
    }

    #[tokio::test]
    async fn async_only_provision_still_stores_the_instance() {
        let store = store();
        let body = request(json!({"plan_id": "fake-async-only-plan-guid"}));

        let rejected = provision(&store, "i1", body.clone(), false).await.unwrap();
        let accepted = provision(&store, "i2", body, true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
        assert!(find_by_id(&store, "i1").await.is_ok());
    }

    #[tokio::test]
    async fn fetch_reports_in_progress_then_finished() {
        let store = store();
        provision(&store, "i1", request(json!({})), false).await.unwrap();

        let first = last_operation(&store, "i1").await.unwrap();
        let second = last_operation(&store, "i1").await.unwrap();

        assert_eq!(state(&first), "in progress");
        assert_eq!(state(&second), "succeeded");
    }

    #[tokio::test]
    async fn update_restarts_the_fetch_cycle() {
        let store = store();
        provision(&store, "i1", request(json!({})), false).await.unwrap();
        last_operation(&store, "i1").await.unwrap();
        last_operation(&store, "i1").await.unwrap();

        update(&store, "i1", request(json!({"parameters": {}})), true)
            .await
            .unwrap();

        let reply = last_operation(&store, "i1").await.unwrap();
        assert_eq!(state(&reply), "in progress");
    }

    #[tokio::test]
    async fn failed_update_leaves_the_instance_alone() {
        let store = store();
        provision(&store, "i1", request(json!({"plan_id": "fake-plan-guid"})), false)
            .await
            .unwrap();

        let reply = update(
            &store,
            "i1",
            request(json!({"plan_id": "fake-failing-plan-guid"})),
            true,
        )
        .await
        .unwrap();

        assert_eq!(reply.status, 400);
        assert_eq!(
            find_by_id(&store, "i1").await.unwrap().get("plan_id"),
            Some(&json!("fake-plan-guid"))
        );
    }

    #[tokio::test]
    async fn update_of_unknown_instance_still_replies() {
        let store = store();

        let reply = update(&store, "missing", request(json!({})), true)
            .await
            .unwrap();

        assert_eq!(reply.status, 202);
        assert!(find_by_id(&store, "missing").await.is_err());
    }

    #[tokio::test]
    async fn deprovision_resolves_by_the_stored_plan() {
        let store = store();
        provision(&store, "i1", request(json!({"plan_id": "fake-plan-guid"})), false)
            .await
            .unwrap();

        let reply = deprovision(&store, "i1", false).await.unwrap();

        assert_eq!(reply.payload, Payload::Raw("plan".to_string()));
        let data = store.read().await;
        assert!(service_instance::find_by_id(&data, "i1").unwrap().deleted);
    }

    #[tokio::test]
    async fn deprovision_of_unknown_instance_uses_the_default() {
        let store = store();

        let reply = deprovision(&store, "never-provisioned", false).await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.payload, Payload::Raw("default".to_string()));
    }

    #[tokio::test]
    async fn last_operation_of_unknown_instance_is_a_soft_failure() {
        let store = store();

        let reply = last_operation(&store, "missing").await.unwrap();
        let body: Value = serde_json::from_str(reply.payload.as_str()).unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(body["state"], "failed");
        assert_eq!(
            body["description"],
            "Broker could not find service instance by the given id missing"
        );
    }

    #[tokio::test]
    async fn find_by_id_of_unknown_instance_is_not_found() {
        let store = store();

        let err = find_by_id(&store, "missing").await.unwrap_err();

        assert_eq!(err.error_kind, DomainErrorKind::NotFound);
    }

    #[tokio::test]
    async fn missing_default_is_a_configuration_error() {
        let store = store();
        provision(&store, "i1", request(json!({})), false).await.unwrap();
        {
            let mut data = store.write().await;
            data.behaviors.fetch = Default::default();
        }

        let err = last_operation(&store, "i1").await.unwrap_err();

        assert_eq!(err.error_kind, DomainErrorKind::Configuration);
    }

    #[tokio::test]
    async fn async_only_update_requires_accepts_incomplete() {
        let store = async_only_store();
        let changes = request(json!({"plan_id": "fake-async-only-plan-guid"}));

        let rejected = update(&store, "i1", changes.clone(), false).await.unwrap();
        let accepted = update(&store, "i1", changes, true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
    }

    #[tokio::test]
    async fn async_only_deprovision_requires_accepts_incomplete() {
        let store = async_only_store();
        let body = request(json!({"plan_id": "fake-async-only-plan-guid"}));
        provision(&store, "i1", body.clone(), false).await.unwrap();
        provision(&store, "i2", body, false).await.unwrap();

        let rejected = deprovision(&store, "i1", false).await.unwrap();
        let accepted = deprovision(&store, "i2", true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
    }

    #[tokio::test]
    async fn fetch_honors_max_fetch_service_instance_requests() {
        let store = store();
        store.write().await.max_fetch_service_instance_requests = 2;
        provision(&store, "i1", request(json!({})), false).await.unwrap();

        let mut states = Vec::new();
        for _ in 0..3 {
            states.push(state(&last_operation(&store, "i1").await.unwrap()));
        }

        assert_eq!(states, vec![json!("in progress"), json!("in progress"), json!("succeeded")]);
    }

    #[tokio::test]
    async fn fetch_can_be_customized_per_plan() {
        let store = store();
        {
            let mut data = store.write().await;
            let phased = serde_json::from_value(json!({
                "in_progress": {"status": 200, "body": {"state": "in progress", "description": "plan"}},
                "finished": {"status": 410, "body": {"state": "failed"}}
            }))
            .unwrap();
            data.behaviors.fetch.insert("fake-plan-guid", phased);
        }
        provision(&store, "on-plan", request(json!({"plan_id": "fake-plan-guid"})), false)
            .await
            .unwrap();
        provision(&store, "other", request(json!({"plan_id": "other-plan"})), false)
            .await
            .unwrap();

        let first = last_operation(&store, "on-plan").await.unwrap();
        let second = last_operation(&store, "on-plan").await.unwrap();
        let fallback = last_operation(&store, "other").await.unwrap();

        assert_eq!(
            serde_json::from_str::<Value>(first.payload.as_str()).unwrap()["description"],
            "plan"
        );
        assert_eq!(second.status, 410);
        assert_eq!(state(&second), "failed");
        assert_eq!(state(&fallback), "in progress");
    }

    #[tokio::test]
    async fn oversized_sleep_is_a_configuration_error() {
        let store = store();
        {
            let mut data = store.write().await;
            let behavior = serde_json::from_value(json!({"status": 200, "sleep_seconds": 1e20}))
                .unwrap();
            data.behaviors.provision.insert("default", behavior);
        }

        let err = provision(&store, "i1", request(json!({})), false)
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, DomainErrorKind::Configuration);
        assert!(find_by_id(&store, "i1").await.is_ok());
    }
}
