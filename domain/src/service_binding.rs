use crate::emitter::{self, LastOperation, Reply};
use crate::error::Error;
use entity_api::{behavior, service_binding, Action, RequestData, Store};

use log::*;

pub async fn bind(
    store: &Store,
    instance_id: &str,
    binding_id: &str,
    binding_data: RequestData,
    accepts_incomplete: bool,
) -> Result<Reply, Error> {
    let behavior = {
        let mut data = store.write().await;
        let plan_id = service_binding::create(&mut data, binding_id, instance_id, binding_data)
            .plan_id()
            .map(str::to_owned);

        info!("Bound {binding_id} to service instance {instance_id} on plan {plan_id:?}");

        behavior::find_behavior(&data.behaviors, Action::Bind, plan_id.as_deref())?.clone()
    };

    emitter::respond_gated(behavior, accepts_incomplete).await
}

pub async fn unbind(
    store: &Store,
    binding_id: &str,
    accepts_incomplete: bool,
) -> Result<Reply, Error> {
    let behavior = {
        let mut data = store.write().await;
        let plan_id = service_binding::delete_by_id(&mut data, binding_id)
            .and_then(|binding| binding.plan_id().map(str::to_owned));

        info!("Unbound {binding_id} on plan {plan_id:?}");

        behavior::find_behavior(&data.behaviors, Action::Unbind, plan_id.as_deref())?.clone()
    };

    emitter::respond_gated(behavior, accepts_incomplete).await
}

/// Binding operations always report as complete.
pub fn last_operation() -> Result<Reply, Error> {
    Ok(Reply::json(
        200,
        &LastOperation {
            state: "succeeded",
            description: "100%",
        },
    )?)
}

/// The binding data submitted when the binding was created.
pub async fn find_by_id(store: &Store, binding_id: &str) -> Result<RequestData, Error> {
    let data = store.read().await;
    let binding = service_binding::find_by_id(&data, binding_id)?;

    Ok(binding.binding_data.clone())
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
                    "behaviors": {
                        "catalog": {"status": 200, "body": {}},
                        "bind": {
                            "fake-plan-guid": {"status": 201, "body": {"credentials": {"user": "u"}}},
                            "fake-async-only-plan-guid": {"status": 202, "body": {}, "async_only": true},
                            "default": {"status": 400, "body": {}}
                        },
                        "unbind": {
                            "fake-plan-guid": {"status": 200, "raw_body": "plan"},
                            "fake-async-only-plan-guid": {"status": 202, "body": {}, "async_only": true},
                            "default": {"status": 410, "body": {}}
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

    #[tokio::test]
    async fn bind_resolves_by_the_binding_plan() {
        let store = store();

        let reply = bind(
            &store,
            "i1",
            "b1",
            request(json!({"plan_id": "fake-plan-guid"})),
            false,
        )
        .await
        .unwrap();

        assert_eq!(reply.status, 201);
        assert_eq!(
            find_by_id(&store, "b1").await.unwrap().get("plan_id"),
            Some(&json!("fake-plan-guid"))
        );
    }

    #[tokio::test]
    async fn unbind_uses_the_deleted_binding_plan_then_the_default() {
        let store = store();
        bind(
            &store,
            "i1",
            "b1",
            request(json!({"plan_id": "fake-plan-guid"})),
            false,
        )
        .await
        .unwrap();

        let first = unbind(&store, "b1", false).await.unwrap();
        let second = unbind(&store, "b1", false).await.unwrap();

        assert_eq!(first.payload, Payload::Raw("plan".to_string()));
        assert_eq!(second.status, 410);
        assert_eq!(
            find_by_id(&store, "b1").await.unwrap_err().error_kind,
            DomainErrorKind::NotFound
        );
    }

    #[test]
    fn last_operation_is_always_succeeded() {
        let reply = last_operation().unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.payload.as_str(),
            r#"{"state":"succeeded","description":"100%"}"#
        );
    }

    #[tokio::test]
    async fn async_only_bind_requires_accepts_incomplete() {
        let store = store();
        let body = request(json!({"plan_id": "fake-async-only-plan-guid"}));

        let rejected = bind(&store, "i1", "b1", body.clone(), false).await.unwrap();
        let accepted = bind(&store, "i1", "b2", body, true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
    }

    #[tokio::test]
    async fn async_only_unbind_requires_accepts_incomplete() {
        let store = store();
        let body = request(json!({"plan_id": "fake-async-only-plan-guid"}));
        bind(&store, "i1", "b1", body.clone(), true).await.unwrap();
        bind(&store, "i1", "b2", body, true).await.unwrap();

        let rejected = unbind(&store, "b1", false).await.unwrap();
        let accepted = unbind(&store, "b2", true).await.unwrap();

        assert_eq!(rejected, Reply::async_required());
        assert_eq!(accepted.status, 202);
    }
}
