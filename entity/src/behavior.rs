//! Configured response templates and the per-action maps that hold them.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Plan key consulted whenever a request's plan has no behavior of its own.
pub const DEFAULT_PLAN: &str = "default";

/// A configured response for one action/plan combination.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Behavior {
    /// HTTP status code to respond with.
    pub status: u16,
    /// JSON payload. Takes priority over `raw_body` when both are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub body: Option<Value>,
    /// Literal payload, emitted byte for byte. Used to simulate malformed responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
    /// Wall-clock delay applied before responding.
    #[serde(default)]
    pub sleep_seconds: f64,
    /// Rejects callers that do not send `accepts_incomplete=true`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub async_only: bool,
}

impl Behavior {
    /// Update requests only touch the stored instance when the configured outcome is a success.
    pub fn applies_update(&self) -> bool {
        self.status == 200 || self.status == 202
    }
}

/// Behaviors for a polled operation, chosen by how often the instance has been fetched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct PhasedBehavior {
    pub in_progress: Behavior,
    pub finished: Behavior,
}

/// Behaviors keyed by plan identifier, with [`DEFAULT_PLAN`] as the fallback entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PlanBehaviors<T> {
    plans: BTreeMap<String, T>,
}

impl<T> PlanBehaviors<T> {
    pub fn new() -> Self {
        Self {
            plans: BTreeMap::new(),
        }
    }

    pub fn get(&self, plan_id: &str) -> Option<&T> {
        self.plans.get(plan_id)
    }

    pub fn insert(&mut self, plan_id: impl Into<String>, behavior: T) -> Option<T> {
        self.plans.insert(plan_id.into(), behavior)
    }

    pub fn default_behavior(&self) -> Option<&T> {
        self.plans.get(DEFAULT_PLAN)
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl<T> Default for PlanBehaviors<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The full behavior table, one entry per [`crate::Action`].
///
/// `catalog` is global; every other action is keyed by plan.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Behaviors {
    pub catalog: Behavior,
    #[serde(default)]
    pub provision: PlanBehaviors<Behavior>,
    #[serde(default)]
    pub update: PlanBehaviors<Behavior>,
    #[serde(default)]
    pub deprovision: PlanBehaviors<Behavior>,
    #[serde(default)]
    pub bind: PlanBehaviors<Behavior>,
    #[serde(default)]
    pub unbind: PlanBehaviors<Behavior>,
    #[serde(default)]
    pub fetch: PlanBehaviors<PhasedBehavior>,
    #[serde(default)]
    pub fetch_service_binding: PlanBehaviors<PhasedBehavior>,
}
