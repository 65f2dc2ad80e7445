use super::error::{EntityApiErrorKind, Error};
use entity::{Action, Behavior, Behaviors, PhasedBehavior, PlanBehaviors};

use log::*;

/// The behavior configured for an action, tagged by the shape that action uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedBehavior<'a> {
    Single(&'a Behavior),
    Phased(&'a PhasedBehavior),
}

/// Looks up the behavior for `action` and `plan_id`.
///
/// `catalog` ignores the plan. Every other action uses the exact plan entry when
/// there is one and the `default` entry otherwise; when neither exists the
/// broker is misconfigured and the lookup fails.
pub fn resolve<'a>(
    behaviors: &'a Behaviors,
    action: Action,
    plan_id: Option<&str>,
) -> Result<ResolvedBehavior<'a>, Error> {
    let resolved = match action {
        Action::Catalog => ResolvedBehavior::Single(&behaviors.catalog),
        Action::Provision => ResolvedBehavior::Single(by_plan(&behaviors.provision, action, plan_id)?),
        Action::Update => ResolvedBehavior::Single(by_plan(&behaviors.update, action, plan_id)?),
        Action::Deprovision => {
            ResolvedBehavior::Single(by_plan(&behaviors.deprovision, action, plan_id)?)
        }
        Action::Bind => ResolvedBehavior::Single(by_plan(&behaviors.bind, action, plan_id)?),
        Action::Unbind => ResolvedBehavior::Single(by_plan(&behaviors.unbind, action, plan_id)?),
        Action::Fetch => ResolvedBehavior::Phased(by_plan(&behaviors.fetch, action, plan_id)?),
        Action::FetchServiceBinding => ResolvedBehavior::Phased(by_plan(
            &behaviors.fetch_service_binding,
            action,
            plan_id,
        )?),
    };

    debug!("Resolved {action} behavior for plan id {plan_id:?}");

    Ok(resolved)
}

/// Resolves an action configured with a single behavior.
pub fn find_behavior<'a>(
    behaviors: &'a Behaviors,
    action: Action,
    plan_id: Option<&str>,
) -> Result<&'a Behavior, Error> {
    match resolve(behaviors, action, plan_id)? {
        ResolvedBehavior::Single(behavior) => Ok(behavior),
        ResolvedBehavior::Phased(_) => Err(unsupported(action)),
    }
}

/// Resolves an action configured with an `in_progress`/`finished` pair.
pub fn find_phased_behavior<'a>(
    behaviors: &'a Behaviors,
    action: Action,
    plan_id: Option<&str>,
) -> Result<&'a PhasedBehavior, Error> {
    match resolve(behaviors, action, plan_id)? {
        ResolvedBehavior::Phased(behavior) => Ok(behavior),
        ResolvedBehavior::Single(_) => Err(unsupported(action)),
    }
}

fn by_plan<'a, T>(
    plans: &'a PlanBehaviors<T>,
    action: Action,
    plan_id: Option<&str>,
) -> Result<&'a T, Error> {
    plan_id
        .and_then(|plan_id| plans.get(plan_id))
        .or_else(|| plans.default_behavior())
        .ok_or_else(|| {
            error!("No {action} behavior for plan id {plan_id:?} and no default configured");
            Error::behavior_not_configured(action, plan_id)
        })
}

fn unsupported(action: Action) -> Error {
    Error {
        source: None,
        error_kind: EntityApiErrorKind::UnsupportedAction(action),
    }
}
