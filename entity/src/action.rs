use serde::{Deserialize, Serialize};

/// Every protocol operation whose response is driven by a configured behavior.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Catalog,
    Provision,
    Update,
    Deprovision,
    Bind,
    Unbind,
    Fetch,
    FetchServiceBinding,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Catalog,
        Action::Provision,
        Action::Update,
        Action::Deprovision,
        Action::Bind,
        Action::Unbind,
        Action::Fetch,
        Action::FetchServiceBinding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Provision => "provision",
            Self::Update => "update",
            Self::Deprovision => "deprovision",
            Self::Bind => "bind",
            Self::Unbind => "unbind",
            Self::Fetch => "fetch",
            Self::FetchServiceBinding => "fetch_service_binding",
        }
    }

    /// Actions configured with an `in_progress`/`finished` pair rather than a single behavior.
    pub fn is_phased(&self) -> bool {
        matches!(self, Self::Fetch | Self::FetchServiceBinding)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serialized_name() {
        for action in Action::ALL {
            let serialized = serde_json::to_value(action).unwrap();
            assert_eq!(serialized.as_str(), Some(action.as_str()));
        }
    }

    #[test]
    fn only_fetch_actions_are_phased() {
        let phased: Vec<Action> = Action::ALL.into_iter().filter(Action::is_phased).collect();
        assert_eq!(phased, vec![Action::Fetch, Action::FetchServiceBinding]);
    }
}
