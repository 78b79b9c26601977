use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Manage,
    Get,
    Create,
    Update,
    Delete,
    Sort,
    Revoke,
    TransferOwnership,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Get => "get",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Sort => "sort",
            Action::Revoke => "revoke",
            Action::TransferOwnership => "transfer_ownership",
        }
    }

    /// Whether a rule declared for `self` also applies to `other`.
    /// `manage` is the wildcard covering every action.
    pub fn covers(self, other: Action) -> bool {
        self == Action::Manage || self == other
    }

    /// Parse an action string as stored in policy data.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidAction`] if the string is not a known action.
    pub fn parse(value: &str) -> AuthzResult<Self> {
        value
            .parse()
            .map_err(|_| AuthzError::InvalidAction(value.to_string()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manage" => Ok(Action::Manage),
            "get" => Ok(Action::Get),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "sort" => Ok(Action::Sort),
            "revoke" => Ok(Action::Revoke),
            "transfer_ownership" => Ok(Action::TransferOwnership),
            _ => Err(()),
        }
    }
}
