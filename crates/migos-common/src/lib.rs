// Shared domain types used across the migos core crates.
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid id: {0}")]
    InvalidId(String),
}

pub mod ids {
    // Newtype IDs so a user id can never be handed where a group id goes.
    use super::{Error, Result};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;
    use uuid::Uuid;

    macro_rules! id_type {
        ($name:ident) => {
            #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
            pub struct $name(Uuid);

            impl $name {
                // Mint a fresh random ID.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                // Rewrap a UUID read back from storage.
                pub fn from_uuid(uuid: Uuid) -> Self {
                    Self(uuid)
                }

                pub fn as_uuid(&self) -> Uuid {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = Error;

                fn from_str(input: &str) -> Result<Self> {
                    // Carry the rejected input in the error.
                    let uuid =
                        Uuid::parse_str(input).map_err(|_| Error::InvalidId(input.into()))?;
                    Ok(Self(uuid))
                }
            }
        };
    }

    id_type!(UserId);
    id_type!(GroupId);
    id_type!(InviteId);
}

/// Role of a user inside one group.
///
/// Roles are per-membership, not global: the same user can be `Admin` in
/// one group and `Member` in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            _ => Err(()),
        }
    }
}

/// Billing plan of a user account.
///
/// The owner's plan caps how many groups they may own and how many times a
/// group may generate matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    Basic,
    Pro,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Basic => "BASIC",
            Plan::Pro => "PRO",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "BASIC" => Ok(Plan::Basic),
            "PRO" => Ok(Plan::Pro),
            _ => Err(()),
        }
    }
}

/// Membership of one user in one group.
///
/// `match_id` is the user this member must gift; it is `None` until matches
/// have been generated for the group and is overwritten on every successful
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: ids::UserId,
    pub group_id: ids::GroupId,
    pub role: Role,
    pub gift_tip: Option<String>,
    pub match_id: Option<ids::UserId>,
}

impl Member {
    pub fn new(user_id: ids::UserId, group_id: ids::GroupId, role: Role) -> Self {
        Self {
            user_id,
            group_id,
            role,
            gift_tip: None,
            match_id: None,
        }
    }
}
