//! Typed authorization subjects and their attribute snapshots.
//!
//! # Purpose
//! Models the entities authorization runs against as a tagged union, so
//! rule matching is done by pattern matching instead of comparing
//! type-name fields.
//!
//! # How it fits
//! The service layer loads a group or invite from storage, copies the facts
//! the rules depend on into an attribute snapshot, and hands the snapshot to
//! [`crate::Ability::can`]. The engine never computes attributes itself.
//!
//! # Key invariants
//! - Snapshots are facts, not defaults: every field must reflect storage at
//!   the time of the check. There is deliberately no `Default` impl for
//!   [`GroupAttrs`]; call sites have to spell out every field.
//! - `GroupAttrs::role` and `is_member` describe the *acting* user's
//!   relationship to the group, not the group itself.
//!
//! # Common pitfalls
//! - Filling "irrelevant" fields with placeholders. A rule added later may
//!   start reading them, silently flipping decisions.
use migos_common::ids::{GroupId, InviteId, UserId};
use migos_common::{Plan, Role};
use serde::{Deserialize, Serialize};

/// Attribute snapshot for a user subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttrs {
    pub id: UserId,
    pub role: Role,
}

/// Attribute snapshot for a group subject.
///
/// `owner_plan`, `user_groups_count` and `times_matches_generated` feed the
/// plan quota rules; `role` and `is_member` are the acting user's membership
/// facts for this group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAttrs {
    pub id: GroupId,
    pub owner_id: UserId,
    pub owner_plan: Plan,
    pub role: Role,
    pub is_member: bool,
    pub members_count: u32,
    pub user_groups_count: u32,
    pub times_matches_generated: u32,
}

/// Attribute snapshot for an invite subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteAttrs {
    pub id: InviteId,
    pub group_id: GroupId,
}

/// A subject under authorization, tagged with its attribute snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Subject {
    User(UserAttrs),
    Group(GroupAttrs),
    Invite(InviteAttrs),
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::User(_) => SubjectKind::User,
            Subject::Group(_) => SubjectKind::Group,
            Subject::Invite(_) => SubjectKind::Invite,
        }
    }
}

/// Subject type without attributes; `All` is the rule-side wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    User,
    Group,
    Invite,
    All,
}

impl SubjectKind {
    /// Whether a rule declared for `self` also applies to `other`.
    pub fn covers(self, other: SubjectKind) -> bool {
        self == SubjectKind::All || self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migos_common::ids::{GroupId, InviteId, UserId};

    #[test]
    fn subject_kind_reporting() {
        let user = Subject::User(UserAttrs {
            id: UserId::new(),
            role: Role::Member,
        });
        assert_eq!(user.kind(), SubjectKind::User);

        let invite = Subject::Invite(InviteAttrs {
            id: InviteId::new(),
            group_id: GroupId::new(),
        });
        assert_eq!(invite.kind(), SubjectKind::Invite);
    }

    #[test]
    fn all_covers_every_kind() {
        for kind in [SubjectKind::User, SubjectKind::Group, SubjectKind::Invite] {
            assert!(SubjectKind::All.covers(kind));
            assert!(kind.covers(kind));
            assert!(!kind.covers(SubjectKind::All));
        }
    }

    #[test]
    fn group_kind_does_not_cover_invite() {
        assert!(!SubjectKind::Group.covers(SubjectKind::Invite));
    }

    #[test]
    fn subject_serializes_with_a_type_tag() {
        let subject = Subject::User(UserAttrs {
            id: UserId::new(),
            role: Role::Admin,
        });
        let json = serde_json::to_value(&subject).expect("serialize");
        assert_eq!(json["type"], "user");
        assert_eq!(json["role"], "ADMIN");
    }
}
