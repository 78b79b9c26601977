//! Declarative permission rules evaluated in declaration order.
//!
//! A role compiles to an ordered rule list. Checking an action against a
//! subject walks the list and takes the effect of the last rule that
//! matches; no match means deny. Ordering matters: the rule sets lean on
//! "allow broadly, then deny, then re-allow under conditions" layering.
use crate::ability::Actor;
use crate::limits::{
    BASIC_GROUP_CREATE_LIMIT, BASIC_SORT_LIMIT, PRO_GROUP_CREATE_LIMIT, PRO_SORT_LIMIT,
};
use crate::{Action, Subject, SubjectKind};
use migos_common::ids::UserId;
use migos_common::{Plan, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// One field-level comparison against a subject's attribute snapshot.
///
/// Clauses are conjunctive within a condition. A clause that reads a field
/// the subject variant does not carry evaluates to false, so a group-scoped
/// clause can never accidentally match a user or invite subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    OwnerIs(UserId),
    OwnerPlanIs(Plan),
    IsMember(bool),
    RoleIs(Role),
    /// Stored sort counter strictly below the given cap.
    TimesSortedBelow(u32),
    /// Owned-groups counter strictly below the given cap.
    GroupsOwnedBelow(u32),
}

impl Clause {
    fn holds(&self, subject: &Subject) -> bool {
        match (self, subject) {
            (Clause::OwnerIs(owner), Subject::Group(group)) => group.owner_id == *owner,
            (Clause::OwnerPlanIs(plan), Subject::Group(group)) => group.owner_plan == *plan,
            (Clause::IsMember(expected), Subject::Group(group)) => group.is_member == *expected,
            (Clause::RoleIs(role), Subject::Group(group)) => group.role == *role,
            (Clause::RoleIs(role), Subject::User(user)) => user.role == *role,
            (Clause::TimesSortedBelow(cap), Subject::Group(group)) => {
                group.times_matches_generated < *cap
            }
            (Clause::GroupsOwnedBelow(cap), Subject::Group(group)) => {
                group.user_groups_count < *cap
            }
            _ => false,
        }
    }
}

/// Conjunction of clauses; an empty condition matches every subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    pub fn always() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn all(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn is_unconditional(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn holds(&self, subject: &Subject) -> bool {
        self.clauses.iter().all(|clause| clause.holds(subject))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub effect: Effect,
    pub actions: Vec<Action>,
    pub subject_kind: SubjectKind,
    pub condition: Condition,
}

impl Rule {
    pub fn allow(actions: Vec<Action>, subject_kind: SubjectKind, condition: Condition) -> Self {
        Self {
            effect: Effect::Allow,
            actions,
            subject_kind,
            condition,
        }
    }

    pub fn deny(actions: Vec<Action>, subject_kind: SubjectKind, condition: Condition) -> Self {
        Self {
            effect: Effect::Deny,
            actions,
            subject_kind,
            condition,
        }
    }

    fn action_applies(&self, action: Action) -> bool {
        self.actions.iter().any(|declared| declared.covers(action))
    }

    /// Whether this rule decides the given query.
    ///
    /// `subject` is `None` for kind-only checks; those ignore conditions and
    /// answer whether the action is possible for *some* subject of the kind.
    pub fn matches(&self, action: Action, kind: SubjectKind, subject: Option<&Subject>) -> bool {
        if !self.subject_kind.covers(kind) || !self.action_applies(action) {
            return false;
        }
        match subject {
            Some(subject) => self.condition.holds(subject),
            None => true,
        }
    }
}

/// Compile the ordered rule list for an actor's role.
///
/// Business policy, reproduced exactly:
/// - `ADMIN` may do anything, except that generating matches ("sort") is
///   re-gated by the owner's plan quota: BASIC groups sort once, PRO groups
///   twice, and only by an admin who is a member of the group.
/// - `MEMBER` may read groups they belong to, update/delete groups they
///   own, and create groups up to their plan's cap. Invites are left to
///   admins entirely.
pub(crate) fn rules_for(actor: &Actor) -> Vec<Rule> {
    match actor.role {
        Role::Admin => vec![
            Rule::allow(
                vec![Action::Manage],
                SubjectKind::All,
                Condition::always(),
            ),
            Rule::deny(
                vec![Action::Sort],
                SubjectKind::Group,
                Condition::always(),
            ),
            Rule::allow(
                vec![Action::Sort],
                SubjectKind::Group,
                Condition::all(vec![
                    Clause::OwnerPlanIs(Plan::Basic),
                    Clause::TimesSortedBelow(BASIC_SORT_LIMIT),
                    Clause::IsMember(true),
                    Clause::RoleIs(Role::Admin),
                ]),
            ),
            Rule::allow(
                vec![Action::Sort],
                SubjectKind::Group,
                Condition::all(vec![
                    Clause::OwnerPlanIs(Plan::Pro),
                    Clause::TimesSortedBelow(PRO_SORT_LIMIT),
                    Clause::IsMember(true),
                    Clause::RoleIs(Role::Admin),
                ]),
            ),
        ],
        Role::Member => vec![
            Rule::allow(
                vec![Action::Get],
                SubjectKind::Group,
                Condition::all(vec![Clause::IsMember(true)]),
            ),
            Rule::allow(
                vec![Action::Update, Action::Delete],
                SubjectKind::Group,
                Condition::all(vec![Clause::OwnerIs(actor.id)]),
            ),
            Rule::deny(
                vec![Action::Create],
                SubjectKind::Group,
                Condition::always(),
            ),
            Rule::allow(
                vec![Action::Create],
                SubjectKind::Group,
                Condition::all(vec![
                    Clause::OwnerPlanIs(Plan::Pro),
                    Clause::GroupsOwnedBelow(PRO_GROUP_CREATE_LIMIT),
                ]),
            ),
            Rule::allow(
                vec![Action::Create],
                SubjectKind::Group,
                Condition::all(vec![
                    Clause::OwnerPlanIs(Plan::Basic),
                    Clause::GroupsOwnedBelow(BASIC_GROUP_CREATE_LIMIT),
                ]),
            ),
        ],
    }
}
