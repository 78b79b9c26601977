use crate::rules::{Effect, Rule, rules_for};
use crate::{Action, AuthzError, AuthzResult, Subject, SubjectKind};
use migos_common::Role;
use migos_common::ids::UserId;

/// The acting user for one authorization evaluation: their id plus their
/// role in the group the request touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Compiled decision function for one actor.
///
/// Stateless and re-entrant: evaluation reads the rule list front to back
/// and takes the effect of the last matching rule, defaulting to deny.
///
/// ```
/// use migos_authz::{Ability, Action, Actor, SubjectKind};
/// use migos_common::{Role, ids::UserId};
///
/// let admin = Ability::for_actor(&Actor::new(UserId::new(), Role::Admin));
/// assert!(admin.can_kind(Action::Delete, SubjectKind::Invite));
///
/// let member = Ability::for_actor(&Actor::new(UserId::new(), Role::Member));
/// assert!(!member.can_kind(Action::Create, SubjectKind::Invite));
/// ```
#[derive(Debug, Clone)]
pub struct Ability {
    actor: Actor,
    rules: Vec<Rule>,
}

impl Ability {
    /// Compile the ability for an actor whose role is already typed.
    pub fn for_actor(actor: &Actor) -> Self {
        Self {
            actor: *actor,
            rules: rules_for(actor),
        }
    }

    /// Compile the ability from a role string as stored in membership data.
    ///
    /// # Errors
    /// - [`AuthzError::UnrecognizedRole`] if the stored role has no rule
    ///   set. This is a data/configuration defect, not a request error.
    pub fn for_role(actor_id: UserId, role: &str) -> AuthzResult<Self> {
        let role = role
            .parse::<Role>()
            .map_err(|_| AuthzError::UnrecognizedRole(role.to_string()))?;
        Ok(Self::for_actor(&Actor::new(actor_id, role)))
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Whether the actor may perform `action` on the concrete subject.
    pub fn can(&self, action: Action, subject: &Subject) -> bool {
        self.decide(action, subject.kind(), Some(subject))
    }

    pub fn cannot(&self, action: Action, subject: &Subject) -> bool {
        !self.can(action, subject)
    }

    /// Kind-level check with no attribute snapshot, used where the caller
    /// has no subject instance (e.g. gating invite listing). Answers
    /// whether the action is allowed for at least some subject of the kind.
    pub fn can_kind(&self, action: Action, kind: SubjectKind) -> bool {
        self.decide(action, kind, None)
    }

    pub fn cannot_kind(&self, action: Action, kind: SubjectKind) -> bool {
        !self.can_kind(action, kind)
    }

    fn decide(&self, action: Action, kind: SubjectKind, subject: Option<&Subject>) -> bool {
        // Last matching rule wins; no matching rule denies.
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(action, kind, subject))
            .map(|rule| rule.effect == Effect::Allow)
            .unwrap_or(false)
    }
}
