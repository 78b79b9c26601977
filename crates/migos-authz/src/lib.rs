//! Authorization rules for migos group and invite operations.
//!
//! # Purpose
//! Centralizes the role and attribute based permission model: which actor
//! may read, mutate, or generate matches ("sort") for a group, and who may
//! manage invites.
//!
//! # How it fits
//! The service layer resolves the acting user's membership and the subject's
//! attribute snapshot from storage, compiles an [`Ability`], and consults it
//! before any mutation. A denial is an ordinary boolean, not an error; the
//! caller decides how to surface it.
//!
//! # Key invariants
//! - Rules evaluate in declaration order; the last matching rule wins and
//!   no matching rule means deny.
//! - Plan quotas are the named caps in [`limits`], compared strictly below
//!   the cap against the stored counters.
//! - Attribute snapshots are supplied by the caller and taken at face
//!   value; the engine performs no I/O and computes nothing itself.
//!
//! # Important configuration
//! - None; the rule sets are compiled per role at ability construction.
//!
//! # Examples
//! ```rust
//! use migos_authz::{Ability, Action, Actor, GroupAttrs, Subject};
//! use migos_common::{Plan, Role, ids::{GroupId, UserId}};
//!
//! let admin = UserId::new();
//! let ability = Ability::for_actor(&Actor::new(admin, Role::Admin));
//! let group = Subject::Group(GroupAttrs {
//!     id: GroupId::new(),
//!     owner_id: admin,
//!     owner_plan: Plan::Basic,
//!     role: Role::Admin,
//!     is_member: true,
//!     members_count: 4,
//!     user_groups_count: 1,
//!     times_matches_generated: 0,
//! });
//! assert!(ability.can(Action::Sort, &group));
//! ```
//!
//! # Common pitfalls
//! - Building a subject snapshot with stale or placeholder counters; the
//!   quota rules will happily act on them.
//! - Checking authorization after a mutation instead of before it.
//!
//! # Future work
//! - Invite rules for members (e.g. letting members revoke their own
//!   pending invite) if the product grows that flow.

mod ability;
mod action;
mod errors;
pub mod limits;
mod rules;
mod subject;

pub use ability::{Ability, Actor};
pub use action::Action;
pub use errors::{AuthzError, AuthzResult};
pub use rules::{Clause, Condition, Effect, Rule};
pub use subject::{GroupAttrs, InviteAttrs, Subject, SubjectKind, UserAttrs};
