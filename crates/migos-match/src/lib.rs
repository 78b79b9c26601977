//! Gift match generation for migos groups.
//!
//! # Purpose
//! Assigns every member of a group exactly one other member to gift: a
//! bijection over the member set with no fixed points. Cycles of any length
//! are fine; nobody draws themselves and nobody is drawn twice.
//!
//! # How it fits
//! The service layer authorizes the "sort" action first, collects the
//! group's member ids, calls [`generate_matches`], and persists each pair as
//! the member's `match_id`. Persistence and per-group serialization of
//! concurrent sorts are the caller's job; this crate is pure computation.
//!
//! # Key invariants
//! - On success the output has one entry per input id, `giver_id !=
//!   receiver_id` everywhere, and the receivers are a permutation of the
//!   input set.
//! - No reproducibility guarantee: two runs over the same members may
//!   return different valid assignments.
//!
//! # Important configuration
//! - [`MatchConfig::max_attempts`] bounds the reshuffle retries (default
//!   [`DEFAULT_MAX_ATTEMPTS`]).
//!
//! # Examples
//! ```rust
//! use migos_common::ids::UserId;
//! use migos_match::generate_matches;
//!
//! let members: Vec<UserId> = (0..6).map(|_| UserId::new()).collect();
//! let matches = generate_matches(&members).expect("small groups assign quickly");
//! assert_eq!(matches.len(), 6);
//! assert!(matches.iter().all(|m| m.giver_id != m.receiver_id));
//! ```
//!
//! # Common pitfalls
//! - Calling the generator before validating member counts; use
//!   [`validate_member_count`] for the service-level bounds.
//! - Running two sorts for the same group concurrently and persisting both;
//!   the later write set silently clobbers the earlier one.
//!
//! # Future work
//! - Exclusion constraints (e.g. partners never draw each other) would slot
//!   into the candidate scan in `try_pass`.
use migos_common::ids::UserId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Default bound on reshuffle attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("unable to generate matches after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("group must have at least 2 members, got {count}")]
    TooFewMembers { count: usize },
    #[error("number of members must be an even number, got {count}")]
    OddMemberCount { count: usize },
}

pub type MatchResult<T> = Result<T, MatchError>;

/// One giver/receiver pair in a generated assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub giver_id: UserId,
    pub receiver_id: UserId,
}

/// Tunables for the randomized search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// How many fresh-shuffle passes to try before failing. A pass dead-ends
    /// when the last giver's only remaining candidate is itself, which is
    /// rare for realistic group sizes.
    pub max_attempts: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service-level bounds on group size before generating matches.
///
/// The generator itself has no parity requirement; the product rejects odd
/// and sub-2 groups up front so every member both gives and receives within
/// an even exchange.
///
/// # Errors
/// - [`MatchError::TooFewMembers`] for fewer than 2 members.
/// - [`MatchError::OddMemberCount`] for an odd member count.
pub fn validate_member_count(count: usize) -> MatchResult<()> {
    if count < 2 {
        return Err(MatchError::TooFewMembers { count });
    }
    if count % 2 != 0 {
        return Err(MatchError::OddMemberCount { count });
    }
    Ok(())
}

/// Generate a match assignment with the default config and thread RNG.
///
/// # Errors
/// - [`MatchError::Exhausted`] if every pass dead-ended; see
///   [`generate_matches_with`].
pub fn generate_matches(member_ids: &[UserId]) -> MatchResult<Vec<Match>> {
    generate_matches_with(&MatchConfig::default(), &mut rand::rng(), member_ids)
}

/// Generate a match assignment with explicit config and RNG.
///
/// Each attempt shuffles the members uniformly, then walks the shuffled
/// list giving every member the first candidate after them (wrapping past
/// the end) that is neither themselves nor already claimed as a receiver.
/// A giver with no candidate aborts the pass; the next attempt reshuffles
/// from scratch rather than backtracking.
///
/// # Errors
/// - [`MatchError::Exhausted`] after `config.max_attempts` dead-ended
///   passes. With at least 2 members a valid assignment always exists and
///   the wrapping scan finds one, so exhaustion signals a degenerate input
///   (a single member) or a zero attempt budget.
pub fn generate_matches_with<R: Rng>(
    config: &MatchConfig,
    rng: &mut R,
    member_ids: &[UserId],
) -> MatchResult<Vec<Match>> {
    for attempt in 1..=config.max_attempts {
        if let Some(matches) = try_pass(rng, member_ids) {
            trace!(attempt, members = member_ids.len(), "match pass succeeded");
            return Ok(matches);
        }
        debug!(attempt, "match pass dead-ended, reshuffling");
    }
    Err(MatchError::Exhausted {
        attempts: config.max_attempts,
    })
}

/// One shuffle-and-assign pass; `None` on a dead end.
fn try_pass<R: Rng>(rng: &mut R, member_ids: &[UserId]) -> Option<Vec<Match>> {
    let mut shuffled = member_ids.to_vec();
    shuffled.shuffle(rng);

    let len = shuffled.len();
    let mut claimed: HashSet<UserId> = HashSet::with_capacity(len);
    let mut matches = Vec::with_capacity(len);
    for (position, giver) in shuffled.iter().enumerate() {
        // Scan forward from the giver's successor, wrapping past the end.
        // Starting past the giver keeps longer cycles reachable instead of
        // collapsing every assignment into adjacent pair swaps.
        let receiver = (1..len)
            .map(|offset| shuffled[(position + offset) % len])
            .find(|candidate| candidate != giver && !claimed.contains(candidate))?;
        claimed.insert(receiver);
        matches.push(Match {
            giver_id: *giver,
            receiver_id: receiver,
        });
    }
    Some(matches)
}
