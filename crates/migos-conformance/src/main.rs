// End-to-end conformance run: authorize a sort, generate matches, persist
// them into an in-memory group, and drive the plan quota to exhaustion.
use anyhow::{Context, Result, ensure};
use migos_authz::{Ability, Action, Actor, GroupAttrs, Subject};
use migos_common::ids::{GroupId, UserId};
use migos_common::{Member, Plan, Role};
use migos_match::{generate_matches, validate_member_count};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

// In-memory stand-in for the group service's storage.
struct GroupState {
    id: GroupId,
    owner_id: UserId,
    owner_plan: Plan,
    members: Vec<Member>,
    times_matches_generated: u32,
}

impl GroupState {
    fn with_members(owner_plan: Plan, member_count: usize) -> Self {
        let id = GroupId::new();
        let owner_id = UserId::new();
        let mut members = vec![Member::new(owner_id, id, Role::Admin)];
        for _ in 1..member_count {
            members.push(Member::new(UserId::new(), id, Role::Member));
        }
        Self {
            id,
            owner_id,
            owner_plan,
            members,
            times_matches_generated: 0,
        }
    }

    // Attribute snapshot for an acting member, computed from state rather
    // than filled with placeholders.
    fn subject_for(&self, actor: &Actor) -> Subject {
        Subject::Group(GroupAttrs {
            id: self.id,
            owner_id: self.owner_id,
            owner_plan: self.owner_plan,
            role: actor.role,
            is_member: self.members.iter().any(|m| m.user_id == actor.id),
            members_count: self.members.len() as u32,
            user_groups_count: u32::from(self.owner_id == actor.id),
            times_matches_generated: self.times_matches_generated,
        })
    }

    fn sort(&mut self, actor: &Actor) -> Result<()> {
        let ability = Ability::for_actor(actor);
        ensure!(
            ability.can(Action::Sort, &self.subject_for(actor)),
            "sort denied for actor {}",
            actor.id
        );

        validate_member_count(self.members.len()).context("member count")?;
        let member_ids: Vec<UserId> = self.members.iter().map(|m| m.user_id).collect();
        let matches = generate_matches(&member_ids).context("generate matches")?;

        for m in &matches {
            let member = self
                .members
                .iter_mut()
                .find(|member| member.user_id == m.giver_id)
                .context("giver is a member")?;
            member.match_id = Some(m.receiver_id);
        }
        self.times_matches_generated += 1;
        Ok(())
    }

    fn assert_assignment_valid(&self) -> Result<()> {
        let member_ids: HashSet<UserId> = self.members.iter().map(|m| m.user_id).collect();
        let mut receivers = HashSet::new();
        for member in &self.members {
            let receiver = member.match_id.context("member left unmatched")?;
            ensure!(receiver != member.user_id, "member drew themselves");
            ensure!(member_ids.contains(&receiver), "receiver outside group");
            ensure!(receivers.insert(receiver), "receiver drawn twice");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("== migos Conformance Runner ==");

    let mut group = GroupState::with_members(Plan::Pro, 6);
    let admin = Actor::new(group.owner_id, Role::Admin);

    println!("Running pro-plan sort lifecycle...");
    group.sort(&admin).context("first sort")?;
    group.assert_assignment_valid()?;
    ensure!(group.times_matches_generated == 1, "counter after first sort");

    group.sort(&admin).context("second sort")?;
    group.assert_assignment_valid()?;
    ensure!(group.times_matches_generated == 2, "counter after second sort");

    let third = group.sort(&admin);
    ensure!(third.is_err(), "third sort must be denied by the pro quota");

    println!("Running basic-plan sort lifecycle...");
    let mut basic = GroupState::with_members(Plan::Basic, 4);
    let basic_admin = Actor::new(basic.owner_id, Role::Admin);
    basic.sort(&basic_admin).context("basic sort")?;
    basic.assert_assignment_valid()?;
    ensure!(
        basic.sort(&basic_admin).is_err(),
        "basic groups sort only once"
    );

    println!("Running member denial checks...");
    let plain_member = Actor::new(
        group
            .members
            .iter()
            .find(|m| m.role == Role::Member)
            .context("group has plain members")?
            .user_id,
        Role::Member,
    );
    ensure!(
        group.sort(&plain_member).is_err(),
        "plain members must not sort"
    );

    println!("Conformance checks passed.");
    Ok(())
}
