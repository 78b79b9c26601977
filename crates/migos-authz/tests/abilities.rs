// Business-policy coverage for the compiled role abilities.
use migos_authz::{Ability, Action, Actor, AuthzError, GroupAttrs, Subject, SubjectKind, UserAttrs};
use migos_common::ids::{GroupId, UserId};
use migos_common::{Plan, Role};

fn admin_ability(actor_id: UserId) -> Ability {
    Ability::for_actor(&Actor::new(actor_id, Role::Admin))
}

fn member_ability(actor_id: UserId) -> Ability {
    Ability::for_actor(&Actor::new(actor_id, Role::Member))
}

struct GroupFacts {
    owner_id: UserId,
    owner_plan: Plan,
    role: Role,
    is_member: bool,
    user_groups_count: u32,
    times_matches_generated: u32,
}

impl GroupFacts {
    fn subject(&self) -> Subject {
        Subject::Group(GroupAttrs {
            id: GroupId::new(),
            owner_id: self.owner_id,
            owner_plan: self.owner_plan,
            role: self.role,
            is_member: self.is_member,
            members_count: 6,
            user_groups_count: self.user_groups_count,
            times_matches_generated: self.times_matches_generated,
        })
    }
}

fn sortable_group(owner_plan: Plan, times_matches_generated: u32) -> Subject {
    GroupFacts {
        owner_id: UserId::new(),
        owner_plan,
        role: Role::Admin,
        is_member: true,
        user_groups_count: 0,
        times_matches_generated,
    }
    .subject()
}

#[test]
fn admin_manages_everything_by_default() {
    let actor = UserId::new();
    let ability = admin_ability(actor);

    for kind in [SubjectKind::User, SubjectKind::Group, SubjectKind::Invite] {
        for action in [
            Action::Manage,
            Action::Get,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Revoke,
            Action::TransferOwnership,
        ] {
            assert!(ability.can_kind(action, kind), "{action} on {kind:?}");
        }
    }

    // Concrete subjects with arbitrary attributes are equally covered.
    let user = Subject::User(UserAttrs {
        id: UserId::new(),
        role: Role::Member,
    });
    assert!(ability.can(Action::Delete, &user));
}

#[test]
fn admin_sort_basic_group_is_one_shot() {
    let ability = admin_ability(UserId::new());

    assert!(ability.can(Action::Sort, &sortable_group(Plan::Basic, 0)));
    assert!(ability.cannot(Action::Sort, &sortable_group(Plan::Basic, 1)));
}

#[test]
fn admin_sort_pro_group_allows_two_runs() {
    let ability = admin_ability(UserId::new());

    assert!(ability.can(Action::Sort, &sortable_group(Plan::Pro, 0)));
    assert!(ability.can(Action::Sort, &sortable_group(Plan::Pro, 1)));
    assert!(ability.cannot(Action::Sort, &sortable_group(Plan::Pro, 2)));
}

#[test]
fn admin_sort_requires_membership_in_the_group() {
    let ability = admin_ability(UserId::new());
    let outsider_view = GroupFacts {
        owner_id: UserId::new(),
        owner_plan: Plan::Pro,
        role: Role::Admin,
        is_member: false,
        user_groups_count: 0,
        times_matches_generated: 0,
    }
    .subject();

    assert!(ability.cannot(Action::Sort, &outsider_view));
}

#[test]
fn member_reads_only_groups_they_belong_to() {
    let ability = member_ability(UserId::new());

    let inside = GroupFacts {
        owner_id: UserId::new(),
        owner_plan: Plan::Basic,
        role: Role::Member,
        is_member: true,
        user_groups_count: 0,
        times_matches_generated: 0,
    };
    assert!(ability.can(Action::Get, &inside.subject()));

    let outside = GroupFacts {
        is_member: false,
        ..inside
    };
    assert!(ability.cannot(Action::Get, &outside.subject()));
}

#[test]
fn member_updates_and_deletes_only_owned_groups() {
    let u1 = UserId::new();
    let u2 = UserId::new();
    let ability = member_ability(u1);

    let owned = GroupFacts {
        owner_id: u1,
        owner_plan: Plan::Basic,
        role: Role::Member,
        is_member: true,
        user_groups_count: 0,
        times_matches_generated: 0,
    };
    assert!(ability.can(Action::Update, &owned.subject()));
    assert!(ability.can(Action::Delete, &owned.subject()));

    let someone_elses = GroupFacts {
        owner_id: u2,
        ..owned
    };
    assert!(ability.cannot(Action::Update, &someone_elses.subject()));
    assert!(ability.cannot(Action::Delete, &someone_elses.subject()));
}

#[test]
fn member_group_creation_respects_basic_cap() {
    let actor = UserId::new();
    let ability = member_ability(actor);

    let below_cap = GroupFacts {
        owner_id: actor,
        owner_plan: Plan::Basic,
        role: Role::Member,
        is_member: false,
        user_groups_count: 1,
        times_matches_generated: 0,
    };
    assert!(ability.can(Action::Create, &below_cap.subject()));

    let at_cap = GroupFacts {
        user_groups_count: 2,
        ..below_cap
    };
    assert!(ability.cannot(Action::Create, &at_cap.subject()));
}

#[test]
fn member_group_creation_respects_pro_cap() {
    let actor = UserId::new();
    let ability = member_ability(actor);

    let below_cap = GroupFacts {
        owner_id: actor,
        owner_plan: Plan::Pro,
        role: Role::Member,
        is_member: false,
        user_groups_count: 4,
        times_matches_generated: 0,
    };
    assert!(ability.can(Action::Create, &below_cap.subject()));

    let at_cap = GroupFacts {
        user_groups_count: 5,
        ..below_cap
    };
    assert!(ability.cannot(Action::Create, &at_cap.subject()));
}

#[test]
fn member_never_sorts() {
    let ability = member_ability(UserId::new());
    assert!(ability.cannot(Action::Sort, &sortable_group(Plan::Pro, 0)));
}

#[test]
fn invites_are_admin_only() {
    let admin = admin_ability(UserId::new());
    let member = member_ability(UserId::new());

    for action in [Action::Create, Action::Get, Action::Revoke] {
        assert!(admin.can_kind(action, SubjectKind::Invite));
        assert!(member.cannot_kind(action, SubjectKind::Invite));
    }
}

#[test]
fn unknown_stored_role_is_a_configuration_error() {
    let err = Ability::for_role(UserId::new(), "unknown-role").expect_err("no rule set");
    assert!(matches!(err, AuthzError::UnrecognizedRole(role) if role == "unknown-role"));
}
