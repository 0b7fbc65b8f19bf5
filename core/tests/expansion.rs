use backfill_core::{allocate, expand_assignments, RoleShare, TeamMember, WorkItem};
use std::collections::HashMap;

fn member(account: &str, role: &str) -> TeamMember {
    TeamMember {
        account_id: account.into(),
        role_id: role.into(),
    }
}

fn item(id: i64, complexity: f64) -> WorkItem {
    WorkItem { id, complexity }
}

fn dev_role() -> RoleShare {
    RoleShare {
        role_id: "dev".into(),
        role_name: "Developer".into(),
        billing_rate: 100.0,
        member_count: 2,
    }
}

#[test]
fn member_quotas_survive_the_item_split() {
    // 10 h/member split 2:1 across two items snaps to 6.5 + 3.5.
    let outcome = allocate(10_000.0, 8_000.0, &[dev_role()]);
    let members = [member("alice", "dev"), member("bob", "dev")];
    let items = [item(1, 2.0), item(2, 1.0)];

    let assignments = expand_assignments(&outcome, &members, &items);

    assert_eq!(assignments.len(), 4, "two members x two items");
    let mut per_member: HashMap<String, f64> = HashMap::new();
    for a in &assignments {
        assert!(a.total_hours > 0.0);
        let doubled = a.total_hours * 2.0;
        assert!(
            (doubled - doubled.round()).abs() < 1e-9,
            "{} h off the half-hour grid",
            a.total_hours
        );
        *per_member.entry(a.account_id.clone()).or_insert(0.0) += a.total_hours;
    }
    assert!((per_member["alice"] - 10.0).abs() < 1e-9);
    assert!((per_member["bob"] - 10.0).abs() < 1e-9);
}

#[test]
fn heavier_items_attract_more_hours() {
    let outcome = allocate(10_000.0, 8_000.0, &[dev_role()]);
    let members = [member("alice", "dev")];
    let items = [item(1, 3.0), item(2, 1.0)];

    let assignments = expand_assignments(&outcome, &members, &items);

    let hours_for = |id: i64| {
        assignments
            .iter()
            .find(|a| a.work_item_id == id)
            .map(|a| a.total_hours)
            .unwrap_or(0.0)
    };
    assert!(
        hours_for(1) > hours_for(2),
        "item 1 (weight 3) got {} h, item 2 (weight 1) got {} h",
        hours_for(1),
        hours_for(2)
    );
}

#[test]
fn weightless_items_receive_nothing() {
    let outcome = allocate(10_000.0, 8_000.0, &[dev_role()]);
    let members = [member("alice", "dev")];
    let items = [item(1, 0.0), item(2, 1.0)];

    let assignments = expand_assignments(&outcome, &members, &items);

    assert!(assignments.iter().all(|a| a.work_item_id == 2));
    let total: f64 = assignments.iter().map(|a| a.total_hours).sum();
    assert!((total - 10.0).abs() < 1e-9);
}

#[test]
fn many_small_items_cannot_overrun_the_quota() {
    // 1 h/member across four equal items: each quarter-hour share
    // snaps up to 0.5 h, which unbounded would book 2 h. The split
    // must stop at the quota instead.
    let outcome = allocate(8_200.0, 8_000.0, &[dev_role()]);
    assert_eq!(outcome.roles[0].hours_per_member, 1.0);

    let members = [member("alice", "dev")];
    let items = [item(1, 1.0), item(2, 1.0), item(3, 1.0), item(4, 1.0)];

    let assignments = expand_assignments(&outcome, &members, &items);

    let total: f64 = assignments.iter().map(|a| a.total_hours).sum();
    assert!((total - 1.0).abs() < 1e-9, "booked {total} h against a 1 h quota");
    assert!(assignments.iter().all(|a| a.total_hours > 0.0));
}

#[test]
fn no_items_means_no_assignments() {
    let outcome = allocate(10_000.0, 8_000.0, &[dev_role()]);
    let members = [member("alice", "dev")];

    assert!(expand_assignments(&outcome, &members, &[]).is_empty());
}

#[test]
fn members_of_unallocated_roles_are_skipped() {
    let roles = [
        dev_role(),
        RoleShare {
            role_id: "intern".into(),
            role_name: "Intern".into(),
            billing_rate: 0.0,
            member_count: 1,
        },
    ];
    let outcome = allocate(10_000.0, 8_000.0, &roles);
    let members = [member("alice", "dev"), member("carol", "intern")];
    let items = [item(1, 1.0)];

    let assignments = expand_assignments(&outcome, &members, &items);

    assert!(
        assignments.iter().all(|a| a.account_id == "alice"),
        "unpaid intern must not receive assignments"
    );
}
