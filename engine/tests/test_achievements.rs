//! Achievement Scanner & Distributor tests
//!
//! Scan is pure and idempotent; distribution coalesces all awards for one
//! agency into a single clone and one write, and the batch is atomic.

use agency_sim_core_rs::{
    award_badge_manual, builtin_rules, distribute, scan, AchievementCondition, AchievementRule,
    Agency, AgencyStore, AwardError, AwardTarget, Badge, BadgeRewards, ClassId, DistributionError,
    EventKind, InMemoryStore, ManualTarget, PendingAward, Student,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_agency(id: &str, ve: i64, budget: i64) -> Agency {
    Agency::new(id, id, ClassId::A, ve, budget)
}

fn badge(id: &str, rewards: BadgeRewards) -> Badge {
    Badge::new(id, id, "⭐", "", rewards)
}

fn student_award(student_id: &str, b: &Badge) -> PendingAward {
    PendingAward {
        target_id: student_id.to_string(),
        target_type: AwardTarget::Student,
        badge: b.clone(),
        reason: "test".to_string(),
    }
}

// ============================================================================
// Scan
// ============================================================================

#[test]
fn test_scan_worked_example_two_awards() {
    // Agency C: budget 25000, one member at score 100, neither badge held
    let mut agency = create_test_agency("ag_c", 40, 25_000);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 100));

    let pending = scan(&[agency], &builtin_rules());
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|award| award.target_id == "stu_01"));
}

#[test]
fn test_scan_is_idempotent_without_mutation() {
    let mut agency = create_test_agency("ag_c", 120, 25_000);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 100));
    let rules = builtin_rules();

    let first = scan(std::slice::from_ref(&agency), &rules);
    let second = scan(std::slice::from_ref(&agency), &rules);
    assert_eq!(first, second);
}

#[test]
fn test_scan_after_distribution_yields_nothing() {
    let mut agency = create_test_agency("ag_c", 120, 25_000);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 100));
    let rules = builtin_rules();
    let mut store = InMemoryStore::new();

    let pending = scan(std::slice::from_ref(&agency), &rules);
    assert!(!pending.is_empty());

    let committed = distribute(&mut store, std::slice::from_ref(&agency), &pending, 100).unwrap();

    // Second pass over the distributed state finds nothing new
    let second = scan(&committed, &rules);
    assert!(second.is_empty(), "second pass must be empty, got {:?}", second);
}

// ============================================================================
// Distribution
// ============================================================================

#[test]
fn test_distribution_coalesces_awards_into_one_write_per_agency() {
    let mut agency = create_test_agency("ag_c", 40, 25_000);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 100));
    let mut store = InMemoryStore::new();

    // Two awards for the same agency from different rules
    let pending = scan(std::slice::from_ref(&agency), &builtin_rules());
    assert_eq!(pending.len(), 2);

    let committed = distribute(&mut store, &[agency], &pending, 100).unwrap();
    assert_eq!(committed.len(), 1, "one document per agency, not per award");

    // Both badges landed on the single committed document
    let stored = store.read("ag_c").unwrap();
    let member = stored.member("stu_01").unwrap();
    assert_eq!(member.badges.len(), 2);
    // One audit event per award
    assert_eq!(
        stored
            .event_log
            .iter()
            .filter(|e| e.kind == EventKind::Reward)
            .count(),
        2
    );
}

#[test]
fn test_distribution_clamps_score_reward_at_100() {
    let mut agency = create_test_agency("ag_c", 40, 25_000);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 100));
    let mut store = InMemoryStore::new();

    let pending = scan(std::slice::from_ref(&agency), &builtin_rules());
    let committed = distribute(&mut store, &[agency], &pending, 100).unwrap();

    let member = committed[0].member("stu_01").unwrap();
    assert_eq!(member.individual_score, 100, "score never exceeds 100");
    // Wallet rewards are unclamped
    assert!(member.wallet > 0);
}

#[test]
fn test_distribution_applies_agency_rewards_with_ve_floor() {
    let agency = create_test_agency("ag_c", 3, 0);
    let b = badge(
        "sanction",
        BadgeRewards {
            ve: Some(-10),
            budget: Some(100),
            ..BadgeRewards::none()
        },
    );
    let award = PendingAward {
        target_id: "ag_c".to_string(),
        target_type: AwardTarget::Agency,
        badge: b,
        reason: "test".to_string(),
    };
    let mut store = InMemoryStore::new();

    let committed = distribute(&mut store, &[agency], &[award], 100).unwrap();
    assert_eq!(committed[0].ve_current, 0);
    assert_eq!(committed[0].budget_real, 100);
    // Event records the applied VE delta
    assert_eq!(committed[0].event_log[0].delta_ve, -3);
    assert_eq!(committed[0].event_log[0].delta_budget, 100);
}

#[test]
fn test_distribution_unknown_target_commits_nothing() {
    let agency = create_test_agency("ag_c", 40, 0);
    let b = badge("b1", BadgeRewards::none());
    let awards = vec![
        PendingAward {
            target_id: "ag_c".to_string(),
            target_type: AwardTarget::Agency,
            badge: b.clone(),
            reason: "ok".to_string(),
        },
        student_award("ghost", &b),
    ];
    let mut store = InMemoryStore::new();

    let err = distribute(&mut store, &[agency], &awards, 100).unwrap_err();
    assert!(matches!(err, DistributionError::TargetNotFound { .. }));
    assert!(store.is_empty(), "validation failure must precede any write");
}

#[test]
fn test_distribution_store_rejection_is_surfaced_and_atomic() {
    let mut agency = create_test_agency("ag_c", 120, 0);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 50));
    let mut store = InMemoryStore::new();
    store.reject_batches(true);

    let pending = scan(std::slice::from_ref(&agency), &builtin_rules());
    let err = distribute(&mut store, &[agency], &pending, 100).unwrap_err();
    assert!(matches!(err, DistributionError::Store(_)));
    assert!(store.is_empty());
}

#[test]
fn test_distribution_groups_student_awards_by_owning_agency() {
    let mut agency_a = create_test_agency("ag_a", 40, 0);
    agency_a.push_member(Student::new("stu_01", "Ada", ClassId::A, 50));
    let mut agency_b = create_test_agency("ag_b", 40, 0);
    agency_b.push_member(Student::new("stu_02", "Bob", ClassId::A, 50));

    let b = badge("b1", BadgeRewards::none());
    let awards = vec![student_award("stu_01", &b), student_award("stu_02", &b)];
    let mut store = InMemoryStore::new();

    let committed = distribute(&mut store, &[agency_a, agency_b], &awards, 100).unwrap();
    assert_eq!(committed.len(), 2);
    assert_eq!(store.len(), 2);
    assert!(store.read("ag_a").unwrap().member("stu_01").unwrap().has_badge("b1"));
    assert!(store.read("ag_b").unwrap().member("stu_02").unwrap().has_badge("b1"));
}

// ============================================================================
// Manual award path
// ============================================================================

#[test]
fn test_manual_award_duplicate_rejected_before_mutation() {
    let mut agency = create_test_agency("ag_c", 40, 0);
    let b = badge("b1", BadgeRewards::none());
    agency.add_badge(b.clone());

    let err = award_badge_manual(&agency, &ManualTarget::Agency, &b, false, 100).unwrap_err();
    assert!(matches!(err, AwardError::AlreadyHeld { .. }));
    assert_eq!(agency.event_log.len(), 0);
}

#[test]
fn test_manual_award_over_cap_flag() {
    let mut agency = create_test_agency("ag_c", 40, 0);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 98));
    let b = badge(
        "boost",
        BadgeRewards {
            score: Some(10),
            ..BadgeRewards::none()
        },
    );

    // Normal path clamps at 100
    let capped = award_badge_manual(
        &agency,
        &ManualTarget::Student("stu_01".to_string()),
        &b,
        false,
        100,
    )
    .unwrap();
    assert_eq!(capped.member("stu_01").unwrap().individual_score, 100);

    // Escape hatch goes past the soft cap
    let over = award_badge_manual(
        &agency,
        &ManualTarget::Student("stu_01".to_string()),
        &b,
        true,
        100,
    )
    .unwrap();
    assert_eq!(over.member("stu_01").unwrap().individual_score, 108);
}

#[test]
fn test_manual_award_stamps_unlock_date_and_audits() {
    let agency = create_test_agency("ag_c", 40, 0);
    let b = badge(
        "b1",
        BadgeRewards {
            ve: Some(15),
            ..BadgeRewards::none()
        },
    );

    let updated = award_badge_manual(&agency, &ManualTarget::Agency, &b, false, 777).unwrap();
    assert_eq!(updated.badges[0].unlocked_at, Some(777));
    assert_eq!(updated.ve_current, 55);
    assert_eq!(updated.event_log[0].kind, EventKind::Reward);
    assert_eq!(updated.event_log[0].delta_ve, 15);
}

// ============================================================================
// Rules as data
// ============================================================================

#[test]
fn test_custom_rule_catalog() {
    let mut agency = create_test_agency("ag_c", 40, 0);
    agency.push_member(Student::new("stu_01", "Ada", ClassId::A, 75));
    let rules = vec![AchievementRule {
        badge: badge("solid", BadgeRewards::none()),
        condition: AchievementCondition::MemberScoreAtLeast(70),
    }];

    let pending = scan(&[agency], &rules);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].target_id, "stu_01");
    assert_eq!(pending[0].target_type, AwardTarget::Student);
}
