//! Weekly settlement tests
//!
//! Revenue is scaled by the agency modifier, reduced by the accumulated
//! tax, and floored at 0; payroll moves budget to member wallets and may
//! push the agency into debt.

use agency_sim_core_rs::{
    settle_week, Agency, ClassId, CycleContext, EventKind, Student, WeeklyTerms,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_agency(members: usize) -> Agency {
    let mut agency = Agency::new("ag_01", "Pixel Forge", ClassId::A, 40, 1_000);
    for i in 0..members {
        agency.push_member(Student::new(
            &format!("stu_{:02}", i),
            &format!("Student {}", i),
            ClassId::A,
            50,
        ));
    }
    agency
}

fn terms() -> WeeklyTerms {
    WeeklyTerms {
        base_revenue: 2_000,
        salary_per_member: 300,
    }
}

// ============================================================================
// Revenue
// ============================================================================

#[test]
fn test_plain_week_revenue_and_payroll() {
    let agency = create_test_agency(2);

    let updated = settle_week(&agency, &CycleContext::new(3), &terms(), 100);

    // 1000 + 2000 revenue - 2 * 300 payroll
    assert_eq!(updated.budget_real, 2_400);
    assert!(updated.members.iter().all(|m| m.wallet == 300));

    let kinds: Vec<EventKind> = updated.event_log.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Revenue, EventKind::Payroll]);
    assert_eq!(updated.event_log[0].delta_budget, 2_000);
    assert_eq!(updated.event_log[1].delta_budget, -600);
}

#[test]
fn test_modifier_and_tax_scale_revenue() {
    let mut agency = create_test_agency(0);
    agency.weekly_revenue_modifier = 50.0;
    agency.weekly_tax = 25.0;

    let updated = settle_week(&agency, &CycleContext::new(1), &terms(), 100);

    // floor(2000 * 1.50 * 0.75) = 2250
    assert_eq!(updated.event_log[0].delta_budget, 2_250);
    assert_eq!(updated.budget_real, 1_000 + 2_250);
}

#[test]
fn test_tax_resets_after_settlement() {
    let mut agency = create_test_agency(0);
    agency.weekly_tax = 12.0;

    let updated = settle_week(&agency, &CycleContext::new(1), &terms(), 100);
    assert_eq!(updated.weekly_tax, 0.0);
}

#[test]
fn test_tax_above_100_percent_zeroes_the_week() {
    let mut agency = create_test_agency(0);
    agency.weekly_tax = 140.0;

    let updated = settle_week(&agency, &CycleContext::new(1), &terms(), 100);
    assert_eq!(updated.event_log[0].delta_budget, 0, "never invoices the agency");
}

// ============================================================================
// Payroll
// ============================================================================

#[test]
fn test_payroll_can_push_into_debt() {
    let mut agency = create_test_agency(5);
    agency.budget_real = 100;

    let settlement = WeeklyTerms {
        base_revenue: 0,
        salary_per_member: 300,
    };
    let updated = settle_week(&agency, &CycleContext::new(1), &settlement, 100);

    assert_eq!(updated.budget_real, 100 - 1_500);
    assert!(updated.members.iter().all(|m| m.wallet == 300));
}

#[test]
fn test_memberless_agency_skips_payroll_event() {
    let agency = create_test_agency(0);
    let updated = settle_week(&agency, &CycleContext::new(1), &terms(), 100);
    assert_eq!(updated.event_log.len(), 1);
    assert_eq!(updated.event_log[0].kind, EventKind::Revenue);
}

// ============================================================================
// Pool
// ============================================================================

#[test]
fn test_pool_settles_to_unchanged_clone() {
    let pool = Agency::unemployment_pool(ClassId::A);
    let updated = settle_week(&pool, &CycleContext::new(1), &terms(), 100);
    assert_eq!(updated, pool);
}
