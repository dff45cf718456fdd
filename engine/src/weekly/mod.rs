//! Weekly revenue and payroll settlement.
//!
//! Closes an agency's game week: revenue lands on the budget (scaled by the
//! agency's revenue modifier and reduced by the tax accumulated from
//! percentage-based penalties), salaries move from the budget to member
//! wallets, and the weekly tax resets. One REVENUE and one PAYROLL event
//! audit the two movements.
//!
//! The unemployment pool has no budget semantics and settles to an
//! unchanged clone.

use serde::{Deserialize, Serialize};

use crate::core::cycle::{CycleContext, Timestamp};
use crate::models::agency::Agency;
use crate::models::event::EventKind;

/// Terms of a weekly settlement, set by the instructor per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTerms {
    /// Base revenue before modifier and tax (PiXi)
    pub base_revenue: i64,
    /// Salary paid to each member (PiXi)
    pub salary_per_member: i64,
}

/// Settle one agency's week, returning the updated clone.
///
/// - revenue = `floor(base * (1 + modifier/100) * (1 - tax/100))`, floored
///   at 0 (a tax above 100% zeroes the week, it does not invoice the agency)
/// - payroll = `salary_per_member * members.len()`, debited unclamped (an
///   agency can pay itself into debt), each member's wallet credited; a
///   zero payroll (memberless agency or zero salary) appends no PAYROLL
///   event
/// - `weekly_tax` resets to 0
pub fn settle_week(
    agency: &Agency,
    cycle: &CycleContext,
    terms: &WeeklyTerms,
    now: Timestamp,
) -> Agency {
    let mut updated = agency.clone();
    if updated.is_unemployment_pool() {
        return updated;
    }

    let modifier = 1.0 + updated.weekly_revenue_modifier / 100.0;
    let tax = 1.0 - updated.weekly_tax / 100.0;
    let revenue = (((terms.base_revenue as f64) * modifier * tax).floor() as i64).max(0);

    updated.apply_budget_delta(revenue);
    updated.append_event(
        now,
        EventKind::Revenue,
        "Revenus",
        &format!(
            "Week {} revenue (modifier {:+.0}%, tax {:.0}%)",
            cycle.week, updated.weekly_revenue_modifier, updated.weekly_tax
        ),
        0,
        revenue,
    );

    let payroll = terms.salary_per_member * updated.members.len() as i64;
    if payroll > 0 {
        updated.apply_budget_delta(-payroll);
        for member in &mut updated.members {
            member.adjust_wallet(terms.salary_per_member);
        }
        updated.append_event(
            now,
            EventKind::Payroll,
            "Salaires",
            &format!(
                "Week {} payroll for {} member(s)",
                cycle.week,
                updated.members.len()
            ),
            0,
            -payroll,
        );
    }

    updated.weekly_tax = 0.0;
    updated
}
