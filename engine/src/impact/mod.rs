//! Financial Impact Engine.
//!
//! Applies instructor-authored VE/budget deltas to one or many agencies.
//! The caller supplies a snapshot of all agencies plus a per-agency
//! performance multiplier (a collaborator scoring function); the engine
//! returns updated clones of the matched agencies only, each with one
//! audit event appended.
//!
//! # The multiplier asymmetry
//!
//! The performance multiplier applies ONLY to positive VE deltas. Penalties
//! (negative VE) and budget deltas of either sign are never scaled. This is
//! intentional game design carried over from the original rules and must be
//! preserved exactly.
//!
//! # Critical Invariants
//!
//! - `ve_current` never drops below 0; the appended event records the
//!   applied (post-floor) delta, not the requested one
//! - The unemployment pool is never matched
//! - A missing agency id is a silent no-op (other matched agencies still
//!   apply)

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;
use crate::models::agency::{Agency, ClassId};
use crate::models::event::EventKind;

/// Which agencies an impact targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelector {
    /// Every agency (pool excluded)
    All,
    /// Every agency of one classroom section
    Class(ClassId),
    /// A single agency by id
    Agency(String),
}

impl TargetSelector {
    fn matches(&self, agency: &Agency) -> bool {
        if agency.is_unemployment_pool() {
            return false;
        }
        match self {
            TargetSelector::All => true,
            TargetSelector::Class(class_id) => agency.class_id == *class_id,
            TargetSelector::Agency(id) => agency.id == *id,
        }
    }
}

/// Category of an instructor-authored impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactCategory {
    Crisis,
    Reward,
    Ceremony,
}

impl ImpactCategory {
    /// Event kind the audit entry is filed under.
    ///
    /// Only crises land as CRISIS; rewards and ceremonies are plain
    /// reputation movements.
    fn event_kind(&self) -> EventKind {
        match self {
            ImpactCategory::Crisis => EventKind::Crisis,
            ImpactCategory::Reward | ImpactCategory::Ceremony => EventKind::VeDelta,
        }
    }
}

/// An instructor-authored impact to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRequest {
    pub selector: TargetSelector,

    /// Requested VE delta. Positive values are scaled by the performance
    /// multiplier; zero and negative values apply unmodified.
    pub delta_ve: i64,

    /// Budget delta: fixed PiXi amount, or a percentage of the current
    /// budget when `is_percentage` is set
    pub delta_budget: f64,

    /// Interpret `delta_budget` as a percentage of `budget_real`
    pub is_percentage: bool,

    pub category: ImpactCategory,

    /// Display label / reason shown on the event feed
    pub label: String,
}

/// Apply a financial impact to every agency matched by the selector.
///
/// Returns updated clones of the matched agencies, in input order. Agencies
/// not matched (including the unemployment pool, and a single-agency
/// selector naming an unknown id) are absent from the result; the caller
/// persists exactly what is returned.
///
/// Per matched agency:
/// - budget delta = `floor(budget_real * delta_budget / 100)` when
///   percentage, else `round(delta_budget)`
/// - VE delta = `round(delta_ve * multiplier)` when `delta_ve > 0`, else
///   `delta_ve` unmodified
/// - a percentage-based budget penalty additionally accumulates its
///   magnitude onto `weekly_tax`
/// - one event is appended carrying the applied deltas; its description
///   notes the adjustment percentage when the multiplier scaled the gain
///
/// # Example
/// ```
/// use agency_sim_core_rs::{
///     apply_financial_impact, Agency, ClassId, ImpactCategory, ImpactRequest, TargetSelector,
/// };
///
/// let agency = Agency::new("ag_01", "Pixel Forge", ClassId::A, 12, 500);
/// let request = ImpactRequest {
///     selector: TargetSelector::Agency("ag_01".to_string()),
///     delta_ve: 10,
///     delta_budget: 1500.0,
///     is_percentage: false,
///     category: ImpactCategory::Reward,
///     label: "Client satisfait".to_string(),
/// };
///
/// let updated = apply_financial_impact(&[agency], &request, 1_700_000_000, |_| 1.2);
/// assert_eq!(updated[0].ve_current, 24); // 12 + round(10 * 1.2)
/// assert_eq!(updated[0].budget_real, 2_000);
/// assert_eq!(updated[0].event_log.len(), 1);
/// assert_eq!(updated[0].event_log[0].delta_ve, 12);
/// assert_eq!(updated[0].event_log[0].delta_budget, 1500);
/// ```
pub fn apply_financial_impact<F>(
    agencies: &[Agency],
    request: &ImpactRequest,
    now: Timestamp,
    multiplier: F,
) -> Vec<Agency>
where
    F: Fn(&Agency) -> f64,
{
    agencies
        .iter()
        .filter(|agency| request.selector.matches(agency))
        .map(|agency| apply_to_agency(agency, request, now, multiplier(agency)))
        .collect()
}

/// Apply the impact to one agency, returning the updated clone.
fn apply_to_agency(
    agency: &Agency,
    request: &ImpactRequest,
    now: Timestamp,
    multiplier: f64,
) -> Agency {
    let mut updated = agency.clone();

    let budget_delta = if request.is_percentage {
        ((updated.budget_real as f64) * request.delta_budget / 100.0).floor() as i64
    } else {
        request.delta_budget.round() as i64
    };

    // Multiplier applies to gains only, never to penalties or budget.
    let scaled = request.delta_ve > 0;
    let requested_ve = if scaled {
        ((request.delta_ve as f64) * multiplier).round() as i64
    } else {
        request.delta_ve
    };

    let applied_ve = updated.apply_ve_delta(requested_ve);
    updated.apply_budget_delta(budget_delta);

    // Percentage-based penalties feed the weekly tax settled at week end.
    if request.is_percentage && request.delta_budget < 0.0 {
        updated.weekly_tax += request.delta_budget.abs();
    }

    let description = if scaled {
        let adjustment = (multiplier - 1.0) * 100.0;
        format!(
            "{} (performance adjustment {:+.0}%)",
            request.label, adjustment
        )
    } else {
        request.label.clone()
    };

    updated.append_event(
        now,
        request.category.event_kind(),
        &request.label,
        &description,
        applied_ve,
        budget_delta,
    );

    updated
}
