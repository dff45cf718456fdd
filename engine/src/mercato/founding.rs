//! Founding a new agency (FOUND_AGENCY path).
//!
//! A student in the unemployment pool may found a new agency. The founder
//! pays a fixed creation cost from their wallet and score (each floored at
//! 0) unless the administrative "subsidized" variant waives it. Both paths
//! stamp the new agency with a founding audit event naming the financing
//! mode.

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;
use crate::models::agency::Agency;
use crate::models::event::EventKind;
use crate::models::student::{HistoryAction, StudentHistoryEntry};

use super::{MercatoConfig, MercatoError};

/// How the creation cost is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Financing {
    /// Founder pays the creation cost from wallet and score
    FounderFunded,
    /// Administrative waiver: no cost charged to the founder
    Subsidized,
}

/// Updated snapshots produced by a founding.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundingOutcome {
    /// The newly created agency, founder as sole member
    pub agency: Agency,
    /// The unemployment pool without the founder
    pub pool: Agency,
}

/// Found a new agency from the unemployment pool.
///
/// Seed state: VE = `config.founding_ve`, status `"critique"`, budget =
/// `config.starting_budget`, one founding INFO event, founder as sole
/// member with a JOINED history entry (no LEFT entry: the source is the
/// pool). The new agency takes the founder's class.
///
/// Aborts with zero mutation if `pool` is not the unemployment pool or the
/// founder is not one of its members.
pub fn found_agency(
    pool: &Agency,
    founder_id: &str,
    agency_id: &str,
    agency_name: &str,
    financing: Financing,
    now: Timestamp,
    config: &MercatoConfig,
) -> Result<FoundingOutcome, MercatoError> {
    if !pool.is_unemployment_pool() || pool.member(founder_id).is_none() {
        return Err(MercatoError::FounderNotInPool {
            student_id: founder_id.to_string(),
        });
    }

    let mut pool = pool.clone();
    let mut founder = pool
        .take_member(founder_id)
        .map_err(|_| MercatoError::FounderNotInPool {
            student_id: founder_id.to_string(),
        })?;

    if financing == Financing::FounderFunded {
        // Both deductions floor at 0: founding never pushes the founder
        // into debt or a negative score.
        founder.wallet = (founder.wallet - config.creation_cost_wallet).max(0);
        founder.individual_score =
            (founder.individual_score - config.creation_cost_score).max(0);
    }

    let mut agency = Agency::new(
        agency_id,
        agency_name,
        founder.class_id,
        config.founding_ve,
        config.starting_budget,
    );
    agency.status = "critique".to_string();

    founder.push_history(StudentHistoryEntry {
        date: now,
        agency_id: agency.id.clone(),
        agency_name: agency.name.clone(),
        action: HistoryAction::Joined,
        context_ve: agency.ve_current,
        context_budget: agency.budget_real,
        reason: "Founding".to_string(),
    });

    let founder_name = founder.name.clone();
    agency.push_member(founder);

    let financing_label = match financing {
        Financing::FounderFunded => "founder-funded",
        Financing::Subsidized => "subsidized",
    };
    agency.append_event(
        now,
        EventKind::Info,
        "Création",
        &format!("Agency founded by {} ({})", founder_name, financing_label),
        0,
        0,
    );

    Ok(FoundingOutcome { agency, pool })
}
