//! Contract-expiry alert computation.
//!
//! Pure and recomputed per request: no persisted state. Months onboard are
//! whole 30-day blocks since sign-on; the applicable contract length comes
//! from the vessel's owner. Entries more than a month from the contract end
//! are dropped.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default contract length in months when no owner policy matches.
pub const DEFAULT_CONTRACT_MONTHS: i64 = 7;

/// Alert severity relative to the contract length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Within one month of the contract end.
    Warning,
    /// At or past the contract end.
    Critical,
}

/// An ONBOARD assignment considered for alerting.
#[derive(Debug, Clone)]
pub struct OnboardAssignment {
    /// Assignment identifier.
    pub assignment_id: String,
    /// Crew identifier.
    pub crew_id: String,
    /// Crew full name.
    pub full_name: String,
    /// Rank held for this assignment.
    pub rank: String,
    /// Vessel name.
    pub vessel_name: String,
    /// Vessel owner name, empty when unknown.
    pub owner: String,
    /// Sign-on timestamp.
    pub sign_on: NaiveDateTime,
}

/// A crew member approaching or past their contract end.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractAlert {
    /// Assignment identifier.
    pub assignment_id: String,
    /// Crew identifier.
    pub crew_id: String,
    /// Crew full name.
    pub full_name: String,
    /// Rank held for this assignment.
    pub rank: String,
    /// Vessel name.
    pub vessel_name: String,
    /// Sign-on timestamp, ISO-8601.
    pub sign_on: String,
    /// Whole months elapsed since sign-on.
    pub months_onboard: i64,
    /// Applicable contract length in months.
    pub contract_months: i64,
    /// Vessel owner, "Unknown" when absent.
    pub owner: String,
    /// Alert severity.
    pub severity: AlertSeverity,
}

/// Whole months elapsed between sign-on and now, as floor(days / 30).
pub fn months_onboard(sign_on: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - sign_on).num_days().div_euclid(30)
}

/// Contract length in months for a vessel owner.
///
/// Owner-specific policies are matched by substring, mirroring the manning
/// agreements on file; everything else falls back to the default.
pub fn contract_months_for_owner(owner: &str) -> i64 {
    if owner.contains("LUNDQVIST REDERIERNA") {
        9
    } else if owner.contains("INTERGIS CO") {
        8
    } else {
        DEFAULT_CONTRACT_MONTHS
    }
}

fn classify(assignment: &OnboardAssignment, now: NaiveDateTime) -> Option<ContractAlert> {
    let months = months_onboard(assignment.sign_on, now);
    let contract_months = contract_months_for_owner(&assignment.owner);
    if months < contract_months - 1 {
        return None;
    }
    let severity = if months >= contract_months {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    };
    Some(ContractAlert {
        assignment_id: assignment.assignment_id.clone(),
        crew_id: assignment.crew_id.clone(),
        full_name: assignment.full_name.clone(),
        rank: assignment.rank.clone(),
        vessel_name: assignment.vessel_name.clone(),
        sign_on: assignment.sign_on.and_utc().to_rfc3339(),
        months_onboard: months,
        contract_months,
        owner: if assignment.owner.is_empty() {
            "Unknown".to_string()
        } else {
            assignment.owner.clone()
        },
        severity,
    })
}

/// Compute contract alerts for a set of onboard assignments.
///
/// The input is expected to be pre-filtered to ONBOARD assignments with a
/// sign-on date for crew currently flagged ONBOARD; output preserves the
/// input order (callers sort by sign-on ascending).
pub fn compute_alerts(assignments: &[OnboardAssignment], now: NaiveDateTime) -> Vec<ContractAlert> {
    assignments
        .iter()
        .filter_map(|assignment| classify(assignment, now))
        .collect()
}
