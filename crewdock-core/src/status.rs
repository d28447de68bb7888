//! Crew lifecycle statuses, caller roles, and the status-transition gate.
//!
//! A crew record moves through a fixed lifecycle; each current status has a
//! table entry naming which roles may move it and which statuses it may move
//! to. The gate also yields a [`TransitionEffects`] plan describing the
//! status-specific field updates the caller must apply.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CrewDockError;

/// Lifecycle status of a crew record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrewStatus {
    /// Submitted an employment application.
    Applicant,
    /// Application approved, documentation pending.
    Approved,
    /// Available for placement.
    Standby,
    /// Currently serving aboard a vessel.
    Onboard,
    /// Signed off a vessel, not yet processed.
    SignOff,
    /// On leave between contracts.
    Vacation,
    /// No longer employed; may be rehired.
    ExCrew,
    /// Barred from future employment.
    Blacklisted,
}

impl CrewStatus {
    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewStatus::Applicant => "APPLICANT",
            CrewStatus::Approved => "APPROVED",
            CrewStatus::Standby => "STANDBY",
            CrewStatus::Onboard => "ONBOARD",
            CrewStatus::SignOff => "SIGN_OFF",
            CrewStatus::Vacation => "VACATION",
            CrewStatus::ExCrew => "EX_CREW",
            CrewStatus::Blacklisted => "BLACKLISTED",
        }
    }

    /// Parse a stored status string.
    pub fn parse(value: &str) -> crate::Result<Self> {
        match value {
            "APPLICANT" => Ok(CrewStatus::Applicant),
            "APPROVED" => Ok(CrewStatus::Approved),
            "STANDBY" => Ok(CrewStatus::Standby),
            "ONBOARD" => Ok(CrewStatus::Onboard),
            "SIGN_OFF" => Ok(CrewStatus::SignOff),
            "VACATION" => Ok(CrewStatus::Vacation),
            "EX_CREW" => Ok(CrewStatus::ExCrew),
            "BLACKLISTED" => Ok(CrewStatus::Blacklisted),
            other => Err(CrewDockError::UnknownValue {
                kind: "crew status",
                value: other.to_string(),
            }),
        }
    }
}

/// Back-office caller role carried by the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Superuser; permitted everywhere.
    Director,
    /// Manages crewing and placements.
    CrewingManager,
    /// Senior reviewing staff.
    ExpertStaff,
    /// Handles crew documents and certificates.
    DocumentationOfficer,
    /// Handles payroll and allotments.
    AccountingOfficer,
    /// Handles training records.
    TrainingOfficer,
    /// Day-to-day vessel operations.
    OperationalStaff,
}

impl Role {
    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "DIRECTOR",
            Role::CrewingManager => "CREWING_MANAGER",
            Role::ExpertStaff => "EXPERT_STAFF",
            Role::DocumentationOfficer => "DOCUMENTATION_OFFICER",
            Role::AccountingOfficer => "ACCOUNTING_OFFICER",
            Role::TrainingOfficer => "TRAINING_OFFICER",
            Role::OperationalStaff => "OPERATIONAL_STAFF",
        }
    }

    /// Parse a stored role string.
    pub fn parse(value: &str) -> crate::Result<Self> {
        match value {
            "DIRECTOR" => Ok(Role::Director),
            "CREWING_MANAGER" => Ok(Role::CrewingManager),
            "EXPERT_STAFF" => Ok(Role::ExpertStaff),
            "DOCUMENTATION_OFFICER" => Ok(Role::DocumentationOfficer),
            "ACCOUNTING_OFFICER" => Ok(Role::AccountingOfficer),
            "TRAINING_OFFICER" => Ok(Role::TrainingOfficer),
            "OPERATIONAL_STAFF" => Ok(Role::OperationalStaff),
            other => Err(CrewDockError::UnknownValue {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

struct TransitionRule {
    allowed_roles: &'static [Role],
    next_statuses: &'static [CrewStatus],
}

const CREWING_CHAIN: &[Role] = &[Role::Director, Role::CrewingManager];
const DOCUMENTATION_CHAIN: &[Role] = &[
    Role::Director,
    Role::CrewingManager,
    Role::DocumentationOfficer,
];
const OPERATIONS_CHAIN: &[Role] = &[Role::Director, Role::CrewingManager, Role::OperationalStaff];

fn transition_rule(current: CrewStatus) -> TransitionRule {
    match current {
        CrewStatus::Applicant => TransitionRule {
            allowed_roles: CREWING_CHAIN,
            next_statuses: &[CrewStatus::Approved, CrewStatus::ExCrew],
        },
        CrewStatus::Approved => TransitionRule {
            allowed_roles: DOCUMENTATION_CHAIN,
            next_statuses: &[CrewStatus::Standby, CrewStatus::ExCrew],
        },
        CrewStatus::Standby => TransitionRule {
            allowed_roles: OPERATIONS_CHAIN,
            next_statuses: &[CrewStatus::Onboard, CrewStatus::Vacation, CrewStatus::ExCrew],
        },
        CrewStatus::Onboard => TransitionRule {
            allowed_roles: OPERATIONS_CHAIN,
            next_statuses: &[CrewStatus::SignOff, CrewStatus::ExCrew],
        },
        CrewStatus::SignOff => TransitionRule {
            allowed_roles: OPERATIONS_CHAIN,
            next_statuses: &[CrewStatus::Vacation, CrewStatus::ExCrew],
        },
        CrewStatus::Vacation => TransitionRule {
            allowed_roles: OPERATIONS_CHAIN,
            next_statuses: &[CrewStatus::Standby, CrewStatus::Onboard, CrewStatus::ExCrew],
        },
        CrewStatus::ExCrew => TransitionRule {
            allowed_roles: CREWING_CHAIN,
            next_statuses: &[CrewStatus::Blacklisted, CrewStatus::Standby],
        },
        CrewStatus::Blacklisted => TransitionRule {
            allowed_roles: &[Role::Director],
            next_statuses: &[CrewStatus::ExCrew],
        },
    }
}

/// Why a requested transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The caller's role is not in the allowed-role set for the current status.
    RoleDenied {
        /// The refused role.
        role: Role,
        /// The crew record's current status.
        current: CrewStatus,
    },
    /// The requested status is not in the allowed-next set.
    InvalidTarget {
        /// The crew record's current status.
        current: CrewStatus,
        /// The refused target status.
        requested: CrewStatus,
    },
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleDenied { role, current } => write!(
                f,
                "role {} cannot change status from {}",
                role.as_str(),
                current.as_str()
            ),
            Self::InvalidTarget { current, requested } => write!(
                f,
                "cannot transition from {} to {}",
                current.as_str(),
                requested.as_str()
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Field updates to apply alongside a permitted status change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionEffects {
    /// Stamp `last_offboard_date` with the transition time.
    pub last_offboard_date: Option<NaiveDateTime>,
    /// Set `reported_to_office` and stamp its date.
    pub mark_reported: bool,
    /// Record an inactivity reason ("Terminated" when the caller gave none).
    pub inactive_reason: Option<String>,
    /// Clear a previously recorded inactivity reason.
    pub clear_inactive_reason: bool,
}

/// Gate a requested status change.
///
/// Returns the side-effect plan when the transition table permits the move,
/// or the refusal reason otherwise. DIRECTOR passes every role check.
pub fn authorize_transition(
    current: CrewStatus,
    requested: CrewStatus,
    role: Role,
    reason: Option<&str>,
    now: NaiveDateTime,
) -> Result<TransitionEffects, TransitionError> {
    let rule = transition_rule(current);
    if role != Role::Director && !rule.allowed_roles.contains(&role) {
        return Err(TransitionError::RoleDenied { role, current });
    }
    if !rule.next_statuses.contains(&requested) {
        return Err(TransitionError::InvalidTarget { current, requested });
    }

    let mut effects = TransitionEffects::default();
    if matches!(requested, CrewStatus::Vacation | CrewStatus::SignOff) {
        effects.last_offboard_date = Some(now);
    }
    if requested == CrewStatus::Vacation {
        effects.mark_reported = true;
    }
    if matches!(requested, CrewStatus::ExCrew | CrewStatus::Blacklisted) {
        effects.inactive_reason = Some(
            reason
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or("Terminated")
                .to_string(),
        );
    }
    if requested == CrewStatus::Standby
        && matches!(current, CrewStatus::Vacation | CrewStatus::ExCrew)
    {
        effects.mark_reported = true;
        effects.clear_inactive_reason = true;
    }
    Ok(effects)
}

/// Transitions available to `role` from `current`.
///
/// Returns the allowed target statuses (empty when the role is denied) and
/// whether the role may transition at all.
pub fn available_transitions(current: CrewStatus, role: Role) -> (Vec<CrewStatus>, bool) {
    let rule = transition_rule(current);
    let can_transition = role == Role::Director || rule.allowed_roles.contains(&role);
    if can_transition {
        (rule.next_statuses.to_vec(), true)
    } else {
        (Vec::new(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .expect("date")
            .and_hms_opt(12, 0, 0)
            .expect("time")
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            CrewStatus::Applicant,
            CrewStatus::Approved,
            CrewStatus::Standby,
            CrewStatus::Onboard,
            CrewStatus::SignOff,
            CrewStatus::Vacation,
            CrewStatus::ExCrew,
            CrewStatus::Blacklisted,
        ] {
            assert_eq!(CrewStatus::parse(status.as_str()).expect("parse"), status);
        }
        assert!(CrewStatus::parse("RETIRED").is_err());
    }

    #[test]
    fn role_strings_round_trip() {
        for role in [
            Role::Director,
            Role::CrewingManager,
            Role::ExpertStaff,
            Role::DocumentationOfficer,
            Role::AccountingOfficer,
            Role::TrainingOfficer,
            Role::OperationalStaff,
        ] {
            assert_eq!(Role::parse(role.as_str()).expect("parse"), role);
        }
        assert!(Role::parse("INTERN").is_err());
    }

    #[test]
    fn applicant_approval_requires_crewing_role() {
        let denied = authorize_transition(
            CrewStatus::Applicant,
            CrewStatus::Approved,
            Role::OperationalStaff,
            None,
            noon(),
        );
        assert_eq!(
            denied.unwrap_err(),
            TransitionError::RoleDenied {
                role: Role::OperationalStaff,
                current: CrewStatus::Applicant,
            }
        );

        let allowed = authorize_transition(
            CrewStatus::Applicant,
            CrewStatus::Approved,
            Role::CrewingManager,
            None,
            noon(),
        );
        assert!(allowed.is_ok());
    }

    #[test]
    fn director_bypasses_role_check_everywhere() {
        let effects = authorize_transition(
            CrewStatus::Blacklisted,
            CrewStatus::ExCrew,
            Role::Director,
            Some("appeal granted"),
            noon(),
        )
        .expect("director transition");
        assert_eq!(effects.inactive_reason.as_deref(), Some("appeal granted"));
    }

    #[test]
    fn invalid_target_rejected_for_every_role() {
        for role in [
            Role::Director,
            Role::CrewingManager,
            Role::OperationalStaff,
        ] {
            let result = authorize_transition(
                CrewStatus::Onboard,
                CrewStatus::Standby,
                role,
                None,
                noon(),
            );
            assert_eq!(
                result.unwrap_err(),
                TransitionError::InvalidTarget {
                    current: CrewStatus::Onboard,
                    requested: CrewStatus::Standby,
                }
            );
        }
    }

    #[test]
    fn only_director_lifts_blacklist() {
        let denied = authorize_transition(
            CrewStatus::Blacklisted,
            CrewStatus::ExCrew,
            Role::CrewingManager,
            None,
            noon(),
        );
        assert!(matches!(
            denied,
            Err(TransitionError::RoleDenied { .. })
        ));
    }

    #[test]
    fn vacation_stamps_offboard_and_reporting() {
        let effects = authorize_transition(
            CrewStatus::SignOff,
            CrewStatus::Vacation,
            Role::OperationalStaff,
            None,
            noon(),
        )
        .expect("transition");
        assert_eq!(effects.last_offboard_date, Some(noon()));
        assert!(effects.mark_reported);
        assert!(effects.inactive_reason.is_none());
    }

    #[test]
    fn sign_off_stamps_offboard_only() {
        let effects = authorize_transition(
            CrewStatus::Onboard,
            CrewStatus::SignOff,
            Role::OperationalStaff,
            None,
            noon(),
        )
        .expect("transition");
        assert_eq!(effects.last_offboard_date, Some(noon()));
        assert!(!effects.mark_reported);
    }

    #[test]
    fn termination_records_default_reason() {
        let effects = authorize_transition(
            CrewStatus::Standby,
            CrewStatus::ExCrew,
            Role::CrewingManager,
            Some("   "),
            noon(),
        )
        .expect("transition");
        assert_eq!(effects.inactive_reason.as_deref(), Some("Terminated"));
    }

    #[test]
    fn rehire_clears_inactive_reason() {
        let effects = authorize_transition(
            CrewStatus::ExCrew,
            CrewStatus::Standby,
            Role::CrewingManager,
            None,
            noon(),
        )
        .expect("transition");
        assert!(effects.mark_reported);
        assert!(effects.clear_inactive_reason);
        assert!(effects.last_offboard_date.is_none());
    }

    #[test]
    fn standby_from_approved_does_not_clear_reason() {
        let effects = authorize_transition(
            CrewStatus::Approved,
            CrewStatus::Standby,
            Role::DocumentationOfficer,
            None,
            noon(),
        )
        .expect("transition");
        assert!(!effects.clear_inactive_reason);
        assert!(!effects.mark_reported);
    }

    #[test]
    fn available_transitions_empty_for_denied_role() {
        let (targets, can) = available_transitions(CrewStatus::Applicant, Role::TrainingOfficer);
        assert!(targets.is_empty());
        assert!(!can);

        let (targets, can) = available_transitions(CrewStatus::Applicant, Role::Director);
        assert_eq!(targets, vec![CrewStatus::Approved, CrewStatus::ExCrew]);
        assert!(can);
    }
}
