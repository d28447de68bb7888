#![deny(missing_docs)]
//! CrewDock core library.
//!
//! This crate contains the domain types and pure business rules that power
//! the CrewDock crew-management platform: the crew lifecycle state machine,
//! contract-expiry alert computation, and role-based route authorization.

pub mod alerts;
pub mod error;
pub mod rbac;
pub mod status;

pub use alerts::{
    AlertSeverity, ContractAlert, OnboardAssignment, compute_alerts, contract_months_for_owner,
    months_onboard,
};
pub use error::{CrewDockError, Result};
pub use rbac::{allowed_prefixes, can_access_path};
pub use status::{
    CrewStatus, Role, TransitionEffects, TransitionError, authorize_transition,
    available_transitions,
};
