//! Role-based route authorization.
//!
//! Each role maps to a static list of API path prefixes it may reach;
//! DIRECTOR maps to everything. Handlers check the request path against the
//! caller's prefixes after session validation.

use crate::status::Role;

/// API path prefixes a role may access. `None` means unrestricted.
pub fn allowed_prefixes(role: Role) -> Option<&'static [&'static str]> {
    match role {
        Role::Director => None,
        Role::CrewingManager => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/applications",
            "/api/checklists",
            "/api/assignments",
            "/api/contracts",
            "/api/vessels",
            "/api/owners",
            "/api/certificates",
            "/api/documents",
            "/api/docs",
            "/api/forms",
            "/api/qms",
        ]),
        Role::ExpertStaff => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/applications",
            "/api/checklists",
            "/api/assignments",
            "/api/vessels",
            "/api/certificates",
            "/api/documents",
            "/api/docs",
            "/api/forms",
        ]),
        Role::DocumentationOfficer => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/applications",
            "/api/checklists",
            "/api/certificates",
            "/api/documents",
            "/api/docs",
            "/api/forms",
        ]),
        Role::AccountingOfficer => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/applications",
            "/api/certificates",
            "/api/forms",
        ]),
        Role::TrainingOfficer => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/applications",
            "/api/certificates",
            "/api/forms",
        ]),
        Role::OperationalStaff => Some(&[
            "/api/auth",
            "/api/crew",
            "/api/assignments",
            "/api/contracts",
            "/api/vessels",
            "/api/certificates",
        ]),
    }
}

/// Whether `role` may access the request path.
pub fn can_access_path(role: Role, path: &str) -> bool {
    match allowed_prefixes(role) {
        None => true,
        Some(prefixes) => prefixes.iter().any(|prefix| path.starts_with(prefix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn director_reaches_everything() {
        assert!(can_access_path(Role::Director, "/api/qms/cpar"));
        assert!(can_access_path(Role::Director, "/api/documents/abc"));
    }

    #[test]
    fn operational_staff_blocked_from_documents_and_qms() {
        assert!(can_access_path(Role::OperationalStaff, "/api/crew"));
        assert!(can_access_path(Role::OperationalStaff, "/api/contracts/alerts"));
        assert!(!can_access_path(Role::OperationalStaff, "/api/documents"));
        assert!(!can_access_path(Role::OperationalStaff, "/api/qms/risks"));
    }

    #[test]
    fn every_role_reaches_auth() {
        for role in [
            Role::CrewingManager,
            Role::ExpertStaff,
            Role::DocumentationOfficer,
            Role::AccountingOfficer,
            Role::TrainingOfficer,
            Role::OperationalStaff,
        ] {
            assert!(can_access_path(role, "/api/auth/me"));
        }
    }

    #[test]
    fn prefix_match_is_not_substring_match() {
        assert!(!can_access_path(Role::AccountingOfficer, "/internal/api/crew"));
    }
}
