//! OpenAPI document for the CrewDock server.

use utoipa::OpenApi;

use crewdock_core::{AlertSeverity, ContractAlert};

use crate::routes::ErrorResponse;
use crate::routes::alerts::ContractAlertsResponse;
use crate::routes::applications::{
    ApplicationCreateRequest, ApplicationDecisionRequest, ApplicationResponse,
    ApplicationUpdateRequest, ChecklistCreateRequest, ChecklistResponse,
};
use crate::routes::assignments::{
    AssignmentCreateRequest, AssignmentExtendRequest, AssignmentResponse,
};
use crate::routes::auth::{LoginRequest, UserProfile};
use crate::routes::certificates::{CertificatePayload, CertificateResponse};
use crate::routes::crew::{
    AssignmentSummary, AvailableTransitionsResponse, CertificateSummary, CrewCreateRequest,
    CrewResponse, CrewUpdateRequest, ReportingStatusRequest, StatusChangeCrew, StatusChangeRequest,
    StatusChangeResponse,
};
use crate::routes::documents::{
    ApprovalEntry, DistributionEntry, DocumentAcknowledgeRequest, DocumentActionRequest,
    DocumentDetailResponse, DocumentDistributeRequest, DocumentPayload, DocumentResponse,
    DocumentReviseRequest, RevisionEntry,
};
use crate::routes::forms::{FormSubmissionResponse, FormSubmitRequest, FormTemplateResponse};
use crate::routes::owners::{OwnerPayload, OwnerResponse};
use crate::routes::qms::{
    AuditPayload, AuditResponse, ComplaintPayload, ComplaintResponse, CparPayload, CparResponse,
    RiskPayload, RiskResponse, SupplierPayload, SupplierResponse,
};
use crate::routes::service_records::{
    EvaluationCreateRequest, EvaluationResponse, RepatriationCreateRequest, RepatriationResponse,
    SeaServicePayload, SeaServiceResponse,
};
use crate::routes::vessels::{OwnerSummary, VesselPayload, VesselResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::crew::crew_list,
        crate::routes::crew::crew_create,
        crate::routes::crew::crew_get,
        crate::routes::crew::crew_update,
        crate::routes::crew::crew_delete,
        crate::routes::crew::crew_status_change,
        crate::routes::crew::crew_status_options,
        crate::routes::crew::crew_reporting_status,
        crate::routes::service_records::evaluation_create,
        crate::routes::service_records::repatriation_create,
        crate::routes::service_records::sea_service_list,
        crate::routes::service_records::sea_service_create,
        crate::routes::service_records::sea_service_update,
        crate::routes::service_records::sea_service_delete,
        crate::routes::vessels::vessels_list,
        crate::routes::vessels::vessels_create,
        crate::routes::vessels::vessels_update,
        crate::routes::vessels::vessels_delete,
        crate::routes::owners::owners_list,
        crate::routes::owners::owners_create,
        crate::routes::owners::owners_update,
        crate::routes::assignments::assignments_list,
        crate::routes::assignments::assignments_create,
        crate::routes::assignments::assignments_extend,
        crate::routes::assignments::assignments_sign_off,
        crate::routes::certificates::certificates_list,
        crate::routes::certificates::certificates_expiring,
        crate::routes::certificates::certificates_create,
        crate::routes::certificates::certificates_update,
        crate::routes::certificates::certificates_delete,
        crate::routes::alerts::contract_alerts,
        crate::routes::applications::applications_list,
        crate::routes::applications::applications_create,
        crate::routes::applications::applications_update,
        crate::routes::applications::applications_approve,
        crate::routes::applications::checklists_list,
        crate::routes::applications::checklists_create,
        crate::routes::documents::documents_list,
        crate::routes::documents::documents_create,
        crate::routes::documents::documents_get,
        crate::routes::documents::documents_update,
        crate::routes::documents::documents_delete,
        crate::routes::documents::documents_approve,
        crate::routes::documents::documents_revise,
        crate::routes::documents::documents_distribute,
        crate::routes::documents::documents_acknowledge,
        crate::routes::forms::forms_list,
        crate::routes::forms::forms_get,
        crate::routes::forms::form_submissions_list,
        crate::routes::forms::form_submissions_create,
        crate::routes::qms::risks_list,
        crate::routes::qms::risks_create,
        crate::routes::qms::cpar_list,
        crate::routes::qms::cpar_create,
        crate::routes::qms::audits_list,
        crate::routes::qms::audits_create,
        crate::routes::qms::suppliers_list,
        crate::routes::qms::suppliers_create,
        crate::routes::qms::complaints_list,
        crate::routes::qms::complaints_create,
        crate::routes::files::serve_document,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest,
            UserProfile,
            CrewCreateRequest,
            CrewUpdateRequest,
            CrewResponse,
            CertificateSummary,
            AssignmentSummary,
            StatusChangeRequest,
            StatusChangeCrew,
            StatusChangeResponse,
            AvailableTransitionsResponse,
            ReportingStatusRequest,
            EvaluationCreateRequest,
            EvaluationResponse,
            RepatriationCreateRequest,
            RepatriationResponse,
            SeaServicePayload,
            SeaServiceResponse,
            VesselPayload,
            VesselResponse,
            OwnerSummary,
            OwnerPayload,
            OwnerResponse,
            AssignmentCreateRequest,
            AssignmentExtendRequest,
            AssignmentResponse,
            CertificatePayload,
            CertificateResponse,
            AlertSeverity,
            ContractAlert,
            ContractAlertsResponse,
            ApplicationCreateRequest,
            ApplicationUpdateRequest,
            ApplicationDecisionRequest,
            ApplicationResponse,
            ChecklistCreateRequest,
            ChecklistResponse,
            DocumentPayload,
            DocumentResponse,
            DocumentDetailResponse,
            DocumentActionRequest,
            DocumentReviseRequest,
            DocumentDistributeRequest,
            DocumentAcknowledgeRequest,
            RevisionEntry,
            ApprovalEntry,
            DistributionEntry,
            FormTemplateResponse,
            FormSubmitRequest,
            FormSubmissionResponse,
            RiskPayload,
            RiskResponse,
            CparPayload,
            CparResponse,
            AuditPayload,
            AuditResponse,
            SupplierPayload,
            SupplierResponse,
            ComplaintPayload,
            ComplaintResponse
        )
    ),
    tags(
        (name = "auth", description = "Session authentication"),
        (name = "crew", description = "Crew records and lifecycle"),
        (name = "vessels", description = "Vessel reference data"),
        (name = "owners", description = "Owner reference data"),
        (name = "assignments", description = "Vessel assignments"),
        (name = "certificates", description = "Crew certificates"),
        (name = "service-records", description = "Evaluations, repatriations, and sea-service history"),
        (name = "contracts", description = "Contract expiry alerts"),
        (name = "applications", description = "Employment applications"),
        (name = "documents", description = "Controlled documents"),
        (name = "forms", description = "Form templates and submissions"),
        (name = "qms", description = "Quality-management registers"),
        (name = "files", description = "Stored document files"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI document for the CrewDock server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/auth/login"));
        assert!(paths.contains_key("/crew"));
        assert!(paths.contains_key("/crew/{id}/status"));
        assert!(paths.contains_key("/crew/reporting-status"));
        assert!(paths.contains_key("/crew/{id}/evaluation"));
        assert!(paths.contains_key("/crew/{id}/repatriation"));
        assert!(paths.contains_key("/sea-service"));
        assert!(paths.contains_key("/sea-service/{id}"));
        assert!(paths.contains_key("/vessels"));
        assert!(paths.contains_key("/owners"));
        assert!(paths.contains_key("/assignments"));
        assert!(paths.contains_key("/assignments/{id}/extend"));
        assert!(paths.contains_key("/certificates/expiring"));
        assert!(paths.contains_key("/contracts/alerts"));
        assert!(paths.contains_key("/applications/{id}/approve"));
        assert!(paths.contains_key("/documents/{id}/approve"));
        assert!(paths.contains_key("/documents/{id}/distribute"));
        assert!(paths.contains_key("/forms/submissions"));
        assert!(paths.contains_key("/qms/risks"));
        assert!(paths.contains_key("/qms/cpar"));
        assert!(paths.contains_key("/docs/{path}"));
        assert!(paths.contains_key("/openapi.json"));
    }
}
