//! Database models for CrewDock server.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::schema::{
    assignments, audits, certificates, checklists, complaints, corrective_actions, crew,
    crew_evaluations, document_approvals, document_distributions, document_revisions,
    employment_applications, form_submissions, form_templates, managed_documents, owners,
    repatriations, risk_opportunities, sea_service_records, sessions, suppliers, users, vessels,
};

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = users)]
/// Back-office user account.
pub struct User {
    /// User identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// PBKDF2 password hash.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Role string (see `crewdock_core::Role`).
    pub role: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(belongs_to(User, foreign_key = user_id))]
/// Login session backing the `user_session` cookie.
pub struct Session {
    /// Session identifier.
    pub id: String,
    /// Associated user id.
    pub user_id: String,
    /// Opaque cookie token.
    pub token: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last usage timestamp.
    pub last_used_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = owners)]
/// Vessel owner reference record.
pub struct Owner {
    /// Owner identifier.
    pub id: String,
    /// Company name.
    pub name: String,
    /// Short code.
    pub code: Option<String>,
    /// Country of registration.
    pub country: Option<String>,
    /// Contact person.
    pub contact: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = vessels)]
#[diesel(belongs_to(Owner, foreign_key = owner_id))]
/// Vessel reference record.
pub struct Vessel {
    /// Vessel identifier.
    pub id: String,
    /// Vessel name.
    pub name: String,
    /// Vessel type (tanker, bulker, ...).
    pub vessel_type: Option<String>,
    /// Flag state.
    pub flag: Option<String>,
    /// Owning company id.
    pub owner_id: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = crew)]
/// Seafarer record tracked through the employment lifecycle.
pub struct Crew {
    /// Crew identifier.
    pub id: String,
    /// Unique crew code.
    pub crew_code: String,
    /// Full name.
    pub full_name: String,
    /// Current rank.
    pub rank: String,
    /// Lifecycle status string (see `crewdock_core::CrewStatus`).
    pub crew_status: String,
    /// Vessel currently assigned, if any.
    pub vessel_name: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Home address.
    pub address: Option<String>,
    /// Mobile phone.
    pub phone: Option<String>,
    /// Whether the crew has reported to the office.
    pub reported_to_office: bool,
    /// When the crew last reported to the office.
    pub reported_to_office_date: Option<NaiveDateTime>,
    /// When the crew last went offboard.
    pub last_offboard_date: Option<NaiveDateTime>,
    /// Reason recorded when moved to EX_CREW/BLACKLISTED.
    pub inactive_reason: Option<String>,
    /// Notes recorded during offboarding.
    pub offboard_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last update timestamp.
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Placement of a crew member aboard a vessel for a date range.
pub struct Assignment {
    /// Assignment identifier.
    pub id: String,
    /// Crew member placed.
    pub crew_id: String,
    /// Vessel record, when linked.
    pub vessel_id: Option<String>,
    /// Vessel name (denormalized; imports may predate vessel records).
    pub vessel_name: String,
    /// Rank for this placement.
    pub rank: String,
    /// Assignment status (PLANNED, ONBOARD, PLANNED_OFFBOARD, COMPLETED).
    pub status: String,
    /// Sign-on timestamp.
    pub sign_on: Option<NaiveDateTime>,
    /// Sign-off timestamp; null while the assignment is open.
    pub sign_off: Option<NaiveDateTime>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = certificates)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Per-crew certificate or document record.
pub struct Certificate {
    /// Certificate identifier.
    pub id: String,
    /// Owning crew member.
    pub crew_id: String,
    /// Certificate type (COC, COP, passport, ...).
    pub cert_type: String,
    /// Certificate number.
    pub cert_number: Option<String>,
    /// Issue date.
    pub issue_date: Option<NaiveDateTime>,
    /// Expiry date; drives expiry alerts.
    pub expiry_date: Option<NaiveDateTime>,
    /// Issuing authority.
    pub issuer: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = crew_evaluations)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Performance evaluation recorded against a crew member.
pub struct CrewEvaluation {
    /// Evaluation identifier.
    pub id: String,
    /// Evaluated crew member.
    pub crew_id: String,
    /// Name of the evaluator.
    pub evaluator: Option<String>,
    /// Rank held when evaluated.
    pub rank: Option<String>,
    /// Score, 0 to 100.
    pub score: Option<f64>,
    /// Evaluator comments.
    pub comments: Option<String>,
    /// When the evaluation took place.
    pub evaluation_date: NaiveDateTime,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = repatriations)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Repatriation settlement for a crew member leaving a vessel.
pub struct Repatriation {
    /// Repatriation identifier.
    pub id: String,
    /// Repatriated crew member.
    pub crew_id: String,
    /// Travel date.
    pub repatriation_date: Option<NaiveDateTime>,
    /// Reason for repatriation.
    pub reason: Option<String>,
    /// Final wage account settled.
    pub final_account: Option<f64>,
    /// Staff member who processed the settlement.
    pub processed_by: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = sea_service_records)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Prior sea-service experience entry on a crew member's record.
pub struct SeaServiceRecord {
    /// Record identifier.
    pub id: String,
    /// Crew member the experience belongs to.
    pub crew_id: String,
    /// Vessel served on.
    pub vessel_name: String,
    /// Rank held.
    pub rank: Option<String>,
    /// Gross register tonnage.
    pub grt: Option<f64>,
    /// Deadweight tonnage.
    pub dwt: Option<f64>,
    /// Engine type.
    pub engine_type: Option<String>,
    /// Brake horsepower.
    pub bhp: Option<f64>,
    /// Managing company.
    pub company_name: Option<String>,
    /// Vessel flag.
    pub flag: Option<String>,
    /// Sign-on date.
    pub sign_on: Option<NaiveDateTime>,
    /// Sign-off date.
    pub sign_off: Option<NaiveDateTime>,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = employment_applications)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Employment application for a crew member.
pub struct EmploymentApplication {
    /// Application identifier.
    pub id: String,
    /// Applying crew member.
    pub crew_id: String,
    /// Rank applied for.
    pub applied_rank: Option<String>,
    /// Application status.
    pub status: String,
    /// Submission timestamp.
    pub application_date: NaiveDateTime,
    /// Interview date.
    pub interview_date: Option<NaiveDateTime>,
    /// Interview notes.
    pub interview_notes: Option<String>,
    /// Offer date.
    pub offered_date: Option<NaiveDateTime>,
    /// Acceptance date.
    pub accepted_date: Option<NaiveDateTime>,
    /// Rejection reason.
    pub rejection_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = checklists)]
#[diesel(belongs_to(Crew, foreign_key = crew_id))]
/// Document checklist item for onboarding.
pub struct ChecklistItem {
    /// Checklist item identifier.
    pub id: String,
    /// Crew member the item belongs to.
    pub crew_id: String,
    /// Application the item was raised for, if any.
    pub application_id: Option<String>,
    /// Checklist item label.
    pub item_name: String,
    /// Whether the document was provided.
    pub is_provided: bool,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = managed_documents)]
/// Controlled document under the quality-management system.
pub struct ManagedDocument {
    /// Document identifier.
    pub id: String,
    /// Unique document code.
    pub document_code: String,
    /// Document title.
    pub document_title: String,
    /// Document type (procedure, manual, form, ...).
    pub document_type: String,
    /// Document category.
    pub category: String,
    /// Current revision number.
    pub current_revision: i32,
    /// Control status (DRAFT, PENDING_APPROVAL, APPROVED, OBSOLETE).
    pub status: String,
    /// Who prepared the document.
    pub prepared_by: String,
    /// Who reviewed the current revision.
    pub reviewed_by: Option<String>,
    /// Who approved the current revision.
    pub approved_by: Option<String>,
    /// When the current revision became effective.
    pub effective_date: Option<NaiveDateTime>,
    /// When the current revision was created.
    pub revision_date: Option<NaiveDateTime>,
    /// Stored file path.
    pub file_path: String,
    /// Stored file type.
    pub file_type: Option<String>,
    /// Document description.
    pub description: Option<String>,
    /// Retention period in years.
    pub retention_period: i32,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last update timestamp.
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = document_revisions)]
#[diesel(belongs_to(ManagedDocument, foreign_key = document_id))]
/// Revision history entry for a managed document.
pub struct DocumentRevision {
    /// Revision identifier.
    pub id: String,
    /// Parent document id.
    pub document_id: String,
    /// Revision number.
    pub revision_number: i32,
    /// Summary of changes.
    pub change_summary: String,
    /// Reason for the change.
    pub reason_for_change: Option<String>,
    /// File path of the revised document.
    pub file_path: String,
    /// Who prepared the revision.
    pub prepared_by: String,
    /// Revision status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = document_approvals)]
#[diesel(belongs_to(ManagedDocument, foreign_key = document_id))]
/// Approval trail entry for a managed document.
pub struct DocumentApproval {
    /// Approval identifier.
    pub id: String,
    /// Parent document id.
    pub document_id: String,
    /// Revision the action applies to.
    pub revision_number: i32,
    /// Approver role (QMR, DIRECTOR, ...).
    pub approver_role: String,
    /// Approver name.
    pub approver_name: String,
    /// Action recorded (SUBMITTED, REVIEWED, APPROVED, REJECTED).
    pub action: String,
    /// Optional comments.
    pub comments: Option<String>,
    /// Action timestamp.
    pub approved_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = document_distributions)]
#[diesel(belongs_to(ManagedDocument, foreign_key = document_id))]
/// Distribution record for an approved document.
pub struct DocumentDistribution {
    /// Distribution identifier.
    pub id: String,
    /// Parent document id.
    pub document_id: String,
    /// Recipient.
    pub distributed_to: String,
    /// Method (email, print, portal, ...).
    pub distribution_method: String,
    /// Who distributed the document.
    pub distributed_by: String,
    /// Distribution timestamp.
    pub distributed_at: NaiveDateTime,
    /// Acknowledgment timestamp, when confirmed.
    pub acknowledged_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = form_templates)]
/// Reusable form template.
pub struct FormTemplate {
    /// Template identifier.
    pub id: String,
    /// Unique template code.
    pub code: String,
    /// Template title.
    pub title: String,
    /// Template category.
    pub category: Option<String>,
    /// Template revision number.
    pub revision: i32,
    /// Stored file path, when file-backed.
    pub file_path: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = form_submissions)]
#[diesel(belongs_to(FormTemplate, foreign_key = template_id))]
/// Submitted instance of a form template.
pub struct FormSubmission {
    /// Submission identifier.
    pub id: String,
    /// Template the submission instantiates.
    pub template_id: String,
    /// Crew member the form concerns, if any.
    pub crew_id: Option<String>,
    /// Submitting user name.
    pub submitted_by: String,
    /// Submitted field values as JSON.
    pub data_json: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = risk_opportunities)]
/// ISO 9001 risk or opportunity register entry.
pub struct RiskOpportunity {
    /// Entry identifier.
    pub id: String,
    /// RISK or OPPORTUNITY.
    pub kind: String,
    /// Where the entry was identified.
    pub source: String,
    /// Description.
    pub description: String,
    /// Likelihood level (LOW/MEDIUM/HIGH, risks only).
    pub likelihood: Option<String>,
    /// Impact level (LOW/MEDIUM/HIGH, risks only).
    pub impact: Option<String>,
    /// likelihood x impact on a 1-3 scale, risks only.
    pub risk_score: Option<i32>,
    /// Mitigation or pursuit actions.
    pub actions: String,
    /// Responsible person.
    pub responsible_person: Option<String>,
    /// Target completion date.
    pub target_date: Option<NaiveDateTime>,
    /// Residual risk after actions.
    pub residual_risk: Option<String>,
    /// Register status.
    pub status: String,
    /// Who recorded the entry.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = corrective_actions)]
/// Corrective and Preventive Action Report (CPAR).
pub struct CorrectiveAction {
    /// Record identifier.
    pub id: String,
    /// Sequential CAR number (CAR-<year>-<seq>).
    pub car_number: String,
    /// Where the problem was detected.
    pub source: String,
    /// Problem description.
    pub problem_description: String,
    /// Detection timestamp.
    pub detected_date: NaiveDateTime,
    /// Who detected the problem.
    pub detected_by: String,
    /// Root cause analysis.
    pub root_cause: Option<String>,
    /// Problem category.
    pub category: Option<String>,
    /// Proposed corrective action.
    pub proposed_action: Option<String>,
    /// Responsible person.
    pub responsible_person: Option<String>,
    /// Target completion date.
    pub target_date: Option<NaiveDateTime>,
    /// Report status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = audits)]
/// Internal or external quality audit record.
pub struct Audit {
    /// Audit identifier.
    pub id: String,
    /// Audit number.
    pub audit_number: String,
    /// INTERNAL or EXTERNAL.
    pub audit_type: String,
    /// Audit scope.
    pub scope: String,
    /// Lead auditor.
    pub auditor: String,
    /// Planned date.
    pub planned_date: Option<NaiveDateTime>,
    /// Conducted date.
    pub conducted_date: Option<NaiveDateTime>,
    /// Findings summary.
    pub findings: Option<String>,
    /// Audit status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = suppliers)]
/// Approved-supplier register entry.
pub struct Supplier {
    /// Supplier identifier.
    pub id: String,
    /// Supplier name.
    pub name: String,
    /// Service provided.
    pub service_type: String,
    /// Contact person.
    pub contact: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Latest evaluation score.
    pub evaluation_score: Option<i32>,
    /// Whether the supplier is approved.
    pub approved: bool,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = complaints)]
/// Customer complaint record.
pub struct Complaint {
    /// Complaint identifier.
    pub id: String,
    /// Sequential complaint number.
    pub complaint_number: String,
    /// Complaint source.
    pub source: String,
    /// Complaint description.
    pub description: String,
    /// When the complaint was received.
    pub received_date: NaiveDateTime,
    /// Who received the complaint.
    pub received_by: String,
    /// Severity level.
    pub severity: Option<String>,
    /// Resolution summary.
    pub resolution: Option<String>,
    /// Complaint status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}
