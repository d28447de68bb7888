//! Controlled-document endpoints: lifecycle, revision history, approvals,
//! and distribution with acknowledgment.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, delete, get, patch, post, put, web};
use chrono::NaiveDateTime;
use crewdock_core::Role;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{DocumentApproval, DocumentDistribution, DocumentRevision, ManagedDocument};
use crate::schema::{document_approvals, document_distributions, document_revisions, managed_documents};

use super::{ApiError, AppState, AuthContext, Conn, ErrorResponse, conn, now, require_auth, respond};

/// Query filters on the document listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilters {
    /// Restrict to a control status.
    pub status: Option<String>,
    /// Restrict to a category.
    pub category: Option<String>,
    /// Restrict to a document type.
    pub document_type: Option<String>,
    /// Substring search on code and title.
    pub search: Option<String>,
}

/// Request payload for creating or updating a document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// Unique document code, required on create.
    pub document_code: String,
    /// Document title, required.
    pub document_title: String,
    /// Document type, required.
    pub document_type: String,
    /// Document category, required.
    pub category: String,
    /// Stored file path.
    pub file_path: Option<String>,
    /// Stored file type.
    pub file_type: Option<String>,
    /// Document description.
    pub description: Option<String>,
    /// Retention period in years (defaults to 3).
    pub retention_period: Option<i32>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Request payload for the approval workflow.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentActionRequest {
    /// Action: REVIEWED, APPROVED, or REJECTED.
    pub action: String,
    /// Reviewer/approver comments.
    pub comments: Option<String>,
}

/// Request payload for cutting a new revision.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviseRequest {
    /// Summary of changes, required.
    pub change_summary: String,
    /// Reason for the change.
    pub reason_for_change: Option<String>,
    /// File path of the revised document.
    pub file_path: Option<String>,
}

/// Request payload for distributing an approved document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDistributeRequest {
    /// Recipient, required.
    pub distributed_to: String,
    /// Method (email, print, portal, ...).
    pub distribution_method: Option<String>,
}

/// Request payload for acknowledging a distribution.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAcknowledgeRequest {
    /// Distribution to acknowledge, required.
    pub distribution_id: String,
}

/// Document as served by list endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    /// Document identifier.
    pub id: String,
    /// Unique document code.
    pub document_code: String,
    /// Document title.
    pub document_title: String,
    /// Document type.
    pub document_type: String,
    /// Document category.
    pub category: String,
    /// Current revision number.
    pub current_revision: i32,
    /// Control status.
    pub status: String,
    /// Who prepared the document.
    pub prepared_by: String,
    /// Who reviewed the current revision.
    pub reviewed_by: Option<String>,
    /// Who approved the current revision.
    pub approved_by: Option<String>,
    /// Effective date, ISO-8601, empty until approved.
    pub effective_date: String,
    /// Stored file path.
    pub file_path: String,
    /// Document description.
    pub description: Option<String>,
    /// Retention period in years.
    pub retention_period: i32,
}

/// Revision history entry as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevisionEntry {
    /// Revision identifier.
    pub id: String,
    /// Revision number.
    pub revision_number: i32,
    /// Summary of changes.
    pub change_summary: String,
    /// Reason for the change.
    pub reason_for_change: Option<String>,
    /// Who prepared the revision.
    pub prepared_by: String,
    /// Revision status.
    pub status: String,
}

/// Approval trail entry as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEntry {
    /// Approval identifier.
    pub id: String,
    /// Revision the action applies to.
    pub revision_number: i32,
    /// Approver role.
    pub approver_role: String,
    /// Approver name.
    pub approver_name: String,
    /// Action recorded.
    pub action: String,
    /// Optional comments.
    pub comments: Option<String>,
    /// Action timestamp, ISO-8601.
    pub approved_at: String,
}

/// Distribution record as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEntry {
    /// Distribution identifier.
    pub id: String,
    /// Recipient.
    pub distributed_to: String,
    /// Method used.
    pub distribution_method: String,
    /// Who distributed the document.
    pub distributed_by: String,
    /// Distribution timestamp, ISO-8601.
    pub distributed_at: String,
    /// Acknowledgment timestamp, empty until confirmed.
    pub acknowledged_at: String,
}

/// Document detail with its full history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetailResponse {
    /// The document itself.
    #[serde(flatten)]
    pub document: DocumentResponse,
    /// Revision history, newest first.
    pub revisions: Vec<RevisionEntry>,
    /// Approval trail, newest first.
    pub approvals: Vec<ApprovalEntry>,
    /// Distribution records.
    pub distributions: Vec<DistributionEntry>,
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn document_response(record: ManagedDocument) -> DocumentResponse {
    DocumentResponse {
        id: record.id,
        document_code: record.document_code,
        document_title: record.document_title,
        document_type: record.document_type,
        category: record.category,
        current_revision: record.current_revision,
        status: record.status,
        prepared_by: record.prepared_by,
        reviewed_by: record.reviewed_by,
        approved_by: record.approved_by,
        effective_date: fmt_opt(record.effective_date),
        file_path: record.file_path,
        description: record.description,
        retention_period: record.retention_period,
    }
}

fn load_document(conn: &mut Conn, document_id: &str) -> Result<ManagedDocument, ApiError> {
    managed_documents::table
        .filter(managed_documents::id.eq(document_id))
        .first::<ManagedDocument>(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("document not found".to_string()))
}

fn record_approval(
    conn: &mut Conn,
    document: &ManagedDocument,
    context: &AuthContext,
    action: &str,
    comments: Option<String>,
) -> Result<(), ApiError> {
    let entry = DocumentApproval {
        id: Uuid::new_v4().to_string(),
        document_id: document.id.clone(),
        revision_number: document.current_revision,
        approver_role: context.role.as_str().to_string(),
        approver_name: context.user.full_name.clone(),
        action: action.to_string(),
        comments,
        approved_at: now(),
    };
    diesel::insert_into(document_approvals::table)
        .values(&entry)
        .execute(conn)?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/documents",
    params(
        ("status" = Option<String>, Query, description = "Restrict to a control status"),
        ("category" = Option<String>, Query, description = "Restrict to a category"),
        ("documentType" = Option<String>, Query, description = "Restrict to a document type"),
        ("search" = Option<String>, Query, description = "Substring search on code and title")
    ),
    responses(
        (status = 200, description = "Document listing", body = [DocumentResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[get("/api/documents")]
/// List controlled documents with optional filters.
pub async fn documents_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<DocumentFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let mut query = managed_documents::table
            .order(managed_documents::document_code.asc())
            .into_boxed();
        if let Some(status) = filters.status.filter(|value| !value.is_empty()) {
            query = query.filter(managed_documents::status.eq(status));
        }
        if let Some(category) = filters.category.filter(|value| !value.is_empty()) {
            query = query.filter(managed_documents::category.eq(category));
        }
        if let Some(document_type) = filters.document_type.filter(|value| !value.is_empty()) {
            query = query.filter(managed_documents::document_type.eq(document_type));
        }
        if let Some(search) = filters.search.filter(|value| !value.is_empty()) {
            let pattern = format!("%{search}%");
            query = query.filter(
                managed_documents::document_code
                    .ilike(pattern.clone())
                    .or(managed_documents::document_title.ilike(pattern)),
            );
        }
        let rows = query.load::<ManagedDocument>(&mut conn)?;
        Ok(rows.into_iter().map(document_response).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/documents",
    request_body = DocumentPayload,
    responses(
        (status = 201, description = "Document created at revision 0", body = DocumentResponse),
        (status = 400, description = "Missing fields or duplicate code", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/api/documents")]
/// Register a controlled document: revision 0, DRAFT, with a SUBMITTED approval entry.
pub async fn documents_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<DocumentPayload>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        for (value, field) in [
            (&payload.document_code, "documentCode"),
            (&payload.document_title, "documentTitle"),
            (&payload.document_type, "documentType"),
            (&payload.category, "category"),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::BadRequest(format!("{field} is required")));
            }
        }
        let mut conn = conn(&pool)?;
        let duplicate: i64 = managed_documents::table
            .filter(managed_documents::document_code.eq(payload.document_code.trim()))
            .count()
            .get_result(&mut conn)?;
        if duplicate > 0 {
            return Err(ApiError::BadRequest(
                "document code already exists".to_string(),
            ));
        }
        let stamp = now();
        let record = ManagedDocument {
            id: Uuid::new_v4().to_string(),
            document_code: payload.document_code.trim().to_string(),
            document_title: payload.document_title.trim().to_string(),
            document_type: payload.document_type.trim().to_string(),
            category: payload.category.trim().to_string(),
            current_revision: 0,
            status: "DRAFT".to_string(),
            prepared_by: context.user.full_name.clone(),
            reviewed_by: None,
            approved_by: None,
            effective_date: None,
            revision_date: Some(stamp),
            file_path: payload.file_path.unwrap_or_default(),
            file_type: payload.file_type,
            description: payload.description,
            retention_period: payload.retention_period.unwrap_or(3),
            remarks: payload.remarks,
            created_at: stamp,
            updated_at: stamp,
        };
        diesel::insert_into(managed_documents::table)
            .values(&record)
            .execute(&mut conn)?;

        let revision = DocumentRevision {
            id: Uuid::new_v4().to_string(),
            document_id: record.id.clone(),
            revision_number: 0,
            change_summary: "Initial issue".to_string(),
            reason_for_change: None,
            file_path: record.file_path.clone(),
            prepared_by: context.user.full_name.clone(),
            status: "DRAFT".to_string(),
            created_at: stamp,
        };
        diesel::insert_into(document_revisions::table)
            .values(&revision)
            .execute(&mut conn)?;
        record_approval(&mut conn, &record, &context, "SUBMITTED", None)?;
        Ok(document_response(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document with history", body = DocumentDetailResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[get("/api/documents/{id}")]
/// Fetch a document with its revisions, approvals, and distributions.
pub async fn documents_get(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let record = load_document(&mut conn, &document_id)?;
        let revisions = DocumentRevision::belonging_to(&record)
            .order(document_revisions::revision_number.desc())
            .load::<DocumentRevision>(&mut conn)?;
        let approvals = DocumentApproval::belonging_to(&record)
            .order(document_approvals::approved_at.desc())
            .load::<DocumentApproval>(&mut conn)?;
        let distributions = DocumentDistribution::belonging_to(&record)
            .order(document_distributions::distributed_at.desc())
            .load::<DocumentDistribution>(&mut conn)?;
        Ok(DocumentDetailResponse {
            document: document_response(record),
            revisions: revisions
                .into_iter()
                .map(|revision| RevisionEntry {
                    id: revision.id,
                    revision_number: revision.revision_number,
                    change_summary: revision.change_summary,
                    reason_for_change: revision.reason_for_change,
                    prepared_by: revision.prepared_by,
                    status: revision.status,
                })
                .collect(),
            approvals: approvals
                .into_iter()
                .map(|approval| ApprovalEntry {
                    id: approval.id,
                    revision_number: approval.revision_number,
                    approver_role: approval.approver_role,
                    approver_name: approval.approver_name,
                    action: approval.action,
                    comments: approval.comments,
                    approved_at: approval.approved_at.and_utc().to_rfc3339(),
                })
                .collect(),
            distributions: distributions
                .into_iter()
                .map(|distribution| DistributionEntry {
                    id: distribution.id,
                    distributed_to: distribution.distributed_to,
                    distribution_method: distribution.distribution_method,
                    distributed_by: distribution.distributed_by,
                    distributed_at: distribution.distributed_at.and_utc().to_rfc3339(),
                    acknowledged_at: fmt_opt(distribution.acknowledged_at),
                })
                .collect(),
        })
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    put,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentPayload,
    responses(
        (status = 200, description = "Document updated", body = DocumentResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[put("/api/documents/{id}")]
/// Update a document's descriptive fields.
pub async fn documents_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<DocumentPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.document_title.trim().is_empty() {
            return Err(ApiError::BadRequest("documentTitle is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let updated = diesel::update(
            managed_documents::table.filter(managed_documents::id.eq(&document_id)),
        )
        .set((
            managed_documents::document_title.eq(payload.document_title.trim()),
            managed_documents::document_type.eq(payload.document_type.trim()),
            managed_documents::category.eq(payload.category.trim()),
            managed_documents::description.eq(&payload.description),
            managed_documents::remarks.eq(&payload.remarks),
            managed_documents::retention_period.eq(payload.retention_period.unwrap_or(3)),
            managed_documents::updated_at.eq(now()),
        ))
        .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("document not found".to_string()));
        }
        let record = load_document(&mut conn, &document_id)?;
        Ok(document_response(record))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[delete("/api/documents/{id}")]
/// Delete a document and its history.
pub async fn documents_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let deleted = diesel::delete(
            managed_documents::table.filter(managed_documents::id.eq(&document_id)),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("document not found".to_string()));
        }
        Ok(serde_json::json!({ "success": true }))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/documents/{id}/approve",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentActionRequest,
    responses(
        (status = 200, description = "Action recorded", body = DocumentResponse),
        (status = 400, description = "Unknown action", body = ErrorResponse),
        (status = 403, description = "Role not permitted for the action", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/api/documents/{id}/approve")]
/// Advance the approval workflow: review, approve, or reject.
pub async fn documents_approve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<DocumentActionRequest>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let record = load_document(&mut conn, &document_id)?;
        let stamp = now();
        match payload.action.as_str() {
            // Review is the quality-management representative's step.
            "REVIEWED" => {
                if !matches!(context.role, Role::Director | Role::DocumentationOfficer) {
                    return Err(ApiError::Forbidden(
                        "only the QMR may review documents".to_string(),
                    ));
                }
                diesel::update(
                    managed_documents::table.filter(managed_documents::id.eq(&document_id)),
                )
                .set((
                    managed_documents::status.eq("PENDING_APPROVAL"),
                    managed_documents::reviewed_by.eq(Some(context.user.full_name.clone())),
                    managed_documents::updated_at.eq(stamp),
                ))
                .execute(&mut conn)?;
            }
            "APPROVED" => {
                if context.role != Role::Director {
                    return Err(ApiError::Forbidden(
                        "only the director may approve documents".to_string(),
                    ));
                }
                diesel::update(
                    managed_documents::table.filter(managed_documents::id.eq(&document_id)),
                )
                .set((
                    managed_documents::status.eq("APPROVED"),
                    managed_documents::approved_by.eq(Some(context.user.full_name.clone())),
                    managed_documents::effective_date.eq(Some(stamp)),
                    managed_documents::updated_at.eq(stamp),
                ))
                .execute(&mut conn)?;
            }
            "REJECTED" => {
                diesel::update(
                    managed_documents::table.filter(managed_documents::id.eq(&document_id)),
                )
                .set((
                    managed_documents::status.eq("DRAFT"),
                    managed_documents::updated_at.eq(stamp),
                ))
                .execute(&mut conn)?;
            }
            other => {
                return Err(ApiError::BadRequest(format!("unknown action: {other}")));
            }
        }
        record_approval(&mut conn, &record, &context, &payload.action, payload.comments)?;
        let record = load_document(&mut conn, &document_id)?;
        Ok(document_response(record))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/documents/{id}/revise",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentReviseRequest,
    responses(
        (status = 200, description = "New revision opened", body = DocumentResponse),
        (status = 400, description = "Missing change summary", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/api/documents/{id}/revise")]
/// Cut a new revision: bump the number, reset to DRAFT, clear sign-offs.
pub async fn documents_revise(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<DocumentReviseRequest>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.change_summary.trim().is_empty() {
            return Err(ApiError::BadRequest("changeSummary is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let record = load_document(&mut conn, &document_id)?;
        let next_revision = record.current_revision + 1;
        let stamp = now();
        let file_path = payload
            .file_path
            .clone()
            .unwrap_or_else(|| record.file_path.clone());
        diesel::update(managed_documents::table.filter(managed_documents::id.eq(&document_id)))
            .set((
                managed_documents::current_revision.eq(next_revision),
                managed_documents::status.eq("DRAFT"),
                managed_documents::reviewed_by.eq(None::<String>),
                managed_documents::approved_by.eq(None::<String>),
                managed_documents::effective_date.eq(None::<NaiveDateTime>),
                managed_documents::revision_date.eq(Some(stamp)),
                managed_documents::file_path.eq(&file_path),
                managed_documents::updated_at.eq(stamp),
            ))
            .execute(&mut conn)?;

        let revision = DocumentRevision {
            id: Uuid::new_v4().to_string(),
            document_id: record.id.clone(),
            revision_number: next_revision,
            change_summary: payload.change_summary.trim().to_string(),
            reason_for_change: payload.reason_for_change,
            file_path,
            prepared_by: context.user.full_name.clone(),
            status: "DRAFT".to_string(),
            created_at: stamp,
        };
        diesel::insert_into(document_revisions::table)
            .values(&revision)
            .execute(&mut conn)?;

        let record = load_document(&mut conn, &document_id)?;
        record_approval(&mut conn, &record, &context, "SUBMITTED", None)?;
        Ok(document_response(record))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/documents/{id}/distribute",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentDistributeRequest,
    responses(
        (status = 201, description = "Distribution recorded", body = DistributionEntry),
        (status = 400, description = "Document not approved or missing recipient", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/api/documents/{id}/distribute")]
/// Distribute an approved document to a recipient.
pub async fn documents_distribute(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<DocumentDistributeRequest>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.distributed_to.trim().is_empty() {
            return Err(ApiError::BadRequest("distributedTo is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let record = load_document(&mut conn, &document_id)?;
        if record.status != "APPROVED" {
            return Err(ApiError::BadRequest(
                "only approved documents can be distributed".to_string(),
            ));
        }
        let distribution = DocumentDistribution {
            id: Uuid::new_v4().to_string(),
            document_id: record.id,
            distributed_to: payload.distributed_to.trim().to_string(),
            distribution_method: payload
                .distribution_method
                .unwrap_or_else(|| "portal".to_string()),
            distributed_by: context.user.full_name.clone(),
            distributed_at: now(),
            acknowledged_at: None,
        };
        diesel::insert_into(document_distributions::table)
            .values(&distribution)
            .execute(&mut conn)?;
        Ok(DistributionEntry {
            id: distribution.id,
            distributed_to: distribution.distributed_to,
            distribution_method: distribution.distribution_method,
            distributed_by: distribution.distributed_by,
            distributed_at: distribution.distributed_at.and_utc().to_rfc3339(),
            acknowledged_at: String::new(),
        })
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    patch,
    path = "/documents/{id}/distribute",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentAcknowledgeRequest,
    responses(
        (status = 200, description = "Distribution acknowledged", body = DistributionEntry),
        (status = 404, description = "Distribution not found", body = ErrorResponse)
    ),
    tag = "documents"
)]
#[patch("/api/documents/{id}/distribute")]
/// Acknowledge receipt of a distributed document.
pub async fn documents_acknowledge(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<DocumentAcknowledgeRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let document_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let stamp = now();
        let updated = diesel::update(
            document_distributions::table
                .filter(document_distributions::id.eq(&payload.distribution_id))
                .filter(document_distributions::document_id.eq(&document_id)),
        )
        .set(document_distributions::acknowledged_at.eq(Some(stamp)))
        .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("distribution not found".to_string()));
        }
        let distribution = document_distributions::table
            .filter(document_distributions::id.eq(&payload.distribution_id))
            .first::<DocumentDistribution>(&mut conn)?;
        Ok(DistributionEntry {
            id: distribution.id,
            distributed_to: distribution.distributed_to,
            distribution_method: distribution.distribution_method,
            distributed_by: distribution.distributed_by,
            distributed_at: distribution.distributed_at.and_utc().to_rfc3339(),
            acknowledged_at: fmt_opt(distribution.acknowledged_at),
        })
    })
    .await;
    respond(result, StatusCode::OK)
}
