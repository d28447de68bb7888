//! Quality-management registers: risks, CPARs, audits, suppliers, complaints.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, web};
use chrono::{Datelike, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Audit, Complaint, CorrectiveAction, RiskOpportunity, Supplier};
use crate::schema::{audits, complaints, corrective_actions, risk_opportunities, suppliers};

use super::{ApiError, AppState, ErrorResponse, conn, now, parse_datetime, require_auth, respond};

fn level_score(level: &str) -> Result<i32, ApiError> {
    match level {
        "LOW" => Ok(1),
        "MEDIUM" => Ok(2),
        "HIGH" => Ok(3),
        other => Err(ApiError::BadRequest(format!(
            "invalid likelihood/impact level: {other}"
        ))),
    }
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn parse_opt_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDateTime>, ApiError> {
    value
        .filter(|raw| !raw.is_empty())
        .map(parse_datetime)
        .transpose()
        .map_err(|_| ApiError::BadRequest(format!("invalid {field}")))
}

/// Request payload for a risk or opportunity register entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskPayload {
    /// RISK or OPPORTUNITY.
    pub kind: String,
    /// Where the entry was identified, required.
    pub source: String,
    /// Description, required.
    pub description: String,
    /// Likelihood level (LOW/MEDIUM/HIGH), risks only.
    pub likelihood: Option<String>,
    /// Impact level (LOW/MEDIUM/HIGH), risks only.
    pub impact: Option<String>,
    /// Mitigation or pursuit actions.
    pub actions: Option<String>,
    /// Responsible person.
    pub responsible_person: Option<String>,
    /// Target completion date.
    pub target_date: Option<String>,
    /// Residual risk after actions.
    pub residual_risk: Option<String>,
}

/// Risk register entry as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskResponse {
    /// Entry identifier.
    pub id: String,
    /// RISK or OPPORTUNITY.
    pub kind: String,
    /// Where the entry was identified.
    pub source: String,
    /// Description.
    pub description: String,
    /// Likelihood level, risks only.
    pub likelihood: Option<String>,
    /// Impact level, risks only.
    pub impact: Option<String>,
    /// likelihood x impact, risks only.
    pub risk_score: Option<i32>,
    /// Mitigation or pursuit actions.
    pub actions: String,
    /// Responsible person.
    pub responsible_person: Option<String>,
    /// Target completion date, ISO-8601, empty when unset.
    pub target_date: String,
    /// Residual risk after actions.
    pub residual_risk: Option<String>,
    /// Register status.
    pub status: String,
    /// Who recorded the entry.
    pub created_by: String,
}

impl From<RiskOpportunity> for RiskResponse {
    fn from(entry: RiskOpportunity) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            source: entry.source,
            description: entry.description,
            likelihood: entry.likelihood,
            impact: entry.impact,
            risk_score: entry.risk_score,
            actions: entry.actions,
            responsible_person: entry.responsible_person,
            target_date: fmt_opt(entry.target_date),
            residual_risk: entry.residual_risk,
            status: entry.status,
            created_by: entry.created_by,
        }
    }
}

#[utoipa::path(
    get,
    path = "/qms/risks",
    responses(
        (status = 200, description = "Risk register", body = [RiskResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[get("/api/qms/risks")]
/// List the risk and opportunity register, newest first.
pub async fn risks_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = risk_opportunities::table
            .order(risk_opportunities::created_at.desc())
            .load::<RiskOpportunity>(&mut conn)?;
        Ok(rows.into_iter().map(RiskResponse::from).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/qms/risks",
    request_body = RiskPayload,
    responses(
        (status = 201, description = "Entry registered", body = RiskResponse),
        (status = 400, description = "Invalid kind or levels", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[post("/api/qms/risks")]
/// Register a risk or opportunity; risks get a likelihood x impact score.
pub async fn risks_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<RiskPayload>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if !matches!(payload.kind.as_str(), "RISK" | "OPPORTUNITY") {
            return Err(ApiError::BadRequest(
                "kind must be RISK or OPPORTUNITY".to_string(),
            ));
        }
        if payload.source.trim().is_empty() || payload.description.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "source and description are required".to_string(),
            ));
        }
        let (likelihood, impact, risk_score) = if payload.kind == "RISK" {
            let likelihood = payload
                .likelihood
                .as_deref()
                .ok_or_else(|| ApiError::BadRequest("likelihood is required for risks".to_string()))?;
            let impact = payload
                .impact
                .as_deref()
                .ok_or_else(|| ApiError::BadRequest("impact is required for risks".to_string()))?;
            let score = level_score(likelihood)? * level_score(impact)?;
            (
                Some(likelihood.to_string()),
                Some(impact.to_string()),
                Some(score),
            )
        } else {
            (None, None, None)
        };
        let mut conn = conn(&pool)?;
        let entry = RiskOpportunity {
            id: Uuid::new_v4().to_string(),
            kind: payload.kind,
            source: payload.source.trim().to_string(),
            description: payload.description.trim().to_string(),
            likelihood,
            impact,
            risk_score,
            actions: payload.actions.unwrap_or_default(),
            responsible_person: payload.responsible_person,
            target_date: parse_opt_date(payload.target_date.as_deref(), "targetDate")?,
            residual_risk: payload.residual_risk,
            status: "OPEN".to_string(),
            created_by: context.user.full_name.clone(),
            created_at: now(),
        };
        diesel::insert_into(risk_opportunities::table)
            .values(&entry)
            .execute(&mut conn)?;
        Ok(RiskResponse::from(entry))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Request payload for a corrective action report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CparPayload {
    /// Where the problem was detected, required.
    pub source: String,
    /// Problem description, required.
    pub problem_description: String,
    /// Detection date, defaults to now.
    pub detected_date: Option<String>,
    /// Who detected the problem.
    pub detected_by: Option<String>,
    /// Root cause analysis.
    pub root_cause: Option<String>,
    /// Problem category.
    pub category: Option<String>,
    /// Proposed corrective action.
    pub proposed_action: Option<String>,
    /// Responsible person.
    pub responsible_person: Option<String>,
    /// Target completion date.
    pub target_date: Option<String>,
}

/// Corrective action report as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CparResponse {
    /// Record identifier.
    pub id: String,
    /// Sequential CAR number.
    pub car_number: String,
    /// Where the problem was detected.
    pub source: String,
    /// Problem description.
    pub problem_description: String,
    /// Detection date, ISO-8601.
    pub detected_date: String,
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
    /// Target completion date, ISO-8601, empty when unset.
    pub target_date: String,
    /// Report status.
    pub status: String,
}

impl From<CorrectiveAction> for CparResponse {
    fn from(record: CorrectiveAction) -> Self {
        Self {
            id: record.id,
            car_number: record.car_number,
            source: record.source,
            problem_description: record.problem_description,
            detected_date: record.detected_date.and_utc().to_rfc3339(),
            detected_by: record.detected_by,
            root_cause: record.root_cause,
            category: record.category,
            proposed_action: record.proposed_action,
            responsible_person: record.responsible_person,
            target_date: fmt_opt(record.target_date),
            status: record.status,
        }
    }
}

#[utoipa::path(
    get,
    path = "/qms/cpar",
    responses(
        (status = 200, description = "CPAR register", body = [CparResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[get("/api/qms/cpar")]
/// List corrective action reports, newest first.
pub async fn cpar_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = corrective_actions::table
            .order(corrective_actions::created_at.desc())
            .load::<CorrectiveAction>(&mut conn)?;
        Ok(rows.into_iter().map(CparResponse::from).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/qms/cpar",
    request_body = CparPayload,
    responses(
        (status = 201, description = "Report opened with a generated CAR number", body = CparResponse),
        (status = 400, description = "Missing source or description", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[post("/api/qms/cpar")]
/// Open a corrective action report with a CAR-<year>-<seq> number.
pub async fn cpar_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<CparPayload>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.source.trim().is_empty() || payload.problem_description.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "source and problemDescription are required".to_string(),
            ));
        }
        let mut conn = conn(&pool)?;
        let stamp = now();
        let year = stamp.year();
        let seq: i64 = corrective_actions::table
            .filter(corrective_actions::car_number.like(format!("CAR-{year}-%")))
            .count()
            .get_result(&mut conn)?;
        let record = CorrectiveAction {
            id: Uuid::new_v4().to_string(),
            car_number: format!("CAR-{year}-{:03}", seq + 1),
            source: payload.source.trim().to_string(),
            problem_description: payload.problem_description.trim().to_string(),
            detected_date: parse_opt_date(payload.detected_date.as_deref(), "detectedDate")?
                .unwrap_or(stamp),
            detected_by: payload
                .detected_by
                .unwrap_or_else(|| context.user.full_name.clone()),
            root_cause: payload.root_cause,
            category: payload.category,
            proposed_action: payload.proposed_action,
            responsible_person: payload.responsible_person,
            target_date: parse_opt_date(payload.target_date.as_deref(), "targetDate")?,
            status: "OPEN".to_string(),
            created_at: stamp,
        };
        diesel::insert_into(corrective_actions::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(CparResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Request payload for an audit record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditPayload {
    /// Audit number, required.
    pub audit_number: String,
    /// INTERNAL or EXTERNAL.
    pub audit_type: String,
    /// Audit scope, required.
    pub scope: String,
    /// Lead auditor, required.
    pub auditor: String,
    /// Planned date.
    pub planned_date: Option<String>,
    /// Conducted date.
    pub conducted_date: Option<String>,
    /// Findings summary.
    pub findings: Option<String>,
}

/// Audit record as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
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
    /// Planned date, ISO-8601, empty when unset.
    pub planned_date: String,
    /// Conducted date, ISO-8601, empty when unset.
    pub conducted_date: String,
    /// Findings summary.
    pub findings: Option<String>,
    /// Audit status.
    pub status: String,
}

impl From<Audit> for AuditResponse {
    fn from(record: Audit) -> Self {
        Self {
            id: record.id,
            audit_number: record.audit_number,
            audit_type: record.audit_type,
            scope: record.scope,
            auditor: record.auditor,
            planned_date: fmt_opt(record.planned_date),
            conducted_date: fmt_opt(record.conducted_date),
            findings: record.findings,
            status: record.status,
        }
    }
}

#[utoipa::path(
    get,
    path = "/qms/audits",
    responses(
        (status = 200, description = "Audit register", body = [AuditResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[get("/api/qms/audits")]
/// List audit records, newest first.
pub async fn audits_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = audits::table
            .order(audits::created_at.desc())
            .load::<Audit>(&mut conn)?;
        Ok(rows.into_iter().map(AuditResponse::from).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/qms/audits",
    request_body = AuditPayload,
    responses(
        (status = 201, description = "Audit registered", body = AuditResponse),
        (status = 400, description = "Invalid type or missing fields", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[post("/api/qms/audits")]
/// Register an audit.
pub async fn audits_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<AuditPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if !matches!(payload.audit_type.as_str(), "INTERNAL" | "EXTERNAL") {
            return Err(ApiError::BadRequest(
                "auditType must be INTERNAL or EXTERNAL".to_string(),
            ));
        }
        if payload.audit_number.trim().is_empty()
            || payload.scope.trim().is_empty()
            || payload.auditor.trim().is_empty()
        {
            return Err(ApiError::BadRequest(
                "auditNumber, scope, and auditor are required".to_string(),
            ));
        }
        let conducted_date = parse_opt_date(payload.conducted_date.as_deref(), "conductedDate")?;
        let mut conn = conn(&pool)?;
        let record = Audit {
            id: Uuid::new_v4().to_string(),
            audit_number: payload.audit_number.trim().to_string(),
            audit_type: payload.audit_type,
            scope: payload.scope.trim().to_string(),
            auditor: payload.auditor.trim().to_string(),
            planned_date: parse_opt_date(payload.planned_date.as_deref(), "plannedDate")?,
            conducted_date,
            findings: payload.findings,
            status: if conducted_date.is_some() {
                "CONDUCTED".to_string()
            } else {
                "PLANNED".to_string()
            },
            created_at: now(),
        };
        diesel::insert_into(audits::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(AuditResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Request payload for a supplier register entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    /// Supplier name, required.
    pub name: String,
    /// Service provided, required.
    pub service_type: String,
    /// Contact person.
    pub contact: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Latest evaluation score.
    pub evaluation_score: Option<i32>,
    /// Whether the supplier is approved.
    pub approved: Option<bool>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Supplier as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
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
}

impl From<Supplier> for SupplierResponse {
    fn from(record: Supplier) -> Self {
        Self {
            id: record.id,
            name: record.name,
            service_type: record.service_type,
            contact: record.contact,
            email: record.email,
            evaluation_score: record.evaluation_score,
            approved: record.approved,
            remarks: record.remarks,
        }
    }
}

#[utoipa::path(
    get,
    path = "/qms/suppliers",
    responses(
        (status = 200, description = "Supplier register", body = [SupplierResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[get("/api/qms/suppliers")]
/// List the approved-supplier register alphabetically.
pub async fn suppliers_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = suppliers::table
            .order(suppliers::name.asc())
            .load::<Supplier>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(SupplierResponse::from)
            .collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/qms/suppliers",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Supplier registered", body = SupplierResponse),
        (status = 400, description = "Missing name or service type", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[post("/api/qms/suppliers")]
/// Register a supplier.
pub async fn suppliers_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<SupplierPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.name.trim().is_empty() || payload.service_type.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "name and serviceType are required".to_string(),
            ));
        }
        let mut conn = conn(&pool)?;
        let record = Supplier {
            id: Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            service_type: payload.service_type.trim().to_string(),
            contact: payload.contact,
            email: payload.email,
            evaluation_score: payload.evaluation_score,
            approved: payload.approved.unwrap_or(false),
            remarks: payload.remarks,
            created_at: now(),
        };
        diesel::insert_into(suppliers::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(SupplierResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Request payload for a complaint record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintPayload {
    /// Complaint source, required.
    pub source: String,
    /// Complaint description, required.
    pub description: String,
    /// When the complaint was received, defaults to now.
    pub received_date: Option<String>,
    /// Severity level.
    pub severity: Option<String>,
}

/// Complaint as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    /// Complaint identifier.
    pub id: String,
    /// Sequential complaint number.
    pub complaint_number: String,
    /// Complaint source.
    pub source: String,
    /// Complaint description.
    pub description: String,
    /// When the complaint was received, ISO-8601.
    pub received_date: String,
    /// Who received the complaint.
    pub received_by: String,
    /// Severity level.
    pub severity: Option<String>,
    /// Resolution summary.
    pub resolution: Option<String>,
    /// Complaint status.
    pub status: String,
}

impl From<Complaint> for ComplaintResponse {
    fn from(record: Complaint) -> Self {
        Self {
            id: record.id,
            complaint_number: record.complaint_number,
            source: record.source,
            description: record.description,
            received_date: record.received_date.and_utc().to_rfc3339(),
            received_by: record.received_by,
            severity: record.severity,
            resolution: record.resolution,
            status: record.status,
        }
    }
}

#[utoipa::path(
    get,
    path = "/qms/complaints",
    responses(
        (status = 200, description = "Complaint register", body = [ComplaintResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[get("/api/qms/complaints")]
/// List complaints, newest first.
pub async fn complaints_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = complaints::table
            .order(complaints::created_at.desc())
            .load::<Complaint>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(ComplaintResponse::from)
            .collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/qms/complaints",
    request_body = ComplaintPayload,
    responses(
        (status = 201, description = "Complaint registered", body = ComplaintResponse),
        (status = 400, description = "Missing source or description", body = ErrorResponse)
    ),
    tag = "qms"
)]
#[post("/api/qms/complaints")]
/// Register a complaint with a CMP-<year>-<seq> number.
pub async fn complaints_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<ComplaintPayload>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.source.trim().is_empty() || payload.description.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "source and description are required".to_string(),
            ));
        }
        let mut conn = conn(&pool)?;
        let stamp = now();
        let year = stamp.year();
        let seq: i64 = complaints::table
            .filter(complaints::complaint_number.like(format!("CMP-{year}-%")))
            .count()
            .get_result(&mut conn)?;
        let record = Complaint {
            id: Uuid::new_v4().to_string(),
            complaint_number: format!("CMP-{year}-{:03}", seq + 1),
            source: payload.source.trim().to_string(),
            description: payload.description.trim().to_string(),
            received_date: parse_opt_date(payload.received_date.as_deref(), "receivedDate")?
                .unwrap_or(stamp),
            received_by: context.user.full_name.clone(),
            severity: payload.severity,
            resolution: None,
            status: "OPEN".to_string(),
            created_at: stamp,
        };
        diesel::insert_into(complaints::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(ComplaintResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    macro_rules! qms_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(risks_list)
                    .service(risks_create)
                    .service(cpar_list)
                    .service(cpar_create)
                    .service(audits_list)
                    .service(audits_create)
                    .service(suppliers_list)
                    .service(suppliers_create)
                    .service(complaints_list)
                    .service(complaints_create),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn risk_score_is_likelihood_times_impact() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = qms_app!(test_app.state);

        let req = test::TestRequest::post()
            .uri("/api/qms/risks")
            .insert_header(cookie.clone())
            .set_json(RiskPayload {
                kind: "RISK".to_string(),
                source: "Crew planning review".to_string(),
                description: "Single point of failure in manning for tankers".to_string(),
                likelihood: Some("MEDIUM".to_string()),
                impact: Some("HIGH".to_string()),
                actions: Some("Cross-train reserve officers".to_string()),
                responsible_person: None,
                target_date: None,
                residual_risk: None,
            })
            .to_request();
        let created: RiskResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.risk_score, Some(6));
        assert_eq!(created.status, "OPEN");
    }

    #[actix_web::test]
    async fn opportunities_carry_no_score() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = qms_app!(test_app.state);

        let req = test::TestRequest::post()
            .uri("/api/qms/risks")
            .insert_header(cookie.clone())
            .set_json(RiskPayload {
                kind: "OPPORTUNITY".to_string(),
                source: "Owner feedback".to_string(),
                description: "Expand supply of ratings to a second owner".to_string(),
                likelihood: None,
                impact: None,
                actions: None,
                responsible_person: None,
                target_date: None,
                residual_risk: None,
            })
            .to_request();
        let created: RiskResponse = test::call_and_read_body_json(&app, req).await;
        assert!(created.risk_score.is_none());
        assert!(created.likelihood.is_none());
    }

    #[actix_web::test]
    async fn risk_requires_valid_levels() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = qms_app!(test_app.state);

        let req = test::TestRequest::post()
            .uri("/api/qms/risks")
            .insert_header(cookie)
            .set_json(RiskPayload {
                kind: "RISK".to_string(),
                source: "Audit".to_string(),
                description: "Bad levels".to_string(),
                likelihood: Some("SEVERE".to_string()),
                impact: Some("HIGH".to_string()),
                actions: None,
                responsible_person: None,
                target_date: None,
                residual_risk: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn car_numbers_increment_within_a_year() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = qms_app!(test_app.state);
        let year = now().year();

        for seq in 1..=2 {
            let req = test::TestRequest::post()
                .uri("/api/qms/cpar")
                .insert_header(cookie.clone())
                .set_json(CparPayload {
                    source: "Internal audit".to_string(),
                    problem_description: format!("Finding {seq}"),
                    detected_date: None,
                    detected_by: None,
                    root_cause: None,
                    category: None,
                    proposed_action: None,
                    responsible_person: None,
                    target_date: None,
                })
                .to_request();
            let created: CparResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(created.car_number, format!("CAR-{year}-{seq:03}"));
        }
    }

    #[actix_web::test]
    async fn audits_suppliers_complaints_round_trip() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = qms_app!(test_app.state);

        let req = test::TestRequest::post()
            .uri("/api/qms/audits")
            .insert_header(cookie.clone())
            .set_json(AuditPayload {
                audit_number: "IA-2026-01".to_string(),
                audit_type: "INTERNAL".to_string(),
                scope: "Crewing process".to_string(),
                auditor: "QMR".to_string(),
                planned_date: Some("2026-10-01".to_string()),
                conducted_date: None,
                findings: None,
            })
            .to_request();
        let audit: AuditResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(audit.status, "PLANNED");

        let req = test::TestRequest::post()
            .uri("/api/qms/suppliers")
            .insert_header(cookie.clone())
            .set_json(SupplierPayload {
                name: "Harbor Medical Clinic".to_string(),
                service_type: "Pre-employment medicals".to_string(),
                contact: None,
                email: None,
                evaluation_score: Some(4),
                approved: Some(true),
                remarks: None,
            })
            .to_request();
        let supplier: SupplierResponse = test::call_and_read_body_json(&app, req).await;
        assert!(supplier.approved);

        let req = test::TestRequest::post()
            .uri("/api/qms/complaints")
            .insert_header(cookie.clone())
            .set_json(ComplaintPayload {
                source: "Owner".to_string(),
                description: "Late crew change documentation".to_string(),
                received_date: None,
                severity: Some("MEDIUM".to_string()),
            })
            .to_request();
        let complaint: ComplaintResponse = test::call_and_read_body_json(&app, req).await;
        assert!(complaint.complaint_number.starts_with("CMP-"));
        assert_eq!(complaint.status, "OPEN");

        for uri in ["/api/qms/audits", "/api/qms/suppliers", "/api/qms/complaints"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(cookie.clone())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
