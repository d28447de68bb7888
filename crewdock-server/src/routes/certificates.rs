//! Crew certificate endpoints, including the expiry window report.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, delete, get, post, put, web};
use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Certificate, Crew};
use crate::schema::{certificates, crew};

use super::{ApiError, AppState, ErrorResponse, conn, now, parse_datetime, require_auth, respond};

/// Query filters on the certificate listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFilters {
    /// Restrict to one crew member.
    pub crew_id: Option<String>,
}

/// Query parameters for the expiry window report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryWindow {
    /// Window length in days (defaults to 90).
    pub days: Option<i64>,
}

/// Request payload for creating or updating a certificate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    /// Owning crew member, required on create.
    pub crew_id: Option<String>,
    /// Certificate type, required.
    pub cert_type: String,
    /// Certificate number.
    pub cert_number: Option<String>,
    /// Issue date, RFC 3339 or YYYY-MM-DD.
    pub issue_date: Option<String>,
    /// Expiry date, RFC 3339 or YYYY-MM-DD.
    pub expiry_date: Option<String>,
    /// Issuing authority.
    pub issuer: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Certificate as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    /// Certificate identifier.
    pub id: String,
    /// Owning crew member.
    pub crew_id: String,
    /// Crew member's full name.
    pub crew_name: String,
    /// Certificate type.
    pub cert_type: String,
    /// Certificate number.
    pub cert_number: Option<String>,
    /// Issue date, ISO-8601, empty when unset.
    pub issue_date: String,
    /// Expiry date, ISO-8601, empty when open-ended.
    pub expiry_date: String,
    /// Issuing authority.
    pub issuer: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn certificate_response(record: Certificate, crew_name: String) -> CertificateResponse {
    CertificateResponse {
        id: record.id,
        crew_id: record.crew_id,
        crew_name,
        cert_type: record.cert_type,
        cert_number: record.cert_number,
        issue_date: fmt_opt(record.issue_date),
        expiry_date: fmt_opt(record.expiry_date),
        issuer: record.issuer,
        remarks: record.remarks,
    }
}

fn parse_opt_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDateTime>, ApiError> {
    value
        .filter(|raw| !raw.is_empty())
        .map(parse_datetime)
        .transpose()
        .map_err(|_| ApiError::BadRequest(format!("invalid {field}")))
}

#[utoipa::path(
    get,
    path = "/certificates",
    params(("crewId" = Option<String>, Query, description = "Restrict to one crew member")),
    responses(
        (status = 200, description = "Certificate listing", body = [CertificateResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "certificates"
)]
#[get("/api/certificates")]
/// List certificates, optionally filtered by crew member.
pub async fn certificates_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<CertificateFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let mut query = certificates::table
            .inner_join(crew::table)
            .order(certificates::expiry_date.asc())
            .into_boxed();
        if let Some(crew_id) = filters.crew_id.filter(|value| !value.is_empty()) {
            query = query.filter(certificates::crew_id.eq(crew_id));
        }
        let rows: Vec<(Certificate, Crew)> = query.load(&mut conn)?;
        let listing: Vec<CertificateResponse> = rows
            .into_iter()
            .map(|(record, member)| certificate_response(record, member.full_name))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/certificates/expiring",
    params(("days" = Option<i64>, Query, description = "Window length in days, default 90")),
    responses(
        (status = 200, description = "Certificates expiring inside the window", body = [CertificateResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "certificates"
)]
#[get("/api/certificates/expiring")]
/// List certificates that expire within the given window (expired ones included).
pub async fn certificates_expiring(
    state: web::Data<AppState>,
    req: HttpRequest,
    window: web::Query<ExpiryWindow>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let days = window.into_inner().days.unwrap_or(90).max(0);
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let cutoff = now() + Duration::days(days);
        let rows: Vec<(Certificate, Crew)> = certificates::table
            .inner_join(crew::table)
            .filter(certificates::expiry_date.is_not_null())
            .filter(certificates::expiry_date.le(cutoff))
            .order(certificates::expiry_date.asc())
            .load(&mut conn)?;
        let listing: Vec<CertificateResponse> = rows
            .into_iter()
            .map(|(record, member)| certificate_response(record, member.full_name))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/certificates",
    request_body = CertificatePayload,
    responses(
        (status = 201, description = "Certificate created", body = CertificateResponse),
        (status = 400, description = "Missing crew id or type", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "certificates"
)]
#[post("/api/certificates")]
/// Create a certificate for a crew member.
pub async fn certificates_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<CertificatePayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let crew_id = payload
            .crew_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::BadRequest("crewId is required".to_string()))?
            .to_string();
        if payload.cert_type.trim().is_empty() {
            return Err(ApiError::BadRequest("certType is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let member = crew::table
            .filter(crew::id.eq(&crew_id))
            .first::<Crew>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("crew not found".to_string()))?;
        let record = Certificate {
            id: Uuid::new_v4().to_string(),
            crew_id,
            cert_type: payload.cert_type.trim().to_string(),
            cert_number: payload.cert_number,
            issue_date: parse_opt_date(payload.issue_date.as_deref(), "issueDate")?,
            expiry_date: parse_opt_date(payload.expiry_date.as_deref(), "expiryDate")?,
            issuer: payload.issuer,
            remarks: payload.remarks,
            created_at: now(),
        };
        diesel::insert_into(certificates::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(certificate_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/certificates/{id}",
    params(("id" = String, Path, description = "Certificate identifier")),
    request_body = CertificatePayload,
    responses(
        (status = 200, description = "Certificate updated", body = CertificateResponse),
        (status = 404, description = "Certificate not found", body = ErrorResponse)
    ),
    tag = "certificates"
)]
#[put("/api/certificates/{id}")]
/// Update a certificate.
pub async fn certificates_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<CertificatePayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let cert_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.cert_type.trim().is_empty() {
            return Err(ApiError::BadRequest("certType is required".to_string()));
        }
        let issue_date = parse_opt_date(payload.issue_date.as_deref(), "issueDate")?;
        let expiry_date = parse_opt_date(payload.expiry_date.as_deref(), "expiryDate")?;
        let mut conn = conn(&pool)?;
        let updated = diesel::update(certificates::table.filter(certificates::id.eq(&cert_id)))
            .set((
                certificates::cert_type.eq(payload.cert_type.trim()),
                certificates::cert_number.eq(&payload.cert_number),
                certificates::issue_date.eq(issue_date),
                certificates::expiry_date.eq(expiry_date),
                certificates::issuer.eq(&payload.issuer),
                certificates::remarks.eq(&payload.remarks),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("certificate not found".to_string()));
        }
        let (record, member): (Certificate, Crew) = certificates::table
            .inner_join(crew::table)
            .filter(certificates::id.eq(&cert_id))
            .first(&mut conn)?;
        Ok(certificate_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/certificates/{id}",
    params(("id" = String, Path, description = "Certificate identifier")),
    responses(
        (status = 200, description = "Certificate deleted"),
        (status = 404, description = "Certificate not found", body = ErrorResponse)
    ),
    tag = "certificates"
)]
#[delete("/api/certificates/{id}")]
/// Delete a certificate.
pub async fn certificates_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let cert_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let deleted = diesel::delete(certificates::table.filter(certificates::id.eq(&cert_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("certificate not found".to_string()));
        }
        Ok(serde_json::json!({ "success": true }))
    })
    .await;
    respond(result, StatusCode::OK)
}
