//! Vessel assignment endpoints: placement, extension, and sign-off.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, patch, post, web};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Assignment, Crew};
use crate::schema::{assignments, crew};

use super::{ApiError, AppState, Conn, ErrorResponse, conn, now, parse_datetime, require_auth, respond};

const ASSIGNMENT_STATUSES: &[&str] = &["PLANNED", "ONBOARD", "PLANNED_OFFBOARD", "COMPLETED"];

/// Query filters on the assignment listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFilters {
    /// Restrict to a vessel name (exact match).
    pub vessel_name: Option<String>,
    /// Comma-separated status list.
    pub statuses: Option<String>,
}

/// Request payload for placing crew aboard a vessel.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCreateRequest {
    /// Crew member to place.
    pub crew_id: String,
    /// Vessel record id, when known.
    pub vessel_id: Option<String>,
    /// Vessel name (required; imports may predate vessel records).
    pub vessel_name: String,
    /// Rank for this placement.
    pub rank: Option<String>,
    /// Assignment status (defaults to ONBOARD).
    pub status: Option<String>,
    /// Sign-on, RFC 3339 or YYYY-MM-DD.
    pub sign_on: Option<String>,
    /// Sign-off, RFC 3339 or YYYY-MM-DD.
    pub sign_off: Option<String>,
}

/// Request payload for extending an assignment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentExtendRequest {
    /// New planned sign-off, RFC 3339 or YYYY-MM-DD.
    pub sign_off: String,
}

/// Assignment as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    /// Assignment identifier.
    pub id: String,
    /// Crew member placed.
    pub crew_id: String,
    /// Crew member's full name.
    pub crew_name: String,
    /// Vessel record id, when linked.
    pub vessel_id: Option<String>,
    /// Vessel name.
    pub vessel_name: String,
    /// Rank for this placement.
    pub rank: String,
    /// Assignment status.
    pub status: String,
    /// Sign-on, ISO-8601, empty when unset.
    pub sign_on: String,
    /// Sign-off, ISO-8601, empty while open.
    pub sign_off: String,
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn assignment_response(record: Assignment, crew_name: String) -> AssignmentResponse {
    AssignmentResponse {
        id: record.id,
        crew_id: record.crew_id,
        crew_name,
        vessel_id: record.vessel_id,
        vessel_name: record.vessel_name,
        rank: record.rank,
        status: record.status,
        sign_on: fmt_opt(record.sign_on),
        sign_off: fmt_opt(record.sign_off),
    }
}

fn load_assignment(conn: &mut Conn, assignment_id: &str) -> Result<Assignment, ApiError> {
    assignments::table
        .filter(assignments::id.eq(assignment_id))
        .first::<Assignment>(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("assignment not found".to_string()))
}

#[utoipa::path(
    get,
    path = "/assignments",
    params(
        ("vesselName" = Option<String>, Query, description = "Restrict to a vessel name"),
        ("statuses" = Option<String>, Query, description = "Comma-separated status list")
    ),
    responses(
        (status = 200, description = "Assignment listing", body = [AssignmentResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "assignments"
)]
#[get("/api/assignments")]
/// List assignments, optionally filtered by vessel and status.
pub async fn assignments_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<AssignmentFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let mut query = assignments::table
            .inner_join(crew::table)
            .order(assignments::created_at.desc())
            .into_boxed();
        if let Some(vessel_name) = filters.vessel_name.filter(|value| !value.is_empty()) {
            query = query.filter(assignments::vessel_name.eq(vessel_name));
        }
        if let Some(statuses) = filters.statuses.filter(|value| !value.is_empty()) {
            let wanted: Vec<String> = statuses
                .split(',')
                .map(|status| status.trim().to_string())
                .filter(|status| !status.is_empty())
                .collect();
            query = query.filter(assignments::status.eq_any(wanted));
        }
        let rows: Vec<(Assignment, Crew)> = query.load(&mut conn)?;
        let listing: Vec<AssignmentResponse> = rows
            .into_iter()
            .map(|(record, member)| assignment_response(record, member.full_name))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/assignments",
    request_body = AssignmentCreateRequest,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentResponse),
        (status = 400, description = "Invalid payload or crew already has an open assignment", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "assignments"
)]
#[post("/api/assignments")]
/// Place a crew member aboard a vessel.
pub async fn assignments_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<AssignmentCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.crew_id.trim().is_empty() || payload.vessel_name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "crewId and vesselName are required".to_string(),
            ));
        }
        let mut conn = conn(&pool)?;
        let member = crew::table
            .filter(crew::id.eq(&payload.crew_id))
            .first::<Crew>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("crew not found".to_string()))?;

        // A crew member may hold at most one open assignment.
        let open: i64 = assignments::table
            .filter(assignments::crew_id.eq(&payload.crew_id))
            .filter(assignments::sign_off.is_null())
            .count()
            .get_result(&mut conn)?;
        if open > 0 {
            return Err(ApiError::BadRequest(
                "crew already has an open assignment".to_string(),
            ));
        }

        let status = payload.status.unwrap_or_else(|| "ONBOARD".to_string());
        if !ASSIGNMENT_STATUSES.contains(&status.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "invalid status, expected one of {}",
                ASSIGNMENT_STATUSES.join(", ")
            )));
        }

        let sign_on = payload
            .sign_on
            .as_deref()
            .map(parse_datetime)
            .transpose()
            .map_err(|_| ApiError::BadRequest("invalid signOn".to_string()))?;
        let sign_off = payload
            .sign_off
            .as_deref()
            .map(parse_datetime)
            .transpose()
            .map_err(|_| ApiError::BadRequest("invalid signOff".to_string()))?;
        if let (Some(on), Some(off)) = (sign_on, sign_off) {
            if off <= on {
                return Err(ApiError::BadRequest(
                    "signOff must be after signOn".to_string(),
                ));
            }
        }

        let record = Assignment {
            id: Uuid::new_v4().to_string(),
            crew_id: payload.crew_id.clone(),
            vessel_id: payload.vessel_id.filter(|id| !id.is_empty()),
            vessel_name: payload.vessel_name.trim().to_string(),
            rank: payload.rank.unwrap_or_else(|| member.rank.clone()),
            status,
            sign_on,
            sign_off,
            created_at: now(),
        };
        diesel::insert_into(assignments::table)
            .values(&record)
            .execute(&mut conn)?;
        diesel::update(crew::table.filter(crew::id.eq(&payload.crew_id)))
            .set((
                crew::vessel_name.eq(&record.vessel_name),
                crew::updated_at.eq(now()),
            ))
            .execute(&mut conn)?;
        Ok(assignment_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    patch,
    path = "/assignments/{id}/extend",
    params(("id" = String, Path, description = "Assignment identifier")),
    request_body = AssignmentExtendRequest,
    responses(
        (status = 200, description = "Assignment extended", body = AssignmentResponse),
        (status = 400, description = "New sign-off does not postdate sign-on", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assignments"
)]
#[patch("/api/assignments/{id}/extend")]
/// Push back the planned sign-off date of an assignment.
pub async fn assignments_extend(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<AssignmentExtendRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let assignment_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let new_sign_off = parse_datetime(&payload.sign_off)
            .map_err(|_| ApiError::BadRequest("invalid signOff".to_string()))?;
        let mut conn = conn(&pool)?;
        let record = load_assignment(&mut conn, &assignment_id)?;
        if let Some(sign_on) = record.sign_on {
            if new_sign_off <= sign_on {
                return Err(ApiError::BadRequest(
                    "signOff must be after signOn".to_string(),
                ));
            }
        }
        diesel::update(assignments::table.filter(assignments::id.eq(&assignment_id)))
            .set(assignments::sign_off.eq(Some(new_sign_off)))
            .execute(&mut conn)?;
        let record = load_assignment(&mut conn, &assignment_id)?;
        let member = crew::table
            .filter(crew::id.eq(&record.crew_id))
            .first::<Crew>(&mut conn)?;
        Ok(assignment_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/assignments/{id}/sign-off",
    params(("id" = String, Path, description = "Assignment identifier")),
    responses(
        (status = 200, description = "Assignment signed off", body = AssignmentResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "assignments"
)]
#[post("/api/assignments/{id}/sign-off")]
/// Complete an assignment: stamp sign-off and mark it COMPLETED.
pub async fn assignments_sign_off(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let assignment_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let record = load_assignment(&mut conn, &assignment_id)?;
        let stamp = now();
        diesel::update(assignments::table.filter(assignments::id.eq(&assignment_id)))
            .set((
                assignments::sign_off.eq(Some(stamp)),
                assignments::status.eq("COMPLETED"),
            ))
            .execute(&mut conn)?;
        diesel::update(crew::table.filter(crew::id.eq(&record.crew_id)))
            .set((
                crew::vessel_name.eq(None::<String>),
                crew::updated_at.eq(stamp),
            ))
            .execute(&mut conn)?;
        let record = load_assignment(&mut conn, &assignment_id)?;
        let member = crew::table
            .filter(crew::id.eq(&record.crew_id))
            .first::<Crew>(&mut conn)?;
        Ok(assignment_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::OK)
}
