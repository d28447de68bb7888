//! Crew record endpoints, including the lifecycle status-transition gate.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, put, web};
use chrono::{NaiveDateTime, NaiveDate};
use crewdock_core::{CrewStatus, TransitionError, authorize_transition, available_transitions};
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Assignment, Certificate, Crew};
use crate::schema::{assignments, certificates, crew};

use super::{ApiError, AppState, Conn, ErrorResponse, conn, now, require_auth, respond};

/// Request payload for creating a crew record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewCreateRequest {
    /// Crew code; generated when omitted.
    pub crew_code: Option<String>,
    /// Full name, required.
    pub full_name: String,
    /// Rank, required.
    pub rank: String,
    /// Vessel currently assigned, if any.
    pub vessel: Option<String>,
    /// Initial lifecycle status (defaults to APPLICANT).
    pub status: Option<String>,
    /// Date of birth, ISO-8601 date.
    pub date_of_birth: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Home address.
    pub address: Option<String>,
    /// Mobile phone.
    pub phone: Option<String>,
}

/// Request payload for updating a crew record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewUpdateRequest {
    /// Full name.
    pub full_name: Option<String>,
    /// Rank.
    pub rank: Option<String>,
    /// Vessel currently assigned.
    pub vessel: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Home address.
    pub address: Option<String>,
    /// Mobile phone.
    pub phone: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crew)]
struct CrewChanges {
    full_name: Option<String>,
    rank: Option<String>,
    vessel_name: Option<String>,
    place_of_birth: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    updated_at: NaiveDateTime,
}

/// Certificate summary embedded in crew listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    /// Certificate identifier.
    pub id: String,
    /// Certificate type.
    pub cert_type: String,
    /// Expiry date, ISO-8601, empty when open-ended.
    pub expiry_date: String,
}

/// Assignment summary embedded in crew listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    /// Assignment identifier.
    pub id: String,
    /// Assignment status.
    pub status: String,
    /// Sign-on, ISO-8601, empty when unset.
    pub sign_on: String,
    /// Sign-off, ISO-8601, empty while open.
    pub sign_off: String,
}

/// Crew record as served by list/fetch endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewResponse {
    /// Crew identifier.
    pub id: String,
    /// Unique crew code.
    pub crew_code: String,
    /// Full name.
    pub full_name: String,
    /// Current rank.
    pub rank: String,
    /// Vessel currently assigned, empty when ashore.
    pub vessel: String,
    /// Lifecycle status.
    pub crew_status: String,
    /// Whether the crew reported to the office.
    pub reported_to_office: bool,
    /// Inactivity reason, when EX_CREW/BLACKLISTED.
    pub inactive_reason: Option<String>,
    /// Certificate summaries.
    pub certificates: Vec<CertificateSummary>,
    /// Assignment summaries.
    pub assignments: Vec<AssignmentSummary>,
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn crew_response(
    record: Crew,
    certs: Vec<Certificate>,
    placements: Vec<Assignment>,
) -> CrewResponse {
    CrewResponse {
        id: record.id,
        crew_code: record.crew_code,
        full_name: record.full_name,
        rank: record.rank,
        vessel: record.vessel_name.unwrap_or_default(),
        crew_status: record.crew_status,
        reported_to_office: record.reported_to_office,
        inactive_reason: record.inactive_reason,
        certificates: certs
            .into_iter()
            .map(|cert| CertificateSummary {
                id: cert.id,
                cert_type: cert.cert_type,
                expiry_date: fmt_opt(cert.expiry_date),
            })
            .collect(),
        assignments: placements
            .into_iter()
            .map(|placement| AssignmentSummary {
                id: placement.id,
                status: placement.status,
                sign_on: fmt_opt(placement.sign_on),
                sign_off: fmt_opt(placement.sign_off),
            })
            .collect(),
    }
}

fn load_crew(conn: &mut Conn, crew_id: &str) -> Result<Crew, ApiError> {
    crew::table
        .filter(crew::id.eq(crew_id))
        .first::<Crew>(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("crew not found".to_string()))
}

#[utoipa::path(
    get,
    path = "/crew",
    responses(
        (status = 200, description = "Crew listing", body = [CrewResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[get("/api/crew")]
/// List all crew with certificate and assignment summaries.
pub async fn crew_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = crew::table
            .order(crew::created_at.desc())
            .load::<Crew>(&mut conn)?;
        let certs = Certificate::belonging_to(&rows)
            .load::<Certificate>(&mut conn)?
            .grouped_by(&rows);
        let placements = Assignment::belonging_to(&rows)
            .load::<Assignment>(&mut conn)?
            .grouped_by(&rows);
        let listing: Vec<CrewResponse> = rows
            .into_iter()
            .zip(certs)
            .zip(placements)
            .map(|((record, certs), placements)| crew_response(record, certs, placements))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/crew",
    request_body = CrewCreateRequest,
    responses(
        (status = 201, description = "Crew created", body = CrewResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[post("/api/crew")]
/// Create a crew record.
pub async fn crew_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<CrewCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.full_name.trim().is_empty() || payload.rank.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "full name and rank are required fields".to_string(),
            ));
        }
        let status = match payload.status.as_deref() {
            Some(value) => CrewStatus::parse(value)
                .map_err(|err| ApiError::BadRequest(err.to_string()))?,
            None => CrewStatus::Applicant,
        };
        let date_of_birth = match payload.date_of_birth.as_deref() {
            Some(value) => Some(
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| ApiError::BadRequest("invalid dateOfBirth".to_string()))?,
            ),
            None => None,
        };
        let mut conn = conn(&pool)?;
        let record = Crew {
            id: Uuid::new_v4().to_string(),
            crew_code: payload
                .crew_code
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| format!("CREW-{}", Uuid::new_v4().simple())),
            full_name: payload.full_name.trim().to_string(),
            rank: payload.rank.trim().to_string(),
            crew_status: status.as_str().to_string(),
            vessel_name: payload.vessel.filter(|value| !value.is_empty()),
            date_of_birth,
            place_of_birth: payload.place_of_birth,
            address: payload.address,
            phone: payload.phone,
            reported_to_office: false,
            reported_to_office_date: None,
            last_offboard_date: None,
            inactive_reason: None,
            offboard_notes: None,
            created_at: now(),
            updated_at: now(),
        };
        diesel::insert_into(crew::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(crew_response(record, Vec::new(), Vec::new()))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/crew/{id}",
    params(("id" = String, Path, description = "Crew identifier")),
    responses(
        (status = 200, description = "Crew record", body = CrewResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[get("/api/crew/{id}")]
/// Fetch a single crew record.
pub async fn crew_get(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let record = load_crew(&mut conn, &crew_id)?;
        let certs = Certificate::belonging_to(&record).load::<Certificate>(&mut conn)?;
        let placements = Assignment::belonging_to(&record).load::<Assignment>(&mut conn)?;
        Ok(crew_response(record, certs, placements))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    put,
    path = "/crew/{id}",
    params(("id" = String, Path, description = "Crew identifier")),
    request_body = CrewUpdateRequest,
    responses(
        (status = 200, description = "Crew updated", body = CrewResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[put("/api/crew/{id}")]
/// Update profile fields on a crew record.
pub async fn crew_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<CrewUpdateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        load_crew(&mut conn, &crew_id)?;
        let changes = CrewChanges {
            full_name: payload.full_name,
            rank: payload.rank,
            vessel_name: payload.vessel,
            place_of_birth: payload.place_of_birth,
            address: payload.address,
            phone: payload.phone,
            updated_at: now(),
        };
        diesel::update(crew::table.filter(crew::id.eq(&crew_id)))
            .set(&changes)
            .execute(&mut conn)?;
        let record = load_crew(&mut conn, &crew_id)?;
        let certs = Certificate::belonging_to(&record).load::<Certificate>(&mut conn)?;
        let placements = Assignment::belonging_to(&record).load::<Assignment>(&mut conn)?;
        Ok(crew_response(record, certs, placements))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/crew/{id}",
    params(("id" = String, Path, description = "Crew identifier")),
    responses(
        (status = 200, description = "Crew deleted"),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[delete("/api/crew/{id}")]
/// Delete a crew record.
pub async fn crew_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let deleted = diesel::delete(crew::table.filter(crew::id.eq(&crew_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("crew not found".to_string()));
        }
        Ok(serde_json::json!({ "success": true }))
    })
    .await;
    respond(result, StatusCode::OK)
}

/// Request payload for a status transition.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    /// Requested status.
    pub new_status: String,
    /// Inactivity reason for EX_CREW/BLACKLISTED moves.
    pub reason: Option<String>,
    /// Offboarding notes.
    pub notes: Option<String>,
}

/// Crew summary returned after a transition.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeCrew {
    /// Crew identifier.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Current rank.
    pub rank: String,
    /// Status before the transition.
    pub previous_status: String,
    /// Status after the transition.
    pub new_status: String,
}

/// Response payload for a status transition.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Updated crew summary.
    pub crew: StatusChangeCrew,
}

#[derive(AsChangeset)]
#[diesel(table_name = crew)]
struct StatusChanges {
    crew_status: String,
    last_offboard_date: Option<NaiveDateTime>,
    reported_to_office: Option<bool>,
    reported_to_office_date: Option<Option<NaiveDateTime>>,
    inactive_reason: Option<Option<String>>,
    offboard_notes: Option<String>,
    updated_at: NaiveDateTime,
}

#[utoipa::path(
    patch,
    path = "/crew/{id}/status",
    params(("id" = String, Path, description = "Crew identifier")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Status changed", body = StatusChangeResponse),
        (status = 400, description = "Invalid transition", body = ErrorResponse),
        (status = 403, description = "Role not permitted", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[patch("/api/crew/{id}/status")]
/// Move a crew record through the lifecycle transition table.
pub async fn crew_status_change(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<StatusChangeRequest>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.new_status.trim().is_empty() {
            return Err(ApiError::BadRequest("new status is required".to_string()));
        }
        let requested = CrewStatus::parse(&payload.new_status)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        let mut conn = conn(&pool)?;
        let record = load_crew(&mut conn, &crew_id)?;
        let current = CrewStatus::parse(&record.crew_status).map_err(|err| {
            ApiError::BadRequest(format!("no transitions defined for stored status: {err}"))
        })?;
        let stamp = now();
        let reason = payload.reason.as_deref().or(payload.notes.as_deref());
        let effects = authorize_transition(current, requested, context.role, reason, stamp)
            .map_err(|err| match err {
                TransitionError::RoleDenied { .. } => ApiError::Forbidden(err.to_string()),
                TransitionError::InvalidTarget { .. } => ApiError::BadRequest(err.to_string()),
            })?;

        let changes = StatusChanges {
            crew_status: requested.as_str().to_string(),
            last_offboard_date: effects.last_offboard_date,
            reported_to_office: effects.mark_reported.then_some(true),
            reported_to_office_date: effects.mark_reported.then_some(Some(stamp)),
            inactive_reason: match (&effects.inactive_reason, effects.clear_inactive_reason) {
                (Some(reason), _) => Some(Some(reason.clone())),
                (None, true) => Some(None),
                (None, false) => None,
            },
            offboard_notes: payload.notes.clone(),
            updated_at: stamp,
        };
        diesel::update(crew::table.filter(crew::id.eq(&crew_id)))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(StatusChangeResponse {
            success: true,
            message: format!(
                "status changed from {} to {}",
                current.as_str(),
                requested.as_str()
            ),
            crew: StatusChangeCrew {
                id: record.id,
                full_name: record.full_name,
                rank: record.rank,
                previous_status: current.as_str().to_string(),
                new_status: requested.as_str().to_string(),
            },
        })
    })
    .await;
    respond(result, StatusCode::OK)
}

/// Available transitions for a crew record and the caller's role.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTransitionsResponse {
    /// Current lifecycle status.
    pub current_status: String,
    /// Statuses the caller may move the record to.
    pub available_transitions: Vec<String>,
    /// Whether the caller may transition at all.
    pub can_transition: bool,
    /// The caller's role.
    pub user_role: String,
}

#[utoipa::path(
    get,
    path = "/crew/{id}/status",
    params(("id" = String, Path, description = "Crew identifier")),
    responses(
        (status = 200, description = "Available transitions", body = AvailableTransitionsResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[get("/api/crew/{id}/status")]
/// Fetch the transitions available to the caller for a crew record.
pub async fn crew_status_options(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let record = load_crew(&mut conn, &crew_id)?;
        let current = CrewStatus::parse(&record.crew_status)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        let (targets, can_transition) = available_transitions(current, context.role);
        Ok(AvailableTransitionsResponse {
            current_status: current.as_str().to_string(),
            available_transitions: targets
                .into_iter()
                .map(|status| status.as_str().to_string())
                .collect(),
            can_transition,
            user_role: context.role.as_str().to_string(),
        })
    })
    .await;
    respond(result, StatusCode::OK)
}

/// Request payload for the office reporting status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStatusRequest {
    /// Crew identifier.
    pub crew_id: String,
    /// Whether the crew reported to the office.
    pub reported_to_office: Option<bool>,
    /// Explicit inactivity reason (moves the record to EX_CREW).
    pub inactive_reason: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/crew/reporting-status",
    request_body = ReportingStatusRequest,
    responses(
        (status = 200, description = "Reporting status updated", body = CrewResponse),
        (status = 400, description = "Missing crew id", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "crew"
)]
#[patch("/api/crew/reporting-status")]
/// Flip a crew record between STANDBY and EX_CREW based on office reporting.
pub async fn crew_reporting_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<ReportingStatusRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.crew_id.trim().is_empty() {
            return Err(ApiError::BadRequest("crew id is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        load_crew(&mut conn, &payload.crew_id)?;
        let stamp = now();

        let changes = if let Some(reason) = payload
            .inactive_reason
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            StatusChanges {
                crew_status: CrewStatus::ExCrew.as_str().to_string(),
                last_offboard_date: None,
                reported_to_office: Some(false),
                reported_to_office_date: Some(None),
                inactive_reason: Some(Some(reason.to_string())),
                offboard_notes: Some(format!("{reason} - {}", stamp.format("%Y-%m-%d"))),
                updated_at: stamp,
            }
        } else {
            match payload.reported_to_office {
                Some(true) => StatusChanges {
                    crew_status: CrewStatus::Standby.as_str().to_string(),
                    last_offboard_date: None,
                    reported_to_office: Some(true),
                    reported_to_office_date: Some(Some(stamp)),
                    inactive_reason: Some(None),
                    offboard_notes: None,
                    updated_at: stamp,
                },
                Some(false) => StatusChanges {
                    crew_status: CrewStatus::ExCrew.as_str().to_string(),
                    last_offboard_date: None,
                    reported_to_office: Some(false),
                    reported_to_office_date: Some(None),
                    inactive_reason: Some(Some("Did not report".to_string())),
                    offboard_notes: Some("Did not report to office after sign off".to_string()),
                    updated_at: stamp,
                },
                None => {
                    return Err(ApiError::BadRequest(
                        "reportedToOffice or inactiveReason is required".to_string(),
                    ));
                }
            }
        };
        diesel::update(crew::table.filter(crew::id.eq(&payload.crew_id)))
            .set(&changes)
            .execute(&mut conn)?;
        let updated = load_crew(&mut conn, &payload.crew_id)?;
        Ok(crew_response(updated, Vec::new(), Vec::new()))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    async fn create_crew(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &(String, String),
        full_name: &str,
        status: Option<&str>,
    ) -> CrewResponse {
        let req = test::TestRequest::post()
            .uri("/api/crew")
            .insert_header(cookie.clone())
            .set_json(CrewCreateRequest {
                crew_code: None,
                full_name: full_name.to_string(),
                rank: "AB".to_string(),
                vessel: None,
                status: status.map(str::to_string),
                date_of_birth: None,
                place_of_birth: None,
                address: None,
                phone: None,
            })
            .to_request();
        test::call_and_read_body_json(app, req).await
    }

    macro_rules! crew_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(crew_list)
                    .service(crew_create)
                    .service(crew_reporting_status)
                    .service(crew_status_change)
                    .service(crew_status_options)
                    .service(crew_get)
                    .service(crew_update)
                    .service(crew_delete),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_then_fetch_returns_same_fields() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = crew_app!(test_app.state);

        let created = create_crew(&app, &cookie, "ARIEF SULAEMAN", None).await;
        assert_eq!(created.crew_status, "APPLICANT");

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", created.id))
            .insert_header(cookie.clone())
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.full_name, "ARIEF SULAEMAN");
        assert_eq!(fetched.rank, "AB");
        assert_eq!(fetched.crew_code, created.crew_code);

        // Repeated GET without writes returns identical data.
        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", created.id))
            .insert_header(cookie.clone())
            .to_request();
        let again: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(again.full_name, fetched.full_name);
        assert_eq!(again.crew_status, fetched.crew_status);
    }

    #[actix_web::test]
    async fn create_requires_name_and_rank() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = crew_app!(test_app.state);

        let req = test::TestRequest::post()
            .uri("/api/crew")
            .insert_header(cookie)
            .set_json(serde_json::json!({ "fullName": "", "rank": "AB" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn invalid_transition_rejected_with_400_even_for_director() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &cookie, "BUDI SANTOSO", Some("ONBOARD")).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(cookie)
            .set_json(StatusChangeRequest {
                new_status: "STANDBY".to_string(),
                reason: None,
                notes: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn transition_by_denied_role_rejected_with_403() {
        let test_app = test_state();
        let operational = session_cookie(&seed_session(&test_app.state.pool, "OPERATIONAL_STAFF"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &operational, "CITRA DEWI", Some("APPLICANT")).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(operational)
            .set_json(StatusChangeRequest {
                new_status: "APPROVED".to_string(),
                reason: None,
                notes: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn vacation_transition_marks_reported() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &cookie, "DAYA PUTRA", Some("SIGN_OFF")).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(cookie.clone())
            .set_json(StatusChangeRequest {
                new_status: "VACATION".to_string(),
                reason: None,
                notes: Some("family leave".to_string()),
            })
            .to_request();
        let changed: StatusChangeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(changed.crew.previous_status, "SIGN_OFF");
        assert_eq!(changed.crew.new_status, "VACATION");

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", created.id))
            .insert_header(cookie)
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.crew_status, "VACATION");
        assert!(fetched.reported_to_office);
    }

    #[actix_web::test]
    async fn termination_records_reason_and_rehire_clears_it() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &cookie, "EKO WIJAYA", Some("STANDBY")).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(cookie.clone())
            .set_json(StatusChangeRequest {
                new_status: "EX_CREW".to_string(),
                reason: Some("Resigned".to_string()),
                notes: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", created.id))
            .insert_header(cookie.clone())
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.inactive_reason.as_deref(), Some("Resigned"));

        let req = test::TestRequest::patch()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(cookie.clone())
            .set_json(StatusChangeRequest {
                new_status: "STANDBY".to_string(),
                reason: None,
                notes: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", created.id))
            .insert_header(cookie)
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.crew_status, "STANDBY");
        assert!(fetched.inactive_reason.is_none());
        assert!(fetched.reported_to_office);
    }

    #[actix_web::test]
    async fn status_options_reflect_caller_role() {
        let test_app = test_state();
        let manager = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let training = session_cookie(&seed_session(&test_app.state.pool, "TRAINING_OFFICER"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &manager, "FARID AKBAR", Some("APPLICANT")).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(manager)
            .to_request();
        let options: AvailableTransitionsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(options.can_transition);
        assert_eq!(options.available_transitions, vec!["APPROVED", "EX_CREW"]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}/status", created.id))
            .insert_header(training)
            .to_request();
        let options: AvailableTransitionsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!options.can_transition);
        assert!(options.available_transitions.is_empty());
    }

    #[actix_web::test]
    async fn reporting_status_flips_between_standby_and_ex_crew() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = crew_app!(test_app.state);
        let created = create_crew(&app, &cookie, "GALIH SAPUTRA", Some("VACATION")).await;

        let req = test::TestRequest::patch()
            .uri("/api/crew/reporting-status")
            .insert_header(cookie.clone())
            .set_json(ReportingStatusRequest {
                crew_id: created.id.clone(),
                reported_to_office: Some(false),
                inactive_reason: None,
            })
            .to_request();
        let updated: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.crew_status, "EX_CREW");
        assert_eq!(updated.inactive_reason.as_deref(), Some("Did not report"));

        let req = test::TestRequest::patch()
            .uri("/api/crew/reporting-status")
            .insert_header(cookie)
            .set_json(ReportingStatusRequest {
                crew_id: created.id,
                reported_to_office: Some(true),
                inactive_reason: None,
            })
            .to_request();
        let updated: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.crew_status, "STANDBY");
        assert!(updated.reported_to_office);
        assert!(updated.inactive_reason.is_none());
    }

    #[actix_web::test]
    async fn delete_missing_crew_returns_404() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = crew_app!(test_app.state);

        let req = test::TestRequest::delete()
            .uri("/api/crew/no-such-id")
            .insert_header(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn operational_staff_cannot_reach_documents_prefix() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "OPERATIONAL_STAFF"));
        let app = crew_app!(test_app.state);

        // Crew endpoints are reachable for the role...
        let req = test::TestRequest::get()
            .uri("/api/crew")
            .insert_header(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
