//! Employment application and onboarding checklist endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, put, web};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ChecklistItem, Crew, EmploymentApplication};
use crate::schema::{checklists, crew, employment_applications};

use super::{ApiError, AppState, ErrorResponse, conn, now, parse_datetime, require_auth, respond};

const APPLICATION_STATUSES: &[&str] = &[
    "APPLIED",
    "SHORTLISTED",
    "INTERVIEW",
    "APPROVED",
    "OFFERED",
    "ACCEPTED",
    "REJECTED",
];

const NOTES_MAX: usize = 2000;

/// Query filters on the application listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilters {
    /// Restrict to one crew member.
    pub crew_id: Option<String>,
}

/// Request payload for creating an application.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreateRequest {
    /// Applying crew member, required.
    pub crew_id: String,
    /// Rank applied for.
    pub applied_rank: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request payload for updating an application.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdateRequest {
    /// New status; must be a valid enum value.
    pub status: Option<String>,
    /// Rank applied for.
    pub applied_rank: Option<String>,
    /// Interview date, RFC 3339 or YYYY-MM-DD.
    pub interview_date: Option<String>,
    /// Interview notes.
    pub interview_notes: Option<String>,
    /// Offer date.
    pub offered_date: Option<String>,
    /// Acceptance date.
    pub accepted_date: Option<String>,
    /// Rejection reason.
    pub rejection_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request payload for the approval decision.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDecisionRequest {
    /// Decision: APPROVED or REJECTED.
    pub decision: String,
    /// Reviewer comments.
    pub comments: Option<String>,
}

/// Application as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    /// Application identifier.
    pub id: String,
    /// Applying crew member.
    pub crew_id: String,
    /// Crew member's full name.
    pub crew_name: String,
    /// Rank applied for.
    pub applied_rank: Option<String>,
    /// Application status.
    pub status: String,
    /// Submission timestamp, ISO-8601.
    pub application_date: String,
    /// Interview date, ISO-8601, empty when unset.
    pub interview_date: String,
    /// Interview notes.
    pub interview_notes: Option<String>,
    /// Offer date, ISO-8601, empty when unset.
    pub offered_date: String,
    /// Acceptance date, ISO-8601, empty when unset.
    pub accepted_date: String,
    /// Rejection reason.
    pub rejection_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn application_response(record: EmploymentApplication, crew_name: String) -> ApplicationResponse {
    ApplicationResponse {
        id: record.id,
        crew_id: record.crew_id,
        crew_name,
        applied_rank: record.applied_rank,
        status: record.status,
        application_date: record.application_date.and_utc().to_rfc3339(),
        interview_date: fmt_opt(record.interview_date),
        interview_notes: record.interview_notes,
        offered_date: fmt_opt(record.offered_date),
        accepted_date: fmt_opt(record.accepted_date),
        rejection_reason: record.rejection_reason,
        notes: record.notes,
    }
}

fn parse_opt_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDateTime>, ApiError> {
    value
        .filter(|raw| !raw.is_empty())
        .map(parse_datetime)
        .transpose()
        .map_err(|_| ApiError::BadRequest(format!("invalid {field}")))
}

fn check_notes(value: Option<&str>, field: &str) -> Result<(), ApiError> {
    if value.is_some_and(|notes| notes.len() > NOTES_MAX) {
        return Err(ApiError::BadRequest(format!(
            "{field} exceeds {NOTES_MAX} characters"
        )));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/applications",
    params(("crewId" = Option<String>, Query, description = "Restrict to one crew member")),
    responses(
        (status = 200, description = "Application listing", body = [ApplicationResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[get("/api/applications")]
/// List employment applications, newest first.
pub async fn applications_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<ApplicationFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let mut query = employment_applications::table
            .inner_join(crew::table)
            .order(employment_applications::application_date.desc())
            .into_boxed();
        if let Some(crew_id) = filters.crew_id.filter(|value| !value.is_empty()) {
            query = query.filter(employment_applications::crew_id.eq(crew_id));
        }
        let rows: Vec<(EmploymentApplication, Crew)> = query.load(&mut conn)?;
        let listing: Vec<ApplicationResponse> = rows
            .into_iter()
            .map(|(record, member)| application_response(record, member.full_name))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/applications",
    request_body = ApplicationCreateRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Missing crew id", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[post("/api/applications")]
/// Open an employment application in APPLIED state.
pub async fn applications_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<ApplicationCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.crew_id.trim().is_empty() {
            return Err(ApiError::BadRequest("crewId is required".to_string()));
        }
        check_notes(payload.notes.as_deref(), "notes")?;
        let mut conn = conn(&pool)?;
        let member = crew::table
            .filter(crew::id.eq(&payload.crew_id))
            .first::<Crew>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("crew not found".to_string()))?;
        let record = EmploymentApplication {
            id: Uuid::new_v4().to_string(),
            crew_id: payload.crew_id,
            applied_rank: payload.applied_rank.or_else(|| Some(member.rank.clone())),
            status: "APPLIED".to_string(),
            application_date: now(),
            interview_date: None,
            interview_notes: None,
            offered_date: None,
            accepted_date: None,
            rejection_reason: None,
            notes: payload.notes,
        };
        diesel::insert_into(employment_applications::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(application_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[derive(AsChangeset)]
#[diesel(table_name = employment_applications)]
struct ApplicationChanges {
    status: Option<String>,
    applied_rank: Option<String>,
    interview_date: Option<NaiveDateTime>,
    interview_notes: Option<String>,
    offered_date: Option<NaiveDateTime>,
    accepted_date: Option<NaiveDateTime>,
    rejection_reason: Option<String>,
    notes: Option<String>,
}

#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    request_body = ApplicationUpdateRequest,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Invalid status or dates", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[put("/api/applications/{id}")]
/// Update an application's status, dates, and notes.
pub async fn applications_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<ApplicationUpdateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let application_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if let Some(status) = payload.status.as_deref() {
            if !APPLICATION_STATUSES.contains(&status) {
                return Err(ApiError::BadRequest(format!(
                    "invalid application status: {status}"
                )));
            }
        }
        check_notes(payload.notes.as_deref(), "notes")?;
        check_notes(payload.interview_notes.as_deref(), "interviewNotes")?;
        let changes = ApplicationChanges {
            status: payload.status,
            applied_rank: payload.applied_rank,
            interview_date: parse_opt_date(payload.interview_date.as_deref(), "interviewDate")?,
            interview_notes: payload.interview_notes,
            offered_date: parse_opt_date(payload.offered_date.as_deref(), "offeredDate")?,
            accepted_date: parse_opt_date(payload.accepted_date.as_deref(), "acceptedDate")?,
            rejection_reason: payload.rejection_reason,
            notes: payload.notes,
        };
        let mut conn = conn(&pool)?;
        let updated = diesel::update(
            employment_applications::table.filter(employment_applications::id.eq(&application_id)),
        )
        .set(&changes)
        .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("application not found".to_string()));
        }
        let (record, member): (EmploymentApplication, Crew) = employment_applications::table
            .inner_join(crew::table)
            .filter(employment_applications::id.eq(&application_id))
            .first(&mut conn)?;
        Ok(application_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/applications/{id}/approve",
    params(("id" = String, Path, description = "Application identifier")),
    request_body = ApplicationDecisionRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ApplicationResponse),
        (status = 400, description = "Decision must be APPROVED or REJECTED", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[post("/api/applications/{id}/approve")]
/// Record an approval decision; approval promotes APPLICANT crew to APPROVED.
pub async fn applications_approve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<ApplicationDecisionRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let application_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let approved = match payload.decision.as_str() {
            "APPROVED" => true,
            "REJECTED" => false,
            _ => {
                return Err(ApiError::BadRequest(
                    "decision must be APPROVED or REJECTED".to_string(),
                ));
            }
        };
        let mut conn = conn(&pool)?;
        let (record, member): (EmploymentApplication, Crew) = employment_applications::table
            .inner_join(crew::table)
            .filter(employment_applications::id.eq(&application_id))
            .first(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("application not found".to_string()))?;

        if approved {
            diesel::update(
                employment_applications::table
                    .filter(employment_applications::id.eq(&application_id)),
            )
            .set((
                employment_applications::status.eq("APPROVED"),
                employment_applications::notes.eq(&payload.comments),
            ))
            .execute(&mut conn)?;
            if member.crew_status == "APPLICANT" {
                diesel::update(crew::table.filter(crew::id.eq(&record.crew_id)))
                    .set((
                        crew::crew_status.eq("APPROVED"),
                        crew::updated_at.eq(now()),
                    ))
                    .execute(&mut conn)?;
            }
        } else {
            diesel::update(
                employment_applications::table
                    .filter(employment_applications::id.eq(&application_id)),
            )
            .set((
                employment_applications::status.eq("REJECTED"),
                employment_applications::rejection_reason.eq(&payload.comments),
            ))
            .execute(&mut conn)?;
        }

        let (record, member): (EmploymentApplication, Crew) = employment_applications::table
            .inner_join(crew::table)
            .filter(employment_applications::id.eq(&application_id))
            .first(&mut conn)?;
        Ok(application_response(record, member.full_name))
    })
    .await;
    respond(result, StatusCode::OK)
}

/// Query filters on the checklist listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistFilters {
    /// Restrict to one crew member.
    pub crew_id: Option<String>,
}

/// Request payload for adding a checklist item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistCreateRequest {
    /// Crew member the item belongs to, required.
    pub crew_id: String,
    /// Application the item was raised for.
    pub application_id: Option<String>,
    /// Checklist item label, required.
    pub item_name: String,
    /// Whether the document was provided.
    pub is_provided: Option<bool>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Checklist item as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResponse {
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
}

impl From<ChecklistItem> for ChecklistResponse {
    fn from(item: ChecklistItem) -> Self {
        Self {
            id: item.id,
            crew_id: item.crew_id,
            application_id: item.application_id,
            item_name: item.item_name,
            is_provided: item.is_provided,
            remarks: item.remarks,
        }
    }
}

#[utoipa::path(
    get,
    path = "/checklists",
    params(("crewId" = Option<String>, Query, description = "Restrict to one crew member")),
    responses(
        (status = 200, description = "Checklist items", body = [ChecklistResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[get("/api/checklists")]
/// List onboarding checklist items.
pub async fn checklists_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<ChecklistFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let mut query = checklists::table
            .order(checklists::created_at.asc())
            .into_boxed();
        if let Some(crew_id) = filters.crew_id.filter(|value| !value.is_empty()) {
            query = query.filter(checklists::crew_id.eq(crew_id));
        }
        let rows = query.load::<ChecklistItem>(&mut conn)?;
        Ok(rows.into_iter().map(ChecklistResponse::from).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/checklists",
    request_body = ChecklistCreateRequest,
    responses(
        (status = 201, description = "Checklist item added", body = ChecklistResponse),
        (status = 400, description = "Missing crew id or item name", body = ErrorResponse)
    ),
    tag = "applications"
)]
#[post("/api/checklists")]
/// Add an onboarding checklist item.
pub async fn checklists_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<ChecklistCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.crew_id.trim().is_empty() || payload.item_name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "crewId and itemName are required".to_string(),
            ));
        }
        let mut conn = conn(&pool)?;
        let record = ChecklistItem {
            id: Uuid::new_v4().to_string(),
            crew_id: payload.crew_id,
            application_id: payload.application_id.filter(|id| !id.is_empty()),
            item_name: payload.item_name.trim().to_string(),
            is_provided: payload.is_provided.unwrap_or(false),
            remarks: payload.remarks,
            created_at: now(),
        };
        diesel::insert_into(checklists::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(ChecklistResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    use crate::routes::crew::{CrewCreateRequest, CrewResponse, crew_create, crew_get};
    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    macro_rules! application_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(crew_create)
                    .service(crew_get)
                    .service(applications_list)
                    .service(applications_create)
                    .service(applications_update)
                    .service(applications_approve)
                    .service(checklists_list)
                    .service(checklists_create),
            )
            .await
        };
    }

    async fn seed_applicant(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &(String, String),
        full_name: &str,
    ) -> CrewResponse {
        let req = test::TestRequest::post()
            .uri("/api/crew")
            .insert_header(cookie.clone())
            .set_json(CrewCreateRequest {
                crew_code: None,
                full_name: full_name.to_string(),
                rank: "MESSMAN".to_string(),
                vessel: None,
                status: Some("APPLICANT".to_string()),
                date_of_birth: None,
                place_of_birth: None,
                address: None,
                phone: None,
            })
            .to_request();
        test::call_and_read_body_json(app, req).await
    }

    #[actix_web::test]
    async fn approval_promotes_applicant_crew() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "EXPERT_STAFF"));
        let app = application_app!(test_app.state);
        let member = seed_applicant(&app, &cookie, "SETO NUGROHO").await;

        let req = test::TestRequest::post()
            .uri("/api/applications")
            .insert_header(cookie.clone())
            .set_json(ApplicationCreateRequest {
                crew_id: member.id.clone(),
                applied_rank: None,
                notes: None,
            })
            .to_request();
        let created: ApplicationResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.status, "APPLIED");
        assert_eq!(created.applied_rank.as_deref(), Some("MESSMAN"));

        let req = test::TestRequest::post()
            .uri(&format!("/api/applications/{}/approve", created.id))
            .insert_header(cookie.clone())
            .set_json(ApplicationDecisionRequest {
                decision: "APPROVED".to_string(),
                comments: Some("interview passed".to_string()),
            })
            .to_request();
        let decided: ApplicationResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(decided.status, "APPROVED");

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", member.id))
            .insert_header(cookie)
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.crew_status, "APPROVED");
    }

    #[actix_web::test]
    async fn rejection_records_reason_without_touching_crew() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "EXPERT_STAFF"));
        let app = application_app!(test_app.state);
        let member = seed_applicant(&app, &cookie, "TAUFIK RAHMAN").await;

        let req = test::TestRequest::post()
            .uri("/api/applications")
            .insert_header(cookie.clone())
            .set_json(ApplicationCreateRequest {
                crew_id: member.id.clone(),
                applied_rank: None,
                notes: None,
            })
            .to_request();
        let created: ApplicationResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/applications/{}/approve", created.id))
            .insert_header(cookie.clone())
            .set_json(ApplicationDecisionRequest {
                decision: "REJECTED".to_string(),
                comments: Some("missing sea time".to_string()),
            })
            .to_request();
        let decided: ApplicationResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(decided.status, "REJECTED");
        assert_eq!(decided.rejection_reason.as_deref(), Some("missing sea time"));

        let req = test::TestRequest::get()
            .uri(&format!("/api/crew/{}", member.id))
            .insert_header(cookie)
            .to_request();
        let fetched: CrewResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.crew_status, "APPLICANT");
    }

    #[actix_web::test]
    async fn update_rejects_unknown_status() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "EXPERT_STAFF"));
        let app = application_app!(test_app.state);
        let member = seed_applicant(&app, &cookie, "UMAR SAID").await;

        let req = test::TestRequest::post()
            .uri("/api/applications")
            .insert_header(cookie.clone())
            .set_json(ApplicationCreateRequest {
                crew_id: member.id,
                applied_rank: None,
                notes: None,
            })
            .to_request();
        let created: ApplicationResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/applications/{}", created.id))
            .insert_header(cookie.clone())
            .set_json(serde_json::json!({ "status": "PENDING" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("/api/applications/{}", created.id))
            .insert_header(cookie)
            .set_json(serde_json::json!({
                "status": "INTERVIEW",
                "interviewDate": "2026-09-15"
            }))
            .to_request();
        let updated: ApplicationResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.status, "INTERVIEW");
        assert!(updated.interview_date.starts_with("2026-09-15"));
    }

    #[actix_web::test]
    async fn checklist_items_filter_by_crew() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "EXPERT_STAFF"));
        let app = application_app!(test_app.state);
        let first = seed_applicant(&app, &cookie, "VINO PRATAMA").await;
        let second = seed_applicant(&app, &cookie, "WAWAN KURNIAWAN").await;

        for (member, item) in [(&first, "Passport"), (&first, "Seaman Book"), (&second, "Passport")] {
            let req = test::TestRequest::post()
                .uri("/api/checklists")
                .insert_header(cookie.clone())
                .set_json(ChecklistCreateRequest {
                    crew_id: member.id.clone(),
                    application_id: None,
                    item_name: item.to_string(),
                    is_provided: Some(item == "Passport"),
                    remarks: None,
                })
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/checklists?crewId={}", first.id))
            .insert_header(cookie)
            .to_request();
        let listing: Vec<ChecklistResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().any(|item| item.item_name == "Seaman Book"));
    }
}
