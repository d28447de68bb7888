//! Crew service-record endpoints: evaluations, repatriations, and prior
//! sea-service history.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, delete, get, post, put, web};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Crew, CrewEvaluation, Repatriation, SeaServiceRecord};
use crate::schema::{crew, crew_evaluations, repatriations, sea_service_records};

use super::{
    ApiError, AppState, Conn, ErrorResponse, conn, now, parse_datetime, require_auth, respond,
};

const NAME_MAX: usize = 255;
const REASON_MAX: usize = 1000;
const REMARKS_MAX: usize = 2000;

fn fmt_opt(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.and_utc().to_rfc3339())
        .unwrap_or_default()
}

fn ensure_crew(conn: &mut Conn, crew_id: &str) -> Result<(), ApiError> {
    crew::table
        .filter(crew::id.eq(crew_id))
        .first::<Crew>(conn)
        .optional()?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound("crew not found".to_string()))
}

fn check_len(value: Option<&str>, field: &str, max: usize) -> Result<(), ApiError> {
    match value {
        Some(text) if text.len() > max => Err(ApiError::BadRequest(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// Request payload for recording a crew evaluation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCreateRequest {
    /// Name of the evaluator.
    pub evaluator: Option<String>,
    /// Rank held when evaluated.
    pub rank: Option<String>,
    /// Score, 0 to 100.
    pub score: Option<f64>,
    /// Evaluator comments.
    pub comments: Option<String>,
}

/// Evaluation as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
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
    /// When the evaluation took place, ISO-8601.
    pub evaluation_date: String,
}

fn evaluation_response(record: CrewEvaluation) -> EvaluationResponse {
    EvaluationResponse {
        id: record.id,
        crew_id: record.crew_id,
        evaluator: record.evaluator,
        rank: record.rank,
        score: record.score,
        comments: record.comments,
        evaluation_date: record.evaluation_date.and_utc().to_rfc3339(),
    }
}

#[utoipa::path(
    post,
    path = "/crew/{id}/evaluation",
    params(("id" = String, Path, description = "Crew identifier")),
    request_body = EvaluationCreateRequest,
    responses(
        (status = 201, description = "Evaluation recorded", body = EvaluationResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[post("/api/crew/{id}/evaluation")]
/// Record a performance evaluation for a crew member.
pub async fn evaluation_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<EvaluationCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        check_len(payload.evaluator.as_deref(), "evaluator", NAME_MAX)?;
        check_len(payload.rank.as_deref(), "rank", NAME_MAX)?;
        check_len(payload.comments.as_deref(), "comments", REMARKS_MAX)?;
        if let Some(score) = payload.score {
            if !(0.0..=100.0).contains(&score) {
                return Err(ApiError::BadRequest(
                    "score must be between 0 and 100".to_string(),
                ));
            }
        }
        let mut conn = conn(&pool)?;
        ensure_crew(&mut conn, &crew_id)?;
        let record = CrewEvaluation {
            id: Uuid::new_v4().to_string(),
            crew_id,
            evaluator: payload.evaluator,
            rank: payload.rank,
            score: payload.score,
            comments: payload.comments,
            evaluation_date: now(),
            created_at: now(),
        };
        diesel::insert_into(crew_evaluations::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(evaluation_response(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Request payload for recording a repatriation settlement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepatriationCreateRequest {
    /// Travel date, RFC 3339 or YYYY-MM-DD.
    pub repatriation_date: Option<String>,
    /// Reason for repatriation.
    pub reason: Option<String>,
    /// Final wage account settled.
    pub final_account: Option<f64>,
    /// Staff member who processed the settlement.
    pub processed_by: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Repatriation as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepatriationResponse {
    /// Repatriation identifier.
    pub id: String,
    /// Repatriated crew member.
    pub crew_id: String,
    /// Travel date, ISO-8601, empty when unset.
    pub repatriation_date: String,
    /// Reason for repatriation.
    pub reason: Option<String>,
    /// Final wage account settled.
    pub final_account: Option<f64>,
    /// Staff member who processed the settlement.
    pub processed_by: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

fn repatriation_response(record: Repatriation) -> RepatriationResponse {
    RepatriationResponse {
        id: record.id,
        crew_id: record.crew_id,
        repatriation_date: fmt_opt(record.repatriation_date),
        reason: record.reason,
        final_account: record.final_account,
        processed_by: record.processed_by,
        remarks: record.remarks,
    }
}

#[utoipa::path(
    post,
    path = "/crew/{id}/repatriation",
    params(("id" = String, Path, description = "Crew identifier")),
    request_body = RepatriationCreateRequest,
    responses(
        (status = 201, description = "Repatriation recorded", body = RepatriationResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[post("/api/crew/{id}/repatriation")]
/// Record a repatriation settlement for a crew member.
pub async fn repatriation_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<RepatriationCreateRequest>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let crew_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        check_len(payload.reason.as_deref(), "reason", REASON_MAX)?;
        check_len(payload.processed_by.as_deref(), "processedBy", NAME_MAX)?;
        check_len(payload.remarks.as_deref(), "remarks", REMARKS_MAX)?;
        let repatriation_date = payload
            .repatriation_date
            .as_deref()
            .map(parse_datetime)
            .transpose()
            .map_err(|_| ApiError::BadRequest("invalid repatriationDate".to_string()))?;
        let mut conn = conn(&pool)?;
        ensure_crew(&mut conn, &crew_id)?;
        let record = Repatriation {
            id: Uuid::new_v4().to_string(),
            crew_id,
            repatriation_date,
            reason: payload.reason,
            final_account: payload.final_account,
            processed_by: payload.processed_by,
            remarks: payload.remarks,
            created_at: now(),
        };
        diesel::insert_into(repatriations::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(repatriation_response(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

/// Query filter on the sea-service listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaServiceFilters {
    /// Crew member whose history to list.
    pub crew_id: Option<String>,
}

/// Request payload for a sea-service history entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeaServicePayload {
    /// Crew member the experience belongs to (create only).
    pub crew_id: Option<String>,
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
    /// Sign-on, RFC 3339 or YYYY-MM-DD.
    pub sign_on: Option<String>,
    /// Sign-off, RFC 3339 or YYYY-MM-DD.
    pub sign_off: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Sea-service entry as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeaServiceResponse {
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
    /// Sign-on, ISO-8601, empty when unset.
    pub sign_on: String,
    /// Sign-off, ISO-8601, empty when unset.
    pub sign_off: String,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

fn sea_service_response(record: SeaServiceRecord) -> SeaServiceResponse {
    SeaServiceResponse {
        id: record.id,
        crew_id: record.crew_id,
        vessel_name: record.vessel_name,
        rank: record.rank,
        grt: record.grt,
        dwt: record.dwt,
        engine_type: record.engine_type,
        bhp: record.bhp,
        company_name: record.company_name,
        flag: record.flag,
        sign_on: fmt_opt(record.sign_on),
        sign_off: fmt_opt(record.sign_off),
        remarks: record.remarks,
    }
}

struct ServiceDates {
    sign_on: Option<NaiveDateTime>,
    sign_off: Option<NaiveDateTime>,
}

fn parse_service_dates(payload: &SeaServicePayload) -> Result<ServiceDates, ApiError> {
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
    Ok(ServiceDates { sign_on, sign_off })
}

#[utoipa::path(
    get,
    path = "/sea-service",
    params(("crewId" = String, Query, description = "Crew member whose history to list")),
    responses(
        (status = 200, description = "Sea-service history, most recent sign-on first", body = [SeaServiceResponse]),
        (status = 400, description = "Missing crewId", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[get("/api/sea-service")]
/// List a crew member's prior sea-service history.
pub async fn sea_service_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    filters: web::Query<SeaServiceFilters>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let filters = filters.into_inner();
    let result = web::block(move || {
        let crew_id = filters
            .crew_id
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("crewId is required".to_string()))?;
        let mut conn = conn(&pool)?;
        let records = sea_service_records::table
            .filter(sea_service_records::crew_id.eq(&crew_id))
            .order(sea_service_records::sign_on.desc())
            .load::<SeaServiceRecord>(&mut conn)?;
        Ok(records
            .into_iter()
            .map(sea_service_response)
            .collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/sea-service",
    request_body = SeaServicePayload,
    responses(
        (status = 201, description = "Entry created", body = SeaServiceResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Crew not found", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[post("/api/sea-service")]
/// Add a sea-service history entry.
pub async fn sea_service_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<SeaServicePayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let crew_id = payload
            .crew_id
            .clone()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("crewId is required".to_string()))?;
        if payload.vessel_name.trim().is_empty() {
            return Err(ApiError::BadRequest("vesselName is required".to_string()));
        }
        let dates = parse_service_dates(&payload)?;
        let mut conn = conn(&pool)?;
        ensure_crew(&mut conn, &crew_id)?;
        let record = SeaServiceRecord {
            id: Uuid::new_v4().to_string(),
            crew_id,
            vessel_name: payload.vessel_name.trim().to_string(),
            rank: payload.rank,
            grt: payload.grt,
            dwt: payload.dwt,
            engine_type: payload.engine_type,
            bhp: payload.bhp,
            company_name: payload.company_name,
            flag: payload.flag,
            sign_on: dates.sign_on,
            sign_off: dates.sign_off,
            remarks: payload.remarks,
            created_at: now(),
        };
        diesel::insert_into(sea_service_records::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(sea_service_response(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/sea-service/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = SeaServicePayload,
    responses(
        (status = 200, description = "Entry updated", body = SeaServiceResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[put("/api/sea-service/{id}")]
/// Replace a sea-service history entry.
pub async fn sea_service_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<SeaServicePayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let record_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.vessel_name.trim().is_empty() {
            return Err(ApiError::BadRequest("vesselName is required".to_string()));
        }
        let dates = parse_service_dates(&payload)?;
        let mut conn = conn(&pool)?;
        let affected = diesel::update(
            sea_service_records::table.filter(sea_service_records::id.eq(&record_id)),
        )
        .set((
            sea_service_records::vessel_name.eq(payload.vessel_name.trim()),
            sea_service_records::rank.eq(payload.rank),
            sea_service_records::grt.eq(payload.grt),
            sea_service_records::dwt.eq(payload.dwt),
            sea_service_records::engine_type.eq(payload.engine_type),
            sea_service_records::bhp.eq(payload.bhp),
            sea_service_records::company_name.eq(payload.company_name),
            sea_service_records::flag.eq(payload.flag),
            sea_service_records::sign_on.eq(dates.sign_on),
            sea_service_records::sign_off.eq(dates.sign_off),
            sea_service_records::remarks.eq(payload.remarks),
        ))
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(ApiError::NotFound("sea-service entry not found".to_string()));
        }
        let record = sea_service_records::table
            .filter(sea_service_records::id.eq(&record_id))
            .first::<SeaServiceRecord>(&mut conn)?;
        Ok(sea_service_response(record))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/sea-service/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "service-records"
)]
#[delete("/api/sea-service/{id}")]
/// Delete a sea-service history entry.
pub async fn sea_service_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let record_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let affected = diesel::delete(
            sea_service_records::table.filter(sea_service_records::id.eq(&record_id)),
        )
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(ApiError::NotFound("sea-service entry not found".to_string()));
        }
        Ok(serde_json::json!({ "success": true }))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    use crate::routes::crew::{CrewCreateRequest, CrewResponse, crew_create};
    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    macro_rules! records_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(crew_create)
                    .service(evaluation_create)
                    .service(repatriation_create)
                    .service(sea_service_list)
                    .service(sea_service_create)
                    .service(sea_service_update)
                    .service(sea_service_delete),
            )
            .await
        };
    }

    async fn seed_crew(
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
                rank: "BOSUN".to_string(),
                vessel: None,
                status: Some("STANDBY".to_string()),
                date_of_birth: None,
                place_of_birth: None,
                address: None,
                phone: None,
            })
            .to_request();
        test::call_and_read_body_json(app, req).await
    }

    fn sea_service_payload(crew_id: Option<&str>, vessel: &str, sign_on: &str) -> SeaServicePayload {
        SeaServicePayload {
            crew_id: crew_id.map(str::to_string),
            vessel_name: vessel.to_string(),
            rank: Some("BOSUN".to_string()),
            grt: Some(28000.0),
            dwt: Some(47000.0),
            engine_type: Some("MAN B&W".to_string()),
            bhp: Some(9480.0),
            company_name: Some("PT BAHARI LINES".to_string()),
            flag: Some("ID".to_string()),
            sign_on: Some(sign_on.to_string()),
            sign_off: None,
            remarks: None,
        }
    }

    #[actix_web::test]
    async fn evaluation_created_for_existing_crew() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "NYOMAN WIJAYA").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/crew/{}/evaluation", member.id))
            .insert_header(cookie.clone())
            .set_json(EvaluationCreateRequest {
                evaluator: Some("Port Captain".to_string()),
                rank: Some("BOSUN".to_string()),
                score: Some(87.5),
                comments: Some("Reliable on deck".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: EvaluationResponse = test::read_body_json(resp).await;
        assert_eq!(created.crew_id, member.id);
        assert_eq!(created.score, Some(87.5));
        assert!(!created.evaluation_date.is_empty());
    }

    #[actix_web::test]
    async fn evaluation_rejects_out_of_range_score() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "KOMANG SUTEJA").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/crew/{}/evaluation", member.id))
            .insert_header(cookie)
            .set_json(EvaluationCreateRequest {
                evaluator: None,
                rank: None,
                score: Some(150.0),
                comments: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn repatriation_created_and_missing_crew_is_404() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "PUTU ADI SAPUTRA").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/crew/{}/repatriation", member.id))
            .insert_header(cookie.clone())
            .set_json(RepatriationCreateRequest {
                repatriation_date: Some("2026-07-15".to_string()),
                reason: Some("End of contract".to_string()),
                final_account: Some(5000.0),
                processed_by: Some("Crewing Office".to_string()),
                remarks: Some("Settled in full".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: RepatriationResponse = test::read_body_json(resp).await;
        assert_eq!(created.reason.as_deref(), Some("End of contract"));
        assert_eq!(created.final_account, Some(5000.0));
        assert!(created.repatriation_date.starts_with("2026-07-15"));

        let req = test::TestRequest::post()
            .uri("/api/crew/no-such-crew/repatriation")
            .insert_header(cookie)
            .set_json(RepatriationCreateRequest {
                repatriation_date: None,
                reason: Some("End of contract".to_string()),
                final_account: None,
                processed_by: None,
                remarks: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn repatriation_rejects_invalid_date() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "DEWA PUTRA").await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/crew/{}/repatriation", member.id))
            .insert_header(cookie)
            .set_json(RepatriationCreateRequest {
                repatriation_date: Some("not-a-date".to_string()),
                reason: None,
                final_account: None,
                processed_by: None,
                remarks: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn sea_service_list_requires_crew_id_and_orders_descending() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "GUSTI RAMA").await;

        let req = test::TestRequest::get()
            .uri("/api/sea-service")
            .insert_header(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        for (vessel, sign_on) in [("MV EARLIER", "2023-01-05"), ("MV LATER", "2025-06-20")] {
            let req = test::TestRequest::post()
                .uri("/api/sea-service")
                .insert_header(cookie.clone())
                .set_json(sea_service_payload(Some(&member.id), vessel, sign_on))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/sea-service?crewId={}", member.id))
            .insert_header(cookie)
            .to_request();
        let listed: Vec<SeaServiceResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].vessel_name, "MV LATER");
        assert_eq!(listed[1].vessel_name, "MV EARLIER");
    }

    #[actix_web::test]
    async fn sea_service_update_and_delete_round_trip() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        let app = records_app!(test_app.state);
        let member = seed_crew(&app, &cookie, "MADE ARDANA").await;

        let req = test::TestRequest::post()
            .uri("/api/sea-service")
            .insert_header(cookie.clone())
            .set_json(sea_service_payload(Some(&member.id), "MV ORIGINAL", "2024-02-01"))
            .to_request();
        let created: SeaServiceResponse = test::call_and_read_body_json(&app, req).await;

        let mut changed = sea_service_payload(None, "MV RENAMED", "2024-02-01");
        changed.sign_off = Some("2024-10-01".to_string());
        let req = test::TestRequest::put()
            .uri(&format!("/api/sea-service/{}", created.id))
            .insert_header(cookie.clone())
            .set_json(changed)
            .to_request();
        let updated: SeaServiceResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.vessel_name, "MV RENAMED");
        assert!(updated.sign_off.starts_with("2024-10-01"));
        assert_eq!(updated.crew_id, member.id);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sea-service/{}", created.id))
            .insert_header(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sea-service/{}", created.id))
            .insert_header(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
