//! Vessel reference-data endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, delete, get, post, put, web};
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Owner, Vessel};
use crate::schema::{owners, vessels};

use super::{ApiError, AppState, ErrorResponse, conn, now, require_auth, respond};

/// Request payload for creating or updating a vessel.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VesselPayload {
    /// Vessel name, required on create.
    pub name: String,
    /// Vessel type.
    pub vessel_type: Option<String>,
    /// Flag state.
    pub flag: Option<String>,
    /// Owning company id.
    pub owner_id: Option<String>,
}

/// Owner summary embedded in vessel listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    /// Owner identifier.
    pub id: String,
    /// Company name.
    pub name: String,
}

/// Vessel as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VesselResponse {
    /// Vessel identifier.
    pub id: String,
    /// Vessel name.
    pub name: String,
    /// Vessel type.
    pub vessel_type: Option<String>,
    /// Flag state.
    pub flag: Option<String>,
    /// Owning company, when linked.
    pub owner: Option<OwnerSummary>,
}

fn vessel_response(vessel: Vessel, owner: Option<Owner>) -> VesselResponse {
    VesselResponse {
        id: vessel.id,
        name: vessel.name,
        vessel_type: vessel.vessel_type,
        flag: vessel.flag,
        owner: owner.map(|owner| OwnerSummary {
            id: owner.id,
            name: owner.name,
        }),
    }
}

#[utoipa::path(
    get,
    path = "/vessels",
    responses(
        (status = 200, description = "Vessel listing", body = [VesselResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "vessels"
)]
#[get("/api/vessels")]
/// List vessels with their owners.
pub async fn vessels_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows: Vec<(Vessel, Option<Owner>)> = vessels::table
            .left_join(owners::table)
            .order(vessels::name.asc())
            .load(&mut conn)?;
        let listing: Vec<VesselResponse> = rows
            .into_iter()
            .map(|(vessel, owner)| vessel_response(vessel, owner))
            .collect();
        Ok(listing)
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/vessels",
    request_body = VesselPayload,
    responses(
        (status = 201, description = "Vessel created", body = VesselResponse),
        (status = 400, description = "Missing name or unknown owner", body = ErrorResponse)
    ),
    tag = "vessels"
)]
#[post("/api/vessels")]
/// Create a vessel.
pub async fn vessels_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<VesselPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.name.trim().is_empty() {
            return Err(ApiError::BadRequest("vessel name is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let owner = match payload.owner_id.as_deref().filter(|id| !id.is_empty()) {
            Some(owner_id) => Some(
                owners::table
                    .filter(owners::id.eq(owner_id))
                    .first::<Owner>(&mut conn)
                    .optional()?
                    .ok_or_else(|| ApiError::BadRequest("unknown owner".to_string()))?,
            ),
            None => None,
        };
        let record = Vessel {
            id: Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            vessel_type: payload.vessel_type,
            flag: payload.flag,
            owner_id: owner.as_ref().map(|owner| owner.id.clone()),
            created_at: now(),
        };
        diesel::insert_into(vessels::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(vessel_response(record, owner))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/vessels/{id}",
    params(("id" = String, Path, description = "Vessel identifier")),
    request_body = VesselPayload,
    responses(
        (status = 200, description = "Vessel updated", body = VesselResponse),
        (status = 404, description = "Vessel not found", body = ErrorResponse)
    ),
    tag = "vessels"
)]
#[put("/api/vessels/{id}")]
/// Update a vessel.
pub async fn vessels_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<VesselPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let vessel_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.name.trim().is_empty() {
            return Err(ApiError::BadRequest("vessel name is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let updated = diesel::update(vessels::table.filter(vessels::id.eq(&vessel_id)))
            .set((
                vessels::name.eq(payload.name.trim()),
                vessels::vessel_type.eq(&payload.vessel_type),
                vessels::flag.eq(&payload.flag),
                vessels::owner_id.eq(&payload.owner_id),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("vessel not found".to_string()));
        }
        let (vessel, owner): (Vessel, Option<Owner>) = vessels::table
            .left_join(owners::table)
            .filter(vessels::id.eq(&vessel_id))
            .first(&mut conn)?;
        Ok(vessel_response(vessel, owner))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/vessels/{id}",
    params(("id" = String, Path, description = "Vessel identifier")),
    responses(
        (status = 200, description = "Vessel deleted"),
        (status = 404, description = "Vessel not found", body = ErrorResponse)
    ),
    tag = "vessels"
)]
#[delete("/api/vessels/{id}")]
/// Delete a vessel.
pub async fn vessels_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let vessel_id = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let deleted = diesel::delete(vessels::table.filter(vessels::id.eq(&vessel_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("vessel not found".to_string()));
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

    use crate::routes::owners::{OwnerPayload, OwnerResponse, owners_create};
    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    #[actix_web::test]
    async fn create_links_owner_and_list_embeds_it() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(owners_create)
                .service(vessels_list)
                .service(vessels_create)
                .service(vessels_update)
                .service(vessels_delete),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/owners")
            .insert_header(cookie.clone())
            .set_json(OwnerPayload {
                name: "LUNDQVIST REDERIERNA".to_string(),
                code: Some("LQR".to_string()),
                country: Some("Finland".to_string()),
                contact: None,
                email: None,
                notes: None,
            })
            .to_request();
        let owner: OwnerResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/vessels")
            .insert_header(cookie.clone())
            .set_json(VesselPayload {
                name: "ALFA BALTICA".to_string(),
                vessel_type: Some("Tanker".to_string()),
                flag: Some("Finland".to_string()),
                owner_id: Some(owner.id.clone()),
            })
            .to_request();
        let created: VesselResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.owner.as_ref().map(|o| o.name.as_str()), Some("LUNDQVIST REDERIERNA"));

        let req = test::TestRequest::get()
            .uri("/api/vessels")
            .insert_header(cookie)
            .to_request();
        let listing: Vec<VesselResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "ALFA BALTICA");
        assert!(listing[0].owner.is_some());
    }

    #[actix_web::test]
    async fn create_rejects_unknown_owner() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(vessels_create),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/vessels")
            .insert_header(cookie)
            .set_json(VesselPayload {
                name: "GHOST SHIP".to_string(),
                vessel_type: None,
                flag: None,
                owner_id: Some("missing".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_missing_vessel_returns_404() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "DIRECTOR"));
        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(vessels_delete),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/vessels/no-such-id")
            .insert_header(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
