//! Owner (principal) reference-data endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, put, web};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Owner;
use crate::schema::owners;

use super::{ApiError, AppState, ErrorResponse, conn, now, require_auth, respond};

/// Request payload for creating or updating an owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPayload {
    /// Company name, required.
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
}

/// Owner as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
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
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            code: owner.code,
            country: owner.country,
            contact: owner.contact,
            email: owner.email,
            notes: owner.notes,
        }
    }
}

#[utoipa::path(
    get,
    path = "/owners",
    responses(
        (status = 200, description = "Owner listing", body = [OwnerResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "owners"
)]
#[get("/api/owners")]
/// List owners alphabetically.
pub async fn owners_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = owners::table
            .order(owners::name.asc())
            .load::<Owner>(&mut conn)?;
        Ok(rows.into_iter().map(OwnerResponse::from).collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/owners",
    request_body = OwnerPayload,
    responses(
        (status = 201, description = "Owner created", body = OwnerResponse),
        (status = 400, description = "Missing name", body = ErrorResponse)
    ),
    tag = "owners"
)]
#[post("/api/owners")]
/// Create an owner.
pub async fn owners_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<OwnerPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.name.trim().is_empty() {
            return Err(ApiError::BadRequest("owner name is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let record = Owner {
            id: Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            code: payload.code,
            country: payload.country,
            contact: payload.contact,
            email: payload.email,
            notes: payload.notes,
            created_at: now(),
        };
        diesel::insert_into(owners::table)
            .values(&record)
            .execute(&mut conn)?;
        Ok(OwnerResponse::from(record))
    })
    .await;
    respond(result, StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/owners/{id}",
    params(("id" = String, Path, description = "Owner identifier")),
    request_body = OwnerPayload,
    responses(
        (status = 200, description = "Owner updated", body = OwnerResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    ),
    tag = "owners"
)]
#[put("/api/owners/{id}")]
/// Update an owner.
pub async fn owners_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<OwnerPayload>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let owner_id = path.into_inner();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.name.trim().is_empty() {
            return Err(ApiError::BadRequest("owner name is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let updated = diesel::update(owners::table.filter(owners::id.eq(&owner_id)))
            .set((
                owners::name.eq(payload.name.trim()),
                owners::code.eq(&payload.code),
                owners::country.eq(&payload.country),
                owners::contact.eq(&payload.contact),
                owners::email.eq(&payload.email),
                owners::notes.eq(&payload.notes),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(ApiError::NotFound("owner not found".to_string()));
        }
        let record = owners::table
            .filter(owners::id.eq(&owner_id))
            .first::<Owner>(&mut conn)?;
        Ok(OwnerResponse::from(record))
    })
    .await;
    respond(result, StatusCode::OK)
}
