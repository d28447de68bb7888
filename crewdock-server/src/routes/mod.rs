//! HTTP handlers for CrewDock server, one module per resource.

pub mod alerts;
pub mod applications;
pub mod assignments;
pub mod auth;
pub mod certificates;
pub mod crew;
pub mod documents;
pub mod files;
pub mod forms;
pub mod owners;
pub mod qms;
pub mod service_records;
pub mod vessels;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{NaiveDateTime, Utc};
use crewdock_core::{Role, can_access_path};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::models::{Session, User};
use crate::schema::{sessions, users};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "user_session";

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Root directory served by the document file endpoint.
    pub docs_root: std::path::PathBuf,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Failure surfaced by a handler's blocking database work.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// Malformed or missing input; 400.
    BadRequest(String),
    /// Session missing or invalid; 401.
    Unauthorized(String),
    /// Caller role not permitted; 403.
    Forbidden(String),
    /// Target record absent; 404.
    NotFound(String),
    /// Database or task failure; 500.
    Internal(String),
}

impl ApiError {
    pub(crate) fn into_response(self) -> HttpResponse {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => {
                log::error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        HttpResponse::build(status).json(ErrorResponse { message })
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(value: diesel::result::Error) -> Self {
        ApiError::Internal(value.to_string())
    }
}

/// Checked-out pooled connection used inside blocking closures.
pub(crate) type Conn = PooledConnection<ConnectionManager<PgConnection>>;

pub(crate) fn conn(pool: &DbPool) -> Result<Conn, ApiError> {
    pool.get().map_err(|err| ApiError::Internal(err.to_string()))
}

/// Map the nested `web::block` result to an HTTP response.
pub(crate) fn respond<T: Serialize>(
    result: Result<Result<T, ApiError>, actix_web::error::BlockingError>,
    status: StatusCode,
) -> HttpResponse {
    match result {
        Ok(Ok(payload)) => HttpResponse::build(status).json(payload),
        Ok(Err(err)) => err.into_response(),
        Err(err) => ApiError::Internal(format!("blocking task failed: {err}")).into_response(),
    }
}

/// Current UTC time without sub-second noise in stored rows.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parse an ISO-8601 timestamp or bare date into a UTC timestamp.
pub(crate) fn parse_datetime(value: &str) -> chrono::ParseResult<NaiveDateTime> {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

#[derive(Clone)]
/// Authenticated caller resolved from the session cookie.
pub(crate) struct AuthContext {
    /// The user row behind the session.
    pub(crate) user: User,
    /// Parsed caller role.
    pub(crate) role: Role,
}

/// Resolve the session cookie into an [`AuthContext`].
///
/// Rejects missing/unknown sessions and inactive accounts with 401, and
/// callers whose role may not reach the request path with 403.
pub(crate) async fn require_auth(
    state: &web::Data<AppState>,
    req: &HttpRequest,
) -> Result<AuthContext, HttpResponse> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Err(ApiError::Unauthorized("missing session cookie".to_string()).into_response());
    };
    let token = cookie.value().to_string();
    let path = req.path().to_string();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let session = sessions::table
            .filter(sessions::token.eq(&token))
            .first::<Session>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::Unauthorized("session not found".to_string()))?;
        let user = users::table
            .filter(users::id.eq(&session.user_id))
            .first::<User>(&mut conn)?;
        if !user.is_active {
            return Err(ApiError::Unauthorized("account is inactive".to_string()));
        }
        let role = Role::parse(&user.role)
            .map_err(|err| ApiError::Internal(format!("stored role invalid: {err}")))?;
        if !can_access_path(role, &path) {
            return Err(ApiError::Forbidden(format!(
                "role {} cannot access {path}",
                role.as_str()
            )));
        }
        diesel::update(sessions::table.filter(sessions::id.eq(&session.id)))
            .set(sessions::last_used_at.eq(now()))
            .execute(&mut conn)?;
        Ok(AuthContext { user, role })
    })
    .await;

    match result {
        Ok(Ok(context)) => Ok(context),
        Ok(Err(err)) => Err(err.into_response()),
        Err(err) => {
            Err(ApiError::Internal(format!("auth task failed: {err}")).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[actix_web::get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> HttpResponse {
    use utoipa::OpenApi;
    HttpResponse::Ok().json(crate::openapi::ApiDoc::openapi())
}
