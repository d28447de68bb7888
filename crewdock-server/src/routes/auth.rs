//! Session authentication endpoints.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::crypto::verify_password;
use crate::models::{Session, User};
use crate::schema::{sessions, users};

use super::{ApiError, AppState, ErrorResponse, SESSION_COOKIE, conn, now, require_auth};

/// Login request payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Authenticated user profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Role string.
    pub role: String,
}

impl UserProfile {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = UserProfile),
        (status = 401, description = "Bad credentials or inactive account", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[post("/api/auth/login")]
/// Verify credentials and open a session, setting the `user_session` cookie.
pub async fn login(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> impl Responder {
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let user = users::table
            .filter(users::username.eq(&payload.username))
            .first::<User>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::Unauthorized("invalid credentials".to_string()))?;
        if !verify_password(&payload.password, &user.password_hash) {
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
        if !user.is_active {
            return Err(ApiError::Unauthorized("account is inactive".to_string()));
        }
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            token: Uuid::new_v4().to_string(),
            created_at: now(),
            last_used_at: now(),
        };
        diesel::insert_into(sessions::table)
            .values(&session)
            .execute(&mut conn)?;
        Ok((session.token, UserProfile::from_user(&user)))
    })
    .await;

    match result {
        Ok(Ok((token, profile))) => {
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish();
            HttpResponse::Ok().cookie(cookie).json(profile)
        }
        Ok(Err(err)) => err.into_response(),
        Err(err) => ApiError::Internal(format!("login task failed: {err}")).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session closed")
    ),
    tag = "auth"
)]
#[post("/api/auth/logout")]
/// Delete the current session and clear the cookie.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        let pool = state.pool.clone();
        let result = web::block(move || {
            let mut conn = conn(&pool)?;
            diesel::delete(sessions::table.filter(sessions::token.eq(&token)))
                .execute(&mut conn)?;
            Ok::<_, ApiError>(serde_json::json!({ "success": true }))
        })
        .await;
        if let Ok(Err(err)) = result {
            return err.into_response();
        }
    }
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();
    HttpResponse::build(StatusCode::OK)
        .cookie(removal)
        .json(serde_json::json!({ "success": true }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[get("/api/auth/me")]
/// Fetch the current authenticated user.
pub async fn me(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    HttpResponse::Ok().json(UserProfile::from_user(&context.user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use chrono::Utc;

    use crate::crypto::hash_password;
    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    fn seed_user(pool: &crate::db::DbPool, username: &str, password: &str, active: bool) {
        let mut conn = pool.get().expect("conn");
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password),
            full_name: "Port Captain".to_string(),
            email: Some("captain@example.test".to_string()),
            role: "CREWING_MANAGER".to_string(),
            is_active: active,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(users::table)
            .values(&user)
            .execute(&mut conn)
            .expect("insert user");
    }

    #[actix_web::test]
    async fn login_sets_cookie_and_me_round_trips() {
        let test_app = test_state();
        seed_user(&test_app.state.pool, "captain", "anchors", true);
        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(login)
                .service(me),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                username: "captain".to_string(),
                password: "anchors".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie");
        let token = cookie.value().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(session_cookie(&token))
            .to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.username, "captain");
        assert_eq!(profile.role, "CREWING_MANAGER");
    }

    #[actix_web::test]
    async fn login_rejects_bad_password() {
        let test_app = test_state();
        seed_user(&test_app.state.pool, "captain", "anchors", true);
        let app =
            test::init_service(App::new().app_data(test_app.state.clone()).service(login)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                username: "captain".to_string(),
                password: "wrong".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_rejects_inactive_account() {
        let test_app = test_state();
        seed_user(&test_app.state.pool, "retired", "anchors", false);
        let app =
            test::init_service(App::new().app_data(test_app.state.clone()).service(login)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                username: "retired".to_string(),
                password: "anchors".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_invalidates_session() {
        let test_app = test_state();
        let token = seed_session(&test_app.state.pool, "DIRECTOR");
        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(logout)
                .service(me),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(session_cookie(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(session_cookie(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn me_requires_cookie() {
        let test_app = test_state();
        let app =
            test::init_service(App::new().app_data(test_app.state.clone()).service(me)).await;

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
