//! Form template and submission endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, web};
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FormSubmission, FormTemplate};
use crate::schema::{form_submissions, form_templates};

use super::{ApiError, AppState, ErrorResponse, conn, now, require_auth, respond};

/// Form template as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplateResponse {
    /// Template identifier.
    pub id: String,
    /// Unique template code.
    pub code: String,
    /// Template title.
    pub title: String,
    /// Template category.
    pub category: Option<String>,
    /// Template revision number.
    pub revision: i32,
    /// Stored file path, when file-backed.
    pub file_path: Option<String>,
}

impl From<FormTemplate> for FormTemplateResponse {
    fn from(template: FormTemplate) -> Self {
        Self {
            id: template.id,
            code: template.code,
            title: template.title,
            category: template.category,
            revision: template.revision,
            file_path: template.file_path,
        }
    }
}

/// Request payload for submitting a form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmitRequest {
    /// Template code to instantiate, required.
    pub template_code: String,
    /// Crew member the form concerns.
    pub crew_id: Option<String>,
    /// Submitted field values.
    pub data: serde_json::Value,
}

/// Form submission as served by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmissionResponse {
    /// Submission identifier.
    pub id: String,
    /// Template code.
    pub template_code: String,
    /// Template title.
    pub template_title: String,
    /// Crew member the form concerns, if any.
    pub crew_id: Option<String>,
    /// Submitting user name.
    pub submitted_by: String,
    /// Submitted field values.
    pub data: serde_json::Value,
    /// Submission timestamp, ISO-8601.
    pub submitted_at: String,
}

fn submission_response(
    submission: FormSubmission,
    template: &FormTemplate,
) -> Result<FormSubmissionResponse, ApiError> {
    let data = serde_json::from_str(&submission.data_json)
        .map_err(|err| ApiError::Internal(format!("stored form data is not JSON: {err}")))?;
    Ok(FormSubmissionResponse {
        id: submission.id,
        template_code: template.code.clone(),
        template_title: template.title.clone(),
        crew_id: submission.crew_id,
        submitted_by: submission.submitted_by,
        data,
        submitted_at: submission.created_at.and_utc().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/forms",
    responses(
        (status = 200, description = "Template listing", body = [FormTemplateResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "forms"
)]
#[get("/api/forms")]
/// List form templates by code.
pub async fn forms_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows = form_templates::table
            .order(form_templates::code.asc())
            .load::<FormTemplate>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(FormTemplateResponse::from)
            .collect::<Vec<_>>())
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/forms/{code}",
    params(("code" = String, Path, description = "Template code")),
    responses(
        (status = 200, description = "Template detail", body = FormTemplateResponse),
        (status = 404, description = "Template not found", body = ErrorResponse)
    ),
    tag = "forms"
)]
#[get("/api/forms/{code}")]
/// Fetch a form template by code.
pub async fn forms_get(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let code = path.into_inner();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let template = form_templates::table
            .filter(form_templates::code.eq(&code))
            .first::<FormTemplate>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("form template not found".to_string()))?;
        Ok(FormTemplateResponse::from(template))
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/forms/submissions",
    responses(
        (status = 200, description = "Submission listing", body = [FormSubmissionResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "forms"
)]
#[get("/api/forms/submissions")]
/// List form submissions, newest first.
pub async fn form_submissions_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows: Vec<(FormSubmission, FormTemplate)> = form_submissions::table
            .inner_join(form_templates::table)
            .order(form_submissions::created_at.desc())
            .load(&mut conn)?;
        rows.into_iter()
            .map(|(submission, template)| submission_response(submission, &template))
            .collect::<Result<Vec<_>, _>>()
    })
    .await;
    respond(result, StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/forms/submissions",
    request_body = FormSubmitRequest,
    responses(
        (status = 201, description = "Submission recorded", body = FormSubmissionResponse),
        (status = 400, description = "Missing template code", body = ErrorResponse),
        (status = 404, description = "Template not found", body = ErrorResponse)
    ),
    tag = "forms"
)]
#[post("/api/forms/submissions")]
/// Record a filled-in form against a template.
pub async fn form_submissions_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<FormSubmitRequest>,
) -> impl Responder {
    let context = match require_auth(&state, &req).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    let pool = state.pool.clone();
    let payload = payload.into_inner();
    let result = web::block(move || {
        if payload.template_code.trim().is_empty() {
            return Err(ApiError::BadRequest("templateCode is required".to_string()));
        }
        let mut conn = conn(&pool)?;
        let template = form_templates::table
            .filter(form_templates::code.eq(payload.template_code.trim()))
            .first::<FormTemplate>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("form template not found".to_string()))?;
        let submission = FormSubmission {
            id: Uuid::new_v4().to_string(),
            template_id: template.id.clone(),
            crew_id: payload.crew_id.filter(|id| !id.is_empty()),
            submitted_by: context.user.full_name.clone(),
            data_json: payload.data.to_string(),
            created_at: now(),
        };
        diesel::insert_into(form_submissions::table)
            .values(&submission)
            .execute(&mut conn)?;
        submission_response(submission, &template)
    })
    .await;
    respond(result, StatusCode::CREATED)
}
