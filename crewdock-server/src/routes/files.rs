//! Raw document file serving from the configured docs root.

use std::path::{Component, Path as FsPath, PathBuf};

use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use super::{AppState, ErrorResponse, require_auth};

fn content_type_for(path: &FsPath) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[utoipa::path(
    get,
    path = "/docs/{path}",
    params(("path" = String, Path, description = "Relative path under the docs root")),
    responses(
        (status = 200, description = "File contents"),
        (status = 400, description = "Path traversal rejected", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    tag = "files"
)]
#[get("/api/docs/{path:.*}")]
/// Serve a stored document file; content type follows the extension.
pub async fn serve_document(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let relative = path.into_inner();
    let candidate = PathBuf::from(&relative);
    if candidate
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return HttpResponse::BadRequest().json(ErrorResponse {
            message: "invalid document path".to_string(),
        });
    }
    let full = state.docs_root.join(&candidate);
    let result = web::block(move || std::fs::read(&full).map(|bytes| (bytes, full))).await;
    match result {
        Ok(Ok((bytes, full))) => HttpResponse::Ok()
            .content_type(content_type_for(&full))
            .body(bytes),
        Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse {
                message: "document not found".to_string(),
            })
        }
        Ok(Err(err)) => {
            log::error!("document read failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: "failed to read document".to_string(),
            })
        }
        Err(err) => {
            log::error!("blocking document read failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: "failed to read document".to_string(),
            })
        }
    }
}
