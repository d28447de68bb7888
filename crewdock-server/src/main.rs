#![deny(missing_docs)]
//! CrewDock server executable.
//!
//! Hosts the HTTP API for crew management, document control, and QMS records.

mod crypto;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[allow(unused_imports)]
use std::str::FromStr;

#[cfg(not(test))]
use crate::db::{init_pool, run_migrations};
#[cfg(not(test))]
use crate::routes::{AppState, openapi_json};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let pool = init_pool();
    run_migrations(&pool);

    let docs_root = std::env::var("CREWDOCK_DOCS_ROOT")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("crewdock-docs"));
    let state = web::Data::new(AppState { pool, docs_root });

    let origins = std::env::var("CREWDOCK_UI_ORIGINS")
        .unwrap_or_else(|_| "http://127.0.0.1:3000,http://localhost:3000".to_string());
    let allowed_origins: Vec<String> = origins
        .split(',')
        .map(|value| value.trim())
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    let listen_addr = std::env::var("CREWDOCK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("CREWDOCK_PORT").unwrap_or_else(|_| "8080".to_string()))
            .expect("CREWDOCK_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .supports_credentials()
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .service(routes::auth::login)
                .service(routes::auth::logout)
                .service(routes::auth::me)
                .service(routes::crew::crew_list)
                .service(routes::crew::crew_create)
                .service(routes::crew::crew_reporting_status)
                .service(routes::crew::crew_status_change)
                .service(routes::crew::crew_status_options)
                .service(routes::crew::crew_get)
                .service(routes::crew::crew_update)
                .service(routes::crew::crew_delete)
                .service(routes::service_records::evaluation_create)
                .service(routes::service_records::repatriation_create)
                .service(routes::service_records::sea_service_list)
                .service(routes::service_records::sea_service_create)
                .service(routes::service_records::sea_service_update)
                .service(routes::service_records::sea_service_delete)
                .service(routes::vessels::vessels_list)
                .service(routes::vessels::vessels_create)
                .service(routes::vessels::vessels_update)
                .service(routes::vessels::vessels_delete)
                .service(routes::owners::owners_list)
                .service(routes::owners::owners_create)
                .service(routes::owners::owners_update)
                .service(routes::assignments::assignments_list)
                .service(routes::assignments::assignments_create)
                .service(routes::assignments::assignments_extend)
                .service(routes::assignments::assignments_sign_off)
                .service(routes::certificates::certificates_expiring)
                .service(routes::certificates::certificates_list)
                .service(routes::certificates::certificates_create)
                .service(routes::certificates::certificates_update)
                .service(routes::certificates::certificates_delete)
                .service(routes::alerts::contract_alerts)
                .service(routes::applications::applications_list)
                .service(routes::applications::applications_create)
                .service(routes::applications::applications_update)
                .service(routes::applications::applications_approve)
                .service(routes::applications::checklists_list)
                .service(routes::applications::checklists_create)
                .service(routes::documents::documents_list)
                .service(routes::documents::documents_create)
                .service(routes::documents::documents_approve)
                .service(routes::documents::documents_revise)
                .service(routes::documents::documents_distribute)
                .service(routes::documents::documents_acknowledge)
                .service(routes::documents::documents_get)
                .service(routes::documents::documents_update)
                .service(routes::documents::documents_delete)
                .service(routes::forms::form_submissions_list)
                .service(routes::forms::form_submissions_create)
                .service(routes::forms::forms_list)
                .service(routes::forms::forms_get)
                .service(routes::qms::risks_list)
                .service(routes::qms::risks_create)
                .service(routes::qms::cpar_list)
                .service(routes::qms::cpar_create)
                .service(routes::qms::audits_list)
                .service(routes::qms::audits_create)
                .service(routes::qms::suppliers_list)
                .service(routes::qms::suppliers_create)
                .service(routes::qms::complaints_list)
                .service(routes::qms::complaints_create)
                .service(routes::files::serve_document)
                .service(openapi_json)
        })
        .bind((listen_addr, listen_port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
