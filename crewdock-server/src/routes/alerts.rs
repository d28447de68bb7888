//! Contract-expiry alert endpoint.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, web};
use crewdock_core::{ContractAlert, OnboardAssignment, compute_alerts};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Assignment, Crew, Owner, Vessel};
use crate::schema::{assignments, crew, owners, vessels};

use super::{AppState, ErrorResponse, conn, now, require_auth, respond};

/// Response payload for the contract alert report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractAlertsResponse {
    /// Alert entries, sign-on ascending (longest-serving first).
    pub alerts: Vec<ContractAlert>,
    /// Number of alert entries.
    pub count: usize,
    /// When the report was computed, ISO-8601.
    pub generated_at: String,
}

#[utoipa::path(
    get,
    path = "/contracts/alerts",
    responses(
        (status = 200, description = "Crew approaching or past contract end", body = ContractAlertsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "contracts"
)]
#[get("/api/contracts/alerts")]
/// Report crew whose time onboard approaches or exceeds the owner's contract length.
pub async fn contract_alerts(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(response) = require_auth(&state, &req).await {
        return response;
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = conn(&pool)?;
        let rows: Vec<(Assignment, Crew)> = assignments::table
            .inner_join(crew::table)
            .filter(assignments::status.eq("ONBOARD"))
            .filter(assignments::sign_on.is_not_null())
            .filter(crew::crew_status.eq("ONBOARD"))
            .order(assignments::sign_on.asc())
            .load(&mut conn)?;

        // Owner lookup by vessel name; assignments imported from manning
        // lists may predate vessel records.
        let fleet: Vec<(Vessel, Option<Owner>)> =
            vessels::table.left_join(owners::table).load(&mut conn)?;
        let owner_by_vessel: HashMap<String, String> = fleet
            .into_iter()
            .filter_map(|(vessel, owner)| owner.map(|owner| (vessel.name, owner.name)))
            .collect();

        let onboard: Vec<OnboardAssignment> = rows
            .into_iter()
            .filter_map(|(assignment, member)| {
                assignment.sign_on.map(|sign_on| OnboardAssignment {
                    assignment_id: assignment.id,
                    crew_id: member.id,
                    full_name: member.full_name,
                    rank: assignment.rank,
                    owner: owner_by_vessel
                        .get(&assignment.vessel_name)
                        .cloned()
                        .unwrap_or_default(),
                    vessel_name: assignment.vessel_name,
                    sign_on,
                })
            })
            .collect();

        let stamp = now();
        let alerts = compute_alerts(&onboard, stamp);
        Ok(ContractAlertsResponse {
            count: alerts.len(),
            alerts,
            generated_at: stamp.and_utc().to_rfc3339(),
        })
    })
    .await;
    respond(result, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use chrono::Duration;
    use uuid::Uuid;

    use crate::routes::test_util::{seed_session, session_cookie, test_state};

    fn seed_onboard(pool: &crate::db::DbPool, name: &str, vessel: &str, days_onboard: i64) {
        let mut conn = pool.get().expect("connection");
        let stamp = now();
        let member = Crew {
            id: Uuid::new_v4().to_string(),
            crew_code: format!("CREW-{}", Uuid::new_v4().simple()),
            full_name: name.to_string(),
            rank: "AB".to_string(),
            crew_status: "ONBOARD".to_string(),
            vessel_name: Some(vessel.to_string()),
            date_of_birth: None,
            place_of_birth: None,
            address: None,
            phone: None,
            reported_to_office: false,
            reported_to_office_date: None,
            last_offboard_date: None,
            inactive_reason: None,
            offboard_notes: None,
            created_at: stamp,
            updated_at: stamp,
        };
        diesel::insert_into(crew::table)
            .values(&member)
            .execute(&mut conn)
            .expect("insert crew");
        let placement = Assignment {
            id: Uuid::new_v4().to_string(),
            crew_id: member.id,
            vessel_id: None,
            vessel_name: vessel.to_string(),
            rank: "AB".to_string(),
            status: "ONBOARD".to_string(),
            sign_on: Some(stamp - Duration::days(days_onboard)),
            sign_off: None,
            created_at: stamp,
        };
        diesel::insert_into(assignments::table)
            .values(&placement)
            .execute(&mut conn)
            .expect("insert assignment");
    }

    fn seed_owner_vessel(pool: &crate::db::DbPool, owner_name: &str, vessel_name: &str) {
        let mut conn = pool.get().expect("connection");
        let owner = Owner {
            id: Uuid::new_v4().to_string(),
            name: owner_name.to_string(),
            code: None,
            country: None,
            contact: None,
            email: None,
            notes: None,
            created_at: now(),
        };
        diesel::insert_into(owners::table)
            .values(&owner)
            .execute(&mut conn)
            .expect("insert owner");
        let vessel = Vessel {
            id: Uuid::new_v4().to_string(),
            name: vessel_name.to_string(),
            vessel_type: None,
            flag: None,
            owner_id: Some(owner.id),
            created_at: now(),
        };
        diesel::insert_into(vessels::table)
            .values(&vessel)
            .execute(&mut conn)
            .expect("insert vessel");
    }

    #[actix_web::test]
    async fn alerts_respect_owner_policy_thresholds() {
        let test_app = test_state();
        let cookie = session_cookie(&seed_session(&test_app.state.pool, "CREWING_MANAGER"));
        seed_owner_vessel(&test_app.state.pool, "LUNDQVIST REDERIERNA AB", "ALFA BALTICA");

        // 7 months under a 9-month policy: dropped. 7 months under the
        // default policy: critical. 6 months under the default: warning.
        seed_onboard(&test_app.state.pool, "NURDIN HASAN", "ALFA BALTICA", 212);
        seed_onboard(&test_app.state.pool, "OPAN SURYANA", "BETA CARRIER", 212);
        seed_onboard(&test_app.state.pool, "PANJI WIBOWO", "BETA CARRIER", 185);
        seed_onboard(&test_app.state.pool, "RAHMAT FAUZI", "BETA CARRIER", 30);

        let app = test::init_service(
            App::new()
                .app_data(test_app.state.clone())
                .service(contract_alerts),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/contracts/alerts")
            .insert_header(cookie)
            .to_request();
        let report: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let alerts = report["alerts"].as_array().expect("alerts array");
        assert_eq!(alerts.len(), 2);
        let by_name: std::collections::HashMap<&str, &serde_json::Value> = alerts
            .iter()
            .map(|alert| (alert["fullName"].as_str().expect("name"), alert))
            .collect();
        assert_eq!(by_name["OPAN SURYANA"]["severity"], "critical");
        assert_eq!(by_name["OPAN SURYANA"]["owner"], "Unknown");
        assert_eq!(by_name["PANJI WIBOWO"]["severity"], "warning");
        assert!(!by_name.contains_key("NURDIN HASAN"));
        assert_eq!(report["count"], 2);
    }
}
