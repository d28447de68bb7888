#![deny(missing_docs)]
//! CrewDock command-line interface.
//!
//! Imports spreadsheet-exported crew and vessel lists, seeds demo data, and
//! reports contract alerts through the HTTP API of a running server.

mod auth;

use auth::{LoginArgs, normalize_base_url};
use clap::{Args, Parser, Subcommand};
use crewdock_core::{AlertSeverity, ContractAlert};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt::Write;
use std::io::Read;
use std::path::PathBuf;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "crewdock", version, about = "CrewDock CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ApiArgs {
    /// Base URL of the CrewDock server.
    #[arg(long, env = "CREWDOCK_API_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,
    /// Session token obtained via `crewdock login`.
    #[arg(long, env = "CREWDOCK_SESSION")]
    session: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and print a session token.
    Login(LoginArgs),
    /// Import spreadsheet-exported CSV data.
    Import {
        #[command(subcommand)]
        target: ImportTarget,
    },
    /// Post a small demo dataset for local development.
    Seed {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Fetch contract alerts and render a text table.
    Alerts {
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Subcommand)]
enum ImportTarget {
    /// Import a crew list (crewCode,fullName,rank,vessel,status).
    Crew {
        #[command(flatten)]
        api: ApiArgs,
        /// CSV file to import.
        #[arg(long)]
        file: PathBuf,
    },
    /// Import a vessel list (name,vesselType,flag,owner).
    Vessels {
        #[command(flatten)]
        api: ApiArgs,
        /// CSV file to import.
        #[arg(long)]
        file: PathBuf,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login(args) => auth::run_login(args).await?,
        Commands::Import {
            target: ImportTarget::Crew { api, file },
        } => {
            let client = ApiClient::new(&api)?;
            run_import_crew(&client, &file).await?;
        }
        Commands::Import {
            target: ImportTarget::Vessels { api, file },
        } => {
            let client = ApiClient::new(&api)?;
            run_import_vessels(&client, &file).await?;
        }
        Commands::Seed { api } => {
            let client = ApiClient::new(&api)?;
            run_seed(&client).await?;
        }
        Commands::Alerts { api } => {
            let client = ApiClient::new(&api)?;
            run_alerts(&client).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

/// Session-authenticated JSON client for the server API.
struct ApiClient {
    client: Client,
    base_url: String,
    cookie: String,
}

impl ApiClient {
    fn new(api: &ApiArgs) -> CliResult<Self> {
        let session = api.session.trim();
        if session.is_empty() {
            return Err("session token is required".into());
        }
        Ok(Self {
            client: Client::builder().user_agent("crewdock-cli").build()?,
            base_url: normalize_base_url(&api.base_url)?,
            cookie: format!("user_session={session}"),
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> CliResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("Cookie", &self.cookie)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn post(&self, path: &str, body: &Value) -> CliResult<Value> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("Cookie", &self.cookie)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    async fn put(&self, path: &str, body: &Value) -> CliResult<Value> {
        let response = self
            .client
            .put(format!("{}{path}", self.base_url))
            .header("Cookie", &self.cookie)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

/// One row of a crew list export.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct CrewRow {
    crew_code: String,
    full_name: String,
    rank: String,
    #[serde(default)]
    vessel: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// One row of a vessel list export.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct VesselRow {
    name: String,
    #[serde(default)]
    vessel_type: Option<String>,
    #[serde(default)]
    flag: Option<String>,
    #[serde(default)]
    owner: Option<String>,
}

/// Crew record fields needed to match imports against existing data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrewRecord {
    id: String,
    crew_code: String,
}

/// Vessel record fields needed to match imports against existing data.
#[derive(Debug, Deserialize)]
struct VesselRecord {
    id: String,
    name: String,
}

/// Owner record fields needed to resolve vessel ownership.
#[derive(Debug, Deserialize)]
struct OwnerRecord {
    id: String,
    name: String,
}

/// Contract alerts response returned by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertsResponse {
    alerts: Vec<ContractAlert>,
    count: usize,
    generated_at: String,
}

fn parse_crew_rows<R: Read>(reader: R) -> CliResult<Vec<CrewRow>> {
    let mut rows = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize::<CrewRow>() {
        let row = record?;
        if row.crew_code.trim().is_empty() {
            return Err("crew list rows require a crewCode value".into());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_vessel_rows<R: Read>(reader: R) -> CliResult<Vec<VesselRow>> {
    let mut rows = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize::<VesselRow>() {
        let row = record?;
        if row.name.trim().is_empty() {
            return Err("vessel list rows require a name value".into());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Import a crew list, matching rows to existing records by exact crew code.
async fn run_import_crew(client: &ApiClient, file: &PathBuf) -> CliResult<()> {
    let contents = tokio::fs::read(file).await?;
    let rows = parse_crew_rows(contents.as_slice())?;
    if rows.is_empty() {
        println!("No crew rows found in {}.", file.display());
        return Ok(());
    }

    let existing: Vec<CrewRecord> = client.get("/api/crew").await?;
    let mut created = 0usize;
    let mut updated = 0usize;
    for row in rows {
        let code = row.crew_code.trim();
        match existing.iter().find(|record| record.crew_code == code) {
            Some(record) => {
                let body = json!({
                    "fullName": row.full_name,
                    "rank": row.rank,
                    "vessel": row.vessel,
                });
                client.put(&format!("/api/crew/{}", record.id), &body).await?;
                updated += 1;
            }
            None => {
                let body = json!({
                    "crewCode": code,
                    "fullName": row.full_name,
                    "rank": row.rank,
                    "vessel": row.vessel,
                    "status": row.status,
                });
                client.post("/api/crew", &body).await?;
                created += 1;
            }
        }
    }

    println!("Imported crew: {created} created, {updated} updated.");
    Ok(())
}

/// Import a vessel list, creating missing owners and matching vessels by name.
async fn run_import_vessels(client: &ApiClient, file: &PathBuf) -> CliResult<()> {
    let contents = tokio::fs::read(file).await?;
    let rows = parse_vessel_rows(contents.as_slice())?;
    if rows.is_empty() {
        println!("No vessel rows found in {}.", file.display());
        return Ok(());
    }

    let vessels: Vec<VesselRecord> = client.get("/api/vessels").await?;
    let mut owners: Vec<OwnerRecord> = client.get("/api/owners").await?;
    let mut created = 0usize;
    let mut updated = 0usize;
    for row in rows {
        let owner_id = match row.owner.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Some(resolve_owner(client, &mut owners, name).await?)
            }
            _ => None,
        };
        let body = json!({
            "name": row.name,
            "vesselType": row.vessel_type,
            "flag": row.flag,
            "ownerId": owner_id,
        });
        match vessels.iter().find(|record| record.name == row.name) {
            Some(record) => {
                client
                    .put(&format!("/api/vessels/{}", record.id), &body)
                    .await?;
                updated += 1;
            }
            None => {
                client.post("/api/vessels", &body).await?;
                created += 1;
            }
        }
    }

    println!("Imported vessels: {created} created, {updated} updated.");
    Ok(())
}

/// Find an owner id by exact name, creating the owner when missing.
async fn resolve_owner(
    client: &ApiClient,
    owners: &mut Vec<OwnerRecord>,
    name: &str,
) -> CliResult<String> {
    if let Some(record) = owners.iter().find(|record| record.name == name) {
        return Ok(record.id.clone());
    }
    let body = json!({ "name": name });
    let response = client.post("/api/owners", &body).await?;
    let record: OwnerRecord = serde_json::from_value(response)?;
    let id = record.id.clone();
    owners.push(record);
    Ok(id)
}

/// Demo crew posted by the seed command.
fn seed_crew_payloads() -> Vec<Value> {
    vec![
        json!({
            "crewCode": "CREW-DEMO-001",
            "fullName": "WAYAN SUDARMA",
            "rank": "MASTER",
            "status": "APPLICANT",
        }),
        json!({
            "crewCode": "CREW-DEMO-002",
            "fullName": "KETUT ARTANA",
            "rank": "C/O",
            "status": "APPLICANT",
        }),
        json!({
            "crewCode": "CREW-DEMO-003",
            "fullName": "GEDE SUARTIKA",
            "rank": "OILER",
            "status": "APPLICANT",
        }),
    ]
}

/// Post a small demo dataset of crew and employment applications.
async fn run_seed(client: &ApiClient) -> CliResult<()> {
    let mut seeded = 0usize;
    for payload in seed_crew_payloads() {
        let created = client.post("/api/crew", &payload).await?;
        let crew_id = created
            .get("id")
            .and_then(Value::as_str)
            .ok_or("crew create response missing id")?
            .to_string();
        let rank = created.get("rank").and_then(Value::as_str).unwrap_or("");
        let application = json!({
            "crewId": crew_id,
            "appliedRank": rank,
            "notes": "Seeded for local development",
        });
        client.post("/api/applications", &application).await?;
        seeded += 1;
    }
    println!("Seeded {seeded} crew with employment applications.");
    Ok(())
}

/// Fetch contract alerts and print them as a text table.
async fn run_alerts(client: &ApiClient) -> CliResult<()> {
    let response: AlertsResponse = client.get("/api/contracts/alerts").await?;
    print!("{}", render_alerts_table(&response));
    Ok(())
}

fn severity_label(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Warning => "warning",
        AlertSeverity::Critical => "critical",
    }
}

/// Render contract alerts as an aligned text table.
fn render_alerts_table(response: &AlertsResponse) -> String {
    let mut output = String::new();
    if response.alerts.is_empty() {
        let _ = writeln!(output, "No contract alerts.");
        return output;
    }

    let headers = ["CREW", "RANK", "VESSEL", "OWNER", "SIGN-ON", "MONTHS", "SEVERITY"];
    let mut table: Vec<[String; 7]> = vec![headers.map(str::to_string)];
    for alert in &response.alerts {
        table.push([
            alert.full_name.clone(),
            alert.rank.clone(),
            alert.vessel_name.clone(),
            alert.owner.clone(),
            alert.sign_on.clone(),
            format!("{}/{}", alert.months_onboard, alert.contract_months),
            severity_label(alert.severity).to_string(),
        ]);
    }

    let mut widths = [0usize; 7];
    for row in &table {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    for row in &table {
        let mut line = String::new();
        for (index, cell) in row.iter().enumerate() {
            if index > 0 {
                line.push_str("  ");
            }
            let _ = write!(line, "{cell:<width$}", width = widths[index]);
        }
        let _ = writeln!(output, "{}", line.trim_end());
    }
    let _ = writeln!(
        output,
        "{} alert(s) generated at {}.",
        response.count, response.generated_at
    );
    output
}
