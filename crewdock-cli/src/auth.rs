//! Session login for the CrewDock CLI.

use crate::CliResult;
use clap::Args;
use reqwest::Client;
use reqwest::header::SET_COOKIE;
use serde::{Deserialize, Serialize};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const SESSION_COOKIE: &str = "user_session";

/// CLI arguments for the login command.
#[derive(Args, Clone, Debug)]
pub struct LoginArgs {
    /// Base URL of the CrewDock server.
    #[arg(long, env = "CREWDOCK_API_URL", default_value = DEFAULT_SERVER_URL)]
    pub base_url: String,
    /// Login name.
    #[arg(long)]
    pub username: String,
    /// Plain-text password.
    #[arg(long)]
    pub password: String,
}

/// Login request body accepted by the server.
#[derive(Debug, Serialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Profile returned on a successful login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginProfile {
    username: String,
    full_name: String,
    role: String,
}

/// Authenticate against the server and print the session token.
pub async fn run_login(args: LoginArgs) -> CliResult<()> {
    let client = Client::builder().user_agent("crewdock-cli").build()?;
    let base_url = normalize_base_url(&args.base_url)?;
    let response = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&LoginRequest {
            username: args.username,
            password: args.password,
        })
        .send()
        .await?
        .error_for_status()?;

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect();
    let token = session_token_from_set_cookie(&cookies)
        .ok_or("login response did not set a session cookie")?;
    let profile = response.json::<LoginProfile>().await?;

    println!(
        "Logged in as {} ({}, role {}).",
        profile.username, profile.full_name, profile.role
    );
    println!("{token}");
    Ok(())
}

/// Trim whitespace and trailing slashes from the server URL.
pub fn normalize_base_url(base_url: &str) -> CliResult<String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err("base url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Extract the session token from `Set-Cookie` header values.
fn session_token_from_set_cookie(values: &[String]) -> Option<String> {
    values.iter().find_map(|value| {
        let pair = value.split(';').next()?.trim();
        let (name, token) = pair.split_once('=')?;
        if name == SESSION_COOKIE && !token.is_empty() {
            Some(token.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        let url = normalize_base_url("http://localhost:8080/").expect("url");
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn normalize_base_url_rejects_empty() {
        let err = normalize_base_url("   ").unwrap_err();
        assert!(err.to_string().contains("base url"));
    }

    #[test]
    fn session_token_parses_cookie_attributes() {
        let cookies = vec![
            "other=1; Path=/".to_string(),
            "user_session=abc-123; Path=/; HttpOnly".to_string(),
        ];
        assert_eq!(
            session_token_from_set_cookie(&cookies),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn session_token_ignores_empty_values() {
        let cookies = vec!["user_session=; Path=/".to_string()];
        assert_eq!(session_token_from_set_cookie(&cookies), None);
    }
}
