//! Calendar sources: the GitHub GraphQL API and JSON files on disk.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::calendar::RawCalendar;
use crate::{Error, Result};

const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
            contributionLevel
          }
        }
      }
    }
  }
}
"#;

/// Supplies the raw contribution calendar.
pub trait CalendarSource {
    fn fetch(&self) -> Result<RawCalendar>;
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub username: String,
    /// Personal access token; sent as a bearer token when present
    pub token: Option<String>,
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl GitHubConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: None,
            endpoint: "https://api.github.com/graphql".to_string(),
            user_agent: concat!("grasscanvas/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: CollectionNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    contribution_calendar: RawCalendar,
}

/// Pull the calendar out of a GraphQL response body.
pub fn parse_graphql_response(body: &str) -> Result<RawCalendar> {
    let response: GraphQlResponse = serde_json::from_str(body)
        .map_err(|e| Error::FetchError(format!("Malformed GraphQL response: {}", e)))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(Error::FetchError(format!(
            "GraphQL errors: {}",
            messages.join("; ")
        )));
    }

    response
        .data
        .and_then(|d| d.user)
        .map(|u| u.contributions_collection.contribution_calendar)
        .ok_or_else(|| Error::FetchError("User not found".into()))
}

/// Fetches the past year of contributions for one user.
pub struct GitHubSource {
    client: Client,
    config: GitHubConfig,
}

impl GitHubSource {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.username.trim().is_empty() {
            return Err(Error::ConfigError("GitHub username is required".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }
}

impl CalendarSource for GitHubSource {
    fn fetch(&self) -> Result<RawCalendar> {
        let body = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "username": self.config.username },
        });

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        log::info!("fetching contributions for {}", self.config.username);
        let resp = request
            .send()
            .map_err(|e| Error::FetchError(format!("POST {} failed: {}", self.config.endpoint, e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| Error::FetchError(format!("Failed to read response body: {}", e)))?;
        if !status.is_success() {
            return Err(Error::FetchError(format!("HTTP {}: {}", status, text.trim())));
        }

        let calendar = parse_graphql_response(&text)?;
        log::info!("total contributions: {}", calendar.total_contributions);
        Ok(calendar)
    }
}

/// Reads a calendar saved on disk, either the bare `contributionCalendar`
/// object or a whole GraphQL response.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CalendarSource for JsonFileSource {
    fn fetch(&self) -> Result<RawCalendar> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::FetchError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            Error::FetchError(format!("Malformed JSON in {}: {}", self.path.display(), e))
        })?;
        let is_response = value
            .as_object()
            .map_or(false, |o| o.contains_key("data") || o.contains_key("errors"));
        if is_response {
            return parse_graphql_response(&text);
        }
        serde_json::from_value(value).map_err(|e| {
            Error::FetchError(format!("Malformed calendar in {}: {}", self.path.display(), e))
        })
    }
}
