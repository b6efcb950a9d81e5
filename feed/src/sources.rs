//! API-Football data source.
//!
//! Two calls are used: `GET /fixtures?live=all` for the match picker and
//! `GET /fixtures/events?fixture={id}` for a match's event feed. Both are
//! single attempts; callers decide how to surface a failure.

use crate::config::PitchsideConfig;
use pitchside_types::{Event, Fixture, FixtureId};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const API_KEY_HEADER: &str = "x-apisports-key";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("API error: {0}")]
    Api(String),
    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}

pub trait FixtureSource {
    fn live_fixtures(&self) -> impl Future<Output = Result<Vec<Fixture>, SourceError>> + Send;
}

pub trait EventSource {
    fn fixture_events(
        &self,
        fixture: FixtureId,
    ) -> impl Future<Output = Result<Vec<Event>, SourceError>> + Send;
}

#[derive(Clone)]
pub struct ApiFootballClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ApiFootballClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &PitchsideConfig) -> Result<Self, SourceError> {
        Self::new(&config.api_base, &config.api_key, config.http_timeout)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Value>, SourceError> {
        let url = format!("{}/{}", self.base_url, path);
        let res = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let json: Value = res.json().await?;
        let items = response_items(&json)?;
        tracing::debug!(path, count = items.len(), "api-football response");
        Ok(items.to_vec())
    }
}

impl FixtureSource for ApiFootballClient {
    async fn live_fixtures(&self) -> Result<Vec<Fixture>, SourceError> {
        let items = self.get("fixtures", &[("live", "all")]).await?;
        Ok(parse_fixtures(&items))
    }
}

impl EventSource for ApiFootballClient {
    async fn fixture_events(&self, fixture: FixtureId) -> Result<Vec<Event>, SourceError> {
        let id = fixture.to_string();
        let items = self.get("fixtures/events", &[("fixture", id.as_str())]).await?;
        Ok(parse_events(&items))
    }
}

/// Unwrap the `{"errors": ..., "response": [...]}` envelope.
///
/// API-Football reports bad keys and exhausted quotas with HTTP 200 and a
/// non-empty `errors` field, which may be an array or an object.
pub fn response_items(json: &Value) -> Result<&[Value], SourceError> {
    if let Some(message) = api_error_message(json.get("errors")) {
        return Err(SourceError::Api(message));
    }
    json.get("response")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or(SourceError::Shape("missing `response` array"))
}

fn api_error_message(errors: Option<&Value>) -> Option<String> {
    let parts: Vec<String> = match errors? {
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", value_text(v)))
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn parse_fixtures(items: &[Value]) -> Vec<Fixture> {
    items
        .iter()
        .filter_map(|item| {
            let parsed = Fixture::from_value(item);
            if parsed.is_none() {
                tracing::warn!("skipping live fixture without an id");
            }
            parsed
        })
        .collect()
}

pub fn parse_events(items: &[Value]) -> Vec<Event> {
    items.iter().map(Event::from_value).collect()
}
