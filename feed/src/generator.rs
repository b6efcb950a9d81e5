use crate::config::PitchsideConfig;
use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Text-generation collaborator. Implementations never fail: errors are
/// folded into the returned text so one bad call only degrades one line.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = String> + Send;
}

pub fn model_error_placeholder(err: &anyhow::Error) -> String {
    format!("(Model error: {err:#})")
}

#[derive(Clone)]
pub struct OllamaClient {
    http: Client,
    host: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

impl OllamaClient {
    pub fn new(host: &str, model: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("build ollama http client")?;
        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &PitchsideConfig) -> Result<Self> {
        Self::new(&config.ollama_host, &config.model, config.model_timeout)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let res = self
            .http
            .post(format!("{}/api/generate", self.host))
            .json(&body)
            .send()
            .await
            .context("send generate request")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            bail!("model call failed: {} - {}", status, text);
        }

        let json: Value = res.json().await.context("decode generate response")?;
        response_text(&json)
    }
}

impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(err = ?e, model = %self.model, "commentary generation failed");
                model_error_placeholder(&e)
            }
        }
    }
}

fn response_text(json: &Value) -> Result<String> {
    if let Some(err) = json.get("error").and_then(Value::as_str) {
        bail!("model returned error: {err}");
    }
    Ok(json
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string())
}
