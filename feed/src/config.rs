use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::time::Duration;

// ── Defaults ────────────────────────────────────────────────────────────

const DEFAULT_API_BASE: &str = "https://v3.football.api-sports.io";
const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_DASHBOARD_BIND: &str = "127.0.0.1:3000";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
/// Only shown to the user; nothing polls on its own.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Where to look for the API-Football key when `APISPORTS_KEY` is unset.
const KEY_FILE_CANDIDATES: &[&str] = &[
    "~/.config/api-sports/key",
    "~/.config/api-football/key",
    "~/.api-sports/key",
];

// ── Config struct ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PitchsideConfig {
    pub api_key: String,
    pub api_base: String,
    pub http_timeout: Duration,
    pub ollama_host: String,
    pub model: String,
    pub model_timeout: Duration,
    pub poll_interval_secs: u64,
    pub dashboard_bind: String,
}

impl PitchsideConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env_string("APISPORTS_KEY")
            .or_else(|| read_key_file(KEY_FILE_CANDIDATES))
            .context("APISPORTS_KEY is not set and no API-Football key file was found")?;

        Ok(Self {
            api_key,
            api_base: env_string("PITCHSIDE_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            http_timeout: Duration::from_secs(env_u64(
                "PITCHSIDE_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            ollama_host: env_string("OLLAMA_HOST")
                .map(|h| normalize_host(&h))
                .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            model: env_string("PITCHSIDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_timeout: Duration::from_secs(env_u64(
                "PITCHSIDE_MODEL_TIMEOUT_SECS",
                DEFAULT_MODEL_TIMEOUT_SECS,
            )),
            poll_interval_secs: env_u64("PITCHSIDE_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS),
            dashboard_bind: env_string("DASHBOARD_BIND")
                .unwrap_or_else(|| DEFAULT_DASHBOARD_BIND.to_string()),
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Some(val.trim().to_string()),
        _ => None,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(val) => val.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// `OLLAMA_HOST` is commonly set as a bare `host:port`.
fn normalize_host(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

fn read_key_file(candidates: &[&str]) -> Option<String> {
    for path in candidates {
        let expanded = shellexpand::tilde(path).into_owned();
        if let Ok(content) = fs::read_to_string(&expanded) {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_non_empty_key_file_wins() {
        let dir = tempdir().expect("tempdir");
        let empty = dir.path().join("empty");
        let real = dir.path().join("key");
        fs::write(&empty, "  \n").expect("write empty");
        fs::write(&real, "abc123\n").expect("write key");

        let missing = dir.path().join("missing").display().to_string();
        let empty = empty.display().to_string();
        let real = real.display().to_string();
        let found = read_key_file(&[missing.as_str(), empty.as_str(), real.as_str()]);
        assert_eq!(found.as_deref(), Some("abc123"));
    }

    #[test]
    fn no_key_file_yields_none() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("nope").display().to_string();
        assert_eq!(read_key_file(&[missing.as_str()]), None);
    }

    #[test]
    fn bare_ollama_host_gets_a_scheme() {
        assert_eq!(normalize_host("0.0.0.0:11434"), "http://0.0.0.0:11434");
        assert_eq!(normalize_host("https://gpu.local"), "https://gpu.local");
    }
}
