//! Shared schema for fixtures, match events and commentary lines.
//!
//! Records coming from the data API are parsed leniently: a missing, null or
//! oddly-typed field becomes `None` (or an empty string) instead of an error,
//! so a single malformed record never poisons a whole batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub type FixtureId = u64;

pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const UNKNOWN_TEAM: &str = "Unknown Team";
pub const UNKNOWN_EVENT: &str = "Unknown Event";

// ── Fixtures ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Fixture {
    pub id: FixtureId,
    pub home: String,
    pub away: String,
    /// Short status code, e.g. `1H`, `HT`, `2H`, `ET`.
    pub status: String,
    pub elapsed: Option<u16>,
    pub league: Option<String>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl Fixture {
    /// Parse one entry of the `fixtures?live=all` response.
    ///
    /// Returns `None` only when the entry has no usable fixture id, since a
    /// fixture that cannot be selected is useless to the caller.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = value.pointer("/fixture/id").and_then(as_u64_lenient)?;
        Some(Self {
            id,
            home: str_at(value, "/teams/home/name").unwrap_or_else(|| "Home".to_string()),
            away: str_at(value, "/teams/away/name").unwrap_or_else(|| "Away".to_string()),
            status: str_at(value, "/fixture/status/short").unwrap_or_else(|| "?".to_string()),
            elapsed: value
                .pointer("/fixture/status/elapsed")
                .and_then(as_u64_lenient)
                .and_then(|m| u16::try_from(m).ok()),
            league: str_at(value, "/league/name"),
            home_goals: value
                .pointer("/goals/home")
                .and_then(as_u64_lenient)
                .and_then(|g| u32::try_from(g).ok()),
            away_goals: value
                .pointer("/goals/away")
                .and_then(as_u64_lenient)
                .and_then(|g| u32::try_from(g).ok()),
        })
    }

    /// Selection label shown in match pickers.
    pub fn label(&self) -> String {
        format!("{} vs {} ({})", self.home, self.away, self.status)
    }

    pub fn scoreline(&self) -> Option<String> {
        match (self.home_goals, self.away_goals) {
            (Some(h), Some(a)) => Some(format!("{} {h} - {a} {}", self.home, self.away)),
            _ => None,
        }
    }
}

// ── Events ──────────────────────────────────────────────────────────────

/// A discrete occurrence within a fixture (goal, card, substitution, ...).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub minute: Option<u16>,
    /// Stoppage-time minutes on top of `minute`.
    pub extra: Option<u16>,
    pub team: Option<String>,
    pub player: Option<String>,
    pub assist: Option<String>,
    pub kind: Option<String>,
    pub detail: String,
}

impl Event {
    /// Parse one entry of the `fixtures/events` response. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let detail = str_at(value, "/detail")
            .or_else(|| str_at(value, "/comments"))
            .unwrap_or_default();
        Self {
            minute: value
                .pointer("/time/elapsed")
                .and_then(as_u64_lenient)
                .and_then(|m| u16::try_from(m).ok()),
            extra: value
                .pointer("/time/extra")
                .and_then(as_u64_lenient)
                .and_then(|m| u16::try_from(m).ok()),
            team: str_at(value, "/team/name"),
            player: str_at(value, "/player/name"),
            assist: str_at(value, "/assist/name"),
            kind: str_at(value, "/type"),
            detail,
        }
    }

    pub fn team_name(&self) -> &str {
        self.team.as_deref().unwrap_or(UNKNOWN_TEAM)
    }

    pub fn player_name(&self) -> &str {
        self.player.as_deref().unwrap_or(UNKNOWN_PLAYER)
    }

    pub fn kind_name(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN_EVENT)
    }

    /// `"37"`, `"90+4"`, or `"?"` when the feed carries no minute.
    pub fn minute_label(&self) -> String {
        match (self.minute, self.extra) {
            (Some(m), Some(x)) if x > 0 => format!("{m}+{x}"),
            (Some(m), _) => m.to_string(),
            (None, _) => "?".to_string(),
        }
    }
}

// ── Commentary ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CommentaryLine {
    pub minute: String,
    pub team: String,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl CommentaryLine {
    pub fn for_event(event: &Event, text: String) -> Self {
        Self {
            minute: event.minute_label(),
            team: event.team_name().to_string(),
            text,
            generated_at: Utc::now(),
        }
    }
}

impl fmt::Display for CommentaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}' | {} — {}", self.minute, self.team, self.text)
    }
}

// ── Lenient JSON access ─────────────────────────────────────────────────

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn as_u64_lenient(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
