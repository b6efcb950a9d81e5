//! The two user-triggered actions: list live matches, and fetch the latest
//! commentary for the selected one. Failures never escape; they come back as
//! a message for the front end to show.

use crate::assembler::assimilate;
use crate::generator::TextGenerator;
use crate::session::MatchSession;
use crate::sources::{EventSource, FixtureSource};
use pitchside_types::Fixture;
use serde::Serialize;

pub const NO_NEW_EVENTS: &str = "No new events since last check.";
pub const NO_LIVE_MATCHES: &str = "No live matches found right now. Try again later.";

#[derive(Debug, Clone, Default, Serialize)]
pub struct FixtureListing {
    pub fixtures: Vec<Fixture>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RefreshOutcome {
    pub new_lines: usize,
    pub error: Option<String>,
}

impl RefreshOutcome {
    /// Info line for a successful fetch that produced nothing new.
    pub fn notice(&self) -> Option<&'static str> {
        (self.error.is_none() && self.new_lines == 0).then_some(NO_NEW_EVENTS)
    }
}

pub async fn list_fixtures<S: FixtureSource>(source: &S) -> FixtureListing {
    match source.live_fixtures().await {
        Ok(fixtures) => FixtureListing {
            fixtures,
            error: None,
        },
        Err(e) => {
            tracing::warn!(err = ?e, "fetching live fixtures failed");
            FixtureListing {
                fixtures: Vec::new(),
                error: Some(format!("Error fetching live fixtures: {e}")),
            }
        }
    }
}

/// Fetch the session's events, commentate the new ones and put them on top
/// of the feed. A failed fetch leaves the session untouched.
pub async fn refresh<S, G>(session: &mut MatchSession, source: &S, generator: &G) -> RefreshOutcome
where
    S: EventSource,
    G: TextGenerator,
{
    let fixture = session.fixture_id();
    let events = match source.fixture_events(fixture).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(err = ?e, fixture, "fetching events failed");
            return RefreshOutcome {
                new_lines: 0,
                error: Some(format!("Error fetching events: {e}")),
            };
        }
    };

    let lines = assimilate(&events, session.seen_mut(), generator).await;
    let new_lines = lines.len();
    session.prepend_lines(lines);
    tracing::info!(
        fixture,
        fetched = events.len(),
        new_lines,
        seen = session.seen().len(),
        "refresh complete"
    );

    RefreshOutcome {
        new_lines,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::tests::{ev, EchoGenerator};
    use crate::session::select_match;
    use crate::sources::SourceError;
    use pitchside_types::{Event, FixtureId};
    use std::sync::Mutex;

    /// Hands out queued batches in order; an exhausted queue is an API error.
    struct ScriptedSource {
        batches: Mutex<Vec<Result<Vec<Event>, SourceError>>>,
    }

    impl ScriptedSource {
        fn new(mut batches: Vec<Result<Vec<Event>, SourceError>>) -> Self {
            batches.reverse();
            Self {
                batches: Mutex::new(batches),
            }
        }
    }

    impl EventSource for ScriptedSource {
        async fn fixture_events(&self, _fixture: FixtureId) -> Result<Vec<Event>, SourceError> {
            let next = self.batches.lock().unwrap().pop();
            next.unwrap_or_else(|| Err(SourceError::Api("no more batches".to_string())))
        }
    }

    impl FixtureSource for ScriptedSource {
        async fn live_fixtures(&self) -> Result<Vec<Fixture>, SourceError> {
            Err(SourceError::Api("quota exceeded".to_string()))
        }
    }

    fn feed_texts(session: &MatchSession) -> Vec<String> {
        session.feed().map(|l| l.text.clone()).collect()
    }

    #[tokio::test]
    async fn sequential_refreshes_stack_newest_batch_on_top() {
        let ev1 = ev(10, "A", "Goal", "Normal Goal");
        let ev2 = ev(55, "B", "Card", "Yellow Card");
        let source = ScriptedSource::new(vec![Ok(vec![ev1.clone()]), Ok(vec![ev1, ev2])]);
        let gen = EchoGenerator::default();
        let mut session = select_match(None, 99);

        let first = refresh(&mut session, &source, &gen).await;
        assert_eq!(first.new_lines, 1);
        assert_eq!(feed_texts(&session), vec!["A Goal"]);

        let second = refresh(&mut session, &source, &gen).await;
        assert_eq!(second.new_lines, 1);
        assert_eq!(feed_texts(&session), vec!["B Card", "A Goal"]);
    }

    #[tokio::test]
    async fn nothing_new_reports_notice() {
        let ev1 = ev(10, "A", "Goal", "");
        let source = ScriptedSource::new(vec![Ok(vec![ev1.clone()]), Ok(vec![ev1])]);
        let gen = EchoGenerator::default();
        let mut session = select_match(None, 99);

        refresh(&mut session, &source, &gen).await;
        let outcome = refresh(&mut session, &source, &gen).await;
        assert_eq!(outcome.new_lines, 0);
        assert_eq!(outcome.notice(), Some(NO_NEW_EVENTS));
        assert_eq!(session.feed_len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_message_and_keeps_session() {
        let source = ScriptedSource::new(vec![
            Ok(vec![ev(10, "A", "Goal", "")]),
            Err(SourceError::Api("token: Error/Missing application key".to_string())),
        ]);
        let gen = EchoGenerator::default();
        let mut session = select_match(None, 99);
        refresh(&mut session, &source, &gen).await;

        let outcome = refresh(&mut session, &source, &gen).await;
        assert_eq!(outcome.new_lines, 0);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Error fetching events: API error: token: Error/Missing application key")
        );
        assert_eq!(outcome.notice(), None);
        assert_eq!(feed_texts(&session), vec!["A Goal"]);
        assert_eq!(session.seen().len(), 1);
    }

    #[tokio::test]
    async fn fixture_failure_becomes_empty_listing() {
        let listing = list_fixtures(&ScriptedSource::new(Vec::new())).await;
        assert!(listing.fixtures.is_empty());
        assert_eq!(
            listing.error.as_deref(),
            Some("Error fetching live fixtures: API error: quota exceeded")
        );
    }
}
