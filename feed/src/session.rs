use crate::seen::SeenSet;
use pitchside_types::{CommentaryLine, FixtureId};
use std::collections::VecDeque;

/// State for the match currently being followed: which events already have
/// commentary, and the feed itself (newest first).
#[derive(Debug, Clone)]
pub struct MatchSession {
    fixture_id: FixtureId,
    seen: SeenSet,
    feed: VecDeque<CommentaryLine>,
}

impl MatchSession {
    pub fn new(fixture_id: FixtureId) -> Self {
        Self {
            fixture_id,
            seen: SeenSet::new(),
            feed: VecDeque::new(),
        }
    }

    pub fn fixture_id(&self) -> FixtureId {
        self.fixture_id
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn seen_mut(&mut self) -> &mut SeenSet {
        &mut self.seen
    }

    /// Feed lines, newest first.
    pub fn feed(&self) -> impl Iterator<Item = &CommentaryLine> {
        self.feed.iter()
    }

    pub fn feed_len(&self) -> usize {
        self.feed.len()
    }

    /// Put a freshly assembled batch (oldest first) above everything already
    /// in the feed, keeping the batch's own order.
    pub fn prepend_lines(&mut self, lines: Vec<CommentaryLine>) {
        for line in lines.into_iter().rev() {
            self.feed.push_front(line);
        }
    }
}

/// Switch to `fixture_id`. The current session is kept as-is when it already
/// follows that fixture; otherwise its seen-set and feed are dropped.
pub fn select_match(current: Option<MatchSession>, fixture_id: FixtureId) -> MatchSession {
    match current {
        Some(session) if session.fixture_id == fixture_id => session,
        _ => MatchSession::new(fixture_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assimilate;
    use crate::assembler::tests::{ev, EchoGenerator};
    use crate::identity::identity;
    use pitchside_types::Event;

    fn line(text: &str) -> CommentaryLine {
        CommentaryLine::for_event(&Event::default(), text.to_string())
    }

    fn feed_texts(session: &MatchSession) -> Vec<String> {
        session.feed().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn prepend_puts_new_batch_on_top_in_batch_order() {
        let mut session = MatchSession::new(7);
        session.prepend_lines(vec![line("a"), line("b")]);
        session.prepend_lines(vec![line("c"), line("d")]);
        assert_eq!(feed_texts(&session), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn prepend_empty_batch_is_a_no_op() {
        let mut session = MatchSession::new(7);
        session.prepend_lines(vec![line("a")]);
        session.prepend_lines(Vec::new());
        assert_eq!(feed_texts(&session), vec!["a"]);
    }

    #[test]
    fn selecting_same_fixture_keeps_state() {
        let mut session = select_match(None, 42);
        session.prepend_lines(vec![line("kick-off")]);
        session.seen_mut().add(identity(&ev(1, "A", "Goal", "")));

        let session = select_match(Some(session), 42);
        assert_eq!(session.fixture_id(), 42);
        assert_eq!(feed_texts(&session), vec!["kick-off"]);
        assert_eq!(session.seen().len(), 1);
    }

    #[test]
    fn selecting_new_fixture_resets_state() {
        let mut session = select_match(None, 42);
        session.prepend_lines(vec![line("kick-off")]);
        session.seen_mut().add(identity(&ev(1, "A", "Goal", "")));

        let session = select_match(Some(session), 43);
        assert_eq!(session.fixture_id(), 43);
        assert_eq!(session.feed_len(), 0);
        assert!(session.seen().is_empty());
    }

    #[tokio::test]
    async fn later_batch_new_lines_sit_above_earlier_ones() {
        let gen = EchoGenerator::default();
        let ev1 = ev(10, "A", "Goal", "Normal Goal");
        let ev2 = ev(20, "B", "Card", "Yellow Card");
        let mut session = select_match(None, 1);

        let lines = assimilate(&[ev1.clone()], session.seen_mut(), &gen).await;
        session.prepend_lines(lines);
        assert_eq!(feed_texts(&session), vec!["A Goal"]);

        let lines = assimilate(&[ev1, ev2], session.seen_mut(), &gen).await;
        session.prepend_lines(lines);
        assert_eq!(feed_texts(&session), vec!["B Card", "A Goal"]);
    }
}
