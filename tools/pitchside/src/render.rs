use feed::session::MatchSession;
use pitchside_types::{Fixture, FixtureId};

pub const EMPTY_FEED_HINT: &str =
    "No commentary yet. Press Enter to check for new events.";

/// Numbered match list, one per line, for the picker prompt.
pub fn render_fixtures(fixtures: &[Fixture]) -> String {
    let mut out = String::new();
    for (i, fixture) in fixtures.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}", i + 1, fixture.label()));
        if let Some(score) = fixture.scoreline() {
            out.push_str(&format!("  [{score}]"));
        }
        if let Some(league) = &fixture.league {
            out.push_str(&format!("  {league}"));
        }
        out.push_str(&format!("  (id {})\n", fixture.id));
    }
    out
}

pub fn render_feed(session: &MatchSession) -> String {
    if session.feed_len() == 0 {
        return format!("{EMPTY_FEED_HINT}\n");
    }
    let mut out = String::new();
    for line in session.feed() {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// Accept either a 1-based position in the list or a raw fixture id.
pub fn parse_choice(input: &str, fixtures: &[Fixture]) -> Option<FixtureId> {
    let n: u64 = input.trim().parse().ok()?;
    if let Some(f) = fixtures.iter().find(|f| f.id == n) {
        return Some(f.id);
    }
    let index = usize::try_from(n).ok()?.checked_sub(1)?;
    fixtures.get(index).map(|f| f.id)
}
