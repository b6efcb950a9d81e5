use crate::generator::TextGenerator;
use crate::identity::identity;
use crate::prompt::build_commentary_prompt;
use crate::seen::SeenSet;
use pitchside_types::{CommentaryLine, Event};

/// Filter a batch down to events not in `seen`, recording each as it passes.
///
/// Source order is kept. Duplicates inside the batch are dropped after their
/// first occurrence.
pub fn select_new<'a>(events: &'a [Event], seen: &mut SeenSet) -> Vec<&'a Event> {
    let mut fresh = Vec::new();
    for event in events {
        let key = identity(event);
        if seen.contains(&key) {
            continue;
        }
        seen.add(key);
        fresh.push(event);
    }
    fresh
}

/// Commentary lines for the new events in `events`, oldest first.
pub async fn assimilate<G: TextGenerator>(
    events: &[Event],
    seen: &mut SeenSet,
    generator: &G,
) -> Vec<CommentaryLine> {
    let fresh = select_new(events, seen);
    let mut lines = Vec::with_capacity(fresh.len());
    for event in fresh {
        let text = generator.generate(&build_commentary_prompt(event)).await;
        lines.push(CommentaryLine::for_event(event, text));
    }
    lines
}
