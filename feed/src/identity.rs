use pitchside_types::Event;

/// Dedup key for a match event: `(minute, player, type, detail)`.
///
/// Absent values normalize to `None` / `""` so two records that are both
/// missing a field still compare equal. Team, assist and stoppage time are
/// not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    pub minute: Option<u16>,
    pub player: String,
    pub kind: String,
    pub detail: String,
}

pub fn identity(event: &Event) -> EventIdentity {
    EventIdentity {
        minute: event.minute,
        player: event.player.clone().unwrap_or_default(),
        kind: event.kind.clone().unwrap_or_default(),
        detail: event.detail.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(minute: Option<u16>, player: &str, kind: &str, detail: &str) -> Event {
        Event {
            minute,
            player: Some(player.to_string()),
            kind: Some(kind.to_string()),
            detail: detail.to_string(),
            ..Event::default()
        }
    }

    #[test]
    fn equal_tuples_give_equal_identity() {
        let a = event(Some(10), "A", "Goal", "");
        let mut b = a.clone();
        b.team = Some("Other team".to_string());
        b.extra = Some(2);
        b.assist = Some("B".to_string());
        assert_eq!(identity(&a), identity(&b));
    }

    #[test]
    fn differing_detail_is_a_different_event() {
        let a = event(Some(10), "A", "Card", "Yellow Card");
        let b = event(Some(10), "A", "Card", "Red Card");
        assert_ne!(identity(&a), identity(&b));
    }

    #[test]
    fn missing_fields_use_sentinels() {
        let key = identity(&Event::from_value(&json!({})));
        assert_eq!(
            key,
            EventIdentity {
                minute: None,
                player: String::new(),
                kind: String::new(),
                detail: String::new(),
            }
        );
        assert_eq!(key, identity(&Event::from_value(&json!({ "player": null }))));
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_key() {
        let raw = Event::from_value(&json!({
            "time": { "elapsed": 10 },
            "player": { "name": " A " },
            "type": "Goal",
            "detail": "Normal Goal "
        }));
        let clean = event(Some(10), "A", "Goal", "Normal Goal");
        assert_eq!(raw.player.as_deref(), Some(" A "));
        assert_ne!(identity(&raw), identity(&clean));
    }

    #[test]
    fn comments_stand_in_for_missing_detail() {
        let from_detail = Event::from_value(&json!({ "type": "Var", "detail": "Goal cancelled" }));
        let from_comments =
            Event::from_value(&json!({ "type": "Var", "comments": "Goal cancelled" }));
        assert_eq!(identity(&from_detail), identity(&from_comments));
    }
}
