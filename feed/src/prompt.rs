use pitchside_types::Event;

/// Build the generation prompt for one match event.
pub fn build_commentary_prompt(event: &Event) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are a professional football commentator.\n");
    prompt.push_str(
        "Generate an exciting, natural-sounding live commentary for this football event.\n",
    );
    prompt.push_str(&format!("Minute: {}\n", event.minute_label()));
    prompt.push_str(&format!("Team: {}\n", event.team_name()));
    prompt.push_str(&format!("Player: {}\n", event.player_name()));
    if let Some(assist) = &event.assist {
        prompt.push_str(&format!("Assist: {assist}\n"));
    }
    prompt.push_str(&format!("Event: {}\n", event.kind_name()));
    prompt.push_str(&format!("Details: {}\n", event.detail));
    prompt.push_str("Keep it short (1–2 sentences) and emotional, like a live TV broadcast.");
    prompt
}
