//! Interpretation prompt.

use tarot_core::Reading;

const GUIDELINES: &str = "\
Please provide a cohesive interpretation that:
1. Addresses the focus area and question (if provided)
2. Integrates the cards' positions and traditional meanings
3. References specific symbolic elements from the imagery descriptions
   (figures, objects, colours, positioning)
4. Offers practical, grounded insight for the querent's situation
5. Maintains respect for traditional tarot symbolism

Keep the interpretation concise (200-300 words) and actionable.";

/// Build the prompt for a reading.
///
/// Every card carries its full imagery description and the meaning for its
/// orientation, alongside the spread, the focus framing, and the question.
pub fn build_prompt(reading: &Reading) -> String {
    let spread = reading.spread.template();
    let mut parts = vec![
        "Provide a tarot reading interpretation for the following spread.".to_string(),
        String::new(),
        format!("**Spread Type**: {}", spread.display_name()),
        format!("**Focus Area**: {}", reading.focus_area.framing()),
    ];

    if let Some(question) = &reading.question {
        parts.push(format!("**Querent's Question**: {question}"));
    }

    parts.push(String::new());
    parts.push("**Cards Drawn**:".to_string());
    for card in &reading.cards {
        parts.push(format!(
            "**{}**: {} ({})\nImagery: {}\nTraditional Meaning: {}\n",
            card.position,
            card.card.name,
            card.orientation,
            card.card.description,
            card.meaning()
        ));
    }

    parts.push(GUIDELINES.to_string());
    parts.join("\n")
}
