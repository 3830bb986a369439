//! Baseline interpretation text.
//!
//! [`build`] is pure: the same positioned cards, focus area, and question
//! always give byte-identical text. It is what makes a reading complete with
//! no network access at all.

use chrono::Utc;

use crate::card::DrawnCard;
use crate::deck::CardDraw;
use crate::error::CoreResult;
use crate::focus::FocusArea;
use crate::reading::Reading;
use crate::spread::SpreadTemplate;

/// Render positioned cards as baseline text.
///
/// Layout: an optional `**Question**` line, the `**Focus**` line, a blank
/// line, then one block per card in position order, separated by blank
/// lines:
///
/// ```text
/// ## Past: The Fool (Upright)
/// Folly, mania, ...
/// ```
pub fn build(cards: &[DrawnCard], focus: FocusArea, question: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(q) = question.map(str::trim).filter(|q| !q.is_empty()) {
        out.push_str(&format!("**Question**: {q}\n"));
    }
    out.push_str(&format!("**Focus**: {focus}\n\n"));

    let blocks: Vec<String> = cards
        .iter()
        .map(|c| {
            format!(
                "## {}: {} ({})\n{}",
                c.position,
                c.card.name,
                c.orientation,
                c.meaning()
            )
        })
        .collect();
    out.push_str(&blocks.join("\n\n"));
    out
}

/// Bind draws to a template and assemble the reading around them.
pub fn assemble(
    template: &SpreadTemplate,
    draws: Vec<CardDraw>,
    focus: FocusArea,
    question: Option<&str>,
) -> CoreResult<Reading> {
    let cards = template.assign(draws)?;
    let question = question
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    let baseline = build(&cards, focus, question.as_deref());

    Ok(Reading {
        focus_area: focus,
        question,
        cards,
        baseline,
        ai_interpretation: None,
        provider: None,
        reason: None,
        spread: template.kind(),
        created_at: Utc::now(),
    })
}
