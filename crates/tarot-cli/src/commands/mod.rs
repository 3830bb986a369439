pub mod history;
pub mod list;
pub mod lookup;
pub mod read;
pub mod spreads;

use tarot_core::CardCatalog;

use crate::settings::CliSettings;

/// Load the configured dataset, or the bundled deck.
fn load_catalog(settings: &CliSettings) -> Result<CardCatalog, String> {
    match &settings.data {
        Some(path) => CardCatalog::from_path(path)
            .map_err(|e| format!("{}: {e}", path.display())),
        None => CardCatalog::rider_waite().map_err(|e| e.to_string()),
    }
}

/// Shorten text to `max` characters, adding an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max.saturating_sub(3)) {
        Some((idx, _)) if text.chars().count() > max => format!("{}...", &text[..idx]),
        _ => text.to_string(),
    }
}
