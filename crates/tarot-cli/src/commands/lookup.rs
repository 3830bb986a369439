use colored::Colorize;
use strsim::jaro_winkler;
use tarot_core::{Card, CardCatalog, CoreError};

use crate::settings::CliSettings;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGEST_THRESHOLD: f64 = 0.8;

pub fn run(settings: &CliSettings, name: &str) -> Result<(), String> {
    let catalog = super::load_catalog(settings)?;

    match catalog.lookup_by_name(name) {
        Ok(card) => {
            print_card(card);
            Ok(())
        }
        Err(CoreError::AmbiguousMatch { candidates, .. }) => {
            println!("  '{name}' matches {} cards:", candidates.len());
            for card in &candidates {
                println!("    {} {}", card.id.dimmed(), card.name);
            }
            Ok(())
        }
        Err(CoreError::NotFound(_)) => match suggest(&catalog, name) {
            Some(close) => Err(format!("no card matches '{name}' (did you mean '{close}'?)")),
            None => Err(format!("no card matches '{name}'")),
        },
        Err(e) => Err(e.to_string()),
    }
}

fn print_card(card: &Card) {
    let kind = match card.suit {
        Some(suit) => format!("{} Arcana, {suit}", card.arcana),
        None => format!("{} Arcana", card.arcana),
    };
    println!("  {} [{}]", card.name.bold(), kind.dimmed());
    println!();
    println!("  {}  {}", "Upright:".green(), card.upright_meaning);
    println!("  {} {}", "Reversed:".red(), card.reversed_meaning);
    println!();
    println!("  {}", card.description);
}

/// The closest card name, if any is close enough.
fn suggest<'a>(catalog: &'a CardCatalog, name: &str) -> Option<&'a str> {
    let needle = name.to_lowercase();
    catalog
        .cards()
        .iter()
        .map(|c| (c.name.as_str(), jaro_winkler(&needle, &c.name.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name)
}
