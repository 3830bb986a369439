use comfy_table::{ContentArrangement, Table};
use tarot_core::{Arcana, Suit};

use crate::settings::CliSettings;

pub fn run(settings: &CliSettings, arcana: Option<&str>, suit: Option<&str>) -> Result<(), String> {
    let arcana = arcana
        .map(|a| Arcana::parse(a).ok_or_else(|| format!("unknown arcana '{a}' (major, minor)")))
        .transpose()?;
    let suit = suit
        .map(|s| {
            Suit::parse(s)
                .ok_or_else(|| format!("unknown suit '{s}' (wands, cups, swords, pentacles)"))
        })
        .transpose()?;

    let catalog = super::load_catalog(settings)?;
    let cards: Vec<_> = catalog
        .cards()
        .iter()
        .filter(|c| arcana.is_none_or(|a| c.arcana == a))
        .filter(|c| suit.is_none_or(|s| c.suit == Some(s)))
        .collect();

    if cards.is_empty() {
        println!("  No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Arcana", "Suit", "Upright"]);

    for card in &cards {
        let suit = card.suit.map(|s| s.to_string()).unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            card.id.clone(),
            card.name.clone(),
            card.arcana.to_string(),
            suit,
            super::truncate(&card.upright_meaning, 48),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}
