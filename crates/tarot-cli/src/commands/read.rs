use colored::Colorize;
use tarot_core::{Deck, EnrichmentState, FocusArea, Reading, SpreadTemplate, assemble};
use tarot_oracle::InterpretationService;
use tracing::warn;

use crate::history::History;
use crate::settings::CliSettings;

/// Options for one reading.
pub struct ReadOptions<'a> {
    pub spread: &'a str,
    pub focus: &'a str,
    pub question: Option<&'a str>,
    pub seed: Option<u64>,
    pub provider: Option<&'a str>,
    pub no_ai: bool,
    pub json: bool,
}

pub fn run(settings: &CliSettings, opts: &ReadOptions<'_>) -> Result<(), String> {
    let template = SpreadTemplate::from_name(opts.spread).map_err(|e| e.to_string())?;
    let focus = FocusArea::parse(opts.focus).map_err(|e| e.to_string())?;
    let catalog = super::load_catalog(settings)?;

    let mut deck = Deck::new(&catalog);
    deck.shuffle(opts.seed);
    let draws = deck
        .draw(template.card_count())
        .map_err(|e| e.to_string())?;
    let mut reading =
        assemble(&template, draws, focus, opts.question).map_err(|e| e.to_string())?;

    if !opts.no_ai {
        let service = InterpretationService::new(settings.interpretation.clone());
        reading = service.interpret_blocking(reading, opts.provider);
    }

    if settings.history.enabled {
        let history = History::new(&settings.history.path);
        if let Err(e) = history.append(&reading) {
            warn!(path = %history.path().display(), error = %e, "could not save reading");
            eprintln!("warning: reading not saved: {e}");
        }
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&reading).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_reading(&template, &reading);
    }

    Ok(())
}

fn print_reading(template: &SpreadTemplate, reading: &Reading) {
    println!("  {}", template.display_name().bold());
    if let Some(q) = &reading.question {
        println!("  {}", q.italic());
    }
    println!("  Focus: {}", reading.focus_area);
    println!();

    for card in &reading.cards {
        let orientation = card.orientation.to_string();
        let orientation = if card.orientation.is_reversed() {
            orientation.red()
        } else {
            orientation.green()
        };
        println!(
            "  {:<24} {} ({orientation})",
            card.position.dimmed(),
            card.card.name.bold()
        );
    }
    println!();

    match (reading.state(), &reading.reason) {
        (EnrichmentState::Succeeded, _) => {
            if let Some(provider) = &reading.provider {
                println!("  {}", format!("Interpretation ({provider})").bold());
            }
        }
        (_, Some(reason)) => {
            eprintln!("note: AI interpretation unavailable ({reason}); showing card meanings");
        }
        _ => {}
    }
    println!();
    for line in reading.text().lines() {
        println!("  {line}");
    }
}
