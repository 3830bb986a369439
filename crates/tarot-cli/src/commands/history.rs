use colored::Colorize;
use tarot_core::Reading;

use crate::history::History;
use crate::settings::CliSettings;

pub fn show(settings: &CliSettings, n: usize) -> Result<(), String> {
    let history = History::new(&settings.history.path);
    let readings = history.load_last(n).map_err(|e| e.to_string())?;

    if readings.is_empty() {
        println!("  No saved readings.");
        return Ok(());
    }

    for reading in &readings {
        print_summary(reading);
    }
    Ok(())
}

pub fn delete_last(settings: &CliSettings, n: usize) -> Result<(), String> {
    let history = History::new(&settings.history.path);
    let removed = history.delete_last(n).map_err(|e| e.to_string())?;
    println!(
        "  Deleted {removed} reading{}.",
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}

pub fn clear(settings: &CliSettings) -> Result<(), String> {
    History::new(&settings.history.path)
        .clear()
        .map_err(|e| e.to_string())?;
    println!("  History cleared.");
    Ok(())
}

fn print_summary(reading: &Reading) {
    let when = reading.created_at.format("%Y-%m-%d %H:%M");
    let spread = reading.spread.template().display_name();
    println!(
        "  {} {} · {}",
        when.to_string().dimmed(),
        spread.bold(),
        reading.focus_area
    );
    if let Some(q) = &reading.question {
        println!("    {}", q.italic());
    }
    let cards: Vec<String> = reading
        .cards
        .iter()
        .map(|c| format!("{} ({})", c.card.name, c.orientation))
        .collect();
    println!("    {}", cards.join(", "));
    if let Some(provider) = &reading.provider {
        println!("    {}", format!("interpreted by {provider}").dimmed());
    }
    println!();
}
