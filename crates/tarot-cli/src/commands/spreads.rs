use colored::Colorize;
use tarot_core::SpreadKind;

pub fn run() -> Result<(), String> {
    for kind in SpreadKind::all() {
        let template = kind.template();
        println!(
            "  {} [{}] {}",
            template.display_name().bold(),
            kind.key().dimmed(),
            format!("{} cards", template.card_count()).dimmed()
        );
        println!("  {}", template.description());
        for (i, position) in template.positions().iter().enumerate() {
            println!("    {:>2}. {:<24} {}", i + 1, position.label, position.meaning.dimmed());
        }
        println!();
    }
    Ok(())
}
