//! CLI frontend for tarot readings.

mod commands;
mod history;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::read::ReadOptions;
use settings::CliSettings;

#[derive(Parser)]
#[command(
    name = "tarot",
    about = "Tarot readings with optional AI interpretation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./tarot.toml, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a reading
    Read {
        /// Spread: single, three, celtic
        #[arg(short, long, default_value = "three")]
        spread: String,

        /// Focus area: career, relationships, personal_growth, spiritual, general
        #[arg(short, long, default_value = "general")]
        focus: String,

        /// Question to ask the cards
        #[arg(short, long)]
        question: Option<String>,

        /// RNG seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// AI provider id (default from config)
        #[arg(short, long)]
        provider: Option<String>,

        /// Skip AI interpretation
        #[arg(long)]
        no_ai: bool,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look a card up by name
    Lookup {
        /// Card name or part of one (case-insensitive)
        name: String,
    },

    /// List cards in the deck
    List {
        /// Filter by arcana: major, minor
        #[arg(short, long)]
        arcana: Option<String>,

        /// Filter by suit: wands, cups, swords, pentacles
        #[arg(short, long)]
        suit: Option<String>,
    },

    /// Show the available spreads and their positions
    Spreads,

    /// Saved readings
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recent readings
    Show {
        /// Number of readings
        #[arg(short, default_value = "5")]
        n: usize,
    },

    /// Delete the most recent readings
    DeleteLast {
        /// Number of readings to delete
        n: usize,
    },

    /// Delete all saved readings
    Clear,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = CliSettings::load(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Read {
            spread,
            focus,
            question,
            seed,
            provider,
            no_ai,
            json,
        } => commands::read::run(
            &settings,
            &ReadOptions {
                spread: &spread,
                focus: &focus,
                question: question.as_deref(),
                seed,
                provider: provider.as_deref(),
                no_ai,
                json,
            },
        ),
        Commands::Lookup { name } => commands::lookup::run(&settings, &name),
        Commands::List { arcana, suit } => {
            commands::list::run(&settings, arcana.as_deref(), suit.as_deref())
        }
        Commands::Spreads => commands::spreads::run(),
        Commands::History { action } => match action.unwrap_or(HistoryAction::Show { n: 5 }) {
            HistoryAction::Show { n } => commands::history::show(&settings, n),
            HistoryAction::DeleteLast { n } => commands::history::delete_last(&settings, n),
            HistoryAction::Clear => commands::history::clear(&settings),
        },
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
