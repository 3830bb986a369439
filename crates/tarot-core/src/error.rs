//! Error types for the tarot core.
//!
//! Every variant here is a setup or usage fault: a malformed dataset, a
//! lookup that cannot be satisfied, or a draw the deck cannot serve. None of
//! them describe runtime degradation; that lives in [`crate::DegradeReason`].

use thiserror::Error;

use crate::card::Card;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the catalog, deck, spreads, and assembler.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The dataset is malformed: a record is missing a field or carries an
    /// invalid value, two records share an id, or the record count is wrong.
    #[error("invalid card data{}: {message}", line_suffix(.line))]
    DataIntegrity {
        /// 1-based line number of the offending record, if there is one.
        line: Option<usize>,
        /// What was wrong.
        message: String,
    },

    /// No card matched an id or name query.
    #[error("card not found: {0}")]
    NotFound(String),

    /// A name query matched more than one card.
    #[error("'{query}' matches {} cards", .candidates.len())]
    AmbiguousMatch {
        /// The query as given.
        query: String,
        /// Every matching card, in catalog order.
        candidates: Vec<Card>,
    },

    /// A draw asked for more cards than the deck still holds.
    #[error("cannot draw {requested} cards, only {remaining} remaining")]
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards left in the deck.
        remaining: usize,
    },

    /// A spread received the wrong number of cards.
    #[error("spread '{spread}' requires {expected} cards, got {got}")]
    SpreadSizeMismatch {
        /// Spread name.
        spread: String,
        /// Positions in the template.
        expected: usize,
        /// Cards supplied.
        got: usize,
    },

    /// Spread name not recognized.
    #[error("unknown spread '{0}' (available: single, three, celtic)")]
    UnknownSpread(String),

    /// Focus area name not recognized.
    #[error("unknown focus area '{0}'")]
    UnknownFocusArea(String),

    /// Dataset file could not be read.
    #[error("failed to read card data: {0}")]
    Io(#[from] std::io::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}
