//! Tarot reading core.
//!
//! Loads the fixed 78-card catalog, shuffles and draws from a deck, binds
//! draws to spread positions, and assembles the deterministic baseline text
//! that every reading carries. Everything here is synchronous and performs
//! no I/O beyond reading a dataset file on request.

pub mod assembler;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod error;
pub mod focus;
pub mod reading;
pub mod spread;

pub use assembler::{assemble, build};
pub use card::{Arcana, Card, DECK_SIZE, DrawnCard, Orientation, Suit};
pub use catalog::CardCatalog;
pub use deck::{CardDraw, Deck};
pub use error::{CoreError, CoreResult};
pub use focus::FocusArea;
pub use reading::{DegradeReason, EnrichmentState, Reading};
pub use spread::{Position, SpreadKind, SpreadTemplate};
