//! Spread templates: fixed, named arrangements of positions.
//!
//! A template binds drawn cards to positions purely by order. The first card
//! drawn goes to the first position, and so on. Templates are static data;
//! nothing about them depends on the draw.

use serde::{Deserialize, Serialize};

use crate::card::DrawnCard;
use crate::deck::CardDraw;
use crate::error::{CoreError, CoreResult};

/// One slot in a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Label shown in the reading, e.g. "Past".
    pub label: &'static str,
    /// What a card in this slot speaks to.
    pub meaning: &'static str,
}

const fn pos(label: &'static str, meaning: &'static str) -> Position {
    Position { label, meaning }
}

const SINGLE: &[Position] = &[pos(
    "Present",
    "The energy surrounding the question right now",
)];

const THREE: &[Position] = &[
    pos("Past", "Influences and events that led to the situation"),
    pos("Present", "The situation as it stands now"),
    pos("Future", "Where things are heading if nothing changes"),
];

const CELTIC: &[Position] = &[
    pos("Present Situation", "The heart of the matter"),
    pos("Challenge/Crossing", "The obstacle or force crossing the situation"),
    pos("Distant Past/Foundation", "The root cause beneath the situation"),
    pos("Recent Past", "Events that are just passing out of influence"),
    pos("Possible Future", "The best that can be achieved"),
    pos("Near Future", "What is coming into being soon"),
    pos("Self Perception", "How the querent sees themselves in this"),
    pos("External Influences", "The people and surroundings bearing on the matter"),
    pos("Hopes and Fears", "What the querent hopes for or dreads"),
    pos("Outcome", "Where the situation resolves"),
];

/// The available spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadKind {
    /// One card for immediate guidance.
    Single,
    /// Past, present, future.
    Three,
    /// The ten-card Celtic Cross.
    Celtic,
}

impl SpreadKind {
    /// All spreads, smallest first.
    pub fn all() -> &'static [Self] {
        &[Self::Single, Self::Three, Self::Celtic]
    }

    /// Parse a spread name. Accepts the short names and the long forms
    /// `single_card`, `three_card`, `celtic_cross`.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "single" | "single_card" => Ok(Self::Single),
            "three" | "three_card" => Ok(Self::Three),
            "celtic" | "celtic_cross" => Ok(Self::Celtic),
            _ => Err(CoreError::UnknownSpread(s.to_string())),
        }
    }

    /// The template for this spread.
    pub fn template(self) -> SpreadTemplate {
        SpreadTemplate::new(self)
    }

    /// Short identifier, as accepted by [`Self::parse`].
    pub fn key(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Three => "three",
            Self::Celtic => "celtic",
        }
    }
}

impl std::fmt::Display for SpreadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An ordered, read-only list of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadTemplate {
    kind: SpreadKind,
    positions: &'static [Position],
}

impl SpreadTemplate {
    /// The template for a spread kind.
    pub fn new(kind: SpreadKind) -> Self {
        let positions = match kind {
            SpreadKind::Single => SINGLE,
            SpreadKind::Three => THREE,
            SpreadKind::Celtic => CELTIC,
        };
        Self { kind, positions }
    }

    /// Look a template up by name.
    pub fn from_name(name: &str) -> CoreResult<Self> {
        SpreadKind::parse(name).map(Self::new)
    }

    /// Which spread this is.
    pub fn kind(&self) -> SpreadKind {
        self.kind
    }

    /// Number of cards the spread takes.
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions in declared order.
    pub fn positions(&self) -> &'static [Position] {
        self.positions
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self.kind {
            SpreadKind::Single => "Single Card",
            SpreadKind::Three => "Three Card Spread",
            SpreadKind::Celtic => "Celtic Cross",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self.kind {
            SpreadKind::Single => "One card for immediate guidance or a daily draw",
            SpreadKind::Three => "Classic three-card timeline spread",
            SpreadKind::Celtic => "Comprehensive ten-card spread for deep inquiry",
        }
    }

    /// Bind cards to positions in order.
    pub fn assign(&self, cards: Vec<CardDraw>) -> CoreResult<Vec<DrawnCard>> {
        if cards.len() != self.card_count() {
            return Err(CoreError::SpreadSizeMismatch {
                spread: self.kind.key().to_string(),
                expected: self.card_count(),
                got: cards.len(),
            });
        }

        Ok(cards
            .into_iter()
            .zip(self.positions)
            .map(|(draw, position)| DrawnCard {
                card: draw.card,
                orientation: draw.orientation,
                position: position.label.to_string(),
            })
            .collect())
    }
}
