//! Card, orientation, and drawn-card types.

use serde::{Deserialize, Serialize};

/// Number of cards in a complete deck.
pub const DECK_SIZE: usize = 78;

/// Major or minor arcana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    /// The 22 trump cards, The Fool through The World.
    Major,
    /// The 56 suited cards.
    Minor,
}

impl Arcana {
    /// Parse an arcana name ("major" / "minor"), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Some(Self::Major),
            "minor" => Some(Self::Minor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arcana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "Major"),
            Self::Minor => write!(f, "Minor"),
        }
    }
}

/// Minor arcana suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Fire; enterprise and energy.
    Wands,
    /// Water; emotion and relationships.
    Cups,
    /// Air; intellect and conflict.
    Swords,
    /// Earth; work and material matters.
    Pentacles,
}

impl Suit {
    /// All suits in catalog order.
    pub fn all() -> &'static [Self] {
        &[Self::Wands, Self::Cups, Self::Swords, Self::Pentacles]
    }

    /// Parse a suit name, accepting the common alternative names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wands" | "wand" | "staves" | "rods" => Some(Self::Wands),
            "cups" | "cup" | "chalices" => Some(Self::Cups),
            "swords" | "sword" => Some(Self::Swords),
            "pentacles" | "pentacle" | "pents" | "coins" | "disks" => Some(Self::Pentacles),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wands => write!(f, "Wands"),
            Self::Cups => write!(f, "Cups"),
            Self::Swords => write!(f, "Swords"),
            Self::Pentacles => write!(f, "Pentacles"),
        }
    }
}

/// A single card from the catalog. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique key, e.g. `ar01` or `cuqu`.
    pub id: String,
    /// Display name, e.g. "The Magician".
    pub name: String,
    /// Major or minor arcana.
    #[serde(alias = "type")]
    pub arcana: Arcana,
    /// Suit; present only for minor arcana. The key is required even when null.
    #[serde(deserialize_with = "required_suit")]
    pub suit: Option<Suit>,
    /// Rank: 0-21 for majors, 1-14 (ace through king) for minors.
    pub value: u8,
    /// Meaning when drawn upright.
    pub upright_meaning: String,
    /// Meaning when drawn reversed.
    pub reversed_meaning: String,
    /// Description of the card's imagery.
    pub description: String,
    /// Reference to the card image.
    pub image: String,
}

fn required_suit<'de, D>(deserializer: D) -> Result<Option<Suit>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Suit>::deserialize(deserializer)
}

impl Card {
    /// The meaning text that applies to the given orientation.
    pub fn meaning(&self, orientation: Orientation) -> &str {
        match orientation {
            Orientation::Upright => &self.upright_meaning,
            Orientation::Reversed => &self.reversed_meaning,
        }
    }
}

/// Which way up a card was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Read with the upright meaning.
    Upright,
    /// Read with the reversed meaning.
    Reversed,
}

impl Orientation {
    /// Whether this is the reversed orientation.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upright => write!(f, "Upright"),
            Self::Reversed => write!(f, "Reversed"),
        }
    }
}

/// A card as it sits in a reading: orientation fixed by the draw, position
/// label fixed by the spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// The drawn card.
    #[serde(flatten)]
    pub card: Card,
    /// Upright or reversed.
    pub orientation: Orientation,
    /// Position label from the spread template.
    pub position: String,
}

impl DrawnCard {
    /// The orientation-appropriate meaning.
    pub fn meaning(&self) -> &str {
        self.card.meaning(self.orientation)
    }
}
