//! The fixed card catalog.
//!
//! Cards are read from line-delimited JSON, one record per line, and
//! validated as a whole: every field present and well-formed, ids unique,
//! and the record count exactly what the caller expects (78 for a real
//! deck). Once loaded, the catalog is read-only.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::card::{Arcana, Card, DECK_SIZE, Suit};
use crate::error::{CoreError, CoreResult};

/// The bundled Rider-Waite dataset.
const RIDER_WAITE: &str = include_str!("../data/rider_waite.jsonl");

/// An immutable, validated set of cards.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    /// Load the bundled 78-card Rider-Waite deck.
    pub fn rider_waite() -> CoreResult<Self> {
        Self::load(RIDER_WAITE)
    }

    /// Load a full 78-card catalog from JSONL text.
    pub fn load(source: &str) -> CoreResult<Self> {
        Self::load_sized(source, DECK_SIZE)
    }

    /// Load a full 78-card catalog from a JSONL file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::load(&source)
    }

    /// Load a catalog that must hold exactly `expected` cards.
    ///
    /// Used for stub decks in tests and for custom datasets; [`Self::load`]
    /// is this with the standard deck size.
    pub fn load_sized(source: &str, expected: usize) -> CoreResult<Self> {
        let mut cards = Vec::with_capacity(expected);
        let mut seen = HashSet::new();

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let card: Card =
                serde_json::from_str(raw).map_err(|e| CoreError::DataIntegrity {
                    line: Some(line),
                    message: e.to_string(),
                })?;

            validate_card(&card).map_err(|message| CoreError::DataIntegrity {
                line: Some(line),
                message,
            })?;

            if !seen.insert(card.id.clone()) {
                return Err(CoreError::DataIntegrity {
                    line: Some(line),
                    message: format!("duplicate card id '{}'", card.id),
                });
            }
            cards.push(card);
        }

        if cards.len() != expected {
            return Err(CoreError::DataIntegrity {
                line: None,
                message: format!("expected {expected} cards, found {}", cards.len()),
            });
        }

        debug!(cards = cards.len(), "card catalog loaded");
        Ok(Self { cards })
    }

    /// All cards in dataset order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Exact id lookup.
    pub fn lookup_by_id(&self, id: &str) -> CoreResult<&Card> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Case-insensitive name lookup.
    ///
    /// An exact name match wins outright. Otherwise the query is matched as
    /// a substring of every name: one hit returns that card, several return
    /// [`CoreError::AmbiguousMatch`] with all candidates so the caller can
    /// choose. Suit aliases ("coins", "pents", ...) are expanded first.
    pub fn lookup_by_name(&self, query: &str) -> CoreResult<&Card> {
        let needle = normalize_query(query);

        if let Some(card) = self.cards.iter().find(|c| c.name.to_lowercase() == needle) {
            return Ok(card);
        }

        let matches: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();

        match matches.len() {
            0 => Err(CoreError::NotFound(query.to_string())),
            1 => Ok(matches[0]),
            _ => Err(CoreError::AmbiguousMatch {
                query: query.to_string(),
                candidates: matches.into_iter().cloned().collect(),
            }),
        }
    }

    /// Cards of one arcana, in dataset order.
    pub fn by_arcana(&self, arcana: Arcana) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.arcana == arcana)
    }

    /// Cards of one suit, in dataset order.
    pub fn by_suit(&self, suit: Suit) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.suit == Some(suit))
    }
}

/// Lowercase, collapse whitespace, and replace suit aliases with the
/// canonical suit name.
fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            match Suit::parse(&lower) {
                Some(suit) => suit.to_string().to_lowercase(),
                None => lower,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn validate_card(card: &Card) -> Result<(), String> {
    let text_fields = [
        ("id", &card.id),
        ("name", &card.name),
        ("upright_meaning", &card.upright_meaning),
        ("reversed_meaning", &card.reversed_meaning),
        ("description", &card.description),
        ("image", &card.image),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            return Err(format!("field `{field}` is empty"));
        }
    }

    match (card.arcana, card.suit) {
        (Arcana::Major, Some(suit)) => Err(format!("major arcana '{}' has suit {suit}", card.name)),
        (Arcana::Minor, None) => Err(format!("minor arcana '{}' has no suit", card.name)),
        (Arcana::Major, None) if card.value > 21 => {
            Err(format!("major arcana value {} out of range 0-21", card.value))
        }
        (Arcana::Minor, Some(_)) if !(1..=14).contains(&card.value) => {
            Err(format!("minor arcana value {} out of range 1-14", card.value))
        }
        _ => Ok(()),
    }
}
