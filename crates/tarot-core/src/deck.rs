//! Shuffle and draw state over a catalog.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::card::{Card, Orientation};
use crate::catalog::CardCatalog;
use crate::error::{CoreError, CoreResult};

/// Probability that a drawn card comes up reversed.
const REVERSED_PROBABILITY: f64 = 0.5;

/// A card taken off the deck, oriented but not yet placed in a spread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraw {
    /// The drawn card.
    pub card: Card,
    /// Orientation chosen at draw time.
    pub orientation: Orientation,
}

/// A working copy of the catalog that cards are drawn from without
/// replacement.
///
/// A deck belongs to one reading. Its RNG drives both the shuffle and the
/// orientation of each draw, so a seeded shuffle fixes the whole draw.
#[derive(Debug, Clone)]
pub struct Deck {
    order: Vec<Card>,
    available: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// A full deck in catalog order, with an entropy-seeded RNG.
    pub fn new(catalog: &CardCatalog) -> Self {
        let order = catalog.cards().to_vec();
        Self {
            available: order.clone(),
            order,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Restore every card in catalog order and shuffle.
    ///
    /// With a seed the resulting permutation, and every orientation drawn
    /// afterwards, is reproducible. Without one the OS entropy source is used.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.available = self.order.clone();

        // Fisher-Yates
        for i in (1..self.available.len()).rev() {
            let j = self.rng.random_range(0..=i as u32) as usize;
            self.available.swap(i, j);
        }

        debug!(?seed, cards = self.available.len(), "deck shuffled");
    }

    /// Take the first `n` cards, each with an independent orientation.
    ///
    /// Fails without touching the deck if fewer than `n` cards remain.
    pub fn draw(&mut self, n: usize) -> CoreResult<Vec<CardDraw>> {
        if n > self.available.len() {
            return Err(CoreError::InsufficientCards {
                requested: n,
                remaining: self.available.len(),
            });
        }

        let draws = self
            .available
            .drain(..n)
            .map(|card| {
                let orientation = if self.rng.random_bool(REVERSED_PROBABILITY) {
                    Orientation::Reversed
                } else {
                    Orientation::Upright
                };
                CardDraw { card, orientation }
            })
            .collect();
        Ok(draws)
    }

    /// Put every card back in catalog order without shuffling.
    pub fn reset(&mut self) {
        self.available = self.order.clone();
    }

    /// Number of cards left to draw.
    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    /// The cards left to draw, top first.
    pub fn available(&self) -> &[Card] {
        &self.available
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn deck() -> Deck {
        Deck::new(&CardCatalog::rider_waite().unwrap())
    }

    fn ids(draws: &[CardDraw]) -> Vec<String> {
        draws.iter().map(|d| d.card.id.clone()).collect()
    }

    #[test]
    fn new_deck_is_full_in_catalog_order() {
        let deck = deck();
        assert_eq!(deck.remaining(), 78);
        assert_eq!(deck.available()[0].id, "ar00");
        assert_eq!(deck.available()[77].id, "peki");
    }

    #[test]
    fn same_seed_same_draw() {
        let mut a = deck();
        let mut b = deck();
        a.shuffle(Some(42));
        b.shuffle(Some(42));
        let first = a.draw(10).unwrap();
        let second = b.draw(10).unwrap();
        assert_eq!(first, second);

        a.shuffle(Some(42));
        assert_eq!(a.draw(10).unwrap(), first);
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = deck();
        let mut b = deck();
        a.shuffle(Some(1));
        b.shuffle(Some(2));
        assert_ne!(ids(&a.draw(78).unwrap()), ids(&b.draw(78).unwrap()));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = deck();
        deck.shuffle(Some(99));
        let unique: HashSet<_> = deck.available().iter().map(|c| &c.id).collect();
        assert_eq!(unique.len(), 78);
    }

    #[test]
    fn shuffle_restores_drawn_cards() {
        let mut deck = deck();
        deck.shuffle(Some(3));
        deck.draw(20).unwrap();
        deck.shuffle(Some(3));
        assert_eq!(deck.remaining(), 78);
    }

    #[test]
    fn draw_all_then_one_more_fails() {
        let mut deck = deck();
        deck.shuffle(Some(5));
        deck.draw(78).unwrap();
        let err = deck.draw(1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientCards {
                requested: 1,
                remaining: 0
            }
        ));
    }

    #[test]
    fn draw_zero_is_noop() {
        let mut deck = deck();
        assert!(deck.draw(0).unwrap().is_empty());
        assert_eq!(deck.remaining(), 78);
    }

    #[test]
    fn reset_restores_catalog_order() {
        let mut deck = deck();
        deck.shuffle(Some(11));
        deck.draw(5).unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 78);
        assert_eq!(deck.available()[0].id, "ar00");
    }

    #[test]
    fn orientation_is_roughly_even() {
        let mut deck = deck();
        let mut reversed = 0usize;
        let mut total = 0usize;
        for seed in 0..200 {
            deck.shuffle(Some(seed));
            let draws = deck.draw(78).unwrap();
            reversed += draws
                .iter()
                .filter(|d| d.orientation.is_reversed())
                .count();
            total += draws.len();
        }
        let ratio = reversed as f64 / total as f64;
        assert!((0.47..0.53).contains(&ratio), "reversed ratio {ratio}");
    }

    proptest! {
        #[test]
        fn draw_yields_unique_cards(seed in any::<u64>(), n in 1usize..=78) {
            let mut deck = deck();
            deck.shuffle(Some(seed));
            let draws = deck.draw(n).unwrap();
            prop_assert_eq!(draws.len(), n);
            prop_assert_eq!(deck.remaining(), 78 - n);
            let unique: HashSet<_> = draws.iter().map(|d| &d.card.id).collect();
            prop_assert_eq!(unique.len(), n);
            for d in &draws {
                prop_assert!(deck.available().iter().all(|c| c.id != d.card.id));
            }
        }

        #[test]
        fn oversized_draw_leaves_deck_untouched(seed in any::<u64>(), first in 0usize..=78, extra in 1usize..10) {
            let mut deck = deck();
            deck.shuffle(Some(seed));
            deck.draw(first).unwrap();
            let before: Vec<_> = deck.available().to_vec();
            let err = deck.draw(before.len() + extra);
            prop_assert!(err.is_err());
            prop_assert_eq!(deck.available(), before.as_slice());
        }
    }
}
