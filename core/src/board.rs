use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered cards of one round. Never mutated, a reset deals a new board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<CardIdentity>,
}

impl Board {
    /// The catalog in its unshuffled order.
    pub fn standard() -> Self {
        Self {
            cards: CATALOG.to_vec(),
        }
    }

    pub fn from_cards(cards: Vec<CardIdentity>) -> Result<Self> {
        if cards.is_empty() || cards.len() > usize::from(CardIndex::MAX) + 1 {
            return Err(GameError::InvalidBoard);
        }

        let mut seen = HashSet::with_capacity(cards.len());
        let mut per_kind: HashMap<Kind, u8> = HashMap::new();
        for &card in &cards {
            if !seen.insert(card) {
                return Err(GameError::InvalidBoard);
            }
            *per_kind.entry(card.kind).or_default() += 1;
        }

        if per_kind.values().any(|&count| count != 2) {
            return Err(GameError::InvalidBoard);
        }

        Ok(Self { cards })
    }

    /// Deals a full board through `shuffler`.
    pub fn deal(shuffler: &mut impl Shuffler) -> Self {
        match Self::from_cards(shuffler.shuffle(&CATALOG)) {
            Ok(board) if board.len() == CARD_COUNT => board,
            Ok(board) => {
                log::warn!(
                    "Shuffled board has {} cards, expected {}, fallback to catalog order",
                    board.len(),
                    CARD_COUNT
                );
                Self::standard()
            }
            Err(err) => {
                log::warn!("Shuffled board rejected ({}), fallback to catalog order", err);
                Self::standard()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardIdentity] {
        &self.cards
    }

    pub fn card_at(&self, index: CardIndex) -> Option<CardIdentity> {
        self.cards.get(usize::from(index)).copied()
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }
}

impl Index<CardIndex> for Board {
    type Output = CardIdentity;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}
