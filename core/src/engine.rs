use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cards picked during the current turn and still waiting for comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeekBuffer {
    Empty,
    One(CardIndex),
    /// A mismatched pair, input stays locked until it is hidden again.
    Pair(CardIndex, CardIndex),
}

impl PeekBuffer {
    pub const fn len(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn to_vec(self) -> Vec<CardIndex> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(first) => vec![first],
            Self::Pair(first, second) => vec![first, second],
        }
    }
}

impl Default for PeekBuffer {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Starts a new round on the given board, the best score carries over.
    StartOrReset(Board),
    RevealCard(CardIndex),
    HideMismatched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    NoChange,
    Reset,
    Peeked,
    Mismatched,
    Matched,
    Won { new_record: bool },
    Hidden,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Reset => true,
            Peeked => true,
            Mismatched => true,
            Matched => true,
            Won { .. } => true,
            Hidden => true,
        }
    }
}

/// Authoritative state of one round plus the best score carried between rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    revealed: Vec<bool>,
    peeked: PeekBuffer,
    moves: MoveCount,
    best_score: Option<MoveCount>,
}

impl GameState {
    pub fn new(board: Board, best_score: Option<MoveCount>) -> Self {
        let revealed = vec![false; board.len()];
        Self {
            board,
            revealed,
            peeked: PeekBuffer::Empty,
            moves: 0,
            best_score,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn is_revealed(&self, index: CardIndex) -> bool {
        self.revealed
            .get(usize::from(index))
            .copied()
            .unwrap_or(false)
    }

    pub fn peeked(&self) -> PeekBuffer {
        self.peeked
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn best_score(&self) -> Option<MoveCount> {
        self.best_score
    }

    pub fn won(&self) -> bool {
        self.revealed.iter().all(|&revealed| revealed)
    }

    /// Input is locked while a mismatched pair waits to be hidden.
    pub fn is_locked(&self) -> bool {
        matches!(self.peeked, PeekBuffer::Pair(..))
    }

    pub fn can_reveal(&self, index: CardIndex) -> bool {
        self.board.validate_index(index).is_ok()
            && !self.is_revealed(index)
            && !self.is_locked()
            && !self.won()
    }

    pub fn visible_face(&self, index: CardIndex) -> Face {
        match self.board.card_at(index) {
            Some(card) if self.is_revealed(index) => Face::Card(card),
            _ => Face::Cover,
        }
    }

    /// Computes the state following `action`, `self` is left untouched.
    pub fn transition(&self, action: Action) -> Result<(Self, Outcome)> {
        match action {
            Action::StartOrReset(board) => Ok((Self::new(board, self.best_score), Outcome::Reset)),
            Action::RevealCard(index) => self.reveal(index),
            Action::HideMismatched => Ok(self.hide_mismatched()),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(self)
    }

    fn reveal(&self, index: CardIndex) -> Result<(Self, Outcome)> {
        let index = self.board.validate_index(index)?;

        if self.is_revealed(index) || self.is_locked() {
            return Ok((self.clone(), Outcome::NoChange));
        }

        let mut next = self.clone();
        next.revealed[usize::from(index)] = true;
        next.moves = next.moves.saturating_add(1);

        let outcome = match self.peeked {
            PeekBuffer::Pair(..) => return Ok((self.clone(), Outcome::NoChange)),
            PeekBuffer::Empty => {
                next.peeked = PeekBuffer::One(index);
                Outcome::Peeked
            }
            PeekBuffer::One(first) if self.board[first].matches(self.board[index]) => {
                next.peeked = PeekBuffer::Empty;
                if next.won() {
                    next.record_win()
                } else {
                    Outcome::Matched
                }
            }
            PeekBuffer::One(first) => {
                next.peeked = PeekBuffer::Pair(first, index);
                Outcome::Mismatched
            }
        };

        Ok((next, outcome))
    }

    fn record_win(&mut self) -> Outcome {
        let new_record = self.best_score.is_none_or(|best| self.moves < best);
        if new_record {
            self.best_score = Some(self.moves);
        }
        Outcome::Won { new_record }
    }

    fn hide_mismatched(&self) -> (Self, Outcome) {
        let PeekBuffer::Pair(first, second) = self.peeked else {
            return (self.clone(), Outcome::NoChange);
        };

        let mut next = self.clone();
        next.revealed[usize::from(first)] = false;
        next.revealed[usize::from(second)] = false;
        next.peeked = PeekBuffer::Empty;
        (next, Outcome::Hidden)
    }
}
