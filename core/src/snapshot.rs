use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw the board after a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Logical card names in board order.
    pub cards: Vec<String>,
    pub revealed: Vec<bool>,
    pub faces: Vec<Face>,
    pub locked: bool,
    pub moves: MoveCount,
    pub won: bool,
    pub best_score: Option<MoveCount>,
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        let cards = state.board().cards().iter().map(|card| card.name()).collect();
        let faces = (0..state.board().len())
            .map(|index| state.visible_face(index as CardIndex))
            .collect();

        Self {
            cards,
            revealed: state.revealed().to_vec(),
            faces,
            locked: state.is_locked(),
            moves: state.moves(),
            won: state.won(),
            best_score: state.best_score(),
        }
    }

    /// Image path of every position, covers included.
    pub fn face_paths<'a>(&'a self, base: &'a str, ext: &'a str) -> impl Iterator<Item = String> + 'a {
        self.faces.iter().map(move |face| face.asset_path(base, ext))
    }
}
