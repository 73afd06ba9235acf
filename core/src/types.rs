/// Position of a card on the board.
pub type CardIndex = u8;

/// Count of card reveals, also the unit the best score is kept in.
pub type MoveCount = u32;

/// Number of distinct kinds on a standard board.
pub const PAIR_COUNT: usize = 6;

/// Number of cards on a standard board.
pub const CARD_COUNT: usize = PAIR_COUNT * 2;
