use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Symbolic category of a card, two cards on the board share each kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Helmet,
    Potion,
    Ring,
    Scroll,
    Shield,
    Sword,
}

impl Kind {
    pub const ALL: [Kind; PAIR_COUNT] = [
        Kind::Helmet,
        Kind::Potion,
        Kind::Ring,
        Kind::Scroll,
        Kind::Shield,
        Kind::Sword,
    ];

    pub const fn name(self) -> &'static str {
        use Kind::*;
        match self {
            Helmet => "helmet",
            Potion => "potion",
            Ring => "ring",
            Scroll => "scroll",
            Shield => "shield",
            Sword => "sword",
        }
    }
}

/// Tells apart the two physical cards of the same kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instance {
    First,
    Second,
}

impl Instance {
    pub const fn tag(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIdentity {
    pub kind: Kind,
    pub instance: Instance,
}

impl CardIdentity {
    pub const fn new(kind: Kind, instance: Instance) -> Self {
        Self { kind, instance }
    }

    /// Two cards form a pair when their kinds are equal, instances are ignored.
    pub fn matches(self, other: Self) -> bool {
        self.kind == other.kind
    }

    /// Logical name, e.g. `sword-2`.
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.name(), self.instance.tag())
    }
}

const fn first(kind: Kind) -> CardIdentity {
    CardIdentity::new(kind, Instance::First)
}

const fn second(kind: Kind) -> CardIdentity {
    CardIdentity::new(kind, Instance::Second)
}

/// Every card of a standard board, in catalog order.
pub const CATALOG: [CardIdentity; CARD_COUNT] = [
    first(Kind::Helmet),
    first(Kind::Potion),
    first(Kind::Ring),
    first(Kind::Scroll),
    first(Kind::Shield),
    first(Kind::Sword),
    second(Kind::Helmet),
    second(Kind::Potion),
    second(Kind::Ring),
    second(Kind::Scroll),
    second(Kind::Shield),
    second(Kind::Sword),
];

/// What is visible at a board position: the card itself or its back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Cover,
    Card(CardIdentity),
}

impl Face {
    pub const COVER_NAME: &'static str = "cover";

    pub fn asset_name(self) -> String {
        match self {
            Self::Cover => Self::COVER_NAME.to_string(),
            Self::Card(card) => card.name(),
        }
    }

    /// Resolves to `<base>/<name>.<ext>`, a trailing slash on `base` is ignored.
    pub fn asset_path(self, base: &str, ext: &str) -> String {
        format!(
            "{}/{}.{}",
            base.trim_end_matches('/'),
            self.asset_name(),
            ext
        )
    }
}
