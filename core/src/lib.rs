#![no_std]

extern crate alloc;

pub use board::*;
pub use card::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use shuffler::*;
pub use snapshot::*;
pub use store::*;
pub use types::*;

mod board;
mod card;
mod controller;
mod engine;
mod error;
mod shuffler;
mod snapshot;
mod store;
mod types;
