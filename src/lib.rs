//! A bounded game of life.
//!
//! [`Grid`] holds the cells and checks every coordinate, [`Game`] seeds a grid
//! and advances it one generation at a time. [`Sim`] runs a game on its own
//! thread for callers that edit and step it from several places.

pub use utils::Pos;
mod utils;

pub use grid::{Cell, Grid, GridError, MIN_SIZE};
pub mod grid;

pub use game::{next_state, CreateError, Game};
mod game;

pub use history::{History, HISTORY_LEN};
mod history;

pub use pattern::{offset, parse_pattern};
pub mod pattern;

pub use sim::{Sim, SimError, SimHandle, Snapshot, StepReport};
mod sim;
