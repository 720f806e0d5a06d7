//! Domain records for the game store catalog.
pub mod console;
pub mod game;

pub use console::{Console, ConsoleUpdate, NewConsole};
pub use game::{Game, GameUpdate, NewGame};
