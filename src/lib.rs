//! The library components of the dice games. They cover the dice, the two games, the statistics
//! kept across games and the terminal the player talks to.
//!
//! The starting point of the library is the game.rs file, which contains the menu loop. Both games
//! only see the `Console` and `Roller` traits, so they can be driven by a script and loaded dice as
//! easily as by a player at a terminal.

#![expect(
    clippy::cargo_common_metadata,
    reason = "The package has not yet been pushed to a remote."
)]

mod dice;
mod error;
mod game;
mod input;
mod menu;
mod self_test;
mod sevens_out;
mod statistics;
#[cfg(test)]
mod testing;
mod three_or_more;

pub use dice::Roller;
pub use error::Fault;
pub use game::{init, Arcade, DiceGame, Ending};
pub use input::Console;
pub use sevens_out::SevensOut;
pub use statistics::{Statistics, Tally};
pub use three_or_more::ThreeOrMore;
