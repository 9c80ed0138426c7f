//! # dicegames
//!
//! This crate is a pair of dice games played at the terminal with thirteen-sided dice, whose faces
//! read like card ranks: ace, two to ten, jack, queen and king.
//!
//! In Sevens Out you keep rolling two dice and banking their total, twice over on doubles, until
//! they add up to seven. In Three or More you get two turns of five dice, scoring for three or more
//! matching faces and for aces and fives among the dice you reroll. The menu keeps a running total
//! of every game played until you quit.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use anyhow::Result;
use dicegames::init;

fn main() -> Result<()> {
    init()
}
