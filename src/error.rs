//! This module holds the one error type a game session can run into. Everything that goes wrong
//! while a game is being played, be it the terminal, the dice or the score, ends up as a `Fault`.
//!
//! Leaving a game on purpose is not a fault; see `game::Ending` for that.

use std::io;

/// This enum holds every unexpected condition that can stop a game half-way through. A fault never
/// leaves the game that raised it: the game reports it and hands back whatever score it had.
#[derive(thiserror::Error, Debug)]
pub enum Fault {
    /// The roller handed a die a value outside the die's faces.
    #[error("the die landed on {0}, which is not one of its faces")]
    FaceOutOfRange(u8),
    /// The input source has nothing left to read.
    #[error("the input was closed before the game finished")]
    InputClosed,
    /// Writing to the terminal failed.
    #[error("could not write to the terminal: {0}")]
    Output(#[from] io::Error),
    /// Reading a prompt from the terminal failed.
    #[error("could not read from the terminal: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Adding the points of a roll would overflow the score.
    #[error("adding {points} points to a score of {score} overflows")]
    ScoreOverflow {
        /// The points the roll was worth.
        points: u32,
        /// The score before the roll.
        score: u32,
    },
}
