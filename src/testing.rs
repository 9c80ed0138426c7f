//! Test doubles shared by the unit tests: a scripted console and a set of loaded dice.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::dice::{Face, Roller};
use crate::error::Fault;
use crate::input::Console;

/// A console that answers prompts from a fixed script and records everything written to it.
#[derive(Default)]
pub(crate) struct Script {
    /// This field contains the answers not yet handed out, in order.
    answers: VecDeque<String>,
    /// This field contains every line written, emphasized ones included.
    lines: Vec<String>,
    /// This field contains every prompt shown, in order.
    prompts: Vec<String>,
}

impl Script {
    /// Creates a console that answers with `answers`, then reports the input as closed.
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().copied().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    /// The lines written so far.
    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The prompts shown so far.
    pub(crate) fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every line written so far, joined with newlines.
    pub(crate) fn transcript(&self) -> String {
        self.lines.join("\n")
    }
}

impl Console for Script {
    fn read_line(&mut self, prompt: &str) -> Result<String, Fault> {
        self.prompts.push(prompt.to_owned());
        self.answers.pop_front().ok_or(Fault::InputClosed)
    }

    fn write_line(&mut self, line: &str) -> Result<(), Fault> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Dice that land on a predetermined sequence of values.
pub(crate) struct LoadedDice {
    /// This field contains the values still to be rolled.
    values: VecDeque<u8>,
}

impl LoadedDice {
    /// Loads the dice with `values`, rolled front to back.
    pub(crate) fn new(values: &[u8]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }

    /// How many values are left to roll.
    pub(crate) fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Roller for LoadedDice {
    fn roll(&mut self, _faces: RangeInclusive<u8>) -> u8 {
        self.values
            .pop_front()
            .expect("the loaded dice ran out of values")
    }
}

/// Builds faces from plain values.
pub(crate) fn faces(values: &[u8]) -> Vec<Face> {
    values
        .iter()
        .map(|value| Face::new(*value).expect("test faces are on the die"))
        .collect()
}
