//! This module contains everything related to talking with the player. The games never touch the
//! terminal directly; they go through the `Console` trait, which the `Terminal` type implements with
//! the `console` and `dialoguer` crates.
//!
//! Every prompt in a game is a roll-or-exit question, which `ask()` takes care of.

use std::io::{self, BufRead, IsTerminal as _};

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::Fault;

/// This trait represents a line-based conversation with the player.
pub trait Console {
    /// Shows `prompt` and returns the line the player typed, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns a fault if the input could not be read.
    fn read_line(&mut self, prompt: &str) -> Result<String, Fault>;

    /// Writes a line of output.
    ///
    /// # Errors
    ///
    /// Returns a fault if the output could not be written.
    fn write_line(&mut self, line: &str) -> Result<(), Fault>;

    /// Writes a line that should stand out, such as a win or an error. Plain consoles write it as
    /// any other line.
    ///
    /// # Errors
    ///
    /// Returns a fault if the output could not be written.
    fn emphasize(&mut self, line: &str) -> Result<(), Fault> {
        self.write_line(line)
    }
}

/// What the player asked for at a roll-or-exit prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Leave the current game.
    Exit,
    /// Roll the dice.
    Roll,
}

impl Command {
    /// Reads a command from a line of input. Only `E`, in any case and with any surrounding
    /// whitespace, means exit; everything else, the empty line included, means roll.
    #[must_use]
    pub(crate) fn parse(line: &str) -> Self {
        if line.trim().eq_ignore_ascii_case("e") {
            Self::Exit
        } else {
            Self::Roll
        }
    }
}

/// This struct is the interactive console: output goes through a `Term` on the standard output,
/// and prompts are `dialoguer` text inputs drawn on the same terminal.
///
/// When the standard input or output is not a terminal, as with `printf '1\n\n5\n' | dicegames`,
/// prompts are written as plain lines and answers are read line by line from the standard input.
pub(crate) struct Terminal {
    /// This field holds whether both ends are a terminal, which dialoguer needs to draw a prompt.
    interactive: bool,
    /// This field contains the handle used for both prompts and output.
    term: Term,
    /// This field contains the theme every interactive prompt is drawn with.
    theme: ColorfulTheme,
}

impl Terminal {
    /// Creates a console on the standard output.
    #[must_use]
    pub(crate) fn new() -> Self {
        let term = Term::stdout();

        Self {
            interactive: term.is_term() && io::stdin().is_terminal(),
            term,
            theme: ColorfulTheme::default(),
        }
    }

    /// Clears the screen, sets the window title and writes the welcome banner. Piped sessions only
    /// get the banner.
    ///
    /// # Errors
    ///
    /// Returns a fault if the terminal could not be written to.
    pub(crate) fn welcome(&mut self) -> Result<(), Fault> {
        const MSG: &str = "Welcome to Sevens Out and Three or More";

        if self.interactive {
            self.term.clear_screen()?;
            self.term.set_title("dicegames");
        }
        self.emphasize(MSG)
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String, Fault> {
        if !self.interactive {
            self.term.write_line(prompt)?;
            return read_piped_line(&mut io::stdin().lock());
        }

        let line: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;

        Ok(line)
    }

    fn write_line(&mut self, line: &str) -> Result<(), Fault> {
        self.term.write_line(line)?;
        Ok(())
    }

    fn emphasize(&mut self, line: &str) -> Result<(), Fault> {
        self.term.write_line(&format!("{}", style(line).bold()))?;
        Ok(())
    }
}

/// Shows a roll-or-exit prompt and returns the player's choice.
///
/// # Errors
///
/// Returns a fault if the console could not read the answer.
pub(crate) fn ask<C: Console>(console: &mut C, prompt: &str) -> Result<Command, Fault> {
    let command = Command::parse(&console.read_line(prompt)?);
    tracing::trace!(prompt, ?command, "prompt answered");

    Ok(command)
}

/// This function reads one answer from a non-interactive source, without its line ending.
///
/// # Errors
///
/// Returns `Fault::InputClosed` once the source is exhausted, and `Fault::Prompt` if reading it
/// failed.
fn read_piped_line<B: BufRead>(source: &mut B) -> Result<String, Fault> {
    let mut line = String::new();

    if source
        .read_line(&mut line)
        .map_err(dialoguer::Error::from)?
        == 0
    {
        return Err(Fault::InputClosed);
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use super::*;
    use crate::testing::Script;

    #[test]
    fn e_in_any_case_exits() {
        assert_eq!(Command::parse("E"), Command::Exit);
        assert_eq!(Command::parse("e"), Command::Exit);
        assert_eq!(Command::parse("  e \t"), Command::Exit);
    }

    #[test]
    fn anything_else_rolls() {
        for line in ["", "   ", "x", "exit", "EE", "1"] {
            assert_eq!(Command::parse(line), Command::Roll, "{line:?}");
        }
    }

    #[test]
    fn ask_forwards_the_prompt() {
        let mut script = Script::new(&["E"]);

        let command = ask(&mut script, "Roll?").expect("the script has an answer");

        assert_eq!(command, Command::Exit);
        assert_eq!(script.prompts(), ["Roll?"]);
    }

    #[test]
    fn ask_fails_once_input_runs_out() {
        let mut script = Script::new(&[]);

        assert!(matches!(ask(&mut script, "Roll?"), Err(Fault::InputClosed)));
    }

    #[test]
    fn piped_answers_are_read_line_by_line() {
        let mut source = "1\n\r\nE\n5".as_bytes();

        let answers: Vec<String> = (0..4)
            .map(|_| read_piped_line(&mut source).expect("one answer per line"))
            .collect();

        assert_eq!(answers, ["1", "", "E", "5"]);
        assert!(matches!(read_piped_line(&mut source), Err(Fault::InputClosed)));
    }
}
