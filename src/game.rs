//! The game module contains what both games share and the menu loop that runs them.
//!
//! It holds the `init()` function that parses the command line and starts the menu, the `DiceGame`
//! trait that puts a boundary around every game so a fault never reaches the menu, and the `Arcade`,
//! which dispatches menu choices and reports final scores to the statistics.

use std::fmt;

use anyhow::Result;
use clap::Parser;
use fastrand::Rng;
use tracing_subscriber::EnvFilter;

use crate::dice::Roller;
use crate::error::Fault;
use crate::input::{Console, Terminal};
use crate::menu::MenuChoice;
use crate::self_test::run_self_tests;
use crate::sevens_out::SevensOut;
use crate::statistics::{Statistics, Tally};
use crate::three_or_more::ThreeOrMore;

/// The number of automated games each self test plays unless told otherwise.
pub(crate) const DEFAULT_SELF_TEST_GAMES: u32 = 100;

/// This struct holds the command line of the application, parsed with clap's derive attributes.
#[derive(Parser)]
#[command(name = "dicegames", version, about)]
#[command(next_line_help = true)]
struct Cli {
    /// Turns off colors and bold text.
    #[arg(long)]
    plain: bool,
    /// The seed for the dice.
    ///
    /// The same seed and the same answers at the prompts replay the same games. Without a seed the
    /// dice are seeded from the system.
    #[arg(short, long)]
    #[arg(env = "DICEGAMES_SEED", value_name = "SEED")]
    seed: Option<u64>,
    /// How many automated games of each kind the self tests (menu entry 4) play.
    #[arg(long, default_value_t = DEFAULT_SELF_TEST_GAMES)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    #[arg(env = "DICEGAMES_SELF_TEST_GAMES", value_name = "GAMES")]
    self_test_games: u32,
}

/// How a game came to an end, when no fault cut it short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    /// Every turn of the game was played.
    Completed,
    /// The player asked to leave at a prompt.
    Exited,
    /// The player hit a winning roll.
    Won,
}

/// A score that only ever goes up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Score(u32);

impl Score {
    /// Returns the points scored so far.
    #[must_use]
    pub(crate) const fn value(self) -> u32 {
        self.0
    }

    /// Adds `points` to the score.
    ///
    /// # Errors
    ///
    /// Returns `Fault::ScoreOverflow`, leaving the score as it was, if the sum does not fit.
    pub(crate) fn add(&mut self, points: u32) -> Result<(), Fault> {
        self.0 = self.0.checked_add(points).ok_or(Fault::ScoreOverflow {
            points,
            score: self.0,
        })?;

        Ok(())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// This trait is implemented by both games. A game only has to know how to run itself; the
/// provided `play()` method turns a fault into a report and always hands back the score.
#[expect(
    clippy::module_name_repetitions,
    reason = "Both games implement it, so it reads best as what they both are."
)]
pub trait DiceGame {
    /// The name the game is shown under.
    const NAME: &'static str;

    /// The points scored so far.
    fn score(&self) -> u32;

    /// Runs the game until it ends, talking to the player through `console` and rolling on
    /// `roller`.
    ///
    /// # Errors
    ///
    /// Returns the fault that stopped the game. The score keeps whatever was added before it.
    fn run<C: Console, R: Roller>(&mut self, console: &mut C, roller: &mut R)
        -> Result<Ending, Fault>;

    /// Runs the game and returns its final score. A fault is logged and reported on the console in
    /// a single line naming the game, and never goes any further.
    fn play<C: Console, R: Roller>(&mut self, console: &mut C, roller: &mut R) -> u32 {
        tracing::info!(game = Self::NAME, "game started");

        match self.run(console, roller) {
            Ok(ending) => {
                tracing::info!(game = Self::NAME, ?ending, score = self.score(), "game over");
            }
            Err(fault) => {
                tracing::error!(game = Self::NAME, %fault, score = self.score(), "game aborted");

                let report = format!("ERROR OCCURRED {}: {fault}", Self::NAME.to_uppercase());
                if let Err(unreported) = console.emphasize(&report) {
                    tracing::error!(%unreported, "the fault could not be reported");
                }
            }
        }

        self.score()
    }
}

/// This struct runs the main menu. It owns the console, the one roller every game rolls on and the
/// statistics every finished game reports to.
pub struct Arcade<C, R, S> {
    /// This field contains the console the menu and every game talk through.
    console: C,
    /// This field contains the roller shared by every game and the self tests.
    roller: R,
    /// This field holds how many games of each kind the self tests play.
    self_test_games: u32,
    /// This field contains the sink finished games report their score to.
    statistics: S,
}

impl<C: Console, R: Roller, S: Statistics> Arcade<C, R, S> {
    /// Creates a menu over the given console, roller and statistics.
    pub const fn new(console: C, roller: R, statistics: S) -> Self {
        Self {
            console,
            roller,
            self_test_games: DEFAULT_SELF_TEST_GAMES,
            statistics,
        }
    }

    /// Sets how many games of each kind the self tests play.
    #[must_use]
    pub fn with_self_test_games(mut self, games: u32) -> Self {
        self.self_test_games = games;
        self
    }

    /// The console the menu talks through.
    pub const fn console(&self) -> &C {
        &self.console
    }

    /// The statistics finished games were reported to.
    pub const fn statistics(&self) -> &S {
        &self.statistics
    }

    /// Shows the menu and handles choices until the player quits. Invalid choices are rejected and
    /// the menu is shown again.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu itself could not be read or written. Faults inside a game and
    /// failing self tests are reported on the console and do not end the loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.emphasize("Choose a game:")?;
            for choice in MenuChoice::ALL {
                self.console.write_line(&choice.to_string())?;
            }

            let line = self.console.read_line("Your choice")?;
            let Some(choice) = MenuChoice::parse(&line) else {
                tracing::warn!(line = %line.trim(), "invalid menu choice");
                self.console
                    .write_line("Invalid choice. Please choose again.")?;
                continue;
            };

            tracing::debug!(?choice, "menu choice");

            match choice {
                MenuChoice::SevensOut => {
                    let score = SevensOut::new().play(&mut self.console, &mut self.roller);
                    self.statistics.update_sevens_out(score);
                }
                MenuChoice::ThreeOrMore => {
                    let score = ThreeOrMore::new().play(&mut self.console, &mut self.roller);
                    self.statistics.update_three_or_more(score);
                }
                MenuChoice::Statistics => self.statistics.display(&mut self.console)?,
                MenuChoice::SelfTest => self.self_test()?,
                MenuChoice::Quit => break Ok(()),
            }
        }
    }

    /// Runs the self tests and reports the outcome on the console.
    fn self_test(&mut self) -> Result<(), Fault> {
        match run_self_tests(&mut self.roller, self.self_test_games) {
            Ok(()) => self.console.emphasize("All tests passed!"),
            Err(error) => {
                tracing::error!(error = %format!("{error:#}"), "self tests failed");
                self.console.emphasize(&format!("ERROR: {error:#}"))
            }
        }
    }
}

/// Parses the command line, sets up logging and the terminal, and runs the menu until the player
/// quits. This is the `main()` of the application, though it is still called from main.rs.
///
/// # Errors
///
/// Returns an error if the terminal could not be read or written outside of a game.
pub fn init() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.plain {
        console::set_colors_enabled(false);
    }

    let roller = cli.seed.map_or_else(Rng::new, Rng::with_seed);
    tracing::info!(seed = ?cli.seed, self_test_games = cli.self_test_games, "starting");

    let mut terminal = Terminal::new();
    terminal.welcome()?;

    Arcade::new(terminal, roller, Tally::default())
        .with_self_test_games(cli.self_test_games)
        .run()
}

/// Installs the log subscriber. Logs go to the standard error, filtered by `RUST_LOG`, and only
/// warnings and errors are shown by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use super::*;
    use crate::testing::{LoadedDice, Script};

    #[test]
    fn score_adds_points() {
        let mut score = Score::default();

        score.add(8).expect("fits");
        score.add(0).expect("fits");

        assert_eq!(score.value(), 8);
        assert_eq!(score.to_string(), "8");
    }

    #[test]
    fn score_overflow_is_a_fault_and_keeps_the_score() {
        let mut score = Score(u32::MAX - 1);

        let result = score.add(2);

        assert!(matches!(
            result,
            Err(Fault::ScoreOverflow { points: 2, score: 4_294_967_294 })
        ));
        assert_eq!(score.value(), u32::MAX - 1);
    }

    #[test]
    fn menu_plays_games_and_reports_scores() {
        let mut answers = vec!["1", "", ""];
        answers.push("2");
        answers.extend([""; 11]);
        answers.extend(["3", "5"]);
        let script = Script::new(&answers);
        let dice = LoadedDice::new(&[2, 2, 3, 4, 1, 1, 1, 5, 9, 5, 9, 2, 3, 4, 6, 8]);
        let mut arcade = Arcade::new(script, dice, Tally::default());

        arcade.run().expect("the script ends with quit");

        let mut expected = Tally::default();
        expected.update_sevens_out(8);
        expected.update_three_or_more(8);
        assert_eq!(arcade.statistics(), &expected);
        let transcript = arcade.console().transcript();
        assert!(transcript.contains("You hit 7...WINNER!!!"));
        assert!(transcript.contains("Sevens Out: 8 (1 game)"));
        assert!(transcript.contains("Three or More: 8 (1 game)"));
    }

    #[test]
    fn invalid_choices_are_rejected_and_asked_again() {
        let script = Script::new(&["7", "abc", "", "5"]);
        let mut arcade = Arcade::new(script, LoadedDice::new(&[]), Tally::default());

        arcade.run().expect("the script ends with quit");

        let rejections = arcade
            .console()
            .lines()
            .iter()
            .filter(|line| *line == "Invalid choice. Please choose again.")
            .count();
        assert_eq!(rejections, 3);
        assert_eq!(arcade.console().prompts().len(), 4);
    }

    #[test]
    fn game_faults_return_to_the_menu() {
        let script = Script::new(&["1", "", "5"]);
        let dice = LoadedDice::new(&[0]);
        let mut arcade = Arcade::new(script, dice, Tally::default());

        arcade.run().expect("a game fault does not end the menu");

        let mut expected = Tally::default();
        expected.update_sevens_out(0);
        assert_eq!(arcade.statistics(), &expected);
        assert!(arcade
            .console()
            .transcript()
            .contains("ERROR OCCURRED SEVENS OUT: the die landed on 0"));
    }

    #[test]
    fn self_test_failures_are_reported() {
        let script = Script::new(&["4", "5"]);
        let mut arcade =
            Arcade::new(script, LoadedDice::new(&[99]), Tally::default()).with_self_test_games(1);

        arcade.run().expect("a failing self test does not end the menu");

        assert!(arcade
            .console()
            .transcript()
            .contains("ERROR: Sevens Out self test, game 1: the die landed on 99"));
    }

    #[test]
    fn self_tests_pass_on_fair_dice() {
        let script = Script::new(&["4", "5"]);
        let rng = fastrand::Rng::with_seed(11);
        let mut arcade = Arcade::new(script, rng, Tally::default()).with_self_test_games(20);

        arcade.run().expect("the script ends with quit");

        assert!(arcade.console().transcript().contains("All tests passed!"));
        assert_eq!(arcade.statistics(), &Tally::default());
    }

    #[test]
    fn closed_input_at_the_menu_is_an_error() {
        let mut arcade = Arcade::new(Script::new(&[]), LoadedDice::new(&[]), Tally::default());

        assert!(arcade.run().is_err());
    }
}
