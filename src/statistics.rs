//! Running totals of the scores reported by finished games. They live as long as the process does.

use std::fmt;

use crate::error::Fault;
use crate::input::Console;

/// This trait is the sink every finished game reports its score to. The driver only talks to it
/// through these three operations, so any other sink can stand in for the default `Tally`.
pub trait Statistics {
    /// Records the final score of a game of Sevens Out.
    fn update_sevens_out(&mut self, score: u32);

    /// Records the final score of a game of Three or More.
    fn update_three_or_more(&mut self, score: u32);

    /// Renders the running totals.
    ///
    /// # Errors
    ///
    /// Returns a fault if the console could not be written to.
    fn display<C: Console>(&self, console: &mut C) -> Result<(), Fault>;
}

/// The total score and number of games recorded for one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Record {
    /// How many games were recorded.
    games: u32,
    /// The sum of their scores.
    total: u64,
}

impl Record {
    /// This function counts one more game and adds its score to the total. Neither number wraps.
    fn push(&mut self, score: u32) {
        self.games = self.games.saturating_add(1);
        self.total = self.total.saturating_add(u64::from(score));
    }
}

impl fmt::Display for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.games == 1 { "game" } else { "games" };

        write!(formatter, "{} ({} {noun})", self.total, self.games)
    }
}

/// This struct is the in-memory statistics sink: one record per game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// This field contains the record of Sevens Out games.
    sevens_out: Record,
    /// This field contains the record of Three or More games.
    three_or_more: Record,
}

impl Statistics for Tally {
    fn update_sevens_out(&mut self, score: u32) {
        self.sevens_out.push(score);
    }

    fn update_three_or_more(&mut self, score: u32) {
        self.three_or_more.push(score);
    }

    fn display<C: Console>(&self, console: &mut C) -> Result<(), Fault> {
        console.emphasize("Statistics:")?;
        console.write_line(&format!("Sevens Out: {}", self.sevens_out))?;
        console.write_line(&format!("Three or More: {}", self.three_or_more))
    }
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
    fn scores_add_up_per_game() {
        let mut tally = Tally::default();

        tally.update_sevens_out(16);
        tally.update_sevens_out(0);
        tally.update_three_or_more(8);

        assert_eq!(tally.sevens_out, Record { games: 2, total: 16 });
        assert_eq!(tally.three_or_more, Record { games: 1, total: 8 });
    }

    #[test]
    fn totals_do_not_wrap() {
        let mut tally = Tally::default();

        tally.update_three_or_more(u32::MAX);
        tally.update_three_or_more(u32::MAX);

        assert_eq!(tally.three_or_more.total, u64::from(u32::MAX) * 2);
    }

    #[test]
    fn display_shows_both_games() {
        let mut tally = Tally::default();
        let mut script = Script::new(&[]);
        tally.update_sevens_out(30);

        tally.display(&mut script).expect("the script accepts output");

        assert_eq!(
            script.lines(),
            [
                "Statistics:",
                "Sevens Out: 30 (1 game)",
                "Three or More: 0 (0 games)",
            ]
        );
    }

    #[test]
    fn game_count_is_pluralised() {
        let mut record = Record::default();
        let mut shown = vec![record.to_string()];

        record.push(4);
        shown.push(record.to_string());
        record.push(9);
        shown.push(record.to_string());

        assert_eq!(shown, ["0 (0 games)", "4 (1 game)", "13 (2 games)"]);
    }
}
