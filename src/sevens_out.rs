//! Sevens Out: roll two dice as many times as you dare. Every roll adds its total to the score,
//! doubles count twice, and a seven ends the game.

use crate::dice::{Die, Face, Roller};
use crate::error::Fault;
use crate::game::{DiceGame, Ending, Score};
use crate::input::{ask, Command, Console};

/// The total that ends the game.
pub(crate) const SEVEN: u32 = 7;

/// This enum holds how a single roll of the two dice is scored, along with the total of the roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Round {
    /// Both dice show the same face; worth twice the total.
    Double {
        /// The sum of both faces.
        total: u32,
    },
    /// Any other roll that does not total seven; worth the total.
    Plain {
        /// The sum of both faces.
        total: u32,
    },
    /// The dice total seven. The game is won and the roll is worth nothing.
    Seven,
}

impl Round {
    /// Scores a roll of two dice. A seven takes precedence over a double, although with two equal
    /// faces the total is always even.
    #[must_use]
    pub(crate) fn resolve(first: Face, second: Face) -> Self {
        let total = u32::from(first.value()) + u32::from(second.value());

        if total == SEVEN {
            Self::Seven
        } else if first == second {
            Self::Double { total }
        } else {
            Self::Plain { total }
        }
    }

    /// The sum of both faces of the roll.
    #[must_use]
    pub(crate) const fn total(self) -> u32 {
        match self {
            Self::Double { total } | Self::Plain { total } => total,
            Self::Seven => SEVEN,
        }
    }

    /// The points this round adds to the score.
    #[must_use]
    pub(crate) const fn points(self) -> u32 {
        match self {
            Self::Double { total } => total * 2,
            Self::Plain { total } => total,
            Self::Seven => 0,
        }
    }
}

/// This struct holds a game of Sevens Out in progress: its pair of dice and the score so far.
#[derive(Debug, Default)]
pub struct SevensOut {
    /// This field contains the two dice rolled every round.
    dice: [Die; 2],
    /// This field contains the points scored before the current roll.
    score: Score,
}

impl SevensOut {
    /// Starts a game with a score of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiceGame for SevensOut {
    const NAME: &'static str = "Sevens Out";

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn run<C: Console, R: Roller>(
        &mut self,
        console: &mut C,
        roller: &mut R,
    ) -> Result<Ending, Fault> {
        let [ref first_die, ref second_die] = self.dice;

        loop {
            if ask(console, "Press Enter to roll the dice or 'E' to exit...")? == Command::Exit {
                console.write_line("Exiting Sevens Out...")?;
                return Ok(Ending::Exited);
            }

            let first = first_die.roll(roller)?;
            let second = second_die.roll(roller)?;
            let round = Round::resolve(first, second);

            console.write_line(&format!(
                "Roll: {first} + {second} = {} (score = {})",
                round.total(),
                self.score
            ))?;
            tracing::debug!(%first, %second, ?round, "sevens out round");

            if round == Round::Seven {
                console.emphasize("You hit 7...WINNER!!!")?;
                return Ok(Ending::Won);
            }

            self.score.add(round.points())?;
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{LoadedDice, Script};

    fn round(first: u8, second: u8) -> Round {
        let face = |value| Face::new(value).expect("on the die");
        Round::resolve(face(first), face(second))
    }

    #[test]
    fn seven_wins_without_points() {
        assert_eq!(round(3, 4), Round::Seven);
        assert_eq!(round(1, 6), Round::Seven);
        assert_eq!(round(3, 4).points(), 0);
    }

    #[test]
    fn doubles_score_twice_the_total() {
        assert_eq!(round(2, 2), Round::Double { total: 4 });
        assert_eq!(round(2, 2).points(), 8);
        assert_eq!(round(13, 13).points(), 52);
    }

    #[test]
    fn other_rolls_score_their_total() {
        assert_eq!(round(5, 3), Round::Plain { total: 8 });
        assert_eq!(round(1, 13).points(), 14);
    }

    #[test]
    fn every_round_reports_the_sum_of_its_faces() {
        assert_eq!(round(3, 4).total(), 7);
        assert_eq!(round(6, 6).total(), 12);
        assert_eq!(round(1, 13).total(), 14);
    }

    #[test]
    fn rounds_accumulate_until_a_seven() {
        let mut script = Script::new(&["", "", "", ""]);
        let mut dice = LoadedDice::new(&[2, 2, 5, 3, 3, 4]);
        let mut game = SevensOut::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Won);
        assert_eq!(game.score(), 16);
        assert_eq!(script.prompts().len(), 3);
        assert_eq!(
            script.lines(),
            [
                "Roll: 2 + 2 = 4 (score = 0)",
                "Roll: 5 + 3 = 8 (score = 8)",
                "Roll: 3 + 4 = 7 (score = 16)",
                "You hit 7...WINNER!!!",
            ]
        );
    }

    #[test]
    fn court_faces_are_shown_as_letters() {
        let mut script = Script::new(&["", ""]);
        let mut dice = LoadedDice::new(&[1, 13, 6, 1]);
        let mut game = SevensOut::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Won);
        assert_eq!(
            script.lines(),
            [
                "Roll: A + K = 14 (score = 0)",
                "Roll: 6 + A = 7 (score = 14)",
                "You hit 7...WINNER!!!",
            ]
        );
    }

    #[test]
    fn exit_keeps_the_score_and_rolls_nothing() {
        let mut script = Script::new(&["", "e"]);
        let mut dice = LoadedDice::new(&[5, 3, 9, 9]);
        let mut game = SevensOut::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Exited);
        assert_eq!(game.score(), 8);
        assert_eq!(dice.remaining(), 2);
        assert_eq!(script.lines().last().map(String::as_str), Some("Exiting Sevens Out..."));
    }

    #[test]
    fn exit_at_the_first_prompt_scores_zero() {
        let mut script = Script::new(&[" E "]);
        let mut dice = LoadedDice::new(&[]);
        let mut game = SevensOut::new();

        let score = game.play(&mut script, &mut dice);

        assert_eq!(score, 0);
    }

    #[test]
    fn fault_reports_and_keeps_the_partial_score() {
        let mut script = Script::new(&["", ""]);
        let mut dice = LoadedDice::new(&[6, 6, 2, 20]);
        let mut game = SevensOut::new();

        let score = game.play(&mut script, &mut dice);

        assert_eq!(score, 24);
        assert_eq!(
            script.lines().last().map(String::as_str),
            Some("ERROR OCCURRED SEVENS OUT: the die landed on 20, which is not one of its faces")
        );
    }

    proptest! {
        #[test]
        fn seeded_games_end_in_a_win_with_a_growing_score(seed in any::<u64>()) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut game = SevensOut::new();
            let mut script = Script::new(&[""].repeat(4_000));

            let ending = game.run(&mut script, &mut rng);

            prop_assert!(matches!(ending, Ok(Ending::Won)));

            let shown: Vec<u32> = script
                .lines()
                .iter()
                .filter_map(|line| line.strip_prefix("Roll: "))
                .filter_map(|line| line.rsplit("score = ").next())
                .filter_map(|score| score.trim_end_matches(')').parse().ok())
                .collect();
            prop_assert!(shown.is_sorted());
            prop_assert_eq!(shown.last().copied(), Some(game.score()));
        }
    }
}
