//! Three or More: two turns of five dice. Three or more matching faces score a set bonus, and the
//! dice left out of the set get one reroll for another set or for ace and five bonuses.

use std::collections::BTreeMap;

use crate::dice::{format_roll, Die, Face, Roller};
use crate::error::Fault;
use crate::game::{DiceGame, Ending, Score};
use crate::input::{ask, Command, Console};

/// The number of dice rolled at the start of each turn.
pub(crate) const DICE: usize = 5;
/// The number of turns in a game.
pub(crate) const TURNS: usize = 2;
/// The smallest number of matching faces that scores.
pub(crate) const MIN_SET: usize = 3;
/// The highest score a game can reach: a triple and two leftover aces, twice.
pub(crate) const MAX_SCORE: u32 = 2 * (3 + 2 * 10);

/// A set of matching faces found in a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SetMatch {
    /// How many dice show the face.
    count: usize,
    /// The face the dice share.
    face: Face,
}

impl SetMatch {
    /// The bonus for the set: 3 for three of a kind, 6 for four and 12 for five or more.
    #[must_use]
    pub(crate) const fn points(self) -> u32 {
        match self.count {
            0..=2 => 0,
            3 => 3,
            4 => 6,
            _ => 12,
        }
    }
}

/// This struct holds a game of Three or More in progress: its five dice and the score so far.
#[derive(Debug, Default)]
pub struct ThreeOrMore {
    /// This field contains the five dice; a reroll uses the first ones.
    dice: [Die; DICE],
    /// This field contains the points scored in the turns played so far.
    score: Score,
}

impl ThreeOrMore {
    /// Starts a game with a score of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays one turn. Returns `Some(Ending::Exited)` if the player left during the turn.
    fn turn<C: Console, R: Roller>(
        &mut self,
        console: &mut C,
        roller: &mut R,
    ) -> Result<Option<Ending>, Fault> {
        let mut roll = Vec::with_capacity(DICE);

        for (position, die) in self.dice.iter().enumerate() {
            let prompt = format!("Press Enter to roll die {} or 'E' to exit...", position + 1);
            if ask(console, &prompt)? == Command::Exit {
                return Self::exit(console);
            }

            roll.push(die.roll(roller)?);
        }

        console.write_line(&format!("Roll: {}", format_roll(&roll)))?;

        let Some(set) = find_set(&roll) else {
            tracing::debug!(roll = %format_roll(&roll), "no set this turn");
            return Ok(None);
        };

        tracing::debug!(face = %set.face, count = set.count, "set found");
        self.score.add(set.points())?;

        let remaining = leftovers(&roll, set.face);
        if remaining.is_empty() {
            return Ok(None);
        }

        console.write_line("You have a chance to score more points.")?;
        if ask(console, "Press Enter to roll the remaining dice or 'E' to exit...")?
            == Command::Exit
        {
            return Self::exit(console);
        }

        // the surviving dice are rerolled on the first generators, one per leftover
        let reroll = self
            .dice
            .iter()
            .take(remaining.len())
            .map(|die| die.roll(roller))
            .collect::<Result<Vec<_>, _>>()?;

        console.write_line(&format!("Roll: {}", format_roll(&reroll)))?;

        let points = find_set(&reroll).map_or_else(|| leftover_bonus(&reroll), SetMatch::points);
        tracing::debug!(reroll = %format_roll(&reroll), points, "reroll scored");
        self.score.add(points)?;

        Ok(None)
    }

    /// Says goodbye on the way out of the game.
    fn exit<C: Console>(console: &mut C) -> Result<Option<Ending>, Fault> {
        console.write_line("Exiting Three or More...")?;
        Ok(Some(Ending::Exited))
    }
}

impl DiceGame for ThreeOrMore {
    const NAME: &'static str = "Three or More";

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn run<C: Console, R: Roller>(
        &mut self,
        console: &mut C,
        roller: &mut R,
    ) -> Result<Ending, Fault> {
        for turn in 1..=TURNS {
            tracing::debug!(turn, score = self.score.value(), "three or more turn");

            if let Some(ending) = self.turn(console, roller)? {
                return Ok(ending);
            }
        }

        Ok(Ending::Completed)
    }
}

/// This function looks for three or more dice sharing a face. Faces are checked from the lowest up
/// and the first qualifying one wins, so the result only depends on the roll.
#[must_use]
pub(crate) fn find_set(roll: &[Face]) -> Option<SetMatch> {
    let mut counts: BTreeMap<Face, usize> = BTreeMap::new();

    for face in roll {
        *counts.entry(*face).or_default() += 1;
    }

    counts
        .into_iter()
        .find(|&(_, count)| count >= MIN_SET)
        .map(|(face, count)| SetMatch { count, face })
}

/// Returns the dice of `roll` that are not part of a set of `face`.
#[must_use]
pub(crate) fn leftovers(roll: &[Face], face: Face) -> Vec<Face> {
    roll.iter().copied().filter(|die| *die != face).collect()
}

/// The bonus for dice left over after a reroll: 10 per ace, 5 per five, nothing for the rest.
#[must_use]
pub(crate) fn leftover_bonus(roll: &[Face]) -> u32 {
    roll.iter()
        .map(|face| match *face {
            Face::ACE => 10,
            Face::FIVE => 5,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{faces, LoadedDice, Script};

    fn face(value: u8) -> Face {
        Face::new(value).expect("on the die")
    }

    #[test]
    fn sets_score_by_size() {
        assert_eq!(find_set(&faces(&[1, 1, 1, 5, 9])), Some(SetMatch { count: 3, face: face(1) }));
        assert_eq!(find_set(&faces(&[7, 2, 7, 7, 7])).map(SetMatch::points), Some(6));
        assert_eq!(find_set(&faces(&[1, 1, 1, 1, 1])).map(SetMatch::points), Some(12));
        assert_eq!(find_set(&faces(&[13, 12, 13, 12, 13])).map(SetMatch::points), Some(3));
    }

    #[test]
    fn pairs_are_not_sets() {
        assert_eq!(find_set(&faces(&[2, 2, 3, 3, 4])), None);
        assert_eq!(find_set(&faces(&[5, 9])), None);
        assert_eq!(find_set(&[]), None);
    }

    #[test]
    fn lowest_qualifying_face_wins() {
        let roll = faces(&[9, 4, 9, 4, 9, 4]);

        assert_eq!(find_set(&roll).map(|set| set.face), Some(face(4)));
    }

    #[test]
    fn leftovers_drop_every_matching_die() {
        assert_eq!(leftovers(&faces(&[1, 5, 1, 9, 1]), face(1)), faces(&[5, 9]));
        assert!(leftovers(&faces(&[3, 3, 3, 3, 3]), face(3)).is_empty());
    }

    #[test]
    fn aces_and_fives_earn_a_leftover_bonus() {
        assert_eq!(leftover_bonus(&faces(&[5, 9])), 5);
        assert_eq!(leftover_bonus(&faces(&[1, 5])), 15);
        assert_eq!(leftover_bonus(&faces(&[1, 1])), 20);
        assert_eq!(leftover_bonus(&faces(&[2, 13])), 0);
    }

    #[test]
    fn triple_then_reroll_earns_the_leftover_bonus() {
        let mut script = Script::new(&[""; 13]);
        let mut dice = LoadedDice::new(&[1, 1, 1, 5, 9, 5, 9, 2, 3, 4, 6, 8]);
        let mut game = ThreeOrMore::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Completed);
        assert_eq!(game.score(), 8);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(
            script.lines(),
            [
                "Roll: A, A, A, 5, 9",
                "You have a chance to score more points.",
                "Roll: 5, 9",
                "Roll: 2, 3, 4, 6, 8",
            ]
        );
        assert_eq!(
            script.prompts().get(5).map(String::as_str),
            Some("Press Enter to roll the remaining dice or 'E' to exit...")
        );
    }

    #[test]
    fn five_of_a_kind_leaves_nothing_to_reroll() {
        let mut script = Script::new(&[""; 10]);
        let mut dice = LoadedDice::new(&[1, 1, 1, 1, 1, 12, 12, 12, 12, 12]);
        let mut game = ThreeOrMore::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Completed);
        assert_eq!(game.score(), 24);
        assert_eq!(script.prompts().len(), 10);
        assert!(!script.transcript().contains("chance to score more"));
    }

    #[test]
    fn four_of_a_kind_rerolls_one_die() {
        let mut script = Script::new(&[""; 12]);
        let mut dice = LoadedDice::new(&[6, 6, 2, 6, 6, 1, 3, 4, 7, 8, 10]);
        let mut game = ThreeOrMore::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Completed);
        assert_eq!(game.score(), 16);
        assert!(script.transcript().contains("Roll: A\n"));
    }

    #[test]
    fn no_set_moves_on_to_the_next_turn() {
        let mut script = Script::new(&[""; 10]);
        let mut dice = LoadedDice::new(&[1, 2, 3, 4, 5, 1, 1, 5, 5, 6]);
        let mut game = ThreeOrMore::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Completed);
        assert_eq!(game.score(), 0);
        assert_eq!(script.lines(), ["Roll: A, 2, 3, 4, 5", "Roll: A, A, 5, 5, 6"]);
    }

    #[test]
    fn exit_mid_roll_keeps_earlier_turns() {
        let mut script = Script::new(&["", "", "", "", "", "", "", "E"]);
        let mut dice = LoadedDice::new(&[4, 4, 4, 4, 4, 9, 9]);
        let mut game = ThreeOrMore::new();

        let ending = game.run(&mut script, &mut dice).expect("no fault");

        assert_eq!(ending, Ending::Exited);
        assert_eq!(game.score(), 12);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(script.lines().last().map(String::as_str), Some("Exiting Three or More..."));
    }

    #[test]
    fn exit_before_the_reroll_keeps_the_set_bonus() {
        let mut script = Script::new(&["", "", "", "", "", "e"]);
        let mut dice = LoadedDice::new(&[1, 1, 1, 5, 9]);
        let mut game = ThreeOrMore::new();

        let score = game.play(&mut script, &mut dice);

        assert_eq!(score, 3);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn closed_input_is_reported_with_the_game_name() {
        let mut script = Script::new(&["", ""]);
        let mut dice = LoadedDice::new(&[3, 3]);
        let mut game = ThreeOrMore::new();

        let score = game.play(&mut script, &mut dice);

        assert_eq!(score, 0);
        assert_eq!(
            script.lines().last().map(String::as_str),
            Some("ERROR OCCURRED THREE OR MORE: the input was closed before the game finished")
        );
    }

    proptest! {
        #[test]
        fn seeded_games_complete_within_the_maximum(seed in any::<u64>()) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut game = ThreeOrMore::new();
            let mut script = Script::new(&[""; 12]);

            let ending = game.run(&mut script, &mut rng);

            prop_assert!(matches!(ending, Ok(Ending::Completed)));
            prop_assert!(game.score() <= MAX_SCORE);
        }

        #[test]
        fn leftover_bonus_only_counts_aces_and_fives(values in prop::collection::vec(1_u8..=13, 0..5)) {
            let roll = faces(&values);
            let aces = values.iter().filter(|value| **value == 1).count();
            let fives = values.iter().filter(|value| **value == 5).count();

            let expected = u32::try_from(aces * 10 + fives * 5).expect("five dice stay small");

            prop_assert_eq!(leftover_bonus(&roll), expected);
        }
    }
}
