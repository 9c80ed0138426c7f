//! The self tests behind menu entry 4. They play a batch of games of each kind with a console that
//! always rolls, and check that every game ends the way it has to.

use anyhow::{bail, Context as _, Result};
use indicatif::ProgressBar;

use crate::dice::Roller;
use crate::error::Fault;
use crate::game::{DiceGame as _, Ending};
use crate::input::Console;
use crate::sevens_out::SevensOut;
use crate::three_or_more::{ThreeOrMore, MAX_SCORE};

/// A console that never exits and throws its output away.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct AutoPlay;

impl Console for AutoPlay {
    fn read_line(&mut self, _prompt: &str) -> Result<String, Fault> {
        Ok(String::new())
    }

    fn write_line(&mut self, _line: &str) -> Result<(), Fault> {
        Ok(())
    }
}

/// Plays `games` games of each kind on `roller`.
///
/// Sevens Out has to end in a win, since the automated player never leaves, and Three or More has
/// to play both turns without going over the highest score a game can reach.
///
/// # Errors
///
/// Returns an error naming the game and the game number on the first game that faults or ends the
/// wrong way.
pub(crate) fn run_self_tests<R: Roller>(roller: &mut R, games: u32) -> Result<()> {
    let progress = ProgressBar::new(u64::from(games) * 2);
    progress.set_message("Running self tests...");

    for number in 1..=games {
        let mut game = SevensOut::new();
        let ending = game
            .run(&mut AutoPlay, roller)
            .with_context(|| format!("{} self test, game {number}", SevensOut::NAME))?;

        if ending != Ending::Won {
            bail!("{} game {number} ended {ending:?} instead of won", SevensOut::NAME);
        }
        progress.inc(1);
    }

    for number in 1..=games {
        let mut game = ThreeOrMore::new();
        let ending = game
            .run(&mut AutoPlay, roller)
            .with_context(|| format!("{} self test, game {number}", ThreeOrMore::NAME))?;

        if ending != Ending::Completed {
            bail!("{} game {number} ended {ending:?} instead of completed", ThreeOrMore::NAME);
        }
        if game.score() > MAX_SCORE {
            bail!(
                "{} game {number} scored {}, above the maximum of {MAX_SCORE}",
                ThreeOrMore::NAME,
                game.score()
            );
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    tracing::info!(games, "self tests passed");

    Ok(())
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use super::*;
    use crate::testing::LoadedDice;

    #[test]
    fn seeded_batch_passes() {
        let mut rng = fastrand::Rng::with_seed(2024);

        assert!(run_self_tests(&mut rng, 50).is_ok());
    }

    #[test]
    fn faulty_dice_fail_the_run() {
        let mut dice = LoadedDice::new(&[0]);

        let error = run_self_tests(&mut dice, 1).expect_err("a zero is not a face");

        assert_eq!(error.to_string(), "Sevens Out self test, game 1");
        assert!(error.root_cause().to_string().contains("landed on 0"));
    }
}
