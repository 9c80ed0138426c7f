//! This module contains the dice both games roll, as well as the way their faces are shown to the
//! player.
//!
//! Randomness is never pulled from a global here. Every roll borrows a `Roller`, which the driver
//! owns and can seed, so a whole session can be replayed from a single number.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::Fault;

/// The faces of a thirteen-sided die, one per card rank.
pub(crate) const FACES: RangeInclusive<u8> = 1..=13;

/// This trait is the source of randomness behind every die. Implementors return a value uniformly
/// distributed over the given inclusive range.
pub trait Roller {
    /// Produces the next value in `faces`, both ends included.
    fn roll(&mut self, faces: RangeInclusive<u8>) -> u8;
}

impl Roller for fastrand::Rng {
    fn roll(&mut self, faces: RangeInclusive<u8>) -> u8 {
        self.u8(faces)
    }
}

/// A face value a die has landed on. It is always within `FACES`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Face(u8);

impl Face {
    /// The ace, worth a bonus of ten when left over in Three or More.
    pub(crate) const ACE: Self = Self(1);
    /// The five, worth a bonus of five when left over in Three or More.
    pub(crate) const FIVE: Self = Self(5);

    /// Returns the face showing `value`, or `None` if no face of a thirteen-sided die shows it.
    #[must_use]
    pub(crate) fn new(value: u8) -> Option<Self> {
        FACES.contains(&value).then_some(Self(value))
    }

    /// Returns the numeric value of the face.
    #[must_use]
    pub(crate) const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => formatter.write_str("A"),
            11 => formatter.write_str("J"),
            12 => formatter.write_str("Q"),
            13 => formatter.write_str("K"),
            value => write!(formatter, "{value}"),
        }
    }
}

/// This struct represents a single die. It carries no state besides the range of values it asks the
/// roller for, so rolling it twice with the same roller state gives the same face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Die {
    /// The values this die can land on.
    faces: RangeInclusive<u8>,
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

impl Die {
    /// Creates a thirteen-sided die.
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { faces: FACES }
    }

    /// Rolls the die once.
    ///
    /// # Errors
    ///
    /// Returns `Fault::FaceOutOfRange` if the roller produced a value that is not a face.
    pub(crate) fn roll<R: Roller>(&self, roller: &mut R) -> Result<Face, Fault> {
        let value = roller.roll(self.faces.clone());

        Face::new(value).ok_or(Fault::FaceOutOfRange(value))
    }
}

/// Joins the faces of a roll for display, e.g. `A, 7, K`.
#[must_use]
pub(crate) fn format_roll(roll: &[Face]) -> String {
    roll.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::testing::LoadedDice;

    #[test]
    fn court_faces_use_letters() {
        let shown: Vec<String> = FACES
            .filter_map(Face::new)
            .map(|face| face.to_string())
            .collect();

        assert_eq!(
            shown,
            ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"]
        );
    }

    #[test]
    fn face_rejects_values_off_the_die() {
        assert_eq!(Face::new(0), None);
        assert_eq!(Face::new(14), None);
        assert_eq!(Face::new(13).map(Face::value), Some(13));
    }

    #[test]
    fn roll_is_formatted_with_commas() {
        let roll: Vec<Face> = [1, 10, 12].into_iter().filter_map(Face::new).collect();

        assert_eq!(format_roll(&roll), "A, 10, Q");
        assert_eq!(format_roll(&[]), "");
    }

    #[test]
    fn every_face_is_reachable() {
        let die = Die::new();
        let mut rng = fastrand::Rng::with_seed(7);
        let mut seen = BTreeSet::new();

        for _ in 0..2_000 {
            let face = die.roll(&mut rng).expect("a fair roller stays on the die");
            let _ = seen.insert(face.value());
        }

        assert_eq!(seen.len(), 13);
        assert_eq!(seen.first(), Some(&1));
        assert_eq!(seen.last(), Some(&13));
    }

    #[test]
    fn off_range_roller_is_a_fault() {
        let mut dice = LoadedDice::new(&[14, 0]);

        let too_high = Die::new().roll(&mut dice);
        let too_low = Die::new().roll(&mut dice);

        assert!(matches!(too_high, Err(Fault::FaceOutOfRange(14))));
        assert!(matches!(too_low, Err(Fault::FaceOutOfRange(0))));
    }

    struct Asked(Vec<RangeInclusive<u8>>);

    impl Roller for Asked {
        fn roll(&mut self, faces: RangeInclusive<u8>) -> u8 {
            let top = *faces.end();
            self.0.push(faces);
            top
        }
    }

    #[test]
    fn die_asks_for_all_thirteen_faces() {
        let mut asked = Asked(Vec::new());

        let face = Die::new().roll(&mut asked).expect("the top face is on the die");

        assert_eq!(face.to_string(), "K");
        assert_eq!(asked.0, [FACES]);
    }

    proptest! {
        #[test]
        fn rolls_stay_on_the_die(seed in any::<u64>()) {
            let die = Die::new();
            let mut rng = fastrand::Rng::with_seed(seed);

            for _ in 0..64 {
                let face = die.roll(&mut rng);
                prop_assert!(matches!(face, Ok(face) if FACES.contains(&face.value())));
            }
        }
    }
}
