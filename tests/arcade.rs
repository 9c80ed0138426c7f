//! Plays whole sessions through the public API, the way the binary does, with a scripted player.

#![expect(
    unused_crate_dependencies,
    reason = "Only the library and fastrand are needed to drive a session."
)]

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use dicegames::{
    Arcade, Console, DiceGame as _, Ending, Fault, Roller, SevensOut, Statistics, Tally,
    ThreeOrMore,
};

struct Player {
    answers: VecDeque<&'static str>,
    lines: Vec<String>,
}

impl Player {
    fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            lines: Vec::new(),
        }
    }

    fn saw(&self, line: &str) -> bool {
        self.lines.iter().any(|seen| seen == line)
    }
}

impl Console for Player {
    fn read_line(&mut self, _prompt: &str) -> Result<String, Fault> {
        self.answers
            .pop_front()
            .map(str::to_owned)
            .ok_or(Fault::InputClosed)
    }

    fn write_line(&mut self, line: &str) -> Result<(), Fault> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

struct Loaded(VecDeque<u8>);

impl Loaded {
    fn new(values: &[u8]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl Roller for Loaded {
    fn roll(&mut self, _faces: RangeInclusive<u8>) -> u8 {
        self.0.pop_front().expect("the loaded dice ran out of values")
    }
}

/// A statistics sink that keeps every reported score.
#[derive(Default)]
struct Recorder {
    sevens_out: Vec<u32>,
    three_or_more: Vec<u32>,
}

impl Statistics for Recorder {
    fn update_sevens_out(&mut self, score: u32) {
        self.sevens_out.push(score);
    }

    fn update_three_or_more(&mut self, score: u32) {
        self.three_or_more.push(score);
    }

    fn display<C: Console>(&self, console: &mut C) -> Result<(), Fault> {
        console.write_line(&format!("{:?} {:?}", self.sevens_out, self.three_or_more))
    }
}

#[test]
fn every_finished_game_reports_its_score() {
    let player = Player::new(&[
        "1", "", "", "", // Sevens Out: 5+3, 6+6, then a seven
        "1", "E", // Sevens Out, left straight away
        "2", "", "", "", "", "", "", "", "", "", "", // Three or More, no sets
        "3", "5",
    ]);
    let dice = Loaded::new(&[5, 3, 6, 6, 2, 5, 1, 2, 3, 4, 6, 7, 8, 9, 10, 11]);
    let mut arcade = Arcade::new(player, dice, Recorder::default());

    arcade.run().expect("the session ends with quit");

    assert_eq!(arcade.statistics().sevens_out, [32, 0]);
    assert_eq!(arcade.statistics().three_or_more, [0]);
    assert!(arcade.console().saw("[32, 0] [0]"));
    assert!(arcade.console().saw("Exiting Sevens Out..."));
}

#[test]
fn default_tally_renders_running_totals() {
    let player = Player::new(&["1", "", "", "1", "", "", "3", "5"]);
    let dice = Loaded::new(&[4, 4, 1, 6, 13, 13, 3, 4]);
    let mut arcade = Arcade::new(player, dice, Tally::default());

    arcade.run().expect("the session ends with quit");

    assert!(arcade.console().saw("Roll: 4 + 4 = 8 (score = 0)"));
    assert!(arcade.console().saw("Roll: K + K = 26 (score = 0)"));
    assert!(arcade.console().saw("Sevens Out: 68 (2 games)"));
    assert!(arcade.console().saw("Three or More: 0 (0 games)"));
}

#[test]
fn a_single_game_is_counted_in_the_singular() {
    let player = Player::new(&[
        "2", "", "", "", "", "", "", // five dice, a triple of aces, then the reroll
        "", "", "", "", "", // second turn, no set
        "3", "5",
    ]);
    let dice = Loaded::new(&[1, 1, 1, 5, 9, 5, 9, 2, 3, 4, 6, 8]);
    let mut arcade = Arcade::new(player, dice, Tally::default());

    arcade.run().expect("the session ends with quit");

    assert!(arcade.console().saw("Sevens Out: 0 (0 games)"));
    assert!(arcade.console().saw("Three or More: 8 (1 game)"));
}

#[test]
fn answers_are_read_regardless_of_surrounding_whitespace() {
    let player = Player::new(&[" 1 ", " e\t", "5\n"]);
    let mut arcade = Arcade::new(player, Loaded::new(&[]), Tally::default());

    arcade.run().expect("the session ends with quit");

    assert!(arcade.console().saw("Exiting Sevens Out..."));
}

#[test]
fn three_or_more_turn_with_a_triple_and_a_five() {
    let mut player = Player::new(&[""; 12]);
    let mut dice = Loaded::new(&[1, 1, 1, 5, 9, 5, 9, 13, 13, 13, 13, 2, 1]);
    let mut game = ThreeOrMore::new();

    let ending = game.run(&mut player, &mut dice).expect("no fault");

    // 3 for the triple and 5 for the rerolled five, then 6 for four kings and 10 for the ace
    assert_eq!(ending, Ending::Completed);
    assert_eq!(game.score(), 24);
    assert!(player.saw("Roll: A, A, A, 5, 9"));
    assert!(player.saw("Roll: K, K, K, K, 2"));
}

#[test]
fn seeded_sessions_replay_identically() {
    let play = |seed| {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut player = Player::new(&[""; 500]);
        let mut game = SevensOut::new();
        let score = game.play(&mut player, &mut rng);
        (score, player.lines)
    };

    assert_eq!(play(99), play(99));
}
