//! The main menu: what it shows and how a typed choice is understood.

use std::fmt;

/// This enum holds the entries of the main menu, in the order they are displayed.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "It's best if the items reflect the actual order they are displayed in the menu."
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    /// Play a game of Sevens Out.
    SevensOut,
    /// Play a game of Three or More.
    ThreeOrMore,
    /// Show the running totals.
    Statistics,
    /// Run the automated self tests.
    SelfTest,
    /// Leave the program.
    Quit,
}

impl MenuChoice {
    /// Every entry, in display order.
    pub(crate) const ALL: [Self; 5] = [
        Self::SevensOut,
        Self::ThreeOrMore,
        Self::Statistics,
        Self::SelfTest,
        Self::Quit,
    ];

    /// Reads a menu choice from a line of input. The line must hold one of the numbers 1 to 5,
    /// optionally surrounded by whitespace; anything else is rejected.
    #[must_use]
    pub(crate) fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u8>().ok()? {
            1 => Some(Self::SevensOut),
            2 => Some(Self::ThreeOrMore),
            3 => Some(Self::Statistics),
            4 => Some(Self::SelfTest),
            5 => Some(Self::Quit),
            _ => None,
        }
    }

    /// The number the player types to pick this entry.
    #[must_use]
    pub(crate) const fn number(self) -> u8 {
        match self {
            Self::SevensOut => 1,
            Self::ThreeOrMore => 2,
            Self::Statistics => 3,
            Self::SelfTest => 4,
            Self::Quit => 5,
        }
    }

    /// The label shown next to the number.
    const fn repr(self) -> &'static str {
        match self {
            Self::SevensOut => "Sevens Out",
            Self::ThreeOrMore => "Three or More",
            Self::Statistics => "View Statistics",
            Self::SelfTest => "Run Tests",
            Self::Quit => "Quit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}. {}", self.number(), self.repr())
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_docs_in_private_items,
    reason = "Test names already say what each test checks."
)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_parses_from_its_number() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.number().to_string()), Some(choice));
        }
    }

    #[test]
    fn whitespace_around_the_number_is_fine() {
        assert_eq!(MenuChoice::parse(" 2\n"), Some(MenuChoice::ThreeOrMore));
    }

    #[test]
    fn invalid_choices_are_rejected() {
        for line in ["", "0", "6", "-1", "one", "1.0", "12", "3 4"] {
            assert_eq!(MenuChoice::parse(line), None, "{line:?}");
        }
    }

    #[test]
    fn entries_render_numbered() {
        let rendered: Vec<String> = MenuChoice::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(
            rendered,
            [
                "1. Sevens Out",
                "2. Three or More",
                "3. View Statistics",
                "4. Run Tests",
                "5. Quit",
            ]
        );
    }
}
