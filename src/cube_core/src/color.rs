use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six sticker colors of the standard color scheme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color `{0}`, expected one of white, yellow, red, orange, green or blue")]
pub struct ParseColorError(pub String);

impl Color {
    pub const ALL: [Self; 6] = {
        use Color::*;
        let v = [White, Yellow, Red, Orange, Green, Blue];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The color on the face opposite to a face of this color.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Yellow,
            Color::Yellow => Color::White,
            Color::Red => Color::Orange,
            Color::Orange => Color::Red,
            Color::Green => Color::Blue,
            Color::Blue => Color::Green,
        }
    }

    /// Whether two stickers of these colors can sit on the same piece.
    #[must_use]
    pub fn can_share_piece(self, other: Self) -> bool {
        self != other && self.opposite() != other
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }

    /// Single letter abbreviation, as used in compact face dumps.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Color::ALL
            .into_iter()
            .find(|color| {
                trimmed.eq_ignore_ascii_case(color.name())
                    || (trimmed.len() == 1
                        && trimmed.eq_ignore_ascii_case(&color.letter().to_string()))
            })
            .ok_or_else(|| ParseColorError(trimmed.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn opposite_pairs() {
        for color in Color::ALL {
            assert_ne!(color, color.opposite());
            assert_eq!(color.opposite().opposite(), color);
        }
        assert_eq!(Color::White.opposite(), Color::Yellow);
        assert_eq!(Color::Red.opposite(), Color::Orange);
        assert_eq!(Color::Green.opposite(), Color::Blue);
    }

    #[test]
    fn shared_piece_rules() {
        assert!(Color::White.can_share_piece(Color::Red));
        assert!(!Color::White.can_share_piece(Color::White));
        assert!(!Color::White.can_share_piece(Color::Yellow));
        assert!(!Color::Blue.can_share_piece(Color::Green));

        // Every color has exactly four neighbours
        for color in Color::ALL {
            let neighbours = Color::ALL
                .into_iter()
                .filter(|other| color.can_share_piece(*other))
                .count();
            assert_eq!(neighbours, 4);
        }
    }

    #[test]
    fn parse() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!(" Orange ".parse::<Color>(), Ok(Color::Orange));
        assert_eq!("g".parse::<Color>(), Ok(Color::Green));
        assert!("purple".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());

        for color in Color::ALL {
            assert_eq!(color.to_string().parse::<Color>(), Ok(color));
        }
    }
}
