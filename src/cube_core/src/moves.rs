use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::{Cube, Face};

/// How far a face is turned, seen from outside the face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    Double,
    Counter,
}

impl Turn {
    pub const ALL: [Self; 3] = [Turn::Clockwise, Turn::Double, Turn::Counter];

    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Double => 2,
            Turn::Counter => 3,
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::Counter,
            Turn::Double => Turn::Double,
            Turn::Counter => Turn::Clockwise,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Double => "2",
            Turn::Counter => "'",
        }
    }
}

/// An outer face turn in standard notation, such as `R`, `U2` or `F'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Expected a face letter (U, D, L, R, F or B) in move `{0}`")]
    UnknownFace(String),
    #[error("Unknown turn suffix in move `{0}`, expected nothing, `2` or `'`")]
    UnknownSuffix(String),
}

impl Move {
    #[must_use]
    pub fn new(face: Face, turn: Turn) -> Self {
        Move { face, turn }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Move {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(|letter| letter.to_string().parse::<Face>().ok())
            .ok_or_else(|| ParseMoveError::UnknownFace(s.to_owned()))?;

        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "2" | "2'" => Turn::Double,
            "'" => Turn::Counter,
            _ => return Err(ParseMoveError::UnknownSuffix(s.to_owned())),
        };

        Ok(Move { face, turn })
    }
}

/// Parse a whitespace separated move sequence.
///
/// # Errors
///
/// On the first token that is not a valid move.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}

#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// The sequence that undoes `moves`.
#[must_use]
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

/// A random sequence of `len` moves in which no face is turned twice in a
/// row.
pub fn scramble(rng: &mut fastrand::Rng, len: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(len);

    while moves.len() < len {
        let face = Face::ALL[rng.usize(..Face::ALL.len())];
        if moves.last().is_some_and(|last| last.face == face) {
            continue;
        }
        let turn = Turn::ALL[rng.usize(..Turn::ALL.len())];
        moves.push(Move { face, turn });
    }

    moves
}

impl Cube {
    /// Turn one outer face. A layer turn on the negative side of an axis
    /// runs the other way round when seen from outside, so it takes three
    /// positive quarter turns to make one clockwise face turn there.
    pub fn apply_move(&mut self, mv: Move) {
        let face = mv.face;
        let per_turn = if face.layer() < 0 { 3 } else { 1 };

        for _ in 0..(per_turn * mv.turn.quarter_turns()) % 4 {
            self.rotate_axis(face.axis(), face.layer());
        }
    }

    pub fn apply_moves<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for &mv in moves {
            self.apply_move(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, ParseMoveError, Turn, format_moves, invert_moves, parse_moves, scramble};
    use crate::{Color, Cube, Face};

    #[test]
    fn parse_and_print() {
        let moves = parse_moves("R U2 F'  B\tL2' D").unwrap();
        assert_eq!(moves.len(), 6);
        assert_eq!(moves[0], Move::new(Face::R, Turn::Clockwise));
        assert_eq!(moves[1], Move::new(Face::U, Turn::Double));
        assert_eq!(moves[2], Move::new(Face::F, Turn::Counter));
        assert_eq!(moves[4], Move::new(Face::L, Turn::Double));
        assert_eq!(format_moves(&moves), "R U2 F' B L2 D");

        assert_eq!(parse_moves(""), Ok(vec![]));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_moves("R X"),
            Err(ParseMoveError::UnknownFace("X".to_owned()))
        );
        assert_eq!(
            parse_moves("R3"),
            Err(ParseMoveError::UnknownSuffix("R3".to_owned()))
        );
        assert_eq!(
            "r".parse::<Move>(),
            Err(ParseMoveError::UnknownFace("r".to_owned()))
        );
    }

    #[test]
    fn counter_is_three_clockwise() {
        for face in Face::ALL {
            let mut counter = Cube::solved();
            counter.apply_move(Move::new(face, Turn::Counter));

            let mut clockwise = Cube::solved();
            for _ in 0..3 {
                clockwise.apply_move(Move::new(face, Turn::Clockwise));
            }
            assert_eq!(counter, clockwise, "{face}");

            let mut double = Cube::solved();
            double.apply_move(Move::new(face, Turn::Double));
            // Three quarter turns plus three more is a half turn
            clockwise.apply_move(Move::new(face, Turn::Counter));
            assert_eq!(double, clockwise, "{face}");
        }
    }

    #[test]
    fn turned_face_keeps_its_color() {
        for face in Face::ALL {
            let mut cube = Cube::solved();
            cube.apply_move(Move::new(face, Turn::Clockwise));
            assert!(!cube.is_solved());
            assert_eq!(cube.face(face).unwrap(), [face.home_color(); 9]);
            assert_eq!(
                cube.face(face.opposite()).unwrap(),
                [face.opposite().home_color(); 9]
            );
        }
    }

    #[test]
    fn clockwise_as_seen_from_outside() {
        // A clockwise R lifts the front column of R onto the top
        let mut cube = Cube::solved();
        cube.apply_move(Move::new(Face::R, Turn::Clockwise));
        let up = cube.piece_at([-1, -1, 1]).unwrap();
        assert_eq!(up.colors[1], Some(Color::White));

        // while a clockwise L brings the top down to the front
        let mut cube = Cube::solved();
        cube.apply_move(Move::new(Face::L, Turn::Clockwise));
        let front = cube.piece_at([-1, -1, -1]).unwrap();
        assert_eq!(front.colors[0], Some(Color::Blue));
    }

    #[test]
    fn inverse_undoes() {
        let moves = parse_moves("U L D' B R' F U D L B' R F D U' L' B R F' D U").unwrap();
        let mut cube = Cube::solved();
        cube.apply_moves(&moves);
        assert!(!cube.is_solved());
        cube.apply_moves(&invert_moves(&moves));
        assert_eq!(cube, Cube::solved());
    }

    #[test]
    fn commutator_has_order_six() {
        let sexy = parse_moves("R U R' U'").unwrap();
        let mut cube = Cube::solved();
        for i in 1..=6 {
            cube.apply_moves(&sexy);
            assert_eq!(cube.is_solved(), i == 6);
        }
    }

    #[test]
    fn scramble_is_seeded_and_never_repeats_a_face() {
        let a = scramble(&mut fastrand::Rng::with_seed(7), 40);
        let b = scramble(&mut fastrand::Rng::with_seed(7), 40);
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        for pair in a.windows(2) {
            assert_ne!(pair[0].face, pair[1].face);
        }
        assert!(scramble(&mut fastrand::Rng::new(), 0).is_empty());
    }
}
