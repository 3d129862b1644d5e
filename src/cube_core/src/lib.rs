#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A 3×3×3 cube modelled as 26 pieces in integer space, with layer turns,
//! face read-out and reconstruction of a cube from six scanned faces of
//! unknown orientation.

mod analyzer;
mod color;
mod cube;
mod face;
mod moves;
mod piece;
mod side;

pub use analyzer::{
    AnalyzeError, Analyzer, ScanErrorKind, SidePair, edges_match, is_real_corner,
};
pub use color::{Color, ParseColorError};
pub use cube::{Cube, CubeError, PIECE_COUNT};
pub use face::Face;
pub use moves::{
    Move, ParseMoveError, Turn, format_moves, invert_moves, parse_moves, scramble,
};
pub use piece::{Axis, Piece, PieceKind, Position};
pub use side::{ParseSideError, Rotations, Side, turn_grid};
