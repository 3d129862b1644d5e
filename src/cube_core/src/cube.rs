use std::{collections::HashSet, fmt::Display};

use itertools::{Itertools, iproduct};
use thiserror::Error;

use crate::{Axis, Color, Face, Piece, Position};

/// Number of movable pieces; the core of the cube is not one.
pub const PIECE_COUNT: usize = 26;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("The up direction {up} cannot lie along the axis of the face being read")]
    UpAlongAxis { up: Axis },
    #[error("Only the outer layers -1 and 1 carry stickers, got layer {0}")]
    InnerLayer(i8),
    #[error("Expected 9 pieces in the layer but got {0}")]
    LayerSize(usize),
    #[error("The piece at {0:?} has no sticker facing along {1}")]
    MissingSticker(Position, Axis),
    #[error("Expected {PIECE_COUNT} pieces but got {0}")]
    PieceCount(usize),
    #[error("Position {0:?} is not a piece position")]
    InvalidPosition(Position),
    #[error("Two pieces share the position {0:?}")]
    DuplicatePosition(Position),
    #[error("The stickers of the piece at {0:?} do not match its position: {1:?}")]
    MismatchedSlots(Position, [Option<Color>; 3]),
}

/// Every piece position, in x-major order.
pub(crate) fn piece_positions() -> impl Iterator<Item = Position> {
    iproduct!(-1..=1, -1..=1, -1..=1)
        .map(|(x, y, z)| [x, y, z])
        .filter(|position| *position != [0, 0, 0])
}

fn cross(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(position: Position, v: [i32; 3]) -> i32 {
    position
        .iter()
        .zip(v)
        .map(|(&p, v)| i32::from(p) * v)
        .sum()
}

/// The puzzle as a bag of pieces. Piece identity is position plus stickers;
/// storage order carries no meaning.
#[derive(Debug, Clone)]
pub struct Cube {
    pieces: Vec<Piece>,
}

impl Cube {
    /// The solved cube in the canonical color layout.
    #[must_use]
    pub fn solved() -> Self {
        let pieces = piece_positions()
            .map(|position| {
                let mut piece = Piece::blank(position);
                for axis in Axis::ALL {
                    piece.colors[axis.index()] =
                        Face::at(axis, position[axis.index()]).map(Face::home_color);
                }
                piece
            })
            .collect();

        Cube { pieces }
    }

    /// Build a cube from hand-made pieces.
    ///
    /// # Errors
    ///
    /// If there are not exactly 26 pieces, two pieces share a position, a
    /// position lies outside the cube, or a piece's stickers do not match
    /// its position.
    pub fn from_pieces(pieces: Vec<Piece>) -> Result<Self, CubeError> {
        if pieces.len() != PIECE_COUNT {
            return Err(CubeError::PieceCount(pieces.len()));
        }

        let mut seen = HashSet::new();
        for piece in &pieces {
            if piece.position == [0, 0, 0] || piece.position.iter().any(|c| !(-1..=1).contains(c))
            {
                return Err(CubeError::InvalidPosition(piece.position));
            }
            if !seen.insert(piece.position) {
                return Err(CubeError::DuplicatePosition(piece.position));
            }
            if !piece.slots_match_position() {
                return Err(CubeError::MismatchedSlots(piece.position, piece.colors));
            }
        }

        Ok(Cube { pieces })
    }

    /// A cube with every position occupied but no stickers assigned. Only the
    /// analyzer creates these, and fills every slot before handing it out.
    pub(crate) fn blank() -> Self {
        Cube {
            pieces: piece_positions().map(Piece::blank).collect(),
        }
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position == position)
    }

    pub fn pieces_in_layer(&self, axis: Axis, layer: i8) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |piece| piece.position[axis.index()] == layer)
    }

    /// Turn one layer a quarter turn. `layer` 0 turns the middle slice; any
    /// other value outside -1..=1 selects nothing.
    pub fn rotate_axis(&mut self, axis: Axis, layer: i8) {
        let row = axis.row();
        let column = axis.column();

        for piece in &mut self.pieces {
            if piece.position[axis.index()] != layer {
                continue;
            }

            // The center of the layer spins in place and has no stickers on
            // the row and column axes.
            if piece.is_center(row, column) {
                continue;
            }

            piece.swap_colors(row, column);
            piece.rotate(row, column);
        }
    }

    /// Indices into `pieces` of the outer layer `(axis, layer)`, in reading
    /// order for a viewer whose frame is given by `up`.
    pub(crate) fn layer_reading_order(
        &self,
        axis: Axis,
        layer: i8,
        up: Axis,
    ) -> Result<Vec<usize>, CubeError> {
        if up == axis {
            return Err(CubeError::UpAlongAxis { up });
        }
        if layer != -1 && layer != 1 {
            return Err(CubeError::InnerLayer(layer));
        }

        let up_vector = up.unit().map(i32::from);
        let forward = axis.unit().map(|c| -i32::from(layer) * i32::from(c));
        let right = cross(forward, up_vector);

        let index_scale: [i32; 3] = std::array::from_fn(|i| 3 * up_vector[i] + right[i]);

        let order = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.position[axis.index()] == layer)
            .sorted_by_key(|(_, piece)| dot(piece.position, index_scale))
            .map(|(i, _)| i)
            .collect_vec();

        if order.len() == 9 {
            Ok(order)
        } else {
            Err(CubeError::LayerSize(order.len()))
        }
    }

    /// The nine stickers of the outer layer `(axis, layer)`, read row by row
    /// in the frame spanned by `up` and the right vector derived from it.
    ///
    /// # Errors
    ///
    /// If `up` is `axis`, `layer` is not -1 or 1, or a piece of the layer is
    /// missing its sticker.
    pub fn side(&self, axis: Axis, layer: i8, up: Axis) -> Result<[Color; 9], CubeError> {
        let order = self.layer_reading_order(axis, layer, up)?;

        let colors = order
            .into_iter()
            .map(|i| {
                let piece = &self.pieces[i];
                piece.colors[axis.index()]
                    .ok_or(CubeError::MissingSticker(piece.position, axis))
            })
            .collect::<Result<Vec<_>, _>>()?;

        colors
            .try_into()
            .map_err(|colors: Vec<Color>| CubeError::LayerSize(colors.len()))
    }

    /// The stickers of `face` in its fixed scan frame.
    ///
    /// # Errors
    ///
    /// If a piece on the face is missing its sticker.
    pub fn face(&self, face: Face) -> Result<[Color; 9], CubeError> {
        self.side(face.axis(), face.layer(), face.up())
    }

    /// Whether every face shows a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            self.face(face)
                .is_ok_and(|colors| colors.iter().all_equal())
        })
    }

    /// Sorted copy of the pieces, used for order-independent comparison.
    fn canonical_pieces(&self) -> Vec<&Piece> {
        self.pieces
            .iter()
            .sorted_by_key(|piece| piece.position)
            .collect()
    }
}

impl PartialEq for Cube {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_pieces() == other.canonical_pieces()
    }
}

impl Eq for Cube {}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

impl Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for face in Face::ALL {
            let stickers = match self.face(face) {
                Ok(colors) => colors
                    .chunks(3)
                    .map(|row| row.iter().map(|color| color.letter()).collect::<String>())
                    .join("/"),
                Err(e) => e.to_string(),
            };
            writeln!(f, "{face}: {stickers}")?;
        }
        Ok(())
    }
}
