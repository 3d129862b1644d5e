use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Color;

/// A coordinate axis. Positions and color slots are indexed by it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis whose coordinate becomes the "row" when turning a layer
    /// perpendicular to `self`.
    #[must_use]
    pub fn row(self) -> Self {
        Axis::ALL[(self.index() + 1) % 3]
    }

    /// The remaining axis after `self` and `self.row()`.
    #[must_use]
    pub fn column(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Y => Axis::X,
            Axis::Z => Axis::Y,
        }
    }

    /// The positive unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> [i8; 3] {
        let mut v = [0; 3];
        v[self.index()] = 1;
        v
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// A location relative to the cube center; every coordinate is -1, 0 or 1.
pub type Position = [i8; 3];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceKind {
    Corner,
    Edge,
    Center,
}

/// One of the 26 visible cubelets.
///
/// `colors[axis]` is the sticker facing outwards along `axis`, and is `None`
/// exactly when the piece has no face on that axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub position: Position,
    pub colors: [Option<Color>; 3],
}

impl Piece {
    #[must_use]
    pub fn new(position: Position, colors: [Option<Color>; 3]) -> Self {
        Piece { position, colors }
    }

    /// A piece at `position` with no stickers assigned yet.
    #[must_use]
    pub fn blank(position: Position) -> Self {
        Piece {
            position,
            colors: [None; 3],
        }
    }

    /// Rotation of (x, y) to (y, -x) in the plane spanned by `row` and
    /// `column`.
    pub fn rotate(&mut self, row: Axis, column: Axis) {
        let rotated_row = -self.position[column.index()];
        let rotated_column = self.position[row.index()];

        self.position[row.index()] = rotated_row;
        self.position[column.index()] = rotated_column;
    }

    pub fn swap_colors(&mut self, a: Axis, b: Axis) {
        self.colors.swap(a.index(), b.index());
    }

    #[must_use]
    pub fn is_corner(&self, row: Axis, column: Axis) -> bool {
        self.position[row.index()] != 0 && self.position[column.index()] != 0
    }

    #[must_use]
    pub fn is_edge(&self, row: Axis, column: Axis) -> bool {
        (self.position[row.index()] + self.position[column.index()]) % 2 != 0
    }

    #[must_use]
    pub fn is_center(&self, row: Axis, column: Axis) -> bool {
        self.position[row.index()] == 0 && self.position[column.index()] == 0
    }

    /// Number of nonzero coordinates, which is also the number of stickers
    /// a well formed piece carries.
    #[must_use]
    pub fn visible_faces(&self) -> usize {
        self.position.iter().filter(|&&c| c != 0).count()
    }

    #[must_use]
    pub fn color_count(&self) -> usize {
        self.colors.iter().flatten().count()
    }

    #[must_use]
    pub fn kind(&self) -> Option<PieceKind> {
        match self.visible_faces() {
            3 => Some(PieceKind::Corner),
            2 => Some(PieceKind::Edge),
            1 => Some(PieceKind::Center),
            _ => None,
        }
    }

    /// Whether the filled slots are exactly the slots of nonzero coordinates.
    #[must_use]
    pub fn slots_match_position(&self) -> bool {
        self.position
            .iter()
            .zip(self.colors)
            .all(|(&coord, color)| (coord != 0) == color.is_some())
    }

    /// The stickers of a corner in a cyclic order that layer turns preserve,
    /// so two corners are the same physical piece exactly when their cycles
    /// are rotations of each other. `None` for non-corners or incomplete
    /// pieces.
    #[must_use]
    pub fn corner_cycle(&self) -> Option<[Color; 3]> {
        let [x, y, z] = self.colors;
        let (x, y, z) = (x?, y?, z?);
        let [px, py, pz] = self.position;
        if px * py * pz > 0 {
            Some([x, y, z])
        } else {
            Some([x, z, y])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Piece, PieceKind};
    use crate::Color;

    #[test]
    fn row_and_column_cover_remaining_axes() {
        for axis in Axis::ALL {
            let mut seen = [axis.index(), axis.row().index(), axis.column().index()];
            seen.sort_unstable();
            assert_eq!(seen, [0, 1, 2]);
        }
    }

    #[test]
    fn rotate_four_times_is_identity() {
        let mut piece = Piece::new([1, -1, 0], [Some(Color::Yellow), Some(Color::Blue), None]);
        let original = piece.clone();

        piece.rotate(Axis::Y, Axis::X);
        assert_eq!(piece.position, [-1, -1, 0]);

        for _ in 0..3 {
            piece.rotate(Axis::Y, Axis::X);
        }
        assert_eq!(piece, original);
    }

    #[test]
    fn classification() {
        let corner = Piece::blank([1, 1, -1]);
        let edge = Piece::blank([1, 0, -1]);
        let center = Piece::blank([0, 0, -1]);

        assert!(corner.is_corner(Axis::X, Axis::Y));
        assert!(edge.is_edge(Axis::X, Axis::Y));
        assert!(!edge.is_corner(Axis::X, Axis::Y));
        assert!(center.is_center(Axis::X, Axis::Y));
        assert!(!center.is_edge(Axis::X, Axis::Y));

        assert_eq!(corner.kind(), Some(PieceKind::Corner));
        assert_eq!(edge.kind(), Some(PieceKind::Edge));
        assert_eq!(center.kind(), Some(PieceKind::Center));
        assert_eq!(Piece::blank([0, 0, 0]).kind(), None);
    }

    #[test]
    fn slot_invariant() {
        let good = Piece::new([-1, 0, 1], [Some(Color::White), None, Some(Color::Red)]);
        assert!(good.slots_match_position());
        assert_eq!(good.color_count(), 2);

        let bad = Piece::new([-1, 0, 1], [Some(Color::White), Some(Color::Blue), None]);
        assert!(!bad.slots_match_position());
    }

    #[test]
    fn swap_colors() {
        let mut piece = Piece::new([-1, -1, 0], [Some(Color::White), Some(Color::Blue), None]);
        piece.swap_colors(Axis::X, Axis::Z);
        assert_eq!(piece.colors, [None, Some(Color::Blue), Some(Color::White)]);
    }
}
