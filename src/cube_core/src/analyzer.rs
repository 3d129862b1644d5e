//! Reconstruction of a cube from six scanned faces.
//!
//! A scan only fixes which face each picture shows (through its center
//! sticker); the quarter-turn orientation of every picture is unknown. The
//! analyzer keeps, per face, the set of orientations that are still possible
//! and repeatedly discards those that would put two stickers on one piece
//! that cannot share a piece. Once every face has a single orientation left
//! the pieces are read straight off the scans.

use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::{
    Color::{self, Blue, Green, Orange, Red, White, Yellow},
    Cube, CubeError, Face, Position, Rotations, Side,
};

/// Adjacent faces and the canonical edge strip each presents to the other.
const SIDE_PAIRS: [(Color, u8, Color, u8); 12] = [
    (White, 0, Blue, 0),
    (White, 2, Green, 0),
    (White, 3, Orange, 1),
    (White, 1, Red, 3),
    (Yellow, 0, Blue, 2),
    (Yellow, 2, Green, 2),
    (Yellow, 1, Orange, 3),
    (Yellow, 3, Red, 1),
    (Blue, 1, Orange, 0),
    (Blue, 3, Red, 0),
    (Green, 3, Orange, 2),
    (Green, 1, Red, 2),
];

/// The three (face, canonical cell) stickers of a corner, listed in the same
/// cyclic order as `Piece::corner_cycle`.
type Corner = [(Color, usize); 3];

const CORNERS: [Corner; 8] = [
    [(White, 0), (Orange, 2), (Blue, 2)],
    [(White, 2), (Blue, 0), (Red, 0)],
    [(White, 6), (Green, 0), (Orange, 8)],
    [(White, 8), (Red, 6), (Green, 2)],
    [(Yellow, 2), (Blue, 8), (Orange, 0)],
    [(Yellow, 0), (Red, 2), (Blue, 6)],
    [(Yellow, 8), (Orange, 6), (Green, 6)],
    [(Yellow, 6), (Green, 8), (Red, 8)],
];

/// How an analysis failure should be remedied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// The input is not a scan of a cube at all.
    Malformed,
    /// The stickers contradict each other; some face was misread.
    Contradictory,
    /// The stickers are consistent but do not pin down every face.
    Ambiguous,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("Two scanned sides have the same center color {0}")]
    DuplicateCenter(Color),
    #[error("Expected 9 {color} stickers across the scan but found {count}")]
    ColorCount { color: Color, count: usize },
    #[error("No orientation of the {face} face ({center} center) agrees with its neighbours")]
    Contradictory { face: Face, center: Color },
    #[error("The orientation of {faces:?} could not be determined")]
    Ambiguous { faces: Vec<Face> },
    #[error("The stickers at {position:?} cannot belong to one piece: {colors:?}")]
    IllegalPiece {
        position: Position,
        colors: [Option<Color>; 3],
    },
    #[error("The piece at {position:?} appears twice: {colors:?}")]
    DuplicatePiece {
        position: Position,
        colors: [Option<Color>; 3],
    },
    #[error(transparent)]
    Cube(#[from] CubeError),
}

impl AnalyzeError {
    #[must_use]
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            AnalyzeError::ColorCount { .. } | AnalyzeError::Cube(_) => ScanErrorKind::Malformed,
            AnalyzeError::DuplicateCenter(_)
            | AnalyzeError::Contradictory { .. }
            | AnalyzeError::IllegalPiece { .. }
            | AnalyzeError::DuplicatePiece { .. } => ScanErrorKind::Contradictory,
            AnalyzeError::Ambiguous { .. } => ScanErrorKind::Ambiguous,
        }
    }
}

/// Two adjacent scanned faces and the canonical edge each shows the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SidePair {
    pub first: Face,
    pub first_offset: u8,
    pub second: Face,
    pub second_offset: u8,
}

/// Whether two edge strips can lie against each other. The strips run in
/// opposite directions along the shared edge.
#[must_use]
pub fn edges_match(edge0: [Color; 3], edge1: [Color; 3]) -> bool {
    (0..3).all(|i| edge0[i].can_share_piece(edge1[2 - i]))
}

/// Whether a corner cycle is one of the eight corners of the color scheme,
/// in any twist.
#[must_use]
pub fn is_real_corner(cycle: [Color; 3]) -> bool {
    CORNERS.iter().any(|corner| {
        let home = corner.map(|(color, _)| color);
        (0..3).any(|shift| {
            let mut twisted = home;
            twisted.rotate_left(shift);
            twisted == cycle
        })
    })
}

/// Whether some combination of the surviving orientations lets the corner
/// show a real corner, with face `fixed` held at `rotation`.
fn corner_supported(sides: &[&Side; 3], corner: &Corner, fixed: usize, rotation: u8) -> bool {
    (0..3)
        .map(|i| {
            if i == fixed {
                Rotations::only(rotation)
            } else {
                sides[i].rotations()
            }
        })
        .map(Rotations::iter)
        .multi_cartesian_product()
        .any(|rotations| {
            let cycle =
                std::array::from_fn(|i| sides[i].canonical_cell(rotations[i], corner[i].1));
            is_real_corner(cycle)
        })
}

/// The constraint propagation state for one scan.
#[derive(Debug, Clone)]
pub struct Analyzer {
    sides: [Option<Side>; 6],
    pairs: Vec<SidePair>,
}

impl Analyzer {
    /// Sort the scanned sides by face and build the pairs between faces that
    /// are both present. Fewer than six sides is allowed; the missing faces
    /// are reported as ambiguous by `resolve`.
    ///
    /// # Errors
    ///
    /// If two sides share a center color, or a complete scan does not have
    /// nine stickers of every color.
    pub fn new(sides: impl IntoIterator<Item = Side>) -> Result<Self, AnalyzeError> {
        let mut slots: [Option<Side>; 6] = Default::default();

        for side in sides {
            let slot = &mut slots[side.face() as usize];
            if slot.is_some() {
                return Err(AnalyzeError::DuplicateCenter(side.center()));
            }
            *slot = Some(side);
        }

        if slots.iter().all(Option::is_some) {
            for color in Color::ALL {
                let count = slots
                    .iter()
                    .flatten()
                    .flat_map(Side::cells)
                    .filter(|&&cell| cell == color)
                    .count();
                if count != 9 {
                    return Err(AnalyzeError::ColorCount { color, count });
                }
            }
        }

        let pairs = SIDE_PAIRS
            .iter()
            .map(|&(first, first_offset, second, second_offset)| SidePair {
                first: Face::with_home_color(first),
                first_offset,
                second: Face::with_home_color(second),
                second_offset,
            })
            .filter(|pair| {
                slots[pair.first as usize].is_some() && slots[pair.second as usize].is_some()
            })
            .collect_vec();

        debug!(
            "Analyzing {} sides with {} adjacent pairs",
            slots.iter().flatten().count(),
            pairs.len()
        );

        Ok(Analyzer {
            sides: slots,
            pairs,
        })
    }

    #[must_use]
    pub fn side(&self, face: Face) -> Option<&Side> {
        self.sides[face as usize].as_ref()
    }

    /// The orientations of `face` still considered possible.
    #[must_use]
    pub fn rotations(&self, face: Face) -> Option<Rotations> {
        self.side(face).map(Side::rotations)
    }

    #[must_use]
    pub fn pairs(&self) -> &[SidePair] {
        &self.pairs
    }

    /// Drop `doomed` from the orientations of `face`.
    fn remove_rotations(&mut self, face: Face, doomed: &[u8]) -> Result<bool, AnalyzeError> {
        if doomed.is_empty() {
            return Ok(false);
        }
        let Some(side) = self.sides[face as usize].as_mut() else {
            return Ok(false);
        };

        let rotations = side.rotations_mut();
        for &rotation in doomed {
            rotations.remove(rotation);
        }
        debug!("Ruled out {doomed:?} for {face}, left with {rotations:?}");

        if rotations.is_empty() {
            return Err(AnalyzeError::Contradictory {
                face,
                center: side.center(),
            });
        }

        Ok(true)
    }

    /// Remove every orientation of `face` whose edge towards `other` cannot
    /// lie against any surviving orientation of `other`.
    fn narrow_edge(
        &mut self,
        face: Face,
        offset: u8,
        other: Face,
        other_offset: u8,
    ) -> Result<bool, AnalyzeError> {
        let (Some(side), Some(other_side)) = (self.side(face), self.side(other)) else {
            return Ok(false);
        };

        let doomed = side
            .rotations()
            .iter()
            .filter(|&rotation| {
                let edge = side.edge(rotation, offset);
                !other_side.rotations().iter().any(|other_rotation| {
                    edges_match(edge, other_side.edge(other_rotation, other_offset))
                })
            })
            .collect_vec();

        self.remove_rotations(face, &doomed)
    }

    fn corner_sides(&self, corner: &Corner) -> Option<[&Side; 3]> {
        let [a, b, c] = corner.map(|(color, _)| self.side(Face::with_home_color(color)));
        Some([a?, b?, c?])
    }

    /// Remove orientations of the corner's faces that leave no way to show a
    /// real corner there.
    fn narrow_corner(&mut self, corner: &Corner) -> Result<bool, AnalyzeError> {
        let mut removed = false;

        for fixed in 0..3 {
            let Some(sides) = self.corner_sides(corner) else {
                return Ok(false);
            };

            let doomed = sides[fixed]
                .rotations()
                .iter()
                .filter(|&rotation| !corner_supported(&sides, corner, fixed, rotation))
                .collect_vec();

            removed |= self.remove_rotations(Face::with_home_color(corner[fixed].0), &doomed)?;
        }

        Ok(removed)
    }

    /// One sweep of the edge constraint over every pair, in both directions.
    fn edge_pass(&mut self) -> Result<bool, AnalyzeError> {
        let pairs = self.pairs.clone();
        let mut removed = false;

        for pair in &pairs {
            removed |= self.narrow_edge(
                pair.first,
                pair.first_offset,
                pair.second,
                pair.second_offset,
            )?;
            removed |= self.narrow_edge(
                pair.second,
                pair.second_offset,
                pair.first,
                pair.first_offset,
            )?;
        }

        Ok(removed)
    }

    fn corner_pass(&mut self) -> Result<bool, AnalyzeError> {
        let mut removed = false;
        for corner in &CORNERS {
            removed |= self.narrow_corner(corner)?;
        }
        Ok(removed)
    }

    /// Narrow orientations using shared edges only, until nothing more can
    /// be ruled out. Returns the number of passes taken.
    ///
    /// # Errors
    ///
    /// If some face is left with no possible orientation.
    pub fn propagate_edges(&mut self) -> Result<usize, AnalyzeError> {
        let mut passes = 0;
        loop {
            passes += 1;
            let removed = self.edge_pass()?;
            trace!("Edge pass {passes} removed rotations: {removed}");
            if !removed {
                return Ok(passes);
            }
        }
    }

    /// Narrow every face's orientations using shared edges and corners until
    /// nothing more can be ruled out. Returns the number of passes taken.
    ///
    /// # Errors
    ///
    /// If some face is left with no possible orientation.
    pub fn propagate(&mut self) -> Result<usize, AnalyzeError> {
        let mut passes = 0;
        loop {
            passes += 1;
            let removed = self.edge_pass()? | self.corner_pass()?;
            trace!("Propagation pass {passes} removed rotations: {removed}");
            if !removed {
                return Ok(passes);
            }
        }
    }

    /// Settle the orientations and build the cube they describe.
    ///
    /// # Errors
    ///
    /// If propagation runs into a contradiction, some face is missing or
    /// keeps more than one distinct orientation, or the resulting pieces are
    /// not the pieces of a real cube.
    pub fn resolve(mut self) -> Result<Cube, AnalyzeError> {
        let passes = self.propagate()?;
        debug!("Propagation settled after {passes} passes");

        let mut unresolved = Vec::new();
        let mut readings = Vec::with_capacity(6);

        for face in Face::ALL {
            let Some(side) = self.side(face) else {
                unresolved.push(face);
                continue;
            };

            match side.distinct_rotations().iter().exactly_one() {
                Ok(rotation) => readings.push((face, side.canonical(rotation))),
                Err(_) => unresolved.push(face),
            }
        }

        if !unresolved.is_empty() {
            warn!("Scan is ambiguous for faces {unresolved:?}");
            return Err(AnalyzeError::Ambiguous { faces: unresolved });
        }

        let mut cube = Cube::blank();
        for (face, cells) in readings {
            let order = cube.layer_reading_order(face.axis(), face.layer(), face.up())?;
            for (i, cell) in order.into_iter().zip(cells) {
                cube.pieces_mut()[i].colors[face.axis().index()] = Some(cell);
            }
        }

        check_pieces(&cube)?;
        info!("Reconstructed cube from scan");

        Ok(cube)
    }
}

/// Every piece must be a real piece of the color scheme, and appear once.
fn check_pieces(cube: &Cube) -> Result<(), AnalyzeError> {
    let mut seen = HashSet::new();

    for piece in cube.pieces() {
        let colors = piece.colors.iter().flatten().copied().collect_vec();

        let compatible = colors
            .iter()
            .tuple_combinations()
            .all(|(a, b)| a.can_share_piece(*b));
        let real_corner = piece.corner_cycle().is_none_or(is_real_corner);

        if !compatible || !real_corner {
            return Err(AnalyzeError::IllegalPiece {
                position: piece.position,
                colors: piece.colors,
            });
        }

        if !seen.insert(colors.into_iter().sorted().collect_vec()) {
            return Err(AnalyzeError::DuplicatePiece {
                position: piece.position,
                colors: piece.colors,
            });
        }
    }

    Ok(())
}

impl Cube {
    /// Reconstruct a cube from scanned sides.
    ///
    /// # Errors
    ///
    /// See `Analyzer::new` and `Analyzer::resolve`.
    pub fn analyze(sides: impl IntoIterator<Item = Side>) -> Result<Cube, AnalyzeError> {
        Analyzer::new(sides)?.resolve()
    }
}
