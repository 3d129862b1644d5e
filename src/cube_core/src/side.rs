use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Face, ParseColorError};

/// Cells of each border strip, walked clockwise around the grid starting
/// from the top row.
const EDGE_STRIPS: [[usize; 3]; 4] = [[0, 1, 2], [2, 5, 8], [8, 7, 6], [6, 3, 0]];

/// Turn a 3×3 grid one quarter turn clockwise.
fn turn_clockwise<T: Copy>(cells: [T; 9]) -> [T; 9] {
    std::array::from_fn(|i| cells[3 * (2 - i % 3) + i / 3])
}

/// Turn a 3×3 grid `turns` quarter turns clockwise.
#[must_use]
pub fn turn_grid<T: Copy>(mut cells: [T; 9], turns: u8) -> [T; 9] {
    for _ in 0..turns % 4 {
        cells = turn_clockwise(cells);
    }
    cells
}

/// A subset of the four quarter-turn offsets {0, 1, 2, 3}.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rotations(u8);

impl Rotations {
    pub const ALL: Self = Rotations(0b1111);
    pub const NONE: Self = Rotations(0);

    #[must_use]
    pub fn only(rotation: u8) -> Self {
        Rotations(1 << (rotation % 4))
    }

    #[must_use]
    pub fn contains(self, rotation: u8) -> bool {
        rotation < 4 && self.0 & (1 << rotation) != 0
    }

    pub fn remove(&mut self, rotation: u8) {
        self.0 &= !(1 << (rotation % 4));
    }

    pub fn insert(&mut self, rotation: u8) {
        self.0 |= 1 << (rotation % 4);
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> + Clone {
        (0..4).filter(move |&rotation| self.contains(rotation))
    }
}

impl std::fmt::Debug for Rotations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u8> for Rotations {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut rotations = Rotations::NONE;
        for rotation in iter {
            rotations.insert(rotation);
        }
        rotations
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSideError {
    #[error("A side has 9 stickers, got {0}")]
    WrongCellCount(usize),
    #[error(transparent)]
    Color(#[from] ParseColorError),
}

/// One face as scanned: nine stickers in row-major order, turned by an
/// unknown number of quarter turns relative to the face's scan frame.
///
/// `rotations` holds the offsets not yet ruled out. Offset `k` means the
/// scan equals the face's canonical reading turned `k` quarter turns
/// clockwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Side {
    cells: [Color; 9],
    rotations: Rotations,
}

impl Side {
    #[must_use]
    pub fn new(cells: [Color; 9]) -> Self {
        Side {
            cells,
            rotations: Rotations::ALL,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Color; 9] {
        &self.cells
    }

    #[must_use]
    pub fn center(&self) -> Color {
        self.cells[4]
    }

    /// The physical face this scan shows, according to its center sticker.
    #[must_use]
    pub fn face(&self) -> Face {
        Face::with_home_color(self.center())
    }

    #[must_use]
    pub fn rotations(&self) -> Rotations {
        self.rotations
    }

    pub(crate) fn rotations_mut(&mut self) -> &mut Rotations {
        &mut self.rotations
    }

    /// The border strip that sits at canonical edge `offset` when the scan
    /// was taken at `rotation`.
    #[must_use]
    pub fn edge(&self, rotation: u8, offset: u8) -> [Color; 3] {
        EDGE_STRIPS[usize::from((rotation + offset) % 4)].map(|i| self.cells[i])
    }

    /// The scan turned back into the face's canonical reading, assuming it
    /// was taken at `rotation`.
    #[must_use]
    pub fn canonical(&self, rotation: u8) -> [Color; 9] {
        turn_grid(self.cells, 4 - rotation % 4)
    }

    /// Canonical cell `index` assuming the scan was taken at `rotation`.
    #[must_use]
    pub fn canonical_cell(&self, rotation: u8, index: usize) -> Color {
        self.canonical(rotation)[index]
    }

    /// Surviving rotations with duplicates removed: a face with rotational
    /// symmetry reads the same at several offsets, and only the lowest of
    /// each group is kept.
    #[must_use]
    pub fn distinct_rotations(&self) -> Rotations {
        self.rotations
            .iter()
            .unique_by(|&rotation| self.canonical(rotation))
            .collect()
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cells.iter().join(","))
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    /// Parse the comma-joined form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(',')
            .map(str::parse::<Color>)
            .collect::<Result<Vec<_>, _>>()?;
        let cells: [Color; 9] = colors
            .try_into()
            .map_err(|colors: Vec<Color>| ParseSideError::WrongCellCount(colors.len()))?;

        Ok(Side::new(cells))
    }
}

impl TryFrom<String> for Side {
    type Error = ParseSideError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Side> for String {
    fn from(value: Side) -> Self {
        value.to_string()
    }
}
