use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Axis, Color};

/// A physical face of the cube, named by the move letter that turns it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Face::U),
            "D" => Ok(Face::D),
            "L" => Ok(Face::L),
            "R" => Ok(Face::R),
            "F" => Ok(Face::F),
            "B" => Ok(Face::B),
            _ => Err(()),
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Face::U => "U",
            Face::D => "D",
            Face::L => "L",
            Face::R => "R",
            Face::F => "F",
            Face::B => "B",
        })
    }
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, L, R, F, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::Y,
            Face::L | Face::R => Axis::Z,
            Face::F | Face::B => Axis::X,
        }
    }

    #[must_use]
    pub fn layer(self) -> i8 {
        match self {
            Face::U | Face::L | Face::F => -1,
            Face::D | Face::R | Face::B => 1,
        }
    }

    /// The axis pointing "up" in this face's scan frame.
    #[must_use]
    pub fn up(self) -> Axis {
        match self.axis() {
            Axis::X | Axis::Z => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The color of this face on a solved cube.
    #[must_use]
    pub fn home_color(self) -> Color {
        match self {
            Face::F => Color::White,
            Face::B => Color::Yellow,
            Face::U => Color::Blue,
            Face::D => Color::Green,
            Face::L => Color::Orange,
            Face::R => Color::Red,
        }
    }

    /// The face a scan belongs to, identified by its center sticker.
    #[must_use]
    pub fn with_home_color(color: Color) -> Self {
        match color {
            Color::White => Face::F,
            Color::Yellow => Face::B,
            Color::Blue => Face::U,
            Color::Green => Face::D,
            Color::Orange => Face::L,
            Color::Red => Face::R,
        }
    }

    /// The face lying on `layer` of `axis`, if that layer is an outer one.
    #[must_use]
    pub fn at(axis: Axis, layer: i8) -> Option<Self> {
        Face::ALL
            .into_iter()
            .find(|face| face.axis() == axis && face.layer() == layer)
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Face;
    use crate::Color;

    #[test]
    fn home_colors_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::with_home_color(face.home_color()), face);
            assert_eq!(face.opposite().home_color(), face.home_color().opposite());
            assert_eq!(face.opposite().axis(), face.axis());
            assert_eq!(face.opposite().layer(), -face.layer());
            assert_ne!(face.up(), face.axis());
            assert_eq!(Face::at(face.axis(), face.layer()), Some(face));
        }
        for color in Color::ALL {
            assert_eq!(Face::with_home_color(color).home_color(), color);
        }
    }

    #[test]
    fn inner_layer_has_no_face() {
        assert_eq!(Face::at(crate::Axis::X, 0), None);
    }

    #[test]
    fn parse() {
        for face in Face::ALL {
            assert_eq!(face.to_string().parse::<Face>(), Ok(face));
        }
        assert_eq!("X".parse::<Face>(), Err(()));
    }
}
