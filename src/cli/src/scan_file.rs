use std::{collections::BTreeMap, fs, path::Path};

use color_eyre::eyre::WrapErr;
use cube_core::{Cube, Face, Side, turn_grid};
use serde::{Deserialize, Serialize};

/// A scan on disk: one comma-joined sticker list per face, keyed by any
/// label the scanner likes.
///
/// ```toml
/// [sides]
/// white = "white,red,blue,green,white,orange,red,red,blue"
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct ScanFile {
    pub sides: BTreeMap<String, Side>,
}

impl ScanFile {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read scan file {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse scan file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> color_eyre::Result<()> {
        fs::write(path, toml::to_string(self)?)
            .wrap_err_with(|| format!("Failed to write scan file {}", path.display()))
    }

    /// Photograph every face of `cube`, turning each picture by a random
    /// number of quarter turns the way a handheld scan would.
    pub fn photograph(cube: &Cube, rng: &mut fastrand::Rng) -> color_eyre::Result<Self> {
        let mut sides = BTreeMap::new();
        for face in Face::ALL {
            let cells = turn_grid(cube.face(face)?, rng.u8(..4));
            sides.insert(face.home_color().to_string(), Side::new(cells));
        }
        Ok(ScanFile { sides })
    }

    pub fn into_sides(self) -> impl Iterator<Item = Side> {
        self.sides.into_values()
    }
}
