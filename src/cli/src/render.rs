use std::{fs, path::Path};

use clap::ValueEnum;
use color_eyre::eyre::WrapErr;
use cube_core::{Color, Cube, Face};
use itertools::Itertools;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// How stickers are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Colored blocks
    #[default]
    Blocks,
    /// Single letters such as `W` and `O`
    Letters,
    /// Full color names
    Names,
}

/// Display configuration, read from a TOML file.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub style: Style,
    /// Print the face letters above the grids
    pub legend: bool,
}

impl DisplayConfig {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read display config {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse display config {}", path.display()))
    }
}

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::White => (255, 255, 255),
        Color::Yellow => (255, 213, 0),
        Color::Red => (196, 30, 58),
        Color::Orange => (255, 88, 0),
        Color::Green => (0, 158, 96),
        Color::Blue => (0, 81, 186),
    }
}

fn sticker(color: Color, style: Style) -> String {
    match style {
        Style::Blocks => {
            let (r, g, b) = rgb(color);
            "██".truecolor(r, g, b).to_string()
        }
        Style::Letters => color.letter().to_string(),
        Style::Names => format!("{:<6}", color.name()),
    }
}

fn cell_width(style: Style) -> usize {
    match style {
        Style::Blocks => 2,
        Style::Letters => 1,
        Style::Names => 6,
    }
}

/// Draw the six faces side by side, each in its own scan frame.
pub fn render(cube: &Cube, config: &DisplayConfig) -> color_eyre::Result<String> {
    let faces = Face::ALL
        .into_iter()
        .map(|face| cube.face(face).map(|cells| (face, cells)))
        .collect::<Result<Vec<_>, _>>()?;

    let separator = if config.style == Style::Names { " " } else { "" };
    let grid_width = 3 * cell_width(config.style) + 2 * separator.len();

    let mut lines = Vec::with_capacity(4);
    if config.legend {
        lines.push(
            faces
                .iter()
                .map(|(face, _)| format!("{:<grid_width$}", face.to_string()))
                .join("  "),
        );
    }

    for row in 0..3 {
        lines.push(
            faces
                .iter()
                .map(|(_, cells)| {
                    cells[3 * row..3 * row + 3]
                        .iter()
                        .map(|&color| sticker(color, config.style))
                        .join(separator)
                })
                .join("  "),
        );
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use cube_core::{Cube, Face, Move, Turn};

    use super::{DisplayConfig, Style, render};

    #[test]
    fn letters_in_face_order() {
        let config = DisplayConfig {
            style: Style::Letters,
            legend: true,
        };
        let text = render(&Cube::solved(), &config).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "U    D    L    R    F    B  ");
        assert_eq!(lines[1], "BBB  GGG  OOO  RRR  WWW  YYY");
    }

    #[test]
    fn turned_cube_is_not_uniform() {
        let mut cube = Cube::solved();
        cube.apply_move(Move::new(Face::R, Turn::Clockwise));
        let config = DisplayConfig {
            style: Style::Names,
            legend: false,
        };
        let text = render(&cube, &config).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_ne!(text, render(&Cube::solved(), &config).unwrap());
    }

    #[test]
    fn config_defaults() {
        let config: DisplayConfig = toml::from_str("").unwrap();
        assert_eq!(config.style, Style::Blocks);
        assert!(!config.legend);

        let config: DisplayConfig = toml::from_str("style = \"names\"\nlegend = true").unwrap();
        assert_eq!(config.style, Style::Names);
        assert!(config.legend);
    }
}
