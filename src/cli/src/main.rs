#![warn(clippy::pedantic)]

mod render;
mod scan_file;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube_core::{Cube, ScanErrorKind, format_moves, invert_moves, parse_moves, scramble};
use env_logger::TimestampPrecision;
use log::{LevelFilter, debug, info};
use owo_colors::OwoColorize;
use render::{DisplayConfig, Style, render};
use scan_file::ScanFile;

/// Simulates a 3x3x3 cube and rebuilds it from photographed faces
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The display configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "DISPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the sticker style of the display configuration
    #[arg(long, value_enum)]
    style: Option<Style>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the solved cube.
    Solved,
    /// Apply a move sequence to the solved cube and print the result.
    Moves {
        /// The move sequence to apply, e.g. "R U' F2".
        sequence: String,
        /// Also print the sequence that undoes it
        #[arg(long)]
        inverse: bool,
    },
    /// Generate a random scramble.
    Scramble {
        /// Number of moves
        #[arg(long, short = 'n', default_value_t = 20)]
        length: usize,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
        /// Write a simulated scan of the scrambled cube to this file
        #[arg(long, value_name = "SCAN_FILE")]
        scan_out: Option<PathBuf>,
    },
    /// Rebuild a cube from a scan file and print it.
    Analyze {
        /// The scan file, in TOML format
        file: PathBuf,
        /// Moves to apply to the rebuilt cube before printing
        #[arg(long, value_name = "SEQUENCE")]
        then: Option<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = match &cli.config {
        Some(path) => DisplayConfig::load(path)?,
        None => DisplayConfig::default(),
    };
    if let Some(style) = cli.style {
        config.style = style;
    }
    debug!("Display configuration: {config:?}");

    match cli.command {
        Commands::Solved => {
            println!("{}", render(&Cube::solved(), &config)?);
        }
        Commands::Moves { sequence, inverse } => {
            let moves = parse_moves(&sequence)?;
            let mut cube = Cube::solved();
            cube.apply_moves(&moves);

            println!("{}", render(&cube, &config)?);
            if inverse {
                println!("Inverse: {}", format_moves(&invert_moves(&moves)));
            }
        }
        Commands::Scramble {
            length,
            seed,
            scan_out,
        } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let moves = scramble(&mut rng, length);
            let mut cube = Cube::solved();
            cube.apply_moves(&moves);

            println!("{}", format_moves(&moves));
            println!("{}", render(&cube, &config)?);

            if let Some(path) = scan_out {
                ScanFile::photograph(&cube, &mut rng)?.save(&path)?;
                info!("Wrote scan to {}", path.display());
            }
        }
        Commands::Analyze { file, then } => {
            let scan = ScanFile::load(&file)?;
            info!("Loaded {} sides from {}", scan.sides.len(), file.display());

            let mut cube = Cube::analyze(scan.into_sides()).map_err(|e| {
                let hint = match e.kind() {
                    ScanErrorKind::Malformed => "the scan file does not describe a cube",
                    ScanErrorKind::Contradictory => "some face was misread, scan it again",
                    ScanErrorKind::Ambiguous => {
                        "the faces do not pin down the cube, scan all six faces"
                    }
                };
                eyre!("{e}: {hint}")
            })?;

            if let Some(sequence) = then {
                cube.apply_moves(&parse_moves(&sequence)?);
            }

            println!("{}", render(&cube, &config)?);
            if cube.is_solved() {
                println!("{}", "Solved".green());
            }
        }
    }

    Ok(())
}
