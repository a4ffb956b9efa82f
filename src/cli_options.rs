/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Cacapalavras.

Cacapalavras is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Cacapalavras is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Cacapalavras. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator and the word lists.
//!
//! # Examples
//!
//! List the bundled words of the easy tier:
//!
//! ```text
//! $ cacapalavras --ls -f easy
//! Easy (levels 1-3, 3 to 5 letters): SOL MAR LUA RIO CEU PAO MEL FLOR GATO ...
//! ```
//!
//! Generate a board for level 4 with the given words:
//!
//! ```text
//! $ cacapalavras -l 4 -w gato,casa,janela --seed 12
//!
//! Level 4 (13x13, 4 words requested)
//! Q W S D G J N O P E R T Y
//! ...
//!     GATO at (2, 7) going SouthWest
//!     CASA at (11, 0) going East
//!     JANELA at (0, 5) going South (challenge)
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::difficulty::{self, Difficulty};
use crate::generator::placement::{Board, BoardGenerator, GenerationError};
use crate::generator::scan;
use crate::grid;
use crate::words::bundled;
use crate::words::supplier::WordConstraints;

/// Text displayed with `--version`.
const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/>"
);

/// Build Cacapalavras boards for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the bundled words
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Only list the words of this difficulty tier
    #[arg(value_enum, short = 'f', long, requires = "ls")]
    difficulty: Option<Difficulty>,

    /// Level to generate a board for
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Comma-separated words to hide. By default, bundled words are picked for the level
    #[arg(short, long, value_delimiter = ',')]
    words: Option<Vec<String>>,

    /// Number of boards to generate
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Print some statistics after generating the boards
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Seed of the random generator, for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the bundled words
    //
    if args.ls {
        for d in Difficulty::all() {
            if args.difficulty.is_some_and(|f| f != d) {
                continue;
            }
            let lengths = d.word_lengths();
            println!(
                "{d} ({}, {} to {} letters): {}",
                levels(d),
                lengths.start(),
                lengths.end(),
                bundled::tier_words(d).join(" ")
            );
        }
        return 0;
    }

    let config: EngineConfig = match &args.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(Some(c)) => c,
            Ok(None) => {
                eprintln!("Configuration file {} not found", path.display());
                return 1;
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                return 1;
            }
        },
        None => EngineConfig::default(),
    };

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let level: u32 = args.level.max(1);
    let constraints: WordConstraints = WordConstraints::for_level(level, Vec::new());
    let mut generator: BoardGenerator = BoardGenerator::from_config(&config);

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: u32 = 0;
    let mut attempts: usize = 0;
    let mut duplicates: u32 = 0;
    for i in 0..args.count {
        debug!("Iteration {i}");

        let words: Vec<String> = match &args.words {
            Some(w) => w.clone(),
            None => bundled::pick(level, &constraints, &mut rng),
        };
        let ret: Result<Board, GenerationError> = generator.generate(&words, level, &mut rng);
        total += generator.duration;
        max = max.max(generator.duration);
        attempts += generator.attempts;

        match ret {
            Ok(board) => {
                // Extra copies made of letters from other words cannot be removed
                for p in &board.placed_words {
                    let copies: usize = scan::find_occurrences(&board.grid, &p.word)
                        .iter()
                        .filter(|o| !scan::same_cells(o, &p.positions))
                        .count();
                    if copies > 0 {
                        duplicates += 1;
                        debug!("{} appears {copies} more times in the grid", p.word);
                    }
                }
                print_board(&board);
            }
            Err(e) => {
                errors += 1;
                eprintln!("Cannot generate the board: {e}");
            }
        }
    }

    // Print some stats
    if args.summary {
        println!(
            "
      total time = {}s
    average time = {}s
        max time = {}s
average attempts = {}
      duplicates = {}
          errors = {}",
            total,
            total / args.count as f32,
            max,
            attempts / args.count as usize,
            duplicates,
            errors
        );
    }
    if errors == args.count { 1 } else { 0 }
}

/// Return the levels of the tier, as text.
fn levels(d: Difficulty) -> String {
    let tier: Vec<u32> = (1..=grid::MAX_GRID_SIZE as u32)
        .filter(|l| Difficulty::for_level(*l) == d)
        .collect();
    match (tier.first(), tier.last()) {
        (Some(first), _) if Difficulty::for_level(u32::MAX) == d => format!("levels {first}+"),
        (Some(first), Some(last)) => format!("levels {first}-{last}"),
        _ => String::new(),
    }
}

fn print_board(board: &Board) {
    let size: usize = board.grid.size();
    println!(
        "\nLevel {} ({size}x{size}, {} words requested)",
        board.level,
        difficulty::word_count(board.level)
    );
    print!("{}", board.grid);
    let challenge: Option<&str> = board.challenge_word().map(|c| c.word.as_str());
    for p in &board.placed_words {
        let Some(first) = p.positions.first() else {
            continue;
        };
        let mark: &str = if Some(p.word.as_str()) == challenge { " (challenge)" } else { "" };
        println!("    {} at {first} going {:?}{mark}", p.word, p.direction);
    }
    for d in &board.dropped_words {
        println!("    {} dropped: {}", d.word, d.reason);
    }
}
