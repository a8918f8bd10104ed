// Leditor - Lingo level data toolkit
//
// Copyright (c) 2025 Leditor contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decoding commands, one per file kind.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use leditor_serialization::{DecodeMode, DecodeOptions};

/// Options shared by every decoding command.
#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Skip bad records and report them instead of stopping at the first
    #[arg(short, long)]
    pub permissive: bool,

    /// Print the decoded value as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Worker threads for large inputs (defaults to one per core)
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,
}

impl DecodeArgs {
    pub fn options(&self) -> DecodeOptions {
        let mode = if self.permissive {
            DecodeMode::Permissive
        } else {
            DecodeMode::Strict
        };
        let builder = DecodeOptions::builder().mode(mode);
        match self.threads {
            Some(threads) => builder.max_threads(usize::from(threads)).build(),
            None => builder.build(),
        }
    }
}

#[derive(Subcommand)]
pub enum DecodeCommands {
    /// Parse Lingo text without decoding it
    ///
    /// Every record line is parsed and bad lines are listed. With --line,
    /// only that line is parsed and its tree is printed.
    Parse {
        #[arg(value_name = "FILE")]
        file: String,

        /// Parse only this line (1-based) and print it
        #[arg(short, long, value_name = "N")]
        line: Option<usize>,

        /// Print parsed trees as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a geometry matrix
    ///
    /// The matrix is read from one line of FILE, line 1 by default, which is
    /// where level files keep it.
    Geometry {
        #[arg(value_name = "FILE")]
        file: String,

        /// Line holding the matrix
        #[arg(short, long, value_name = "N", default_value_t = 1)]
        line: usize,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Decode a tile matrix (line 2 of a level file by default)
    TileMatrix {
        #[arg(value_name = "FILE")]
        file: String,

        /// Line holding the tile matrix
        #[arg(short, long, value_name = "N", default_value_t = 2)]
        line: usize,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Decode the effects line (line 3 of a level file by default)
    Effects {
        #[arg(value_name = "FILE")]
        file: String,

        /// Line holding the effects
        #[arg(short, long, value_name = "N", default_value_t = 3)]
        line: usize,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Import a tile catalog
    Tiles {
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Import a material catalog
    Materials {
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Import a prop catalog
    Props {
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Decode prop placements against a prop catalog
    Placements {
        #[arg(value_name = "FILE")]
        file: String,

        /// Prop catalog that placement names resolve against
        #[arg(long, value_name = "CATALOG")]
        props: String,

        /// Tile catalog for placements that name tiles
        #[arg(long, value_name = "CATALOG")]
        tiles: Option<String>,

        /// Line holding the placements (9 in a level file)
        #[arg(short, long, value_name = "N", default_value_t = 1)]
        line: usize,

        #[command(flatten)]
        args: DecodeArgs,
    },

    /// Decode a whole level file
    ///
    /// Placements on line 9 are decoded only when --props or --tiles is
    /// given.
    Level {
        #[arg(value_name = "FILE")]
        file: String,

        /// Prop catalog for the placements line
        #[arg(long, value_name = "CATALOG")]
        props: Option<String>,

        /// Tile catalog for placements that name tiles
        #[arg(long, value_name = "CATALOG")]
        tiles: Option<String>,

        #[command(flatten)]
        args: DecodeArgs,
    },
}

impl DecodeCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            DecodeCommands::Parse { file, line, json } => commands::parse(&file, line, json),
            DecodeCommands::Geometry { file, line, args } => commands::geometry(&file, line, &args),
            DecodeCommands::TileMatrix { file, line, args } => commands::tile_matrix(&file, line, &args),
            DecodeCommands::Effects { file, line, args } => commands::effects(&file, line, &args),
            DecodeCommands::Tiles { file, args } => commands::tiles(&file, &args),
            DecodeCommands::Materials { file, args } => commands::materials(&file, &args),
            DecodeCommands::Props { file, args } => commands::props(&file, &args),
            DecodeCommands::Placements {
                file,
                props,
                tiles,
                line,
                args,
            } => commands::placements(&file, &props, tiles.as_deref(), line, &args),
            DecodeCommands::Level {
                file,
                props,
                tiles,
                args,
            } => commands::level(&file, props.as_deref(), tiles.as_deref(), &args),
        }
    }
}
