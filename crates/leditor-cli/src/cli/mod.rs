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

//! Command-line structure.
//!
//! - [`decode`]: one subcommand per file kind (parse, geometry, tiles, ...)
//! - [`utility`]: shell completion

mod decode;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};

pub use decode::{DecodeArgs, DecodeCommands};
pub use utility::UtilityCommands;

/// The `leditor` binary.
#[derive(Parser)]
#[command(name = "leditor")]
#[command(author, version, about = "Leditor - Lingo level data toolkit", long_about = None)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). `LEDITOR_LOG`
    /// overrides this with a full filter.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands. Both groups are flattened so every subcommand sits
/// directly under `leditor`.
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Decode(DecodeCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Decode(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
