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

//! `level`: a whole level file.

use super::placements::load_index;
use super::{print_json, read_file};
use crate::cli::DecodeArgs;
use crate::error::CliError;
use colored::Colorize;
use leditor_serialization::level::decode_level_with;

pub fn level(file: &str, props: Option<&str>, tiles: Option<&str>, args: &DecodeArgs) -> Result<(), CliError> {
    let options = args.options();
    let index = load_index(props, tiles, &options)?;
    let text = read_file(file)?;

    let level = match decode_level_with(&text, index.as_ref(), &options) {
        Ok(level) => level,
        Err(e) => {
            if !args.json {
                println!("{} {}", "✗".red().bold(), file);
            }
            return Err(e.into());
        }
    };

    if args.json {
        return print_json(&level);
    }

    let mark = if level.is_clean() {
        "✓".green().bold()
    } else {
        "!".yellow().bold()
    };
    println!("{} {}", mark, file);
    println!("  Size: {} x {}", level.size.x, level.size.y);
    println!("  Geometry: {} x {}", level.geometry.width(), level.geometry.height());
    println!("  Default material: {}", level.tiles.default_material);
    println!("  Effects: {}", level.effects.len());
    println!("  Cameras: {}", level.cameras.len());
    println!("  Water level: {}", level.water_level);
    if index.is_some() {
        println!("  Placements: {}", level.props.len());
    }
    for failure in &level.failures {
        println!("  {} {}", "✗".yellow(), failure);
    }
    if let Some(e) = &level.props_error {
        println!("  {} placements skipped: {}", "✗".yellow(), e);
    }
    Ok(())
}
