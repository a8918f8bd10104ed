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

//! `geometry` and `tile-matrix`: one matrix line of a file.

use super::{line_of, read_file, show_report};
use crate::cli::DecodeArgs;
use crate::error::CliError;
use leditor_lingo::parse_at_line;
use leditor_serialization::geometry::{decode_geometry_node, GeoType};
use leditor_serialization::tile_matrix::{decode_tile_matrix_node, TileCell};
use leditor_serialization::source::numbered_lines;
use leditor_serialization::ImportError;

pub fn geometry(file: &str, line: usize, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    let options = args.options();
    let node = parse_at_line(line_of(file, &text, line)?, line, &options.limits)?;
    let result = decode_geometry_node(&node, &options).map_err(|e| in_line(e, &text, line));
    show_report(file, result, args, |geo| {
        let solid = geo
            .iter()
            .filter(|(_, _, cell)| cell[0].kind == GeoType::Solid)
            .count();
        println!("  Size: {} x {}", geo.width(), geo.height());
        println!("  Solid cells (layer 1): {}", solid);
    })
}

pub fn tile_matrix(file: &str, line: usize, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    let options = args.options();
    let node = parse_at_line(line_of(file, &text, line)?, line, &options.limits)?;
    let result = decode_tile_matrix_node(&node, &options).map_err(|e| in_line(e, &text, line));
    show_report(file, result, args, |layer| {
        let heads = layer
            .matrix
            .as_slice()
            .iter()
            .filter(|cell| matches!(cell, TileCell::Head { .. }))
            .count();
        println!("  Size: {} x {}", layer.matrix.width(), layer.matrix.height());
        println!("  Default material: {}", layer.default_material);
        println!("  Placed tiles: {}", heads);
    })
}

/// Errors from files with more than one line name the line they came from.
pub(crate) fn in_line(error: ImportError, text: &str, line: usize) -> ImportError {
    if numbered_lines(text).nth(1).is_some() {
        error.in_section(line)
    } else {
        error
    }
}
