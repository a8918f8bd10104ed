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

//! `placements`: the prop placements line.

use super::matrix::in_line;
use super::{line_of, read_file, show_report};
use crate::cli::DecodeArgs;
use crate::error::CliError;
use leditor_lingo::parse_at_line;
use leditor_serialization::props::{decode_prop_catalog_with, decode_prop_placements_node, PropIndex};
use leditor_serialization::tiles::decode_tile_catalog_with;
use leditor_serialization::DecodeOptions;
use tracing::info;

/// Builds the name index from the catalogs given on the command line.
///
/// Catalogs are imported with the same options as the main input, so a
/// permissive run tolerates bad catalog lines too.
pub(crate) fn load_index(
    props: Option<&str>,
    tiles: Option<&str>,
    options: &DecodeOptions,
) -> Result<Option<PropIndex>, CliError> {
    if props.is_none() && tiles.is_none() {
        return Ok(None);
    }

    let mut index = match props {
        Some(path) => {
            let report = decode_prop_catalog_with(&read_file(path)?, options).map_err(|e| CliError::catalog(path, e))?;
            PropIndex::from_catalog(&report.value)
        }
        None => PropIndex::new(),
    };
    if let Some(path) = tiles {
        let report = decode_tile_catalog_with(&read_file(path)?, options).map_err(|e| CliError::catalog(path, e))?;
        index = index.with_tiles(&report.value);
    }
    info!(definitions = index.len(), "loaded placement index");
    Ok(Some(index))
}

pub fn placements(
    file: &str,
    props: &str,
    tiles: Option<&str>,
    line: usize,
    args: &DecodeArgs,
) -> Result<(), CliError> {
    let options = args.options();
    let index = load_index(Some(props), tiles, &options)?.unwrap_or_default();

    let text = read_file(file)?;
    let node = parse_at_line(line_of(file, &text, line)?, line, &options.limits)?;
    let result = decode_prop_placements_node(&node, &index, &options).map_err(|e| in_line(e, &text, line));
    show_report(file, result, args, |placed| {
        let ropes = placed.iter().filter(|p| p.settings.rope.is_some()).count();
        println!("  Placements: {}", placed.len());
        println!("  Ropes: {}", ropes);
    })
}
