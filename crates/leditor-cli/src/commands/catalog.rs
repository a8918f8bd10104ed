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

//! `tiles`, `materials` and `props`: catalog imports.

use super::{read_file, show_report};
use crate::cli::DecodeArgs;
use crate::error::CliError;
use leditor_serialization::materials::decode_material_catalog_with;
use leditor_serialization::props::decode_prop_catalog_with;
use leditor_serialization::tiles::decode_tile_catalog_with;
use leditor_serialization::Catalog;

fn describe<D>(catalog: &Catalog<D>) {
    println!("  Categories: {}", catalog.categories().count());
    println!("  Definitions: {}", catalog.len());
}

pub fn tiles(file: &str, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    show_report(file, decode_tile_catalog_with(&text, &args.options()), args, describe)
}

pub fn materials(file: &str, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    show_report(file, decode_material_catalog_with(&text, &args.options()), args, describe)
}

pub fn props(file: &str, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    show_report(file, decode_prop_catalog_with(&text, &args.options()), args, |catalog| {
        describe(catalog);
        let ropes = catalog.definitions().filter(|p| p.kind.is_rope()).count();
        if ropes > 0 {
            println!("  Ropes: {}", ropes);
        }
    })
}
