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

//! `effects`: the effects line of a level.

use super::matrix::in_line;
use super::{line_of, read_file, show_report};
use crate::cli::DecodeArgs;
use crate::error::CliError;
use leditor_lingo::parse_at_line;
use leditor_serialization::effects::decode_effects_node;

pub fn effects(file: &str, line: usize, args: &DecodeArgs) -> Result<(), CliError> {
    let text = read_file(file)?;
    let options = args.options();
    let node = parse_at_line(line_of(file, &text, line)?, line, &options.limits)?;
    let result = decode_effects_node(&node, None, &options).map_err(|e| in_line(e, &text, line));
    show_report(file, result, args, |effects| {
        println!("  Effects: {}", effects.len());
        for effect in effects {
            println!(
                "  {} ({} x {}, {} options)",
                effect.name,
                effect.matrix.width(),
                effect.matrix.height(),
                effect.options.len()
            );
        }
    })
}
