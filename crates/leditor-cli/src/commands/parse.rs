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

//! `parse`: syntax check without typed decoding.

use super::{line_of, print_json, read_file};
use crate::error::CliError;
use colored::Colorize;
use leditor_lingo::{parse_at_line, Node, ParseLimits};
use leditor_serialization::source::{classify, numbered_lines, LineKind};
use tracing::info;

/// Parses one line, or every record line of `file`.
///
/// Blank lines, `--` comments and `-` category headers are skipped when
/// scanning a whole file; headers are checked by the catalog commands.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, the chosen line does not
/// exist or does not parse, or any record line fails to parse.
pub fn parse(file: &str, line: Option<usize>, json: bool) -> Result<(), CliError> {
    let text = read_file(file)?;
    let limits = ParseLimits::default();

    if let Some(number) = line {
        let node = parse_at_line(line_of(file, &text, number)?, number, &limits)?;
        return if json {
            print_json(&node)
        } else {
            println!("{}", node);
            Ok(())
        };
    }

    let mut nodes: Vec<Node> = Vec::new();
    let mut total = 0;
    let mut failed = 0;
    for (number, raw) in numbered_lines(&text) {
        let LineKind::Record(record) = classify(raw) else {
            continue;
        };
        total += 1;
        match parse_at_line(record, number, &limits) {
            Ok(node) => nodes.push(node),
            Err(e) => {
                failed += 1;
                eprintln!("  {} {}", "✗".red(), e);
            }
        }
    }
    info!(total, failed, "parsed {}", file);

    if failed > 0 {
        if !json {
            println!("{} {}", "✗".red().bold(), file);
        }
        return Err(CliError::SyntaxErrors { count: failed, total });
    }

    if json {
        print_json(&nodes)
    } else {
        println!("{} {}", "✓".green().bold(), file);
        println!("  Records: {}", total);
        Ok(())
    }
}
