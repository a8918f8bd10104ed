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

//! Command implementations.

mod catalog;
mod completion;
mod effects;
mod level;
mod matrix;
mod parse;
mod placements;

pub use catalog::{materials, props, tiles};
pub use completion::{generate_completion_for_command, installation_instructions};
pub use effects::effects;
pub use level::level;
pub use matrix::{geometry, tile_matrix};
pub use parse::parse;
pub use placements::placements;

use crate::cli::DecodeArgs;
use crate::error::CliError;
use colored::Colorize;
use leditor_serialization::source::numbered_lines;
use leditor_serialization::{Failure, ImportError, ImportReport};
use serde::Serialize;
use std::fs;
use tracing::debug;

/// Default maximum input size (1 GB). `LEDITOR_MAX_FILE_SIZE` overrides it.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("LEDITOR_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Reads a whole file after checking its size against the limit.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file is over the limit
/// or the content is not valid UTF-8.
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }
    debug!(path, bytes = metadata.len(), "reading input");
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Line `number` (1-based) of `text`.
pub(crate) fn line_of<'a>(path: &str, text: &'a str, number: usize) -> Result<&'a str, CliError> {
    numbered_lines(text)
        .find(|(n, _)| *n == number)
        .map(|(_, line)| line)
        .ok_or_else(|| CliError::invalid_input(format!("'{}' has no line {}", path, number)))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::json_format)?;
    println!("{}", json);
    Ok(())
}

pub(crate) fn print_failures(failures: &[Failure]) {
    for failure in failures {
        println!("  {} {}", "✗".yellow(), failure);
    }
}

/// Prints an import the way every decoding command does: a status mark,
/// the command's own details, dropped units and the summary line. With
/// `--json` only the decoded value is printed.
pub(crate) fn show_report<T, F>(
    path: &str,
    result: Result<ImportReport<T>, ImportError>,
    args: &DecodeArgs,
    describe: F,
) -> Result<(), CliError>
where
    T: Serialize,
    F: FnOnce(&T),
{
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if !args.json {
                println!("{} {}", "✗".red().bold(), path);
            }
            return Err(e.into());
        }
    };

    if args.json {
        return print_json(&report.value);
    }

    let mark = if report.is_clean() {
        "✓".green().bold()
    } else {
        "!".yellow().bold()
    };
    println!("{} {}", mark, path);
    describe(&report.value);
    print_failures(&report.failures);
    println!("  {}", report.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file_missing() {
        let err = read_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_read_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(read_file(path).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_line_of() {
        let text = "a\nb\r\nc";
        assert_eq!(line_of("f", text, 2).unwrap(), "b");
        assert_eq!(
            line_of("f", text, 4).unwrap_err(),
            CliError::invalid_input("'f' has no line 4")
        );
    }
}
