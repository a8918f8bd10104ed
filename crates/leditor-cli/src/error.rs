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

//! Error type for the `leditor` commands.

use leditor_lingo::SyntaxError;
use leditor_serialization::ImportError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a command can fail with.
///
/// Decoder failures are carried unchanged so that the message printed by
/// `main` names the same line, column or placement the library reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// The input is larger than `LEDITOR_MAX_FILE_SIZE` allows.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// A strict import stopped, or the input had no usable shape.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A catalog named by `--props` or `--tiles` failed to import.
    #[error("in catalog '{path}': {source}")]
    Catalog { path: PathBuf, source: ImportError },

    /// One line did not parse.
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// `parse` over a whole file found bad lines; each was already printed.
    #[error("{count} of {total} lines failed to parse")]
    SyntaxErrors { count: usize, total: usize },

    /// Serializing the decoded value failed.
    #[error("JSON format error: {message}")]
    JsonFormat { message: String },

    /// Bad arguments that clap cannot catch on its own.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        CliError::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn catalog(path: impl Into<PathBuf>, source: ImportError) -> Self {
        CliError::Catalog {
            path: path.into(),
            source,
        }
    }

    pub fn json_format(err: serde_json::Error) -> Self {
        CliError::JsonFormat {
            message: err.to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leditor_serialization::{DecodeError, Unit};

    #[test]
    fn test_io_error_message() {
        let err = CliError::io_error("levels/a.txt", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "I/O error for 'levels/a.txt': gone");
    }

    #[test]
    fn test_file_too_large_reports_megabytes() {
        let err = CliError::file_too_large("big.txt", 5 * 1024 * 1024, 2 * 1024 * 1024);
        assert!(matches!(err, CliError::FileTooLarge { max_mb: 2, .. }));
        assert!(err.to_string().contains("(2 MB)"));
    }

    #[test]
    fn test_import_error_is_transparent() {
        let err: CliError = ImportError::at(Unit::Line(6), DecodeError::missing("nm")).into();
        assert_eq!(err.to_string(), "line 6: missing property \"nm\"");
    }

    #[test]
    fn test_catalog_error_names_path() {
        let err = CliError::catalog("Props/Init.txt", ImportError::EmptyInput);
        assert_eq!(err.to_string(), "in catalog 'Props/Init.txt': input is empty");
    }

    #[test]
    fn test_syntax_errors_count() {
        let err = CliError::SyntaxErrors { count: 2, total: 9 };
        assert_eq!(err.to_string(), "2 of 9 lines failed to parse");
    }
}
