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

//! Error types for decoding.
//!
//! Two layers:
//!
//! - [`DecodeError`] describes why one unit of work (a catalog line, a
//!   geometry cell, a placement) could not be decoded. It is either a
//!   syntax error from the parser or one of the semantic failures below.
//! - [`ImportError`] is what an entry point returns when it gives up: the
//!   first failed unit in strict mode, or a condition no mode can recover
//!   from (empty input, unreadable file).

use leditor_lingo::{NodeKind, SyntaxError};
use std::fmt;
use thiserror::Error;

/// Category of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text did not parse.
    Syntax,
    /// A required property was absent.
    MissingProperty,
    /// A node had the wrong shape for its slot.
    WrongKind,
    /// A value outside its enumerated or numeric domain.
    InvalidValue,
    /// Nested structure (matrix, quad, layer) was malformed.
    Shape,
    /// A placement named a definition the catalog does not have.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "SyntaxError"),
            ErrorKind::MissingProperty => write!(f, "MissingProperty"),
            ErrorKind::WrongKind => write!(f, "WrongKind"),
            ErrorKind::InvalidValue => write!(f, "InvalidValue"),
            ErrorKind::Shape => write!(f, "ShapeError"),
            ErrorKind::NotFound => write!(f, "NotFound"),
        }
    }
}

fn definition_suffix(definition: &Option<String>) -> String {
    match definition {
        Some(name) => format!(" in definition \"{}\"", name),
        None => String::new(),
    }
}

/// Why a single unit could not be decoded.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    /// The unit's text is not valid Lingo.
    #[error("syntax error at {}", .0)]
    Syntax(#[from] SyntaxError),

    /// A required key is absent from a property list.
    #[error("missing property \"{key}\"{}", definition_suffix(.definition))]
    MissingProperty {
        key: String,
        definition: Option<String>,
    },

    /// A node of the wrong kind where `expected` was needed.
    #[error("\"{key}\" must be {expected}, found {found}")]
    WrongKind {
        key: String,
        expected: &'static str,
        found: NodeKind,
    },

    /// A well-formed value outside the accepted set.
    #[error("invalid value \"{value}\" for \"{key}\"")]
    InvalidValue { key: String, value: String },

    /// Nested structure does not have the required shape.
    #[error("malformed shape at {location}: {message}")]
    MalformedShape { location: String, message: String },

    /// A placement refers to a name the supplied catalog lacks.
    #[error("definition not found: \"{name}\"")]
    DefinitionNotFound { name: String },

    /// Adds the enclosing definition's name to an error.
    #[error("in definition \"{name}\": {source}")]
    InDefinition {
        name: String,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn missing(key: impl Into<String>) -> Self {
        DecodeError::MissingProperty {
            key: key.into(),
            definition: None,
        }
    }

    pub fn wrong_kind(key: impl Into<String>, expected: &'static str, found: NodeKind) -> Self {
        DecodeError::WrongKind {
            key: key.into(),
            expected,
            found,
        }
    }

    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn shape(location: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError::MalformedShape {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        DecodeError::DefinitionNotFound { name: name.into() }
    }

    /// Category of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Syntax(_) => ErrorKind::Syntax,
            DecodeError::MissingProperty { .. } => ErrorKind::MissingProperty,
            DecodeError::WrongKind { .. } => ErrorKind::WrongKind,
            DecodeError::InvalidValue { .. } => ErrorKind::InvalidValue,
            DecodeError::MalformedShape { .. } => ErrorKind::Shape,
            DecodeError::DefinitionNotFound { .. } => ErrorKind::NotFound,
            DecodeError::InDefinition { source, .. } => source.kind(),
        }
    }

    /// Attaches the name of the definition being decoded.
    ///
    /// A missing property records the name in place; anything else is
    /// wrapped once. Errors that already carry a name are left alone.
    #[must_use]
    pub fn within(self, name: &str) -> Self {
        match self {
            DecodeError::MissingProperty {
                key,
                definition: None,
            } => DecodeError::MissingProperty {
                key,
                definition: Some(name.to_string()),
            },
            DecodeError::MissingProperty { .. } | DecodeError::InDefinition { .. } => self,
            other => DecodeError::InDefinition {
                name: name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Strips [`DecodeError::InDefinition`] wrappers.
    pub fn innermost(&self) -> &DecodeError {
        match self {
            DecodeError::InDefinition { source, .. } => source.innermost(),
            other => other,
        }
    }
}

/// Which unit of work a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// 1-based line of a catalog or level file.
    Line(usize),
    /// A whole matrix column.
    Column { column: usize },
    /// One (column, row) cell of a matrix.
    Cell { column: usize, row: usize },
    /// 0-based index into a placement list.
    Placement(usize),
    /// 0-based index into a level's effect list.
    Effect(usize),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Line(line) => write!(f, "line {}", line),
            Unit::Column { column } => write!(f, "column ({})", column),
            Unit::Cell { column, row } => write!(f, "column ({}), row ({})", column, row),
            Unit::Placement(index) => write!(f, "placement {}", index),
            Unit::Effect(index) => write!(f, "effect {}", index),
        }
    }
}

/// A unit that failed to decode.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{unit}: {error}")]
pub struct Failure {
    pub unit: Unit,
    #[source]
    pub error: DecodeError,
}

impl Failure {
    pub fn new(unit: Unit, error: DecodeError) -> Self {
        Self { unit, error }
    }
}

/// Why an entry point returned no result at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImportError {
    /// First failed unit in strict mode.
    #[error(transparent)]
    Failed(#[from] Failure),

    /// A failure inside one line of a multi-section file.
    #[error("line {line}: {source}")]
    Section {
        line: usize,
        source: Box<ImportError>,
    },

    /// The input as a whole has the wrong shape, so there are no units to
    /// decode independently.
    #[error("{0}")]
    Invalid(DecodeError),

    /// Nothing to decode.
    #[error("input is empty")]
    EmptyInput,

    /// File-backed entry points only.
    #[error("I/O error for '{path}': {message}")]
    Io { path: String, message: String },

    /// A dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl ImportError {
    pub fn at(unit: Unit, error: DecodeError) -> Self {
        ImportError::Failed(Failure::new(unit, error))
    }

    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        ImportError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn in_section(self, line: usize) -> Self {
        ImportError::Section {
            line,
            source: Box::new(self),
        }
    }

    /// The unit failure behind this error, looking through sections.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ImportError::Failed(failure) => Some(failure),
            ImportError::Section { source, .. } => source.failure(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leditor_lingo::SourcePos;

    // ==================== DecodeError display ====================

    #[test]
    fn test_missing_property_without_definition() {
        let err = DecodeError::missing("nm");
        assert_eq!(err.to_string(), "missing property \"nm\"");
        assert_eq!(err.kind(), ErrorKind::MissingProperty);
    }

    #[test]
    fn test_missing_property_names_definition() {
        let err = DecodeError::missing("sz").within("Small Stone");
        assert_eq!(
            err.to_string(),
            "missing property \"sz\" in definition \"Small Stone\""
        );
    }

    #[test]
    fn test_wrong_kind_names_key_and_expectation() {
        let err = DecodeError::wrong_kind("sz", "point(x, y)", NodeKind::List);
        assert_eq!(err.to_string(), "\"sz\" must be point(x, y), found list");
        assert_eq!(err.kind(), ErrorKind::WrongKind);
    }

    #[test]
    fn test_invalid_value_names_raw_value_and_key() {
        let err = DecodeError::invalid_value("tp", "boxx");
        assert_eq!(err.to_string(), "invalid value \"boxx\" for \"tp\"");
    }

    #[test]
    fn test_shape_error() {
        let err = DecodeError::shape("column (2), row (4)", "expected 3 layers, found 2");
        assert_eq!(
            err.to_string(),
            "malformed shape at column (2), row (4): expected 3 layers, found 2"
        );
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_syntax_conversion() {
        let err: DecodeError = SyntaxError::EmptyNegation {
            pos: SourcePos::new(6, 3),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("line 6, column 3"));
    }

    // ==================== within() ====================

    #[test]
    fn test_within_wraps_other_errors_once() {
        let err = DecodeError::invalid_value("tp", "x").within("A").within("B");
        assert_eq!(err.to_string(), "in definition \"A\": invalid value \"x\" for \"tp\"");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.innermost(), &DecodeError::invalid_value("tp", "x"));
    }

    #[test]
    fn test_within_keeps_existing_definition() {
        let err = DecodeError::missing("sz").within("A").within("B");
        assert_eq!(
            err,
            DecodeError::MissingProperty {
                key: "sz".to_string(),
                definition: Some("A".to_string()),
            }
        );
    }

    // ==================== Units and import errors ====================

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Line(6).to_string(), "line 6");
        assert_eq!(Unit::Column { column: 1 }.to_string(), "column (1)");
        assert_eq!(Unit::Cell { column: 3, row: 4 }.to_string(), "column (3), row (4)");
        assert_eq!(Unit::Placement(0).to_string(), "placement 0");
        assert_eq!(Unit::Effect(2).to_string(), "effect 2");
    }

    #[test]
    fn test_unit_ordering_follows_position() {
        assert!(Unit::Line(2) < Unit::Line(10));
        assert!(Unit::Cell { column: 0, row: 9 } < Unit::Cell { column: 1, row: 0 });
    }

    #[test]
    fn test_failed_import_is_transparent() {
        let err = ImportError::at(Unit::Line(6), DecodeError::missing("nm"));
        assert_eq!(err.to_string(), "line 6: missing property \"nm\"");
        assert_eq!(err.failure().map(|f| f.unit), Some(Unit::Line(6)));
    }

    #[test]
    fn test_section_wraps_failure() {
        let err = ImportError::at(
            Unit::Cell { column: 0, row: 1 },
            DecodeError::invalid_value("type", "8"),
        )
        .in_section(1);
        assert_eq!(
            err.to_string(),
            "line 1: column (0), row (1): invalid value \"8\" for \"type\""
        );
        assert!(err.failure().is_some());
    }

    #[test]
    fn test_invalid_input_has_no_failure() {
        let err = ImportError::Invalid(DecodeError::shape("level", "expected 8 lines, found 3"));
        assert_eq!(err.to_string(), "malformed shape at level: expected 8 lines, found 3");
        assert!(err.failure().is_none());
    }

    #[test]
    fn test_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ImportError::io("levels/SU_A01.txt", io);
        assert_eq!(err.to_string(), "I/O error for 'levels/SU_A01.txt': gone");
    }
}
