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

//! Source positions for syntax errors.
//!
//! Lingo data is line oriented: every record is a single line, so the parser
//! only ever tracks a column. The line is stamped by whoever split the file.
//!
//! ```
//! use leditor_lingo::SourcePos;
//!
//! let pos = SourcePos::new(3, 17);
//! assert_eq!(pos.line(), 3);
//! assert_eq!(pos.column(), 17);
//! assert_eq!(pos.with_line(9).to_string(), "line 9, column 17");
//! ```

use std::fmt;

/// A 1-indexed line/column position inside a source file.
///
/// `0` is allowed for either component and means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of a column on the first line, which is where a lone
    /// expression parsed without file context lives.
    #[inline]
    pub const fn column_only(column: usize) -> Self {
        Self { line: 1, column }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the same column on another line.
    #[inline]
    #[must_use]
    pub const fn with_line(self, line: usize) -> Self {
        Self {
            line,
            column: self.column,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let pos = SourcePos::new(4, 12);
        assert_eq!(pos.line(), 4);
        assert_eq!(pos.column(), 12);
    }

    #[test]
    fn test_column_only_is_first_line() {
        let pos = SourcePos::column_only(8);
        assert_eq!(pos, SourcePos::new(1, 8));
    }

    #[test]
    fn test_with_line_keeps_column() {
        let pos = SourcePos::column_only(8).with_line(40);
        assert_eq!(pos.line(), 40);
        assert_eq!(pos.column(), 8);
    }

    #[test]
    fn test_default_is_unknown() {
        let pos = SourcePos::default();
        assert_eq!(pos.line(), 0);
        assert_eq!(pos.column(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(SourcePos::new(2, 5).to_string(), "line 2, column 5");
    }
}
