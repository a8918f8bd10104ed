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

//! Syntax errors raised while reading a Lingo line.

use thiserror::Error;

pub use crate::span::SourcePos;

/// Everything that can go wrong while turning one line of text into a tree.
///
/// Syntax errors are always fatal to the line being parsed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyntaxError {
    // ==================== Token errors ====================
    /// A character that cannot start or continue the current construct.
    #[error("{pos}: unexpected character '{found}', expected {expected}")]
    UnexpectedChar {
        found: char,
        expected: &'static str,
        pos: SourcePos,
    },

    /// Input ended while a construct was still open.
    #[error("{pos}: unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        expected: &'static str,
        pos: SourcePos,
    },

    /// A string literal that never saw its closing quote.
    #[error("{pos}: unclosed string literal")]
    UnclosedString { pos: SourcePos },

    /// A `[` or `(` without its partner. `pos` points at the opener.
    #[error("{pos}: unclosed '{open}'")]
    UnclosedDelimiter { open: char, pos: SourcePos },

    /// A `-` that is not followed by anything to negate.
    #[error("{pos}: negation without an operand")]
    EmptyNegation { pos: SourcePos },

    /// A numeric literal that does not fit the number model.
    #[error("{pos}: invalid number literal '{literal}'")]
    InvalidNumber { literal: String, pos: SourcePos },

    /// A property-list key that is not a symbol.
    #[error("{pos}: property keys must be symbols")]
    InvalidPropertyKey { pos: SourcePos },

    /// A complete expression followed by more text.
    #[error("{pos}: unexpected trailing input starting with '{found}'")]
    TrailingInput { found: char, pos: SourcePos },

    // ==================== Limit errors ====================
    /// Brackets or calls nested beyond the configured depth.
    #[error("{pos}: nesting depth {depth} exceeds maximum {max}")]
    DepthExceeded {
        depth: usize,
        max: usize,
        pos: SourcePos,
    },

    /// Line longer than the configured maximum, in bytes.
    #[error("{pos}: line length {length} exceeds maximum {max}")]
    LineTooLong {
        length: usize,
        max: usize,
        pos: SourcePos,
    },
}

impl SyntaxError {
    /// Position the error was raised at.
    pub fn pos(&self) -> SourcePos {
        match self {
            SyntaxError::UnexpectedChar { pos, .. }
            | SyntaxError::UnexpectedEnd { pos, .. }
            | SyntaxError::UnclosedString { pos }
            | SyntaxError::UnclosedDelimiter { pos, .. }
            | SyntaxError::EmptyNegation { pos }
            | SyntaxError::InvalidNumber { pos, .. }
            | SyntaxError::InvalidPropertyKey { pos }
            | SyntaxError::TrailingInput { pos, .. }
            | SyntaxError::DepthExceeded { pos, .. }
            | SyntaxError::LineTooLong { pos, .. } => *pos,
        }
    }

    /// Re-stamps the error with the file line it came from.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        match &mut self {
            SyntaxError::UnexpectedChar { pos, .. }
            | SyntaxError::UnexpectedEnd { pos, .. }
            | SyntaxError::UnclosedString { pos }
            | SyntaxError::UnclosedDelimiter { pos, .. }
            | SyntaxError::EmptyNegation { pos }
            | SyntaxError::InvalidNumber { pos, .. }
            | SyntaxError::InvalidPropertyKey { pos }
            | SyntaxError::TrailingInput { pos, .. }
            | SyntaxError::DepthExceeded { pos, .. }
            | SyntaxError::LineTooLong { pos, .. } => *pos = pos.with_line(line),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = SyntaxError::EmptyNegation {
            pos: SourcePos::new(3, 14),
        };
        assert_eq!(err.to_string(), "line 3, column 14: negation without an operand");
    }

    #[test]
    fn test_unexpected_char_display() {
        let err = SyntaxError::UnexpectedChar {
            found: '}',
            expected: "',' or ']'",
            pos: SourcePos::new(1, 9),
        };
        let msg = err.to_string();
        assert!(msg.contains("'}'"));
        assert!(msg.contains("',' or ']'"));
    }

    #[test]
    fn test_at_line_rewrites_line_only() {
        let err = SyntaxError::UnclosedDelimiter {
            open: '[',
            pos: SourcePos::column_only(5),
        }
        .at_line(12);
        assert_eq!(err.pos(), SourcePos::new(12, 5));
        assert!(err.to_string().starts_with("line 12, column 5"));
    }

    #[test]
    fn test_limit_errors() {
        let err = SyntaxError::DepthExceeded {
            depth: 9,
            max: 8,
            pos: SourcePos::column_only(9),
        };
        assert!(err.to_string().contains("depth 9 exceeds maximum 8"));

        let err = SyntaxError::LineTooLong {
            length: 100,
            max: 10,
            pos: SourcePos::column_only(1),
        };
        assert!(err.to_string().contains("length 100 exceeds maximum 10"));
    }
}
