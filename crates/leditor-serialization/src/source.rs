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

//! Splitting source text into lines and reading it from disk.

use crate::error::ImportError;
use std::path::Path;

/// What a line of a catalog file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Starts with `--`.
    Comment,
    /// Starts with a single `-`; holds the text after it.
    Header(&'a str),
    /// Anything else; holds the trimmed line.
    Record(&'a str),
}

pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with("--") {
        LineKind::Comment
    } else if let Some(rest) = line.strip_prefix('-') {
        LineKind::Header(rest)
    } else {
        LineKind::Record(line)
    }
}

/// Lines of `text` with 1-based numbers. A byte-order mark is dropped and
/// both `\n` and `\r\n` endings are accepted.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
}

/// Reads a whole file up front; decoding never touches the filesystem.
pub fn read_text(path: impl AsRef<Path>) -> Result<String, ImportError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| ImportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("-- old tiles"), LineKind::Comment);
        assert_eq!(
            classify("-[\"Stone\", color(1, 2, 3)]"),
            LineKind::Header("[\"Stone\", color(1, 2, 3)]")
        );
        assert_eq!(classify("  [#nm: \"a\"]\r"), LineKind::Record("[#nm: \"a\"]"));
    }

    #[test]
    fn test_numbered_lines_strip_bom_and_crlf() {
        let lines: Vec<_> = numbered_lines("\u{feff}a\r\nb\n\nc").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, ""), (4, "c")]);
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
