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

//! Resource limits for parsing.

/// Bounds on what a single line may cost to parse.
///
/// Geometry lines of large levels run into the megabytes, so the defaults
/// are generous; they exist to stop runaway input, not to police real data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum line length in bytes (default: 64MB).
    pub max_line_length: usize,
    /// Maximum nesting of lists, property lists, calls and negations
    /// (default: 128).
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_line_length: 64 * 1024 * 1024,
            max_depth: 128,
        }
    }
}

impl ParseLimits {
    /// Limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_line_length: usize::MAX,
            max_depth: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = ParseLimits::default();
        assert_eq!(limits.max_line_length, 64 * 1024 * 1024);
        assert_eq!(limits.max_depth, 128);
    }

    #[test]
    fn test_unlimited() {
        let limits = ParseLimits::unlimited();
        assert_eq!(limits.max_line_length, usize::MAX);
        assert_eq!(limits.max_depth, usize::MAX);
    }
}
