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

//! Decoder configuration.

use leditor_lingo::ParseLimits;

/// What to do when a unit of work fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// The first failure (in input order) aborts the whole decode.
    #[default]
    Strict,
    /// Failures are recorded and the remaining units are still returned.
    Permissive,
}

/// Options shared by every decoder entry point.
///
/// # Examples
///
/// ```
/// use leditor_serialization::{DecodeMode, DecodeOptions};
///
/// let opts = DecodeOptions::builder()
///     .permissive()
///     .parallel_threshold(1)
///     .max_threads(2)
///     .build();
/// assert_eq!(opts.mode, DecodeMode::Permissive);
/// assert_eq!(opts.max_threads, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
    /// Limits applied to every parsed line.
    pub limits: ParseLimits,
    /// Fewer units than this are decoded on the calling thread.
    pub parallel_threshold: usize,
    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    pub max_threads: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mode: DecodeMode::Strict,
            limits: ParseLimits::default(),
            parallel_threshold: 64,
            max_threads: None,
        }
    }
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn permissive() -> Self {
        Self {
            mode: DecodeMode::Permissive,
            ..Self::default()
        }
    }

    pub fn builder() -> DecodeOptionsBuilder {
        DecodeOptionsBuilder::new()
    }

    pub fn is_strict(&self) -> bool {
        self.mode == DecodeMode::Strict
    }
}

/// Fluent builder for [`DecodeOptions`].
#[derive(Debug, Clone, Default)]
pub struct DecodeOptionsBuilder {
    options: DecodeOptions,
}

impl DecodeOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: DecodeMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn strict(self) -> Self {
        self.mode(DecodeMode::Strict)
    }

    pub fn permissive(self) -> Self {
        self.mode(DecodeMode::Permissive)
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.options.limits = limits;
        self
    }

    pub fn max_line_length(mut self, length: usize) -> Self {
        self.options.limits.max_line_length = length;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.limits.max_depth = depth;
        self
    }

    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.options.parallel_threshold = threshold;
        self
    }

    /// Zero is treated as "use the global pool".
    pub fn max_threads(mut self, threads: usize) -> Self {
        self.options.max_threads = (threads > 0).then_some(threads);
        self
    }

    pub fn build(self) -> DecodeOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let opts = DecodeOptions::default();
        assert!(opts.is_strict());
        assert_eq!(opts.parallel_threshold, 64);
        assert_eq!(opts.max_threads, None);
        assert_eq!(opts, DecodeOptions::strict());
    }

    #[test]
    fn test_permissive_constructor() {
        let opts = DecodeOptions::permissive();
        assert_eq!(opts.mode, DecodeMode::Permissive);
        assert!(!opts.is_strict());
    }

    #[test]
    fn test_builder_chain() {
        let opts = DecodeOptions::builder()
            .permissive()
            .max_depth(16)
            .max_line_length(1024)
            .parallel_threshold(8)
            .build();
        assert_eq!(opts.mode, DecodeMode::Permissive);
        assert_eq!(opts.limits.max_depth, 16);
        assert_eq!(opts.limits.max_line_length, 1024);
        assert_eq!(opts.parallel_threshold, 8);
    }

    #[test]
    fn test_builder_zero_threads_means_global_pool() {
        assert_eq!(DecodeOptions::builder().max_threads(0).build().max_threads, None);
        assert_eq!(DecodeOptions::builder().max_threads(3).build().max_threads, Some(3));
    }

    #[test]
    fn test_builder_last_mode_wins() {
        let opts = DecodeOptions::builder().permissive().strict().build();
        assert!(opts.is_strict());
    }
}
