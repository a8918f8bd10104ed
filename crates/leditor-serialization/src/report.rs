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

//! Outcome of a decode: the value plus per-unit failures.

use crate::error::{Failure, ImportError};
use crate::options::{DecodeMode, DecodeOptions};
use tracing::{info, warn};

/// A decoded value together with the units that did not make it in.
///
/// In strict mode an entry point never returns a report with failures; the
/// first one becomes its error instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport<T> {
    pub value: T,
    /// Number of units attempted.
    pub total: usize,
    /// Failed units, in input order.
    pub failures: Vec<Failure>,
}

impl<T> ImportReport<T> {
    pub fn new(value: T, total: usize, failures: Vec<Failure>) -> Self {
        Self {
            value,
            total,
            failures,
        }
    }

    /// A report with no failures.
    pub fn clean(value: T, total: usize) -> Self {
        Self::new(value, total, Vec::new())
    }

    pub fn imported(&self) -> usize {
        self.total.saturating_sub(self.failures.len())
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `"N of M records imported, K failed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} records imported, {} failed",
            self.imported(),
            self.total,
            self.failed()
        )
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ImportReport<U> {
        ImportReport {
            value: f(self.value),
            total: self.total,
            failures: self.failures,
        }
    }

    /// The value, or the first failure as an error.
    pub fn into_result(self) -> Result<T, ImportError> {
        match self.failures.into_iter().next() {
            Some(first) => Err(ImportError::Failed(first)),
            None => Ok(self.value),
        }
    }

    /// Applies `options.mode`: strict turns the first failure into an error,
    /// permissive logs every failure and keeps the report.
    pub(crate) fn finish(self, options: &DecodeOptions, what: &str) -> Result<Self, ImportError> {
        match options.mode {
            DecodeMode::Strict => {
                if let Some(first) = self.failures.first() {
                    return Err(ImportError::Failed(first.clone()));
                }
            }
            DecodeMode::Permissive => {
                for failure in &self.failures {
                    warn!(%failure, "dropped {} unit", what);
                }
            }
        }
        info!("{}: {}", what, self.summary());
        Ok(self)
    }
}
