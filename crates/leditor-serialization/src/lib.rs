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

//! Typed decoders for Lingo level data.
//!
//! Turns the untyped trees of `leditor-lingo` into validated records:
//!
//! - [`geometry`]: the per-cell geometry matrix of a level
//! - [`tile_matrix`]: the per-cell tile and material matrix of a level
//! - [`tiles`], [`materials`], [`props`]: catalogs grouped by category
//! - [`props`]: prop placements, resolved against a prop catalog
//! - [`effects`]: effect layers painted over a level
//! - [`level`]: whole project files
//!
//! All decoders read nodes through [`access`], report problems as
//! [`DecodeError`] and run in one of two [`DecodeMode`]s. Strict mode fails
//! on the first bad unit (line, cell or placement, lowest index first).
//! Permissive mode keeps going and returns an [`ImportReport`] listing every
//! unit it dropped.
//!
//! # Example
//!
//! ```
//! use leditor_serialization::{tiles, DecodeOptions};
//!
//! let text = "-[\"Stone\", color(50, 50, 50)]\n\
//!             [#nm: \"Small Stone\", #tp: \"box\", #sz: point(1, 1), #specs: [1], #bftiles: 0]\n\
//!             [#nm: \"Broken\", #tp: \"box\"]";
//!
//! assert!(tiles::decode_tile_catalog(text).is_err());
//!
//! let report = tiles::decode_tile_catalog_with(text, &DecodeOptions::permissive()).unwrap();
//! assert_eq!(report.summary(), "1 of 2 records imported, 1 failed");
//! assert_eq!(report.value.group("Stone").unwrap().definitions[0].name, "Small Stone");
//! ```
//!
//! Large matrices and catalogs are decoded on the rayon pool once they pass
//! [`DecodeOptions::parallel_threshold`] units. Results do not depend on
//! whether a decode ran in parallel.

pub mod access;
pub mod catalog;
pub mod effects;
pub mod encode;
mod error;
mod fanout;
pub mod geometry;
pub mod level;
pub mod materials;
pub mod matrix;
mod options;
pub mod props;
mod report;
pub mod source;
pub mod tile_matrix;
pub mod tiles;
pub mod types;

pub use catalog::{Catalog, Category, CategoryGroup, Definition};
pub use encode::Encode;
pub use error::{DecodeError, ErrorKind, Failure, ImportError, Unit};
pub use options::{DecodeMode, DecodeOptions, DecodeOptionsBuilder};
pub use report::ImportReport;
