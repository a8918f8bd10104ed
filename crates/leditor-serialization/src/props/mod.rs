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

//! Prop catalogs and prop placements.
//!
//! # Module Structure
//!
//! - `definition`: prop kinds and the prop catalog importer
//! - `placement`: per-level placements, resolved through a [`PropIndex`]
//!
//! Placements can only be decoded once a catalog has been imported:
//!
//! ```
//! use leditor_serialization::props::{decode_prop_catalog, decode_prop_placements, PropIndex};
//!
//! let catalog = decode_prop_catalog(
//!     "-[\"Misc\", color(0, 0, 0)]\n[#nm: \"Moss\", #tp: \"soft\"]",
//! )
//! .unwrap();
//! let index = PropIndex::from_catalog(&catalog);
//!
//! let line = "[#props: [[-1, \"Moss\", point(1, 1), \
//!     [point(0, 0), point(20, 0), point(20, 20), point(0, 20)], \
//!     [#settings: [#renderorder: 0, #seed: 12, #rendertime: 0]]]]]";
//! let placements = decode_prop_placements(line, &index).unwrap();
//! assert_eq!(placements[0].settings.seed, 12);
//! ```

mod definition;
mod placement;

pub use definition::{
    decode_prop_catalog, decode_prop_catalog_file, decode_prop_catalog_with, decode_prop_definition,
    ColorTreatment, Layered, PropDefinition, PropKind, RopeParams, SoftShading, Variations,
};
pub use placement::{
    decode_placement, decode_prop_placements, decode_prop_placements_node, decode_prop_placements_with,
    PropIndex, PropPlacement, PropSettings, PropTarget, RopeRelease, RopeSettings,
};
