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

//! Lingo data literals: syntax tree and parser.
//!
//! Level files and the tile, material and prop catalogs are written as one
//! Lingo literal per line:
//!
//! ```text
//! [#nm: "Small Stone", #tp: "box", #sz: point(1, 1), #specs: [1], #bfTiles: 0]
//! ```
//!
//! This crate turns such a line into an untyped [`Node`] tree and writes a
//! tree back out as text. It knows nothing about tiles or props; the typed
//! decoding lives in `leditor-serialization`.
//!
//! # Example
//!
//! ```
//! use leditor_lingo::{parse, Node};
//!
//! let node = parse("[#sz: point(2, 3), #tags: [\"nonSolid\"]]").unwrap();
//! let entries = node.as_property_list().unwrap();
//! assert!(entries[0].key_matches("SZ"));
//!
//! // Display writes canonical text that parses back to the same tree.
//! assert_eq!(parse(&node.to_string()).unwrap(), node);
//! ```

mod error;
mod limits;
mod node;
mod parser;
mod span;

pub use error::SyntaxError;
pub use limits::ParseLimits;
pub use node::{GlobalCall, Node, NodeKind, Number, Property, UnaryKind, UnaryOperator};
pub use parser::{parse, parse_at_line, parse_with_limits};
pub use span::SourcePos;
