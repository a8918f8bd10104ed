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

//! Shared test fixtures for the Leditor decoders.
//!
//! Everything here produces Lingo *text*, so the fixtures exercise the
//! parser as well as the decoders that consume them.
//!
//! # Quick Start
//!
//! ```rust
//! use leditor_test::fixtures::{catalogs, geometry, level::LevelBuilder};
//!
//! // Canonical catalogs
//! let tiles = catalogs::TILES;
//! let scenario = catalogs::scenario_c_tiles();
//! assert_eq!(scenario.lines().count(), 10);
//!
//! // Generated geometry: solid floor, air above
//! let geo = geometry::geometry_line(4, 3, |_, row| {
//!     if row == 2 { geometry::SOLID.into() } else { geometry::AIR.into() }
//! });
//!
//! // A whole project file with one cell overridden
//! let project = LevelBuilder::new(4, 3)
//!     .geometry_cell(0, 0, "[[1, []], [1, []], [0, []]]")
//!     .build();
//! assert!(project.lines().count() >= 8);
//! ```

pub mod fixtures;
