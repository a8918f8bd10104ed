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

//! Canonical fixtures, organized by what they feed:
//!
//! - **catalogs**: tile, material and prop catalog files
//! - **geometry**: geometry and tile-cell matrix lines
//! - **placements**: prop placement records and props lines
//! - **level**: whole project files through [`level::LevelBuilder`]
//! - **errors**: malformed Lingo lines

pub mod catalogs;
pub mod errors;
pub mod geometry;
pub mod level;
pub mod placements;
