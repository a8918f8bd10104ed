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

//! Tile definitions and tile catalogs (`Init.txt`).
//!
//! ```
//! use leditor_serialization::tiles::{decode_tile_catalog, TileKind};
//!
//! let text = "-[\"Stone\", color(50, 50, 50)]\n\
//!             [#nm: \"Small Stone\", #tp: \"box\", #sz: point(1,1), #specs: [1], #specs2: [], #bftiles: 0]";
//! let catalog = decode_tile_catalog(text).unwrap();
//! let (category, tile) = catalog.iter().next().unwrap();
//! assert_eq!(category.name, "Stone");
//! assert_eq!(tile.kind, TileKind::Box);
//! ```

use crate::access::{
    cast, find, get, get_int, get_int_list, get_int_pair, get_optional, opt_int, to_int_list, to_string_list,
};
use crate::catalog::{import_catalog, parse_header, Catalog, Definition};
use crate::error::{DecodeError, ImportError};
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::source::read_text;
use crate::types::IntPoint;
use leditor_lingo::{Node, Property};
use std::fmt;
use std::path::Path;

/// How a tile is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Box,
    VoxelStruct,
    VoxelStructRandomDisplaceHorizontal,
    VoxelStructRandomDisplaceVertical,
    VoxelStructRockType,
    VoxelStructSandType,
}

impl TileKind {
    pub const ALL: [TileKind; 6] = [
        TileKind::Box,
        TileKind::VoxelStruct,
        TileKind::VoxelStructRandomDisplaceHorizontal,
        TileKind::VoxelStructRandomDisplaceVertical,
        TileKind::VoxelStructRockType,
        TileKind::VoxelStructSandType,
    ];

    /// The `tp` tag. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            TileKind::Box => "box",
            TileKind::VoxelStruct => "voxelStruct",
            TileKind::VoxelStructRandomDisplaceHorizontal => "voxelStructRandomDisplaceHorizontal",
            TileKind::VoxelStructRandomDisplaceVertical => "voxelStructRandomDisplaceVertical",
            TileKind::VoxelStructRockType => "voxelStructRockType",
            TileKind::VoxelStructSandType => "voxelStructSandType",
        }
    }

    /// Whether `repeatl` is required.
    pub fn requires_repeat(self) -> bool {
        self == TileKind::VoxelStruct
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A tile from a tile catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileDefinition {
    pub name: String,
    /// Width and height in matrix units, without the buffer.
    pub size: IntPoint,
    pub kind: TileKind,
    /// Extra margin the texture takes on every side.
    pub buffer_tiles: i32,
    /// Required geometry per unit tile, column-major. `-1` means "any".
    pub specs: Vec<i32>,
    pub specs2: Vec<i32>,
    pub specs3: Vec<i32>,
    /// Render repetitions per layer.
    pub repeat_layers: Vec<i32>,
    pub tags: Vec<String>,
    /// Number of random variations.
    pub rnd: i32,
}

impl TileDefinition {
    /// Geometry requirement of unit tile `(x, y)` on spec layer `layer`
    /// (0 to 2), or `-1` when the layer or position has none.
    pub fn spec_at(&self, x: i32, y: i32, layer: usize) -> i32 {
        if x < 0 || y < 0 || x >= self.size.x || y >= self.size.y {
            return -1;
        }
        let specs = match layer {
            0 => &self.specs,
            1 => &self.specs2,
            2 => &self.specs3,
            _ => return -1,
        };
        // x and y are non-negative here, and usize is at least 32 bits wide.
        let index = (x as usize)
            .checked_mul(self.size.y as usize)
            .and_then(|i| i.checked_add(y as usize));
        index.and_then(|i| specs.get(i)).copied().unwrap_or(-1)
    }

    /// Whether any unit tile has a requirement on `layer`.
    pub fn has_specs_layer(&self, layer: usize) -> bool {
        let specs = match layer {
            0 => &self.specs,
            1 => &self.specs2,
            2 => &self.specs3,
            _ => return false,
        };
        let cells = usize::try_from(self.size.x)
            .ok()
            .zip(usize::try_from(self.size.y).ok())
            .map_or(0, |(x, y)| x.saturating_mul(y));
        specs.iter().take(cells).any(|&spec| spec != -1)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Definition for TileDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Secondary spec layers. Catalogs write `0` for "no layer", so any
/// number reads as empty, like `void` and an absent key.
fn optional_layer(props: &[Property], key: &str) -> Result<Vec<i32>, DecodeError> {
    match find(props, key) {
        None | Some(Node::Number(_)) => Ok(Vec::new()),
        Some(Node::Symbol(s)) if s.eq_ignore_ascii_case("void") => Ok(Vec::new()),
        Some(node) => to_int_list(cast(node, key)?, key),
    }
}

fn decode_fields(props: &[Property], name: &str) -> Result<TileDefinition, DecodeError> {
    let size = get_int_pair(props, "sz")?;
    let tag: &str = get(props, "tp")?;
    let kind = TileKind::from_tag(tag).ok_or_else(|| DecodeError::invalid_value("tp", tag))?;
    let specs = get_int_list(props, "specs")?;
    let specs2 = optional_layer(props, "specs2")?;
    let specs3 = optional_layer(props, "specs3")?;
    let buffer_tiles = get_int(props, "bftiles")?;

    let repeat_layers = match get_optional::<&[Node]>(props, "repeatl")? {
        Some(list) => to_int_list(list, "repeatl")?,
        None if kind.requires_repeat() => return Err(DecodeError::missing("repeatl")),
        None => Vec::new(),
    };

    let tags = match get_optional::<&[Node]>(props, "tags")? {
        Some(list) => to_string_list(list, "tags")?,
        None => Vec::new(),
    };

    Ok(TileDefinition {
        name: name.to_string(),
        size,
        kind,
        buffer_tiles,
        specs,
        specs2,
        specs3,
        repeat_layers,
        tags,
        rnd: opt_int(props, "rnd", 1)?,
    })
}

/// Decodes one tile definition property list.
///
/// `nm` is read first. Every later error names the definition.
pub fn decode_tile_definition(node: &Node) -> Result<TileDefinition, DecodeError> {
    let props: &[Property] = cast(node, "tile definition")?;
    let name: &str = get(props, "nm")?;
    decode_fields(props, name).map_err(|e| e.within(name))
}

/// Imports a tile catalog with the given options.
///
/// # Errors
///
/// - [`ImportError::EmptyInput`] for blank text
/// - [`ImportError::Failed`] in strict mode, naming the first bad line
///
/// In permissive mode bad lines end up in the report instead.
pub fn decode_tile_catalog_with(
    text: &str,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<TileDefinition>>, ImportError> {
    import_catalog(text, options, "tiles", parse_header, decode_tile_definition)
}

/// Imports a tile catalog in strict mode.
pub fn decode_tile_catalog(text: &str) -> Result<Catalog<TileDefinition>, ImportError> {
    decode_tile_catalog_with(text, &DecodeOptions::strict()).map(|report| report.value)
}

/// Imports a tile catalog and drops the categories.
pub fn decode_tile_definitions_flat(
    text: &str,
    options: &DecodeOptions,
) -> Result<ImportReport<Vec<TileDefinition>>, ImportError> {
    decode_tile_catalog_with(text, options).map(|report| report.map(Catalog::into_definitions))
}

pub fn decode_tile_catalog_file(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<TileDefinition>>, ImportError> {
    decode_tile_catalog_with(&read_text(path)?, options)
}
