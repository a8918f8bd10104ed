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

//! Prop placements of a level.
//!
//! A placement is a five-element list:
//!
//! ```text
//! [-2, "Wire", point(3, 1), [point(0, 0), point(20, 0), point(20, 20), point(0, 20)],
//!  [#settings: [#renderorder: 0, #seed: 400, #release: 1], #points: [point(1, 1)]]]
//! ```
//!
//! The settings that must or may appear depend on the kind of the named
//! definition, so every placement is resolved against a [`PropIndex`]
//! before its settings are read. Placements are independent of each other
//! once the index exists: an unresolved name fails that placement only.

use crate::access::{cast, find, get, opt_int, to_bool, to_float, to_int, to_int_pair, to_point, to_quad};
use crate::catalog::Catalog;
use crate::error::{DecodeError, Failure, ImportError, Unit};
use crate::fanout;
use crate::options::DecodeOptions;
use crate::props::PropDefinition;
use crate::report::ImportReport;
use crate::tiles::TileDefinition;
use crate::types::{IntPoint, Quad, Vec2};
use leditor_lingo::{parse_with_limits, Node, Property};
use std::collections::HashMap;
use tracing::debug;

/// Which end of a rope is left free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RopeRelease {
    Left,
    Right,
    #[default]
    None,
}

impl RopeRelease {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(RopeRelease::Left),
            0 => Some(RopeRelease::None),
            1 => Some(RopeRelease::Right),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RopeRelease::Left => -1,
            RopeRelease::None => 0,
            RopeRelease::Right => 1,
        }
    }
}

/// Settings only rope placements have.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RopeSettings {
    pub release: RopeRelease,
    pub thickness: Option<f32>,
    /// Simulated segment positions, in raw file units.
    pub points: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropSettings {
    pub render_order: i32,
    pub seed: i32,
    pub render_time: i32,
    pub variation: Option<i32>,
    pub custom_depth: Option<i32>,
    pub apply_color: Option<bool>,
    pub rope: Option<RopeSettings>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropPlacement {
    /// Sublayer the prop starts at, as written (zero or negative).
    pub depth: i32,
    pub name: String,
    /// Category and index of the definition in the catalog it came from.
    pub catalog_position: IntPoint,
    /// Footprint in raw file units.
    pub quad: Quad,
    pub settings: PropSettings,
}

/// What a placement name resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropTarget<'a> {
    Prop(&'a PropDefinition),
    /// A tile placed as a prop.
    Tile(&'a TileDefinition),
}

/// Name lookup for placements. Props shadow tiles of the same name.
#[derive(Debug, Clone, Default)]
pub struct PropIndex {
    props: HashMap<String, PropDefinition>,
    tiles: HashMap<String, TileDefinition>,
}

impl PropIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: &Catalog<PropDefinition>) -> Self {
        Self {
            props: catalog.to_map(),
            tiles: HashMap::new(),
        }
    }

    /// Lets placements name tiles too.
    pub fn with_tiles(mut self, catalog: &Catalog<TileDefinition>) -> Self {
        self.tiles = catalog.to_map();
        self
    }

    /// Adds a definition unless one of that name exists.
    pub fn insert(&mut self, definition: PropDefinition) {
        self.props.entry(definition.name.clone()).or_insert(definition);
    }

    pub fn resolve(&self, name: &str) -> Option<PropTarget<'_>> {
        self.props
            .get(name)
            .map(PropTarget::Prop)
            .or_else(|| self.tiles.get(name).map(PropTarget::Tile))
    }

    pub fn len(&self) -> usize {
        self.props.len() + self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.tiles.is_empty()
    }
}

impl From<HashMap<String, PropDefinition>> for PropIndex {
    fn from(props: HashMap<String, PropDefinition>) -> Self {
        Self {
            props,
            tiles: HashMap::new(),
        }
    }
}

fn opt_setting(settings: &[Property], key: &str) -> Result<Option<i32>, DecodeError> {
    find(settings, key).map(|node| to_int(node, key)).transpose()
}

fn rope_settings(settings: &[Property], extras: &[Property]) -> Result<RopeSettings, DecodeError> {
    let code = to_int(get::<&Node>(settings, "release")?, "release")?;
    let release = RopeRelease::from_code(code).ok_or_else(|| DecodeError::invalid_value("release", code.to_string()))?;
    let thickness = find(settings, "thickness")
        .map(|node| to_float(node, "thickness"))
        .transpose()?;
    let points: &[Node] = get(extras, "points")?;
    let points = points
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let key = format!("points[{}]", i);
            to_point(cast(node, &key)?, &key)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RopeSettings {
        release,
        thickness,
        points,
    })
}

fn decode_settings(extras: &[Property], target: PropTarget<'_>) -> Result<PropSettings, DecodeError> {
    let settings: &[Property] = get(extras, "settings")?;
    let mut decoded = PropSettings {
        render_order: opt_int(settings, "renderorder", 0)?,
        seed: opt_int(settings, "seed", 0)?,
        render_time: opt_int(settings, "rendertime", 0)?,
        ..PropSettings::default()
    };

    let PropTarget::Prop(definition) = target else {
        return Ok(decoded);
    };
    let kind = &definition.kind;
    if kind.is_varied() {
        decoded.variation = Some(to_int(get::<&Node>(settings, "variation")?, "variation")?);
    }
    if kind.accepts_custom_depth() {
        decoded.custom_depth = opt_setting(settings, "customdepth")?;
    }
    if kind.accepts_apply_color() {
        decoded.apply_color = find(settings, "applycolor")
            .map(|node| to_bool(node, "applycolor"))
            .transpose()?;
    }
    if kind.is_rope() {
        decoded.rope = Some(rope_settings(settings, extras)?);
    }
    Ok(decoded)
}

/// Decodes one placement against `index`.
///
/// # Errors
///
/// [`DecodeError::DefinitionNotFound`] when `index` has no entry for the
/// name. Shape and settings errors carry the name.
pub fn decode_placement(node: &Node, index: &PropIndex) -> Result<PropPlacement, DecodeError> {
    let fields: &[Node] = cast(node, "placement")?;
    if fields.len() != 5 {
        return Err(DecodeError::shape(
            "placement",
            format!("expected 5 elements, found {}", fields.len()),
        ));
    }
    let depth = to_int(&fields[0], "depth")?;
    let name: &str = cast(&fields[1], "name")?;
    let target = index.resolve(name).ok_or_else(|| DecodeError::not_found(name))?;

    let rest = || -> Result<PropPlacement, DecodeError> {
        let catalog_position = to_int_pair(cast(&fields[2], "position")?, "position")?;
        let quad = to_quad(cast(&fields[3], "quad")?, "quad")?;
        let extras: &[Property] = cast(&fields[4], "extras")?;
        Ok(PropPlacement {
            depth,
            name: name.to_string(),
            catalog_position,
            quad,
            settings: decode_settings(extras, target)?,
        })
    };
    rest().map_err(|e| e.within(name))
}

/// Decodes a parsed props line: `[#props: [...], ...]` or a bare list.
///
/// # Errors
///
/// [`ImportError::Invalid`] when there is no placement list, and in
/// strict mode [`ImportError::Failed`] for the first bad placement.
pub fn decode_prop_placements_node(
    node: &Node,
    index: &PropIndex,
    options: &DecodeOptions,
) -> Result<ImportReport<Vec<PropPlacement>>, ImportError> {
    let list: &[Node] = match node {
        Node::PropertyList(props) => get(props, "props").map_err(ImportError::Invalid)?,
        other => cast(other, "props").map_err(ImportError::Invalid)?,
    };
    debug!(placements = list.len(), definitions = index.len(), "decoding placements");

    let decoded = fanout::map_units(options, list.len(), |i| decode_placement(&list[i], index))?;

    let mut placements = Vec::with_capacity(list.len());
    let mut failures = Vec::new();
    for (i, result) in decoded.into_iter().enumerate() {
        match result {
            Ok(placement) => placements.push(placement),
            Err(error) => failures.push(Failure::new(Unit::Placement(i), error)),
        }
    }
    ImportReport::new(placements, list.len(), failures).finish(options, "placements")
}

/// Decodes the props line of a level.
pub fn decode_prop_placements_with(
    text: &str,
    index: &PropIndex,
    options: &DecodeOptions,
) -> Result<ImportReport<Vec<PropPlacement>>, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let node = parse_with_limits(text, &options.limits).map_err(|e| ImportError::Invalid(e.into()))?;
    decode_prop_placements_node(&node, index, options)
}

/// Decodes the props line of a level in strict mode.
pub fn decode_prop_placements(text: &str, index: &PropIndex) -> Result<Vec<PropPlacement>, ImportError> {
    decode_prop_placements_with(text, index, &DecodeOptions::strict()).map(|report| report.value)
}
