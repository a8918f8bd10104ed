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

//! Level project files.
//!
//! A project is one Lingo value per line:
//!
//! | Line | Content |
//! |------|---------|
//! | 1 | geometry matrix |
//! | 2 | tile matrix and default material |
//! | 3 | `effects` |
//! | 4 | `lightangle`, `flatness` |
//! | 5 | `defaultterrain` |
//! | 6 | `extratiles`, `light`, `tileseed` |
//! | 7 | `cameras`, `quads`, `size` |
//! | 8 | `waterlevel`, `waterinfront` |
//! | 9 | prop placements (optional) |
//!
//! Every line but the last is required. The props line is decoded last and
//! its failure is kept on the project instead of failing the load.

use crate::access::{cast, find, get, get_int, opt_bool, to_float, to_int_list, to_int_pair, to_point};
use crate::effects::{decode_effects_node, Effect};
use crate::error::{DecodeError, Failure, ImportError};
use crate::geometry::{decode_geometry_node, GeoMatrix};
use crate::options::DecodeOptions;
use crate::props::{decode_prop_placements_node, PropIndex, PropPlacement};
use crate::report::ImportReport;
use crate::source::{numbered_lines, read_text};
use crate::tile_matrix::{decode_tile_matrix_node, TileLayer};
use crate::types::{IntPoint, Vec2};
use leditor_lingo::{parse_at_line, Node, Property};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Lines a project must have.
pub const REQUIRED_LINES: usize = 8;

const PROPS_LINE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightSettings {
    pub angle: i32,
    pub flatness: i32,
}

/// Extra tiles around the playable area, per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferTiles {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Offset of one camera corner in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraCorner {
    pub angle: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub position: Vec2,
    /// Top left, top right, bottom right, bottom left.
    pub quad: [CameraCorner; 4],
}

/// A unit dropped while loading a project in permissive mode.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelFailure {
    pub line: usize,
    pub failure: Failure,
}

impl fmt::Display for LevelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.failure)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelProject {
    pub geometry: GeoMatrix,
    pub tiles: TileLayer,
    /// Effect layers, each sized like the geometry.
    pub effects: Vec<Effect>,
    pub light: LightSettings,
    /// Whether the level floor is solid.
    pub default_terrain: bool,
    pub buffer_tiles: BufferTiles,
    pub light_enabled: bool,
    pub tile_seed: i32,
    pub cameras: Vec<Camera>,
    /// Width and height in cells.
    pub size: IntPoint,
    pub water_level: i32,
    pub water_in_front: bool,
    pub props: Vec<PropPlacement>,
    /// Why the props line could not be loaded, if it could not.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub props_error: Option<ImportError>,
    /// Cells, effects and placements dropped in permissive mode.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub failures: Vec<LevelFailure>,
}

impl LevelProject {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.props_error.is_none()
    }
}

fn section_props(node: &Node) -> Result<&[Property], DecodeError> {
    cast(node, "line")
}

fn decode_light(node: &Node) -> Result<LightSettings, DecodeError> {
    let props = section_props(node)?;
    Ok(LightSettings {
        angle: get_int(props, "lightangle")?,
        flatness: get_int(props, "flatness")?,
    })
}

fn decode_terrain(node: &Node) -> Result<bool, DecodeError> {
    Ok(get_int(section_props(node)?, "defaultterrain")? == 1)
}

fn decode_buffer_tiles(list: &[Node]) -> Result<BufferTiles, DecodeError> {
    let sides = to_int_list(list, "extratiles")?;
    let [left, top, right, bottom] = sides[..] else {
        return Err(DecodeError::shape(
            "extratiles",
            format!("expected 4 sides, found {}", sides.len()),
        ));
    };
    Ok(BufferTiles {
        left,
        top,
        right,
        bottom,
    })
}

struct General {
    buffer_tiles: BufferTiles,
    light_enabled: bool,
    tile_seed: i32,
}

fn decode_general(node: &Node) -> Result<General, DecodeError> {
    let props = section_props(node)?;
    Ok(General {
        buffer_tiles: decode_buffer_tiles(get(props, "extratiles")?)?,
        light_enabled: opt_bool(props, "light", true)?,
        tile_seed: get_int(props, "tileseed")?,
    })
}

fn decode_camera_quad(node: &Node, key: &str) -> Result<[CameraCorner; 4], DecodeError> {
    let corners: &[Node] = cast(node, key)?;
    if corners.len() != 4 {
        return Err(DecodeError::shape(
            key,
            format!("a quad has 4 corners, found {}", corners.len()),
        ));
    }
    let mut quad = [CameraCorner::default(); 4];
    for (slot, corner) in quad.iter_mut().zip(corners) {
        let pair: &[Node] = cast(corner, key)?;
        if pair.len() != 2 {
            return Err(DecodeError::shape(
                key,
                format!("a corner is [angle, radius], found {} elements", pair.len()),
            ));
        }
        *slot = CameraCorner {
            angle: to_float(&pair[0], key)?,
            radius: to_float(&pair[1], key)?,
        };
    }
    Ok(quad)
}

/// Cameras and the optional level size.
fn decode_cameras(node: &Node) -> Result<(Vec<Camera>, Option<IntPoint>), DecodeError> {
    let props = section_props(node)?;
    let positions: &[Node] = get(props, "cameras")?;
    let quads: &[Node] = match find(props, "quads") {
        Some(node) => cast(node, "quads")?,
        None => &[],
    };

    let mut cameras = Vec::with_capacity(positions.len());
    for (i, position) in positions.iter().enumerate() {
        let key = format!("cameras[{}]", i);
        let quad = match quads.get(i) {
            Some(quad) => decode_camera_quad(quad, &format!("quads[{}]", i))?,
            None => [CameraCorner::default(); 4],
        };
        cameras.push(Camera {
            position: to_point(cast(position, &key)?, &key)?,
            quad,
        });
    }

    let size = match find(props, "size") {
        Some(node) => Some(to_int_pair(cast(node, "size")?, "size")?),
        None => None,
    };
    Ok((cameras, size))
}

fn decode_water(node: &Node) -> Result<(i32, bool), DecodeError> {
    let props = section_props(node)?;
    let level = get_int(props, "waterlevel")?;
    let in_front = get_int(props, "waterinfront")? != 0;
    Ok((level, in_front))
}

/// Collects the failures of a section report, tagged with its line.
fn take_failures<T>(report: ImportReport<T>, line: usize, failures: &mut Vec<LevelFailure>) -> T {
    failures.extend(
        report
            .failures
            .into_iter()
            .map(|failure| LevelFailure { line, failure }),
    );
    report.value
}

/// Decodes a project file's text.
///
/// `props` resolves the names on the props line; without it the line is
/// not decoded. Geometry and tile cells, effects and placements follow
/// `options.mode`.
///
/// # Errors
///
/// - [`ImportError::EmptyInput`] for blank text
/// - [`ImportError::Invalid`] with fewer than [`REQUIRED_LINES`] lines
/// - [`ImportError::Section`] naming the line of any other failure
///
/// A props line that fails is stored in [`LevelProject::props_error`]
/// instead.
pub fn decode_level_with(
    text: &str,
    props: Option<&PropIndex>,
    options: &DecodeOptions,
) -> Result<LevelProject, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let lines: Vec<&str> = numbered_lines(text).map(|(_, line)| line).collect();
    if lines.len() < REQUIRED_LINES {
        return Err(ImportError::Invalid(DecodeError::shape(
            "level",
            format!("expected at least {} lines, found {}", REQUIRED_LINES, lines.len()),
        )));
    }
    debug!(lines = lines.len(), "decoding level project");

    let parse = |line: usize| -> Result<Node, ImportError> {
        parse_at_line(lines[line - 1].trim(), line, &options.limits)
            .map_err(|e| ImportError::Invalid(e.into()).in_section(line))
    };
    let section = |line: usize, err: DecodeError| ImportError::Invalid(err).in_section(line);

    let mut failures = Vec::new();

    let geometry = decode_geometry_node(&parse(1)?, options).map_err(|e| e.in_section(1))?;
    let geometry = take_failures(geometry, 1, &mut failures);

    let tiles = decode_tile_matrix_node(&parse(2)?, options).map_err(|e| e.in_section(2))?;
    let tiles = take_failures(tiles, 2, &mut failures);

    let dimensions = (geometry.width(), geometry.height());
    let effects = decode_effects_node(&parse(3)?, Some(dimensions), options).map_err(|e| e.in_section(3))?;
    let effects = take_failures(effects, 3, &mut failures);

    let light = decode_light(&parse(4)?).map_err(|e| section(4, e))?;
    let default_terrain = decode_terrain(&parse(5)?).map_err(|e| section(5, e))?;
    let general = decode_general(&parse(6)?).map_err(|e| section(6, e))?;
    let (cameras, size) = decode_cameras(&parse(7)?).map_err(|e| section(7, e))?;
    let (water_level, water_in_front) = decode_water(&parse(8)?).map_err(|e| section(8, e))?;

    let size = size.unwrap_or_else(|| {
        IntPoint::new(
            i32::try_from(geometry.width()).unwrap_or(i32::MAX),
            i32::try_from(geometry.height()).unwrap_or(i32::MAX),
        )
    });

    let mut placements = Vec::new();
    let mut props_error = None;
    let props_text = lines.get(PROPS_LINE - 1).map(|line| line.trim()).unwrap_or_default();
    if let (Some(index), false) = (props, props_text.is_empty()) {
        match parse(PROPS_LINE).and_then(|node| {
            decode_prop_placements_node(&node, index, options).map_err(|e| e.in_section(PROPS_LINE))
        }) {
            Ok(report) => placements = take_failures(report, PROPS_LINE, &mut failures),
            Err(err) => {
                warn!(error = %err, "props could not be loaded");
                props_error = Some(err);
            }
        }
    }

    Ok(LevelProject {
        geometry,
        tiles,
        effects,
        light,
        default_terrain,
        buffer_tiles: general.buffer_tiles,
        light_enabled: general.light_enabled,
        tile_seed: general.tile_seed,
        cameras,
        size,
        water_level,
        water_in_front,
        props: placements,
        props_error,
        failures,
    })
}

/// Decodes a project in strict mode.
pub fn decode_level(text: &str, props: Option<&PropIndex>) -> Result<LevelProject, ImportError> {
    decode_level_with(text, props, &DecodeOptions::strict())
}

pub fn decode_level_file(
    path: impl AsRef<Path>,
    props: Option<&PropIndex>,
    options: &DecodeOptions,
) -> Result<LevelProject, ImportError> {
    decode_level_with(&read_text(path)?, props, options)
}
