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

//! Prop definitions from a prop catalog.

use crate::access::{cast, get, get_int_list, get_int_pair, get_optional, opt_bool, opt_float, opt_int};
use crate::catalog::{import_catalog, parse_header, Catalog, Definition};
use crate::error::{DecodeError, ImportError};
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::source::read_text;
use crate::types::IntPoint;
use leditor_lingo::{Node, Property};
use std::path::Path;

/// How a standard prop's sides are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorTreatment {
    #[default]
    Standard,
    Bevel,
}

impl ColorTreatment {
    pub fn tag(self) -> &'static str {
        match self {
            ColorTreatment::Standard => "standard",
            ColorTreatment::Bevel => "bevel",
        }
    }
}

/// Layered image props (`standard`, `variedStandard`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layered {
    pub size: IntPoint,
    pub repeat_layers: Vec<i32>,
    pub color_treatment: ColorTreatment,
    pub bevel: i32,
}

/// Variation settings shared by the varied kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variations {
    pub count: i32,
    /// Picked at random when placed.
    pub random: bool,
}

/// Shading parameters of soft props. All optional, zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftShading {
    pub round: i32,
    pub contour_exp: f32,
    pub self_shade: bool,
    pub highlight_border: f32,
    pub depth_affect_hilites: f32,
    pub shadow_border: f32,
    pub smooth_shading: i32,
}

/// Simulation parameters of rope props. All optional, zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RopeParams {
    pub segment_length: i32,
    pub collision_depth: i32,
    pub segment_radius: f32,
    pub gravity: f32,
    pub friction: f32,
    pub air_friction: f32,
    pub stiff: bool,
    pub edge_direction: f32,
    pub rigid: f32,
    pub self_push: f32,
    pub source_push: f32,
}

/// Placement type of a prop, with the fields that only that type has.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKind {
    Standard(Layered),
    VariedStandard(Layered, Variations),
    Soft(SoftShading),
    VariedSoft {
        pixel_size: IntPoint,
        variations: Variations,
        colorize: bool,
        shading: SoftShading,
    },
    ColoredSoft {
        pixel_size: IntPoint,
        colorize: bool,
        shading: SoftShading,
    },
    SimpleDecal,
    VariedDecal {
        pixel_size: IntPoint,
        variations: Variations,
    },
    Antimatter {
        contour_exp: f32,
    },
    SoftEffect,
    Long,
    CustomLong,
    CustomRope(RopeParams),
}

impl PropKind {
    /// The `tp` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            PropKind::Standard(_) => "standard",
            PropKind::VariedStandard(..) => "variedStandard",
            PropKind::Soft(_) => "soft",
            PropKind::VariedSoft { .. } => "variedSoft",
            PropKind::ColoredSoft { .. } => "coloredSoft",
            PropKind::SimpleDecal => "simpleDecal",
            PropKind::VariedDecal { .. } => "variedDecal",
            PropKind::Antimatter { .. } => "antimatter",
            PropKind::SoftEffect => "softEffect",
            PropKind::Long => "long",
            PropKind::CustomLong => "customLong",
            PropKind::CustomRope(_) => "customRope",
        }
    }

    pub fn variations(&self) -> Option<Variations> {
        match self {
            PropKind::VariedStandard(_, v)
            | PropKind::VariedSoft { variations: v, .. }
            | PropKind::VariedDecal { variations: v, .. } => Some(*v),
            _ => None,
        }
    }

    /// Placements of varied kinds must name a variation.
    pub fn is_varied(&self) -> bool {
        self.variations().is_some()
    }

    pub fn is_rope(&self) -> bool {
        matches!(self, PropKind::CustomRope(_))
    }

    /// Whether placements may override the render depth.
    pub fn accepts_custom_depth(&self) -> bool {
        matches!(
            self,
            PropKind::Soft(_)
                | PropKind::VariedSoft { .. }
                | PropKind::SimpleDecal
                | PropKind::VariedDecal { .. }
                | PropKind::SoftEffect
                | PropKind::Antimatter { .. }
        )
    }

    /// Whether placements may carry an `applycolor` flag.
    pub fn accepts_apply_color(&self) -> bool {
        matches!(self, PropKind::VariedSoft { colorize: true, .. } | PropKind::CustomRope(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropDefinition {
    pub name: String,
    /// Number of sublayers the prop occupies.
    pub depth: i32,
    pub kind: PropKind,
}

impl Definition for PropDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

fn layered(props: &[Property]) -> Result<Layered, DecodeError> {
    let color_treatment = match get_optional::<&str>(props, "colortreatment")? {
        None => ColorTreatment::Standard,
        Some(tag) if tag.eq_ignore_ascii_case("standard") => ColorTreatment::Standard,
        Some(tag) if tag.eq_ignore_ascii_case("bevel") => ColorTreatment::Bevel,
        Some(tag) => return Err(DecodeError::invalid_value("colortreatment", tag)),
    };
    Ok(Layered {
        size: get_int_pair(props, "sz")?,
        repeat_layers: get_int_list(props, "repeatl")?,
        color_treatment,
        bevel: opt_int(props, "bevel", 0)?,
    })
}

fn variations(props: &[Property]) -> Result<Variations, DecodeError> {
    Ok(Variations {
        count: opt_int(props, "vars", 1)?,
        random: opt_bool(props, "random", false)?,
    })
}

fn shading(props: &[Property]) -> Result<SoftShading, DecodeError> {
    Ok(SoftShading {
        round: opt_int(props, "round", 0)?,
        contour_exp: opt_float(props, "contourexp", 0.0)?,
        self_shade: opt_bool(props, "selfshade", false)?,
        highlight_border: opt_float(props, "highlightborder", 0.0)?,
        depth_affect_hilites: opt_float(props, "depthaffecthilites", 0.0)?,
        shadow_border: opt_float(props, "shadowborder", 0.0)?,
        smooth_shading: opt_int(props, "smoothshading", 0)?,
    })
}

fn rope(props: &[Property]) -> Result<RopeParams, DecodeError> {
    Ok(RopeParams {
        segment_length: opt_int(props, "segmentlength", 0)?,
        collision_depth: opt_int(props, "collisiondepth", 0)?,
        segment_radius: opt_float(props, "segradius", 0.0)
            .and_then(|fallback| opt_float(props, "segmentradius", fallback))?,
        gravity: opt_float(props, "grav", 0.0)?,
        friction: opt_float(props, "friction", 0.0)?,
        air_friction: opt_float(props, "airfric", 0.0)?,
        stiff: opt_bool(props, "stiff", false)?,
        edge_direction: opt_float(props, "edgedirection", 0.0)?,
        rigid: opt_float(props, "rigid", 0.0)?,
        self_push: opt_float(props, "selfpush", 0.0)?,
        source_push: opt_float(props, "sourcepush", 0.0)?,
    })
}

fn decode_kind(props: &[Property], tag: &str) -> Result<PropKind, DecodeError> {
    let pixel_size = || get_int_pair(props, "pxlsize");
    let colorize = || opt_bool(props, "colorize", false);

    Ok(match tag {
        "standard" => PropKind::Standard(layered(props)?),
        "variedStandard" => PropKind::VariedStandard(layered(props)?, variations(props)?),
        "soft" => PropKind::Soft(shading(props)?),
        "variedSoft" => PropKind::VariedSoft {
            pixel_size: pixel_size()?,
            variations: variations(props)?,
            colorize: colorize()?,
            shading: shading(props)?,
        },
        "coloredSoft" => PropKind::ColoredSoft {
            pixel_size: pixel_size()?,
            colorize: colorize()?,
            shading: shading(props)?,
        },
        "simpleDecal" => PropKind::SimpleDecal,
        "variedDecal" => PropKind::VariedDecal {
            pixel_size: pixel_size()?,
            variations: variations(props)?,
        },
        "antimatter" => PropKind::Antimatter {
            contour_exp: opt_float(props, "contourexp", 0.0)?,
        },
        "softEffect" => PropKind::SoftEffect,
        "long" => PropKind::Long,
        "customLong" => PropKind::CustomLong,
        "customRope" => PropKind::CustomRope(rope(props)?),
        other => return Err(DecodeError::invalid_value("tp", other)),
    })
}

/// Decodes one prop definition property list.
pub fn decode_prop_definition(node: &Node) -> Result<PropDefinition, DecodeError> {
    let props: &[Property] = cast(node, "prop definition")?;
    let name: &str = get(props, "nm")?;
    let fields = || -> Result<PropDefinition, DecodeError> {
        let tag: &str = get(props, "tp")?;
        Ok(PropDefinition {
            name: name.to_string(),
            depth: opt_int(props, "depth", 0)?,
            kind: decode_kind(props, tag)?,
        })
    };
    fields().map_err(|e| e.within(name))
}

/// Imports a prop catalog with the given options.
///
/// # Errors
///
/// [`ImportError::EmptyInput`] for blank text, and in strict mode
/// [`ImportError::Failed`] naming the first bad line.
pub fn decode_prop_catalog_with(
    text: &str,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<PropDefinition>>, ImportError> {
    import_catalog(text, options, "props", parse_header, decode_prop_definition)
}

/// Imports a prop catalog in strict mode.
pub fn decode_prop_catalog(text: &str) -> Result<Catalog<PropDefinition>, ImportError> {
    decode_prop_catalog_with(text, &DecodeOptions::strict()).map(|report| report.value)
}

pub fn decode_prop_catalog_file(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<PropDefinition>>, ImportError> {
    decode_prop_catalog_with(&read_text(path)?, options)
}
