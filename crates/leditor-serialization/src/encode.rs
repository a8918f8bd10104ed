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

//! Writing records back out as Lingo text.
//!
//! Every record encodes to a node its decoder accepts and decodes back to
//! an equal record. Optional fields are written only when they carry
//! information the decoder would not default to.
//!
//! ```
//! use leditor_serialization::encode::Encode;
//! use leditor_serialization::tiles::{decode_tile_definition, TileDefinition, TileKind};
//! use leditor_serialization::types::IntPoint;
//!
//! let tile = TileDefinition {
//!     name: "Small Stone".into(),
//!     size: IntPoint::new(1, 1),
//!     kind: TileKind::Box,
//!     buffer_tiles: 0,
//!     specs: vec![1],
//!     specs2: vec![],
//!     specs3: vec![],
//!     repeat_layers: vec![1],
//!     tags: vec![],
//!     rnd: 1,
//! };
//! let node = leditor_lingo::parse(&tile.encode()).unwrap();
//! assert_eq!(decode_tile_definition(&node).unwrap(), tile);
//! ```

use crate::catalog::{Catalog, Category};
use crate::effects::{Effect, EffectMatrix, EffectOption, OptionChoice};
use crate::geometry::GeoCell;
use crate::materials::MaterialDefinition;
use crate::matrix::Matrix3;
use crate::props::{PropDefinition, PropKind, PropPlacement};
use crate::tile_matrix::{TileCell, TileLayer};
use crate::tiles::TileDefinition;
use crate::types::{Color, IntPoint, Quad, Vec2};
use leditor_lingo::Node;

/// A record that can be written as a Lingo literal.
pub trait Encode {
    fn to_node(&self) -> Node;

    /// Canonical single-line text.
    fn encode(&self) -> String {
        self.to_node().to_string()
    }
}

fn int(value: i32) -> Node {
    Node::int(i64::from(value))
}

fn float(value: f32) -> Node {
    Node::decimal(f64::from(value))
}

fn flag(value: bool) -> Node {
    int(i32::from(value))
}

fn ints(values: &[i32]) -> Node {
    Node::List(values.iter().copied().map(int).collect())
}

fn strings(values: &[String]) -> Node {
    Node::List(values.iter().map(Node::string).collect())
}

// ==================== Shared shapes ====================

impl Encode for IntPoint {
    fn to_node(&self) -> Node {
        Node::call("point", vec![int(self.x), int(self.y)])
    }
}

impl Encode for Vec2 {
    fn to_node(&self) -> Node {
        Node::call("point", vec![float(self.x), float(self.y)])
    }
}

impl Encode for Color {
    fn to_node(&self) -> Node {
        Node::call(
            "color",
            vec![
                int(i32::from(self.r)),
                int(i32::from(self.g)),
                int(i32::from(self.b)),
            ],
        )
    }
}

impl Encode for Quad {
    fn to_node(&self) -> Node {
        Node::List(self.corners().iter().map(Encode::to_node).collect())
    }
}

/// The list form, `["Name", color(r, g, b)]`.
impl Encode for Category {
    fn to_node(&self) -> Node {
        Node::List(vec![Node::string(&self.name), self.color.to_node()])
    }
}

// ==================== Matrices ====================

impl Encode for GeoCell {
    fn to_node(&self) -> Node {
        Node::List(vec![int(self.kind.code()), ints(&self.features.ids())])
    }
}

impl Encode for TileCell {
    fn to_node(&self) -> Node {
        let data = match self {
            TileCell::Default => int(0),
            TileCell::Material { name } => Node::string(name),
            TileCell::Head {
                category,
                position,
                name,
            } => Node::List(vec![
                IntPoint::new(*category, *position).to_node(),
                Node::string(name),
            ]),
            TileCell::Body { position, depth } => Node::List(vec![position.to_node(), int(*depth)]),
        };
        Node::props([("tp", Node::string(self.tag())), ("data", data)])
    }
}

/// Columns of rows of layers.
impl<T: Encode> Encode for Matrix3<T> {
    fn to_node(&self) -> Node {
        let columns = (0..self.width())
            .map(|column| {
                let rows = (0..self.height())
                    .filter_map(|row| self.cell(row, column))
                    .map(|layers| Node::List(layers.iter().map(Encode::to_node).collect()))
                    .collect();
                Node::List(rows)
            })
            .collect();
        Node::List(columns)
    }
}

impl Encode for TileLayer {
    fn to_node(&self) -> Node {
        Node::props([
            ("tlMatrix", self.matrix.to_node()),
            ("defaultMaterial", Node::string(&self.default_material)),
        ])
    }
}

// ==================== Effects ====================

impl Encode for EffectMatrix {
    fn to_node(&self) -> Node {
        let columns = (0..self.width())
            .filter_map(|column| self.column(column))
            .map(|values| Node::List(values.iter().copied().map(float).collect()))
            .collect();
        Node::List(columns)
    }
}

/// `[name, [choices], choice]`.
impl Encode for EffectOption {
    fn to_node(&self) -> Node {
        let choice = match &self.choice {
            OptionChoice::Text(text) => Node::string(text),
            OptionChoice::Number(value) => int(*value),
        };
        Node::List(vec![Node::string(&self.name), strings(&self.choices), choice])
    }
}

impl Encode for Effect {
    fn to_node(&self) -> Node {
        Node::props([
            ("nm", Node::string(&self.name)),
            ("mtrx", self.matrix.to_node()),
            ("options", Node::List(self.options.iter().map(Encode::to_node).collect())),
        ])
    }
}

/// An effects line holding `effects`.
pub fn encode_effects_line(effects: &[Effect]) -> String {
    Node::props([(
        "effects",
        Node::List(effects.iter().map(Encode::to_node).collect()),
    )])
    .to_string()
}

// ==================== Definitions ====================

impl Encode for TileDefinition {
    fn to_node(&self) -> Node {
        let mut entries = vec![
            ("nm", Node::string(&self.name)),
            ("sz", self.size.to_node()),
            ("specs", ints(&self.specs)),
            ("specs2", ints(&self.specs2)),
        ];
        if !self.specs3.is_empty() {
            entries.push(("specs3", ints(&self.specs3)));
        }
        entries.push(("tp", Node::string(self.kind.tag())));
        if !self.repeat_layers.is_empty() || self.kind.requires_repeat() {
            entries.push(("repeatL", ints(&self.repeat_layers)));
        }
        entries.push(("bfTiles", int(self.buffer_tiles)));
        entries.push(("rnd", int(self.rnd)));
        entries.push(("tags", strings(&self.tags)));
        Node::props(entries)
    }
}

impl Encode for MaterialDefinition {
    fn to_node(&self) -> Node {
        let mut entries = vec![("nm", Node::string(&self.name)), ("color", self.color.to_node())];
        if let Some(tag) = self.render_type.tag() {
            entries.push(("tp", Node::string(tag)));
        }
        Node::props(entries)
    }
}

impl Encode for PropDefinition {
    fn to_node(&self) -> Node {
        let mut entries = vec![
            ("nm", Node::string(&self.name)),
            ("tp", Node::string(self.kind.tag())),
            ("depth", int(self.depth)),
        ];
        let shading = |entries: &mut Vec<(&'static str, Node)>, s: &crate::props::SoftShading| {
            entries.extend([
                ("round", int(s.round)),
                ("contourExp", float(s.contour_exp)),
                ("selfShade", flag(s.self_shade)),
                ("highLightBorder", float(s.highlight_border)),
                ("depthAffectHilites", float(s.depth_affect_hilites)),
                ("shadowBorder", float(s.shadow_border)),
                ("smoothShading", int(s.smooth_shading)),
            ]);
        };

        match &self.kind {
            PropKind::Standard(layered) | PropKind::VariedStandard(layered, _) => {
                entries.extend([
                    ("colorTreatment", Node::string(layered.color_treatment.tag())),
                    ("bevel", int(layered.bevel)),
                    ("sz", layered.size.to_node()),
                    ("repeatL", ints(&layered.repeat_layers)),
                ]);
            }
            PropKind::Soft(s) => shading(&mut entries, s),
            PropKind::VariedSoft {
                pixel_size,
                colorize,
                shading: s,
                ..
            } => {
                entries.push(("pxlSize", pixel_size.to_node()));
                entries.push(("colorize", flag(*colorize)));
                shading(&mut entries, s);
            }
            PropKind::ColoredSoft {
                pixel_size,
                colorize,
                shading: s,
            } => {
                entries.push(("pxlSize", pixel_size.to_node()));
                entries.push(("colorize", flag(*colorize)));
                shading(&mut entries, s);
            }
            PropKind::VariedDecal { pixel_size, .. } => entries.push(("pxlSize", pixel_size.to_node())),
            PropKind::Antimatter { contour_exp } => entries.push(("contourExp", float(*contour_exp))),
            PropKind::CustomRope(rope) => entries.extend([
                ("segmentLength", int(rope.segment_length)),
                ("collisionDepth", int(rope.collision_depth)),
                ("segRadius", float(rope.segment_radius)),
                ("grav", float(rope.gravity)),
                ("friction", float(rope.friction)),
                ("airFric", float(rope.air_friction)),
                ("stiff", flag(rope.stiff)),
                ("edgeDirection", float(rope.edge_direction)),
                ("rigid", float(rope.rigid)),
                ("selfPush", float(rope.self_push)),
                ("sourcePush", float(rope.source_push)),
            ]),
            PropKind::SimpleDecal | PropKind::SoftEffect | PropKind::Long | PropKind::CustomLong => {}
        }

        if let Some(variations) = self.kind.variations() {
            entries.push(("vars", int(variations.count)));
            entries.push(("random", flag(variations.random)));
        }
        Node::props(entries)
    }
}

// ==================== Placements ====================

impl Encode for PropPlacement {
    fn to_node(&self) -> Node {
        let s = &self.settings;
        let mut settings = vec![
            ("renderorder", int(s.render_order)),
            ("seed", int(s.seed)),
            ("renderTime", int(s.render_time)),
        ];
        if let Some(variation) = s.variation {
            settings.push(("variation", int(variation)));
        }
        if let Some(depth) = s.custom_depth {
            settings.push(("customDepth", int(depth)));
        }
        if let Some(apply) = s.apply_color {
            settings.push(("applyColor", flag(apply)));
        }

        let mut extras = Vec::with_capacity(2);
        if let Some(rope) = &s.rope {
            settings.push(("release", int(rope.release.code())));
            if let Some(thickness) = rope.thickness {
                settings.push(("thickness", float(thickness)));
            }
            extras.push(("settings", Node::props(settings)));
            extras.push(("points", Node::List(rope.points.iter().map(Encode::to_node).collect())));
        } else {
            extras.push(("settings", Node::props(settings)));
        }

        Node::List(vec![
            int(self.depth),
            Node::string(&self.name),
            self.catalog_position.to_node(),
            self.quad.to_node(),
            Node::props(extras),
        ])
    }
}

/// A props line holding `placements`.
pub fn encode_props_line(placements: &[PropPlacement]) -> String {
    Node::props([(
        "props",
        Node::List(placements.iter().map(Encode::to_node).collect()),
    )])
    .to_string()
}

/// A catalog file: every group's header followed by its definitions.
pub fn encode_catalog<D: Encode>(catalog: &Catalog<D>) -> String {
    let mut text = String::new();
    for group in &catalog.groups {
        text.push('-');
        text.push_str(&group.category.encode());
        text.push('\n');
        for definition in &group.definitions {
            text.push_str(&definition.encode());
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{decode_geometry, GeoFeatures, GeoType};
    use crate::options::DecodeOptions;
    use crate::props::{decode_prop_catalog, decode_prop_placements, PropIndex};
    use crate::tile_matrix::decode_tile_matrix;
    use crate::tiles::{decode_tile_catalog, TileKind};
    use leditor_lingo::parse;
    use leditor_test::fixtures::{catalogs, placements};

    #[test]
    fn test_negative_ints_are_negations() {
        assert_eq!(IntPoint::new(-2, 3).encode(), "point(-2, 3)");
        assert_eq!(Vec2::new(-0.5, 1.0).encode(), "point(-0.5, 1.0)");
    }

    #[test]
    fn test_geo_cell() {
        let cell = GeoCell::new(GeoType::Glass, GeoFeatures::VERTICAL_POLE | GeoFeatures::WATERFALL);
        assert_eq!(cell.encode(), "[9, [2, 18]]");
    }

    #[test]
    fn test_tile_cell_tags() {
        let head = TileCell::Head {
            category: 3,
            position: 12,
            name: "Big Pipe".into(),
        };
        assert_eq!(head.encode(), "[#tp: \"tileHead\", #data: [point(3, 12), \"Big Pipe\"]]");
        assert_eq!(TileCell::Default.encode(), "[#tp: \"default\", #data: 0]");
    }

    #[test]
    fn test_geometry_round_trip() {
        let text = leditor_test::fixtures::geometry::patterned_geometry(5, 4);
        let geo = decode_geometry(&text).unwrap();
        assert_eq!(decode_geometry(&geo.encode()).unwrap(), geo);
    }

    #[test]
    fn test_tile_layer_round_trip() {
        let text = leditor_test::fixtures::geometry::tile_matrix_line(2, 2, |column, row| match (column, row) {
            (0, 0) => "[[#tp: \"tileHead\", #data: [point(1, 2), \"Big Stone\"]], [#tp: \"default\", #data: 0], [#tp: \"material\", #data: \"Concrete\"]]".into(),
            (1, 0) => "[[#tp: \"tileBody\", #data: [point(1, 1), 1]], [#tp: \"default\", #data: 0], [#tp: \"default\", #data: 0]]".into(),
            _ => leditor_test::fixtures::geometry::DEFAULT_TILE.into(),
        });
        let layer = decode_tile_matrix(&text).unwrap();
        assert_eq!(decode_tile_matrix(&layer.encode()).unwrap(), layer);
    }

    #[test]
    fn test_tile_catalog_round_trip() {
        let catalog = decode_tile_catalog(catalogs::TILES).unwrap();
        let again = decode_tile_catalog(&encode_catalog(&catalog)).unwrap();
        assert_eq!(again, catalog);
        assert_eq!(again.find("Big Pipe").unwrap().kind, TileKind::VoxelStruct);
    }

    #[test]
    fn test_material_catalog_round_trip() {
        let report = crate::materials::decode_material_catalog_with(catalogs::MATERIALS, &DecodeOptions::strict()).unwrap();
        let text = encode_catalog(&report.value);
        let again = crate::materials::decode_material_catalog_with(&text, &DecodeOptions::strict()).unwrap();
        assert_eq!(again.value, report.value);
    }

    #[test]
    fn test_prop_catalog_round_trip() {
        let catalog = decode_prop_catalog(catalogs::PROPS).unwrap();
        for def in catalog.definitions() {
            let node = parse(&def.encode()).unwrap();
            assert_eq!(&crate::props::decode_prop_definition(&node).unwrap(), def);
        }
    }

    #[test]
    fn test_placements_round_trip() {
        let index = PropIndex::from_catalog(&decode_prop_catalog(catalogs::PROPS).unwrap());
        let line = placements::props_line(&placements::mixed_placements(8));
        let decoded = decode_prop_placements(&line, &index).unwrap();
        assert_eq!(decode_prop_placements(&encode_props_line(&decoded), &index).unwrap(), decoded);
    }

    #[test]
    fn test_effect_option_forms() {
        let option = EffectOption {
            name: "Offset".into(),
            choices: vec![],
            choice: OptionChoice::Number(-3),
        };
        assert_eq!(option.encode(), "[\"Offset\", [], -3]");
    }

    #[test]
    fn test_effects_round_trip() {
        let line = format!(
            "[#effects: [{}, {}]]",
            leditor_test::fixtures::level::effect("Slime", 3, 2, "0.25", "[\"Layers\", [\"All\", \"1\"], \"All\"], [\"Seed\", [], -9]"),
            leditor_test::fixtures::level::effect("Rust", 1, 4, "-12.5", ""),
        );
        let effects = crate::effects::decode_effects(&line).unwrap();
        assert_eq!(crate::effects::decode_effects(&encode_effects_line(&effects)).unwrap(), effects);
    }

    #[test]
    fn test_escaped_names_round_trip() {
        let material = MaterialDefinition {
            name: "The \"Good\" Stone".into(),
            color: Color::new(1, 2, 3),
            render_type: crate::materials::MaterialRenderType::CustomUnified,
        };
        let node = parse(&material.encode()).unwrap();
        assert_eq!(crate::materials::decode_material_definition(&node).unwrap(), material);
    }
}
