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

//! Material definitions and material catalogs.

use crate::access::{cast, get, get_color, get_optional};
use crate::catalog::{import_catalog, parse_header, Catalog, Category, Definition};
use crate::error::{DecodeError, ImportError};
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::source::read_text;
use crate::types::Color;
use leditor_lingo::{Node, ParseLimits, Property};
use std::path::Path;

/// How the renderer draws a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialRenderType {
    Unified,
    Tiles,
    Pipe,
    Invisible,
    LargeTrash,
    Dirt,
    Ceramic,
    DensePipe,
    Ridge,
    CeramicA,
    CeramicB,
    RandomPipes,
    Rock,
    RoughRock,
    Sandy,
    MegaTrash,
    WV,
    /// No `tp` given: a user material drawn like `unified`.
    #[default]
    CustomUnified,
}

impl MaterialRenderType {
    const TAGGED: [MaterialRenderType; 17] = [
        MaterialRenderType::Unified,
        MaterialRenderType::Tiles,
        MaterialRenderType::Pipe,
        MaterialRenderType::Invisible,
        MaterialRenderType::LargeTrash,
        MaterialRenderType::Dirt,
        MaterialRenderType::Ceramic,
        MaterialRenderType::DensePipe,
        MaterialRenderType::Ridge,
        MaterialRenderType::CeramicA,
        MaterialRenderType::CeramicB,
        MaterialRenderType::RandomPipes,
        MaterialRenderType::Rock,
        MaterialRenderType::RoughRock,
        MaterialRenderType::Sandy,
        MaterialRenderType::MegaTrash,
        MaterialRenderType::WV,
    ];

    /// Case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TAGGED
            .into_iter()
            .find(|t| t.tag().is_some_and(|name| name.eq_ignore_ascii_case(tag)))
    }

    /// `None` for [`MaterialRenderType::CustomUnified`], which is written
    /// by leaving `tp` out.
    pub fn tag(self) -> Option<&'static str> {
        Some(match self {
            MaterialRenderType::Unified => "unified",
            MaterialRenderType::Tiles => "tiles",
            MaterialRenderType::Pipe => "pipe",
            MaterialRenderType::Invisible => "invisible",
            MaterialRenderType::LargeTrash => "largeTrash",
            MaterialRenderType::Dirt => "dirt",
            MaterialRenderType::Ceramic => "ceramic",
            MaterialRenderType::DensePipe => "densePipe",
            MaterialRenderType::Ridge => "ridge",
            MaterialRenderType::CeramicA => "ceramicA",
            MaterialRenderType::CeramicB => "ceramicB",
            MaterialRenderType::RandomPipes => "randomPipes",
            MaterialRenderType::Rock => "rock",
            MaterialRenderType::RoughRock => "roughRock",
            MaterialRenderType::Sandy => "sandy",
            MaterialRenderType::MegaTrash => "megaTrash",
            MaterialRenderType::WV => "wv",
            MaterialRenderType::CustomUnified => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDefinition {
    pub name: String,
    pub color: Color,
    pub render_type: MaterialRenderType,
}

impl Definition for MaterialDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Decodes `[#nm: "Concrete", #color: color(r, g, b), #tp: "unified"]`.
pub fn decode_material_definition(node: &Node) -> Result<MaterialDefinition, DecodeError> {
    let props: &[Property] = cast(node, "material definition")?;
    let name: &str = get(props, "nm")?;
    let fields = || -> Result<MaterialDefinition, DecodeError> {
        let color = get_color(props, "color")?;
        let render_type = match get_optional::<&str>(props, "tp")? {
            Some(tag) => MaterialRenderType::from_tag(tag).ok_or_else(|| DecodeError::invalid_value("tp", tag))?,
            None => MaterialRenderType::CustomUnified,
        };
        Ok(MaterialDefinition {
            name: name.to_string(),
            color,
            render_type,
        })
    };
    fields().map_err(|e| e.within(name))
}

/// Material catalogs also use plain-text headers such as `-Concrete`.
fn material_header(raw: &str, line: usize, limits: &ParseLimits) -> Result<Category, DecodeError> {
    Ok(parse_header(raw, line, limits).unwrap_or_else(|_| Category::new(raw.trim(), Color::default())))
}

/// Imports a material catalog with the given options.
///
/// # Errors
///
/// [`ImportError::EmptyInput`] for blank text. In strict mode,
/// [`ImportError::Failed`] for the first bad definition line; headers
/// that do not parse become plain-text categories and never fail.
pub fn decode_material_catalog_with(
    text: &str,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<MaterialDefinition>>, ImportError> {
    import_catalog(text, options, "materials", material_header, decode_material_definition)
}

/// Imports a material catalog in strict mode, without categories.
pub fn decode_material_catalog(text: &str) -> Result<Vec<MaterialDefinition>, ImportError> {
    decode_material_catalog_with(text, &DecodeOptions::strict()).map(|report| report.value.into_definitions())
}

pub fn decode_material_catalog_file(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ImportReport<Catalog<MaterialDefinition>>, ImportError> {
    decode_material_catalog_with(&read_text(path)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Unit};
    use leditor_lingo::parse;

    fn material(text: &str) -> Result<MaterialDefinition, DecodeError> {
        decode_material_definition(&parse(text).unwrap())
    }

    #[test]
    fn test_render_type_tags() {
        assert_eq!(MaterialRenderType::from_tag("densePipe"), Some(MaterialRenderType::DensePipe));
        assert_eq!(MaterialRenderType::from_tag("DENSEPIPE"), Some(MaterialRenderType::DensePipe));
        assert_eq!(MaterialRenderType::from_tag("WV"), Some(MaterialRenderType::WV));
        assert_eq!(MaterialRenderType::from_tag("custom"), None);
        assert_eq!(MaterialRenderType::CustomUnified.tag(), None);
    }

    #[test]
    fn test_decode_material() {
        let m = material("[#nm: \"Concrete\", #color: color(150, 150, 150), #tp: \"unified\"]").unwrap();
        assert_eq!(m.name, "Concrete");
        assert_eq!(m.color, Color::new(150, 150, 150));
        assert_eq!(m.render_type, MaterialRenderType::Unified);
    }

    #[test]
    fn test_missing_type_is_custom() {
        let m = material("[#nm: \"Moss\", #color: color(0, 200, 0)]").unwrap();
        assert_eq!(m.render_type, MaterialRenderType::CustomUnified);
    }

    #[test]
    fn test_color_must_be_color_call() {
        let err = material("[#nm: \"Moss\", #color: rgb(0, 200, 0)]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let err = material("[#nm: \"Moss\"]").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingProperty {
                key: "color".into(),
                definition: Some("Moss".into()),
            }
        );
    }

    #[test]
    fn test_catalog_with_plain_headers() {
        let text = "-Standard\n\
                    [#nm: \"Concrete\", #color: color(150, 150, 150)]\n\
                    -[\"Custom\", color(10, 20, 30)]\n\
                    [#nm: \"Moss\", #color: color(0, 200, 0)]";
        let report = decode_material_catalog_with(text, &DecodeOptions::strict()).unwrap();
        let names: Vec<_> = report.value.categories().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Standard", "Custom"]);
        assert_eq!(report.value.categories().nth(1).unwrap().color, Color::new(10, 20, 30));
        assert_eq!(decode_material_catalog(text).unwrap().len(), 2);
    }

    #[test]
    fn test_permissive_drops_bad_lines() {
        let text = "-Standard\n\
                    [#nm: \"Concrete\", #color: color(150, 150, 150)]\n\
                    [#nm: \"Broken\", #color: color(1, 2)]\n\
                    [#nm: \"Moss\", #color: color(0, 200, 0)]";
        let report = decode_material_catalog_with(text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.value.len(), 2);
        assert_eq!(report.failures[0].unit, Unit::Line(3));
        assert_eq!(report.failures[0].error.kind(), ErrorKind::Shape);
    }
}
