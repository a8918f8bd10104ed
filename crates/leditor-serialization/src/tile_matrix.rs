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

//! The per-level tile layer: which tile or material occupies each cell.
//!
//! Layers are property lists tagged by `tp`:
//!
//! ```text
//! [#tp: "default", #data: 0]
//! [#tp: "material", #data: "Concrete"]
//! [#tp: "tileHead", #data: [point(3, 12), "Big Pipe"]]
//! [#tp: "tileBody", #data: [point(5, 7), 1]]
//! ```
//!
//! Body cells point at their head with 1-based coordinates.

use crate::access::{cast, find, get, to_int, to_int_pair};
use crate::error::{DecodeError, ImportError};
use crate::matrix::{decode_matrix, Matrix3, LAYERS};
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::types::IntPoint;
use leditor_lingo::{parse_with_limits, Node, Property};

/// Contents of one layer of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileCell {
    /// Filled with the level's default material.
    #[default]
    Default,
    Material { name: String },
    /// The anchor cell of a placed tile.
    Head {
        category: i32,
        position: i32,
        name: String,
    },
    /// A non-anchor cell of a placed tile. `position` and `depth` locate
    /// the head, 1-based.
    Body { position: IntPoint, depth: i32 },
}

impl TileCell {
    pub fn tag(&self) -> &'static str {
        match self {
            TileCell::Default => "default",
            TileCell::Material { .. } => "material",
            TileCell::Head { .. } => "tileHead",
            TileCell::Body { .. } => "tileBody",
        }
    }
}

/// The tiles line of a level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    pub matrix: Matrix3<TileCell>,
    pub default_material: String,
}

impl TileLayer {
    /// The head a body cell belongs to, if it points at one.
    pub fn head_of(&self, row: usize, column: usize, layer: usize) -> Option<&TileCell> {
        let TileCell::Body { position, depth } = self.matrix.get(row, column, layer)? else {
            return None;
        };
        let column = usize::try_from(position.x).ok()?.checked_sub(1)?;
        let row = usize::try_from(position.y).ok()?.checked_sub(1)?;
        let layer = usize::try_from(*depth).ok()?.checked_sub(1)?;
        if layer >= LAYERS {
            return None;
        }
        self.matrix
            .get(row, column, layer)
            .filter(|cell| matches!(cell, TileCell::Head { .. }))
    }
}

fn decode_layer(node: &Node, layer: usize) -> Result<TileCell, DecodeError> {
    let location = format!("layer ({})", layer + 1);
    let props: &[Property] = cast(node, &location)?;
    let tag_key = format!("{} tp", location);
    let key = format!("{} data", location);
    let tag: &str = cast(find(props, "tp").ok_or_else(|| DecodeError::missing(&tag_key))?, &tag_key)?;
    let data = find(props, "data").ok_or_else(|| DecodeError::missing(&key))?;

    match tag {
        "default" => Ok(TileCell::Default),
        "material" => Ok(TileCell::Material {
            name: cast::<&str>(data, &key)?.to_string(),
        }),
        "tileHead" | "tileBody" => {
            let pair: &[Node] = cast(data, &key)?;
            if pair.len() != 2 {
                return Err(DecodeError::shape(
                    key,
                    format!("expected 2 elements, found {}", pair.len()),
                ));
            }
            let point = to_int_pair(cast(&pair[0], &key)?, &key)?;
            if tag == "tileHead" {
                Ok(TileCell::Head {
                    category: point.x,
                    position: point.y,
                    name: cast::<&str>(&pair[1], &key)?.to_string(),
                })
            } else {
                Ok(TileCell::Body {
                    position: point,
                    depth: to_int(&pair[1], &key)?,
                })
            }
        }
        other => Err(DecodeError::invalid_value(tag_key, other)),
    }
}

/// Decodes a parsed tiles line.
///
/// # Errors
///
/// [`ImportError::Invalid`] without `tlMatrix` or `defaultMaterial`. In
/// strict mode, [`ImportError::Failed`] for the first bad column or cell.
pub fn decode_tile_matrix_node(node: &Node, options: &DecodeOptions) -> Result<ImportReport<TileLayer>, ImportError> {
    let props: &[Property] = cast(node, "tiles").map_err(ImportError::Invalid)?;
    let default_material: &str = get(props, "defaultMaterial").map_err(ImportError::Invalid)?;
    let matrix: &Node = get(props, "tlMatrix").map_err(ImportError::Invalid)?;
    let report = decode_matrix(matrix, options, "tile matrix", decode_layer)?;
    Ok(report.map(|matrix| TileLayer {
        matrix,
        default_material: default_material.to_string(),
    }))
}

/// Decodes the tiles line of a level.
pub fn decode_tile_matrix_with(text: &str, options: &DecodeOptions) -> Result<ImportReport<TileLayer>, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let node = parse_with_limits(text, &options.limits).map_err(|e| ImportError::Invalid(e.into()))?;
    decode_tile_matrix_node(&node, options)
}

/// Decodes the tiles line of a level in strict mode.
pub fn decode_tile_matrix(text: &str) -> Result<TileLayer, ImportError> {
    decode_tile_matrix_with(text, &DecodeOptions::strict()).map(|report| report.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Unit};

    const DEFAULT: &str = "[#tp: \"default\", #data: 0]";

    fn line(columns: &[Vec<[&str; 3]>]) -> String {
        let columns: Vec<String> = columns
            .iter()
            .map(|rows| {
                let rows: Vec<String> = rows.iter().map(|layers| format!("[{}]", layers.join(", "))).collect();
                format!("[{}]", rows.join(", "))
            })
            .collect();
        format!("[#lastKeys: [], #Keys: [], #tlMatrix: [{}], #defaultMaterial: \"Concrete\", #toolType: \"material\"]", columns.join(", "))
    }

    #[test]
    fn test_decode_all_cell_kinds() {
        let head = "[#tp: \"tileHead\", #data: [point(3, 12), \"Big Pipe\"]]";
        let body = "[#tp: \"tileBody\", #data: [point(1, 1), 1]]";
        let material = "[#tp: \"material\", #data: \"Chaotic Stone\"]";
        let text = line(&[vec![[head, DEFAULT, DEFAULT], [body, material, DEFAULT]]]);

        let layer = decode_tile_matrix(&text).unwrap();
        assert_eq!(layer.default_material, "Concrete");
        let m = &layer.matrix;
        assert_eq!((m.width(), m.height()), (1, 2));
        assert_eq!(
            m.get(0, 0, 0),
            Some(&TileCell::Head {
                category: 3,
                position: 12,
                name: "Big Pipe".into()
            })
        );
        assert_eq!(
            m.get(1, 0, 1),
            Some(&TileCell::Material {
                name: "Chaotic Stone".into()
            })
        );
        assert_eq!(m.get(0, 0, 2), Some(&TileCell::Default));
        assert_eq!(layer.head_of(1, 0, 0), m.get(0, 0, 0));
        assert_eq!(layer.head_of(0, 0, 0), None);
    }

    #[test]
    fn test_body_pointing_outside_has_no_head() {
        let body = "[#tp: \"tileBody\", #data: [point(0, 1), 1]]";
        let layer = decode_tile_matrix(&line(&[vec![[body, DEFAULT, DEFAULT]]])).unwrap();
        assert_eq!(layer.head_of(0, 0, 0), None);
    }

    #[test]
    fn test_unknown_tag() {
        let bad = "[#tp: \"tileHeadd\", #data: 0]";
        let err = decode_tile_matrix(&line(&[vec![[DEFAULT, bad, DEFAULT]]])).unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.unit, Unit::Cell { column: 0, row: 0 });
        assert_eq!(failure.error, DecodeError::invalid_value("layer (2) tp", "tileHeadd"));
    }

    #[test]
    fn test_missing_data() {
        let bad = "[#tp: \"material\"]";
        let err = decode_tile_matrix(&line(&[vec![[bad, DEFAULT, DEFAULT]]])).unwrap_err();
        assert_eq!(err.failure().unwrap().error, DecodeError::missing("layer (1) data"));
    }

    #[test]
    fn test_permissive_keeps_good_cells() {
        let bad = "[#tp: \"material\", #data: 5]";
        let text = line(&[vec![[bad, DEFAULT, DEFAULT], [DEFAULT, DEFAULT, DEFAULT]]]);
        let report = decode_tile_matrix_with(&text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.summary(), "1 of 2 records imported, 1 failed");
        assert_eq!(report.failures[0].error.kind(), ErrorKind::WrongKind);
    }

    #[test]
    fn test_missing_matrix_is_invalid_input() {
        let err = decode_tile_matrix("[#defaultMaterial: \"Concrete\"]").unwrap_err();
        assert_eq!(err, ImportError::Invalid(DecodeError::missing("tlMatrix")));
    }
}
