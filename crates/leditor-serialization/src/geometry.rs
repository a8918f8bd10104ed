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

//! Level geometry: terrain type and feature markers per cell and layer.
//!
//! Each layer is written `[type, [feature, ...]]`, both as integer codes:
//!
//! ```
//! use leditor_serialization::geometry::{decode_geometry, GeoFeatures, GeoType};
//!
//! let geo = decode_geometry("[[[[1, []], [0, [1, 2]], [0, []]]]]").unwrap();
//! assert_eq!(geo.height(), 1);
//! let middle = geo.get(0, 0, 1).unwrap();
//! assert_eq!(middle.kind, GeoType::Air);
//! assert_eq!(middle.features, GeoFeatures::HORIZONTAL_POLE | GeoFeatures::VERTICAL_POLE);
//! ```

use crate::access::{cast, to_exact_int};
use crate::error::{DecodeError, ImportError};
use crate::matrix::{decode_matrix, Matrix3};
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::source::read_text;
use bitflags::bitflags;
use leditor_lingo::{parse_with_limits, Node};
use std::path::Path;

/// Terrain kind of one cell layer. Discriminants are the file codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeoType {
    #[default]
    Air = 0,
    Solid = 1,
    SlopeNE = 2,
    SlopeNW = 3,
    SlopeES = 4,
    SlopeSW = 5,
    Platform = 6,
    ShortcutEntrance = 7,
    Glass = 9,
}

impl GeoType {
    /// Exact integer match; there is no fallback kind.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => GeoType::Air,
            1 => GeoType::Solid,
            2 => GeoType::SlopeNE,
            3 => GeoType::SlopeNW,
            4 => GeoType::SlopeES,
            5 => GeoType::SlopeSW,
            6 => GeoType::Platform,
            7 => GeoType::ShortcutEntrance,
            9 => GeoType::Glass,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_slope(self) -> bool {
        matches!(
            self,
            GeoType::SlopeNE | GeoType::SlopeNW | GeoType::SlopeES | GeoType::SlopeSW
        )
    }
}

bitflags! {
    /// Stackable markers on a cell layer.
    ///
    /// Feature `n` of the file format is bit `n - 1`. Ids 8 and 14 to 17
    /// have no name but are kept so that re-encoding is lossless.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GeoFeatures: u32 {
        const HORIZONTAL_POLE = 1 << 0;
        const VERTICAL_POLE = 1 << 1;
        const BATHIVE = 1 << 2;
        const SHORTCUT_ENTRANCE = 1 << 3;
        const SHORTCUT_PATH = 1 << 4;
        const ROOM_ENTRANCE = 1 << 5;
        const DRAGON_DEN = 1 << 6;
        const PLACE_ROCK = 1 << 8;
        const PLACE_SPEAR = 1 << 9;
        const CRACKED_TERRAIN = 1 << 10;
        const FORBID_FLY_CHAINS = 1 << 11;
        const GARBAGE_WORM_HOLE = 1 << 12;
        const WATERFALL = 1 << 17;
        const WACK_A_MOLE_HOLE = 1 << 18;
        const WORM_GRASS = 1 << 19;
        const SCAVENGER_HOLE = 1 << 20;

        const _ = (1 << 21) - 1;
    }
}

impl GeoFeatures {
    /// Highest feature id.
    pub const MAX_ID: i32 = 21;

    /// The flag for file feature id `id`, if it is in `1..=21`.
    pub fn from_id(id: i32) -> Option<Self> {
        (1..=Self::MAX_ID)
            .contains(&id)
            .then(|| Self::from_bits_retain(1 << (id - 1)))
    }

    /// Feature ids present, ascending.
    pub fn ids(self) -> Vec<i32> {
        (1..=Self::MAX_ID)
            .filter(|id| self.bits() & (1 << (id - 1)) != 0)
            .collect()
    }
}

/// One layer of one geometry cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCell {
    pub kind: GeoType,
    pub features: GeoFeatures,
}

impl GeoCell {
    pub fn new(kind: GeoType, features: GeoFeatures) -> Self {
        Self { kind, features }
    }
}

/// Level geometry, indexed by `(row, column, layer)`.
pub type GeoMatrix = Matrix3<GeoCell>;

fn decode_layer(node: &Node, layer: usize) -> Result<GeoCell, DecodeError> {
    let location = format!("layer ({})", layer + 1);
    let pair: &[Node] = cast(node, &location)?;
    if pair.len() != 2 {
        return Err(DecodeError::shape(
            location,
            format!("expected [type, [features]], found {} elements", pair.len()),
        ));
    }

    let type_key = format!("{} type", location);
    let code = to_exact_int(&pair[0], &type_key)?;
    let kind = GeoType::from_code(code).ok_or_else(|| DecodeError::invalid_value(&type_key, code.to_string()))?;

    let features_key = format!("{} features", location);
    let codes: &[Node] = cast(&pair[1], &features_key)?;
    let mut features = GeoFeatures::empty();
    for (i, code) in codes.iter().enumerate() {
        let key = format!("{}[{}]", features_key, i);
        let id = to_exact_int(code, &key)?;
        features |= GeoFeatures::from_id(id).ok_or_else(|| DecodeError::invalid_value(&key, id.to_string()))?;
    }

    Ok(GeoCell { kind, features })
}

/// Decodes a parsed geometry matrix.
///
/// # Errors
///
/// [`ImportError::Invalid`] when the root is not a list. In strict mode,
/// [`ImportError::Failed`] for the first ragged column or bad cell; see
/// [`crate::matrix`] for how columns are checked.
pub fn decode_geometry_node(node: &Node, options: &DecodeOptions) -> Result<ImportReport<GeoMatrix>, ImportError> {
    decode_matrix(node, options, "geometry", decode_layer)
}

/// Decodes geometry text with the given options.
///
/// # Errors
///
/// [`ImportError::EmptyInput`] for blank text and [`ImportError::Invalid`]
/// when it does not parse, otherwise as [`decode_geometry_node`].
pub fn decode_geometry_with(text: &str, options: &DecodeOptions) -> Result<ImportReport<GeoMatrix>, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let node = parse_with_limits(text, &options.limits).map_err(|e| ImportError::Invalid(e.into()))?;
    decode_geometry_node(&node, options)
}

/// Decodes geometry text in strict mode.
pub fn decode_geometry(text: &str) -> Result<GeoMatrix, ImportError> {
    decode_geometry_with(text, &DecodeOptions::strict()).map(|report| report.value)
}

/// Reads a geometry file and decodes it.
pub fn decode_geometry_file(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ImportReport<GeoMatrix>, ImportError> {
    let text = read_text(path)?;
    decode_geometry_with(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Unit};

    #[test]
    fn test_geo_type_codes() {
        assert_eq!(GeoType::from_code(9), Some(GeoType::Glass));
        assert_eq!(GeoType::from_code(8), None);
        assert_eq!(GeoType::from_code(-1), None);
        assert_eq!(GeoType::SlopeSW.code(), 5);
        assert!(GeoType::SlopeES.is_slope());
        assert!(!GeoType::Platform.is_slope());
    }

    #[test]
    fn test_feature_ids() {
        assert_eq!(GeoFeatures::from_id(1), Some(GeoFeatures::HORIZONTAL_POLE));
        assert_eq!(GeoFeatures::from_id(21), Some(GeoFeatures::SCAVENGER_HOLE));
        assert_eq!(GeoFeatures::from_id(0), None);
        assert_eq!(GeoFeatures::from_id(22), None);
        let set = GeoFeatures::WORM_GRASS | GeoFeatures::from_id(8).unwrap() | GeoFeatures::BATHIVE;
        assert_eq!(set.ids(), vec![3, 8, 20]);
    }

    #[test]
    fn test_decode_geometry() {
        let text = "[[[[1, []], [1, []], [0, []]], [[0, [4, 5]], [0, []], [9, []]]], \
                     [[[2, []], [0, []], [0, []]], [[6, [11]], [0, []], [0, []]]]]";
        let geo = decode_geometry(text).unwrap();
        assert_eq!((geo.width(), geo.height()), (2, 2));
        assert_eq!(geo.get(0, 0, 0).unwrap().kind, GeoType::Solid);
        assert_eq!(
            geo.get(1, 0, 0).unwrap().features,
            GeoFeatures::SHORTCUT_ENTRANCE | GeoFeatures::SHORTCUT_PATH
        );
        assert_eq!(geo.get(1, 0, 2).unwrap().kind, GeoType::Glass);
        assert_eq!(geo.get(0, 1, 0).unwrap().kind, GeoType::SlopeNE);
        assert_eq!(geo.get(1, 1, 0).unwrap().features, GeoFeatures::CRACKED_TERRAIN);
    }

    #[test]
    fn test_unknown_type_code() {
        let err = decode_geometry("[[[[8, []], [0, []], [0, []]]]]").unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.unit, Unit::Cell { column: 0, row: 0 });
        assert_eq!(failure.error, DecodeError::invalid_value("layer (1) type", "8"));
    }

    #[test]
    fn test_decimal_codes_rejected() {
        let err = decode_geometry("[[[[1.0, []], [0, []], [0, []]]]]").unwrap_err();
        assert_eq!(err.failure().unwrap().error.kind(), ErrorKind::InvalidValue);

        let err = decode_geometry("[[[[1, []], [0, [2.5]], [0, []]]]]").unwrap_err();
        assert_eq!(
            err.failure().unwrap().error,
            DecodeError::invalid_value("layer (2) features[0]", "2.5")
        );
    }

    #[test]
    fn test_feature_out_of_range() {
        let err = decode_geometry("[[[[1, []], [0, []], [0, [22]]]]]").unwrap_err();
        assert_eq!(
            err.failure().unwrap().error,
            DecodeError::invalid_value("layer (3) features[0]", "22")
        );
    }

    #[test]
    fn test_layer_must_be_pair() {
        let err = decode_geometry("[[[[1], [0, []], [0, []]]]]").unwrap_err();
        assert_eq!(err.failure().unwrap().error.kind(), ErrorKind::Shape);
        let err = decode_geometry("[[[1, [0, []], [0, []]]]]").unwrap_err();
        assert_eq!(err.failure().unwrap().error.kind(), ErrorKind::WrongKind);
    }

    #[test]
    fn test_negative_type_code() {
        let err = decode_geometry("[[[[-1, []], [0, []], [0, []]]]]").unwrap_err();
        assert_eq!(
            err.failure().unwrap().error,
            DecodeError::invalid_value("layer (1) type", "-1")
        );
    }

    #[test]
    fn test_empty_and_unparseable_input() {
        assert_eq!(decode_geometry("  ").unwrap_err(), ImportError::EmptyInput);
        let err = decode_geometry("[[[[1, []]").unwrap_err();
        assert!(matches!(err, ImportError::Invalid(DecodeError::Syntax(_))));
    }

    #[test]
    fn test_file_not_found() {
        let err = decode_geometry_file("/no/such/geometry.txt", &DecodeOptions::strict()).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
