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

//! Matrix lines.
//!
//! Matrices are column-major: the outer list holds columns, each column
//! holds rows, each row holds exactly three layers.

/// A cell with air on every layer.
pub const AIR: &str = "[[0, []], [0, []], [0, []]]";

/// A cell solid on every layer.
pub const SOLID: &str = "[[1, []], [1, []], [1, []]]";

/// A tile-matrix cell with the default material on every layer.
pub const DEFAULT_TILE: &str =
    "[[#tp: \"default\", #data: 0], [#tp: \"default\", #data: 0], [#tp: \"default\", #data: 0]]";

/// Joins per-column row texts into a matrix.
pub fn matrix(columns: &[Vec<String>]) -> String {
    let columns: Vec<String> = columns.iter().map(|rows| format!("[{}]", rows.join(", "))).collect();
    format!("[{}]", columns.join(", "))
}

/// A `width` x `height` geometry line; `cell(column, row)` yields each cell.
pub fn geometry_line(width: usize, height: usize, cell: impl Fn(usize, usize) -> String) -> String {
    let columns: Vec<Vec<String>> = (0..width)
        .map(|column| (0..height).map(|row| cell(column, row)).collect())
        .collect();
    matrix(&columns)
}

/// Geometry with one row count per column, every cell [`AIR`].
pub fn ragged_geometry(rows: &[usize]) -> String {
    let columns: Vec<Vec<String>> = rows.iter().map(|&n| vec![AIR.to_string(); n]).collect();
    matrix(&columns)
}

/// Geometry with varied types and features, for throughput tests.
pub fn patterned_geometry(width: usize, height: usize) -> String {
    const KINDS: [i32; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 9];
    geometry_line(width, height, |column, row| {
        let kind = KINDS[(column * 7 + row * 3) % KINDS.len()];
        let feature = (column + row) % 21 + 1;
        format!("[[{}, [{}]], [{}, []], [0, [1, 2]]]", kind, feature, (row % 2))
    })
}

/// A tiles line: `[#tlMatrix: ..., #defaultMaterial: ...]`.
pub fn tile_matrix_line(width: usize, height: usize, cell: impl Fn(usize, usize) -> String) -> String {
    let columns: Vec<Vec<String>> = (0..width)
        .map(|column| (0..height).map(|row| cell(column, row)).collect())
        .collect();
    format!(
        "[#lastKeys: [#L: 0, #m1: 0], #Keys: [#L: 0, #m1: 0], #workLayer: 1, #lstMsPs: point(0, 0), \
         #tlMatrix: {}, #defaultMaterial: \"Concrete\", #toolType: \"material\", #toolData: \"Big Metal\", \
         #tmPos: point(1, 1), #tmSavPosL: [], #specialEdit: 0]",
        matrix(&columns)
    )
}
