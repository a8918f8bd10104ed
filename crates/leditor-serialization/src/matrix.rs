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

//! Three-layer cell matrices and the shape checks shared by the geometry
//! and tile-cell decoders.
//!
//! Level matrices are written column by column: a list of columns, each a
//! list of rows, each a list of exactly three layers (front, middle,
//! back). The row count of the last column is authoritative.
//!
//! Strict mode rejects the whole matrix at the first column whose row
//! count differs. Permissive mode keeps going: a short column reports one
//! failure per missing cell, a long column reports a single failure and
//! its extra rows are ignored, and cells that fail keep their default.

use crate::access::cast;
use crate::error::{DecodeError, Failure, ImportError, Unit};
use crate::fanout;
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use leditor_lingo::Node;

/// Layers per cell.
pub const LAYERS: usize = 3;

/// A `width` x `height` grid of cells, each holding [`LAYERS`] values.
///
/// Storage is column-major with the layers of one cell adjacent, so a
/// whole cell is one contiguous chunk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Default + Clone> Matrix3<T> {
    /// A matrix of default cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height * LAYERS],
        }
    }
}

impl<T> Matrix3<T> {
    /// Builds a matrix from column-major storage. `None` when the length
    /// does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width * height * LAYERS).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.height && column < self.width).then(|| (column * self.height + row) * LAYERS)
    }

    pub fn get(&self, row: usize, column: usize, layer: usize) -> Option<&T> {
        if layer >= LAYERS {
            return None;
        }
        self.offset(row, column).map(|at| &self.cells[at + layer])
    }

    pub fn get_mut(&mut self, row: usize, column: usize, layer: usize) -> Option<&mut T> {
        if layer >= LAYERS {
            return None;
        }
        self.offset(row, column).map(move |at| &mut self.cells[at + layer])
    }

    /// All layers of one cell, front first.
    pub fn cell(&self, row: usize, column: usize) -> Option<&[T]> {
        self.offset(row, column).map(|at| &self.cells[at..at + LAYERS])
    }

    /// Cells in storage order as `(column, row, layers)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &[T])> + '_ {
        let height = self.height.max(1);
        self.cells
            .chunks(LAYERS)
            .enumerate()
            .map(move |(i, layers)| (i / height, i % height, layers))
    }

    /// Raw column-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

/// Row count of the last column that is a list.
fn authoritative_height(rows: &[Option<&[Node]>]) -> usize {
    rows.iter().rev().find_map(|r| r.map(<[Node]>::len)).unwrap_or(0)
}

/// Columns of a single-value grid, such as an effect's strengths, checked
/// to all have the authoritative row count.
///
/// Returns the columns and that count. The first column that is not a list
/// or has a different length is an error.
pub(crate) fn uniform_columns<'a>(root: &'a Node, what: &str) -> Result<(Vec<&'a [Node]>, usize), DecodeError> {
    let columns: &[Node] = cast(root, what)?;
    let rows: Vec<Option<&[Node]>> = columns.iter().map(Node::as_list).collect();
    let height = authoritative_height(&rows);
    let checked = rows
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(column, (found, node))| match found {
            None => Err(DecodeError::wrong_kind(
                format!("{} column ({})", what, column),
                "a list",
                node.kind(),
            )),
            Some(r) if r.len() != height => Err(DecodeError::shape(
                format!("{} column ({})", what, column),
                format!("expected {} rows, found {}", height, r.len()),
            )),
            Some(r) => Ok(*r),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((checked, height))
}

fn decode_cell<T, F>(cell: &Node, decode_layer: &F, slots: &mut [T]) -> Result<(), DecodeError>
where
    F: Fn(&Node, usize) -> Result<T, DecodeError>,
{
    let layers: &[Node] = cast(cell, "cell")?;
    if layers.len() != LAYERS {
        return Err(DecodeError::shape(
            "cell",
            format!("expected {} layers, found {}", LAYERS, layers.len()),
        ));
    }
    // Decode all layers before writing so a failed cell stays default.
    let decoded = layers
        .iter()
        .enumerate()
        .map(|(layer, node)| decode_layer(node, layer))
        .collect::<Result<Vec<T>, _>>()?;
    for (slot, value) in slots.iter_mut().zip(decoded) {
        *slot = value;
    }
    Ok(())
}

/// Checks the shape of `root` and decodes every layer with
/// `decode_layer(node, layer_index)`, one unit of work per cell.
///
/// Units are the attempted cells plus one per column that failed its own
/// shape check, so `imported` counts exactly the cells that decoded.
pub(crate) fn decode_matrix<T, F>(
    root: &Node,
    options: &DecodeOptions,
    what: &str,
    decode_layer: F,
) -> Result<ImportReport<Matrix3<T>>, ImportError>
where
    T: Default + Clone + Send,
    F: Fn(&Node, usize) -> Result<T, DecodeError> + Sync,
{
    let columns: &[Node] = cast(root, what).map_err(ImportError::Invalid)?;
    let rows: Vec<Option<&[Node]>> = columns.iter().map(Node::as_list).collect();
    let width = columns.len();
    let height = authoritative_height(&rows);

    let column_failures: Vec<Option<Failure>> = rows
        .iter()
        .enumerate()
        .map(|(column, found)| {
            let location = format!("column ({})", column);
            let error = match found {
                None => DecodeError::wrong_kind(location, "a list", columns[column].kind()),
                Some(r) if r.len() > height || (options.is_strict() && r.len() != height) => {
                    DecodeError::shape(location, format!("expected {} rows, found {}", height, r.len()))
                }
                Some(_) => return None,
            };
            Some(Failure::new(Unit::Column { column }, error))
        })
        .collect();

    if options.is_strict() {
        if let Some(first) = column_failures.iter().flatten().next() {
            return Err(ImportError::Failed(first.clone()));
        }
    }

    let mut cells = vec![T::default(); width * height * LAYERS];
    let outcomes = fanout::fill_chunks(options, &mut cells, LAYERS, |i, slots| {
        let (column, row) = (i / height, i % height);
        let unit = Unit::Cell { column, row };
        let found = rows[column]?;
        let outcome = match found.get(row) {
            Some(cell) => decode_cell(cell, &decode_layer, slots),
            None => Err(DecodeError::shape(
                unit.to_string(),
                format!("column has {} rows, expected {}", found.len(), height),
            )),
        };
        Some(outcome.map_err(|error| Failure::new(unit, error)))
    })?;

    let mut total = 0;
    let mut failures = Vec::new();
    let mut outcomes = outcomes.into_iter();
    for column_failure in column_failures {
        if let Some(failure) = column_failure {
            total += 1;
            failures.push(failure);
        }
        for outcome in outcomes.by_ref().take(height).flatten() {
            total += 1;
            if let Err(failure) = outcome {
                failures.push(failure);
            }
        }
    }

    let matrix = Matrix3 {
        width,
        height,
        cells,
    };
    ImportReport::new(matrix, total, failures).finish(options, what)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::to_exact_int;
    use crate::error::ErrorKind;
    use leditor_lingo::parse;

    fn int_layer(node: &Node, _layer: usize) -> Result<i32, DecodeError> {
        to_exact_int(node, "value")
    }

    fn column(rows: usize, base: i32) -> String {
        let cells: Vec<String> = (0..rows as i32)
            .map(|r| format!("[{}, {}, {}]", base + r, base + r + 100, base + r + 200))
            .collect();
        format!("[{}]", cells.join(", "))
    }

    fn decode(text: &str, options: &DecodeOptions) -> Result<ImportReport<Matrix3<i32>>, ImportError> {
        decode_matrix(&parse(text).unwrap(), options, "matrix", int_layer)
    }

    // ==================== Matrix3 ====================

    #[test]
    fn test_indexing_is_row_column_layer() {
        let mut m: Matrix3<i32> = Matrix3::new(2, 3);
        *m.get_mut(2, 1, 0).unwrap() = 7;
        assert_eq!(m.get(2, 1, 0), Some(&7));
        // column 1 of height 3, row 2
        assert_eq!(m.as_slice()[5 * LAYERS], 7);
        assert_eq!(m.get(3, 0, 0), None);
        assert_eq!(m.get(0, 2, 0), None);
        assert_eq!(m.get(0, 0, 3), None);
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(Matrix3::from_cells(1, 1, vec![0, 0, 0]).is_some());
        assert!(Matrix3::from_cells(1, 1, vec![0, 0]).is_none());
    }

    #[test]
    fn test_iter_yields_column_row() {
        let m: Matrix3<u8> = Matrix3::new(2, 2);
        let positions: Vec<_> = m.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    // ==================== Decoding ====================

    #[test]
    fn test_decode_regular_matrix() {
        let text = format!("[{}, {}]", column(2, 0), column(2, 10));
        let report = decode(&text, &DecodeOptions::strict()).unwrap();
        let m = &report.value;
        assert_eq!((m.width(), m.height()), (2, 2));
        assert_eq!(m.get(1, 1, 2), Some(&211));
        assert_eq!(m.cell(0, 1), Some(&[10, 110, 210][..]));
        assert_eq!(report.total, 4);
    }

    #[test]
    fn test_empty_matrix() {
        let report = decode("[]", &DecodeOptions::strict()).unwrap();
        assert_eq!((report.value.width(), report.value.height()), (0, 0));
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_root_must_be_list() {
        let err = decode("5", &DecodeOptions::permissive()).unwrap_err();
        assert!(matches!(err, ImportError::Invalid(DecodeError::WrongKind { .. })));
    }

    #[test]
    fn test_cell_needs_three_layers() {
        let err = decode("[[[1, 2]]]", &DecodeOptions::strict()).unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.unit, Unit::Cell { column: 0, row: 0 });
        assert_eq!(failure.error.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_failed_cell_stays_default() {
        let text = "[[[1, 2, 3], [4, 5.5, 6]]]";
        let report = decode(text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.value.cell(1, 0), Some(&[0, 0, 0][..]));
        assert_eq!(report.value.cell(0, 0), Some(&[1, 2, 3][..]));
        assert_eq!(report.failures[0].unit, Unit::Cell { column: 0, row: 1 });
    }

    #[test]
    fn test_non_list_column() {
        let text = format!("[{}, 7]", column(2, 0));
        let err = decode(&text, &DecodeOptions::strict()).unwrap_err();
        assert_eq!(err.failure().unwrap().unit, Unit::Column { column: 1 });

        let report = decode(&text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.value.height(), 2);
        assert_eq!(report.total, 3);
        assert_eq!(report.imported(), 2);
    }

    // ==================== Uneven columns ====================

    #[test]
    fn test_strict_short_column_first() {
        let text = format!("[{}, {}]", column(4, 0), column(5, 10));
        let err = decode(&text, &DecodeOptions::strict()).unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.unit, Unit::Column { column: 0 });
        assert_eq!(
            failure.error,
            DecodeError::shape("column (0)", "expected 5 rows, found 4")
        );
    }

    #[test]
    fn test_strict_short_column_last() {
        let text = format!("[{}, {}]", column(5, 0), column(4, 10));
        let err = decode(&text, &DecodeOptions::strict()).unwrap_err();
        let failure = err.failure().unwrap();
        assert_eq!(failure.unit, Unit::Column { column: 0 });
        assert_eq!(
            failure.error,
            DecodeError::shape("column (0)", "expected 4 rows, found 5")
        );
    }

    #[test]
    fn test_permissive_short_column_first() {
        let text = format!("[{}, {}]", column(4, 0), column(5, 10));
        let report = decode(&text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.value.height(), 5);
        assert_eq!(report.total, 10);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].unit, Unit::Cell { column: 0, row: 4 });
        assert_eq!(report.value.get(4, 0, 0), Some(&0));
        assert_eq!(report.value.get(4, 1, 0), Some(&14));
    }

    #[test]
    fn test_permissive_short_column_last() {
        let text = format!("[{}, {}]", column(5, 0), column(4, 10));
        let report = decode(&text, &DecodeOptions::permissive()).unwrap();
        assert_eq!(report.value.height(), 4);
        assert_eq!(report.total, 9);
        assert_eq!(report.imported(), 8);
        assert_eq!(report.failures[0].unit, Unit::Column { column: 0 });
        assert_eq!(report.value.get(3, 0, 0), Some(&3));
    }

    // ==================== Single-value grids ====================

    #[test]
    fn test_uniform_columns() {
        let root = parse("[[1, 2], [3, 4], [5, 6]]").unwrap();
        let (columns, height) = uniform_columns(&root, "grid").unwrap();
        assert_eq!((columns.len(), height), (3, 2));
        assert_eq!(columns[2][1], Node::int(6));
    }

    #[test]
    fn test_uniform_columns_rejects_ragged() {
        let root = parse("[[1, 2, 3], [4, 5]]").unwrap();
        assert_eq!(
            uniform_columns(&root, "grid").unwrap_err(),
            DecodeError::shape("grid column (0)", "expected 2 rows, found 3")
        );

        let root = parse("[[1], 2]").unwrap();
        let err = uniform_columns(&root, "grid").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongKind);
    }

    #[test]
    fn test_parallel_decode_matches_serial() {
        let columns: Vec<String> = (0..20).map(|c| column(10, c * 1000)).collect();
        let text = format!("[{}]", columns.join(", "));
        let serial = decode(&text, &DecodeOptions::strict()).unwrap();
        let parallel = decode(
            &text,
            &DecodeOptions::builder().parallel_threshold(1).max_threads(3).build(),
        )
        .unwrap();
        assert_eq!(serial, parallel);
    }
}
