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

//! Whole project files.

use super::geometry::{geometry_line, tile_matrix_line, AIR, DEFAULT_TILE, SOLID};
use super::placements::{placement, props_line};
use std::collections::HashMap;

/// Builds a project file line by line.
///
/// Defaults produce a valid project: solid bottom row, default tiles,
/// one camera, and one `Moss` placement on the props line.
///
/// ```rust
/// use leditor_test::fixtures::level::LevelBuilder;
///
/// let text = LevelBuilder::new(3, 2)
///     .line(8, "[#waterLevel: 4, #waterInFront: 0]")
///     .build();
/// assert_eq!(text.lines().nth(7), Some("[#waterLevel: 4, #waterInFront: 0]"));
/// ```
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    width: usize,
    height: usize,
    cells: HashMap<(usize, usize), String>,
    lines: HashMap<usize, String>,
    effects: Vec<String>,
    props: Option<Vec<String>>,
}

impl LevelBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
            lines: HashMap::new(),
            effects: Vec::new(),
            props: None,
        }
    }

    /// Replaces one geometry cell.
    pub fn geometry_cell(mut self, column: usize, row: usize, cell: &str) -> Self {
        self.cells.insert((column, row), cell.to_string());
        self
    }

    /// Replaces line `number` (1-based) verbatim.
    pub fn line(mut self, number: usize, text: &str) -> Self {
        self.lines.insert(number, text.to_string());
        self
    }

    /// Replaces the entries of the effects line.
    pub fn effects(mut self, effects: &[String]) -> Self {
        self.effects = effects.to_vec();
        self
    }

    /// Replaces the placements on the props line.
    pub fn props(mut self, placements: &[&str]) -> Self {
        self.props = Some(placements.iter().map(|p| p.to_string()).collect());
        self
    }

    fn default_line(&self, number: usize) -> String {
        match number {
            1 => geometry_line(self.width, self.height, |column, row| {
                if let Some(cell) = self.cells.get(&(column, row)) {
                    cell.clone()
                } else if row + 1 == self.height {
                    SOLID.to_string()
                } else {
                    AIR.to_string()
                }
            }),
            2 => tile_matrix_line(self.width, self.height, |_, _| DEFAULT_TILE.to_string()),
            3 => format!(
                "[#lastKeys: [], #Keys: [], #effects: [{}], #emPos: point(1, 1), #editEffect: 0, #selectEditEffect: 0, #mode: #createNew, #brushSize: 5]",
                self.effects.join(", ")
            ),
            4 => "[#pos: point(0, 0), #rot: 0, #sz: point(50, 70), #col: 1, #Keys: [#m1: 0, #m2: 0], #lastKeys: [#m1: 0, #m2: 0], #lastTm: 0, #lightAngle: 180, #flatness: 1, #lightRect: rect(1000, 1000, -1000, -1000), #paintShape: \"pxl\"]".to_string(),
            5 => "[#timeLimit: 4800, #defaultTerrain: 1, #maxFlies: 10, #flySpawnRate: 50, #lizards: [], #ambientSounds: [], #music: \"NONE\", #tags: [], #lightType: \"Static\", #waterDrips: 1, #lightRect: rect(0, 0, 1040, 800), #Matrix: []]".to_string(),
            6 => "[#mouse: 1, #lastMouse: 0, #mouseClick: 0, #pal: 1, #pals: [[#detCol: color(255, 0, 0)]], #eCol1: 1, #eCol2: 2, #totEcols: 5, #tileSeed: 225, #colGlows: [0, 0], #size: point(52, 40), #extraTiles: [12, 3, 12, 5], #light: 1]".to_string(),
            7 => "[#cameras: [point(-20, 10)], #selectedCamera: 0, #quads: [[[0, 0], [0, 0], [0, 0], [0, 0]]], #Keys: [#n: 0, #d: 0, #e: 0, #p: 0], #lastKeys: [#n: 0, #d: 0, #e: 0, #p: 0]]".to_string(),
            8 => "[#waterLevel: -1, #waterInFront: 1, #waveLength: 60, #waveAmplitude: 5, #waveSpeed: 10]".to_string(),
            _ => {
                let placements = self
                    .props
                    .clone()
                    .unwrap_or_else(|| vec![placement(-1, "Moss", "#renderorder: 0, #seed: 77, #renderTime: 0")]);
                props_line(&placements)
            }
        }
    }

    pub fn build(&self) -> String {
        (1..=9)
            .map(|number| self.lines.get(&number).cloned().unwrap_or_else(|| self.default_line(number)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An effect entry with `strength` in every cell of a `width` x `height`
/// level. `options` is the text inside the options list.
pub fn effect(name: &str, width: usize, height: usize, strength: &str, options: &str) -> String {
    let column = format!("[{}]", vec![strength; height].join(", "));
    let matrix = vec![column.as_str(); width].join(", ");
    format!(
        "[#nm: \"{}\", #tp: \"nn\", #crossScreen: 0, #mtrx: [{}], #options: [{}]]",
        name, matrix, options
    )
}
