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

//! Prop placement records.

/// A 20 x 20 footprint at the origin.
pub const QUAD: &str = "[point(0, 0), point(20, 0), point(20, 20), point(0, 20)]";

/// A placement with the given settings entries and no extra keys.
pub fn placement(depth: i32, name: &str, settings: &str) -> String {
    format!(
        "[{}, \"{}\", point(1, 1), {}, [#settings: [{}]]]",
        depth, name, QUAD, settings
    )
}

/// A rope placement with `points` simulated segments.
pub fn rope(name: &str, release: i32, points: usize) -> String {
    let points: Vec<String> = (0..points)
        .map(|i| format!("point({}, {}.5)", i * 10, i))
        .collect();
    format!(
        "[0, \"{}\", point(1, 1), {}, [#settings: [#renderorder: 0, #seed: 300, #renderTime: 0, #release: {}], #points: [{}]]]",
        name,
        QUAD,
        release,
        points.join(", ")
    )
}

/// A props line as stored on line 9 of a project.
pub fn props_line(placements: &[String]) -> String {
    format!(
        "[#props: [{}], #lastKeys: [#w: 0, #a: 0], #Keys: [#w: 0, #a: 0], #workLayer: 1, #lstMsPs: point(0, 0), \
         #pmPos: point(1, 1), #pmSavPosL: [], #propRotation: 0, #propStretchX: 1, #propStretchY: 1, \
         #propFlipX: 1, #propFlipY: 1, #depth: 0, #color: 0]",
        placements.join(", ")
    )
}

/// `count` placements cycling through the props of [`super::catalogs::PROPS`].
pub fn mixed_placements(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => placement(-(i as i32 % 10), "Moss", &format!("#renderorder: 0, #seed: {}, #renderTime: 0", i)),
            1 => placement(0, "Leaves", &format!("#seed: {}, #variation: {}", i, i % 3)),
            2 => placement(-2, "Block", "#renderorder: 1, #seed: 0, #renderTime: 0"),
            _ => rope("Wire", 1, 4),
        })
        .collect()
}
