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

//! Catalog files in the layout the editor ships them.

/// Two categories of tiles, a comment and a blank line.
pub const TILES: &str = r#"-["Stone", color(50, 50, 50)]
[#nm:"Small Stone", #sz:point(1,1), #specs:[1], #specs2:0, #tp:"box", #repeatL:[1], #bfTiles:0, #rnd:1, #ptPos:0, #tags:[]]
[#nm:"Big Stone", #sz:point(2,2), #specs:[1,1,1,1], #specs2:[1,1,1,1], #tp:"box", #repeatL:[1], #bfTiles:1, #rnd:1, #ptPos:0, #tags:["notProp"]]

-- pipes below were imported from a community pack
-"Machinery"(color(255, 100, 0))
[#nm:"Big Pipe", #sz:point(3,3), #specs:[1,1,1,0,0,0,1,1,1], #specs2:void, #tp:"voxelStruct", #repeatL:[1, 9], #bfTiles:1, #rnd:1, #ptPos:0, #tags:[]]
[#nm:"Rock Pile", #sz:point(2,1), #specs:[1,1], #tp:"voxelStructRockType", #bfTiles:0, #rnd:4, #tags:["nonSolid"]]
"#;

/// Number of definitions in [`TILES`].
pub const TILE_COUNT: usize = 4;

/// Bare-text and list headers mixed, as in the material init file.
pub const MATERIALS: &str = r#"-Standard
[#nm:"Concrete", #color:color(150, 150, 150), #tp:"unified"]
[#nm:"Chaotic Stone", #color:color(255, 0, 255), #tp:"tiles"]
-["Custom", color(0, 200, 100)]
[#nm:"Moss Wall", #color:color(0, 200, 0)]
"#;

pub const MATERIAL_COUNT: usize = 3;

/// One prop of each kind placements treat differently.
pub const PROPS: &str = r#"-["Misc", color(255, 0, 0)]
[#nm:"Wire", #tp:"customRope", #depth:0, #segmentLength:3, #collisionDepth:0, #segRadius:1, #grav:0.5, #friction:0.5, #airFric:0.9, #stiff:0, #edgeDirection:0.0, #rigid:0.0, #selfPush:0.0, #sourcePush:0.0]
[#nm:"Leaves", #tp:"variedDecal", #pxlSize:point(40, 40), #vars:3, #random:1]
[#nm:"Block", #tp:"standard", #colorTreatment:"standard", #sz:point(2, 2), #repeatL:[1, 1, 1], #depth:3]
-["Soft", color(0, 255, 0)]
[#nm:"Moss", #tp:"soft", #depth:1, #round:0, #contourExp:0.3, #selfShade:1, #highLightBorder:0.2, #depthAffectHilites:0.8, #shadowBorder:0.1, #smoothShading:1]
[#nm:"Rubble", #tp:"variedSoft", #pxlSize:point(30, 30), #vars:4, #random:0, #colorize:1, #depth:2]
"#;

pub const PROP_COUNT: usize = 5;

/// Ten definition lines with a syntax error on line 6.
pub fn scenario_c_tiles() -> String {
    (1..=10)
        .map(|line| {
            if line == 6 {
                "[#nm:\"Broken\", #sz:point(1,1), #specs:[1], #tp:\"box\", #bfTiles:0".to_string()
            } else {
                format!(
                    "[#nm:\"Tile {}\", #sz:point(1,1), #specs:[1], #specs2:[], #tp:\"box\", #bfTiles:0]",
                    line
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A catalog with `count` generated box tiles under one header.
pub fn generated_tiles(count: usize) -> String {
    let mut text = String::from("-[\"Generated\", color(10, 20, 30)]\n");
    for i in 0..count {
        let w = i % 4 + 1;
        let h = i % 3 + 1;
        let specs = vec!["1"; w * h].join(", ");
        text.push_str(&format!(
            "[#nm:\"Gen {}\", #sz:point({}, {}), #specs:[{}], #specs2:0, #tp:\"box\", #repeatL:[1], #bfTiles:{}, #rnd:1, #tags:[]]\n",
            i,
            w,
            h,
            specs,
            i % 2
        ));
    }
    text
}
