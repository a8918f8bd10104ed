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

//! End-to-end tests for the `leditor` binary.

use assert_cmd::Command;
use leditor_test::fixtures::{catalogs, geometry, level::{effect, LevelBuilder}, placements};
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn leditor_cmd() -> Command {
    Command::cargo_bin("leditor").expect("Failed to find leditor binary")
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version =====

#[test]
fn test_help_output() {
    leditor_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leditor - Lingo level data toolkit"))
        .stdout(predicate::str::contains("tiles"))
        .stdout(predicate::str::contains("level"));
}

#[test]
fn test_no_subcommand_fails() {
    leditor_cmd().assert().failure();
}

// ===== parse =====

#[test]
fn test_parse_catalog_file() {
    let file = create_temp_file(catalogs::TILES);
    leditor_cmd()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Records: {}", catalogs::TILE_COUNT)));
}

#[test]
fn test_parse_reports_bad_lines() {
    let file = create_temp_file(&catalogs::scenario_c_tiles());
    leditor_cmd()
        .arg("parse")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 10 lines failed to parse"));
}

#[test]
fn test_parse_single_line_prints_canonical_text() {
    let file = create_temp_file("[#a: 1]\n[#sz:point( 1,2 )]\n");
    leditor_cmd()
        .args(["parse", "--line", "2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("point(1, 2)"));
}

#[test]
fn test_parse_missing_line() {
    let file = create_temp_file("[1]\n");
    leditor_cmd()
        .args(["parse", "--line", "5"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no line 5"));
}

// ===== catalogs =====

#[test]
fn test_tiles_strict_success() {
    let file = create_temp_file(catalogs::TILES);
    leditor_cmd()
        .arg("tiles")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Categories: 2"))
        .stdout(predicate::str::contains("4 of 4 records imported, 0 failed"));
}

#[test]
fn test_tiles_strict_failure_names_line() {
    let file = create_temp_file(&catalogs::scenario_c_tiles());
    leditor_cmd()
        .arg("tiles")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: line 6:"));
}

#[test]
fn test_tiles_permissive_reports_failure() {
    let file = create_temp_file(&catalogs::scenario_c_tiles());
    leditor_cmd()
        .args(["tiles", "--permissive"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("line 6"))
        .stdout(predicate::str::contains("9 of 10 records imported, 1 failed"));
}

#[test]
fn test_materials_json() {
    let file = create_temp_file(catalogs::MATERIALS);
    let output = leditor_cmd()
        .args(["materials", "--json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let text = value.to_string();
    assert!(text.contains("Chaotic Stone"));
    assert!(text.contains("Moss Wall"));
}

#[test]
fn test_props_catalog() {
    let file = create_temp_file(catalogs::PROPS);
    leditor_cmd()
        .args(["props", "-j", "2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ropes: 1"));
}

#[test]
fn test_zero_threads_rejected() {
    let file = create_temp_file(catalogs::PROPS);
    leditor_cmd().args(["props", "-j", "0"]).arg(file.path()).assert().failure();
}

// ===== matrices =====

#[test]
fn test_geometry_of_level_file() {
    let file = create_temp_file(&LevelBuilder::new(4, 3).build());
    leditor_cmd()
        .arg("geometry")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Size: 4 x 3"))
        .stdout(predicate::str::contains("Solid cells (layer 1): 4"));
}

#[test]
fn test_geometry_ragged_permissive() {
    let file = create_temp_file(&geometry::ragged_geometry(&[4, 5]));
    leditor_cmd()
        .arg("geometry")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("column (0)"));

    leditor_cmd()
        .args(["geometry", "--permissive"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("9 of 10 records imported, 1 failed"));
}

#[test]
fn test_tile_matrix_of_level_file() {
    let file = create_temp_file(&LevelBuilder::new(2, 2).build());
    leditor_cmd()
        .arg("tile-matrix")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Default material: Concrete"));
}

#[test]
fn test_effects_of_level_file() {
    let text = LevelBuilder::new(3, 2)
        .effects(&[
            effect("Slime", 3, 2, "50", "[\"Layers\", [\"All\", \"1\"], \"All\"]"),
            "[#nm: \"Broken\", #mtrx: [[1, 2], [3]]]".to_string(),
        ])
        .build();
    let file = create_temp_file(&text);
    leditor_cmd()
        .arg("effects")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3: effect 1: "));

    leditor_cmd()
        .args(["effects", "--permissive"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Slime (3 x 2, 1 options)"))
        .stdout(predicate::str::contains("1 of 2 records imported, 1 failed"));
}

// ===== placements and levels =====

#[test]
fn test_placements_unknown_name() {
    let props = create_temp_file(catalogs::PROPS);
    let line = placements::props_line(&[
        placements::placement(0, "Moss", "#renderorder: 0, #seed: 1, #renderTime: 0"),
        placements::placement(0, "Nowhere", "#renderorder: 0, #seed: 1, #renderTime: 0"),
    ]);
    let file = create_temp_file(&line);

    leditor_cmd()
        .arg("placements")
        .arg(file.path())
        .arg("--props")
        .arg(props.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("definition not found: \"Nowhere\""));

    leditor_cmd()
        .args(["placements", "--permissive"])
        .arg(file.path())
        .arg("--props")
        .arg(props.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Placements: 1"));
}

#[test]
fn test_level_with_catalogs() {
    let props = create_temp_file(catalogs::PROPS);
    let tiles = create_temp_file(catalogs::TILES);
    let file = create_temp_file(&LevelBuilder::new(3, 3).build());
    leditor_cmd()
        .arg("level")
        .arg(file.path())
        .arg("--props")
        .arg(props.path())
        .arg("--tiles")
        .arg(tiles.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Geometry: 3 x 3"))
        .stdout(predicate::str::contains("Placements: 1"));
}

#[test]
fn test_level_json_skips_diagnostics() {
    let file = create_temp_file(&LevelBuilder::new(2, 2).build());
    let output = leditor_cmd().args(["level", "--json"]).arg(file.path()).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["tile_seed"], 225);
    assert_eq!(value["effects"], serde_json::json!([]));
    assert!(value.get("props_error").is_none());
}

#[test]
fn test_level_too_short() {
    let file = create_temp_file("[]\n[]\n");
    leditor_cmd()
        .arg("level")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected at least 8 lines, found 2"));
}

#[test]
fn test_bad_catalog_is_named() {
    let props = create_temp_file("");
    let file = create_temp_file(&LevelBuilder::new(1, 1).build());
    leditor_cmd()
        .arg("level")
        .arg(file.path())
        .arg("--props")
        .arg(props.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("in catalog"));
}

#[test]
fn test_file_size_limit() {
    let file = create_temp_file(catalogs::TILES);
    leditor_cmd()
        .env("LEDITOR_MAX_FILE_SIZE", "10")
        .arg("tiles")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== completion =====

#[test]
fn test_completion_bash() {
    leditor_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leditor"));
}

#[test]
fn test_completion_unknown_shell() {
    leditor_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}
