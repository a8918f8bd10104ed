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

//! Malformed Lingo lines for parser error tests.

/// `(name, line)` pairs that must fail to parse.
pub fn invalid_lingo_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("unclosed_list", "[1, 2"),
        ("unclosed_property_list", "[#nm: \"a\""),
        ("unclosed_string", "\"abc"),
        ("unclosed_call", "point(1, 2"),
        ("stray_close", "]"),
        ("trailing_input", "[1] [2]"),
        ("missing_value", "[#nm: ]"),
        ("dangling_comma", "[1, ]"),
        ("double_colon", "[#a:: 1]"),
        ("bare_minus", "-"),
        ("bad_number", "1.2.3"),
        ("number_key", "[1: 2]"),
    ]
}
