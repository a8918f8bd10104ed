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

//! Effect layers of a level.
//!
//! The third line of a project lists the effects painted over the level:
//!
//! ```text
//! [#effects: [[#nm: "Slime", #mtrx: [[0, 12.5], [100, 0]], #options: [["Layers", ["All", "1", "2", "3"], "All"]]]], ...]
//! ```
//!
//! `mtrx` holds one strength per cell, column by column. Each option is
//! `[name, [choices], choice]`, where the choice is a string or a number.

use crate::access::{cast, get, get_optional, to_float, to_int, to_string_list};
use crate::error::{DecodeError, Failure, ImportError, Unit};
use crate::fanout;
use crate::matrix::uniform_columns;
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use leditor_lingo::{parse_with_limits, Node, Property};
use tracing::debug;

/// The selected value of an [`EffectOption`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionChoice {
    Text(String),
    Number(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectOption {
    pub name: String,
    /// Values offered by the editor. Numeric options leave this empty.
    pub choices: Vec<String>,
    pub choice: OptionChoice,
}

/// Per-cell effect strength, stored column-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectMatrix {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl EffectMatrix {
    /// A matrix with zero strength everywhere.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn offset(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.height && column < self.width).then(|| column * self.height + row)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.offset(row, column).map(|at| self.values[at])
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut f32> {
        self.offset(row, column).map(move |at| &mut self.values[at])
    }

    /// One column, top to bottom.
    pub fn column(&self, column: usize) -> Option<&[f32]> {
        (column < self.width).then(|| &self.values[column * self.height..(column + 1) * self.height])
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub name: String,
    pub options: Vec<EffectOption>,
    pub matrix: EffectMatrix,
}

impl Effect {
    /// The option called `name`, matched ASCII case-insensitively.
    pub fn option(&self, name: &str) -> Option<&EffectOption> {
        self.options.iter().find(|o| o.name.eq_ignore_ascii_case(name))
    }
}

fn decode_choice(node: &Node, key: &str) -> Result<OptionChoice, DecodeError> {
    match node {
        Node::String(text) => Ok(OptionChoice::Text(text.clone())),
        Node::Number(_) | Node::UnaryOperator(_) => to_int(node, key).map(OptionChoice::Number),
        other => Err(DecodeError::wrong_kind(key, "a string or a number", other.kind())),
    }
}

fn decode_option(node: &Node, index: usize) -> Result<EffectOption, DecodeError> {
    let key = format!("options[{}]", index);
    let fields: &[Node] = cast(node, &key)?;
    let [name, choices, choice] = fields else {
        return Err(DecodeError::shape(
            key,
            format!("expected [name, [choices], choice], found {} elements", fields.len()),
        ));
    };
    Ok(EffectOption {
        name: cast::<&str>(name, &key)?.to_string(),
        choices: to_string_list(cast(choices, &key)?, &key)?,
        choice: decode_choice(choice, &key)?,
    })
}

fn decode_strengths(node: &Node) -> Result<EffectMatrix, DecodeError> {
    let (columns, height) = uniform_columns(node, "mtrx")?;
    let mut values = Vec::with_capacity(columns.len() * height);
    for (column, rows) in columns.iter().enumerate() {
        for (row, cell) in rows.iter().enumerate() {
            let strength = to_float(cell, "mtrx").map_err(|_| {
                DecodeError::wrong_kind(
                    format!("mtrx column ({}), row ({})", column, row),
                    "a number",
                    cell.kind(),
                )
            })?;
            values.push(strength);
        }
    }
    Ok(EffectMatrix {
        width: columns.len(),
        height,
        values,
    })
}

/// Decodes one `[#nm: ..., #mtrx: ..., #options: ...]` entry.
///
/// An absent `options` key reads as no options. Other keys are ignored.
///
/// # Errors
///
/// A missing `nm` or `mtrx`, a ragged or non-numeric `mtrx`, or an option
/// that is not `[name, [choices], choice]`. Errors after the name is known
/// carry it.
pub fn decode_effect(node: &Node) -> Result<Effect, DecodeError> {
    let props: &[Property] = cast(node, "effect")?;
    let name: &str = get(props, "nm")?;

    let rest = || -> Result<Effect, DecodeError> {
        let options = match get_optional::<&[Node]>(props, "options")? {
            Some(list) => list
                .iter()
                .enumerate()
                .map(|(i, option)| decode_option(option, i))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(Effect {
            name: name.to_string(),
            options,
            matrix: decode_strengths(get(props, "mtrx")?)?,
        })
    };
    rest().map_err(|e| e.within(name))
}

/// Checks an effect against the level size. An empty matrix stands for
/// zero strength everywhere and is widened to the level.
fn fit(mut effect: Effect, width: usize, height: usize) -> Result<Effect, DecodeError> {
    if effect.matrix.is_empty() {
        effect.matrix = EffectMatrix::new(width, height);
        return Ok(effect);
    }
    let found = (effect.matrix.width(), effect.matrix.height());
    if found != (width, height) {
        return Err(DecodeError::shape(
            "mtrx",
            format!("expected {} x {} cells, found {} x {}", width, height, found.0, found.1),
        )
        .within(&effect.name));
    }
    Ok(effect)
}

/// Decodes a parsed effects line: `[#effects: [...], ...]` or a bare list.
///
/// With `size` set to `(width, height)`, every matrix must have exactly
/// that size; an empty one is filled with zeros. One unit of work per
/// effect.
///
/// # Errors
///
/// [`ImportError::Invalid`] when the line has no effect list. In strict
/// mode, [`ImportError::Failed`] for the first effect that fails.
pub fn decode_effects_node(
    node: &Node,
    size: Option<(usize, usize)>,
    options: &DecodeOptions,
) -> Result<ImportReport<Vec<Effect>>, ImportError> {
    let list: &[Node] = match node {
        Node::PropertyList(props) => get(props, "effects").map_err(ImportError::Invalid)?,
        other => cast(other, "effects").map_err(ImportError::Invalid)?,
    };
    debug!(effects = list.len(), "decoding effects");

    let decoded = fanout::map_units(options, list.len(), |i| {
        let effect = decode_effect(&list[i])?;
        match size {
            Some((width, height)) => fit(effect, width, height),
            None => Ok(effect),
        }
    })?;

    let mut effects = Vec::with_capacity(list.len());
    let mut failures = Vec::new();
    for (i, result) in decoded.into_iter().enumerate() {
        match result {
            Ok(effect) => effects.push(effect),
            Err(error) => failures.push(Failure::new(Unit::Effect(i), error)),
        }
    }
    ImportReport::new(effects, list.len(), failures).finish(options, "effects")
}

/// Decodes an effects line on its own, keeping each matrix at its written
/// size.
pub fn decode_effects_with(text: &str, options: &DecodeOptions) -> Result<ImportReport<Vec<Effect>>, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let node = parse_with_limits(text, &options.limits).map_err(|e| ImportError::Invalid(e.into()))?;
    decode_effects_node(&node, None, options)
}

pub fn decode_effects(text: &str) -> Result<Vec<Effect>, ImportError> {
    decode_effects_with(text, &DecodeOptions::strict()).map(|report| report.value)
}
