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

//! Categorized catalogs and the line-by-line import shared by the tile,
//! material and prop decoders.
//!
//! A catalog file is a sequence of blocks:
//!
//! ```text
//! -["Stone", color(50, 50, 50)]
//! [#nm: "Small Stone", #tp: "box", ...]
//! [#nm: "Big Stone", #tp: "box", ...]
//! -- a comment
//! -"Machinery"(color(255, 0, 0))
//! [#nm: "Pipe", ...]
//! ```
//!
//! Every definition joins the most recent header. Definitions before the
//! first header join an unnamed, black category. A header that fails to
//! decode still opens a group, named by its raw text, so the definitions
//! after it are never filed under the previous category.

use crate::access::{cast, to_color};
use crate::error::{DecodeError, Failure, ImportError, Unit};
use crate::fanout;
use crate::options::DecodeOptions;
use crate::report::ImportReport;
use crate::source::{classify, numbered_lines, LineKind};
use crate::types::Color;
use leditor_lingo::{parse_at_line, Node, ParseLimits};
use std::collections::HashMap;
use tracing::debug;

/// A display grouping for definitions. No decoding semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub name: String,
    pub color: Color,
}

impl Category {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// The group for definitions that precede every header.
    pub fn uncategorized() -> Self {
        Self::default()
    }
}

/// Anything stored in a catalog under a name.
pub trait Definition {
    fn name(&self) -> &str;
}

/// One category and its definitions, in file order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryGroup<D> {
    pub category: Category,
    pub definitions: Vec<D>,
}

/// Definitions grouped by category, in file order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog<D> {
    pub groups: Vec<CategoryGroup<D>>,
}

impl<D> Default for Catalog<D> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<D> Catalog<D> {
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.groups.iter().map(|g| &g.category)
    }

    /// All definitions, ignoring categories.
    pub fn definitions(&self) -> impl Iterator<Item = &D> {
        self.groups.iter().flat_map(|g| g.definitions.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &D)> {
        self.groups
            .iter()
            .flat_map(|g| g.definitions.iter().map(move |d| (&g.category, d)))
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.definitions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn group(&self, category: &str) -> Option<&CategoryGroup<D>> {
        self.groups.iter().find(|g| g.category.name == category)
    }

    pub fn into_definitions(self) -> Vec<D> {
        self.groups.into_iter().flat_map(|g| g.definitions).collect()
    }
}

impl<D: Definition> Catalog<D> {
    pub fn find(&self, name: &str) -> Option<&D> {
        self.definitions().find(|d| d.name() == name)
    }

    /// Name to definition. When names repeat the first one wins.
    pub fn to_map(&self) -> HashMap<String, D>
    where
        D: Clone,
    {
        let mut map = HashMap::with_capacity(self.len());
        for definition in self.definitions() {
            map.entry(definition.name().to_string())
                .or_insert_with(|| definition.clone());
        }
        map
    }
}

/// Decodes a category header node.
///
/// Accepts the list form `["Stone", color(50, 50, 50)]` and the call form
/// `"Stone"(color(50, 50, 50))`.
pub fn decode_category(node: &Node) -> Result<Category, DecodeError> {
    const KEY: &str = "category";
    match node {
        Node::List(values) => {
            if values.len() != 2 {
                return Err(DecodeError::shape(
                    KEY,
                    format!("expected [name, color(r, g, b)], found {} elements", values.len()),
                ));
            }
            let name: &str = cast(&values[0], "category name")?;
            let color = to_color(cast(&values[1], "category color")?, "category color")?;
            Ok(Category::new(name, color))
        }
        Node::GlobalCall(call) => {
            if call.arguments.len() != 1 {
                return Err(DecodeError::shape(
                    KEY,
                    format!("expected name(color(r, g, b)), found {} arguments", call.arguments.len()),
                ));
            }
            let color = to_color(cast(&call.arguments[0], "category color")?, "category color")?;
            Ok(Category::new(call.name.as_str(), color))
        }
        other => Err(DecodeError::wrong_kind(KEY, "a list or a call", other.kind())),
    }
}

/// Parses and decodes the text after a header's `-`.
pub(crate) fn parse_header(raw: &str, line: usize, limits: &ParseLimits) -> Result<Category, DecodeError> {
    let node = parse_at_line(raw, line, limits)?;
    decode_category(&node)
}

/// A catalog line that carries data.
#[derive(Clone, Copy)]
enum CatalogLine<'a> {
    Header(&'a str),
    Record(&'a str),
}

enum Entry<D> {
    Header(Category),
    Definition(D),
}

/// Decodes every header and record line of `text` independently, then
/// assembles them into a catalog in file order.
pub(crate) fn import_catalog<D, H, F>(
    text: &str,
    options: &DecodeOptions,
    what: &str,
    header: H,
    decode: F,
) -> Result<ImportReport<Catalog<D>>, ImportError>
where
    D: Send,
    H: Fn(&str, usize, &ParseLimits) -> Result<Category, DecodeError> + Sync,
    F: Fn(&Node) -> Result<D, DecodeError> + Sync,
{
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let units: Vec<(usize, CatalogLine<'_>)> = numbered_lines(text)
        .filter_map(|(line, raw)| match classify(raw) {
            LineKind::Header(raw) => Some((line, CatalogLine::Header(raw))),
            LineKind::Record(raw) => Some((line, CatalogLine::Record(raw))),
            LineKind::Blank | LineKind::Comment => None,
        })
        .collect();
    debug!(what, lines = units.len(), "importing catalog");

    let decoded = fanout::map_units(options, units.len(), |i| {
        let (line, kind) = units[i];
        match kind {
            CatalogLine::Header(raw) => header(raw, line, &options.limits).map(Entry::Header),
            CatalogLine::Record(raw) => parse_at_line(raw, line, &options.limits)
                .map_err(DecodeError::from)
                .and_then(|node| decode(&node))
                .map(Entry::Definition),
        }
    })?;

    let mut catalog = Catalog::default();
    let mut failures = Vec::new();
    let mut failed_headers = 0;
    for ((line, kind), result) in units.iter().zip(decoded) {
        match result {
            Ok(Entry::Header(category)) => catalog.groups.push(CategoryGroup {
                category,
                definitions: Vec::new(),
            }),
            Ok(Entry::Definition(definition)) => {
                if catalog.groups.is_empty() {
                    catalog.groups.push(CategoryGroup {
                        category: Category::uncategorized(),
                        definitions: Vec::new(),
                    });
                }
                if let Some(group) = catalog.groups.last_mut() {
                    group.definitions.push(definition);
                }
            }
            Err(error) => {
                if let CatalogLine::Header(raw) = kind {
                    failed_headers += 1;
                    catalog.groups.push(CategoryGroup {
                        category: Category::new(raw.trim(), Color::default()),
                        definitions: Vec::new(),
                    });
                }
                failures.push(Failure::new(Unit::Line(*line), error));
            }
        }
    }

    // Headers count only when they fail, so `imported` counts definitions.
    let records = units.iter().filter(|(_, kind)| matches!(kind, CatalogLine::Record(_))).count();
    let total = records + failed_headers;
    ImportReport::new(catalog, total, failures).finish(options, what)
}
