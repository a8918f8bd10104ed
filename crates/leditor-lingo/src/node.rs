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

//! The untyped syntax tree.
//!
//! A parsed line is a single [`Node`]. Nodes are plain data: they are built
//! once by the parser (or by an encoder), read by a decoder and dropped.
//!
//! The [`Display`](fmt::Display) impl writes canonical Lingo text that the
//! parser reads back to an equal tree, with one exception: a [`Number`] whose
//! value is negative is written with a leading `-` and therefore comes back as
//! a [`Node::UnaryOperator`] around its magnitude. Build negative values with
//! [`Node::int`] and [`Node::decimal`] to get the parser's shape directly.

use std::fmt;

/// A numeric literal.
///
/// Both readings are always populated. `is_decimal` records whether the
/// literal had a fractional part or an exponent, which is what lets
/// integer-only contexts reject `1.5` without guessing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Number {
    /// Integer reading. For decimal literals this is the value truncated
    /// toward zero, saturating at the `i64` bounds.
    pub int_value: i64,
    /// Floating point reading.
    pub decimal_value: f64,
    /// Whether the literal was written with `.` or an exponent.
    pub is_decimal: bool,
}

impl Number {
    /// An integer literal.
    pub fn int(value: i64) -> Self {
        Self {
            int_value: value,
            decimal_value: value as f64,
            is_decimal: false,
        }
    }

    /// A decimal literal.
    pub fn decimal(value: f64) -> Self {
        Self {
            // `as` truncates toward zero and saturates.
            int_value: value as i64,
            decimal_value: value,
            is_decimal: true,
        }
    }
}

/// The only unary operator the format knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryKind {
    /// Prefix `-`.
    Negate,
}

/// `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalCall {
    pub name: String,
    pub arguments: Vec<Node>,
}

/// A prefix operator applied to an expression.
///
/// The parser accepts any operand; only decoders insist on a number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOperator {
    pub kind: UnaryKind,
    pub expression: Box<Node>,
}

/// One `#key: value` entry of a property list.
///
/// `key` holds the symbol text without its `#`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub key: String,
    pub value: Node,
}

impl Property {
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Symbols are case-insensitive in Lingo, so keys compare ASCII
    /// case-insensitively: `#tlMatrix` matches `tlmatrix`.
    #[inline]
    pub fn key_matches(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// A node of the syntax tree. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Number(Number),
    String(String),
    /// A bare or `#`-prefixed identifier, stored without the `#`.
    Symbol(String),
    List(Vec<Node>),
    /// Ordered entries; keys may repeat.
    PropertyList(Vec<Property>),
    GlobalCall(GlobalCall),
    UnaryOperator(UnaryOperator),
}

/// Discriminant of [`Node`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Number,
    String,
    Symbol,
    List,
    PropertyList,
    GlobalCall,
    UnaryOperator,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Symbol => "symbol",
            NodeKind::List => "list",
            NodeKind::PropertyList => "property list",
            NodeKind::GlobalCall => "global call",
            NodeKind::UnaryOperator => "unary operator",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Symbol(_) => NodeKind::Symbol,
            Node::List(_) => NodeKind::List,
            Node::PropertyList(_) => NodeKind::PropertyList,
            Node::GlobalCall(_) => NodeKind::GlobalCall,
            Node::UnaryOperator(_) => NodeKind::UnaryOperator,
        }
    }

    /// An integer in the shape the parser produces: negative values become a
    /// negation around the magnitude.
    pub fn int(value: i64) -> Self {
        if value < 0 {
            Node::negate(Node::Number(Number::int(value.unsigned_abs() as i64)))
        } else {
            Node::Number(Number::int(value))
        }
    }

    /// A decimal in the shape the parser produces.
    pub fn decimal(value: f64) -> Self {
        if value.is_sign_negative() && !value.is_nan() {
            Node::negate(Node::Number(Number::decimal(-value)))
        } else {
            Node::Number(Number::decimal(value))
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Node::Symbol(value.into())
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Node>) -> Self {
        Node::GlobalCall(GlobalCall {
            name: name.into(),
            arguments,
        })
    }

    pub fn negate(expression: Node) -> Self {
        Node::UnaryOperator(UnaryOperator {
            kind: UnaryKind::Negate,
            expression: Box::new(expression),
        })
    }

    /// Builds a property list from `(key, value)` pairs.
    pub fn props<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::PropertyList(
            entries
                .into_iter()
                .map(|(key, value)| Property::new(key, value))
                .collect(),
        )
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_property_list(&self) -> Option<&[Property]> {
        match self {
            Node::PropertyList(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&GlobalCall> {
        match self {
            Node::GlobalCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Node::Number(number) => Some(number),
            _ => None,
        }
    }
}

// ==================== Encoding ====================

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        if ch == '"' {
            f.write_str("\"\"")?;
        } else {
            write!(f, "{}", ch)?;
        }
    }
    f.write_str("\"")
}

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Node>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_decimal {
            return write!(f, "{}", self.int_value);
        }
        let v = self.decimal_value;
        let magnitude = v.abs();
        if magnitude >= 1e15 || (magnitude != 0.0 && magnitude < 1e-5) {
            write!(f, "{:e}", v)
        } else if v.fract() == 0.0 {
            // Keep the decimal marker so the value reads back as decimal.
            write!(f, "{:.1}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(number) => write!(f, "{}", number),
            Node::String(value) => write_string(f, value),
            Node::Symbol(value) => write!(f, "#{}", value),
            Node::List(values) => {
                f.write_str("[")?;
                write_list(f, values.iter())?;
                f.write_str("]")
            }
            Node::PropertyList(entries) => {
                if entries.is_empty() {
                    return f.write_str("[:]");
                }
                f.write_str("[")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "#{}: {}", entry.key, entry.value)?;
                }
                f.write_str("]")
            }
            Node::GlobalCall(call) => {
                if is_identifier(&call.name) {
                    f.write_str(&call.name)?;
                } else {
                    write_string(f, &call.name)?;
                }
                f.write_str("(")?;
                write_list(f, call.arguments.iter())?;
                f.write_str(")")
            }
            Node::UnaryOperator(op) => match op.kind {
                UnaryKind::Negate => write!(f, "-{}", op.expression),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Number ====================

    #[test]
    fn test_number_int_has_both_readings() {
        let n = Number::int(42);
        assert_eq!(n.int_value, 42);
        assert_eq!(n.decimal_value, 42.0);
        assert!(!n.is_decimal);
    }

    #[test]
    fn test_number_decimal_truncates() {
        let n = Number::decimal(2.75);
        assert_eq!(n.int_value, 2);
        assert!(n.is_decimal);

        let n = Number::decimal(-2.75);
        assert_eq!(n.int_value, -2);
    }

    #[test]
    fn test_number_decimal_saturates() {
        assert_eq!(Number::decimal(1e300).int_value, i64::MAX);
    }

    // ==================== Constructors ====================

    #[test]
    fn test_negative_int_builds_negation() {
        let node = Node::int(-5);
        match node {
            Node::UnaryOperator(op) => {
                assert_eq!(op.kind, UnaryKind::Negate);
                assert_eq!(*op.expression, Node::Number(Number::int(5)));
            }
            other => panic!("expected negation, got {:?}", other),
        }
    }

    #[test]
    fn test_int_min_magnitude() {
        // |i64::MIN| does not fit i64; it wraps to i64::MIN inside the negation.
        assert_eq!(Node::int(i64::MIN).kind(), NodeKind::UnaryOperator);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Node::string("a").kind(), NodeKind::String);
        assert_eq!(Node::symbol("a").kind(), NodeKind::Symbol);
        assert_eq!(Node::List(vec![]).kind(), NodeKind::List);
        assert_eq!(Node::props(Vec::<(String, Node)>::new()).kind(), NodeKind::PropertyList);
        assert_eq!(Node::call("point", vec![]).kind(), NodeKind::GlobalCall);
        assert_eq!(NodeKind::PropertyList.to_string(), "property list");
    }

    #[test]
    fn test_key_matches_ignores_ascii_case() {
        let prop = Property::new("tlMatrix", Node::int(0));
        assert!(prop.key_matches("tlmatrix"));
        assert!(prop.key_matches("TLMATRIX"));
        assert!(!prop.key_matches("tlmatrix2"));
    }

    // ==================== Display ====================

    #[test]
    fn test_display_numbers() {
        assert_eq!(Node::int(7).to_string(), "7");
        assert_eq!(Node::int(-7).to_string(), "-7");
        assert_eq!(Node::decimal(2.0).to_string(), "2.0");
        assert_eq!(Node::decimal(0.25).to_string(), "0.25");
        assert_eq!(Node::decimal(-1.5).to_string(), "-1.5");
        assert_eq!(Node::decimal(1e20).to_string(), "1e20");
    }

    #[test]
    fn test_display_string_doubles_quotes() {
        assert_eq!(Node::string("say \"hi\"").to_string(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_display_property_list() {
        let node = Node::props([
            ("nm", Node::string("Small Stone")),
            ("sz", Node::call("point", vec![Node::int(1), Node::int(1)])),
        ]);
        assert_eq!(node.to_string(), "[#nm: \"Small Stone\", #sz: point(1, 1)]");
    }

    #[test]
    fn test_display_empty_collections() {
        assert_eq!(Node::List(vec![]).to_string(), "[]");
        assert_eq!(Node::props(Vec::<(String, Node)>::new()).to_string(), "[:]");
    }

    #[test]
    fn test_display_call_with_non_identifier_name() {
        let node = Node::call(
            "Stone",
            vec![Node::call("color", vec![Node::int(50), Node::int(50), Node::int(50)])],
        );
        assert_eq!(node.to_string(), "Stone(color(50, 50, 50))");

        let node = Node::call("Big Stone", vec![]);
        assert_eq!(node.to_string(), "\"Big Stone\"()");
    }
}
