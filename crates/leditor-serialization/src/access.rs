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

//! Accessor utilities: lookups and coercions over syntax nodes.
//!
//! Every decoder reads nodes through these functions and nowhere else, so
//! error wording is uniform and the negation unwrap lives in one place.
//!
//! # Key policy
//!
//! Property-list keys are matched ASCII case-insensitively and the *first*
//! matching entry wins, for required and optional keys alike. Later
//! duplicates are ignored.
//!
//! # Example
//!
//! ```
//! use leditor_lingo::parse;
//! use leditor_serialization::access::{self, get, try_get};
//!
//! let node = parse("[#nm: \"Pipe\", #sz: point(2, -1)]").unwrap();
//! let props = node.as_property_list().unwrap();
//!
//! let name: &str = get(props, "nm").unwrap();
//! assert_eq!(name, "Pipe");
//! assert!(try_get::<&[leditor_lingo::Node]>(props, "nm").is_none());
//!
//! let size = access::get_int_pair(props, "sz").unwrap();
//! assert_eq!((size.x, size.y), (2, -1));
//! ```

use crate::error::DecodeError;
use crate::types::{Color, IntPoint, Quad, Vec2};
use leditor_lingo::{GlobalCall, Node, Number, Property, UnaryKind};

/// A borrowed view of a node of one particular kind.
pub trait FromNode<'a>: Sized {
    /// How the expected kind reads in an error message.
    const EXPECTED: &'static str;

    fn from_node(node: &'a Node) -> Option<Self>;
}

impl<'a> FromNode<'a> for &'a Node {
    const EXPECTED: &'static str = "a value";

    fn from_node(node: &'a Node) -> Option<Self> {
        Some(node)
    }
}

impl<'a> FromNode<'a> for &'a str {
    const EXPECTED: &'static str = "a string";

    fn from_node(node: &'a Node) -> Option<Self> {
        node.as_str()
    }
}

impl<'a> FromNode<'a> for &'a [Node] {
    const EXPECTED: &'static str = "a list";

    fn from_node(node: &'a Node) -> Option<Self> {
        node.as_list()
    }
}

impl<'a> FromNode<'a> for &'a [Property] {
    const EXPECTED: &'static str = "a property list";

    fn from_node(node: &'a Node) -> Option<Self> {
        node.as_property_list()
    }
}

impl<'a> FromNode<'a> for &'a GlobalCall {
    const EXPECTED: &'static str = "a global call";

    fn from_node(node: &'a Node) -> Option<Self> {
        node.as_call()
    }
}

// ==================== Lookup ====================

/// First entry whose key matches.
pub fn find<'a>(props: &'a [Property], key: &str) -> Option<&'a Node> {
    props.iter().find(|p| p.key_matches(key)).map(|p| &p.value)
}

/// First entry whose key matches, if it has kind `T`. Never fails.
pub fn try_get<'a, T: FromNode<'a>>(props: &'a [Property], key: &str) -> Option<T> {
    find(props, key).and_then(T::from_node)
}

/// Required entry of kind `T`.
///
/// # Errors
///
/// [`DecodeError::MissingProperty`] when no key matches, and
/// [`DecodeError::WrongKind`] when the first match is not a `T`.
pub fn get<'a, T: FromNode<'a>>(props: &'a [Property], key: &str) -> Result<T, DecodeError> {
    let node = find(props, key).ok_or_else(|| DecodeError::missing(key))?;
    cast(node, key)
}

/// Optional entry: absent is `None`, present with the wrong kind is an error.
pub fn get_optional<'a, T: FromNode<'a>>(
    props: &'a [Property],
    key: &str,
) -> Result<Option<T>, DecodeError> {
    find(props, key).map(|node| cast(node, key)).transpose()
}

/// Views `node` as kind `T`, naming `key` on failure.
///
/// # Errors
///
/// [`DecodeError::WrongKind`] with `key`, the expected kind and the kind
/// found.
pub fn cast<'a, T: FromNode<'a>>(node: &'a Node, key: &str) -> Result<T, DecodeError> {
    T::from_node(node).ok_or_else(|| DecodeError::wrong_kind(key, T::EXPECTED, node.kind()))
}

// ==================== Numbers ====================

/// A number with its sign resolved: `Number` or `-Number`.
fn signed_number(node: &Node) -> Option<(bool, &Number)> {
    match node {
        Node::Number(n) => Some((false, n)),
        Node::UnaryOperator(op) => match (op.kind, op.expression.as_ref()) {
            (UnaryKind::Negate, Node::Number(n)) => Some((true, n)),
            _ => None,
        },
        _ => None,
    }
}

fn not_a_number(node: &Node, key: &str) -> DecodeError {
    DecodeError::wrong_kind(key, "a number", node.kind())
}

fn narrow(value: i64, key: &str) -> Result<i32, DecodeError> {
    i32::try_from(value).map_err(|_| DecodeError::invalid_value(key, value.to_string()))
}

/// Integer reading of a number or negated number. Decimals truncate.
///
/// # Errors
///
/// [`DecodeError::WrongKind`] for anything but a number or a negation of
/// one, and [`DecodeError::InvalidValue`] when the value does not fit in
/// an `i32`.
///
/// # Examples
///
/// ```
/// use leditor_lingo::parse;
/// use leditor_serialization::access::to_int;
///
/// assert_eq!(to_int(&parse("-4").unwrap(), "x").unwrap(), -4);
/// assert_eq!(to_int(&parse("2.9").unwrap(), "x").unwrap(), 2);
/// assert!(to_int(&parse("\"4\"").unwrap(), "x").is_err());
/// ```
pub fn to_int(node: &Node, key: &str) -> Result<i32, DecodeError> {
    let (negative, n) = signed_number(node).ok_or_else(|| not_a_number(node, key))?;
    let value = if negative {
        n.int_value.saturating_neg()
    } else {
        n.int_value
    };
    narrow(value, key)
}

/// Like [`to_int`] but rejects decimal literals.
///
/// # Errors
///
/// As [`to_int`], plus [`DecodeError::InvalidValue`] carrying the literal
/// when it has a fractional part or an exponent.
pub fn to_exact_int(node: &Node, key: &str) -> Result<i32, DecodeError> {
    let (_, n) = signed_number(node).ok_or_else(|| not_a_number(node, key))?;
    if n.is_decimal {
        let text = match node {
            Node::UnaryOperator(_) => format!("-{}", n),
            _ => n.to_string(),
        };
        return Err(DecodeError::invalid_value(key, text));
    }
    to_int(node, key)
}

/// Decimal reading of a number or negated number.
///
/// # Errors
///
/// [`DecodeError::WrongKind`] for anything but a number or a negation of
/// one.
pub fn to_float(node: &Node, key: &str) -> Result<f32, DecodeError> {
    let (negative, n) = signed_number(node).ok_or_else(|| not_a_number(node, key))?;
    let value = if negative { -n.decimal_value } else { n.decimal_value };
    Ok(value as f32)
}

/// [`to_int`] without the error.
pub fn try_to_int(node: &Node) -> Option<i32> {
    to_int(node, "").ok()
}

/// [`to_float`] without the error.
pub fn try_to_float(node: &Node) -> Option<f32> {
    to_float(node, "").ok()
}

/// Flags are written as `0`/`1`; `TRUE`/`FALSE` symbols are read too.
/// Any non-zero number is `true`.
///
/// # Errors
///
/// [`DecodeError::InvalidValue`] for any other symbol, otherwise the errors
/// of [`to_int`].
pub fn to_bool(node: &Node, key: &str) -> Result<bool, DecodeError> {
    if let Node::Symbol(s) = node {
        if s.eq_ignore_ascii_case("true") {
            return Ok(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Ok(false);
        }
        return Err(DecodeError::invalid_value(key, s.as_str()));
    }
    Ok(to_int(node, key)? != 0)
}

/// Required integer entry.
///
/// # Errors
///
/// [`DecodeError::MissingProperty`] when `key` is absent, otherwise the
/// errors of [`to_int`].
pub fn get_int(props: &[Property], key: &str) -> Result<i32, DecodeError> {
    to_int(get::<&Node>(props, key)?, key)
}

/// Integer entry, `default` when absent.
///
/// # Errors
///
/// The errors of [`to_int`] when the key is present.
pub fn opt_int(props: &[Property], key: &str, default: i32) -> Result<i32, DecodeError> {
    find(props, key).map_or(Ok(default), |node| to_int(node, key))
}

/// Required decimal entry.
///
/// # Errors
///
/// [`DecodeError::MissingProperty`] when `key` is absent, otherwise the
/// errors of [`to_float`].
pub fn get_float(props: &[Property], key: &str) -> Result<f32, DecodeError> {
    to_float(get::<&Node>(props, key)?, key)
}

/// Decimal entry, `default` when absent.
///
/// # Errors
///
/// The errors of [`to_float`] when the key is present.
pub fn opt_float(props: &[Property], key: &str, default: f32) -> Result<f32, DecodeError> {
    find(props, key).map_or(Ok(default), |node| to_float(node, key))
}

/// Flag entry, `default` when absent.
///
/// # Errors
///
/// The errors of [`to_bool`] when the key is present.
pub fn opt_bool(props: &[Property], key: &str, default: bool) -> Result<bool, DecodeError> {
    find(props, key).map_or(Ok(default), |node| to_bool(node, key))
}

// ==================== Shapes ====================

fn expect_arity(call: &GlobalCall, key: &str, arity: usize) -> Result<(), DecodeError> {
    if call.arguments.len() != arity {
        return Err(DecodeError::shape(
            key,
            format!(
                "{}() takes {} arguments, found {}",
                call.name,
                arity,
                call.arguments.len()
            ),
        ));
    }
    Ok(())
}

/// `point(x, y)` with integer coordinates. The call name is not checked.
///
/// # Errors
///
/// [`DecodeError::MalformedShape`] unless the call has two arguments,
/// otherwise the errors of [`to_int`] for each coordinate.
pub fn to_int_pair(call: &GlobalCall, key: &str) -> Result<IntPoint, DecodeError> {
    expect_arity(call, key, 2)?;
    Ok(IntPoint::new(
        to_int(&call.arguments[0], key)?,
        to_int(&call.arguments[1], key)?,
    ))
}

/// `point(x, y)` with decimal coordinates.
///
/// # Errors
///
/// [`DecodeError::MalformedShape`] unless the call has two arguments,
/// otherwise the errors of [`to_float`].
pub fn to_point(call: &GlobalCall, key: &str) -> Result<Vec2, DecodeError> {
    expect_arity(call, key, 2)?;
    Ok(Vec2::new(
        to_float(&call.arguments[0], key)?,
        to_float(&call.arguments[1], key)?,
    ))
}

/// `color(r, g, b)` with channels in `0..=255`.
///
/// # Errors
///
/// - [`DecodeError::InvalidValue`] when the call is not `color`, or a
///   channel is out of range
/// - [`DecodeError::MalformedShape`] unless there are three arguments
///
/// # Examples
///
/// ```
/// use leditor_lingo::parse;
/// use leditor_serialization::access::to_color;
/// use leditor_serialization::types::Color;
///
/// let node = parse("color(255, 0, 128)").unwrap();
/// assert_eq!(to_color(node.as_call().unwrap(), "c").unwrap(), Color::new(255, 0, 128));
///
/// let node = parse("color(256, 0, 0)").unwrap();
/// assert!(to_color(node.as_call().unwrap(), "c").is_err());
/// ```
pub fn to_color(call: &GlobalCall, key: &str) -> Result<Color, DecodeError> {
    if !call.name.eq_ignore_ascii_case("color") {
        return Err(DecodeError::invalid_value(key, call.name.as_str()));
    }
    expect_arity(call, key, 3)?;
    let channel = |node: &Node| -> Result<u8, DecodeError> {
        let value = to_int(node, key)?;
        u8::try_from(value).map_err(|_| DecodeError::invalid_value(key, value.to_string()))
    };
    Ok(Color::new(
        channel(&call.arguments[0])?,
        channel(&call.arguments[1])?,
        channel(&call.arguments[2])?,
    ))
}

/// Four `point(x, y)` calls: top left, top right, bottom right, bottom
/// left.
///
/// # Errors
///
/// [`DecodeError::MalformedShape`] unless the list has four entries,
/// otherwise the errors of [`cast`] and [`to_point`] per corner.
pub fn to_quad(list: &[Node], key: &str) -> Result<Quad, DecodeError> {
    if list.len() != 4 {
        return Err(DecodeError::shape(
            key,
            format!("a quad has 4 points, found {}", list.len()),
        ));
    }
    let corner = |node: &Node| to_point(cast(node, key)?, key);
    Ok(Quad::new(
        corner(&list[0])?,
        corner(&list[1])?,
        corner(&list[2])?,
        corner(&list[3])?,
    ))
}

/// Every element through [`to_int`].
///
/// # Errors
///
/// The first element error, with its key rewritten to `key[index]`.
pub fn to_int_list(list: &[Node], key: &str) -> Result<Vec<i32>, DecodeError> {
    list.iter()
        .enumerate()
        .map(|(i, node)| to_int(node, key).map_err(|err| at_index(err, i)))
        .collect()
}

/// # Errors
///
/// [`DecodeError::WrongKind`] keyed `key[index]` for the first element
/// that is not a string.
pub fn to_string_list(list: &[Node], key: &str) -> Result<Vec<String>, DecodeError> {
    list.iter()
        .enumerate()
        .map(|(i, node)| {
            node.as_str().map(str::to_string).ok_or_else(|| {
                DecodeError::wrong_kind(format!("{}[{}]", key, i), "a string", node.kind())
            })
        })
        .collect()
}

/// Rewrites the key of an element error to `key[index]`.
fn at_index(err: DecodeError, index: usize) -> DecodeError {
    match err {
        DecodeError::WrongKind {
            key,
            expected,
            found,
        } => DecodeError::WrongKind {
            key: format!("{}[{}]", key, index),
            expected,
            found,
        },
        DecodeError::InvalidValue { key, value } => DecodeError::InvalidValue {
            key: format!("{}[{}]", key, index),
            value,
        },
        other => other,
    }
}

/// Required `point(x, y)` entry. See [`to_int_pair`].
///
/// # Errors
///
/// [`DecodeError::MissingProperty`], [`DecodeError::WrongKind`] when the
/// entry is not a call, or the errors of [`to_int_pair`].
pub fn get_int_pair(props: &[Property], key: &str) -> Result<IntPoint, DecodeError> {
    to_int_pair(get(props, key)?, key)
}

/// Required `color(r, g, b)` entry.
///
/// # Errors
///
/// [`DecodeError::MissingProperty`], [`DecodeError::WrongKind`] when the
/// entry is not a call, or the errors of [`to_color`].
pub fn get_color(props: &[Property], key: &str) -> Result<Color, DecodeError> {
    to_color(get(props, key)?, key)
}

/// Required list of integers.
///
/// # Errors
///
/// [`DecodeError::MissingProperty`], [`DecodeError::WrongKind`] when the
/// entry is not a list, or the errors of [`to_int_list`].
pub fn get_int_list(props: &[Property], key: &str) -> Result<Vec<i32>, DecodeError> {
    to_int_list(get(props, key)?, key)
}

/// Optional integer list. Absent, `void` and `[]` all read as empty.
///
/// # Errors
///
/// As [`get_int_list`] when the key holds anything else.
pub fn opt_int_list(props: &[Property], key: &str) -> Result<Vec<i32>, DecodeError> {
    match find(props, key) {
        None => Ok(Vec::new()),
        Some(Node::Symbol(s)) if s.eq_ignore_ascii_case("void") => Ok(Vec::new()),
        Some(node) => to_int_list(cast(node, key)?, key),
    }
}
