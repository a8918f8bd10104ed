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

//! Recursive-descent parser for one line of Lingo data.
//!
//! # Grammar (informal)
//!
//! ```text
//! expr     = "-" expr | primary
//! primary  = "[" "]" | "[" ":" "]"
//!          | "[" expr ("," expr)* "]"
//!          | "[" pair ("," pair)* "]"
//!          | "(" expr ")"
//!          | string [ "(" args ")" ]
//!          | ident  [ "(" args ")" ]
//!          | "#" ident
//!          | number
//! pair     = symbol ":" expr
//! args     = (expr ("," expr)*)?
//! number   = digits ["." digits] [("e"|"E") ["+"|"-"] digits]
//! string   = '"' (char | '""')* '"'
//! ```
//!
//! Whitespace between tokens is ignored. A bare identifier and a
//! `#`-prefixed one both produce [`Node::Symbol`]; the `#` is not kept.
//! A string followed by `(` is a call named by the string, which is how
//! category headers like `"Stone"(color(50, 50, 50))` are read.
//!
//! The parser does no semantic checking. `-"text"` is a perfectly good
//! negation as far as it is concerned; decoders reject it later.
//!
//! Columns in error positions count bytes from the start of the line.

use crate::error::SyntaxError;
use crate::limits::ParseLimits;
use crate::node::{Node, Number, Property};
use crate::span::SourcePos;

/// Parses one line with the default [`ParseLimits`].
///
/// ```
/// use leditor_lingo::{parse, Node};
///
/// let node = parse("[#nm: \"Small Stone\", #sz: point(1, 1)]").unwrap();
/// assert!(matches!(node, Node::PropertyList(_)));
/// ```
pub fn parse(text: &str) -> Result<Node, SyntaxError> {
    parse_with_limits(text, &ParseLimits::default())
}

/// Parses one line, enforcing `limits`.
pub fn parse_with_limits(text: &str, limits: &ParseLimits) -> Result<Node, SyntaxError> {
    if text.len() > limits.max_line_length {
        return Err(SyntaxError::LineTooLong {
            length: text.len(),
            max: limits.max_line_length,
            pos: SourcePos::column_only(1),
        });
    }

    let mut parser = Parser::new(text, limits.max_depth);
    let node = parser.parse_expr()?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        return Err(SyntaxError::TrailingInput {
            found: parser.current_char(),
            pos: parser.here(),
        });
    }
    Ok(node)
}

/// Parses line `line` of a file; errors carry that line number.
pub fn parse_at_line(text: &str, line: usize, limits: &ParseLimits) -> Result<Node, SyntaxError> {
    parse_with_limits(text, limits).map_err(|e| e.at_line(line))
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, max_depth: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn at(&self, offset: usize) -> SourcePos {
        SourcePos::column_only(offset + 1)
    }

    fn here(&self) -> SourcePos {
        self.at(self.pos)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// The full character at the cursor, for error messages.
    fn current_char(&self) -> char {
        self.src[self.pos..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn enter(&mut self, opened_at: usize) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SyntaxError::DepthExceeded {
                depth: self.depth,
                max: self.max_depth,
                pos: self.at(opened_at),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        match self.peek() {
            Some(_) => SyntaxError::UnexpectedChar {
                found: self.current_char(),
                expected,
                pos: self.here(),
            },
            None => SyntaxError::UnexpectedEnd {
                expected,
                pos: self.here(),
            },
        }
    }

    fn parse_expr(&mut self) -> Result<Node, SyntaxError> {
        self.skip_whitespace();

        match self.peek() {
            Some(b'-') => self.parse_negation(),
            Some(b'[') => self.parse_bracketed(),
            Some(b'(') => self.parse_group(),
            Some(b'"') => {
                let start = self.pos;
                let value = self.parse_string()?;
                self.parse_call_suffix(value, start, Node::String)
            }
            Some(b'#') => {
                self.pos += 1;
                let name = self.parse_identifier()?;
                Ok(Node::Symbol(name))
            }
            Some(b) if b.is_ascii_digit() => self.parse_number(),
            Some(b'.') if matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) => {
                self.parse_number()
            }
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                let start = self.pos;
                let name = self.parse_identifier()?;
                self.parse_call_suffix(name, start, Node::Symbol)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// After a name: `(` turns it into a call, anything else leaves it as
    /// the plain node built by `plain`.
    fn parse_call_suffix(
        &mut self,
        name: String,
        start: usize,
        plain: fn(String) -> Node,
    ) -> Result<Node, SyntaxError> {
        let before = self.pos;
        self.skip_whitespace();
        if self.peek() != Some(b'(') {
            self.pos = before;
            return Ok(plain(name));
        }
        let open = self.pos;
        self.pos += 1;
        self.enter(start)?;
        let arguments = self.parse_arguments(open)?;
        self.leave();
        Ok(Node::call(name, arguments))
    }

    fn parse_negation(&mut self) -> Result<Node, SyntaxError> {
        let start = self.pos;
        self.pos += 1; // consume '-'
        self.skip_whitespace();
        match self.peek() {
            None | Some(b']' | b')' | b',' | b':') => {
                Err(SyntaxError::EmptyNegation { pos: self.at(start) })
            }
            Some(_) => {
                self.enter(start)?;
                let operand = self.parse_expr()?;
                self.leave();
                Ok(Node::negate(operand))
            }
        }
    }

    fn parse_group(&mut self) -> Result<Node, SyntaxError> {
        let open = self.pos;
        self.pos += 1; // consume '('
        self.enter(open)?;
        let inner = self.parse_expr()?;
        self.skip_whitespace();
        match self.peek() {
            Some(b')') => self.pos += 1,
            Some(_) => return Err(self.unexpected("')'")),
            None => {
                return Err(SyntaxError::UnclosedDelimiter {
                    open: '(',
                    pos: self.at(open),
                })
            }
        }
        self.leave();
        Ok(inner)
    }

    fn parse_bracketed(&mut self) -> Result<Node, SyntaxError> {
        let open = self.pos;
        self.pos += 1; // consume '['
        self.enter(open)?;
        self.skip_whitespace();

        let node = match self.peek() {
            Some(b']') => {
                self.pos += 1;
                Node::List(Vec::new())
            }
            Some(b':') => {
                self.pos += 1;
                self.skip_whitespace();
                match self.peek() {
                    Some(b']') => self.pos += 1,
                    Some(_) => return Err(self.unexpected("']' after '[:'")),
                    None => return Err(self.unclosed_bracket(open)),
                }
                Node::PropertyList(Vec::new())
            }
            None => return Err(self.unclosed_bracket(open)),
            Some(_) => {
                let key_pos = self.pos;
                let first = self.parse_expr()?;
                self.skip_whitespace();
                if self.peek() == Some(b':') {
                    let key = self.property_key(first, key_pos)?;
                    self.parse_property_entries(key, open)?
                } else {
                    self.parse_list_rest(first, open)?
                }
            }
        };

        self.leave();
        Ok(node)
    }

    fn unclosed_bracket(&self, open: usize) -> SyntaxError {
        SyntaxError::UnclosedDelimiter {
            open: '[',
            pos: self.at(open),
        }
    }

    fn parse_list_rest(&mut self, first: Node, open: usize) -> Result<Node, SyntaxError> {
        let mut values = vec![first];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    values.push(self.parse_expr()?);
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Node::List(values));
                }
                Some(_) => return Err(self.unexpected("',' or ']'")),
                None => return Err(self.unclosed_bracket(open)),
            }
        }
    }

    /// Called with the cursor on the first `:`.
    fn parse_property_entries(&mut self, first_key: String, open: usize) -> Result<Node, SyntaxError> {
        let mut entries = Vec::new();
        let mut key = first_key;
        loop {
            self.pos += 1; // consume ':'
            let value = self.parse_expr()?;
            entries.push(Property { key, value });

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    let key_pos = self.pos;
                    let node = self.parse_expr()?;
                    key = self.property_key(node, key_pos)?;
                    self.skip_whitespace();
                    if self.peek() != Some(b':') {
                        return Err(self.unexpected("':'"));
                    }
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Node::PropertyList(entries));
                }
                Some(_) => return Err(self.unexpected("',' or ']'")),
                None => return Err(self.unclosed_bracket(open)),
            }
        }
    }

    fn property_key(&self, node: Node, at: usize) -> Result<String, SyntaxError> {
        match node {
            Node::Symbol(name) => Ok(name),
            _ => Err(SyntaxError::InvalidPropertyKey { pos: self.at(at) }),
        }
    }

    /// Called with the cursor just past `(`.
    fn parse_arguments(&mut self, open: usize) -> Result<Vec<Node>, SyntaxError> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            args.push(self.parse_expr()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(args);
                }
                Some(_) => return Err(self.unexpected("',' or ')'")),
                None => {
                    return Err(SyntaxError::UnclosedDelimiter {
                        open: '(',
                        pos: self.at(open),
                    })
                }
            }
        }
    }

    fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.pos += 1,
            _ => return Err(self.unexpected("an identifier")),
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        self.pos += 1; // consume opening '"'

        let mut value = String::new();
        loop {
            let rest = &self.src[self.pos..];
            let Some(end) = rest.find('"') else {
                return Err(SyntaxError::UnclosedString { pos: self.at(start) });
            };
            value.push_str(&rest[..end]);
            self.pos += end + 1;
            // A doubled quote is an escaped quote.
            if self.peek() == Some(b'"') {
                value.push('"');
                self.pos += 1;
            } else {
                return Ok(value);
            }
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse_number(&mut self) -> Result<Node, SyntaxError> {
        let start = self.pos;
        let mut is_decimal = false;

        self.eat_digits();

        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) {
            self.pos += 1;
            self.eat_digits();
            is_decimal = true;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() > 0 {
                is_decimal = true;
            } else {
                // Not an exponent; leave the letter for the caller to reject.
                self.pos = mark;
            }
        }

        let literal = &self.src[start..self.pos];
        let invalid = || SyntaxError::InvalidNumber {
            literal: literal.to_string(),
            pos: self.at(start),
        };

        let number = if is_decimal {
            let value: f64 = literal.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            Number::decimal(value)
        } else {
            Number::int(literal.parse().map_err(|_| invalid())?)
        };
        Ok(Node::Number(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{GlobalCall, UnaryKind};

    fn int(v: i64) -> Node {
        Node::Number(Number::int(v))
    }

    // ==================== Atoms ====================

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse("42").unwrap(), int(42));
    }

    #[test]
    fn test_parse_decimal() {
        let node = parse("3.75").unwrap();
        let n = node.as_number().unwrap();
        assert!(n.is_decimal);
        assert_eq!(n.decimal_value, 3.75);
        assert_eq!(n.int_value, 3);
    }

    #[test]
    fn test_parse_exponent_is_decimal() {
        let n = *parse("2e3").unwrap().as_number().unwrap();
        assert!(n.is_decimal);
        assert_eq!(n.decimal_value, 2000.0);
        assert_eq!(n.int_value, 2000);

        let n = *parse("1.5E-2").unwrap().as_number().unwrap();
        assert!(n.is_decimal);
        assert_eq!(n.decimal_value, 0.015);
    }

    #[test]
    fn test_parse_leading_dot() {
        let n = *parse(".5").unwrap().as_number().unwrap();
        assert!(n.is_decimal);
        assert_eq!(n.decimal_value, 0.5);
    }

    #[test]
    fn test_parse_integer_overflow() {
        let err = parse("99999999999999999999").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidNumber { .. }));
    }

    #[test]
    fn test_parse_infinite_decimal_rejected() {
        let err = parse("1e999").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidNumber { .. }));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(parse("\"Small Stone\"").unwrap(), Node::string("Small Stone"));
    }

    #[test]
    fn test_parse_string_escaped_quote() {
        assert_eq!(parse("\"a \"\"b\"\" c\"").unwrap(), Node::string("a \"b\" c"));
    }

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(parse("\"\"").unwrap(), Node::string(""));
    }

    #[test]
    fn test_parse_string_unicode() {
        assert_eq!(parse("\"Bjørn ✓\"").unwrap(), Node::string("Bjørn ✓"));
    }

    #[test]
    fn test_symbol_forms_are_equivalent() {
        assert_eq!(parse("#box").unwrap(), Node::symbol("box"));
        assert_eq!(parse("box").unwrap(), Node::symbol("box"));
        assert_eq!(parse("VOID").unwrap(), Node::symbol("VOID"));
    }

    // ==================== Negation ====================

    #[test]
    fn test_parse_negative_integer() {
        let node = parse("-5").unwrap();
        assert_eq!(node, Node::negate(int(5)));
    }

    #[test]
    fn test_parse_negation_with_space() {
        assert_eq!(parse("- 5").unwrap(), Node::negate(int(5)));
    }

    #[test]
    fn test_negation_of_non_number_is_accepted() {
        let node = parse("-\"text\"").unwrap();
        match node {
            Node::UnaryOperator(op) => {
                assert_eq!(op.kind, UnaryKind::Negate);
                assert_eq!(*op.expression, Node::string("text"));
            }
            other => panic!("expected negation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_negation() {
        assert!(matches!(
            parse("-").unwrap_err(),
            SyntaxError::EmptyNegation { .. }
        ));
        let err = parse("[1, -]").unwrap_err();
        assert_eq!(err, SyntaxError::EmptyNegation { pos: SourcePos::column_only(5) });
    }

    // ==================== Lists ====================

    #[test]
    fn test_parse_list() {
        assert_eq!(parse("[1, 2, 3]").unwrap(), Node::List(vec![int(1), int(2), int(3)]));
    }

    #[test]
    fn test_parse_empty_list_and_property_list() {
        assert_eq!(parse("[]").unwrap(), Node::List(vec![]));
        assert_eq!(parse("[ : ]").unwrap(), Node::PropertyList(vec![]));
    }

    #[test]
    fn test_parse_nested_lists() {
        let node = parse("[[1, [0, []]], [0, [5, 6]]]").unwrap();
        let outer = node.as_list().unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[1], Node::List(vec![int(0), Node::List(vec![int(5), int(6)])]));
    }

    #[test]
    fn test_parse_whitespace_insignificant() {
        assert_eq!(
            parse("  [ 1 ,2,   3 ]\r").unwrap(),
            Node::List(vec![int(1), int(2), int(3)])
        );
    }

    // ==================== Property lists ====================

    #[test]
    fn test_parse_property_list() {
        let node = parse("[#nm: \"Small Stone\", #bftiles: 0]").unwrap();
        let entries = node.as_property_list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], Property::new("nm", Node::string("Small Stone")));
        assert_eq!(entries[1], Property::new("bftiles", int(0)));
    }

    #[test]
    fn test_parse_property_list_bare_keys() {
        let node = parse("[nm: 1, tp: #box]").unwrap();
        let entries = node.as_property_list().unwrap();
        assert_eq!(entries[0].key, "nm");
        assert_eq!(entries[1].value, Node::symbol("box"));
    }

    #[test]
    fn test_property_list_keeps_duplicate_keys() {
        let node = parse("[#a: 1, #a: 2]").unwrap();
        assert_eq!(node.as_property_list().unwrap().len(), 2);
    }

    #[test]
    fn test_property_key_must_be_symbol() {
        let err = parse("[\"nm\": 1]").unwrap_err();
        assert_eq!(err, SyntaxError::InvalidPropertyKey { pos: SourcePos::column_only(2) });
    }

    #[test]
    fn test_mixed_list_and_property_list_rejected() {
        let err = parse("[#a: 1, 2]").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidPropertyKey { .. }));

        let err = parse("[#a: 1, #b]").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedChar { expected: "':'", .. }));

        let err = parse("[1, #a: 2]").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedChar { found: ':', .. }));
    }

    // ==================== Calls ====================

    #[test]
    fn test_parse_call() {
        let node = parse("point(3, -4)").unwrap();
        assert_eq!(
            node,
            Node::GlobalCall(GlobalCall {
                name: "point".to_string(),
                arguments: vec![int(3), Node::negate(int(4))],
            })
        );
    }

    #[test]
    fn test_parse_call_no_args() {
        assert_eq!(parse("rect()").unwrap(), Node::call("rect", vec![]));
    }

    #[test]
    fn test_parse_call_space_before_paren() {
        assert_eq!(parse("point (1, 1)").unwrap(), Node::call("point", vec![int(1), int(1)]));
    }

    #[test]
    fn test_parse_string_call_header_form() {
        let node = parse("\"Stone\"(color(50,50,50))").unwrap();
        let call = node.as_call().unwrap();
        assert_eq!(call.name, "Stone");
        assert_eq!(
            call.arguments,
            vec![Node::call("color", vec![int(50), int(50), int(50)])]
        );
    }

    #[test]
    fn test_parse_group() {
        assert_eq!(parse("(7)").unwrap(), int(7));
        assert_eq!(parse("-(7)").unwrap(), Node::negate(int(7)));
    }

    // ==================== Errors ====================

    #[test]
    fn test_unclosed_bracket_points_at_opener() {
        let err = parse("[1, [2, 3]").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnclosedDelimiter {
                open: '[',
                pos: SourcePos::column_only(1),
            }
        );
    }

    #[test]
    fn test_unclosed_call() {
        let err = parse("point(1, 2").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnclosedDelimiter {
                open: '(',
                pos: SourcePos::column_only(6),
            }
        );
    }

    #[test]
    fn test_unclosed_string() {
        let err = parse("[\"abc]").unwrap_err();
        assert_eq!(err, SyntaxError::UnclosedString { pos: SourcePos::column_only(2) });
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse("[1; 2]").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedChar {
                found: ';',
                expected: "',' or ']'",
                pos: SourcePos::column_only(3),
            }
        );
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("[1] 2").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::TrailingInput {
                found: '2',
                pos: SourcePos::column_only(5),
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse("   ").unwrap_err(), SyntaxError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_hash_without_identifier() {
        assert!(matches!(
            parse("#1").unwrap_err(),
            SyntaxError::UnexpectedChar { found: '1', .. }
        ));
    }

    #[test]
    fn test_number_followed_by_letter() {
        assert!(matches!(
            parse("[5e]").unwrap_err(),
            SyntaxError::UnexpectedChar { found: 'e', .. }
        ));
    }

    #[test]
    fn test_non_ascii_outside_string() {
        assert!(matches!(
            parse("[1, é]").unwrap_err(),
            SyntaxError::UnexpectedChar { found: 'é', .. }
        ));
    }

    // ==================== Limits ====================

    #[test]
    fn test_depth_limit() {
        let limits = ParseLimits {
            max_depth: 3,
            ..ParseLimits::default()
        };
        assert!(parse_with_limits("[[[1]]]", &limits).is_ok());
        let err = parse_with_limits("[[[[1]]]]", &limits).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::DepthExceeded {
                depth: 4,
                max: 3,
                pos: SourcePos::column_only(4),
            }
        );
    }

    #[test]
    fn test_line_length_limit() {
        let limits = ParseLimits {
            max_line_length: 4,
            ..ParseLimits::default()
        };
        let err = parse_with_limits("[1, 2]", &limits).unwrap_err();
        assert!(matches!(err, SyntaxError::LineTooLong { length: 6, max: 4, .. }));
    }

    #[test]
    fn test_parse_at_line_stamps_line() {
        let err = parse_at_line("[1,", 6, &ParseLimits::default()).unwrap_err();
        assert_eq!(err.pos().line(), 6);
    }
}
