//! Permissive literal parser for data embedded in inline scripts
//!
//! The site's templating injects configuration as script literals that
//! are close to JSON but not quite: strings may be single-quoted, keys
//! may be bare identifiers, trailing commas are common and booleans may
//! be spelled either way. This module turns such a literal into a
//! [`serde_json::Value`]. Locating the literal inside a page is someone
//! else's job (see [`super::catalog`]).

use serde_json::{Map, Number, Value};

use crate::error::{BtSportError, Result};

/// Parses a single literal value
///
/// Leading/trailing whitespace and one trailing `;` are allowed; any
/// other trailing input is an error.
///
/// # Errors
/// Returns `ParseError` with the byte offset of the first offending character
pub fn parse_literal(input: &str) -> Result<Value> {
    let mut parser = LiteralParser::new(input);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.peek() == Some(';') {
        parser.bump();
        parser.skip_whitespace();
    }
    if let Some(c) = parser.peek() {
        return Err(parser.error(&format!("unexpected trailing character {:?}", c)));
    }
    Ok(value)
}

struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str) -> BtSportError {
        BtSportError::ParseError(format!("literal at byte {}: {}", self.pos, message))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(&format!("expected {:?}, found {:?}", expected, c))),
            None => Err(self.error(&format!("expected {:?}, found end of input", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if is_identifier_start(c) => {
                let word = self.parse_identifier();
                match word {
                    "true" | "True" => Ok(Value::Bool(true)),
                    "false" | "False" => Ok(Value::Bool(false)),
                    "null" | "None" | "undefined" => Ok(Value::Null),
                    other => Err(self.error(&format!("unknown identifier {:?}", other))),
                }
            }
            Some(c) => Err(self.error(&format!("unexpected character {:?}", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                None => return Err(self.error("unterminated object")),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(self.error(&format!("expected ',' or '}}', found {:?}", c))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if is_identifier_start(c) => Ok(self.parse_identifier().to_string()),
            Some(c) if c.is_ascii_digit() => match self.parse_number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.error("invalid numeric key")),
            },
            Some(c) => Err(self.error(&format!("invalid object key start {:?}", c))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => return Err(self.error(&format!("expected ',' or ']', found {:?}", c))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let code = self.parse_hex(4)?;
                // surrogate pairs arrive as two \u escapes
                if (0xD800..0xDC00).contains(&code) && self.rest().starts_with("\\u") {
                    self.pos += 2;
                    let low = self.parse_hex(4)?;
                    if (0xDC00..0xE000).contains(&low) {
                        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    } else {
                        // unpaired high surrogate; the second escape stands alone
                        out.push('\u{FFFD}');
                        out.push(char::from_u32(low).unwrap_or('\u{FFFD}'));
                    }
                } else {
                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                }
            }
            Some('x') => {
                let code = self.parse_hex(2)?;
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            // line continuation
            Some('\n') => {}
            Some(c) => out.push(c),
            None => return Err(self.error("unterminated escape")),
        }
        Ok(())
    }

    fn parse_hex(&mut self, digits: usize) -> Result<u32> {
        let hex = self
            .rest()
            .get(..digits)
            .ok_or_else(|| self.error("truncated hex escape"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error(&format!("invalid hex escape {:?}", hex)))?;
        self.pos += digits;
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' => is_float = true,
                '+' | '-' if matches!(self.input[..self.pos].chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            self.bump();
        }

        let text = self.input[start..self.pos].trim_start_matches('+');
        let number = if is_float {
            text.parse::<f64>().ok().and_then(Number::from_f64)
        } else {
            text.parse::<i64>().ok().map(Number::from)
        };
        number
            .map(Value::Number)
            .ok_or_else(|| self.error(&format!("invalid number {:?}", text)))
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
