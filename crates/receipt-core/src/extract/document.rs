//! Second pass of the field extractor: fold tokens into a loose key/value tree.

use std::iter::Peekable;
use std::vec::IntoIter;

use rust_decimal::Decimal;
use tracing::debug;

use super::scalars::{parse_bool, parse_decimal, parse_int};
use super::tokenizer::{Token, tokenize};
use crate::error::ParseError;

/// Deepest object/array nesting the builder will follow.
pub const MAX_DEPTH: usize = 64;

/// A node of the loose payload tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Members in document order. Duplicate keys are kept.
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
    /// Quoted or bare scalar text.
    Scalar(String),
    /// Bare `null`.
    Null,
}

impl Value {
    /// Scalar text, if this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Scoped field view, if this node is an object.
    pub fn as_fields(&self) -> Option<Fields<'_>> {
        match self {
            Value::Object(members) => Some(Fields { members }),
            _ => None,
        }
    }

    fn find(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.iter().find_map(|(key, value)| {
                if key == name {
                    Some(value)
                } else {
                    value.find(name)
                }
            }),
            Value::Array(values) => values.iter().find_map(|v| v.find(name)),
            _ => None,
        }
    }
}

/// A parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Tokenize and fold `input`.
    ///
    /// Text before the first `{` or `[` is ignored, as is anything after the
    /// first complete root. Input without any object yields an empty
    /// document rather than an error.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input)?;
        let mut builder = Builder {
            tokens: tokens.into_iter().peekable(),
        };
        let root = builder.root()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Field view over the root object. Empty if the root is not an object.
    pub fn fields(&self) -> Fields<'_> {
        self.root.as_fields().unwrap_or_default()
    }

    /// First occurrence of `name` as a key anywhere in the document, in
    /// document order.
    pub fn find(&self, name: &str) -> Option<&Value> {
        self.root.find(name)
    }
}

struct Builder {
    tokens: Peekable<IntoIter<Token>>,
}

impl Builder {
    fn root(&mut self) -> Result<Value, ParseError> {
        while let Some(token) = self.tokens.next() {
            match token {
                Token::OpenBrace => return self.object(1),
                Token::OpenBracket => return self.array(1),
                _ => continue,
            }
        }
        Ok(Value::Object(Vec::new()))
    }

    fn object(&mut self, depth: usize) -> Result<Value, ParseError> {
        check_depth(depth)?;
        let mut members = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::CloseBrace => break,
                Token::Str(key) | Token::Bare(key) => {
                    if self.tokens.next_if_eq(&Token::Colon).is_none() {
                        continue;
                    }
                    if let Some(value) = self.value(depth)? {
                        members.push((key, value));
                    }
                }
                // A keyless nested value: walk it so its closers stay balanced.
                Token::OpenBrace => {
                    self.object(depth + 1)?;
                }
                Token::OpenBracket => {
                    self.array(depth + 1)?;
                }
                Token::CloseBracket | Token::Colon | Token::Comma => continue,
            }
        }

        Ok(Value::Object(members))
    }

    fn array(&mut self, depth: usize) -> Result<Value, ParseError> {
        check_depth(depth)?;
        let mut values = Vec::new();

        loop {
            match self.tokens.peek() {
                None => break,
                Some(Token::CloseBracket) => {
                    self.tokens.next();
                    break;
                }
                Some(token) if token.is_punctuation() && !opens_value(token) => {
                    self.tokens.next();
                }
                Some(_) => {
                    if let Some(value) = self.value(depth)? {
                        values.push(value);
                    }
                }
            }
        }

        Ok(Value::Array(values))
    }

    /// Value following a colon or inside an array. `None` when the next
    /// token cannot start a value; that token is left in place.
    fn value(&mut self, depth: usize) -> Result<Option<Value>, ParseError> {
        let Some(token) = self.tokens.next_if(|t| !t.is_punctuation() || opens_value(t)) else {
            return Ok(None);
        };

        let value = match token {
            Token::OpenBrace => self.object(depth + 1)?,
            Token::OpenBracket => self.array(depth + 1)?,
            Token::Str(s) => Value::Scalar(s),
            Token::Bare(s) if s == "null" => Value::Null,
            Token::Bare(s) => Value::Scalar(s),
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

fn opens_value(token: &Token) -> bool {
    matches!(token, Token::OpenBrace | Token::OpenBracket)
}

fn check_depth(depth: usize) -> Result<(), ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NestingTooDeep { depth: MAX_DEPTH });
    }
    Ok(())
}

/// Read-only view over one object's direct members.
///
/// Every getter answers `None` when the key is absent or its value does not
/// have the requested shape; the caller keeps its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    members: &'a [(String, Value)],
}

impl<'a> Fields<'a> {
    /// First member named `name`.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.members
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Whether any member key starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.members.iter().any(|(key, _)| key.starts_with(prefix))
    }

    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.value(name).and_then(Value::as_str)
    }

    pub fn string(&self, name: &str) -> Option<String> {
        self.str(name).map(str::to_string)
    }

    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        self.typed(name, "decimal", parse_decimal)
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.typed(name, "integer", parse_int)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.typed(name, "boolean", parse_bool)
    }

    /// Nested object scope named `name`.
    pub fn object(&self, name: &str) -> Option<Fields<'a>> {
        self.value(name).and_then(Value::as_fields)
    }

    /// Object elements of the array named `name`. Non-object elements are
    /// skipped.
    pub fn objects(&self, name: &str) -> impl Iterator<Item = Fields<'a>> + use<'a> {
        let values: &'a [Value] = match self.value(name) {
            Some(Value::Array(values)) => values,
            _ => &[],
        };
        values.iter().filter_map(Value::as_fields)
    }

    fn typed<T>(&self, name: &str, kind: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        let raw = self.str(name)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            debug!(field = name, value = raw, "ignoring value that is not a valid {}", kind);
        }
        parsed
    }
}
