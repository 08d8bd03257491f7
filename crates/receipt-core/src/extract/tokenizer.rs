//! First pass of the field extractor: split raw payload text into tokens.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ParseError;

/// A lexical token of a loosely structured payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    /// Quoted string with escapes decoded.
    Str(String),
    /// Unquoted run such as a number, `true` or `null`.
    Bare(String),
}

impl Token {
    /// Punctuation tokens never carry a value.
    pub fn is_punctuation(&self) -> bool {
        !matches!(self, Token::Str(_) | Token::Bare(_))
    }
}

/// Tokenize the whole input.
///
/// Fails only when a quoted string is left open or the input ends inside an
/// escape sequence. Anything else, however odd, becomes some token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let token = match c {
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            ':' => Token::Colon,
            ',' => Token::Comma,
            '"' => Token::Str(read_string(&mut chars, offset)?),
            c if c.is_whitespace() => continue,
            c => {
                let mut bare = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if is_delimiter(next) {
                        break;
                    }
                    bare.push(next);
                    chars.next();
                }
                Token::Bare(bare)
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | ':' | ',' | '"')
}

/// Read a quoted string whose opening quote sits at `start`.
fn read_string(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Result<String, ParseError> {
    let mut value = String::new();

    loop {
        let Some((offset, c)) = chars.next() else {
            return Err(ParseError::UnterminatedString { offset: start });
        };

        match c {
            '"' => return Ok(value),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(ParseError::DanglingEscape { offset });
                };
                match escaped {
                    '"' => value.push('"'),
                    '\\' => value.push('\\'),
                    '/' => value.push('/'),
                    'b' => value.push('\u{0008}'),
                    'f' => value.push('\u{000c}'),
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    'u' => read_unicode_escape(chars, &mut value),
                    // Unknown escapes are kept verbatim.
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
            }
            c => value.push(c),
        }
    }
}

/// Decode the hex digits of a `\u` escape. Short or invalid sequences are
/// kept as written.
fn read_unicode_escape(chars: &mut Peekable<CharIndices<'_>>, value: &mut String) {
    let mut digits = String::with_capacity(4);
    while digits.len() < 4 {
        match chars.peek() {
            Some(&(_, d)) if d.is_ascii_hexdigit() => {
                digits.push(d);
                chars.next();
            }
            _ => break,
        }
    }

    let decoded = (digits.len() == 4)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .map(|code| char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));

    match decoded {
        Some(ch) => value.push(ch),
        None => {
            value.push_str("\\u");
            value.push_str(&digits);
        }
    }
}
