//! Valve KeyValues text parser.
//!
//! Produces a JSON object tree: every `"key" "value"` pair becomes a property,
//! every `"key" { ... }` block a nested object. Canonical integers and plain
//! decimals become JSON numbers, everything else stays a string. Repeated keys
//! merge when both sides are blocks; otherwise the last value wins.
//! `//` comments and `[$PLATFORM]` conditionals are skipped.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::{Map, Number, Value};

use super::ParseError;

/// Deepest block nesting accepted before parsing fails.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_trivia(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '\u{feff}' {
                self.bump();
            } else if ch == '/' {
                let mut lookahead = self.chars.clone();
                lookahead.next();
                if lookahead.peek() != Some(&'/') {
                    return;
                }
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else if ch == '[' {
                // Platform conditional such as [$WIN32]; no semantic meaning here.
                while let Some(ch) = self.bump() {
                    if ch == ']' {
                        break;
                    }
                }
            } else {
                return;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<(Token, usize)>, ParseError> {
        self.skip_trivia();
        let line = self.line;
        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };
        let token = match ch {
            '{' => {
                self.bump();
                Token::Open
            }
            '}' => {
                self.bump();
                Token::Close
            }
            '"' => {
                self.bump();
                Token::Text(self.quoted(line)?)
            }
            _ => Token::Text(self.bare()),
        };
        Ok(Some((token, line)))
    }

    fn quoted(&mut self, start_line: usize) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                Some(ch) => out.push(ch),
                None => break,
            }
        }
        Err(ParseError::unexpected_eof(format!(
            "unterminated string starting on line {start_line}"
        )))
    }

    fn bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || matches!(ch, '{' | '}' | '"') {
                break;
            }
            out.push(ch);
            self.bump();
        }
        out
    }
}

/// Parses KeyValues text into a JSON object.
///
/// # Errors
///
/// Returns [`ParseError`] on unbalanced braces, a key without a value, an
/// unterminated string, or blocks nested deeper than [`MAX_DEPTH`].
pub fn parse(input: &str) -> Result<Value, ParseError> {
    let mut lexer = Lexer::new(input);
    let root = parse_block(&mut lexer, None, 0)?;
    Ok(Value::Object(root))
}

fn parse_block(
    lexer: &mut Lexer<'_>,
    opened_on: Option<usize>,
    depth: usize,
) -> Result<Map<String, Value>, ParseError> {
    let mut map = Map::new();
    loop {
        let Some((token, line)) = lexer.next_token()? else {
            return match opened_on {
                Some(open_line) => Err(ParseError::unexpected_eof(format!(
                    "block opened on line {open_line} is never closed"
                ))),
                None => Ok(map),
            };
        };

        let key = match token {
            Token::Text(key) => key,
            Token::Close if opened_on.is_some() => return Ok(map),
            Token::Close => return Err(ParseError::syntax(line, "unexpected '}' at top level")),
            Token::Open => return Err(ParseError::syntax(line, "expected key, found '{'")),
        };

        let value = match lexer.next_token()? {
            Some((Token::Text(text), _)) => scalar(text),
            Some((Token::Open, open_line)) => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::syntax(
                        open_line,
                        format!("blocks nested deeper than {MAX_DEPTH} levels"),
                    ));
                }
                Value::Object(parse_block(lexer, Some(open_line), depth + 1)?)
            }
            Some((Token::Close, close_line)) => {
                return Err(ParseError::syntax(
                    close_line,
                    format!("key '{key}' has no value"),
                ));
            }
            None => {
                return Err(ParseError::unexpected_eof(format!(
                    "key '{key}' on line {line} has no value"
                )));
            }
        };

        insert(&mut map, key, value);
    }
}

fn insert(map: &mut Map<String, Value>, key: String, value: Value) {
    match (map.get_mut(&key), value) {
        (Some(Value::Object(existing)), Value::Object(incoming)) => {
            for (child_key, child_value) in incoming {
                insert(existing, child_key, child_value);
            }
        }
        (_, value) => {
            map.insert(key, value);
        }
    }
}

fn scalar(text: String) -> Value {
    if let Ok(int) = text.parse::<i64>()
        && int.to_string() == text
    {
        return Value::Number(int.into());
    }
    if is_plain_decimal(&text)
        && let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64)
    {
        return Value::Number(number);
    }
    Value::String(text)
}

fn is_plain_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let Some((whole, fraction)) = digits.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && !fraction.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}
