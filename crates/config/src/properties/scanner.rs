//! Lexical scanner for the properties text format.
//!
//! Responsibilities:
//! - Join physical lines into logical lines (comments, blank lines, continuations).
//! - Split each logical line into a key and a value at the first unescaped separator.
//! - Decode escapes in keys and values, including `\uXXXX` and surrogate pairs.
//!
//! Does NOT handle:
//! - Reading from the underlying stream (see `Properties::load`).
//! - Storing the decoded pairs (the caller receives them through a callback).
//!
//! Invariants:
//! - Malformed unicode escapes decode to U+FFFD; scanning never fails.
//! - An unknown escape decodes to the escaped character with the backslash dropped.

const REPLACEMENT: char = '\u{FFFD}';

/// Whitespace recognized by the format: space, tab and form feed.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Scans `text` and hands every decoded `(key, value)` pair to `emit`, in input order.
pub(crate) fn scan(text: &str, mut emit: impl FnMut(String, String)) {
    for line in logical_lines(text) {
        let (key, value) = split_line(&line);
        emit(key, value);
    }
}

/// Joins physical lines into logical lines.
///
/// Returned lines have their leading whitespace removed and are never blank
/// or comments. Continuation backslashes are removed.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for physical in normalized.split(['\n', '\r']) {
        let trimmed = physical.trim_start_matches(is_blank);

        let mut logical = match current.take() {
            Some(pending) => pending,
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                String::new()
            }
        };

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some(logical);
        } else {
            logical.push_str(trimmed);
            lines.push(logical);
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Splits a logical line into its decoded key and value.
fn split_line(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut decoder = Decoder::new(&chars);

    let mut key = String::new();
    let mut separator = None;
    while let Some(token) = decoder.next_token() {
        if !token.escaped && (is_blank(token.ch) || token.ch == '=' || token.ch == ':') {
            separator = Some(token);
            break;
        }
        key.push(token.ch);
    }

    let mut value = String::new();
    if let Some(mut token) = separator {
        let mut assigned = false;
        loop {
            if token.escaped {
                value.push(token.ch);
                break;
            }
            if is_blank(token.ch) {
                // part of the separator
            } else if !assigned && (token.ch == '=' || token.ch == ':') {
                assigned = true;
            } else {
                value.push(token.ch);
                break;
            }
            match decoder.next_token() {
                Some(next) => token = next,
                None => break,
            }
        }
    }

    while let Some(token) = decoder.next_token() {
        value.push(token.ch);
    }

    (key, value)
}

/// A decoded character and whether it came from an escape sequence.
#[derive(Debug, Clone, Copy)]
struct Token {
    ch: char,
    escaped: bool,
}

/// Escape decoder over the characters of one logical line.
struct Decoder<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    fn next_token(&mut self) -> Option<Token> {
        let c = *self.chars.get(self.pos)?;
        self.pos += 1;
        if c != '\\' {
            return Some(Token {
                ch: c,
                escaped: false,
            });
        }

        // A lone backslash at the very end of the input decodes to nothing.
        let escape = *self.chars.get(self.pos)?;
        self.pos += 1;
        let ch = match escape {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'f' => '\x0c',
            'u' => self.unicode_escape(),
            other => other,
        };
        Some(Token { ch, escaped: true })
    }

    /// Decodes the remainder of a `\u` escape, pairing surrogates when possible.
    fn unicode_escape(&mut self) -> char {
        let Some(unit) = self.hex_unit() else {
            return REPLACEMENT;
        };

        match unit {
            0xD800..=0xDBFF => {
                let checkpoint = self.pos;
                if self.chars.get(self.pos) == Some(&'\\')
                    && self.chars.get(self.pos + 1) == Some(&'u')
                {
                    self.pos += 2;
                    if let Some(low @ 0xDC00..=0xDFFF) = self.hex_unit() {
                        return combine_surrogates(unit, low);
                    }
                }
                self.pos = checkpoint;
                REPLACEMENT
            }
            0xDC00..=0xDFFF => REPLACEMENT,
            _ => char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT),
        }
    }

    /// Reads the code unit of a `\u` escape whose first `u` was consumed.
    ///
    /// Extra `u` characters are skipped. On a non-hex character that character
    /// is consumed and `None` is returned; running out of input also returns `None`.
    fn hex_unit(&mut self) -> Option<u16> {
        while self.chars.get(self.pos) == Some(&'u') {
            self.pos += 1;
        }

        let mut unit: u16 = 0;
        for _ in 0..4 {
            let c = *self.chars.get(self.pos)?;
            self.pos += 1;
            let digit = c.to_digit(16)?;
            unit = (unit << 4) | digit as u16;
        }
        Some(unit)
    }
}

fn combine_surrogates(high: u16, low: u16) -> char {
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).unwrap_or(REPLACEMENT)
}
