//! Replacement templates with backslash group references.
//!
//! Supported syntax: `\1`..`\99`, `\g<N>`, `\g<name>`, the escapes
//! `\\ \n \t \r \a \b \f \v`, octal escapes (`\0`, `\012`, `\101`).
//! Any other escape of a non-letter is kept as written; unknown letter
//! escapes are rejected. `$` has no special meaning.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, Replacer};
use thiserror::Error;

static GROUP_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid group name regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("bad escape (end of pattern) at position {0}")]
    TrailingBackslash(usize),

    #[error("bad escape \\{escape} at position {position}")]
    BadEscape { escape: char, position: usize },

    #[error("missing < at position {0}")]
    MissingOpenBracket(usize),

    #[error("missing >, unterminated name at position {0}")]
    UnterminatedName(usize),

    #[error("missing group name at position {0}")]
    MissingGroupName(usize),

    #[error("bad character in group name '{0}'")]
    BadGroupName(String),

    #[error("unknown group name '{0}'")]
    UnknownGroupName(String),

    #[error("invalid group reference {0}")]
    InvalidGroupReference(usize),

    #[error("octal escape value \\{0} outside of range 0-0o377")]
    OctalOutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
}

/// A replacement template checked against one compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(template: &str, regex: &Regex) -> Result<Self, TemplateError> {
        let group_count = regex.captures_len();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c != '\\' {
                literal.push(c);
                continue;
            }

            let Some((_, escape)) = chars.next() else {
                return Err(TemplateError::TrailingBackslash(position));
            };

            match escape {
                'g' => {
                    if chars.next_if(|&(_, c)| c == '<').is_none() {
                        return Err(TemplateError::MissingOpenBracket(position));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '>')) => break,
                            Some((_, c)) => name.push(c),
                            None => return Err(TemplateError::UnterminatedName(position)),
                        }
                    }
                    let index = resolve_group(&name, regex, position)?;
                    push_group(&mut pieces, &mut literal, index);
                }
                '0' => {
                    let mut value = 0u32;
                    for _ in 0..2 {
                        match chars.next_if(|&(_, c)| is_octal(c)) {
                            Some((_, d)) => value = value * 8 + digit_value(d),
                            None => break,
                        }
                    }
                    literal.push(char::from(value as u8));
                }
                '1'..='9' => {
                    let mut digits = String::from(escape);
                    if let Some((_, second)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                        digits.push(second);
                        if is_octal(escape) && is_octal(second) {
                            if let Some((_, third)) = chars.next_if(|&(_, c)| is_octal(c)) {
                                digits.push(third);
                                let value = digits.chars().fold(0, |acc, d| acc * 8 + digit_value(d));
                                if value > 0o377 {
                                    return Err(TemplateError::OctalOutOfRange(digits));
                                }
                                literal.push(char::from(value as u8));
                                continue;
                            }
                        }
                    }
                    let index = digits
                        .chars()
                        .fold(0usize, |acc, d| acc * 10 + digit_value(d) as usize);
                    if index >= group_count {
                        return Err(TemplateError::InvalidGroupReference(index));
                    }
                    push_group(&mut pieces, &mut literal, index);
                }
                'a' => literal.push('\x07'),
                'b' => literal.push('\x08'),
                'f' => literal.push('\x0c'),
                'n' => literal.push('\n'),
                'r' => literal.push('\r'),
                't' => literal.push('\t'),
                'v' => literal.push('\x0b'),
                '\\' => literal.push('\\'),
                c if c.is_ascii_alphabetic() => {
                    return Err(TemplateError::BadEscape { escape: c, position });
                }
                other => {
                    literal.push('\\');
                    literal.push(other);
                }
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// Expand the template for one match
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => dst.push_str(text),
                // Groups that did not take part in the match expand to nothing
                Piece::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        dst.push_str(m.as_str());
                    }
                }
            }
        }
    }
}

impl Replacer for &Template {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        self.expand(caps, dst);
    }
}

fn resolve_group(name: &str, regex: &Regex, position: usize) -> Result<usize, TemplateError> {
    if name.is_empty() {
        return Err(TemplateError::MissingGroupName(position));
    }

    if name.chars().all(|c| c.is_ascii_digit()) {
        let index = name
            .parse::<usize>()
            .map_err(|_| TemplateError::BadGroupName(name.to_string()))?;
        if index >= regex.captures_len() {
            return Err(TemplateError::InvalidGroupReference(index));
        }
        return Ok(index);
    }

    if !GROUP_NAME_REGEX.is_match(name) {
        return Err(TemplateError::BadGroupName(name.to_string()));
    }

    regex
        .capture_names()
        .position(|n| n == Some(name))
        .ok_or_else(|| TemplateError::UnknownGroupName(name.to_string()))
}

fn push_group(pieces: &mut Vec<Piece>, literal: &mut String, index: usize) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
    pieces.push(Piece::Group(index));
}

fn is_octal(c: char) -> bool {
    ('0'..='7').contains(&c)
}

fn digit_value(c: char) -> u32 {
    c.to_digit(10).unwrap_or(0)
}
