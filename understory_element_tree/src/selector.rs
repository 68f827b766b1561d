// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small selector engine.
//!
//! Supports comma-separated lists of compound selectors built from a tag name
//! (or `*`), `#id`, `.class`, `[attr]` and `[attr=value]` (value optionally
//! quoted). Combinators are not supported.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::types::Element;

/// Errors produced while parsing a selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector (or one entry of a selector list) is empty.
    #[error("empty selector")]
    Empty,
    /// An unexpected character was found.
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },
    /// An attribute selector or quoted value was not closed.
    #[error("unterminated attribute selector starting at offset {offset}")]
    Unterminated {
        /// Byte offset where the attribute selector starts.
        offset: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Simple {
    Tag(String),
    Id(String),
    Class(String),
    Attr { name: String, value: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
struct Compound {
    parts: SmallVec<[Simple; 2]>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        self.parts.iter().all(|part| match part {
            Simple::Tag(tag) => el.tag.name() == tag,
            Simple::Id(id) => el.id.as_deref() == Some(id.as_str()),
            Simple::Class(class) => el.has_class(class),
            Simple::Attr { name, value: None } => el.has_attr(name),
            Simple::Attr {
                name,
                value: Some(value),
            } => el.attr(name) == Some(value.as_str()),
        })
    }
}

/// A parsed selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        let mut offset = 0;
        for entry in input.split(',') {
            let lead = entry.len() - entry.trim_start().len();
            alternatives.push(parse_compound(entry.trim(), offset + lead)?);
            offset += entry.len() + 1;
        }
        Ok(Self { alternatives })
    }

    /// Whether `el` matches any alternative of this selector.
    pub fn matches(&self, el: &Element) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(src: &str, base: usize) -> Result<Compound, SelectorError> {
    if src.is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut compound = Compound::default();
    let bytes: Vec<(usize, char)> = src.char_indices().collect();
    let mut i = 0;

    let ident = |start: usize| -> (String, usize) {
        let mut end = start;
        while end < bytes.len() && is_ident_char(bytes[end].1) {
            end += 1;
        }
        let s: String = bytes[start..end].iter().map(|&(_, c)| c).collect();
        (s, end)
    };

    if bytes[0].1 == '*' {
        i = 1;
    } else if is_ident_char(bytes[0].1) {
        let (name, end) = ident(0);
        compound.parts.push(Simple::Tag(name.to_ascii_lowercase()));
        i = end;
    }

    while i < bytes.len() {
        let (at, c) = bytes[i];
        match c {
            '#' | '.' => {
                let (name, end) = ident(i + 1);
                if name.is_empty() {
                    return Err(unexpected(&bytes, i + 1, base, src.len()));
                }
                compound.parts.push(if c == '#' {
                    Simple::Id(name)
                } else {
                    Simple::Class(name)
                });
                i = end;
            }
            '[' => {
                let close = src[at..]
                    .find(']')
                    .ok_or(SelectorError::Unterminated { offset: base + at })?;
                let body = &src[at + 1..at + close];
                compound.parts.push(parse_attr(body, base + at)?);
                i = bytes
                    .iter()
                    .position(|&(pos, _)| pos > at + close)
                    .unwrap_or(bytes.len());
            }
            _ => return Err(unexpected(&bytes, i, base, src.len())),
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str, offset: usize) -> Result<Simple, SelectorError> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (body.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(SelectorError::Unexpected {
            offset,
            found: body.chars().next().unwrap_or(']'),
        });
    }
    let value = match value {
        None => None,
        Some(v) => {
            let unquoted = match v.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    if v.len() < 2 || !v.ends_with(q) {
                        return Err(SelectorError::Unterminated { offset });
                    }
                    &v[1..v.len() - 1]
                }
                _ => v,
            };
            Some(unquoted.to_string())
        }
    };
    Ok(Simple::Attr {
        name: name.to_string(),
        value,
    })
}

fn unexpected(bytes: &[(usize, char)], i: usize, base: usize, len: usize) -> SelectorError {
    match bytes.get(i) {
        Some(&(at, found)) => SelectorError::Unexpected {
            offset: base + at,
            found,
        },
        None => SelectorError::Unterminated { offset: base + len },
    }
}
