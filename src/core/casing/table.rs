//! File-wide table of identifier renames implied by a convention.

use serde::Serialize;
use std::collections::HashMap;

use super::classify::IdentifierFilter;
use super::convention::CasingConvention;
use super::tokenize::{tokenize_line, Delimiters, QuoteCarry, QuoteState};

/// One `original -> converted` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePair {
    pub original: String,
    pub converted: String,
}

/// Original identifier to converted identifier, in discovery order.
///
/// Keys are unique and the first recorded conversion for a key is kept.
#[derive(Debug, Clone, Default)]
pub struct RenameTable {
    pairs: Vec<RenamePair>,
    index: HashMap<String, usize>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original -> converted`. Returns false when `original` was
    /// already present; the existing mapping is never replaced.
    pub fn insert(&mut self, original: &str, converted: &str) -> bool {
        if self.index.contains_key(original) {
            return false;
        }
        self.index.insert(original.to_string(), self.pairs.len());
        self.pairs.push(RenamePair {
            original: original.to_string(),
            converted: converted.to_string(),
        });
        true
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index
            .get(original)
            .map(|&i| self.pairs[i].converted.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenamePair> {
        self.pairs.iter()
    }
}

/// Tokenize every line, keep eligible unquoted tokens, and record each one
/// whose conversion differs from itself.
pub fn build_rename_table<S: AsRef<str>>(
    lines: &[S],
    delimiters: &Delimiters,
    filter: &IdentifierFilter,
    convention: CasingConvention,
    carry: QuoteCarry,
) -> RenameTable {
    let mut table = RenameTable::new();
    let mut state = QuoteState::Outside;

    for line in lines {
        let (tokens, end) = tokenize_line(line.as_ref(), delimiters, state);
        state = carry.next_line_state(end);

        for token in tokens.iter().filter(|t| !t.quoted) {
            if !filter.is_eligible(token.text) {
                continue;
            }
            let converted = convention.convert(token.text);
            if converted != token.text {
                table.insert(token.text, &converted);
            }
        }
    }

    table
}
