//! Line tokenizer with double-quote tracking.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Whether the scanner is inside a `"..."` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Outside,
    Inside,
}

/// How quote state crosses line boundaries.
///
/// `File` carries an unterminated literal into the following lines, which is
/// how the engine has always behaved. `Line` starts every line outside quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCarry {
    Line,
    #[default]
    File,
}

impl QuoteCarry {
    /// State to start the next line with, given how the previous one ended.
    pub fn next_line_state(&self, previous_end: QuoteState) -> QuoteState {
        match self {
            QuoteCarry::Line => QuoteState::Outside,
            QuoteCarry::File => previous_end,
        }
    }
}

/// A delimiter-bounded substring of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the line.
    pub start: usize,
    /// Token lies inside a string literal and is not a rename candidate.
    pub quoted: bool,
}

/// The compiled delimiter set of one language.
///
/// Whitespace always delimits; `"` never does.
#[derive(Debug, Clone)]
pub struct Delimiters {
    chars: BTreeSet<char>,
    splitter: Regex,
}

impl Delimiters {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self> {
        let chars: BTreeSet<char> = chars.into_iter().filter(|&c| c != '"').collect();

        let mut class = String::from(r"[\s");
        for c in &chars {
            class.push_str(&regex::escape(&c.to_string()));
        }
        class.push(']');

        let splitter = Regex::new(&class).map_err(|e| {
            Error::config_invalid_value(
                "delimiters",
                Some(chars.iter().collect()),
                format!("Delimiters do not form a valid character class: {}", e),
            )
        })?;

        Ok(Delimiters { chars, splitter })
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_whitespace() || self.chars.contains(&c)
    }

    /// Split `line` on every delimiter, keeping empty pieces between
    /// adjacent delimiters. Yields `(byte_offset, piece)`.
    pub fn split<'s, 'a: 's>(
        &'s self,
        line: &'a str,
    ) -> impl Iterator<Item = (usize, &'a str)> + 's {
        let mut last = 0;
        let mut done = false;
        let mut matches = self.splitter.find_iter(line);

        std::iter::from_fn(move || {
            if done {
                return None;
            }
            match matches.next() {
                Some(m) => {
                    let piece = (last, &line[last..m.start()]);
                    last = m.end();
                    Some(piece)
                }
                None => {
                    done = true;
                    Some((last, &line[last..]))
                }
            }
        })
    }
}

fn closes_quote(text: &str) -> bool {
    text.ends_with('"') && !text.ends_with("\\\"")
}

/// Tokenize one line starting from `state`, returning the tokens and the
/// state the line ended in.
///
/// A piece starting with `"` opens a literal (the quote itself is stripped
/// from the token). A piece ending in an unescaped `"` closes it. An
/// unterminated literal simply leaves the returned state `Inside`.
pub fn tokenize_line<'a>(
    line: &'a str,
    delimiters: &Delimiters,
    mut state: QuoteState,
) -> (Vec<Token<'a>>, QuoteState) {
    let mut tokens = Vec::new();

    for (offset, piece) in delimiters.split(line) {
        let mut text = piece;
        let mut start = offset;

        if state == QuoteState::Outside && piece.starts_with('"') {
            state = QuoteState::Inside;
            text = &piece[1..];
            start += 1;
        }

        let quoted = state == QuoteState::Inside;
        if quoted && closes_quote(text) {
            state = QuoteState::Outside;
        }

        tokens.push(Token {
            text,
            start,
            quoted,
        });
    }

    (tokens, state)
}
