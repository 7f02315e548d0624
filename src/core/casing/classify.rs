use glob_match::glob_match;
use std::collections::BTreeSet;

/// Decides which tokens may be renamed.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFilter {
    keywords: BTreeSet<String>,
    ignore: Vec<String>,
}

impl IdentifierFilter {
    pub fn new(keywords: BTreeSet<String>, ignore: Vec<String>) -> Self {
        IdentifierFilter { keywords, ignore }
    }

    /// Empty tokens, digit-leading tokens, keywords and ignore-glob matches
    /// are left alone.
    pub fn is_eligible(&self, token: &str) -> bool {
        let Some(first) = token.chars().next() else {
            return false;
        };
        if first.is_ascii_digit() {
            return false;
        }
        if self.keywords.contains(token) {
            return false;
        }
        !self.is_ignored(token)
    }

    fn is_ignored(&self, token: &str) -> bool {
        self.ignore.iter().any(|pattern| glob_match(pattern, token))
    }
}
