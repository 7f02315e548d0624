//! Identifier casing normalization.
//!
//! Scans a file's lines for identifiers outside string literals, converts
//! each to the requested convention, and proposes one rename per distinct
//! identifier, each with a line-level diff. Two renames never touch the same
//! line: a rename that would collide with an earlier one is dropped.
//!
//! Pipeline: tokenize → classify → convert → rename table → rewrite → report.

mod classify;
mod convention;
mod report;
mod rewrite;
mod table;
mod tokenize;

use serde::Serialize;

use crate::error::Result;
use crate::language::LanguageRegistry;
use crate::settings::CasingSettings;

pub use classify::IdentifierFilter;
pub use convention::{to_camel, to_pascal, to_snake, CasingConvention};
pub use report::{emit_reports, rename_message, DiffEntry, RenameReport};
pub use rewrite::{find_bounded, replace_bounded, rewrite, AcceptedRename, RewriteOutcome};
pub use table::{build_rename_table, RenamePair, RenameTable};
pub use tokenize::{tokenize_line, Delimiters, QuoteCarry, QuoteState, Token};

/// Result of running the engine over one file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CasingOutcome {
    pub reports: Vec<RenameReport>,
    /// Renames dropped because they shared a line with an accepted rename.
    pub skipped: Vec<RenamePair>,
    /// The file with every accepted rename applied.
    #[serde(skip)]
    pub lines: Vec<String>,
}

impl CasingOutcome {
    pub fn content(&self) -> String {
        self.lines.concat()
    }

    pub fn has_changes(&self) -> bool {
        !self.reports.is_empty()
    }
}

/// A configured casing engine for one language and convention.
///
/// Holds no mutable state, so one engine can serve many files, including
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct Engine {
    convention: CasingConvention,
    language: String,
    delimiters: Delimiters,
    filter: IdentifierFilter,
    quote_carry: QuoteCarry,
}

impl Engine {
    /// Validate settings and resolve the language table. Fails before any
    /// input is seen if the convention is unknown or the language has no table.
    pub fn new(settings: &CasingSettings, registry: &LanguageRegistry) -> Result<Self> {
        let convention = settings.convention()?;
        settings.validate_ignore()?;

        let registry = registry.clone().with_tables(settings.languages.iter().cloned());
        let table = registry.resolve(settings.language()?)?;

        Ok(Engine {
            convention,
            language: table.name.clone(),
            delimiters: Delimiters::new(table.delimiters.iter().copied())?,
            filter: IdentifierFilter::new(table.keywords.clone(), settings.ignore.clone()),
            quote_carry: settings.quote_carry(),
        })
    }

    pub fn convention(&self) -> CasingConvention {
        self.convention
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Run the full pipeline over `lines` (each with its line terminator).
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> CasingOutcome {
        let table = build_rename_table(
            lines,
            &self.delimiters,
            &self.filter,
            self.convention,
            self.quote_carry,
        );
        let rewritten = rewrite(lines, &table, &self.delimiters);

        CasingOutcome {
            reports: emit_reports(rewritten.accepted),
            skipped: rewritten.skipped,
            lines: rewritten.lines,
        }
    }

    pub fn run_content(&self, content: &str) -> CasingOutcome {
        self.run(split_lines(content).as_slice())
    }
}

/// Split file content into lines, keeping each line's terminator.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Apply report diffs to `lines`. Entries whose line no longer holds the
/// expected original text are left alone; returns how many were applied.
pub fn apply_reports(lines: &mut [String], reports: &[RenameReport]) -> usize {
    let mut applied = 0;
    for entry in reports.iter().flat_map(|r| r.diff.iter()) {
        let Some(line) = entry.line.checked_sub(1).and_then(|i| lines.get_mut(i)) else {
            continue;
        };
        if *line == entry.original {
            *line = entry.replacement.clone();
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn engine(convention: &str) -> Engine {
        Engine::new(&CasingSettings::new(convention, "c"), &LanguageRegistry::builtin()).unwrap()
    }

    #[test]
    fn split_lines_keeps_terminators() {
        assert_eq!(
            split_lines("a\nb\r\nc"),
            vec!["a\n".to_string(), "b\r\n".to_string(), "c".to_string()]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn unknown_convention_fails_before_running() {
        let err = Engine::new(
            &CasingSettings::new("screaming", "c"),
            &LanguageRegistry::builtin(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn missing_table_is_language_not_found() {
        let err = Engine::new(&CasingSettings::new("snake", "c"), &LanguageRegistry::empty())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LanguageNotFound);
    }

    #[test]
    fn run_reports_and_rewrites() {
        let outcome = engine("snake").run(&["int abcDef = 1;\n", "abcDef++;\n"]);

        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(
            outcome.reports[0].message,
            "Change 'abcDef' to 'abc_def': 2 lines affected"
        );
        assert_eq!(outcome.content(), "int abc_def = 1;\nabc_def++;\n");
    }

    #[test]
    fn apply_reports_matches_outcome_lines() {
        let source = "int fooBar = barBaz;\nreturn fooBar;\n";
        let outcome = engine("camel").run_content("int foo_bar = 2;\nreturn foo_bar;\n");
        let mut lines = split_lines("int foo_bar = 2;\nreturn foo_bar;\n");

        assert_eq!(apply_reports(&mut lines, &outcome.reports), 2);
        assert_eq!(lines, outcome.lines);

        let mut untouched = split_lines(source);
        assert_eq!(apply_reports(&mut untouched, &outcome.reports), 0);
    }

    #[test]
    fn custom_table_from_settings_is_used() {
        let settings = CasingSettings {
            languages: vec![crate::language::LanguageTable::new(
                "mini",
                ["let"],
                [';', '='],
            )],
            ..CasingSettings::new("snake", "mini")
        };
        let engine = Engine::new(&settings, &LanguageRegistry::builtin()).unwrap();

        assert_eq!(engine.language(), "mini");
        let outcome = engine.run(&["let myValue = 1;\n"]);
        assert_eq!(outcome.reports[0].converted, "my_value");
    }
}
