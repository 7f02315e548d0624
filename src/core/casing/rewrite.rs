//! Conflict-safe application of a rename table to a file's lines.

use std::collections::BTreeSet;

use super::report::DiffEntry;
use super::table::{RenamePair, RenameTable};
use super::tokenize::Delimiters;

/// A rename whose diff touches only lines no earlier rename touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRename {
    pub pair: RenamePair,
    pub diff: Vec<DiffEntry>,
}

impl AcceptedRename {
    /// 1-indexed line numbers this rename rewrites.
    pub fn line_change_set(&self) -> BTreeSet<usize> {
        self.diff.iter().map(|d| d.line).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    pub accepted: Vec<AcceptedRename>,
    /// Renames dropped because they shared a line with an accepted one.
    pub skipped: Vec<RenamePair>,
    /// The file after applying every accepted rename.
    pub lines: Vec<String>,
}

/// Byte offsets of `term` in `text` where it is flanked by delimiters or
/// the ends of the line. Matches do not overlap.
///
/// `foo` is found in `foo(bar)` and `x = foo;` but not in `foobar` or `my_foo`.
pub fn find_bounded(text: &str, term: &str, delimiters: &Delimiters) -> Vec<usize> {
    let mut matches = Vec::new();
    let Some(first) = term.chars().next() else {
        return matches;
    };

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let abs = start + pos;
        let end = abs + term.len();

        let left_ok = text[..abs]
            .chars()
            .next_back()
            .map_or(true, |c| delimiters.contains(c));
        let right_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| delimiters.contains(c));

        if left_ok && right_ok {
            matches.push(abs);
            start = end;
        } else {
            start = abs + first.len_utf8();
        }
    }

    matches
}

/// Replace every bounded occurrence of `from` with `to`. `None` if the line
/// has no bounded occurrence.
pub fn replace_bounded(line: &str, from: &str, to: &str, delimiters: &Delimiters) -> Option<String> {
    let positions = find_bounded(line, from, delimiters);
    if positions.is_empty() {
        return None;
    }

    // Back to front so earlier offsets stay valid.
    let mut rewritten = line.to_string();
    for &pos in positions.iter().rev() {
        rewritten.replace_range(pos..pos + from.len(), to);
    }
    Some(rewritten)
}

/// Apply each rename in table order. A rename that would touch any line
/// already claimed by an accepted rename is dropped whole; otherwise its
/// lines become claimed.
pub fn rewrite<S: AsRef<str>>(
    lines: &[S],
    table: &RenameTable,
    delimiters: &Delimiters,
) -> RewriteOutcome {
    let mut working: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut outcome = RewriteOutcome::default();

    for pair in table.iter() {
        let mut diff = Vec::new();
        let mut conflict = false;

        for (idx, line) in working.iter().enumerate() {
            let Some(replacement) = replace_bounded(line, &pair.original, &pair.converted, delimiters)
            else {
                continue;
            };
            let line_number = idx + 1;
            if claimed.contains(&line_number) {
                conflict = true;
                break;
            }
            diff.push(DiffEntry {
                line: line_number,
                original: line.clone(),
                replacement,
            });
        }

        if conflict {
            outcome.skipped.push(pair.clone());
            continue;
        }
        if diff.is_empty() {
            continue;
        }

        for entry in &diff {
            claimed.insert(entry.line);
            working[entry.line - 1] = entry.replacement.clone();
        }
        outcome.accepted.push(AcceptedRename {
            pair: pair.clone(),
            diff,
        });
    }

    outcome.lines = working;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delims() -> Delimiters {
        Delimiters::new("(){};,=+-*/.".chars()).unwrap()
    }

    fn table(pairs: &[(&str, &str)]) -> RenameTable {
        let mut table = RenameTable::new();
        for (from, to) in pairs {
            table.insert(from, to);
        }
        table
    }

    #[test]
    fn bounded_match_skips_longer_identifiers() {
        let d = delims();
        assert_eq!(find_bounded("foo foobar barfoo foo", "foo", &d), vec![0, 18]);
        assert!(find_bounded("my_foo", "foo", &d).is_empty());
        assert_eq!(find_bounded("foo(foo);", "foo", &d), vec![0, 4]);
    }

    #[test]
    fn bounded_match_handles_multibyte_text() {
        let d = delims();
        assert_eq!(find_bounded("é foo é", "foo", &d), vec![3]);
        assert!(find_bounded("éfoo", "foo", &d).is_empty());
    }

    #[test]
    fn replace_keeps_line_terminator() {
        let d = delims();
        assert_eq!(
            replace_bounded("x = fooBar + fooBarBaz;\n", "fooBar", "foo_bar", &d).as_deref(),
            Some("x = foo_bar + fooBarBaz;\n")
        );
        assert_eq!(replace_bounded("fooBarBaz\n", "fooBar", "foo_bar", &d), None);
    }

    #[test]
    fn single_rename_spans_multiple_lines() {
        let lines = ["int fooBar = 1;\n", "int foo_bar2 = fooBar;\n"];
        let outcome = rewrite(&lines, &table(&[("fooBar", "foo_bar")]), &delims());

        assert_eq!(outcome.accepted.len(), 1);
        let accepted = &outcome.accepted[0];
        assert_eq!(accepted.line_change_set(), BTreeSet::from([1, 2]));
        assert_eq!(accepted.diff[1].replacement, "int foo_bar2 = foo_bar;\n");
        assert_eq!(outcome.lines[0], "int foo_bar = 1;\n");
    }

    #[test]
    fn conflicting_rename_is_dropped_whole() {
        let lines = ["a = oneThing;\n", "b = oneThing + twoThing;\n", "c = twoThing;\n"];
        let outcome = rewrite(
            &lines,
            &table(&[("oneThing", "one_thing"), ("twoThing", "two_thing")]),
            &delims(),
        );

        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].pair.original, "oneThing");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].original, "twoThing");
        // Line 3 is untouched even though only line 2 conflicted.
        assert_eq!(outcome.lines[2], "c = twoThing;\n");
    }

    #[test]
    fn skipped_rename_does_not_claim_lines() {
        let lines = ["a = oneThing + twoThing;\n", "twoThing;\n", "b = twoThing + threeThing;\n"];
        let outcome = rewrite(
            &lines,
            &table(&[
                ("oneThing", "one_thing"),
                ("twoThing", "two_thing"),
                ("threeThing", "three_thing"),
            ]),
            &delims(),
        );

        let originals: Vec<&str> = outcome
            .accepted
            .iter()
            .map(|r| r.pair.original.as_str())
            .collect();
        assert_eq!(originals, vec!["oneThing", "threeThing"]);
        assert_eq!(outcome.lines[2], "b = twoThing + three_thing;\n");
    }

    #[test]
    fn accepted_line_change_sets_are_disjoint() {
        let lines = [
            "alphaOne = betaTwo;\n",
            "alphaOne;\n",
            "betaTwo;\n",
            "gammaThree = alphaOne;\n",
            "gammaThree;\n",
        ];
        let outcome = rewrite(
            &lines,
            &table(&[
                ("alphaOne", "alpha_one"),
                ("betaTwo", "beta_two"),
                ("gammaThree", "gamma_three"),
            ]),
            &delims(),
        );

        let sets: Vec<BTreeSet<usize>> =
            outcome.accepted.iter().map(|r| r.line_change_set()).collect();
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                assert!(a.is_disjoint(b));
            }
        }
    }

    #[test]
    fn rename_without_occurrences_is_neither_accepted_nor_skipped() {
        let lines = ["nothing here\n"];
        let outcome = rewrite(&lines, &table(&[("fooBar", "foo_bar")]), &delims());
        assert!(outcome.accepted.is_empty());
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.lines, vec!["nothing here\n".to_string()]);
    }
}
