use serde::Serialize;

use super::rewrite::AcceptedRename;

/// One rewritten line: 1-indexed line number, text before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEntry {
    pub line: usize,
    pub original: String,
    pub replacement: String,
}

/// A proposed rename, ready for the caller to show or apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameReport {
    pub original: String,
    pub converted: String,
    pub message: String,
    pub first_line: usize,
    pub diff: Vec<DiffEntry>,
}

pub fn rename_message(original: &str, converted: &str, lines_affected: usize) -> String {
    let mut message = format!("Change '{}' to '{}'", original, converted);
    if lines_affected > 1 {
        message.push_str(&format!(": {} lines affected", lines_affected));
    }
    message
}

/// Turn accepted renames into reports, in acceptance order.
pub fn emit_reports(accepted: Vec<AcceptedRename>) -> Vec<RenameReport> {
    accepted
        .into_iter()
        .filter_map(|rename| {
            let first_line = rename.diff.first()?.line;
            Some(RenameReport {
                message: rename_message(
                    &rename.pair.original,
                    &rename.pair.converted,
                    rename.diff.len(),
                ),
                original: rename.pair.original,
                converted: rename.pair.converted,
                first_line,
                diff: rename.diff,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::casing::RenamePair;

    fn entry(line: usize) -> DiffEntry {
        DiffEntry {
            line,
            original: format!("fooBar{}\n", line),
            replacement: format!("foo_bar{}\n", line),
        }
    }

    #[test]
    fn message_mentions_line_count_only_when_plural() {
        assert_eq!(rename_message("a", "b", 1), "Change 'a' to 'b'");
        assert_eq!(rename_message("a", "b", 3), "Change 'a' to 'b': 3 lines affected");
    }

    #[test]
    fn report_points_at_first_affected_line() {
        let reports = emit_reports(vec![AcceptedRename {
            pair: RenamePair {
                original: "fooBar".to_string(),
                converted: "foo_bar".to_string(),
            },
            diff: vec![entry(4), entry(9)],
        }]);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].first_line, 4);
        assert_eq!(reports[0].message, "Change 'fooBar' to 'foo_bar': 2 lines affected");
        assert_eq!(reports[0].diff.len(), 2);
    }

    #[test]
    fn report_serializes_camel_case_fields() {
        let reports = emit_reports(vec![AcceptedRename {
            pair: RenamePair {
                original: "fooBar".to_string(),
                converted: "foo_bar".to_string(),
            },
            diff: vec![entry(1)],
        }]);
        let json = serde_json::to_value(&reports[0]).unwrap();

        assert_eq!(json["firstLine"], 1);
        assert_eq!(json["diff"][0]["replacement"], "foo_bar1\n");
    }
}
