//! Chart script (`.aff`) sanitization.
//!
//! The rewriter runs four stages in order, each on the previous stage's output:
//! 1. whitespace removal on every line
//! 2. `scenecontrol(...)` validation and normalization, then blank-line removal
//! 3. `timinggroup(...){` flag validation
//! 4. `arc(...)` duplicate-coordinate repair
//!
//! Each statement kind has its own matcher module. A matcher finds the extent of
//! one statement and decides a [`Rewrite`] for it; unmatched text passes through.

mod arc;
mod rewriter;
mod scenecontrol;
mod timinggroup;
mod whitelist;

pub use arc::ArcStatement;
pub use rewriter::{ChartRewriter, RewriteReport, remove_blank_lines, strip_whitespace};
pub use whitelist::Whitelists;

/// Decision taken by a statement matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Leave the statement as written
    Keep,
    /// Substitute the statement with new text
    Replace(String),
    /// Remove the statement entirely
    Delete,
}

/// Chart script file extension
pub const CHART_EXTENSION: &str = "aff";

/// Number of chart copies written, one per rating class
pub const CHART_COPIES: u8 = 3;

/// Whitespace as chart tooling understands it.
///
/// Covers the Unicode `White_Space` set plus the byte-order mark, minus NEL.
pub(crate) fn is_chart_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Replace every statement found by `match_at` with the outcome of `decide`.
///
/// `match_at` receives the text starting at an occurrence of `keyword` and returns
/// the byte length of the statement there, or `None` when the text does not form one.
pub(crate) fn rewrite_statements<M, D>(text: &str, keyword: &str, match_at: M, mut decide: D) -> String
where
    M: Fn(&str) -> Option<usize>,
    D: FnMut(&str) -> Rewrite,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find(keyword) {
        let start = search + found;
        let Some(len) = match_at(&text[start..]) else {
            search = start + 1;
            continue;
        };

        let end = start + len;
        let statement = &text[start..end];
        out.push_str(&text[copied..start]);
        match decide(statement) {
            Rewrite::Keep => out.push_str(statement),
            Rewrite::Replace(replacement) => out.push_str(&replacement),
            Rewrite::Delete => {}
        }
        copied = end;
        search = end;
    }

    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_statements_passes_unmatched_text() {
        let text = "ab(1)x ab(2) ab";
        let out = rewrite_statements(
            text,
            "ab(",
            |s| s.find(')').map(|i| i + 1),
            |s| {
                if s == "ab(1)" {
                    Rewrite::Delete
                } else {
                    Rewrite::Replace("AB".to_string())
                }
            },
        );
        assert_eq!(out, "x AB ab");
    }

    #[test]
    fn test_chart_whitespace() {
        assert!(is_chart_whitespace(' '));
        assert!(is_chart_whitespace('\t'));
        assert!(is_chart_whitespace('\u{3000}'));
        assert!(is_chart_whitespace('\u{feff}'));
        assert!(!is_chart_whitespace('\u{85}'));
        assert!(!is_chart_whitespace('a'));
    }
}
