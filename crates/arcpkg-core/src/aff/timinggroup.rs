//! `timinggroup(flags){`

use super::{Rewrite, Whitelists, is_chart_whitespace};

const PREFIX: &str = "timinggroup(";
const CLEARED: &str = "timinggroup(){";

/// Length of the timing-group header at the start of `text`.
///
/// The argument list runs to the first `)`; only whitespace may separate it
/// from the opening brace.
pub(crate) fn match_at(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(PREFIX)?;
    let close = rest.find(')')?;
    let after = &rest[close + 1..];
    let gap = after.len() - after.trim_start_matches(is_chart_whitespace).len();
    after[gap..].starts_with('{').then(|| PREFIX.len() + close + 1 + gap + 1)
}

/// A literal made only of digits, underscores and periods
fn is_numeric_literal(arg: &str) -> bool {
    !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_digit() || c == '_' || c == '.')
}

/// Keep the header when every flag is whitelisted or a numeric literal,
/// otherwise clear the whole argument list.
pub(crate) fn rewrite(statement: &str, whitelists: &Whitelists) -> Rewrite {
    let Some(inner) = statement
        .strip_prefix(PREFIX)
        .and_then(|s| s.find(')').map(|close| &s[..close]))
    else {
        return Rewrite::Keep;
    };

    let valid = inner
        .split(',')
        .map(|arg| arg.trim_matches(is_chart_whitespace))
        .all(|arg| whitelists.allows_timing_group(arg) || is_numeric_literal(arg));

    if valid || statement == CLEARED {
        Rewrite::Keep
    } else {
        Rewrite::Replace(CLEARED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(statement: &str) -> Rewrite {
        rewrite(statement, &Whitelists::DEFAULT)
    }

    #[test]
    fn test_match_at() {
        assert_eq!(match_at("timinggroup(anglex){"), Some(20));
        assert_eq!(match_at("timinggroup(){"), Some(14));
        assert_eq!(match_at("timinggroup(noinput)\n{"), Some(22));
        assert_eq!(match_at("timinggroup(noinput);"), None);
        assert_eq!(match_at("timinggroup(noinput"), None);
    }

    #[test]
    fn test_valid_flags_kept() {
        assert_eq!(run("timinggroup(anglex,100){"), Rewrite::Keep);
        assert_eq!(run("timinggroup(noinput,fadingholds,angley){"), Rewrite::Keep);
        assert_eq!(run("timinggroup(1_000.5){"), Rewrite::Keep);
    }

    #[test]
    fn test_invalid_flag_clears_all() {
        assert_eq!(run("timinggroup(foo){"), Rewrite::Replace(CLEARED.to_string()));
        assert_eq!(
            run("timinggroup(anglex,NoInput){"),
            Rewrite::Replace(CLEARED.to_string())
        );
        assert_eq!(run("timinggroup(-5){"), Rewrite::Replace(CLEARED.to_string()));
    }

    #[test]
    fn test_empty_argument_list_is_normalized() {
        assert_eq!(run("timinggroup(){"), Rewrite::Keep);
        assert_eq!(
            run("timinggroup()\n{"),
            Rewrite::Replace(CLEARED.to_string())
        );
    }
}
