//! `scenecontrol(time,effect[,value][,a][,b][,c]);`

use super::{Rewrite, Whitelists, is_chart_whitespace};
use crate::number::{parse_float_prefix, to_fixed};

const PREFIX: &str = "scenecontrol(";
const TERMINATOR: &str = ");";
const MIN_ARGS: usize = 2;
const MAX_ARGS: usize = 6;

/// Length of the scene-control statement at the start of `text`.
///
/// The statement runs to the first `);`, across line breaks if needed, and
/// carries between two and six comma-separated arguments, the first two
/// non-empty. Empty trailing slots are accepted so already-normalized
/// statements match again.
pub(crate) fn match_at(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(PREFIX)?;
    let close = rest.find(TERMINATOR)?;

    split_args(&rest[..close])?;
    Some(PREFIX.len() + close + TERMINATOR.len())
}

fn split_args(inner: &str) -> Option<Vec<&str>> {
    let args: Vec<&str> = inner.split(',').collect();
    if !(MIN_ARGS..=MAX_ARGS).contains(&args.len()) || args[..MIN_ARGS].iter().any(|a| a.is_empty()) {
        return None;
    }
    Some(args)
}

/// Decide what happens to one matched scene-control statement.
///
/// Statements whose effect name has upper-case letters, quotes, or is not
/// whitelisted are deleted. Kept statements are rebuilt with all six slots, and
/// an integer third argument is widened to two decimals.
pub(crate) fn rewrite(statement: &str, whitelists: &Whitelists) -> Rewrite {
    let Some(inner) = statement
        .strip_prefix(PREFIX)
        .and_then(|s| s.strip_suffix(TERMINATOR))
    else {
        return Rewrite::Keep;
    };
    let Some(args) = split_args(inner) else {
        return Rewrite::Keep;
    };

    let arg = |i: usize| args.get(i).map(|a| a.trim_matches(is_chart_whitespace));
    let effect = arg(1).unwrap_or("");
    if effect.chars().any(|c| c.is_ascii_uppercase()) {
        return Rewrite::Delete;
    }
    if effect.contains(['"', '\'']) || !whitelists.allows_scene_control(effect) {
        return Rewrite::Delete;
    }

    let value = match (args.get(2), arg(2)) {
        (Some(raw), _) if raw.is_empty() => String::new(),
        (_, Some(v)) if !v.contains('.') => to_fixed(parse_float_prefix(v), 2),
        (_, Some(v)) => v.to_string(),
        _ => String::new(),
    };
    let slot = |i: usize| arg(i).unwrap_or("");

    Rewrite::Replace(format!(
        "scenecontrol({},{},{},{},{},{});",
        slot(0),
        effect,
        value,
        slot(3),
        slot(4),
        slot(5)
    ))
}
