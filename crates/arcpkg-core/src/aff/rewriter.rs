use tracing::debug;

use super::{Rewrite, Whitelists, arc, is_chart_whitespace, rewrite_statements, scenecontrol, timinggroup};

/// Counts of what a rewrite changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub scene_controls_kept: usize,
    pub scene_controls_removed: usize,
    pub timing_groups_cleared: usize,
    pub arcs_repaired: usize,
}

/// Sanitizes chart scripts against a pair of whitelists
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartRewriter {
    whitelists: Whitelists,
}

impl ChartRewriter {
    pub fn new(whitelists: Whitelists) -> Self {
        Self { whitelists }
    }

    pub fn whitelists(&self) -> &Whitelists {
        &self.whitelists
    }

    /// Run every stage over `text` and return the sanitized script
    pub fn rewrite(&self, text: &str) -> String {
        self.rewrite_with_report(text).0
    }

    pub fn rewrite_with_report(&self, text: &str) -> (String, RewriteReport) {
        let mut report = RewriteReport::default();

        let text = strip_whitespace(text);
        let text = self.normalize_scene_controls(&text, &mut report);
        let text = remove_blank_lines(&text);
        let text = self.validate_timing_groups(&text, &mut report);
        let text = self.repair_arcs(&text, &mut report);

        debug!(
            "Chart rewrite: {} scenecontrol kept, {} removed, {} timinggroup cleared, {} arc repaired",
            report.scene_controls_kept,
            report.scene_controls_removed,
            report.timing_groups_cleared,
            report.arcs_repaired
        );

        (text, report)
    }

    /// Validate and rebuild every `scenecontrol` statement, deleting rejected ones.
    ///
    /// Deleted statements leave their line empty; callers remove those with
    /// [`remove_blank_lines`].
    pub fn normalize_scene_controls(&self, text: &str, report: &mut RewriteReport) -> String {
        rewrite_statements(text, "scenecontrol(", scenecontrol::match_at, |statement| {
            let rewrite = scenecontrol::rewrite(statement, &self.whitelists);
            match rewrite {
                Rewrite::Delete => report.scene_controls_removed += 1,
                _ => report.scene_controls_kept += 1,
            }
            rewrite
        })
    }

    /// Clear the argument list of every `timinggroup` header with an unknown flag
    pub fn validate_timing_groups(&self, text: &str, report: &mut RewriteReport) -> String {
        rewrite_statements(text, "timinggroup(", timinggroup::match_at, |statement| {
            let rewrite = timinggroup::rewrite(statement, &self.whitelists);
            if rewrite != Rewrite::Keep {
                report.timing_groups_cleared += 1;
            }
            rewrite
        })
    }

    /// Move the end time of zero-length arcs one tick past their start
    pub fn repair_arcs(&self, text: &str, report: &mut RewriteReport) -> String {
        rewrite_statements(text, "arc(", arc::match_at, |statement| {
            let rewrite = arc::rewrite(statement);
            if rewrite != Rewrite::Keep {
                report.arcs_repaired += 1;
            }
            rewrite
        })
    }
}

/// Remove every whitespace character from every line, keeping the line breaks
pub fn strip_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| line.chars().filter(|c| !is_chart_whitespace(*c)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop lines that are empty or whitespace-only.
///
/// The segment after the final line break is kept, so a trailing newline
/// survives as long as some content does.
pub fn remove_blank_lines(text: &str) -> String {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len() - 1;

    segments
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !line.chars().all(is_chart_whitespace))
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "AudioOffset:0
-
timing(0,120.00,4.00);
scenecontrol(1000, trackdisplay, 1, 255, 0);
scenecontrol(1000,Flash,1);
scenecontrol(2000,\"redline\",1);
(1000,1);
timinggroup(noinput, 100){
  timing(0,120.00,4.00);
  arc(500,500,0.00,1.00,s,1.00,0.00,0,none,false);
};
timinggroup(glitch){
  arc(600,700,0.00,1.00,s,1.00,0.00,0,none,false);
};
";

    #[test]
    fn test_full_rewrite() {
        let (out, report) = ChartRewriter::default().rewrite_with_report(SAMPLE);

        let expected = "AudioOffset:0
-
timing(0,120.00,4.00);
scenecontrol(1000,trackdisplay,1.00,255,0,);
(1000,1);
timinggroup(noinput,100){
timing(0,120.00,4.00);
arc(500,501,0.00,1.00,s,1.00,0.00,0,none,false);
};
timinggroup(){
arc(600,700,0.00,1.00,s,1.00,0.00,0,none,false);
};
";
        assert_eq!(out, expected);
        assert_eq!(
            report,
            RewriteReport {
                scene_controls_kept: 1,
                scene_controls_removed: 2,
                timing_groups_cleared: 1,
                arcs_repaired: 1,
            }
        );
    }

    #[test]
    fn test_rewrite_is_stable() {
        let rewriter = ChartRewriter::default();
        let once = rewriter.rewrite(SAMPLE);
        let twice = rewriter.rewrite(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_whitespace_idempotent() {
        let text = " a b\t\n\r\n  c\u{3000}d \n";
        let once = strip_whitespace(text);
        assert_eq!(once, "ab\n\ncd\n");
        assert_eq!(strip_whitespace(&once), once);
    }

    #[test]
    fn test_removed_statement_leaves_no_blank_line() {
        let out = ChartRewriter::default().rewrite("a;\nscenecontrol(1,bogus,1);\nb;");
        assert_eq!(out, "a;\nb;");
    }

    #[test]
    fn test_remove_blank_lines() {
        assert_eq!(remove_blank_lines("a\n\n\nb"), "a\nb");
        assert_eq!(remove_blank_lines("a\n\n"), "a\n");
        assert_eq!(remove_blank_lines("\n\na"), "a");
        assert_eq!(remove_blank_lines("\n"), "");
        assert_eq!(remove_blank_lines(""), "");
    }

    #[test]
    fn test_unmatched_text_passes_through() {
        let text = "scenecontrol(oops\narc(1,2)\ntiminggroup(x";
        assert_eq!(ChartRewriter::default().rewrite(text), text);
    }

    #[test]
    fn test_cleared_timing_group_not_counted_again() {
        let (out, report) =
            ChartRewriter::default().rewrite_with_report("timinggroup(){\n};\ntiminggroup(x){\n};\n");
        assert_eq!(out, "timinggroup(){\n};\ntiminggroup(){\n};\n");
        assert_eq!(report.timing_groups_cleared, 1);
    }

    #[test]
    fn test_custom_whitelists() {
        let rewriter = ChartRewriter::new(Whitelists {
            scene_control: &["flash"],
            timing_group: &["glitch"],
        });
        let out = rewriter.rewrite("scenecontrol(1,flash);\nscenecontrol(1,redline);\ntiminggroup(glitch){");
        assert_eq!(out, "scenecontrol(1,flash,,,,);\ntiminggroup(glitch){");
        assert_eq!(rewriter.whitelists().scene_control, &["flash"]);
    }
}
