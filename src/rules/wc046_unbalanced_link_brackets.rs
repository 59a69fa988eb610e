/// Rule WC046: Square brackets not correct begin
///
/// Counts `[[` and `]]` from the start of the page; a `]]` that brings the count
/// below zero closes a link that was never opened.
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};

const URL_PREFIXES: &[&str] = &["http://", "https://"];

#[derive(Debug, Clone, Default)]
pub struct WC046UnbalancedLinkBrackets;

impl WC046UnbalancedLinkBrackets {
    /// Scan the page; with `collect` unset, stop at the first defect
    fn analyze(&self, ctx: &LintContext, collect: bool) -> (bool, Vec<LintWarning>) {
        let mut warnings = Vec::new();
        let mut found = false;
        let mut balance: i32 = 0;
        let mut next_open = find_outside_comments(ctx, "[[", 0);
        let mut next_close = find_outside_comments(ctx, "]]", 0);

        while let Some(close) = next_close {
            if let Some(open) = next_open.filter(|&open| open < close) {
                balance += 1;
                next_open = find_outside_comments(ctx, "[[", open + 2);
                continue;
            }

            balance -= 1;
            if balance < 0 {
                if !collect {
                    return (true, warnings);
                }
                found = true;
                warnings.push(self.report(ctx, close));
                balance = 0;
            }
            next_close = find_outside_comments(ctx, "]]", close + 2);
        }

        (found, warnings)
    }

    /// Build the report for an unmatched `]]` starting at `close`
    fn report(&self, ctx: &LintContext, close: usize) -> LintWarning {
        let content = ctx.content;
        let end = close + 2;

        // Text run before the brackets: no newline, no `]`, no comment
        let after_break = content[..close].rfind(['\n', ']']).map_or(0, |i| i + 1);
        let start = ctx
            .last_comment_end_before(close)
            .map_or(after_break, |comment_end| comment_end.max(after_break));

        // [....]] is most likely [[....]]
        if let Some(open) = content[start..close].rfind('[').map(|i| start + i) {
            let between = &content[open + 1..close];
            let span = &content[open..end];
            let mut warning = LintWarning::new(self, ctx, open..end)
                .with_fix(Fix::new(open..end, format!("[{span}"), "Internal link"));
            if URL_PREFIXES.iter().any(|prefix| between.starts_with(prefix)) {
                warning = warning.with_fix(Fix::new(open..end, &span[..span.len() - 1], "External link"));
            }
            return warning;
        }

        let span = &content[start..end];
        LintWarning::new(self, ctx, start..end).with_fix(Fix::new(start..end, format!("[{span}"), "Internal link"))
    }
}

impl Rule for WC046UnbalancedLinkBrackets {
    fn name(&self) -> &'static str {
        "WC046"
    }

    fn description(&self) -> &'static str {
        "Square brackets not correct begin"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        Ok(self.analyze(ctx, true).1)
    }

    fn detect(&self, ctx: &LintContext) -> bool {
        self.analyze(ctx, false).0
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Link
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains("]]")
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(WC046UnbalancedLinkBrackets)
    }
}
