//! Core rule abstractions: the `Rule` trait, defect reports and candidate fixes.

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use thiserror::Error;

use crate::lint_context::LintContext;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LintError {
    /// A rule produced a report or fix outside the document or inside a character
    #[error("Rule {rule} produced an invalid range {start}..{end}")]
    InvalidRange { rule: String, start: usize, end: usize },
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

/// Severity attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which family of markup a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    Reference,
    Link,
    Style,
    Other,
}

/// A candidate replacement: `replacement` is meant to be written over `range`.
///
/// Applying it is always up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
    pub description: String,
}

impl Fix {
    pub fn new(range: Range<usize>, replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
            description: description.into(),
        }
    }

    /// Return `content` with this replacement applied
    pub fn apply_to(&self, content: &str) -> String {
        let mut fixed = String::with_capacity(content.len() + self.replacement.len());
        fixed.push_str(&content[..self.range.start]);
        fixed.push_str(&self.replacement);
        fixed.push_str(&content[self.range.end..]);
        fixed
    }
}

/// A defect found by a rule.
///
/// `line`/`column` are 1-indexed and point at the start of `range`;
/// `end_line`/`end_column` point just past its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub rule_name: Option<String>,
    pub message: String,
    pub range: Range<usize>,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub severity: Severity,
    /// Candidate fixes, most likely first. Empty when no safe fix is known.
    pub fixes: Vec<Fix>,
}

impl LintWarning {
    /// Build a report for `range`, computing line and column from the context
    pub fn new(rule: &dyn Rule, ctx: &LintContext, range: Range<usize>) -> Self {
        let (line, column) = ctx.line_index.line_col(range.start);
        let (end_line, end_column) = ctx.line_index.line_col(range.end);
        Self {
            rule_name: Some(rule.name().to_string()),
            message: rule.description().to_string(),
            range,
            line,
            column,
            end_line,
            end_column,
            severity: rule.default_severity(),
            fixes: Vec::new(),
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }
}

/// A check over one document snapshot.
///
/// Rules are stateless with respect to documents: the same instance may be used
/// for any number of contexts, from any number of threads.
pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Collect every defect in the document, with candidate fixes
    fn check(&self, ctx: &LintContext) -> LintResult;

    /// Only answer whether the document has the defect.
    ///
    /// This can be `true` while `check` returns nothing, when the rule knows a defect
    /// exists but cannot point at a location for it.
    fn detect(&self, ctx: &LintContext) -> bool {
        self.check(ctx).is_ok_and(|warnings| !warnings.is_empty())
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Other
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Configuration parameters understood by this rule (name -> description)
    fn parameters(&self) -> BTreeMap<&'static str, &'static str> {
        BTreeMap::new()
    }

    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    fn as_any(&self) -> &dyn std::any::Any;

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;
}

dyn_clone::clone_trait_object!(Rule);
