pub mod types;
pub use types::*;

mod element_parsers;
mod index;

pub use index::ElementIndex;

use crate::config::{ConfigLookup, TemplateEquivalence};
use crate::utils::range_utils::LineIndex;
use crate::utils::title::{TitleRules, are_same_title};

/// One analysis pass over one document: the text, its element index and the
/// configuration it is analyzed under.
///
/// Everything is computed up front in [`LintContext::new`]; afterwards the context
/// is read-only and can be shared between threads running different rules.
pub struct LintContext<'a> {
    pub content: &'a str,
    pub line_index: LineIndex,
    pub elements: ElementIndex,
    config: Option<&'a dyn ConfigLookup>,
    title_rules: TitleRules,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str, config: Option<&'a dyn ConfigLookup>) -> Self {
        let title_rules = config.map(|lookup| lookup.title_rules()).unwrap_or_default();
        Self {
            content,
            line_index: LineIndex::new(content),
            elements: ElementIndex::build(content),
            config,
            title_rules,
        }
    }

    pub fn title_rules(&self) -> &TitleRules {
        &self.title_rules
    }

    /// Configured list for `key` in `section`; empty when not configured
    pub fn config_list(&self, section: &str, key: &str) -> Vec<String> {
        self.config
            .and_then(|lookup| lookup.get(section, key))
            .unwrap_or_default()
    }

    /// Configured template equivalences for `key` in `section`; empty when not configured
    pub fn template_equivalences(&self, section: &str, key: &str) -> Vec<TemplateEquivalence> {
        self.config
            .and_then(|lookup| lookup.get_template_equivalences(section, key))
            .unwrap_or_default()
    }

    pub fn tags(&self, kind: TagKind) -> impl Iterator<Item = &Tag> {
        self.elements.tags(kind)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.elements.templates()
    }

    pub fn surrounding_tag(&self, kind: TagKind, offset: usize) -> Option<&Tag> {
        self.elements.surrounding_tag(kind, offset)
    }

    pub fn surrounding_template(&self, offset: usize) -> Option<&Template> {
        self.elements.surrounding_template(offset)
    }

    pub fn is_in_comment(&self, offset: usize) -> bool {
        self.elements.is_in_comment(offset)
    }

    pub fn last_comment_end_before(&self, offset: usize) -> Option<usize> {
        self.elements.last_comment_end_before(offset)
    }

    /// Check if two template names designate the same template on this wiki
    pub fn is_same_template(&self, first: &str, second: &str) -> bool {
        are_same_title(first, second, &self.title_rules)
    }

    /// First template in the document whose name matches one of `names`
    pub fn find_template_named(&self, names: &[String]) -> Option<&Template> {
        if names.is_empty() {
            return None;
        }
        self.templates()
            .find(|template| names.iter().any(|name| self.is_same_template(&template.name, name)))
    }
}
