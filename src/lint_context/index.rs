use std::ops::Range;

use super::element_parsers;
use super::types::*;

/// Position-ordered, read-only collection of every element in a document.
///
/// Built in one pass by [`ElementIndex::build`]; rules query it instead of re-lexing.
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    elements: Vec<Element>,
    /// Comment ranges, ordered and disjoint
    comments: Vec<Range<usize>>,
}

impl ElementIndex {
    /// Index `content`. Empty content gives an empty index.
    pub fn build(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }
        let mut elements = element_parsers::parse_elements(content);
        elements.sort_by_key(Element::begin);
        log::debug!("Indexed {} element(s) in {} bytes", elements.len(), content.len());
        let comments = elements
            .iter()
            .filter_map(|element| match element {
                Element::Comment(comment) => Some(comment.begin..comment.end),
                _ => None,
            })
            .collect();
        Self { elements, comments }
    }

    /// All elements, ordered by begin offset
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn all_tags(&self) -> impl Iterator<Item = &Tag> {
        self.elements.iter().filter_map(Element::as_tag)
    }

    pub fn tags(&self, kind: TagKind) -> impl Iterator<Item = &Tag> {
        self.all_tags().filter(move |tag| tag.kind == kind)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.elements.iter().filter_map(Element::as_template)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.elements.iter().filter_map(|element| match element {
            Element::Comment(comment) => Some(comment),
            _ => None,
        })
    }

    pub fn external_links(&self) -> impl Iterator<Item = &ExternalLink> {
        self.elements.iter().filter_map(|element| match element {
            Element::ExternalLink(link) => Some(link),
            _ => None,
        })
    }

    /// Innermost element of `kind` strictly containing `offset` (`begin < offset < end`).
    ///
    /// Elements of one kind never overlap without nesting, so among the candidates
    /// the one starting last is the innermost.
    pub fn surrounding(&self, offset: usize, kind: ElementKind) -> Option<&Element> {
        let candidates = self.elements.partition_point(|element| element.begin() < offset);
        self.elements[..candidates]
            .iter()
            .rev()
            .find(|element| element.kind() == kind && element.strictly_contains(offset))
    }

    pub fn surrounding_tag(&self, kind: TagKind, offset: usize) -> Option<&Tag> {
        self.surrounding(offset, ElementKind::Tag(kind)).and_then(Element::as_tag)
    }

    pub fn surrounding_template(&self, offset: usize) -> Option<&Template> {
        self.surrounding(offset, ElementKind::Template)
            .and_then(Element::as_template)
    }

    /// Check if a byte position is inside an HTML comment
    pub fn is_in_comment(&self, offset: usize) -> bool {
        let candidates = self.comments.partition_point(|range| range.start < offset);
        candidates > 0 && offset < self.comments[candidates - 1].end
    }

    /// End of the last comment that is closed at or before `offset`
    pub fn last_comment_end_before(&self, offset: usize) -> Option<usize> {
        let closed = self.comments.partition_point(|range| range.end <= offset);
        closed.checked_sub(1).map(|i| self.comments[i].end)
    }
}
