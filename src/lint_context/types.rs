use indexmap::IndexMap;
use serde::Serialize;

/// Tag names recognized by the indexer. Anything else between `<` and `>` is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    // Wiki extension tags
    Ref,
    References,
    Nowiki,
    Pre,
    Math,
    Source,
    SyntaxHighlight,
    Gallery,
    Poem,
    Score,
    Chem,
    Timeline,
    Graph,
    Templatedata,
    Includeonly,
    Noinclude,
    Onlyinclude,
    // HTML tags
    Small,
    Big,
    Sub,
    Sup,
    Span,
    Div,
    Code,
    Br,
    Center,
    Font,
    Blockquote,
    Cite,
    B,
    I,
    U,
    S,
    Del,
    Ins,
    Tt,
    Abbr,
    Hr,
}

static TAG_NAMES: phf::Map<&'static str, TagKind> = phf::phf_map! {
    "ref" => TagKind::Ref,
    "references" => TagKind::References,
    "nowiki" => TagKind::Nowiki,
    "pre" => TagKind::Pre,
    "math" => TagKind::Math,
    "source" => TagKind::Source,
    "syntaxhighlight" => TagKind::SyntaxHighlight,
    "gallery" => TagKind::Gallery,
    "poem" => TagKind::Poem,
    "score" => TagKind::Score,
    "chem" => TagKind::Chem,
    "timeline" => TagKind::Timeline,
    "graph" => TagKind::Graph,
    "templatedata" => TagKind::Templatedata,
    "includeonly" => TagKind::Includeonly,
    "noinclude" => TagKind::Noinclude,
    "onlyinclude" => TagKind::Onlyinclude,
    "small" => TagKind::Small,
    "big" => TagKind::Big,
    "sub" => TagKind::Sub,
    "sup" => TagKind::Sup,
    "span" => TagKind::Span,
    "div" => TagKind::Div,
    "code" => TagKind::Code,
    "br" => TagKind::Br,
    "center" => TagKind::Center,
    "font" => TagKind::Font,
    "blockquote" => TagKind::Blockquote,
    "cite" => TagKind::Cite,
    "b" => TagKind::B,
    "i" => TagKind::I,
    "u" => TagKind::U,
    "s" => TagKind::S,
    "del" => TagKind::Del,
    "ins" => TagKind::Ins,
    "tt" => TagKind::Tt,
    "abbr" => TagKind::Abbr,
    "hr" => TagKind::Hr,
};

impl TagKind {
    /// Look up a tag name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        if name.bytes().all(|b| !b.is_ascii_uppercase()) {
            return TAG_NAMES.get(name).copied();
        }
        TAG_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// HTML elements that never take a closing tag
    pub fn is_void(self) -> bool {
        matches!(self, TagKind::Br | TagKind::Hr)
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Ref => "ref",
            TagKind::References => "references",
            TagKind::Nowiki => "nowiki",
            TagKind::Pre => "pre",
            TagKind::Math => "math",
            TagKind::Source => "source",
            TagKind::SyntaxHighlight => "syntaxhighlight",
            TagKind::Gallery => "gallery",
            TagKind::Poem => "poem",
            TagKind::Score => "score",
            TagKind::Chem => "chem",
            TagKind::Timeline => "timeline",
            TagKind::Graph => "graph",
            TagKind::Templatedata => "templatedata",
            TagKind::Includeonly => "includeonly",
            TagKind::Noinclude => "noinclude",
            TagKind::Onlyinclude => "onlyinclude",
            TagKind::Small => "small",
            TagKind::Big => "big",
            TagKind::Sub => "sub",
            TagKind::Sup => "sup",
            TagKind::Span => "span",
            TagKind::Div => "div",
            TagKind::Code => "code",
            TagKind::Br => "br",
            TagKind::Center => "center",
            TagKind::Font => "font",
            TagKind::Blockquote => "blockquote",
            TagKind::Cite => "cite",
            TagKind::B => "b",
            TagKind::I => "i",
            TagKind::U => "u",
            TagKind::S => "s",
            TagKind::Del => "del",
            TagKind::Ins => "ins",
            TagKind::Tt => "tt",
            TagKind::Abbr => "abbr",
            TagKind::Hr => "hr",
        }
    }
}

/// How a tag was written and whether it found its counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagForm {
    /// `<x>...</x>`; the range covers both tags and the content between them
    Paired,
    /// `<x/>`
    SelfClosing,
    /// `<x>` without a closing tag
    Open,
    /// `</x>` without an opening tag
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagParameter {
    pub name: String,
    /// Value with surrounding quotes removed; empty for bare attributes
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub kind: TagKind,
    /// Name as written in the document
    pub name: String,
    pub form: TagForm,
    pub begin: usize,
    pub end: usize,
    /// End of the opening tag token (same as `end` for unpaired tags)
    pub open_end: usize,
    /// Start of the closing tag token, for paired tags
    pub close_begin: Option<usize>,
    pub parameters: Vec<TagParameter>,
}

impl Tag {
    pub fn is_complete(&self) -> bool {
        matches!(self.form, TagForm::Paired | TagForm::SelfClosing)
    }

    pub fn is_unmatched_close(&self) -> bool {
        self.form == TagForm::Close
    }

    /// First parameter with this name (case-insensitive)
    pub fn parameter(&self, name: &str) -> Option<&TagParameter> {
        self.parameters.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Byte range of the content between opening and closing tags
    pub fn content_range(&self) -> Option<std::ops::Range<usize>> {
        self.close_begin.map(|close| self.open_end..close)
    }

    /// The tag written in its self-closing form, keeping its parameters
    pub fn self_closing_form(&self) -> String {
        let mut text = format!("<{}", self.kind.name());
        for parameter in &self.parameters {
            if parameter.value.is_empty() {
                text.push_str(&format!(" {}", parameter.name));
            } else if parameter.value.contains('"') {
                text.push_str(&format!(" {}='{}'", parameter.name, parameter.value));
            } else {
                text.push_str(&format!(" {}=\"{}\"", parameter.name, parameter.value));
            }
        }
        text.push_str(" />");
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Trimmed name, as written
    pub name: String,
    pub begin: usize,
    pub end: usize,
    /// Parameter name -> raw value, in document order. Positional parameters are "1", "2", ...
    pub parameters: IndexMap<String, String>,
}

impl Template {
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameters.get(name.trim()).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub begin: usize,
    pub end: usize,
    /// False when the comment runs to the end of the text without `-->`
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub begin: usize,
    pub end: usize,
    pub url: String,
    pub text: Option<String>,
}

/// Any indexed piece of markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Tag(Tag),
    Template(Template),
    Comment(Comment),
    ExternalLink(ExternalLink),
}

/// What to look for when resolving an enclosing element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Tag(TagKind),
    Template,
    Comment,
    ExternalLink,
}

impl Element {
    pub fn begin(&self) -> usize {
        match self {
            Element::Tag(tag) => tag.begin,
            Element::Template(template) => template.begin,
            Element::Comment(comment) => comment.begin,
            Element::ExternalLink(link) => link.begin,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Element::Tag(tag) => tag.end,
            Element::Template(template) => template.end,
            Element::Comment(comment) => comment.end,
            Element::ExternalLink(link) => link.end,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.begin()..self.end()
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Element::Tag(tag) => tag.is_complete(),
            Element::Template(_) | Element::ExternalLink(_) => true,
            Element::Comment(comment) => comment.complete,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Tag(tag) => ElementKind::Tag(tag.kind),
            Element::Template(_) => ElementKind::Template,
            Element::Comment(_) => ElementKind::Comment,
            Element::ExternalLink(_) => ElementKind::ExternalLink,
        }
    }

    /// True when `offset` lies strictly inside the element
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.begin() < offset && offset < self.end()
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Element::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Element::Template(template) => Some(template),
            _ => None,
        }
    }
}
