//! Single left-to-right scan that discovers tags, templates, comments and external links.

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::*;

// Attribute inside a tag: name, name=value, name="value" or name='value'
static TAG_PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/"'<>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
});

/// Prefixes that turn `[...]` into an external link
const URL_SCHEMES: &[&str] = &[
    "http://", "https://", "ftp://", "ftps://", "sftp://", "irc://", "ircs://", "git://", "svn://", "ssh://",
    "telnet://", "mms://", "nntp://", "gopher://", "news:", "mailto:", "urn:", "geo:", "tel:", "sip:", "xmpp:",
    "magnet:", "//",
];

/// A tag token as written: `<x ...>`, `<x .../>` or `</x>`
struct TagToken<'a> {
    kind: TagKind,
    name: &'a str,
    begin: usize,
    end: usize,
    closing: bool,
    self_closing: bool,
    attributes: &'a str,
}

/// An opening tag waiting for its closing counterpart
struct PendingTag {
    name: String,
    begin: usize,
    end: usize,
    parameters: Vec<TagParameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Template,
    /// `{{{name|default}}}`: only tracked so its braces do not close a template
    Placeholder,
}

/// A pipe at template level, and the first `=` that follows it in the same part
struct Separator {
    pipe: usize,
    equals: Option<usize>,
}

/// An open `{{` or `{{{` during the scan
struct Frame {
    kind: FrameKind,
    begin: usize,
    /// Depth of `[[...]]` links opened inside this frame
    link_depth: usize,
    separators: Vec<Separator>,
}

impl Frame {
    fn new(kind: FrameKind, begin: usize) -> Self {
        Self {
            kind,
            begin,
            link_depth: 0,
            separators: Vec::new(),
        }
    }

    fn splits_parameters(&self) -> bool {
        self.kind == FrameKind::Template && self.link_depth == 0
    }

    /// Build the template once the closing `}}` is found (`end` is just past it)
    fn into_template(self, content: &str, end: usize) -> Option<Template> {
        let inner_start = self.begin + 2;
        let inner_end = end - 2;
        let name_end = self.separators.first().map_or(inner_end, |separator| separator.pipe);
        let name = content[inner_start..name_end].trim();
        if name.is_empty() {
            return None;
        }

        let mut parameters = IndexMap::new();
        let mut positional = 0;
        for (i, separator) in self.separators.iter().enumerate() {
            let part_start = separator.pipe + 1;
            let part_end = self.separators.get(i + 1).map_or(inner_end, |next| next.pipe);
            match separator.equals {
                Some(equals) => {
                    let key = content[part_start..equals].trim().to_string();
                    let value = content[equals + 1..part_end].trim().to_string();
                    parameters.insert(key, value);
                }
                None => {
                    positional += 1;
                    parameters.insert(positional.to_string(), content[part_start..part_end].to_string());
                }
            }
        }

        Some(Template {
            name: name.to_string(),
            begin: self.begin,
            end,
            parameters,
        })
    }
}

/// Scan `content` once and return every element found, in discovery order
pub(super) fn parse_elements(content: &str) -> Vec<Element> {
    let bytes = content.as_bytes();
    let mut elements = Vec::new();
    let mut open_tags: HashMap<TagKind, Vec<PendingTag>> = HashMap::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'<' => {
                if content[pos..].starts_with("<!--") {
                    let comment = parse_comment(content, pos);
                    pos = comment.end;
                    elements.push(Element::Comment(comment));
                } else if let Some(token) = parse_tag_token(content, pos) {
                    pos = token.end;
                    record_tag(token, &mut open_tags, &mut elements);
                } else {
                    pos += 1;
                }
            }
            b'{' if bytes.get(pos + 1) == Some(&b'{') => {
                if bytes.get(pos + 2) == Some(&b'{') {
                    frames.push(Frame::new(FrameKind::Placeholder, pos));
                    pos += 3;
                } else {
                    frames.push(Frame::new(FrameKind::Template, pos));
                    pos += 2;
                }
            }
            b'}' if bytes.get(pos + 1) == Some(&b'}') => match frames.last().map(|frame| frame.kind) {
                Some(FrameKind::Placeholder) => {
                    frames.pop();
                    pos += if bytes.get(pos + 2) == Some(&b'}') { 3 } else { 2 };
                }
                Some(FrameKind::Template) => {
                    pos += 2;
                    if let Some(template) = frames.pop().and_then(|frame| frame.into_template(content, pos)) {
                        elements.push(Element::Template(template));
                    }
                }
                None => pos += 2,
            },
            b'[' => {
                if bytes.get(pos + 1) == Some(&b'[') {
                    if let Some(frame) = frames.last_mut() {
                        frame.link_depth += 1;
                    }
                    pos += 2;
                } else {
                    if let Some(link) = parse_external_link(content, pos) {
                        elements.push(Element::ExternalLink(link));
                    }
                    pos += 1;
                }
            }
            b']' if bytes.get(pos + 1) == Some(&b']') => {
                if let Some(frame) = frames.last_mut()
                    && frame.link_depth > 0
                {
                    frame.link_depth -= 1;
                }
                pos += 2;
            }
            b'|' => {
                if let Some(frame) = frames.last_mut()
                    && frame.splits_parameters()
                {
                    frame.separators.push(Separator { pipe: pos, equals: None });
                }
                pos += 1;
            }
            b'=' => {
                if let Some(frame) = frames.last_mut()
                    && frame.splits_parameters()
                    && let Some(separator) = frame.separators.last_mut()
                    && separator.equals.is_none()
                {
                    separator.equals = Some(pos);
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    let unclosed_templates = frames.iter().filter(|frame| frame.kind == FrameKind::Template).count();
    if unclosed_templates > 0 {
        log::debug!("Dropping {unclosed_templates} unclosed template(s)");
    }

    for (kind, pending) in open_tags {
        for tag in pending {
            elements.push(Element::Tag(Tag {
                kind,
                name: tag.name,
                form: TagForm::Open,
                begin: tag.begin,
                end: tag.end,
                open_end: tag.end,
                close_begin: None,
                parameters: tag.parameters,
            }));
        }
    }

    elements
}

/// `<!-- ... -->`; an unterminated comment runs to the end of the text
fn parse_comment(content: &str, begin: usize) -> Comment {
    let body_start = begin + 4;
    match content[body_start..].find("-->") {
        Some(offset) => Comment {
            begin,
            end: body_start + offset + 3,
            complete: true,
        },
        None => Comment {
            begin,
            end: content.len(),
            complete: false,
        },
    }
}

fn parse_tag_token(content: &str, begin: usize) -> Option<TagToken<'_>> {
    let rest = &content[begin + 1..];
    let closing = rest.starts_with('/');
    let name_start = begin + 1 + usize::from(closing);
    let name_len = content[name_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let name_end = name_start + name_len;
    let name = &content[name_start..name_end];
    let kind = TagKind::from_name(name)?;

    let after_name = &content[name_end..];
    if !after_name.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
        return None;
    }

    let gt = after_name.find('>')?;
    if after_name[..gt].contains('<') {
        return None;
    }
    let inner = after_name[..gt].trim();
    let self_closing = !closing && inner.ends_with('/');
    let attributes = if self_closing {
        inner[..inner.len() - 1].trim_end()
    } else {
        inner
    };

    Some(TagToken {
        kind,
        name,
        begin,
        end: name_end + gt + 1,
        closing,
        self_closing: self_closing || kind.is_void(),
        attributes,
    })
}

fn parse_tag_parameters(attributes: &str) -> Vec<TagParameter> {
    TAG_PARAMETER
        .captures_iter(attributes)
        .map(|cap| TagParameter {
            name: cap[1].to_string(),
            value: cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or_else(String::new, |m| m.as_str().to_string()),
        })
        .collect()
}

/// Pair closing tags with the most recent unmatched opening tag of the same kind
fn record_tag(token: TagToken<'_>, open_tags: &mut HashMap<TagKind, Vec<PendingTag>>, elements: &mut Vec<Element>) {
    if token.closing {
        let tag = match open_tags.get_mut(&token.kind).and_then(Vec::pop) {
            Some(open) => Tag {
                kind: token.kind,
                name: open.name,
                form: TagForm::Paired,
                begin: open.begin,
                end: token.end,
                open_end: open.end,
                close_begin: Some(token.begin),
                parameters: open.parameters,
            },
            None => Tag {
                kind: token.kind,
                name: token.name.to_string(),
                form: TagForm::Close,
                begin: token.begin,
                end: token.end,
                open_end: token.end,
                close_begin: None,
                parameters: Vec::new(),
            },
        };
        elements.push(Element::Tag(tag));
    } else if token.self_closing {
        elements.push(Element::Tag(Tag {
            kind: token.kind,
            name: token.name.to_string(),
            form: TagForm::SelfClosing,
            begin: token.begin,
            end: token.end,
            open_end: token.end,
            close_begin: None,
            parameters: parse_tag_parameters(token.attributes),
        }));
    } else {
        open_tags.entry(token.kind).or_default().push(PendingTag {
            name: token.name.to_string(),
            begin: token.begin,
            end: token.end,
            parameters: parse_tag_parameters(token.attributes),
        });
    }
}

/// `[url text]` on a single line, where url starts with a known scheme
fn parse_external_link(content: &str, begin: usize) -> Option<ExternalLink> {
    let rest = &content[begin + 1..];
    let scheme = URL_SCHEMES
        .iter()
        .find(|scheme| rest.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme)))?;

    let line_end = rest.find('\n').unwrap_or(rest.len());
    let close = rest[..line_end].find(']')?;
    let inner = &rest[..close];
    let url_len = inner
        .find(|c: char| c.is_whitespace() || c == '<' || c == '"')
        .unwrap_or(inner.len());
    if url_len <= scheme.len() {
        return None;
    }

    let text = inner[url_len..].trim();
    Some(ExternalLink {
        begin,
        end: begin + 1 + close + 1,
        url: inner[..url_len].to_string(),
        text: (!text.is_empty()).then(|| text.to_string()),
    })
}
