//! Read-only HTML document tree.
//!
//! Wraps a `tl` parse of a full page with the navigation the category
//! extractor needs and `tl` lacks: parent links, element siblings, ancestors
//! and document-order traversal. Text and attribute values come back with
//! entity references decoded.
//!
//! Every element also knows where its start tag sits in the source, which
//! lets the link rewriter patch single attributes without re-serializing.

use crate::core::BuildError;
use std::borrow::Cow;
use std::ops::Range;
use tl::{HTMLTag, Node, NodeHandle, Parser, VDom};

// =============================================================================
// Document
// =============================================================================

/// A parsed HTML page with a parent index.
pub struct HtmlDocument<'a> {
    source: &'a str,
    dom: VDom<'a>,
    /// Parent tag of each node, indexed by `NodeHandle::get_inner()`.
    parents: Vec<Option<NodeHandle>>,
    /// All tag nodes in document (pre-)order.
    order: Vec<NodeHandle>,
}

impl<'a> HtmlDocument<'a> {
    /// Parse a complete HTML document.
    pub fn parse(source: &'a str) -> Result<Self, BuildError> {
        let dom = tl::parse(source, tl::ParserOptions::default())
            .map_err(|e| BuildError::Html(format!("{e:?}")))?;

        let mut doc = Self {
            source,
            dom,
            parents: Vec::new(),
            order: Vec::new(),
        };
        doc.index();
        Ok(doc)
    }

    /// Fill `parents` and `order` with one depth-first walk.
    fn index(&mut self) {
        let parser = self.dom.parser();
        let mut parents = Vec::new();
        let mut order = Vec::new();

        // Reversed so that popping yields document order
        let mut stack: Vec<(NodeHandle, Option<NodeHandle>)> =
            self.dom.children().iter().rev().map(|h| (*h, None)).collect();

        while let Some((handle, parent)) = stack.pop() {
            let idx = handle.get_inner() as usize;
            if idx >= parents.len() {
                parents.resize(idx + 1, None);
            }
            parents[idx] = parent;

            if let Some(Node::Tag(tag)) = handle.get(parser) {
                order.push(handle);
                for child in child_handles(tag).into_iter().rev() {
                    stack.push((child, Some(handle)));
                }
            }
        }

        self.parents = parents;
        self.order = order;
    }

    fn parser(&self) -> &Parser<'a> {
        self.dom.parser()
    }

    fn element(&self, handle: NodeHandle) -> Option<Element<'_, 'a>> {
        match handle.get(self.parser())? {
            Node::Tag(tag) => Some(Element {
                doc: self,
                handle,
                tag,
            }),
            _ => None,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_, 'a>> {
        self.order.iter().filter_map(|h| self.element(*h))
    }

    /// First element in document order whose `id` equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<Element<'_, 'a>> {
        self.elements()
            .find(|el| el.attr("id").is_some_and(|v| v == id))
    }
}

// =============================================================================
// Element
// =============================================================================

/// Borrowed view of one tag in an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct Element<'d, 'a> {
    doc: &'d HtmlDocument<'a>,
    handle: NodeHandle,
    tag: &'d HTMLTag<'a>,
}

impl PartialEq for Element<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.handle.get_inner() == other.handle.get_inner()
    }
}

impl<'d, 'a> Element<'d, 'a> {
    /// Lowercased tag name.
    pub fn name(&self) -> String {
        self.tag.name().as_utf8_str().to_ascii_lowercase()
    }

    /// Case-insensitive tag name check.
    pub fn is(&self, name: &str) -> bool {
        self.tag.name().as_utf8_str().eq_ignore_ascii_case(name)
    }

    /// Decoded attribute value. Valueless attributes yield `""`.
    pub fn attr(&self, key: &str) -> Option<String> {
        self.tag
            .attributes()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.map(|v| unescape(&v).into_owned()).unwrap_or_default())
    }

    /// `1..=6` for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let name = self.name();
        let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    pub fn parent(&self) -> Option<Element<'d, 'a>> {
        let parent = *self.doc.parents.get(self.handle.get_inner() as usize)?;
        parent.and_then(|h| self.doc.element(h))
    }

    /// Parent, grandparent, ... up to the document root.
    pub fn ancestors(&self) -> impl Iterator<Item = Element<'d, 'a>> {
        std::iter::successors(self.parent(), Element::parent)
    }

    /// Handles of the nodes sharing this element's parent (including itself).
    fn sibling_handles(&self) -> Vec<NodeHandle> {
        match self.parent() {
            Some(parent) => child_handles(parent.tag),
            None => self.doc.dom.children().to_vec(),
        }
    }

    /// Element siblings after this one, in document order.
    pub fn following_siblings(&self) -> impl Iterator<Item = Element<'d, 'a>> {
        let doc = self.doc;
        let siblings = self.sibling_handles();
        let start = siblings
            .iter()
            .position(|h| h.get_inner() == self.handle.get_inner())
            .map_or(siblings.len(), |i| i + 1);
        siblings
            .into_iter()
            .skip(start)
            .filter_map(move |h| doc.element(h))
    }

    /// The element immediately after this one, skipping text and comments.
    pub fn next_element_sibling(&self) -> Option<Element<'d, 'a>> {
        self.following_siblings().next()
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = Element<'d, 'a>> {
        let doc = self.doc;
        child_handles(self.tag)
            .into_iter()
            .filter_map(move |h| doc.element(h))
    }

    /// All descendant elements in document order.
    pub fn descendants(&self) -> Vec<Element<'d, 'a>> {
        let mut found = Vec::new();
        let mut stack: Vec<Element<'d, 'a>> = self.children().collect();
        stack.reverse();
        while let Some(el) = stack.pop() {
            let len = stack.len();
            stack.extend(el.children());
            stack[len..].reverse();
            found.push(el);
        }
        found
    }

    /// Descendant elements with the given tag name.
    pub fn find(&self, name: &str) -> Vec<Element<'d, 'a>> {
        self.descendants().into_iter().filter(|el| el.is(name)).collect()
    }

    /// Concatenated, entity-decoded text of all descendant text nodes.
    pub fn text(&self) -> String {
        let parser = self.doc.parser();
        let mut text = String::new();
        let mut stack = child_handles(self.tag);
        stack.reverse();

        while let Some(handle) = stack.pop() {
            match handle.get(parser) {
                Some(Node::Raw(bytes)) => text.push_str(&unescape(&bytes.as_utf8_str())),
                Some(Node::Tag(tag)) => stack.extend(child_handles(tag).into_iter().rev()),
                _ => {}
            }
        }

        text
    }

    /// Byte range of this element's start tag (`<a ...>`) in the source.
    pub fn start_tag_span(&self) -> Option<Range<usize>> {
        let source = self.doc.source;
        let raw = self.tag.raw().as_bytes();
        let mut start = (raw.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
        if start >= source.len() || !source.is_char_boundary(start) {
            return None;
        }
        if !source[start..].starts_with('<') {
            // Some `tl` versions slice the raw tag just past its `<`
            start = start.checked_sub(1).filter(|&s| source[s..].starts_with('<'))?;
        }
        let len = start_tag_len(&source[start..])?;
        Some(start..start + len)
    }

    /// Whether this element matches a simple selector: `tag`, `#id` or `*`.
    pub fn matches(&self, selector: &str) -> bool {
        match selector {
            "*" => true,
            s if s.starts_with('#') => self.attr("id").is_some_and(|id| id == s[1..]),
            s => self.is(s),
        }
    }

    /// Whether this element matches a descendant-combinator selector such as
    /// `body #content ul li a`.
    pub fn matches_path(&self, selector: &str) -> bool {
        let mut parts = selector.split_whitespace().rev();
        match parts.next() {
            Some(last) if self.matches(last) => {}
            _ => return false,
        }

        // Greedy nearest-ancestor matching is exact for descendant-only paths
        let mut ancestors = self.ancestors();
        parts.all(|part| ancestors.any(|el| el.matches(part)))
    }
}

/// Direct child handles of a tag, including text and comment nodes.
fn child_handles(tag: &HTMLTag<'_>) -> Vec<NodeHandle> {
    tag.children().top().iter().copied().collect()
}

/// Length of the start tag at the beginning of `s`, honoring quoted
/// attribute values that may contain `>`.
fn start_tag_len(s: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in s.bytes().enumerate() {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Byte range of the value of attribute `name` inside a start tag, excluding
/// quotes. Returns `None` when the attribute is absent or has no value.
pub fn attr_value_span(start_tag: &str, name: &str) -> Option<Range<usize>> {
    let bytes = start_tag.as_bytes();
    // Skip `<` and the tag name
    let mut i = 1;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
        i += 1;
    }

    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' {
            return None;
        }

        let key_start = i;
        while i < bytes.len() && !matches!(bytes[i], b'=' | b'>' | b'/') && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key = &start_tag[key_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            // Valueless attribute
            if key.eq_ignore_ascii_case(name) {
                return None;
            }
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&q @ (b'"' | b'\'')) => {
                let start = i + 1;
                let end = start + start_tag[start..].find(q as char)?;
                i = end + 1;
                start..end
            }
            Some(_) => {
                let start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                start..i
            }
            None => return None,
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode character references. Unknown or malformed references are kept
/// verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 12)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end + 1)));

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
