//! Navigable XML tree built from one fragment
//!
//! The extractor only ever reads, so the tree is a plain owned structure with
//! no parent pointers. Queries that need the parent tag (citation exclusion,
//! the relationship a `document-id` belongs to) use [`XmlElement::descendants_with_parent`].

use crate::error::ExtractError;
use crate::pattern::TagPattern;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Name of the synthetic element wrapping a parsed fragment
pub const DOCUMENT_NODE: &str = "#document";

/// A node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Character data, entity-decoded
    Text(String),
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Child nodes in source order
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct element children
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// All descendants paired with their parent, depth-first in document order
    pub fn descendants_with_parent(&self) -> Descendants<'_> {
        let mut stack = Vec::new();
        push_children(&mut stack, self);
        Descendants { stack }
    }

    /// All descendants, depth-first in document order
    pub fn descendants(&self) -> impl Iterator<Item = &XmlElement> {
        self.descendants_with_parent().map(|(_, element)| element)
    }

    /// First descendant whose tag matches
    pub fn find(&self, pattern: &TagPattern) -> Option<&XmlElement> {
        self.descendants().find(|e| pattern.matches(&e.name))
    }

    /// Every descendant whose tag matches
    pub fn find_all(&self, pattern: &TagPattern) -> Vec<&XmlElement> {
        self.descendants()
            .filter(|e| pattern.matches(&e.name))
            .collect()
    }

    /// Concatenated text of every descendant text node
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Text of the first descendant with exactly this tag
    pub fn text_of(&self, tag: &str) -> Option<String> {
        self.descendants().find(|e| e.name == tag).map(XmlElement::text)
    }
}

/// Depth-first iterator over `(parent, element)` pairs
pub struct Descendants<'a> {
    stack: Vec<(&'a XmlElement, &'a XmlElement)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (&'a XmlElement, &'a XmlElement);

    fn next(&mut self) -> Option<Self::Item> {
        let (parent, element) = self.stack.pop()?;
        push_children(&mut self.stack, element);
        Some((parent, element))
    }
}

fn push_children<'a>(stack: &mut Vec<(&'a XmlElement, &'a XmlElement)>, parent: &'a XmlElement) {
    // Reversed so the first child pops first
    for child in parent.elements().collect::<Vec<_>>().into_iter().rev() {
        stack.push((parent, child));
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(child) => collect_text(child, out),
        }
    }
}

/// Parse one fragment into a tree rooted at a synthetic [`DOCUMENT_NODE`]
///
/// The XML declaration, DOCTYPE, comments and processing instructions are
/// dropped. Text is kept verbatim (whitespace included) after entity decoding.
/// Elements still open at end of input are closed implicitly.
pub fn parse_fragment(xml: &str) -> Result<XmlElement, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<XmlElement> = vec![XmlElement::new(DOCUMENT_NODE)];

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(ExtractError::Xml(format!(
                        "unbalanced end tag at position {}",
                        reader.buffer_position()
                    )));
                }
                close_top(&mut stack);
            }
            Event::Text(text) => push_text(&mut stack, decode_entities(&text)),
            Event::CData(data) => {
                push_text(&mut stack, String::from_utf8_lossy(&data).into_owned());
            }
            Event::Empty(start) => {
                // Unreachable with expand_empty_elements, kept for completeness
                let element = open_element(&start)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Element(element));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    stack.pop().ok_or_else(|| ExtractError::Xml("empty element stack".to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement, ExtractError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        element.attributes.push((key, decode_attribute(&attr.value)));
    }
    Ok(element)
}

fn close_top(stack: &mut Vec<XmlElement>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(XmlNode::Element(done));
        }
    }
}

fn push_text(stack: &mut [XmlElement], text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        top.children.push(XmlNode::Text(text));
    }
}

/// Decode character and named references in raw text
///
/// Each reference is resolved on its own against the full HTML5 table, so one
/// unknown name stays literal without blocking the rest of the node.
pub fn decode_entities(raw: &[u8]) -> String {
    htmlize::unescape(String::from_utf8_lossy(raw)).into_owned()
}

fn decode_attribute(raw: &[u8]) -> String {
    htmlize::unescape_attribute(String::from_utf8_lossy(raw)).into_owned()
}
