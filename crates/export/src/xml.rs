//! A minimal, owned XML element tree.
//!
//! The export is small enough (a few megabytes at most) that reading it into
//! memory once and walking owned elements is far simpler than driving the
//! entry parsers from a pull reader.

use std::borrow::Cow;

use exn::ResultExt;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use tracing::instrument;

use crate::consts::KNOWN_NAMESPACES;
use crate::error::{ErrorKind, Result};

/// A single XML element with its attributes, direct text and children.
///
/// Element and attribute names are stored without namespace prefixes when
/// the namespace is one of the known export namespaces (or unqualified).
/// Anything from a foreign namespace keeps a `{uri}local` name, so it can
/// never accidentally match a tag the entry parsers care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}
impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute with the given (local) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Direct children with the given (local) name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text of the element, or `None` when it is empty.
    pub fn text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|text| !text.is_empty())
    }
}

/// Parse an XML document into its root [`Element`].
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    // Stack of currently open elements; the root stays at the bottom.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    loop {
        let (namespace, event) = reader.read_resolved_event().or_raise(|| ErrorKind::MalformedXml)?;
        match event {
            Event::Start(start) => {
                let name = qualified_name(&namespace, &start);
                let mut element = Element::new(name);
                for attribute in start.attributes() {
                    let attribute = attribute.or_raise(|| ErrorKind::MalformedXml)?;
                    // Namespace declarations are resolved by the reader already.
                    if attribute.key.as_namespace_binding().is_some() {
                        continue;
                    }
                    let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
                    let value = attribute.unescape_value().or_raise(|| ErrorKind::MalformedXml)?;
                    element.attributes.push((key, value.into_owned()));
                }
                stack.push(element);
            },
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape().or_raise(|| ErrorKind::MalformedXml)?);
                }
            },
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            },
            Event::End(_) => {
                let Some(finished) = stack.pop() else {
                    exn::bail!(ErrorKind::MalformedXml);
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(finished),
                    None => root = Some(finished),
                }
            },
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the entry parsers need.
            _ => {},
        }
    }
    match (root, stack.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => exn::bail!(ErrorKind::MalformedXml),
    }
}

fn qualified_name(namespace: &ResolveResult<'_>, start: &BytesStart<'_>) -> String {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let uri: Option<Cow<'_, str>> = match namespace {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref())),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    };
    match uri {
        Some(uri) if !KNOWN_NAMESPACES.contains(&uri.as_ref()) => format!("{{{uri}}}{local}"),
        _ => local,
    }
}
