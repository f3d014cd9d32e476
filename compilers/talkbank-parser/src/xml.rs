//! A small owned element tree over quick-xml events.
//!
//! Element names are namespace-qualified as `{uri}local` (unqualified when
//! no namespace is in scope). Character data is kept the way the MOR tier
//! needs it: `text` is what precedes the first child, `tail` is what follows
//! the element's own end tag inside its parent.

use std::str::{self, FromStr};

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML error: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("document has no root element")]
    NoRoot,
    #[error("closing tag without a matching opening tag")]
    UnexpectedEnd,
    #[error("document ended inside <{0}>")]
    Unclosed(String),
    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] str::Utf8Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Attribute value by unqualified name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given (qualified) tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given (qualified) tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn children(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    /// True when the element has no child elements (text does not count).
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A loaded, read-only XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, XmlError> {
        Self::parse_str(str::from_utf8(bytes)?)
    }

    pub fn parse_str(xml: &str) -> Result<Self, XmlError> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(e) => {
                    let element = open_element(&ns, &e)?;
                    stack.push(element);
                }
                Event::Empty(e) => {
                    let element = open_element(&ns, &e)?;
                    close_element(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                    close_element(element, &mut stack, &mut root);
                }
                Event::Text(t) => append_text(&mut stack, &t.unescape()?),
                Event::CData(c) => append_text(&mut stack, str::from_utf8(&c.into_inner())?),
                Event::Eof => {
                    if let Some(open) = stack.last() {
                        return Err(XmlError::Unclosed(open.tag.clone()));
                    }
                    break;
                }
                // declarations, comments, processing instructions
                _ => {}
            }
        }

        root.map(|root| Document { root }).ok_or(XmlError::NoRoot)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl FromStr for Document {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

fn open_element(ns: &ResolveResult, start: &BytesStart) -> Result<Element, XmlError> {
    let local_name = start.local_name();
    let local = str::from_utf8(local_name.as_ref())?;
    let tag = match ns {
        ResolveResult::Bound(namespace) => {
            format!("{{{}}}{}", str::from_utf8(namespace.as_ref())?, local)
        }
        _ => local.to_string(),
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = attr.key.local_name();
        let name = str::from_utf8(key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((name, value));
    }

    Ok(Element {
        tag,
        attributes,
        ..Element::default()
    })
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            root.get_or_insert(element);
        }
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    // character data outside the root element is dropped
    let Some(parent) = stack.last_mut() else {
        return;
    };
    let slot = match parent.children.last_mut() {
        Some(child) => &mut child.tail,
        None => &mut parent.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}
