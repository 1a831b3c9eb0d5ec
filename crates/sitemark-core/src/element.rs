//! HTML element tree produced by the converter.
//!
//! A tree is built bottom-up in one pass and never mutated afterwards.
//! Each node is either a [`Leaf`] holding text (optionally wrapped in a tag)
//! or a [`Container`] owning an ordered list of children. Structural
//! invariants are checked when the tree is validated or serialized:
//!
//! - a leaf must carry a non-empty value
//! - a container must carry a tag and at least one child
//!
//! Text and attribute values are written verbatim; no HTML escaping is
//! performed.

use crate::error::{Error, Result};

/// Attribute list rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set an attribute. Re-setting a name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append ` name="value"` for every attribute.
    fn write_to(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// A text-bearing node.
///
/// Without a tag the value is emitted as bare text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    pub tag: Option<String>,
    pub value: Option<String>,
    pub attributes: Attributes,
}

/// A tagged node owning an ordered list of children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub tag: Option<String>,
    pub children: Vec<Element>,
    pub attributes: Attributes,
}

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Leaf(Leaf),
    Container(Container),
}

impl Element {
    /// Leaf node with an optional tag.
    pub fn leaf(tag: Option<&str>, value: impl Into<String>) -> Self {
        Element::Leaf(Leaf {
            tag: tag.map(str::to_string),
            value: Some(value.into()),
            attributes: Attributes::new(),
        })
    }

    /// Untagged leaf, serialized as its bare value.
    pub fn text(value: impl Into<String>) -> Self {
        Element::leaf(None, value)
    }

    /// Tagged container node.
    pub fn container(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Element::Container(Container {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
        })
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes_mut().insert(name, value);
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Element::Leaf(leaf) => leaf.tag.as_deref(),
            Element::Container(container) => container.tag.as_deref(),
        }
    }

    /// The leaf value; `None` for containers.
    pub fn value(&self) -> Option<&str> {
        match self {
            Element::Leaf(leaf) => leaf.value.as_deref(),
            Element::Container(_) => None,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Leaf(_) => &[],
            Element::Container(container) => &container.children,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Element::Leaf(leaf) => &leaf.attributes,
            Element::Container(container) => &container.attributes,
        }
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Element::Leaf(leaf) => &mut leaf.attributes,
            Element::Container(container) => &mut container.attributes,
        }
    }

    /// Check the structural invariants of this node and its descendants.
    pub fn validate(&self) -> Result<()> {
        match self {
            Element::Leaf(leaf) => leaf.value_checked().map(|_| ()),
            Element::Container(container) => {
                container.tag_checked()?;
                container.children.iter().try_for_each(Element::validate)
            }
        }
    }

    /// Serialize this node and its descendants to HTML.
    pub fn to_markup(&self) -> Result<String> {
        let mut out = String::new();
        self.write_markup(&mut out)?;
        Ok(out)
    }

    /// Append the serialized HTML of this node to `out`.
    ///
    /// On error `out` may hold a partial serialization.
    pub fn write_markup(&self, out: &mut String) -> Result<()> {
        match self {
            Element::Leaf(leaf) => {
                let value = leaf.value_checked()?;
                match &leaf.tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(out, tag, &leaf.attributes);
                        out.push_str(value);
                        close_tag(out, tag);
                    }
                }
            }
            Element::Container(container) => {
                let tag = container.tag_checked()?;
                open_tag(out, tag, &container.attributes);
                for child in &container.children {
                    child.write_markup(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

impl Leaf {
    fn value_checked(&self) -> Result<&str> {
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::MissingValue {
                tag: self.tag.clone(),
            }),
        }
    }
}

impl Container {
    fn tag_checked(&self) -> Result<&str> {
        let tag = self.tag.as_deref().ok_or(Error::MissingTag)?;
        if self.children.is_empty() {
            return Err(Error::EmptyChildren {
                tag: tag.to_string(),
            });
        }
        Ok(tag)
    }
}

fn open_tag(out: &mut String, tag: &str, attributes: &Attributes) {
    out.push('<');
    out.push_str(tag);
    attributes.write_to(out);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
