use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::style::StyleMap;

/// Output properties of an element, in source attribute order.
pub type Props = IndexMap<String, PropValue>;

/// A node of the sanitized output tree handed to a renderer.
///
/// Serializes by shape: a text leaf is a plain JSON string, an element is an
/// object with `tag`, `key`, `props` and `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputNode {
    Text(String),
    Element(Element),
}

/// An element of the output tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercased tag name
    pub tag: String,
    /// Identifier unique across the tree built by one conversion
    pub key: usize,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutputNode>,
}

/// Value of an output property: plain text, or the structured `style` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Style(StyleMap),
}

impl PropValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            PropValue::Style(_) => None,
        }
    }

    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            PropValue::Style(style) => Some(style),
            PropValue::Text(_) => None,
        }
    }
}

impl OutputNode {
    /// Returns the element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            OutputNode::Element(el) => Some(el),
            OutputNode::Text(_) => None,
        }
    }

    /// Returns the literal text if this node is a text leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputNode::Text(t) => Some(t),
            OutputNode::Element(_) => None,
        }
    }

    /// Element key; text leaves carry none
    pub fn key(&self) -> Option<usize> {
        self.as_element().map(|el| el.key)
    }

    /// Concatenation of every text leaf below this node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            OutputNode::Text(t) => out.push_str(t),
            OutputNode::Element(el) => {
                for child in &el.children {
                    child.push_text(out);
                }
            }
        }
    }

    /// Keys of this node and all descendant elements in pre-order.
    pub fn keys(&self) -> Vec<usize> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<usize>) {
        if let OutputNode::Element(el) = self {
            keys.push(el.key);
            for child in &el.children {
                child.collect_keys(keys);
            }
        }
    }

    /// First element with the given tag in pre-order, this node included.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.tag == tag {
            return Some(el);
        }
        el.children.iter().find_map(|child| child.find(tag))
    }
}

impl Element {
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Text value of a property; `None` for `style` or a missing property
    pub fn text_prop(&self, name: &str) -> Option<&str> {
        self.prop(name).and_then(PropValue::as_text)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.text_prop("className")
    }

    pub fn style(&self) -> Option<&StyleMap> {
        self.prop("style").and_then(PropValue::as_style)
    }

    /// Child elements, skipping text leaves
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(OutputNode::as_element)
    }
}
