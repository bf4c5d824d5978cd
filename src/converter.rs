use crate::attributes::map_attribute;
use crate::dom::{ParsedNode, MAX_DEPTH};
use crate::node::{Element, OutputNode, Props};

/// Source of element keys for one conversion.
///
/// Created fresh by every conversion and threaded by `&mut` through the
/// traversal, so keys follow document order and never carry over between
/// calls.
#[derive(Debug, Default)]
pub struct KeyCounter {
    next: usize,
}

impl KeyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the current value and advance
    pub fn next_key(&mut self) -> usize {
        let key = self.next;
        self.next += 1;
        key
    }

    /// Number of keys handed out so far
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// Convert a parsed node into an output node.
///
/// Elements take their key before their children are converted, so keys
/// increase in pre-order across the whole tree. Comments and other
/// non-content nodes yield `None`. Nesting is capped at [`MAX_DEPTH`] the
/// same way [`Html5everParser`](crate::dom::Html5everParser) caps it, so
/// trees from any [`MarkupParser`](crate::dom::MarkupParser) stay bounded.
pub fn convert_node(node: &ParsedNode, counter: &mut KeyCounter) -> Option<OutputNode> {
    convert_at(node, 1, counter)
}

/// Convert a sibling list, dropping nodes with no output counterpart.
pub fn convert_nodes(nodes: &[ParsedNode], counter: &mut KeyCounter) -> Vec<OutputNode> {
    convert_level(nodes, 1, counter)
}

fn convert_at(node: &ParsedNode, depth: usize, counter: &mut KeyCounter) -> Option<OutputNode> {
    let mut out = convert_shallow(node, counter)?;
    if let (OutputNode::Element(element), ParsedNode::Element { children, .. }) =
        (&mut out, node)
    {
        element.children = convert_level(children, depth + 1, counter);
    }
    Some(out)
}

fn convert_level(nodes: &[ParsedNode], depth: usize, counter: &mut KeyCounter) -> Vec<OutputNode> {
    if depth >= MAX_DEPTH {
        return flatten(nodes, counter);
    }

    nodes
        .iter()
        .filter_map(|node| convert_at(node, depth, counter))
        .collect()
}

/// `nodes` and all their descendants in pre-order, each without children.
fn flatten(nodes: &[ParsedNode], counter: &mut KeyCounter) -> Vec<OutputNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&ParsedNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        out.extend(convert_shallow(node, counter));
        if let ParsedNode::Element { children, .. } = node {
            stack.extend(children.iter().rev());
        }
    }

    out
}

/// Convert one node, leaving an element's children empty
fn convert_shallow(node: &ParsedNode, counter: &mut KeyCounter) -> Option<OutputNode> {
    match node {
        ParsedNode::Text(text) => Some(OutputNode::Text(text.clone())),
        ParsedNode::Element { tag, attributes, .. } => {
            let key = counter.next_key();

            let mut props = Props::new();
            for (name, value) in attributes {
                if let Some((prop, value)) = map_attribute(name, value) {
                    props.insert(prop, value);
                }
            }

            Some(OutputNode::Element(Element {
                tag: tag.to_lowercase(),
                key,
                props,
                children: Vec::new(),
            }))
        }
        ParsedNode::Other => None,
    }
}
