//! Markup parsing collaborator.
//!
//! The converter never touches a parser's own node types; it walks the
//! [`ParsedNode`] tree produced by a [`MarkupParser`]. The default parser is
//! html5ever, whose tree builder applies the standard HTML error recovery
//! (implicit closing, reparenting of misnested elements, ...).

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A node of a parsed markup tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedNode {
    Text(String),
    Element {
        tag: String,
        /// `(name, value)` pairs in source order
        attributes: Vec<(String, String)>,
        children: Vec<ParsedNode>,
    },
    /// Comments, doctypes and processing instructions
    Other,
}

impl ParsedNode {
    /// Convenience constructor for an element node
    pub fn element(tag: &str, attributes: &[(&str, &str)], children: Vec<ParsedNode>) -> Self {
        ParsedNode::Element {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        }
    }

    pub fn text(s: &str) -> Self {
        ParsedNode::Text(s.to_string())
    }
}

/// Turns a markup string into its top-level nodes. Must not fail: malformed
/// input is repaired, not rejected.
pub trait MarkupParser {
    fn parse(&self, markup: &str) -> Vec<ParsedNode>;
}

/// Deepest nesting level a parsed tree may reach. Top-level nodes sit at
/// level 1; anything nested below this level is moved up to become a
/// sibling at this level, in document order, as browsers do for deeply
/// nested markup.
pub const MAX_DEPTH: usize = 512;

/// [`MarkupParser`] backed by html5ever.
///
/// The input is parsed as a whole document and the children of `<body>` are
/// returned, so content the HTML rules hoist into `<head>` (`<title>`,
/// `<meta>`, ...) does not appear in the result. Nesting is capped at
/// [`MAX_DEPTH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5everParser;

impl MarkupParser for Html5everParser {
    fn parse(&self, markup: &str) -> Vec<ParsedNode> {
        let dom = parse_document(RcDom::default(), Default::default()).one(markup);

        if !dom.errors.is_empty() {
            tracing::trace!(errors = dom.errors.len(), "markup repaired by parser");
        }

        match find_body(&dom.document) {
            Some(body) => convert_children(&body, 1),
            None => Vec::new(),
        }
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = child_element(document, "html")?;
    child_element(&html, "body")
}

fn child_element(handle: &Handle, tag: &str) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, NodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}

/// Convert the children of `handle`, which sit at nesting level `depth`.
fn convert_children(handle: &Handle, depth: usize) -> Vec<ParsedNode> {
    if depth >= MAX_DEPTH {
        return flatten_descendants(handle);
    }

    handle
        .children
        .borrow()
        .iter()
        .map(|child| {
            let mut node = convert_shallow(child);
            if let ParsedNode::Element { children, .. } = &mut node {
                *children = convert_children(child, depth + 1);
            }
            node
        })
        .collect()
}

/// Every descendant of `handle` in document order, each without children.
fn flatten_descendants(handle: &Handle) -> Vec<ParsedNode> {
    let mut nodes = Vec::new();
    let mut stack: Vec<Handle> = handle.children.borrow().iter().rev().cloned().collect();

    while let Some(next) = stack.pop() {
        nodes.push(convert_shallow(&next));
        stack.extend(next.children.borrow().iter().rev().cloned());
    }

    if !nodes.is_empty() {
        tracing::trace!(nodes = nodes.len(), "flattened markup nested past max depth");
    }
    nodes
}

/// Convert a single node, leaving an element's children empty
fn convert_shallow(handle: &Handle) -> ParsedNode {
    match &handle.data {
        NodeData::Text { contents } => ParsedNode::Text(contents.borrow().to_string()),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let local = attr.name.local.to_string();
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, local),
                        None => local,
                    };
                    (name, attr.value.to_string())
                })
                .collect();

            ParsedNode::Element {
                tag: name.local.to_string(),
                attributes,
                children: Vec::new(),
            }
        }
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => ParsedNode::Other,
    }
}
