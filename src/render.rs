//! HTML serialization of an output tree, for previews and debugging.

use crate::node::{Element, OutputNode, PropValue};
use crate::style::{to_kebab_case, StyleMap};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize an output tree back to markup.
///
/// `className` is written as `class` and a style map as kebab-case
/// declarations. Keys are not part of the markup.
pub fn render_html(node: &OutputNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &OutputNode, out: &mut String) {
    match node {
        OutputNode::Text(text) => escape_into(text, false, out),
        OutputNode::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    for (name, value) in &el.props {
        let name = if name == "className" { "class" } else { name.as_str() };
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        match value {
            PropValue::Text(text) => escape_into(text, true, out),
            PropValue::Style(style) => escape_into(&style_to_string(style), true, out),
        }
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }

    for child in &el.children {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Format a style map as a `style` attribute value
pub fn style_to_string(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{}: {};", to_kebab_case(k), v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Props;

    fn element(tag: &str, props: Props, children: Vec<OutputNode>) -> OutputNode {
        OutputNode::Element(Element {
            tag: tag.to_string(),
            key: 0,
            props,
            children,
        })
    }

    #[test]
    fn test_render_class_and_style() {
        let mut style = StyleMap::new();
        style.insert("color".to_string(), "red".to_string());
        style.insert("fontSize".to_string(), "16px".to_string());

        let mut props = Props::new();
        props.insert("className".to_string(), PropValue::Text("c".to_string()));
        props.insert("style".to_string(), PropValue::Style(style));

        let node = element("p", props, vec![OutputNode::Text("Hello".to_string())]);
        assert_eq!(
            render_html(&node),
            r#"<p class="c" style="color: red; font-size: 16px;">Hello</p>"#
        );
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let mut props = Props::new();
        props.insert("title".to_string(), PropValue::Text("a \"b\" <c>".to_string()));
        let node = element("span", props, vec![OutputNode::Text("1 < 2 & 3".to_string())]);
        assert_eq!(
            render_html(&node),
            r#"<span title="a &quot;b&quot; &lt;c&gt;">1 &lt; 2 &amp; 3</span>"#
        );
    }

    #[test]
    fn test_render_void_element() {
        let mut props = Props::new();
        props.insert("src".to_string(), PropValue::Text("a.png".to_string()));
        let node = element("img", props, vec![]);
        assert_eq!(render_html(&node), r#"<img src="a.png">"#);
    }
}
