//! # NullTrace HTML Injector
//!
//! Turns untrusted HTML (remote pages, mission briefings, player-written
//! content) into a sanitized tree of typed nodes that a UI layer can render
//! without ever executing script or binding event handlers.
//!
//! ## Pipeline
//! 1. Reject input that is not markup (empty, whitespace only, not starting with `<`)
//! 2. Collapse whitespace runs and trim
//! 3. Sanitize with `ammonia`
//! 4. Parse with `html5ever` (standard HTML error recovery)
//! 5. Convert to [`OutputNode`]s: `class` → `className`, `style` → [`StyleMap`],
//!    `on*` handlers dropped, one key per element in document order
//! 6. Wrap everything in a single container element
//!
//! ## Example
//! ```
//! use nulltrace_html::convert;
//!
//! let html = r#"<p class="c" style="color: red; font-size: 16px;">Hello <strong>World</strong></p>"#;
//!
//! let root = convert(html).expect("markup has content");
//! let p = root.find("p").unwrap();
//! assert_eq!(p.class_name(), Some("c"));
//! assert_eq!(p.style().unwrap()["fontSize"], "16px");
//! assert_eq!(root.text_content(), "Hello World");
//!
//! assert!(convert("   \n\t").is_none());
//! ```

pub mod attributes;
pub mod config;
pub mod converter;
pub mod dom;
pub mod error;
pub mod injector;
pub mod node;
pub mod render;
pub mod sanitizer;
pub mod style;

use std::sync::OnceLock;

// --- Core types ---
pub use config::InjectorConfig;
pub use error::{HtmlError, HtmlResult};
pub use injector::HtmlInjector;
pub use node::{Element, OutputNode, PropValue, Props};
pub use style::StyleMap;

// --- Building blocks ---
pub use attributes::{is_handler_attribute, map_attribute};
pub use converter::{convert_node, convert_nodes, KeyCounter};
pub use dom::{Html5everParser, MarkupParser, ParsedNode};
pub use render::render_html;
pub use sanitizer::{AmmoniaSanitizer, Sanitizer};
pub use style::{parse_style, to_camel_case};

fn default_injector() -> &'static HtmlInjector {
    static DEFAULT: OnceLock<HtmlInjector> = OnceLock::new();
    DEFAULT.get_or_init(HtmlInjector::default)
}

/// Convert markup with the default configuration. `None` means "no content".
pub fn convert(input: &str) -> Option<OutputNode> {
    default_injector().convert(input)
}

/// Convert an untyped value with the default configuration; non-strings
/// have no content.
pub fn convert_value(input: &serde_json::Value) -> Option<OutputNode> {
    default_injector().convert_value(input)
}
