use serde_json::Value;
use std::fmt;

use crate::config::InjectorConfig;
use crate::converter::{convert_nodes, KeyCounter};
use crate::dom::{Html5everParser, MarkupParser};
use crate::error::HtmlResult;
use crate::node::{Element, OutputNode, Props};
use crate::sanitizer::{AmmoniaSanitizer, Sanitizer};

/// The sanitize → parse → convert pipeline.
///
/// Holds no per-call state: every conversion creates its own key counter, so
/// one injector can be shared and reused freely and identical input always
/// yields an identical tree.
pub struct HtmlInjector {
    config: InjectorConfig,
    sanitizer: Box<dyn Sanitizer + Send + Sync>,
    parser: Box<dyn MarkupParser + Send + Sync>,
}

impl HtmlInjector {
    /// Build an injector with the ammonia sanitizer and html5ever parser
    pub fn new(config: InjectorConfig) -> HtmlResult<Self> {
        config.validate()?;
        let sanitizer = AmmoniaSanitizer::new(&config);
        Ok(Self {
            config,
            sanitizer: Box::new(sanitizer),
            parser: Box::new(Html5everParser),
        })
    }

    /// Build an injector around custom collaborators
    pub fn with_collaborators(
        config: InjectorConfig,
        sanitizer: impl Sanitizer + Send + Sync + 'static,
        parser: impl MarkupParser + Send + Sync + 'static,
    ) -> HtmlResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sanitizer: Box::new(sanitizer),
            parser: Box::new(parser),
        })
    }

    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Convert untrusted markup into a sanitized tree wrapped in one
    /// container element.
    ///
    /// Returns `None` ("no content") when the input is empty, does not start
    /// with `<` once leading whitespace is ignored, or sanitizes to nothing.
    pub fn convert(&self, input: &str) -> Option<OutputNode> {
        let Some(normalized) = normalize(input) else {
            tracing::trace!(len = input.len(), "input is not markup");
            return None;
        };

        let sanitized = self.sanitizer.sanitize(&normalized);
        if sanitized.is_empty() {
            tracing::debug!(len = normalized.len(), "markup sanitized to nothing");
            return None;
        }

        let parsed = self.parser.parse(&sanitized);

        let mut counter = KeyCounter::new();
        let mut children = convert_nodes(&parsed, &mut counter);
        if self.config.trailing_space {
            children.push(OutputNode::Text(" ".to_string()));
        }

        tracing::debug!(
            input_len = input.len(),
            sanitized_len = sanitized.len(),
            top_level = parsed.len(),
            elements = counter.issued(),
            "converted markup"
        );

        Some(OutputNode::Element(Element {
            tag: self.config.container_tag.clone(),
            key: counter.next_key(),
            props: Props::new(),
            children,
        }))
    }

    /// Convert an untyped value; anything but a JSON string is "no content".
    pub fn convert_value(&self, input: &Value) -> Option<OutputNode> {
        match input {
            Value::String(s) => self.convert(s),
            other => {
                tracing::trace!(kind = value_kind(other), "input is not a string");
                None
            }
        }
    }
}

impl Default for HtmlInjector {
    fn default() -> Self {
        let config = InjectorConfig::default();
        Self {
            sanitizer: Box::new(AmmoniaSanitizer::new(&config)),
            parser: Box::new(Html5everParser),
            config,
        }
    }
}

impl fmt::Debug for HtmlInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlInjector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Collapse whitespace runs to single spaces and trim. `None` when the input
/// does not look like markup.
fn normalize(input: &str) -> Option<String> {
    if !input.trim_start().starts_with('<') {
        return None;
    }
    Some(input.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ParsedNode;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct Passthrough;

    impl Sanitizer for Passthrough {
        fn sanitize(&self, markup: &str) -> String {
            markup.to_string()
        }
    }

    struct Erase;

    impl Sanitizer for Erase {
        fn sanitize(&self, _markup: &str) -> String {
            String::new()
        }
    }

    /// Records what it was asked to parse and returns a fixed tree.
    struct Fixed(Arc<Mutex<Vec<String>>>);

    impl MarkupParser for Fixed {
        fn parse(&self, markup: &str) -> Vec<ParsedNode> {
            self.0.lock().unwrap().push(markup.to_string());
            vec![ParsedNode::element("p", &[("onclick", "x()")], vec![])]
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("\t\n  "), None);
        assert_eq!(normalize("hello <b>x</b>"), None);
        assert_eq!(
            normalize("  <p>a\r\n   b</p>\n\t<i>c</i>  "),
            Some("<p>a b</p> <i>c</i>".to_string())
        );
    }

    #[test]
    fn test_non_string_values_have_no_content() {
        let injector = HtmlInjector::default();
        for value in [json!(null), json!(42), json!(true), json!(["<p>x</p>"]), json!({"html": "<p>x</p>"})] {
            assert!(injector.convert_value(&value).is_none(), "{:?}", value);
        }
        assert!(injector.convert_value(&json!("<p>x</p>")).is_some());
    }

    #[test]
    fn test_empty_sanitized_output_has_no_content() {
        let injector =
            HtmlInjector::with_collaborators(InjectorConfig::default(), Erase, Html5everParser).unwrap();
        assert!(injector.convert("<p>x</p>").is_none());
    }

    #[test]
    fn test_parser_receives_normalized_markup_and_handlers_still_dropped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let injector = HtmlInjector::with_collaborators(
            InjectorConfig::default(),
            Passthrough,
            Fixed(Arc::clone(&seen)),
        )
        .unwrap();

        let out = injector.convert("<p onclick=\"x()\">\n  a  </p>").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["<p onclick=\"x()\"> a </p>".to_string()]);
        let p = out.find("p").unwrap();
        assert!(p.props.is_empty());
    }

    #[test]
    fn test_container_key_follows_content() {
        let out = HtmlInjector::default().convert("<p><b>x</b></p><i>y</i>").unwrap();
        assert_eq!(out.keys(), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_trailing_space() {
        let config = InjectorConfig {
            trailing_space: true,
            ..InjectorConfig::default()
        };
        let out = HtmlInjector::new(config).unwrap().convert("<p>x</p>").unwrap();
        let container = out.as_element().unwrap();
        assert_eq!(container.children.last(), Some(&OutputNode::Text(" ".to_string())));
        assert_eq!(container.children.len(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = InjectorConfig {
            container_tag: String::new(),
            ..InjectorConfig::default()
        };
        assert!(HtmlInjector::new(config).is_err());
    }

    #[test]
    fn test_injector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HtmlInjector>();
    }
}
