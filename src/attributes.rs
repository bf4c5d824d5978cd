use regex::Regex;
use std::sync::OnceLock;

use crate::node::PropValue;
use crate::style::parse_style;

/// True for attribute names that bind a live event callback (`on` followed
/// by a lowercase letter, e.g. `onclick`).
pub fn is_handler_attribute(name: &str) -> bool {
    static HANDLER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HANDLER_REGEX.get_or_init(|| Regex::new(r"^on[a-z]").expect("handler pattern is valid"));
    re.is_match(name)
}

/// Map one markup attribute to an output property.
///
/// - `class` becomes `className`
/// - `style` is parsed into a structured [`StyleMap`](crate::style::StyleMap)
/// - handler attributes are dropped
/// - anything else passes through unchanged
pub fn map_attribute(name: &str, value: &str) -> Option<(String, PropValue)> {
    match name {
        "class" => Some(("className".to_string(), PropValue::Text(value.to_string()))),
        "style" => Some(("style".to_string(), PropValue::Style(parse_style(value)))),
        _ if is_handler_attribute(name) => {
            tracing::trace!(attribute = name, "dropping event handler attribute");
            None
        }
        _ => Some((name.to_string(), PropValue::Text(value.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_becomes_class_name() {
        assert_eq!(
            map_attribute("class", "my-class another-class"),
            Some((
                "className".to_string(),
                PropValue::Text("my-class another-class".to_string())
            ))
        );
    }

    #[test]
    fn test_style_is_structured() {
        let (name, value) = map_attribute("style", "color: red; font-size: 16px").unwrap();
        assert_eq!(name, "style");
        let style = value.as_style().unwrap();
        assert_eq!(style.get("color").unwrap(), "red");
        assert_eq!(style.get("fontSize").unwrap(), "16px");
    }

    #[test]
    fn test_handlers_are_dropped() {
        assert!(map_attribute("onclick", "alert('XSS')").is_none());
        assert!(map_attribute("onmouseover", "console.log('hover')").is_none());
        assert!(map_attribute("onload", "").is_none());
    }

    #[test]
    fn test_handler_pattern() {
        assert!(is_handler_attribute("onerror"));
        assert!(!is_handler_attribute("on"));
        assert!(!is_handler_attribute("onClick"));
        assert!(!is_handler_attribute("data-onclick"));
        assert!(!is_handler_attribute("icon"));
    }

    #[test]
    fn test_other_attributes_pass_through() {
        assert_eq!(
            map_attribute("data-custom", "x"),
            Some(("data-custom".to_string(), PropValue::Text("x".to_string())))
        );
        assert_eq!(
            map_attribute("href", "/path"),
            Some(("href".to_string(), PropValue::Text("/path".to_string())))
        );
    }
}
