use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{HtmlError, HtmlResult};

/// Tags the sanitizer always drops together with their content.
pub const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Injector settings: sanitizer policy and the shape of the wrapping container.
///
/// ```yaml
/// containerTag: section
/// trailingSpace: false
/// extraTags: [button, figure]
/// attributePrefixes: [data-]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InjectorConfig {
    /// Tag of the synthetic element wrapping the converted nodes
    pub container_tag: String,
    /// Append a single `" "` text leaf after the converted nodes
    pub trailing_space: bool,
    /// Tags added to the sanitizer whitelist
    pub extra_tags: Vec<String>,
    /// Tags removed from the sanitizer whitelist
    pub removed_tags: Vec<String>,
    /// Attributes the sanitizer keeps on every tag
    pub generic_attributes: Vec<String>,
    /// Attribute prefixes the sanitizer keeps on every tag
    pub attribute_prefixes: Vec<String>,
    pub strip_comments: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            trailing_space: false,
            extra_tags: to_strings(&["button", "label", "main", "section"]),
            removed_tags: Vec::new(),
            generic_attributes: to_strings(&[
                "class", "style", "id", "title", "lang", "dir", "role",
            ]),
            attribute_prefixes: to_strings(&["data-", "aria-"]),
            strip_comments: true,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl InjectorConfig {
    /// Parse a YAML config and validate it
    pub fn from_yaml(yaml: &str) -> HtmlResult<Self> {
        let config: InjectorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> HtmlResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| HtmlError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> HtmlResult<()> {
        static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = TAG_REGEX.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("tag pattern is valid"));

        if !re.is_match(&self.container_tag) {
            return Err(HtmlError::ConfigError(format!(
                "container tag '{}' must be a lowercase tag name",
                self.container_tag
            )));
        }

        if let Some(tag) = self
            .extra_tags
            .iter()
            .find(|t| CLEAN_CONTENT_TAGS.contains(&t.as_str()))
        {
            return Err(HtmlError::ConfigError(format!(
                "tag '{}' is always removed with its content and cannot be whitelisted",
                tag
            )));
        }

        // The sanitizer manages `rel` itself on links.
        if self.generic_attributes.iter().any(|a| a == "rel") {
            return Err(HtmlError::ConfigError(
                "'rel' cannot be a generic attribute".to_string(),
            ));
        }

        if self.attribute_prefixes.iter().any(|p| p.is_empty()) {
            return Err(HtmlError::ConfigError(
                "attribute prefixes must be non-empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = InjectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.container_tag, "div");
        assert!(!config.trailing_space);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = InjectorConfig::from_yaml("containerTag: section\ntrailingSpace: true\n").unwrap();
        assert_eq!(config.container_tag, "section");
        assert!(config.trailing_space);
        assert_eq!(config.generic_attributes, InjectorConfig::default().generic_attributes);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_field() {
        let result = InjectorConfig::from_yaml("containerTags: div\n");
        assert!(matches!(result, Err(HtmlError::YamlError(_))));
    }

    #[test]
    fn test_invalid_container_tag() {
        let result = InjectorConfig::from_yaml("containerTag: \"Div Box\"\n");
        assert!(matches!(result, Err(HtmlError::ConfigError(_))));

        let result = InjectorConfig::from_yaml("containerTag: \"\"\n");
        assert!(matches!(result, Err(HtmlError::ConfigError(_))));
    }

    #[test]
    fn test_script_cannot_be_whitelisted() {
        let result = InjectorConfig::from_yaml("extraTags: [script]\n");
        assert!(matches!(result, Err(HtmlError::ConfigError(_))));
    }

    #[test]
    fn test_rel_cannot_be_generic() {
        let result = InjectorConfig::from_yaml("genericAttributes: [class, rel]\n");
        assert!(matches!(result, Err(HtmlError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = InjectorConfig::from_yaml_file("/nonexistent/injector.yaml");
        assert!(matches!(result, Err(HtmlError::IoError { .. })));
    }
}
