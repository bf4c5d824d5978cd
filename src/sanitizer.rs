use ammonia::Builder;

use crate::config::{InjectorConfig, CLEAN_CONTENT_TAGS};

/// Removes script-executing constructs from markup before it is parsed.
pub trait Sanitizer {
    fn sanitize(&self, markup: &str) -> String;
}

/// [`Sanitizer`] backed by ammonia's whitelist cleaner.
///
/// Starts from ammonia's default whitelist (which drops `<script>`/`<style>`
/// with their content, every `on*` attribute and `javascript:` URLs) and
/// widens it with the tags and attributes of an [`InjectorConfig`].
#[derive(Debug, Clone)]
pub struct AmmoniaSanitizer {
    extra_tags: Vec<String>,
    removed_tags: Vec<String>,
    generic_attributes: Vec<String>,
    attribute_prefixes: Vec<String>,
    strip_comments: bool,
}

impl AmmoniaSanitizer {
    pub fn new(config: &InjectorConfig) -> Self {
        // Entries ammonia would reject with a panic are filtered here as
        // well as in `InjectorConfig::validate`.
        Self {
            extra_tags: config
                .extra_tags
                .iter()
                .filter(|t| !CLEAN_CONTENT_TAGS.contains(&t.as_str()))
                .cloned()
                .collect(),
            removed_tags: config.removed_tags.clone(),
            generic_attributes: config
                .generic_attributes
                .iter()
                .filter(|a| a.as_str() != "rel")
                .cloned()
                .collect(),
            attribute_prefixes: config
                .attribute_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            strip_comments: config.strip_comments,
        }
    }

    /// Assemble the ammonia builder for one `sanitize` call.
    ///
    /// `Builder<'a>` holds `&'a str` whitelist entries, so a builder stored in
    /// this struct would borrow from its own fields. The entries are owned
    /// here and the builder borrows them for the duration of a call; its
    /// sets hold a few dozen short entries, small next to the parse and
    /// serialization work `clean` does.
    fn builder(&self) -> Builder<'_> {
        let mut builder = Builder::default();
        builder
            .add_tags(self.extra_tags.iter().map(String::as_str))
            .rm_tags(self.removed_tags.iter().map(String::as_str))
            .add_generic_attributes(self.generic_attributes.iter().map(String::as_str))
            .add_generic_attribute_prefixes(self.attribute_prefixes.iter().map(String::as_str))
            .strip_comments(self.strip_comments);
        builder
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new(&InjectorConfig::default())
    }
}

impl Sanitizer for AmmoniaSanitizer {
    fn sanitize(&self, markup: &str) -> String {
        self.builder().clean(markup).to_string()
    }
}
