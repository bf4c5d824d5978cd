use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Inline style declarations keyed by camelCase property name, in
/// declaration order. A repeated property keeps its first position and takes
/// the last value.
pub type StyleMap = IndexMap<String, String>;

/// Parse an inline `style` attribute (`"key: value; key2: value2"`) into a
/// [`StyleMap`].
///
/// Never fails. Segments without a colon, with an empty property name or
/// with an empty value are skipped, and stray semicolons contribute nothing.
pub fn parse_style(s: &str) -> StyleMap {
    let mut style = StyleMap::new();

    for segment in s.split(';') {
        let Some((raw_key, raw_value)) = segment.split_once(':') else {
            if !segment.trim().is_empty() {
                tracing::trace!(segment, "dropping style segment without ':'");
            }
            continue;
        };

        let key = to_camel_case(raw_key.trim());
        let value = raw_value.trim();
        if key.is_empty() || value.is_empty() {
            tracing::trace!(segment, "dropping incomplete style declaration");
            continue;
        }

        style.insert(key, value.to_string());
    }

    style
}

/// Convert a kebab-case CSS property name to camelCase.
///
/// A hyphen followed by a lowercase ASCII letter is removed and the letter
/// uppercased, so `background-color` becomes `backgroundColor` and
/// `-webkit-transition` becomes `WebkitTransition`. Any other hyphen is kept
/// as written (`foo-1`, the leading `-` of `--brand-color`).
pub fn to_camel_case(name: &str) -> String {
    static HYPHEN_LETTER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HYPHEN_LETTER_REGEX.get_or_init(|| Regex::new(r"-([a-z])").expect("hyphen pattern is valid"));

    re.replace_all(name, |caps: &Captures| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// Convert a camelCase property name back to kebab-case.
///
/// Inverse of [`to_camel_case`] for the names it produces; used when a
/// [`StyleMap`] is rendered back into a `style` attribute.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
