//! Tag stripping and entity decoding for feed text.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<]+?>").expect("tag pattern is valid"));

/// Removes HTML/XML tags, lazily matched so stray `<` characters in prose
/// don't swallow the rest of the text.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Decodes the four entities feeds actually emit, in fixed order:
/// `&nbsp;`, `&amp;`, `&lt;`, `&gt;`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
