mod path;
mod selector;

pub use path::XpathQuery;
pub use selector::SelectorQuery;

use crate::error::ParseError;
use indexmap::IndexMap;

/// Hard cap on the serialized markup kept per matched element, in
/// characters. Bounds record size for arbitrarily large source elements.
pub const HTML_SNIPPET_CAP: usize = 1000;

/// One matched element, detached from the parsed tree.
#[derive(Debug, Clone)]
pub struct ElementMatch {
    /// Tag name, lower-cased.
    pub tag: String,
    /// Serialized markup of the element, capped at [`HTML_SNIPPET_CAP`].
    pub html: String,
    /// Concatenation of all descendant text, trimmed.
    pub text: String,
    pub attrs: IndexMap<String, String>,
}

impl ElementMatch {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// A query result. XPath expressions can select attribute values, text
/// nodes, or scalars directly; those come back as `Text` rather than as
/// elements and are handled separately downstream.
#[derive(Debug, Clone)]
pub enum MatchedNode {
    Element(ElementMatch),
    Text(String),
}

/// A query mechanism: markup text plus a query string in, matched nodes out
/// in document order.
pub trait QueryStrategy {
    fn matches(&self, markup: &str, query: &str) -> Result<Vec<MatchedNode>, ParseError>;
}

/// Truncates to at most `limit` characters, never splitting a char.
pub(crate) fn cap_snippet(mut snippet: String, limit: usize) -> String {
    if let Some((idx, _)) = snippet.char_indices().nth(limit) {
        snippet.truncate(idx);
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_snippets_pass_through() {
        assert_eq!(cap_snippet("abc".to_string(), 5), "abc");
        assert_eq!(cap_snippet("abcde".to_string(), 5), "abcde");
    }

    #[test]
    fn long_snippets_are_cut_at_char_boundary() {
        assert_eq!(cap_snippet("abcdef".to_string(), 5), "abcde");
        // Multibyte chars count as one character each.
        assert_eq!(cap_snippet("éééééé".to_string(), 3), "ééé");
    }

    #[test]
    fn attribute_lookup_by_name() {
        let el = ElementMatch {
            tag: "a".into(),
            html: "<a href=\"/x\">x</a>".into(),
            text: "x".into(),
            attrs: [("href".to_string(), "/x".to_string())].into_iter().collect(),
        };
        assert_eq!(el.attr("href"), Some("/x"));
        assert_eq!(el.attr("src"), None);
    }
}
