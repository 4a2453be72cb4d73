use super::{cap_snippet, ElementMatch, MatchedNode, QueryStrategy, HTML_SNIPPET_CAP};
use crate::error::ParseError;
use crate::log_debug;
use scraper::{ElementRef, Html, Selector};

/// CSS selector query strategy.
///
/// html5ever recovers from any markup, so this strategy never fails on the
/// document side. A selector that does not parse matches nothing; selector
/// engines are silently tolerant of bad input and the tool keeps that
/// behavior.
pub struct SelectorQuery;

impl QueryStrategy for SelectorQuery {
    fn matches(&self, markup: &str, query: &str) -> Result<Vec<MatchedNode>, ParseError> {
        let document = Html::parse_document(markup);
        let selector = match Selector::parse(query) {
            Ok(selector) => selector,
            Err(e) => {
                log_debug!("[query] Unparseable selector {:?}: {}", query, e);
                return Ok(Vec::new());
            }
        };

        Ok(document
            .select(&selector)
            .map(|el| MatchedNode::Element(element_match(el)))
            .collect())
    }
}

fn element_match(el: ElementRef<'_>) -> ElementMatch {
    ElementMatch {
        tag: el.value().name().to_string(),
        html: cap_snippet(el.html(), HTML_SNIPPET_CAP),
        text: el.text().collect::<String>().trim().to_string(),
        attrs: el
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <ul>
            <li><a class="nav" href="/one">One</a></li>
            <li><a class="nav" href="/two">Two</a></li>
            <li><a class="other" href="/three">Three</a></li>
        </ul>
        <div id="blurb">Some <b>bold</b> words</div>
    </body></html>"#;

    fn elements(query: &str) -> Vec<ElementMatch> {
        SelectorQuery
            .matches(PAGE, query)
            .unwrap()
            .into_iter()
            .map(|node| match node {
                MatchedNode::Element(el) => el,
                MatchedNode::Text(s) => panic!("unexpected text match: {}", s),
            })
            .collect()
    }

    #[test]
    fn matches_in_document_order() {
        let els = elements("a.nav");
        assert_eq!(els.len(), 2);
        assert_eq!(els[0].attr("href"), Some("/one"));
        assert_eq!(els[1].attr("href"), Some("/two"));
    }

    #[test]
    fn flattens_descendant_text() {
        let els = elements("#blurb");
        assert_eq!(els[0].text, "Some bold words");
    }

    #[test]
    fn tag_names_are_lowercase() {
        let nodes = SelectorQuery
            .matches("<DIV ID='x'>hi</DIV>", "div")
            .unwrap();
        match &nodes[0] {
            MatchedNode::Element(el) => assert_eq!(el.tag, "div"),
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn malformed_selector_matches_nothing() {
        assert!(SelectorQuery.matches(PAGE, "a[").unwrap().is_empty());
        assert!(SelectorQuery.matches(PAGE, "").unwrap().is_empty());
    }

    #[test]
    fn no_matches_is_an_empty_sequence() {
        assert!(SelectorQuery.matches(PAGE, "table.missing").unwrap().is_empty());
    }

    #[test]
    fn snippet_is_capped() {
        let page = format!("<html><body><p>{}</p></body></html>", "x".repeat(5000));
        let nodes = SelectorQuery.matches(&page, "p").unwrap();
        match &nodes[0] {
            MatchedNode::Element(el) => {
                assert_eq!(el.html.chars().count(), HTML_SNIPPET_CAP);
            }
            _ => panic!("expected element"),
        }
    }
}
