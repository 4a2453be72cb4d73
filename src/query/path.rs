use super::{cap_snippet, ElementMatch, MatchedNode, QueryStrategy, HTML_SNIPPET_CAP};
use crate::error::ParseError;
use indexmap::IndexMap;
use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};

/// XPath query strategy.
///
/// The markup is parsed as XML, so it must be well-formed. Tag soup that
/// the selector strategy tolerates is a `ParseError` here. Expressions may
/// select elements, attributes, text nodes, or scalars; non-element results
/// come back as plain strings.
pub struct XpathQuery;

impl QueryStrategy for XpathQuery {
    fn matches(&self, markup: &str, query: &str) -> Result<Vec<MatchedNode>, ParseError> {
        let package =
            parser::parse(markup).map_err(|e| ParseError::Markup(format!("{:?}", e)))?;
        let document = package.as_document();

        let xpath = Factory::new()
            .build(query)
            .map_err(|e| ParseError::Expression(e.to_string()))?
            .ok_or_else(|| ParseError::Expression("empty expression".to_string()))?;

        let value = xpath
            .evaluate(&Context::new(), document.root())
            .map_err(|e| ParseError::Evaluation(e.to_string()))?;

        Ok(match value {
            Value::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .filter_map(to_match)
                .collect(),
            Value::String(s) => vec![MatchedNode::Text(s)],
            Value::Number(n) => vec![MatchedNode::Text(n.to_string())],
            Value::Boolean(b) => vec![MatchedNode::Text(b.to_string())],
        })
    }
}

fn to_match(node: Node<'_>) -> Option<MatchedNode> {
    match node {
        Node::Element(el) => Some(MatchedNode::Element(element_match(el))),
        Node::Text(text) => Some(MatchedNode::Text(text.text().to_string())),
        Node::Attribute(attr) => Some(MatchedNode::Text(attr.value().to_string())),
        _ => None,
    }
}

fn element_match(el: Element<'_>) -> ElementMatch {
    let mut attrs: IndexMap<String, String> = IndexMap::new();
    for (name, value) in sorted_attributes(el) {
        attrs.insert(name, value);
    }

    let mut text = String::new();
    collect_text(el, &mut text);

    let mut html = String::new();
    write_element(el, &mut html);

    ElementMatch {
        tag: el.name().local_part().to_lowercase(),
        html: cap_snippet(html, HTML_SNIPPET_CAP),
        text: text.trim().to_string(),
        attrs,
    }
}

// Attribute storage order is not document order; sort by name so the
// serialized snippet is stable across runs.
fn sorted_attributes(el: Element<'_>) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = el
        .attributes()
        .into_iter()
        .map(|a| (a.name().local_part().to_string(), a.value().to_string()))
        .collect();
    attrs.sort();
    attrs
}

fn collect_text(el: Element<'_>, out: &mut String) {
    for child in el.children() {
        match child {
            ChildOfElement::Element(child) => collect_text(child, out),
            ChildOfElement::Text(text) => out.push_str(text.text()),
            _ => {}
        }
    }
}

fn write_element(el: Element<'_>, out: &mut String) {
    let name = el.name().local_part();
    out.push('<');
    out.push_str(name);
    for (attr_name, attr_value) in sorted_attributes(el) {
        out.push(' ');
        out.push_str(&attr_name);
        out.push_str("=\"");
        push_escaped(out, &attr_value, true);
        out.push('"');
    }
    out.push('>');
    for child in el.children() {
        match child {
            ChildOfElement::Element(child) => write_element(child, out),
            ChildOfElement::Text(text) => push_escaped(out, text.text(), false),
            _ => {}
        }
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_escaped(out: &mut String, value: &str, quote: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
