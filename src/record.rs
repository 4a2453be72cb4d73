use crate::query::MatchedNode;
use indexmap::IndexMap;
use url::Url;

/// One flattened output unit. Field order is insertion order and survives
/// JSON serialization.
pub type Record = IndexMap<String, String>;

/// Run-wide extraction flags. The same options apply to every matched node,
/// so all records in a batch share the same requested field set.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Attribute to pull from each element; the record key is the
    /// attribute's own name.
    pub attribute: Option<String>,
    /// Whether to include the element's flattened text content.
    pub text: bool,
    /// Base for resolving relative `href`/`src` values.
    pub base_url: Option<Url>,
}

/// Attributes whose values get rewritten to absolute URLs.
const RESOLVED_ATTRS: [&str; 2] = ["href", "src"];

/// Converts matched nodes into records, preserving match order. Cannot
/// fail: the query strategies only hand over valid nodes.
pub fn build_records(nodes: Vec<MatchedNode>, options: &ExtractOptions) -> Vec<Record> {
    nodes
        .into_iter()
        .map(|node| build_record(node, options))
        .collect()
}

fn build_record(node: MatchedNode, options: &ExtractOptions) -> Record {
    let mut record = Record::new();

    let el = match node {
        // String results (XPath attribute/text/scalar selections) carry only
        // their value; tag, html, and attribute extraction do not apply.
        MatchedNode::Text(value) => {
            record.insert("text".to_string(), value);
            return record;
        }
        MatchedNode::Element(el) => el,
    };

    if options.text {
        record.insert("text".to_string(), el.text.clone());
    }

    if let Some(name) = &options.attribute {
        if let Some(raw) = el.attr(name) {
            let value = resolve_attribute(name, raw, options.base_url.as_ref());
            record.insert(name.clone(), value);
        }
        // An absent attribute leaves the field out entirely, not empty.
    }

    record.insert("tag".to_string(), el.tag);
    record.insert("html".to_string(), el.html);
    record
}

fn resolve_attribute(name: &str, raw: &str, base_url: Option<&Url>) -> String {
    if RESOLVED_ATTRS.contains(&name) && !raw.is_empty() {
        if let Some(base) = base_url {
            if let Ok(absolute) = base.join(raw) {
                return absolute.to_string();
            }
        }
    }
    // No base URL, or a value join cannot handle: keep the literal value.
    raw.to_string()
}
