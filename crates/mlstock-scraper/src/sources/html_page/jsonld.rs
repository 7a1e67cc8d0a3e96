//! schema.org JSON-LD offer availability.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

static JSONLD_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid json-ld selector")
});

/// Reads `offers.availability` from the page's JSON-LD blocks.
///
/// Blocks may hold one object, a list of objects, or an `@graph`
/// container; `offers` may be an object or a list. Blocks that fail to
/// parse are skipped. Returns the first availability that mentions
/// `instock` or `outofstock`.
pub(super) fn offer_availability(document: &Html) -> Option<(bool, &'static str)> {
    for script in document.select(&JSONLD_SCRIPT) {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            tracing::debug!("skipping malformed JSON-LD block");
            continue;
        };

        for node in candidate_nodes(&value) {
            if let Some(found) = node_availability(node) {
                return Some(found);
            }
        }
    }
    None
}

fn candidate_nodes(value: &Value) -> Vec<&Value> {
    let mut nodes: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let graph: Vec<&Value> = nodes
        .iter()
        .copied()
        .filter_map(|node| node.get("@graph").and_then(Value::as_array))
        .flatten()
        .collect();
    nodes.extend(graph);
    nodes
}

fn node_availability(node: &Value) -> Option<(bool, &'static str)> {
    let offers = node.as_object()?.get("offers")?;
    let offers: Vec<&Value> = match offers {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    offers.into_iter().find_map(|offer| {
        let availability = offer.get("availability")?.as_str()?.to_lowercase();
        if availability.contains("instock") {
            Some((true, "jsonld:instock"))
        } else if availability.contains("outofstock") {
            Some((false, "jsonld:outofstock"))
        } else {
            None
        }
    })
}
