//! Title and visible-text extraction.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

/// Elements whose text never renders.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// First `<h1>` text, else the `<title>` text, else `None`.
pub(super) fn extract_title(document: &Html) -> Option<String> {
    first_text(document, &H1).or_else(|| first_text(document, &TITLE))
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// All rendered text of the page, lowercased, whitespace-collapsed, with
/// text nodes joined by single spaces.
pub(super) fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }
    collapse_whitespace(&parts.join(" ")).to_lowercase()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
