// src/extract/page.rs
// =============================================================================
// This module parses fetched HTML into the two things the crawler needs:
// - the visible text (for the email matcher)
// - the href of every <a> tag (for mailto: handling and link following)
//
// scraper's Html type is not Send, so we parse synchronously and keep only
// owned Strings. The DOM is dropped before the crawler awaits again.
// =============================================================================

use scraper::{Html, Node, Selector};
use std::sync::LazyLock;

// Elements that start a new line when a browser renders them
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded selector is valid"));

// A parsed page. Lives only while its task is being processed.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub text: String,
    pub hrefs: Vec<String>,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        // Text nodes are concatenated as-is, so `<b>john</b>@example.com`
        // stays one token; only block elements add a line break
        let mut text = String::new();
        for node in document.root_element().descendants() {
            match node.value() {
                Node::Text(fragment) => text.push_str(fragment),
                Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        let hrefs = document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Page { text, hrefs }
    }
}
