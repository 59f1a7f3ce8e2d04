use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::rules::{first_text, image_src, sel};
use crate::menu::MenuItem;

/// Class-attribute pattern that marks a container as menu-item-like.
static ITEM_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(item|dish|product|menu)").unwrap());
/// A price-looking text node: currency marker followed by digits.
static PRICE_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"R\$\s*\d+").unwrap());

/// Platform-agnostic fallback pass over generic containers. Unlike the
/// platform-specific pass, candidates without a name are rejected.
pub fn extract(document: &Html) -> Vec<MenuItem> {
    let candidates = sel("div, li");
    document
        .select(&candidates)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| ITEM_CLASS_RE.is_match(class))
        })
        .filter_map(extract_item)
        .collect()
}

fn extract_item(el: ElementRef) -> Option<MenuItem> {
    let name = first_text(el, "h2, h3, h4");
    if name.is_empty() {
        return None;
    }
    Some(MenuItem {
        name,
        description: first_text(el, "p"),
        price: price_text(el),
        image_url: image_src(el),
    })
}

/// First descendant text node that looks like a price.
fn price_text(el: ElementRef) -> String {
    el.text()
        .find(|text| PRICE_TEXT_RE.is_match(text))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
