use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::menu::MenuItem;
use crate::platform::Platform;

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"R\$").unwrap());

/// Where a platform's price text comes from.
pub enum PriceSource {
    /// First element matching a CSS selector.
    Css(&'static str),
    /// First `span` whose text carries the `R$` currency marker.
    CurrencySpan,
}

/// Declarative extraction table for one platform. The heuristics live here as
/// data: selector drift on a platform is fixed by editing its table, and a
/// new platform is added by registering one more entry.
pub struct SelectorRules {
    pub platform: Platform,
    pub container: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: PriceSource,
}

/// Registered platform tables. Platforms without an entry (Rappi, Unknown)
/// rely on the generic fallback alone.
static RULES: &[SelectorRules] = &[
    SelectorRules {
        platform: Platform::IFood,
        container: r#"div[class*="dish-card"]"#,
        name: "h3",
        description: r#"p[class*="description"]"#,
        price: PriceSource::Css(r#"span[class*="price"]"#),
    },
    SelectorRules {
        platform: Platform::UberEats,
        container: r#"div[data-testid*="menu-item"]"#,
        name: "h4",
        description: "p",
        price: PriceSource::CurrencySpan,
    },
];

pub fn lookup(platform: Platform) -> Option<&'static SelectorRules> {
    RULES.iter().find(|r| r.platform == platform)
}

/// Platform-specific pass: every container the table matches becomes one
/// item, in document order.
pub fn extract(document: &Html, rules: &SelectorRules) -> Vec<MenuItem> {
    let container = sel(rules.container);
    document
        .select(&container)
        .map(|el| extract_item(el, rules))
        .collect()
}

/// Pull one item out of a candidate container. Anything the selectors miss
/// becomes an empty field; the container itself is never dropped.
fn extract_item(el: ElementRef, rules: &SelectorRules) -> MenuItem {
    let price = match rules.price {
        PriceSource::Css(selector) => first_text(el, selector),
        PriceSource::CurrencySpan => currency_span_text(el),
    };
    MenuItem {
        name: first_text(el, rules.name),
        description: first_text(el, rules.description),
        price,
        image_url: image_src(el),
    }
}

/// Trimmed text of the first descendant matching `selector`, or empty.
pub(super) fn first_text(el: ElementRef, selector: &str) -> String {
    el.select(&sel(selector))
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn currency_span_text(el: ElementRef) -> String {
    el.select(&sel("span"))
        .map(|e| e.text().collect::<String>())
        .find(|text| CURRENCY_RE.is_match(text))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// `src` of the first image, or empty when there is no image or no `src`.
pub(super) fn image_src(el: ElementRef) -> String {
    el.select(&sel("img"))
        .next()
        .and_then(|e| e.value().attr("src"))
        .unwrap_or_default()
        .to_string()
}

/// All selectors come from the static tables above; a parse failure is a bug
/// in the table, not a runtime condition.
pub(super) fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("invalid selector literal")
}
