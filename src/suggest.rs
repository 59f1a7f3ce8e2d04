use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::menu::{MenuItem, Suggestion, SuggestionKind};

/// Preview cap for affected-item lists; counts always cover the full menu.
const MAX_EXAMPLES: usize = 5;
/// Descriptions shorter than this read as placeholders.
const SHORT_DESCRIPTION_LEN: usize = 10;
/// Above this many items a flat menu gets hard to navigate.
const CROWDED_MENU_THRESHOLD: usize = 15;
/// Price range narrower than this fraction of the average counts as clustered.
const CLUSTER_RATIO: f64 = 0.5;

/// Decimal amount inside a price string, once the currency marker is gone.
static PRICE_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+[.,]\d+)").unwrap());

/// Evaluate every rule over the extracted menu, in fixed order. Rules that do
/// not trigger contribute nothing; rules never depend on each other.
pub fn generate(items: &[MenuItem]) -> Vec<Suggestion> {
    [
        missing_descriptions(items),
        missing_images(items),
        short_descriptions(items),
        duplicate_items(items),
        price_clustering(items),
        organization(items),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn missing_descriptions(items: &[MenuItem]) -> Option<Suggestion> {
    let names: Vec<String> = items
        .iter()
        .filter(|i| i.description.is_empty())
        .map(|i| i.name.clone())
        .collect();
    if names.is_empty() {
        return None;
    }
    let description = format!(
        "{} items have no description. Detailed descriptions can lift sales by up to 30%.",
        names.len()
    );
    Some(named_suggestion(
        SuggestionKind::MissingDescriptions,
        "Add descriptions to your items",
        description,
        names,
    ))
}

fn missing_images(items: &[MenuItem]) -> Option<Suggestion> {
    let names: Vec<String> = items
        .iter()
        .filter(|i| i.image_url.is_empty())
        .map(|i| i.name.clone())
        .collect();
    if names.is_empty() {
        return None;
    }
    let description = format!(
        "{} items have no image. Dishes with appealing photos are up to 65% more likely to be ordered.",
        names.len()
    );
    Some(named_suggestion(
        SuggestionKind::MissingImages,
        "Add images to your items",
        description,
        names,
    ))
}

fn short_descriptions(items: &[MenuItem]) -> Option<Suggestion> {
    let names: Vec<String> = items
        .iter()
        .filter(|i| {
            !i.description.is_empty() && i.description.chars().count() < SHORT_DESCRIPTION_LEN
        })
        .map(|i| i.name.clone())
        .collect();
    if names.is_empty() {
        return None;
    }
    let description = format!(
        "{} items have very short descriptions. A few more words help customers decide.",
        names.len()
    );
    Some(named_suggestion(
        SuggestionKind::ShortDescriptions,
        "Improve the short descriptions",
        description,
        names,
    ))
}

fn duplicate_items(items: &[MenuItem]) -> Option<Suggestion> {
    let lowered: Vec<String> = items.iter().map(|i| i.name.to_lowercase()).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &lowered {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }

    // Each duplicated name once, in first-occurrence order
    let mut duplicates: Vec<String> = Vec::new();
    for name in &lowered {
        if counts[name.as_str()] > 1 && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.clone());
        }
    }
    if duplicates.is_empty() {
        return None;
    }
    let description = format!(
        "{} item names appear more than once. Near-identical entries confuse customers.",
        duplicates.len()
    );
    Some(named_suggestion(
        SuggestionKind::DuplicateItems,
        "Review duplicated or very similar items",
        description,
        duplicates,
    ))
}

fn price_clustering(items: &[MenuItem]) -> Option<Suggestion> {
    let prices: Vec<f64> = items.iter().filter_map(|i| parse_price(&i.price)).collect();
    if prices.is_empty() {
        return None;
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;
    if max - min >= avg * CLUSTER_RATIO {
        return None;
    }

    Some(Suggestion {
        kind: SuggestionKind::PriceClustering,
        title: "Diversify your price range".to_string(),
        description: "Prices are tightly clustered. Premium and budget options reach customers the current range misses.".to_string(),
        affected_items: Vec::new(),
        affected_count: prices.len(),
        min_price: Some(min),
        max_price: Some(max),
        avg_price: Some(avg),
    })
}

fn organization(items: &[MenuItem]) -> Option<Suggestion> {
    if items.len() <= CROWDED_MENU_THRESHOLD {
        return None;
    }
    Some(Suggestion {
        kind: SuggestionKind::Organization,
        title: "Organize the menu into categories".to_string(),
        description: "The menu carries a lot of items. Clear categories keep it easy to browse."
            .to_string(),
        affected_items: Vec::new(),
        affected_count: items.len(),
        min_price: None,
        max_price: None,
        avg_price: None,
    })
}

fn named_suggestion(
    kind: SuggestionKind,
    title: &str,
    description: String,
    names: Vec<String>,
) -> Suggestion {
    let affected_count = names.len();
    Suggestion {
        kind,
        title: title.to_string(),
        description,
        affected_items: names.into_iter().take(MAX_EXAMPLES).collect(),
        affected_count,
        min_price: None,
        max_price: None,
        avg_price: None,
    }
}

/// Numeric value of a raw price string. Amounts without a decimal part do not
/// parse and are left out of the clustering computation, never counted as 0.
fn parse_price(raw: &str) -> Option<f64> {
    let stripped = raw.replace("R$", "");
    let caps = PRICE_VALUE_RE.captures(&stripped)?;
    caps[1].replace(',', ".").parse().ok()
}

// ── Tests ──
