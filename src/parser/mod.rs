pub mod generic;
pub mod rules;

use scraper::Html;
use tracing::debug;

use crate::menu::MenuItem;
use crate::platform::Platform;

/// Two-tier extraction: the platform's registered selector table first, then
/// the generic fallback when that yields nothing. Never fails; an empty Vec
/// is the caller's signal that the page structure went unrecognized.
pub fn parse(html: &str, platform: Platform) -> Vec<MenuItem> {
    let document = Html::parse_document(html);

    let mut items = match rules::lookup(platform) {
        Some(table) => rules::extract(&document, table),
        None => Vec::new(),
    };

    if items.is_empty() {
        debug!("{} selectors matched nothing, trying generic fallback", platform);
        items = generic::extract(&document);
    }

    items
}

// ── Tests ──
