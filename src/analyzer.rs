use thiserror::Error;
use tracing::info;

use crate::fetch::{self, FetchError};
use crate::menu::AnalysisResult;
use crate::parser;
use crate::platform::{self, Platform};
use crate::suggest;

/// How many extracted items ride along in the result for reference.
const SAMPLE_ITEMS: usize = 5;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Also covers a fetched page with genuinely no items; the two cases are
    /// indistinguishable here and share one message.
    #[error("could not extract any menu items; the site structure may be unsupported or may have changed")]
    NoItems,
}

/// Full pipeline for one menu URL: classify, fetch, parse, suggest.
pub async fn analyze(url: &str) -> Result<AnalysisResult, AnalyzeError> {
    let platform = platform::classify(url);
    info!("Analyzing {} as {}", url, platform);
    let html = fetch::fetch_page(url).await?;
    analyze_html(platform, &html)
}

/// Everything after the fetch. Pure, so saved pages can be audited offline
/// and the pipeline tested without a network.
pub fn analyze_html(platform: Platform, html: &str) -> Result<AnalysisResult, AnalyzeError> {
    let items = parser::parse(html, platform);
    if items.is_empty() {
        return Err(AnalyzeError::NoItems);
    }
    info!("Extracted {} items from a {} menu", items.len(), platform);

    let suggestions = suggest::generate(&items);
    Ok(AnalysisResult {
        platform: platform.name().to_string(),
        total_items: items.len(),
        suggestions,
        sample_items: items.into_iter().take(SAMPLE_ITEMS).collect(),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::SuggestionKind;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn blank_page_fails_with_no_items() {
        let html = "<html><body><p>nada por aqui</p></body></html>";
        let err = analyze_html(Platform::Unknown, html).unwrap_err();
        assert!(matches!(err, AnalyzeError::NoItems));
    }

    #[test]
    fn total_items_counts_past_the_sample_cap() {
        let result = analyze_html(Platform::IFood, &fixture("ifood")).unwrap();
        assert_eq!(result.platform, "iFood");
        assert_eq!(result.total_items, 6);
        assert_eq!(result.sample_items.len(), 5);
    }

    #[test]
    fn ifood_fixture_suggestions_in_rule_order() {
        let result = analyze_html(Platform::IFood, &fixture("ifood")).unwrap();
        let kinds: Vec<SuggestionKind> = result.suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                SuggestionKind::MissingDescriptions,
                SuggestionKind::MissingImages,
                SuggestionKind::ShortDescriptions,
            ]
        );
        // Preview truncation never touches the real counts
        assert_eq!(result.suggestions[0].affected_count, 3);
        assert_eq!(result.suggestions[1].affected_count, 2);
    }

    #[test]
    fn generic_menu_analyzes_under_any_unregistered_platform() {
        let result = analyze_html(Platform::Rappi, &fixture("generic")).unwrap();
        assert_eq!(result.platform, "Rappi");
        assert_eq!(result.total_items, 4);
    }
}
