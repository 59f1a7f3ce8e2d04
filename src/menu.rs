use serde::{Deserialize, Serialize};

/// One dish extracted from a menu page. Fields the parser could not find are
/// empty strings, never absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

/// Which rule produced a suggestion. Serialized as the snake_case `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    MissingDescriptions,
    MissingImages,
    ShortDescriptions,
    DuplicateItems,
    PriceClustering,
    Organization,
}

/// One actionable improvement for the menu.
///
/// `affected_items` is a preview capped at five names; `affected_count`
/// always carries the full count. The price fields are set only by the
/// price-clustering rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub affected_items: Vec<String>,
    pub affected_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<f64>,
}

/// Outcome of one analysis call. `sample_items` holds the first five items
/// for reference; `total_items` counts everything that was extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub platform: String,
    pub total_items: usize,
    pub suggestions: Vec<Suggestion>,
    pub sample_items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_json_round_trip() {
        let item = MenuItem {
            name: "Pizza Margherita".to_string(),
            description: "Molho de tomate, mussarela e manjericão".to_string(),
            price: "R$ 42,90".to_string(),
            image_url: "https://cdn.example.com/margherita.jpg".to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: MenuItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, item.name);
        assert_eq!(back.description, item.description);
        assert_eq!(back.price, item.price);
        assert_eq!(back.image_url, item.image_url);
    }

    #[test]
    fn suggestion_kind_serializes_as_snake_case_type() {
        let suggestion = Suggestion {
            kind: SuggestionKind::MissingImages,
            title: "Add images".to_string(),
            description: "2 items have no image.".to_string(),
            affected_items: vec!["Calabresa".to_string()],
            affected_count: 2,
            min_price: None,
            max_price: None,
            avg_price: None,
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["type"], "missing_images");
        // Unset price fields are omitted, not null
        assert!(value.get("min_price").is_none());
        assert!(value.get("avg_price").is_none());
    }

    #[test]
    fn suggestion_round_trips_without_price_fields() {
        let suggestion = Suggestion {
            kind: SuggestionKind::DuplicateItems,
            title: "Review duplicated items".to_string(),
            description: "1 item name appears more than once.".to_string(),
            affected_items: vec!["pizza".to_string()],
            affected_count: 1,
            min_price: None,
            max_price: None,
            avg_price: None,
        };
        let json = serde_json::to_string(&suggestion).unwrap();
        let back: Suggestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, SuggestionKind::DuplicateItems);
        assert_eq!(back.affected_count, 1);
        assert!(back.min_price.is_none());
    }
}
