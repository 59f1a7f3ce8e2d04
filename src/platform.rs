use std::fmt;

/// Delivery platform a menu URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    IFood,
    UberEats,
    Rappi,
    Unknown,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::IFood => "iFood",
            Platform::UberEats => "Uber Eats",
            Platform::Rappi => "Rappi",
            Platform::Unknown => "Unknown",
        }
    }

    /// Lookup by display name or slug ("uber-eats", "ubereats", ...), used by
    /// the CLI platform override.
    pub fn from_name(name: &str) -> Option<Platform> {
        match name.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "ifood" => Some(Platform::IFood),
            "ubereats" => Some(Platform::UberEats),
            "rappi" => Some(Platform::Rappi),
            "unknown" => Some(Platform::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a menu URL to its platform. Case-insensitive hostname substring match,
/// first hit in priority order wins.
pub fn classify(url: &str) -> Platform {
    let lower = url.to_lowercase();
    if lower.contains("ifood") {
        Platform::IFood
    } else if lower.contains("ubereats") {
        Platform::UberEats
    } else if lower.contains("rappi") {
        Platform::Rappi
    } else {
        Platform::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ifood_case_insensitive() {
        assert_eq!(
            classify("https://www.IFOOD.com.br/delivery/sao-paulo/pizzaria"),
            Platform::IFood
        );
    }

    #[test]
    fn ubereats() {
        assert_eq!(
            classify("https://www.ubereats.com/br/store/burger-town"),
            Platform::UberEats
        );
    }

    #[test]
    fn rappi() {
        assert_eq!(
            classify("https://www.rappi.com.br/restaurantes/cantina"),
            Platform::Rappi
        );
    }

    #[test]
    fn unrecognized_host() {
        assert_eq!(classify("https://example.com/menu"), Platform::Unknown);
    }

    #[test]
    fn priority_order_first_match_wins() {
        // Both substrings present: earlier platform in the chain takes it
        assert_eq!(
            classify("https://ifood.com.br/promo?from=ubereats"),
            Platform::IFood
        );
    }

    #[test]
    fn from_name_accepts_slugs_and_display_names() {
        assert_eq!(Platform::from_name("iFood"), Some(Platform::IFood));
        assert_eq!(Platform::from_name("uber-eats"), Some(Platform::UberEats));
        assert_eq!(Platform::from_name("Uber Eats"), Some(Platform::UberEats));
        assert_eq!(Platform::from_name("RAPPI"), Some(Platform::Rappi));
        assert_eq!(Platform::from_name("doordash"), None);
    }
}
