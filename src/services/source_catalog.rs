use std::collections::HashMap;

use crate::domain::{SourceDefinition, SourceKind};

const DEFAULT_COUNTRY: &str = "US";

/// Country code to the ordered list of sites searched for it.
pub struct SourceCatalog {
    sources: HashMap<String, Vec<SourceDefinition>>,
    default_country: String,
}

impl SourceCatalog {
    /// Builds a catalog from `(country, sources)` pairs. `default_country`
    /// must be one of the given countries.
    pub fn new(entries: Vec<(&str, Vec<SourceDefinition>)>, default_country: &str) -> Self {
        let sources = entries
            .into_iter()
            .map(|(country, sources)| (country.to_uppercase(), sources))
            .collect();

        SourceCatalog {
            sources,
            default_country: default_country.to_uppercase(),
        }
    }

    pub fn builtin() -> Self {
        use SourceKind::*;

        SourceCatalog::new(
            vec![
                (
                    "US",
                    vec![
                        SourceDefinition::new(Amazon, "Amazon", "https://www.amazon.com", "/s?k="),
                        SourceDefinition::new(
                            Ebay,
                            "eBay",
                            "https://www.ebay.com",
                            "/sch/i.html?_nkw=",
                        ),
                        SourceDefinition::new(
                            Walmart,
                            "Walmart",
                            "https://www.walmart.com",
                            "/search?q=",
                        ),
                    ],
                ),
                (
                    "IN",
                    vec![
                        SourceDefinition::new(
                            Amazon,
                            "Amazon India",
                            "https://www.amazon.in",
                            "/s?k=",
                        ),
                        SourceDefinition::new(
                            Flipkart,
                            "Flipkart",
                            "https://www.flipkart.com",
                            "/search?q=",
                        ),
                        SourceDefinition::new(
                            Snapdeal,
                            "Snapdeal",
                            "https://www.snapdeal.com",
                            "/search?keyword=",
                        ),
                    ],
                ),
                (
                    "UK",
                    vec![
                        SourceDefinition::new(
                            Amazon,
                            "Amazon UK",
                            "https://www.amazon.co.uk",
                            "/s?k=",
                        ),
                        SourceDefinition::new(
                            Ebay,
                            "eBay UK",
                            "https://www.ebay.co.uk",
                            "/sch/i.html?_nkw=",
                        ),
                    ],
                ),
                (
                    "CA",
                    vec![
                        SourceDefinition::new(
                            Amazon,
                            "Amazon Canada",
                            "https://www.amazon.ca",
                            "/s?k=",
                        ),
                        SourceDefinition::new(
                            Ebay,
                            "eBay Canada",
                            "https://www.ebay.ca",
                            "/sch/i.html?_nkw=",
                        ),
                    ],
                ),
            ],
            DEFAULT_COUNTRY,
        )
    }

    /// Sources for `country`, case-insensitive, falling back to the default
    /// country's list.
    pub fn sources_for(&self, country: &str) -> &[SourceDefinition] {
        self.sources
            .get(&country.trim().to_uppercase())
            .or_else(|| self.sources.get(&self.default_country))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::SourceCatalog;
    use crate::domain::SourceKind;

    fn names(catalog: &SourceCatalog, country: &str) -> Vec<String> {
        catalog
            .sources_for(country)
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = SourceCatalog::builtin();

        assert_eq!(names(&catalog, "in"), vec!["Amazon India", "Flipkart", "Snapdeal"]);
        assert_eq!(names(&catalog, " Uk "), vec!["Amazon UK", "eBay UK"]);
    }

    #[test]
    fn unknown_country_falls_back_to_us() {
        let catalog = SourceCatalog::builtin();

        assert_eq!(names(&catalog, "DE"), vec!["Amazon", "eBay", "Walmart"]);
        assert_eq!(names(&catalog, ""), names(&catalog, "US"));
    }

    #[test]
    fn regional_sites_keep_their_extractor_family() {
        let catalog = SourceCatalog::builtin();
        let kinds: Vec<SourceKind> = catalog.sources_for("CA").iter().map(|s| s.kind).collect();

        assert_eq!(kinds, vec![SourceKind::Amazon, SourceKind::Ebay]);
    }

    #[test]
    fn every_builtin_country_has_sources() {
        let catalog = SourceCatalog::builtin();

        for country in ["US", "IN", "UK", "CA", "zz"] {
            assert!(!catalog.sources_for(country).is_empty());
        }
    }
}
