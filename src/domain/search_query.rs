use serde::Deserialize;

/// Raw query string parameters of a price search. Both are optional here so
/// that a missing parameter yields our own validation message instead of the
/// framework's extractor error.
#[derive(Debug, Deserialize)]
pub struct PriceSearchParams {
    pub query: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub country: String,
}

impl SearchQuery {
    /// Both fields must be present and non-blank after trimming.
    pub fn parse(params: PriceSearchParams) -> Option<Self> {
        let query = params.query?.trim().to_string();
        let country = params.country?.trim().to_string();

        match query.is_empty() || country.is_empty() {
            true => None,
            false => Some(SearchQuery { query, country }),
        }
    }
}
