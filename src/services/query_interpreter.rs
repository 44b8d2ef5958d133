use std::{sync::LazyLock, time::Duration};

use anyhow::{bail, Context};
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

use crate::domain::{Currency, ProductInfo};

use super::OpenaiClient;

static SPECIFICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d+\s?GB",
        r"(?i)\d+\s?TB",
        r"(?i)\bPro\b",
        r"(?i)\bMax\b",
        r"(?i)\bPlus\b",
        r"(?i)\bMini\b",
        r"(?i)\bAir\b",
        r"(?i)\d+\s?inch",
        r#"\d+""#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid specification pattern"))
    .collect()
});

const PRODUCT_TYPES: [(&str, &[&str]); 3] = [
    ("smartphone", &["iphone", "phone", "mobile"]),
    ("laptop", &["laptop", "macbook"]),
    ("headphones", &["headphone", "earphone", "airdopes"]),
];

const BRANDS: [&str; 9] = [
    "Apple", "Samsung", "Google", "OnePlus", "iPhone", "boAt", "Sony", "Nike", "Adidas",
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductInfoReply {
    product_type: Option<String>,
    brand: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    specifications: Vec<String>,
    currency: Option<String>,
}

/// Turns free-text queries into [`ProductInfo`]. Asks the text generation
/// service when one is configured and falls back to local heuristics on any
/// failure, so interpretation itself never fails.
pub struct QueryInterpreter {
    client: Option<OpenaiClient>,
    timeout: Duration,
}

impl QueryInterpreter {
    pub fn new(client: Option<OpenaiClient>, timeout: Duration) -> Self {
        QueryInterpreter { client, timeout }
    }

    /// Interpreter that only uses the local heuristics.
    pub fn offline() -> Self {
        QueryInterpreter {
            client: None,
            timeout: Duration::ZERO,
        }
    }

    pub async fn interpret(&self, query: &str, country: &str) -> ProductInfo {
        let Some(client) = &self.client else {
            return fallback_product_info(query, country);
        };

        match self.ask(client, query, country).await {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Product info extraction failed, using fallback: {:#}", e);
                fallback_product_info(query, country)
            }
        }
    }

    async fn ask(
        &self,
        client: &OpenaiClient,
        query: &str,
        country: &str,
    ) -> anyhow::Result<ProductInfo> {
        let prompt = build_prompt(query, country);

        let text = tokio::time::timeout(self.timeout, client.complete(&prompt))
            .await
            .with_context(|| format!("No reply within {:?}", self.timeout))??;
        log::info!("Text generation reply: {}", text);

        parse_reply(&text, country)
    }
}

fn build_prompt(query: &str, country: &str) -> String {
    format!(
        r#"Extract product info from: "{}" for {}. Return only JSON: {{"productType":"category","brand":"brand","keywords":["key","words"],"specifications":["specs"],"currency":"{}"}}"#,
        query,
        country,
        Currency::for_country(country)
    )
}

fn parse_reply(text: &str, country: &str) -> anyhow::Result<ProductInfo> {
    let json = text.replace("```json", "").replace("```", "");
    let reply: ProductInfoReply =
        serde_json::from_str(json.trim()).context("Reply is not product info JSON")?;

    let keywords: Vec<String> = reply
        .keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .unique()
        .collect();
    if keywords.is_empty() {
        bail!("Reply has no keywords");
    }

    let currency = reply
        .currency
        .and_then(|c| c.parse().ok())
        .unwrap_or_else(|| Currency::for_country(country));

    Ok(ProductInfo {
        product_type: reply.product_type.unwrap_or_else(|| "general".to_string()),
        brand: reply.brand.unwrap_or_default(),
        keywords,
        specifications: reply
            .specifications
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unique()
            .collect(),
        currency,
    })
}

/// Deterministic interpretation from the query text alone.
pub fn fallback_product_info(query: &str, country: &str) -> ProductInfo {
    let keywords = query
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| word.chars().count() > 2)
        .map(|word| word.to_lowercase())
        .unique()
        .collect();

    let specifications = SPECIFICATION_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(query).map(|m| m.as_str().to_string()))
        .unique()
        .collect();

    let info = ProductInfo {
        product_type: classify_product_type(query).to_string(),
        brand: find_brand(query).unwrap_or_default().to_string(),
        keywords,
        specifications,
        currency: Currency::for_country(country),
    };
    log::info!("Using fallback product info: {:?}", info);

    info
}

fn classify_product_type(query: &str) -> &'static str {
    let query = query.to_lowercase();
    PRODUCT_TYPES
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| query.contains(term)))
        .map(|(product_type, _)| *product_type)
        .unwrap_or("general")
}

fn find_brand(query: &str) -> Option<&'static str> {
    let query = query.to_uppercase();
    BRANDS
        .into_iter()
        .find(|brand| query.contains(&brand.to_uppercase()))
}
