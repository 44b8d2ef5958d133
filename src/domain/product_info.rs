use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Inr,
    Gbp,
    Cad,
}

impl Currency {
    /// Currency of a country code, USD for anything unknown.
    pub fn for_country(country: &str) -> Self {
        match country.trim().to_uppercase().as_str() {
            "IN" => Currency::Inr,
            "UK" => Currency::Gbp,
            "CA" => Currency::Cad,
            _ => Currency::Usd,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            "GBP" => Ok(Currency::Gbp),
            "CAD" => Ok(Currency::Cad),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}

/// Structured matching criteria derived from a free-text query. Built once
/// per request and shared read-only with every source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub product_type: String,
    pub brand: String,
    pub keywords: Vec<String>,
    pub specifications: Vec<String>,
    pub currency: Currency,
}

impl ProductInfo {
    /// True when at least one keyword is a case-insensitive substring of `name`.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }

    /// Specifications mentioned in `name`, in specification order.
    pub fn matched_specifications(&self, name: &str) -> Vec<String> {
        let name = name.to_uppercase();
        self.specifications
            .iter()
            .filter(|spec| name.contains(&spec.to_uppercase()))
            .cloned()
            .collect()
    }
}
