use serde::Serialize;

use super::Currency;

/// One listing scraped from a source's search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCandidate {
    pub product_name: String,
    #[serde(rename = "price")]
    pub price_text: String,
    pub currency: Currency,
    pub link: String,
    #[serde(rename = "parameters")]
    pub matched_parameters: Vec<String>,
    pub source: String,
}

impl OfferCandidate {
    pub fn numeric_price(&self) -> f64 {
        parse_price(&self.price_text)
    }
}

/// An offer that survived filtering, with its parsed price attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(flatten)]
    pub offer: OfferCandidate,
    pub numeric_price: f64,
}

/// Parses a displayed price like `"$1,299.99"` or `"₹ 54,999"` into a number.
///
/// Everything except digits, `.` and `-` is dropped and the longest numeric
/// prefix of what remains is parsed, so `"999..99"` reads as `999`. Text
/// without a usable number, and negative values, read as `0`.
pub fn parse_price(text: &str) -> f64 {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value = numeric_prefix(&numeric).parse::<f64>().unwrap_or(0.0);

    match value.is_finite() && value > 0.0 {
        true => value,
        false => 0.0,
    }
}

/// Longest leading `-?digits[.digits]` run of `text`, in one pass.
fn numeric_prefix(text: &str) -> &str {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in text.char_indices() {
        match c {
            '-' if i == 0 => {}
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    &text[..end]
}
