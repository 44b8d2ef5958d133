//! Per-site listing extractors.
//!
//! Every [`SourceKind`] knows the container selector of one search result and
//! how to read name, price and link out of it. [`extract_offers`] turns the
//! listings of a page into [`OfferCandidate`]s for one request.

mod amazon;
mod ebay;
mod flipkart;
mod snapdeal;
mod walmart;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::{OfferCandidate, ProductInfo, SourceDefinition, SourceKind};

/// Raw fields of one search result.
#[derive(Debug, PartialEq)]
struct Listing {
    name: String,
    price: String,
    href: String,
}

impl SourceKind {
    fn listing_selector(&self) -> &'static Selector {
        match self {
            SourceKind::Amazon => &amazon::LISTING,
            SourceKind::Ebay => &ebay::LISTING,
            SourceKind::Flipkart => &flipkart::LISTING,
            SourceKind::Walmart => &walmart::LISTING,
            SourceKind::Snapdeal => &snapdeal::LISTING,
        }
    }

    fn read_listing(&self, element: ElementRef) -> Option<Listing> {
        match self {
            SourceKind::Amazon => amazon::read_listing(element),
            SourceKind::Ebay => ebay::read_listing(element),
            SourceKind::Flipkart => flipkart::read_listing(element),
            SourceKind::Walmart => walmart::read_listing(element),
            SourceKind::Snapdeal => snapdeal::read_listing(element),
        }
    }

    /// Whether `markup` holds at least one search result container.
    pub fn has_listings(&self, markup: &str) -> bool {
        Html::parse_document(markup)
            .select(self.listing_selector())
            .next()
            .is_some()
    }
}

pub fn extract_offers(
    source: &SourceDefinition,
    markup: &str,
    product_info: &ProductInfo,
) -> Vec<OfferCandidate> {
    let document = Html::parse_document(markup);

    document
        .select(source.kind.listing_selector())
        .filter_map(|element| source.kind.read_listing(element))
        .filter_map(|listing| {
            let link = resolve_link(&source.base_url, &listing.href)?;
            Some(OfferCandidate {
                matched_parameters: product_info.matched_specifications(&listing.name),
                product_name: listing.name,
                price_text: listing.price,
                currency: product_info.currency,
                link,
                source: source.name.clone(),
            })
        })
        .collect()
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid listing selector")
}

/// Whitespace-collapsed text of the first match, `None` when absent or blank.
fn text_of(element: ElementRef, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()?
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    match text.is_empty() {
        true => None,
        false => Some(text),
    }
}

fn attr_of(element: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .find_map(|e| e.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// First whitespace-separated token that carries a digit, e.g. `"$10.00"`
/// out of `"current price $10.00 to $20.00"`.
fn price_token(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|token| token.chars().any(|c| c.is_ascii_digit()))
        .map(String::from)
}

fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = Url::parse(base_url).ok()?.join(href).ok()?;
            Some(joined.into())
        }
        Err(e) => {
            log::debug!("Dropping listing with bad link {:?}: {}", href, e);
            None
        }
    }
}
