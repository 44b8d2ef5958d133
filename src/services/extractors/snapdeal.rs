use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr_of, selector, text_of, Listing};

pub(super) static LISTING: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-tuple-listing"));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector(".product-title"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector(".product-price"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.dp-widget-link"));

/// Snapdeal prints prices as "Rs. 1,299"; the abbreviation's dot would be
/// read as a decimal point, so it is replaced with the rupee sign.
pub(super) fn read_listing(element: ElementRef) -> Option<Listing> {
    let name = text_of(element, &NAME)?;

    let amount = match attr_of(element, &PRICE, "data-price") {
        Some(amount) => amount,
        None => text_of(element, &PRICE)?
            .trim_start_matches("Rs.")
            .trim()
            .to_string(),
    };
    if amount.is_empty() {
        return None;
    }

    let href = attr_of(element, &LINK, "href")?;

    Some(Listing {
        name,
        price: format!("₹{}", amount),
        href,
    })
}
