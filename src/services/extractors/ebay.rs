use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr_of, price_token, selector, text_of, Listing};

pub(super) static LISTING: LazyLock<Selector> = LazyLock::new(|| selector(".s-item"));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector(".s-item__title"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector(".s-item__price"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector(".s-item__link"));

/// Promotional tile eBay renders as the first result.
const PLACEHOLDER_NAME: &str = "Shop on eBay";

pub(super) fn read_listing(element: ElementRef) -> Option<Listing> {
    let name = text_of(element, &NAME)?;
    if name.contains(PLACEHOLDER_NAME) {
        return None;
    }

    // Ranges read as "$10.00 to $20.00"; keep the lower bound.
    let price = price_token(&text_of(element, &PRICE)?)?;
    let href = attr_of(element, &LINK, "href")?;

    Some(Listing { name, price, href })
}
