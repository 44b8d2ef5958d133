use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr_of, price_token, selector, text_of, Listing};

pub(super) static LISTING: LazyLock<Selector> = LazyLock::new(|| selector("div[data-item-id]"));
static NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[data-automation-id="product-title"]"#));
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[data-automation-id="product-price"]"#));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Walmart prefixes the amount with screen-reader text such as
/// "current price Now".
pub(super) fn read_listing(element: ElementRef) -> Option<Listing> {
    let name = text_of(element, &NAME)?;
    let price = price_token(&text_of(element, &PRICE)?)?;
    let href = attr_of(element, &LINK, "href")?;

    Some(Listing { name, price, href })
}
