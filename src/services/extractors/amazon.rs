use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr_of, selector, text_of, Listing};

pub(super) static LISTING: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-component-type="s-search-result"]"#));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector("h2 a span, h2 span"));
static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-whole"));
static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-fraction"));
static PRICE_SYMBOL: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-symbol"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("h2 a, a.a-link-normal"));

/// Amazon splits the price into symbol, whole and fraction parts; the whole
/// part carries the decimal point as a trailing child.
pub(super) fn read_listing(element: ElementRef) -> Option<Listing> {
    let name = text_of(element, &NAME)?;

    let whole = whole_of(element)?;
    let symbol = text_of(element, &PRICE_SYMBOL).unwrap_or_default();
    let price = match text_of(element, &PRICE_FRACTION) {
        Some(fraction) => format!("{}{}.{}", symbol, whole, fraction),
        None => format!("{}{}", symbol, whole),
    };

    let href = attr_of(element, &LINK, "href")?;

    Some(Listing { name, price, href })
}

/// Text nodes of the whole part read back to back, so the nested decimal
/// point stays attached to the digits before it is dropped.
fn whole_of(element: ElementRef) -> Option<String> {
    let whole: String = element.select(&PRICE_WHOLE).next()?.text().collect();
    let whole = whole.trim().trim_end_matches('.').trim_end();

    match whole.is_empty() {
        true => None,
        false => Some(whole.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn listings(markup: &str) -> Vec<Listing> {
        let document = Html::parse_document(markup);
        document
            .select(&LISTING)
            .filter_map(read_listing)
            .collect()
    }

    #[test]
    fn reads_split_price_and_relative_link() {
        let markup = r#"
            <div data-component-type="s-search-result">
                <h2><a href="/Apple-iPhone-Pro-Max-256GB/dp/B0CMZ4S9PF"><span>Apple iPhone 15 Pro Max 256GB</span></a></h2>
                <span class="a-price">
                    <span class="a-offscreen">$999.99</span>
                    <span aria-hidden="true"><span class="a-price-symbol">$</span><span class="a-price-whole">999<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span></span>
                </span>
            </div>
        "#;

        assert_eq!(
            listings(markup),
            vec![Listing {
                name: "Apple iPhone 15 Pro Max 256GB".to_string(),
                price: "$999.99".to_string(),
                href: "/Apple-iPhone-Pro-Max-256GB/dp/B0CMZ4S9PF".to_string(),
            }]
        );
    }

    #[test]
    fn keeps_grouping_in_whole_part() {
        let markup = r#"
            <div data-component-type="s-search-result">
                <h2><a href="/Samsung-Galaxy-S24/dp/B0CMDRCZBJ"><span>Samsung Galaxy S24 Ultra</span></a></h2>
                <span class="a-price-symbol">$</span>
                <span class="a-price-whole">1,099
                    <span class="a-price-decimal">.</span>
                </span>
                <span class="a-price-fraction">99</span>
            </div>
        "#;

        assert_eq!(listings(markup)[0].price, "$1,099.99");
    }

    #[test]
    fn skips_results_without_price() {
        let markup = r#"
            <div data-component-type="s-search-result">
                <h2><a href="/dp/B0AAA"><span>Apple iPhone 15 (Renewed)</span></a></h2>
                <span class="a-color-secondary">Currently unavailable.</span>
            </div>
            <div data-component-type="s-search-result">
                <h2><a href="/dp/B0BBB"><span>Apple iPhone 15 Case</span></a></h2>
                <span class="a-price-symbol">$</span><span class="a-price-whole">12</span>
            </div>
        "#;

        let found = listings(markup);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].price, "$12");
    }
}
