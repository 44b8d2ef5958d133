use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr_of, selector, text_of, Listing};

pub(super) static LISTING: LazyLock<Selector> = LazyLock::new(|| selector("._1AtVbE"));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector("._4rR01T"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("._30jeq3"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("._1fQZEK"));

pub(super) fn read_listing(element: ElementRef) -> Option<Listing> {
    Some(Listing {
        name: text_of(element, &NAME)?,
        price: text_of(element, &PRICE)?,
        href: attr_of(element, &LINK, "href")?,
    })
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn skips_rows_without_product_link() {
        let markup = r#"
            <div class="_1AtVbE"><div class="_4rR01T">SAMSUNG Galaxy S24</div><div class="_30jeq3">₹74,999</div></div>
            <div class="_1AtVbE"><span>Filters</span></div>
        "#;
        let document = Html::parse_document(markup);

        assert_eq!(document.select(&LISTING).filter_map(read_listing).count(), 0);
    }
}
