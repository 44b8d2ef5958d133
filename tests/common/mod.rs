#![allow(dead_code)]

use std::time::Duration;

use pricehound::{
    configuration::{BrowserSettings, RetrievalSettings},
    domain::{SourceDefinition, SourceKind},
    services::{PriceAggregator, QueryInterpreter, Retriever, SourceCatalog},
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Search page with a relative link and Amazon's split price fields.
pub const AMAZON_PAGE: &str = r#"
<html><body>
  <div data-component-type="s-search-result">
    <h2><a href="/Apple-iPhone-Pro-Max-256GB/dp/B0CMZ4S9PF"><span>Apple iPhone 15 Pro Max 256GB</span></a></h2>
    <span class="a-price-symbol">$</span><span class="a-price-whole">999<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span>
  </div>
  <div data-component-type="s-search-result">
    <h2><a href="/Apple-iPhone-15-Pro-Clear-Case/dp/B0CHX3Q1"><span>iPhone 15 Pro Clear Case with MagSafe</span></a></h2>
    <span class="a-price-symbol">$</span><span class="a-price-whole">49<span class="a-price-decimal">.</span></span><span class="a-price-fraction">00</span>
  </div>
  <div data-component-type="s-search-result">
    <h2><a href="/Samsung-Galaxy-S24/dp/B0CMDRCZBJ"><span>Samsung Galaxy S24 Ultra</span></a></h2>
    <span class="a-price-symbol">$</span><span class="a-price-whole">1,099<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span>
  </div>
</body></html>
"#;

/// Search page with eBay's promotional tile, a price range and a free listing.
pub const EBAY_PAGE: &str = r#"
<html><body><ul class="srp-results">
  <li class="s-item">
    <a class="s-item__link" href="https://ebay.com/itm/123456"></a>
    <div class="s-item__title"><span>Shop on eBay</span></div>
    <span class="s-item__price">$20.00</span>
  </li>
  <li class="s-item">
    <a class="s-item__link" href="https://www.ebay.com/itm/256398"></a>
    <div class="s-item__title"><span>Apple iPhone 15 Pro 256GB Natural Titanium Unlocked</span></div>
    <span class="s-item__price">$849.00 to $899.00</span>
  </li>
  <li class="s-item">
    <a class="s-item__link" href="https://www.ebay.com/itm/256399"></a>
    <div class="s-item__title"><span>iPhone 15 Pro giveaway entry</span></div>
    <span class="s-item__price">Free</span>
  </li>
</ul></body></html>
"#;

pub fn retrieval_settings(browser_enabled: bool, webdriver_url: &str) -> RetrievalSettings {
    RetrievalSettings {
        browser: BrowserSettings {
            enabled: browser_enabled,
            webdriver_url: webdriver_url.to_string(),
            navigation_timeout_secs: 15,
            settle_millis: 0,
            viewport_width: 1366,
            viewport_height: 768,
        },
        http_timeout_secs: 10,
        source_timeout_secs: 30,
        user_agent: USER_AGENT.to_string(),
    }
}

/// HTTP-only aggregator with the local interpreter.
pub fn offline_aggregator(catalog: SourceCatalog) -> PriceAggregator {
    aggregator_with(catalog, retrieval_settings(false, "http://localhost:4444"))
}

pub fn aggregator_with(catalog: SourceCatalog, settings: RetrievalSettings) -> PriceAggregator {
    let retriever = Retriever::new(settings).expect("failed to build test Retriever");
    PriceAggregator::new(QueryInterpreter::offline(), catalog, retriever)
}

pub fn amazon(base_url: &str) -> SourceDefinition {
    SourceDefinition::new(SourceKind::Amazon, "Amazon", base_url, "/s?k=")
}

pub fn ebay(base_url: &str) -> SourceDefinition {
    SourceDefinition::new(SourceKind::Ebay, "eBay", base_url, "/sch/i.html?_nkw=")
}

pub fn us_catalog(sources: Vec<SourceDefinition>) -> SourceCatalog {
    SourceCatalog::new(vec![("US", sources)], "US")
}

pub async fn serve_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

pub async fn serve_page_after(server: &MockServer, page_path: &str, body: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/html; charset=utf-8")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn fail_with(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
