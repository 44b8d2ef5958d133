use std::sync::Arc;

use futures::future::join_all;

use crate::domain::{OfferCandidate, ProductInfo, RankedResult, SearchQuery, SourceDefinition};

use super::{extract_offers, QueryInterpreter, Retriever, SourceCatalog};

pub const MAX_RESULTS: usize = 10;

/// Runs one price search across every source of a country.
pub struct PriceAggregator {
    interpreter: QueryInterpreter,
    catalog: SourceCatalog,
    retriever: Arc<Retriever>,
}

impl PriceAggregator {
    pub fn new(interpreter: QueryInterpreter, catalog: SourceCatalog, retriever: Retriever) -> Self {
        PriceAggregator {
            interpreter,
            catalog,
            retriever: Arc::new(retriever),
        }
    }

    /// Cheapest relevant offers, at most [`MAX_RESULTS`]. Sources are scraped
    /// concurrently, and a source that fails, panics or runs out of time
    /// contributes nothing.
    pub async fn aggregate(&self, search: &SearchQuery) -> Vec<RankedResult> {
        let product_info = Arc::new(
            self.interpreter
                .interpret(&search.query, &search.country)
                .await,
        );
        log::debug!("Product info for {:?}: {:?}", search.query, product_info);

        let sources = self.catalog.sources_for(&search.country);
        let tasks = sources.iter().cloned().map(|source| {
            let retriever = self.retriever.clone();
            let product_info = product_info.clone();
            let query = search.query.clone();

            tokio::spawn(async move {
                let budget = retriever.source_timeout();
                match tokio::time::timeout(
                    budget,
                    scrape_source(&retriever, &source, &query, &product_info),
                )
                .await
                {
                    Ok(offers) => offers,
                    Err(_) => {
                        log::error!("Scraping {} exceeded {:?}, skipping", source.name, budget);
                        vec![]
                    }
                }
            })
        });

        // Joined in catalog order so equal prices keep discovery order.
        let candidates: Vec<OfferCandidate> = join_all(tasks)
            .await
            .into_iter()
            .zip(sources)
            .flat_map(|(joined, source)| {
                joined.unwrap_or_else(|e| {
                    log::error!("Scraping task for {} failed: {:?}", source.name, e);
                    vec![]
                })
            })
            .collect();
        log::info!(
            "Collected {} candidates from {} sources",
            candidates.len(),
            sources.len()
        );

        rank_offers(candidates, &product_info)
    }
}

async fn scrape_source(
    retriever: &Retriever,
    source: &SourceDefinition,
    query: &str,
    product_info: &ProductInfo,
) -> Vec<OfferCandidate> {
    log::info!("Scraping {} for: {}", source.name, query);

    match retriever.retrieve(source, query).await {
        Ok(page) => {
            let offers = extract_offers(source, &page.markup, product_info);
            log::info!(
                "Found {} results from {} via {}",
                offers.len(),
                source.name,
                page.tier
            );
            offers
        }
        Err(e) => {
            log::error!("All scraping methods failed for {}: {}", source.name, e);
            vec![]
        }
    }
}

/// Keeps offers whose name mentions a keyword and whose price parses above
/// zero, ordered by ascending price (stable) and capped at [`MAX_RESULTS`].
pub fn rank_offers(candidates: Vec<OfferCandidate>, product_info: &ProductInfo) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = candidates
        .into_iter()
        .filter(|offer| product_info.matches_name(&offer.product_name))
        .filter_map(|offer| {
            let numeric_price = offer.numeric_price();
            (numeric_price > 0.0).then_some(RankedResult {
                offer,
                numeric_price,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.numeric_price.total_cmp(&b.numeric_price));
    ranked.truncate(MAX_RESULTS);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;

    fn info(keywords: &[&str]) -> ProductInfo {
        ProductInfo {
            product_type: "smartphone".to_string(),
            brand: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            specifications: vec![],
            currency: Currency::Usd,
        }
    }

    fn offer(name: &str, price: &str, source: &str) -> OfferCandidate {
        OfferCandidate {
            product_name: name.to_string(),
            price_text: price.to_string(),
            currency: Currency::Usd,
            link: format!("https://example.com/{}", name.len()),
            matched_parameters: vec![],
            source: source.to_string(),
        }
    }

    #[test]
    fn drops_free_and_irrelevant_offers() {
        let candidates = vec![
            offer("Apple iPhone 15 Pro Max 256GB", "$999.99", "Amazon"),
            offer("iPhone 15 sticker", "Free", "eBay"),
            offer("Samsung Galaxy S24", "$799.99", "eBay"),
        ];
        let ranked = rank_offers(candidates, &info(&["iphone"]));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].offer.product_name, "Apple iPhone 15 Pro Max 256GB");
        assert_eq!(ranked[0].numeric_price, 999.99);
    }

    #[test]
    fn sorts_by_price_keeping_discovery_order_for_ties() {
        let candidates = vec![
            offer("iPhone A", "$500", "Amazon"),
            offer("iPhone B", "$300", "Amazon"),
            offer("iPhone C", "$300.00", "eBay"),
            offer("iPhone D", "$1,200", "eBay"),
        ];
        let ranked = rank_offers(candidates, &info(&["iphone"]));
        let names: Vec<&str> = ranked.iter().map(|r| r.offer.product_name.as_str()).collect();

        assert_eq!(names, vec!["iPhone B", "iPhone C", "iPhone A", "iPhone D"]);
    }

    #[test]
    fn caps_results() {
        let candidates = (1..=25)
            .rev()
            .map(|i| offer(&format!("Laptop model {}", i), &format!("${}.00", i * 10), "Amazon"))
            .collect();
        let ranked = rank_offers(candidates, &info(&["laptop"]));

        assert_eq!(ranked.len(), MAX_RESULTS);
        assert_eq!(ranked[0].numeric_price, 10.0);
        assert_eq!(ranked[9].numeric_price, 100.0);
    }

    #[test]
    fn nothing_matches_without_keywords() {
        let candidates = vec![offer("iPhone 15", "$700", "Amazon")];

        assert!(rank_offers(candidates, &info(&[])).is_empty());
    }
}
