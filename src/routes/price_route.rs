use std::time::Instant;

use actix_web::{get, routes, web, HttpResponse};
use serde::Serialize;

use crate::{
    configuration::Environment,
    domain::{PriceSearchParams, RankedResult, SearchQuery},
    services::PriceAggregator,
};

const INVALID_PARAMS: &str = r#"Invalid query parameters. "country" and "query" are required."#;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NoResultsResponse {
    message: &'static str,
    results: Vec<RankedResult>,
    search_info: SearchInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchInfo {
    query: String,
    country: String,
    processing_time: u64,
}

#[routes]
#[get("")]
#[get("/")]
async fn fetch_prices(
    params: web::Query<PriceSearchParams>,
    aggregator: web::Data<PriceAggregator>,
    environment: web::Data<Environment>,
) -> HttpResponse {
    log::info!("Received query: {:?}", params);

    let Some(search) = SearchQuery::parse(params.into_inner()) else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: INVALID_PARAMS,
            details: None,
        });
    };

    let start = Instant::now();
    let aggregator = aggregator.into_inner();
    let task_search = search.clone();
    // Own task so a panic anywhere in the pipeline surfaces as a JoinError.
    let outcome = tokio::spawn(async move { aggregator.aggregate(&task_search).await }).await;
    let processing_time = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(prices) => {
            log::info!(
                "Query processed in {}ms, found {} results",
                processing_time,
                prices.len()
            );

            match prices.is_empty() {
                true => HttpResponse::Ok().json(NoResultsResponse {
                    message: "No products found matching the query.",
                    results: prices,
                    search_info: SearchInfo {
                        query: search.query,
                        country: search.country,
                        processing_time,
                    },
                }),
                false => HttpResponse::Ok().json(prices),
            }
        }
        Err(e) => {
            log::error!("Error in fetch_prices: {:?}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch prices",
                details: (!environment.is_production()).then(|| e.to_string()),
            })
        }
    }
}
