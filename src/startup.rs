use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Environment,
    routes::{default_route, price_route},
    services::PriceAggregator,
};

pub fn run(
    listener: TcpListener,
    aggregator: PriceAggregator,
    environment: Environment,
) -> Result<Server, std::io::Error> {
    let aggregator = web::Data::new(aggregator);
    let environment = web::Data::new(environment);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes)
            .app_data(aggregator.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(default_route::default)
        .service(default_route::health)
        .service(web::scope("/api/prices").service(price_route::fetch_prices))
        .default_service(web::route().to(default_route::not_found));
}
