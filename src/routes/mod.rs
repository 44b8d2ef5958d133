pub mod default_route;
pub mod price_route;
