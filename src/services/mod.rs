pub mod droid;
pub mod extractors;
pub mod openai_client;
pub mod price_aggregator;
pub mod query_interpreter;
pub mod retriever;
pub mod source_catalog;

pub use droid::*;
pub use extractors::*;
pub use openai_client::*;
pub use price_aggregator::*;
pub use query_interpreter::*;
pub use retriever::*;
pub use source_catalog::*;
