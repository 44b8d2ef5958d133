pub mod offer;
pub mod product_info;
pub mod search_query;
pub mod source;

pub use offer::*;
pub use product_info::*;
pub use search_query::*;
pub use source::*;
