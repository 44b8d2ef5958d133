use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Characters `encodeURIComponent` leaves untouched.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which markup family a source serves; selects the listing extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    Amazon,
    Ebay,
    Flipkart,
    Walmart,
    Snapdeal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceDefinition {
    pub kind: SourceKind,
    pub name: String,
    pub base_url: String,
    pub search_path: String,
}

impl SourceDefinition {
    pub fn new(kind: SourceKind, name: &str, base_url: &str, search_path: &str) -> Self {
        SourceDefinition {
            kind,
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            search_path: search_path.to_string(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            self.search_path,
            utf8_percent_encode(query, QUERY_COMPONENT)
        )
    }
}
