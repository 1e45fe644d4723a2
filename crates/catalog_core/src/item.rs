use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Category;

pub type ItemId = u64;

/// Raw artwork bytes as delivered by the image fetcher.
pub type ImageBytes = Arc<[u8]>;

/// One catalog hit.
///
/// Identity is `id` alone: two values with the same id compare equal even if
/// their other fields differ.
#[derive(Debug, Clone)]
pub struct ResultItem {
    pub id: ItemId,
    pub name: String,
    pub artist: String,
    pub artwork_url: String,
    pub category: Category,
}

impl PartialEq for ResultItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResultItem {}

impl Hash for ResultItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Language and page size shared by every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub language: String,
    pub limit: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            language: "en_us".to_string(),
            limit: 20,
        }
    }
}

/// A single upstream request for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub category: Category,
    pub language: String,
    pub limit: u32,
}

impl Query {
    pub fn new(term: impl Into<String>, category: Category, options: &QueryOptions) -> Self {
        Self {
            term: term.into(),
            category,
            language: options.language.clone(),
            limit: options.limit,
        }
    }
}
