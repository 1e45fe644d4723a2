#![allow(dead_code)]

use std::sync::Once;

use catalog_core::{Category, ResultItem};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

pub fn item(id: u64, category: Category) -> ResultItem {
    ResultItem {
        id,
        name: format!("item {id}"),
        artist: format!("artist {id}"),
        artwork_url: format!("https://img.example.com/{id}.jpg"),
        category,
    }
}
