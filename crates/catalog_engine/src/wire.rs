use catalog_core::{Category, ResultItem};
use catalog_logging::catalog_debug;
use serde::Deserialize;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    track_id: Option<u64>,
    collection_id: Option<u64>,
    track_name: Option<String>,
    collection_name: Option<String>,
    artist_name: Option<String>,
    artwork_url100: Option<String>,
}

/// Parse a search API body into result items.
///
/// Entries without any identifier are dropped. Every item is filed under the
/// category that was queried, whatever its upstream `kind`.
pub fn parse_search_response(body: &[u8], queried: Category) -> Result<Vec<ResultItem>, FetchError> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    let total = response.results.len();
    let items: Vec<ResultItem> = response
        .results
        .into_iter()
        .filter_map(|wire| into_item(wire, queried))
        .collect();
    if items.len() != total {
        catalog_debug!(
            "dropped {} of {} {} results without an id",
            total - items.len(),
            total,
            queried
        );
    }
    Ok(items)
}

fn into_item(wire: WireItem, queried: Category) -> Option<ResultItem> {
    let id = wire.track_id.or(wire.collection_id)?;
    Some(ResultItem {
        id,
        name: wire
            .track_name
            .or(wire.collection_name)
            .unwrap_or_default(),
        artist: wire.artist_name.unwrap_or_default(),
        artwork_url: wire.artwork_url100.unwrap_or_default(),
        category: queried,
    })
}
