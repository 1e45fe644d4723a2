use crate::{Category, FetchFailure, Generation, ImageBytes, ImageRequestId, ResultItem, RowSlot, Scope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search bar or scope selection (raw, not debounced).
    InputChanged { term: String, scope: Scope },
    /// Debounced input settled; start a new search.
    SearchTriggered { term: String, scope: Scope },
    /// One per-category fetch finished.
    ScopeFetched {
        generation: Generation,
        category: Category,
        result: Result<Vec<ResultItem>, FetchFailure>,
    },
    /// A row became visible and wants its artwork.
    RowDisplayed { slot: RowSlot, artwork_url: String },
    /// Artwork fetch for a row finished.
    ImageFetched {
        slot: RowSlot,
        request: ImageRequestId,
        result: Result<ImageBytes, FetchFailure>,
    },
    /// Search surface is going away; drop all outstanding work.
    Teardown,
}
