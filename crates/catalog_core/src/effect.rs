use crate::{Artwork, Generation, ImageRequestId, Query, RowSlot, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel every fetch still running for `generation`. Results are not awaited.
    CancelSearch { generation: Generation },
    FetchScope { generation: Generation, query: Query },
    Publish(Snapshot),
    LoadImage {
        slot: RowSlot,
        request: ImageRequestId,
        url: String,
    },
    CancelImage { slot: RowSlot },
    CancelAllImages,
    ShowArtwork { slot: RowSlot, artwork: Artwork },
}
