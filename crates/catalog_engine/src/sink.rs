use catalog_core::{Artwork, RowSlot, Snapshot};

/// Presentation layer receiving published results.
///
/// Calls arrive in publish order; each is awaited before the next is made.
#[async_trait::async_trait]
pub trait PresentationSink: Send + Sync {
    async fn apply(&self, snapshot: Snapshot);

    async fn show_artwork(&self, slot: RowSlot, artwork: Artwork) {
        let _ = (slot, artwork);
    }
}
