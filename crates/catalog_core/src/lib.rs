//! Catalog core: pure search state machine, scope model and result grouping.
mod artwork;
mod effect;
mod item;
mod msg;
mod scope;
mod snapshot;
mod state;
mod update;

pub use artwork::{Artwork, ImageRequestId, ListSurface, RowSlot};
pub use effect::Effect;
pub use item::{ImageBytes, ItemId, Query, QueryOptions, ResultItem};
pub use msg::Msg;
pub use scope::{Category, Scope, UnknownScope};
pub use snapshot::{group_by_category, Section, Snapshot};
pub use state::{AppState, FetchFailure, Generation, SearchPhase};
pub use update::update;
