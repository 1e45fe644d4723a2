//! Catalog engine: debounced input, per-scope fetch fan-out and the orchestrator actor.
mod debounce;
mod engine;
mod fetch;
mod inflight;
mod sink;
mod types;
mod wire;

pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use engine::{EngineSettings, SearchEngine};
pub use fetch::{CatalogClient, FetchSettings, ImageFetcher, ReqwestCatalogClient, DEFAULT_BASE_URL};
pub use inflight::{InFlightTable, Ticket};
pub use sink::PresentationSink;
pub use types::{FailureKind, FetchError};
pub use wire::parse_search_response;
