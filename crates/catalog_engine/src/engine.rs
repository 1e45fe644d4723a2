use std::sync::Arc;
use std::time::Duration;

use catalog_core::{
    update, AppState, Artwork, Category, Effect, FetchFailure, Generation, ImageBytes,
    ImageRequestId, Msg, Query, QueryOptions, ResultItem, RowSlot, Scope, Snapshot,
};
use catalog_logging::{catalog_debug, catalog_info, catalog_warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
use crate::inflight::{InFlightTable, Ticket};
use crate::{CatalogClient, FetchSettings, ImageFetcher, PresentationSink};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub debounce: Duration,
    pub query: QueryOptions,
    pub fetch: FetchSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_QUIET_PERIOD,
            query: QueryOptions::default(),
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScopeKey {
    generation: Generation,
    category: Category,
}

enum Settle {
    Search { key: ScopeKey, ticket: Ticket },
    Image { slot: RowSlot, ticket: Ticket },
}

enum Inbox {
    Msg(Msg),
    /// A spawned request finished; release its table entry, then apply `msg`.
    Settled { settle: Settle, msg: Msg },
}

enum Presentation {
    Snapshot(Snapshot),
    Artwork { slot: RowSlot, artwork: Artwork },
}

/// Handle to a running search orchestrator.
///
/// All state transitions happen on one actor task; this handle only enqueues
/// input. Dropping it tears the orchestrator down.
pub struct SearchEngine {
    inbox: mpsc::UnboundedSender<Inbox>,
    debouncer: Debouncer<Inbox>,
    shutdown: CancellationToken,
    actor: Option<JoinHandle<()>>,
}

impl SearchEngine {
    /// Spawns the orchestrator and its presenter on the current tokio runtime.
    pub fn spawn(
        settings: &EngineSettings,
        catalog: Arc<dyn CatalogClient>,
        images: Arc<dyn ImageFetcher>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (presenter_tx, presenter_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        tokio::spawn(present(sink, presenter_rx));

        let orchestrator = Orchestrator {
            state: AppState::with_options(settings.query.clone()),
            catalog,
            images,
            searches: InFlightTable::new(),
            image_loads: InFlightTable::new(),
            inbox: inbox_tx.clone(),
            presenter: presenter_tx,
        };
        let actor = tokio::spawn(orchestrator.run(inbox_rx, shutdown.clone()));
        let debouncer = Debouncer::spawn(settings.debounce, inbox_tx.clone());

        catalog_info!(
            "search engine started debounce_ms={} lang={} limit={}",
            settings.debounce.as_millis(),
            settings.query.language,
            settings.query.limit
        );

        Self {
            inbox: inbox_tx,
            debouncer,
            shutdown,
            actor: Some(actor),
        }
    }

    /// Records the live input and schedules a debounced search for it.
    pub fn input_changed(&self, term: impl Into<String>, scope: Scope) {
        let term = term.into();
        self.send(Msg::InputChanged {
            term: term.clone(),
            scope,
        });
        self.debouncer
            .push(Inbox::Msg(Msg::SearchTriggered { term, scope }));
    }

    /// A row at `slot` is now showing `item` and needs its artwork.
    pub fn row_displayed(&self, slot: RowSlot, item: &ResultItem) {
        self.send(Msg::RowDisplayed {
            slot,
            artwork_url: item.artwork_url.clone(),
        });
    }

    /// Cancels every outstanding fetch and image load. Later input starts afresh.
    pub fn teardown(&self) {
        self.debouncer.discard_pending();
        self.send(Msg::Teardown);
    }

    /// Stops the orchestrator and waits until it has cancelled its work.
    pub async fn shutdown(mut self) {
        self.debouncer.cancel();
        self.shutdown.cancel();
        if let Some(actor) = self.actor.take() {
            let _ = actor.await;
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.inbox.send(Inbox::Msg(msg));
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct Orchestrator {
    state: AppState,
    catalog: Arc<dyn CatalogClient>,
    images: Arc<dyn ImageFetcher>,
    searches: InFlightTable<ScopeKey>,
    image_loads: InFlightTable<RowSlot>,
    inbox: mpsc::UnboundedSender<Inbox>,
    presenter: mpsc::UnboundedSender<Presentation>,
}

impl Orchestrator {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Inbox>, shutdown: CancellationToken) {
        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                next = inbox.recv() => next,
            };
            match next {
                Some(Inbox::Msg(msg)) => self.dispatch(msg),
                Some(Inbox::Settled { settle, msg }) => {
                    self.settle(settle);
                    self.dispatch(msg);
                }
                None => break,
            }
        }

        self.dispatch(Msg::Teardown);
        catalog_info!("search engine stopped");
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn settle(&mut self, settle: Settle) {
        match settle {
            Settle::Search { key, ticket } => {
                self.searches.settle(&key, ticket);
            }
            Settle::Image { slot, ticket } => {
                self.image_loads.settle(&slot, ticket);
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CancelSearch { generation } => {
                let cancelled = self
                    .searches
                    .cancel_where(|key| key.generation == generation);
                catalog_debug!(
                    "CancelSearch generation={} cancelled={}",
                    generation,
                    cancelled
                );
            }
            Effect::FetchScope { generation, query } => self.spawn_search(generation, query),
            Effect::Publish(snapshot) => {
                catalog_debug!(
                    "Publish generation={} sections={:?} items={}",
                    self.state.generation(),
                    snapshot.titles(),
                    snapshot.item_count()
                );
                let _ = self.presenter.send(Presentation::Snapshot(snapshot));
            }
            Effect::LoadImage { slot, request, url } => self.spawn_image(slot, request, url),
            Effect::CancelImage { slot } => {
                self.image_loads.cancel(&slot);
            }
            Effect::CancelAllImages => {
                let cancelled = self.image_loads.cancel_all();
                if cancelled > 0 {
                    catalog_debug!("CancelAllImages cancelled={}", cancelled);
                }
            }
            Effect::ShowArtwork { slot, artwork } => {
                let _ = self
                    .presenter
                    .send(Presentation::Artwork { slot, artwork });
            }
        }
    }

    fn spawn_search(&mut self, generation: Generation, query: Query) {
        let category = query.category;
        let key = ScopeKey {
            generation,
            category,
        };
        let (ticket, token) = self.searches.start(key);
        let catalog = Arc::clone(&self.catalog);
        let inbox = self.inbox.clone();

        catalog_debug!(
            "FetchScope generation={} media={} term_len={}",
            generation,
            category.media_token(),
            query.term.len()
        );

        tokio::spawn(async move {
            let result: Result<Vec<ResultItem>, FetchFailure> = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchFailure::Cancelled),
                outcome = catalog.search(&query) => outcome.map_err(|err| {
                    if !err.is_cancelled() {
                        catalog_warn!(
                            "search failed generation={} media={}: {}",
                            generation,
                            category.media_token(),
                            err
                        );
                    }
                    err.into_failure()
                }),
            };
            let _ = inbox.send(Inbox::Settled {
                settle: Settle::Search { key, ticket },
                msg: Msg::ScopeFetched {
                    generation,
                    category,
                    result,
                },
            });
        });
    }

    fn spawn_image(&mut self, slot: RowSlot, request: ImageRequestId, url: String) {
        let (ticket, token) = self.image_loads.start(slot);
        let images = Arc::clone(&self.images);
        let inbox = self.inbox.clone();

        tokio::spawn(async move {
            let result: Result<ImageBytes, FetchFailure> = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchFailure::Cancelled),
                outcome = images.fetch_image(&url) => match outcome {
                    Ok(bytes) => Ok(ImageBytes::from(bytes.as_ref())),
                    Err(err) => {
                        if !err.is_cancelled() {
                            catalog_warn!("image fetch failed url={}: {}", url, err);
                        }
                        Err(err.into_failure())
                    }
                },
            };
            let _ = inbox.send(Inbox::Settled {
                settle: Settle::Image { slot, ticket },
                msg: Msg::ImageFetched {
                    slot,
                    request,
                    result,
                },
            });
        });
    }
}

async fn present(sink: Arc<dyn PresentationSink>, mut rx: mpsc::UnboundedReceiver<Presentation>) {
    while let Some(presentation) = rx.recv().await {
        match presentation {
            Presentation::Snapshot(snapshot) => sink.apply(snapshot).await,
            Presentation::Artwork { slot, artwork } => sink.show_artwork(slot, artwork).await,
        }
    }
}
