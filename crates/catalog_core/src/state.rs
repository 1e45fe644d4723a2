use std::collections::{BTreeMap, BTreeSet};

use crate::{
    group_by_category, Category, ImageRequestId, QueryOptions, ResultItem, RowSlot, Scope,
    Snapshot,
};

/// Monotonic search attempt counter.
pub type Generation = u64;

/// Failure of a fetch as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Superseded or torn down. Expected; never user-visible.
    Cancelled,
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching {
        generation: Generation,
        pending: BTreeSet<Category>,
    },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    options: QueryOptions,
    term: String,
    scope: Scope,
    /// Input as it was when the current generation was dispatched.
    dispatched: (String, Scope),
    generation: Generation,
    phase: SearchPhase,
    accumulated: Vec<ResultItem>,
    snapshot: Snapshot,
    image_slots: BTreeMap<RowSlot, ImageRequestId>,
    next_image_request: ImageRequestId,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: QueryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub(crate) fn set_input(&mut self, term: String, scope: Scope) {
        self.term = term;
        self.scope = scope;
    }

    /// Generation whose fetches are still outstanding, if any.
    pub(crate) fn searching_generation(&self) -> Option<Generation> {
        match self.phase {
            SearchPhase::Searching { generation, .. } => Some(generation),
            SearchPhase::Idle | SearchPhase::Cancelled => None,
        }
    }

    /// Starts a fresh generation with an empty accumulator.
    pub(crate) fn next_generation(&mut self) -> Generation {
        self.generation += 1;
        self.accumulated.clear();
        self.snapshot = Snapshot::empty();
        self.generation
    }

    /// Invalidates the current generation while keeping the published results.
    pub(crate) fn advance_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn set_phase(&mut self, phase: SearchPhase) {
        self.phase = phase;
    }

    pub(crate) fn record_dispatch(&mut self, term: String, scope: Scope) {
        self.dispatched = (term, scope);
    }

    /// True if the input recorded at dispatch still equals the live input.
    pub(crate) fn dispatch_input_is_live(&self) -> bool {
        self.dispatched.0 == self.term && self.dispatched.1 == self.scope
    }

    /// Merges `items` into the accumulator and regroups the snapshot.
    ///
    /// An item whose id is already present replaces the earlier entry in place.
    pub(crate) fn merge_items(&mut self, items: Vec<ResultItem>) {
        for item in items {
            match self.accumulated.iter().position(|known| known.id == item.id) {
                Some(index) => self.accumulated[index] = item,
                None => self.accumulated.push(item),
            }
        }
        self.snapshot = group_by_category(&self.accumulated);
    }

    /// Marks `category` as settled. Returns true when no category is left pending.
    pub(crate) fn settle_category(&mut self, category: Category) -> bool {
        let settled = match &mut self.phase {
            SearchPhase::Searching { pending, .. } => {
                pending.remove(&category);
                pending.is_empty()
            }
            SearchPhase::Idle | SearchPhase::Cancelled => false,
        };
        if settled {
            self.phase = SearchPhase::Idle;
        }
        settled
    }

    /// Assigns a new image request to `slot`, returning the request it replaced.
    pub(crate) fn claim_image_slot(
        &mut self,
        slot: RowSlot,
    ) -> (Option<ImageRequestId>, ImageRequestId) {
        self.next_image_request += 1;
        let request = self.next_image_request;
        let previous = self.image_slots.insert(slot, request);
        (previous, request)
    }

    /// Frees `slot` if `request` still owns it.
    pub(crate) fn release_image_slot(&mut self, slot: RowSlot, request: ImageRequestId) -> bool {
        if self.image_slots.get(&slot) == Some(&request) {
            self.image_slots.remove(&slot);
                true
        } else {
            false
        }
    }

    pub(crate) fn clear_image_slots(&mut self) {
        if !self.image_slots.is_empty() {
            self.image_slots.clear();
            }
    }
}
