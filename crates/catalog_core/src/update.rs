use crate::{
    AppState, Artwork, Category, Effect, FetchFailure, Generation, Msg, Query, ResultItem,
    SearchPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged { term, scope } => {
            state.set_input(term, scope);
            Vec::new()
        }
        Msg::SearchTriggered { term, scope } => {
            // Live input only moves on InputChanged; a late trigger must not rewind it.
            state.record_dispatch(term.clone(), scope);

            let mut effects = supersede_outstanding_work(&mut state);
            let generation = state.next_generation();

            let query_term = term.trim();
            if query_term.is_empty() {
                state.set_phase(SearchPhase::Idle);
                effects.push(Effect::Publish(state.snapshot().clone()));
                return (state, effects);
            }

            let categories = scope.categories();
            effects.extend(categories.iter().map(|&category| Effect::FetchScope {
                generation,
                query: Query::new(query_term, category, state.options()),
            }));
            state.set_phase(SearchPhase::Searching {
                generation,
                pending: categories.into_iter().collect(),
            });
            effects
        }
        Msg::ScopeFetched {
            generation,
            category,
            result,
        } => apply_scope_result(&mut state, generation, category, result),
        Msg::RowDisplayed { slot, artwork_url } => {
            let (previous, request) = state.claim_image_slot(slot);
            let mut effects = Vec::with_capacity(3);
            if previous.is_some() {
                effects.push(Effect::CancelImage { slot });
            }
            effects.push(Effect::ShowArtwork {
                slot,
                artwork: Artwork::Placeholder,
            });
            if artwork_url.trim().is_empty() {
                state.release_image_slot(slot, request);
            } else {
                effects.push(Effect::LoadImage {
                    slot,
                    request,
                    url: artwork_url,
                });
            }
            effects
        }
        Msg::ImageFetched {
            slot,
            request,
            result,
        } => {
            if !state.release_image_slot(slot, request) {
                return (state, Vec::new());
            }
            match result {
                Ok(bytes) => vec![Effect::ShowArtwork {
                    slot,
                    artwork: Artwork::Image(bytes),
                }],
                Err(FetchFailure::Cancelled) => Vec::new(),
                Err(FetchFailure::Network(_)) => vec![Effect::ShowArtwork {
                    slot,
                    artwork: Artwork::Placeholder,
                }],
            }
        }
        Msg::Teardown => {
            let effects = supersede_outstanding_work(&mut state);
            // Bump without clearing results so no late completion can match.
            state.advance_generation();
            state.set_phase(SearchPhase::Cancelled);
            effects
        }
    };

    (state, effects)
}

/// Cancels the running search (if any) and every row image load.
fn supersede_outstanding_work(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    if let Some(generation) = state.searching_generation() {
        effects.push(Effect::CancelSearch { generation });
    }
    effects.push(Effect::CancelAllImages);
    state.clear_image_slots();
    effects
}

fn apply_scope_result(
    state: &mut AppState,
    generation: Generation,
    category: Category,
    result: Result<Vec<ResultItem>, FetchFailure>,
) -> Vec<Effect> {
    // Superseded by a newer trigger or teardown.
    if state.generation() != generation {
        return Vec::new();
    }
    // Input moved on while this response was in flight.
    if !state.dispatch_input_is_live() {
        return Vec::new();
    }

    match result {
        Ok(items) => {
            state.merge_items(items);
            state.settle_category(category);
            vec![Effect::Publish(state.snapshot().clone())]
        }
        Err(FetchFailure::Cancelled) => Vec::new(),
        Err(FetchFailure::Network(_)) => {
            if state.settle_category(category) {
                vec![Effect::Publish(state.snapshot().clone())]
            } else {
                Vec::new()
            }
        }
    }
}
