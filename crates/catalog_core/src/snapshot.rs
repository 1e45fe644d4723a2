use std::collections::BTreeMap;

use crate::{Category, ItemId, ResultItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub items: Vec<ResultItem>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// Complete sectioned view of the current results, replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    sections: Vec<Section>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, category: Category) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::title).collect()
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(|item| item.id))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Partition `items` into one section per non-empty category, in canonical order.
///
/// Relative input order is kept inside each section.
pub fn group_by_category(items: &[ResultItem]) -> Snapshot {
    let mut buckets: BTreeMap<Category, Vec<ResultItem>> = BTreeMap::new();
    for item in items {
        buckets.entry(item.category).or_default().push(item.clone());
    }

    let sections = buckets
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(category, items)| Section { category, items })
        .collect();

    Snapshot { sections }
}
