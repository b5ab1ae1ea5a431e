//! Search and filter engine over a loaded item list.
//!
//! `SearchIndex` precomputes the lowercased searchable values of every item
//! once; each query then scores those values with the fuzzy matcher and
//! applies `SearchFilters`. Nothing here touches the filesystem.

pub mod facets;
pub mod fuzzy;

use crate::catalog::{ItemId, ItemMeta, ItemStatus, ItemType};
use fuzzy::{FuzzyOptions, field_norm, match_score};

pub use facets::{Facets, TypeCounts};

/// Searchable keys and their relative weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchField {
    Name,
    Tags,
    Description,
    Collections,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Tags,
        SearchField::Description,
        SearchField::Collections,
    ];

    pub fn weight(self) -> f64 {
        match self {
            SearchField::Name => 2.0,
            SearchField::Tags => 1.5,
            SearchField::Description => 1.0,
            SearchField::Collections => 1.0,
        }
    }

    /// Weight divided by the sum of all weights.
    pub fn normalized_weight(self) -> f64 {
        let total: f64 = SearchField::ALL.iter().map(|field| field.weight()).sum();
        self.weight() / total
    }

    fn values(self, meta: &ItemMeta) -> Vec<&str> {
        match self {
            SearchField::Name => vec![meta.name.as_str()],
            SearchField::Tags => meta.tags.iter().map(String::as_str).collect(),
            SearchField::Description => vec![meta.description.as_str()],
            SearchField::Collections => meta.collections.iter().map(String::as_str).collect(),
        }
    }
}

/// Structured filters. Empty lists and `None` mean "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub item_type: Option<ItemType>,
    /// Item must carry at least one of these tags.
    pub tags: Vec<String>,
    /// Item must belong to at least one of these collections.
    pub collections: Vec<String>,
    pub statuses: Vec<ItemStatus>,
}

impl SearchFilters {
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collections.push(collection.into());
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.item_type.is_none()
            && self.tags.is_empty()
            && self.collections.is_empty()
            && self.statuses.is_empty()
    }

    /// All set predicates must hold.
    pub fn matches(&self, meta: &ItemMeta) -> bool {
        if self.item_type.is_some_and(|item_type| item_type != meta.item_type) {
            return false;
        }
        if !self.tags.is_empty() && !meta.tags.iter().any(|tag| self.tags.contains(tag)) {
            return false;
        }
        if !self.collections.is_empty()
            && !meta
                .collections
                .iter()
                .any(|collection| self.collections.contains(collection))
        {
            return false;
        }
        self.statuses.is_empty() || self.statuses.contains(&meta.status)
    }
}

/// One result row. `score` is `None` on the unranked empty-query path.
#[derive(Debug)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    pub score: Option<f64>,
}

struct FieldValue {
    field: SearchField,
    text: String,
    norm: f64,
}

/// Weighted fuzzy index over any record that exposes `ItemMeta`.
pub struct SearchIndex<T> {
    items: Vec<T>,
    values: Vec<Vec<FieldValue>>,
    options: FuzzyOptions,
}

impl<T: AsRef<ItemMeta>> SearchIndex<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_options(items, FuzzyOptions::default())
    }

    pub fn with_options(items: Vec<T>, options: FuzzyOptions) -> Self {
        let values = items.iter().map(|item| field_values(item.as_ref())).collect();
        Self {
            items,
            values,
            options,
        }
    }

    /// Items in their original order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run a query and filters; see `search_scored` for ordering.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&T> {
        self.search_scored(query, filters)
            .into_iter()
            .map(|hit| hit.item)
            .collect()
    }

    /// The query is trimmed first, so a whitespace-only query counts as blank.
    /// A blank query returns every item passing `filters` in original order.
    /// Otherwise only fuzzy matches are returned, best score first, ties kept
    /// in original order.
    pub fn search_scored(&self, query: &str, filters: &SearchFilters) -> Vec<SearchHit<'_, T>> {
        let query = query.trim();
        let candidates = self
            .items
            .iter()
            .zip(&self.values)
            .filter(|&(item, _)| filters.matches(item.as_ref()));

        if query.is_empty() {
            return candidates
                .map(|(item, _)| SearchHit { item, score: None })
                .collect();
        }

        let pattern: Vec<char> = query.to_lowercase().chars().collect();
        let mut hits: Vec<SearchHit<'_, T>> = candidates
            .filter_map(|(item, values)| {
                self.item_score(&pattern, values)
                    .map(|score| SearchHit {
                        item,
                        score: Some(score),
                    })
            })
            .collect();
        hits.sort_by(|a, b| {
            let a = a.score.unwrap_or(f64::MAX);
            let b = b.score.unwrap_or(f64::MAX);
            a.total_cmp(&b)
        });
        hits
    }

    /// Product of `score ^ (weight * norm)` over matching values. A whole-value
    /// hit (`0.0`) contributes `f64::EPSILON` so it still outweighs other hits.
    fn item_score(&self, pattern: &[char], values: &[FieldValue]) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;
        for value in values {
            if let Some(score) = match_score(pattern, &value.text, &self.options) {
                matched = true;
                let base = if score == 0.0 { f64::EPSILON } else { score };
                total *= base.powf(value.field.normalized_weight() * value.norm);
            }
        }
        matched.then_some(total)
    }
}

fn field_values(meta: &ItemMeta) -> Vec<FieldValue> {
    SearchField::ALL
        .into_iter()
        .flat_map(|field| {
            field
                .values(meta)
                .into_iter()
                .filter(|text| !text.trim().is_empty())
                .map(move |text| FieldValue {
                    field,
                    text: text.to_lowercase(),
                    norm: field_norm(text),
                })
        })
        .collect()
}

/// Arrow-key movement through a result list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Next,
    Previous,
}

/// Id of the neighbour of `current` in `results`, wrapping at both ends.
///
/// With nothing selected (or a selection outside `results`), `Next` picks the
/// first item and `Previous` the last.
pub fn navigate<'a, R: AsRef<ItemMeta>>(
    results: &'a [R],
    current: Option<&ItemId>,
    direction: Direction,
) -> Option<&'a ItemId> {
    if results.is_empty() {
        return None;
    }
    let len = results.len();
    let position = current.and_then(|id| results.iter().position(|item| &item.as_ref().id == id));
    let next = match (direction, position) {
        (Direction::Next, Some(index)) => (index + 1) % len,
        (Direction::Next, None) => 0,
        (Direction::Previous, Some(index)) => (index + len - 1) % len,
        (Direction::Previous, None) => len - 1,
    };
    Some(&results[next].as_ref().id)
}
