use super::Notice;
use crate::api::ApiResult;
use crate::model::{Card, CardId};
use crate::pipeline::{
    CardFilter, CollectionCounts, OwnedSet, SortKey, ViewCache, ViewQuery, counts,
};

/// The player's collection page: owned cards against the whole catalogue.
#[derive(Debug, Clone, Default)]
pub struct CollectionView {
    loading: bool,
    owned: Vec<Card>,
    catalogue: Vec<Card>,
    owned_set: OwnedSet,
    revision: u64,
    query: ViewQuery,
    error: Option<Notice>,
    cache: ViewCache,
}

impl CollectionView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply the joined owned/catalogue load. A failure keeps whatever was shown before.
    pub fn apply_load(&mut self, result: ApiResult<(Vec<Card>, Vec<Card>)>) {
        self.loading = false;
        match result {
            Ok((owned, catalogue)) => {
                self.owned_set = OwnedSet::from_cards(&owned);
                self.owned = owned;
                self.catalogue = catalogue;
                self.revision += 1;
                self.error = None;
            }
            Err(err) => {
                log::warn!("collection load failed: {err}");
                self.error = Some(Notice::key("collection.errors.load"));
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn query(&self) -> &ViewQuery {
        &self.query
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn catalogue(&self) -> &[Card] {
        &self.catalogue
    }

    #[must_use]
    pub fn owned_cards(&self) -> &[Card] {
        &self.owned
    }

    pub fn set_filter(&mut self, filter: CardFilter) {
        self.query.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    #[must_use]
    pub fn is_owned(&self, id: CardId) -> bool {
        self.owned_set.contains(id)
    }

    #[must_use]
    pub fn owned_set(&self) -> &OwnedSet {
        &self.owned_set
    }

    #[must_use]
    pub fn counts(&self) -> CollectionCounts {
        counts(&self.catalogue, &self.owned_set)
    }

    /// Cards to render for the current filter, sort and search.
    pub fn visible(&mut self) -> &[Card] {
        self.cache
            .get(self.revision, &self.catalogue, &self.owned_set, &self.query)
    }
}
