use super::Notice;
use crate::api::ApiResult;
use crate::model::{CardId, CollectionSummary};

/// Read-only explorer: pick a card, see its curated collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryBrowser {
    selected: Option<CardId>,
    loading: bool,
    collections: Vec<CollectionSummary>,
    error: Option<Notice>,
}

impl GalleryBrowser {
    /// Select a card (or clear the selection). Returns the card whose
    /// collections should now be fetched.
    pub fn select(&mut self, card: Option<CardId>) -> Option<CardId> {
        self.selected = card;
        self.collections.clear();
        self.error = None;
        self.loading = card.is_some();
        card
    }

    /// Apply a fetch for `card`. Results for a card that is no longer selected are dropped.
    pub fn apply_collections(&mut self, card: CardId, result: ApiResult<Vec<CollectionSummary>>) {
        if self.selected != Some(card) {
            log::debug!("dropping collections for deselected card {card}");
            return;
        }
        self.loading = false;
        match result {
            Ok(collections) => {
                self.collections = collections;
                self.error = None;
            }
            Err(err) => {
                log::warn!("collections for card {card} failed: {err}");
                self.collections.clear();
                self.error = Some(Notice::key("collection.explore.error"));
            }
        }
    }

    #[must_use]
    pub const fn selected(&self) -> Option<CardId> {
        self.selected
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn collections(&self) -> &[CollectionSummary] {
        &self.collections
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }
}

/// Search collections by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSearch {
    pub query: String,
    searching: bool,
    searched: bool,
    results: Vec<CollectionSummary>,
    error: Option<Notice>,
}

impl CollectionSearch {
    /// Validate the query. Returns the trimmed name to search for, or
    /// records a validation message and returns `None`.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.query.trim();
        if name.is_empty() {
            self.error = Some(Notice::key("collection.search.validation"));
            self.results.clear();
            self.searched = false;
            return None;
        }
        self.error = None;
        self.searching = true;
        Some(name.to_string())
    }

    pub fn apply_results(&mut self, result: ApiResult<Vec<CollectionSummary>>) {
        self.searching = false;
        self.searched = true;
        match result {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                log::warn!("collection search failed: {err}");
                self.results.clear();
                self.error = Some(Notice::key("collection.search.error"));
            }
        }
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    #[must_use]
    pub fn results(&self) -> &[CollectionSummary] {
        &self.results
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// A search completed successfully and found nothing.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.searched && self.error.is_none() && self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn summary(id: i64, card_id: CardId) -> CollectionSummary {
        CollectionSummary {
            id,
            card_id,
            name: format!("Set {id}"),
            description: None,
            images: Vec::new(),
        }
    }

    #[test]
    fn fetch_error_clears_collections() {
        let mut browser = GalleryBrowser::default();
        browser.select(Some(5));
        browser.apply_collections(5, Ok(vec![summary(1, 5)]));
        assert_eq!(browser.collections().len(), 1);

        browser.select(Some(5));
        browser.apply_collections(5, Err(ApiError::Transport("down".into())));
        assert!(browser.collections().is_empty());
        assert_eq!(
            browser.error().and_then(Notice::key_name),
            Some("collection.explore.error")
        );
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut browser = GalleryBrowser::default();
        browser.select(Some(1));
        browser.select(Some(2));
        browser.apply_collections(1, Ok(vec![summary(9, 1)]));
        assert!(browser.collections().is_empty());
        assert!(browser.is_loading());
    }

    #[test]
    fn blank_search_is_rejected_locally() {
        let mut search = CollectionSearch {
            query: "   ".into(),
            ..CollectionSearch::default()
        };
        assert_eq!(search.submit(), None);
        assert_eq!(
            search.error().and_then(Notice::key_name),
            Some("collection.search.validation")
        );

        search.query = " Beach ".into();
        assert_eq!(search.submit().as_deref(), Some("Beach"));
        assert!(search.is_searching());
        search.apply_results(Ok(Vec::new()));
        assert!(search.is_empty_result());
    }

    #[test]
    fn failed_search_clears_results() {
        let mut search = CollectionSearch {
            query: "x".into(),
            ..CollectionSearch::default()
        };
        search.submit();
        search.apply_results(Ok(vec![summary(1, 1)]));
        search.submit();
        search.apply_results(Err(ApiError::Status {
            status: 500,
            message: None,
        }));
        assert!(search.results().is_empty());
        assert!(!search.is_empty_result());
    }
}
