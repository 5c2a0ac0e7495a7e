//! Derived card views: filter, then sort, then name search.
//!
//! The pipeline never mutates its source. Ownership is looked up through an
//! [`OwnedSet`] built once per load and shared by the filter and the
//! per-card "locked" badge.
use crate::model::{Card, CardId, Rarity};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardFilter {
    #[default]
    All,
    Owned,
    Missing,
    Rarity(Rarity),
}

impl CardFilter {
    pub const CHOICES: [Self; 7] = [
        Self::All,
        Self::Owned,
        Self::Missing,
        Self::Rarity(Rarity::Common),
        Self::Rarity(Rarity::Rare),
        Self::Rarity(Rarity::Epic),
        Self::Rarity(Rarity::Legendary),
    ];

    #[must_use]
    pub fn matches(self, card: &Card, owned: &OwnedSet) -> bool {
        match self {
            Self::All => true,
            Self::Owned => owned.contains(card.id),
            Self::Missing => !owned.contains(card.id),
            Self::Rarity(rarity) => card.rarity == rarity,
        }
    }

    /// Value used by `<select>` options and the CLI `--filter` flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Missing => "missing",
            Self::Rarity(rarity) => rarity.as_str(),
        }
    }
}

impl fmt::Display for CardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardFilter {
    type Err = crate::model::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "owned" => Ok(Self::Owned),
            "missing" | "not_owned" => Ok(Self::Missing),
            other => other.parse::<Rarity>().map(Self::Rarity).map_err(|_| {
                crate::model::UnknownVariant {
                    kind: "filter",
                    value: s.to_string(),
                }
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Name,
    Attack,
    Defense,
    Cost,
    Rarity,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Attack,
        Self::Defense,
        Self::Cost,
        Self::Rarity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::Cost => "cost",
            Self::Rarity => "rarity",
        }
    }

    /// Stable in-place sort. Equal keys keep their incoming order.
    pub fn sort(self, cards: &mut [Card]) {
        match self {
            Self::Name => cards.sort_by_cached_key(|c| c.name.to_lowercase()),
            Self::Attack => cards.sort_by(|a, b| b.attack.cmp(&a.attack)),
            Self::Defense => cards.sort_by(|a, b| b.defense.cmp(&a.defense)),
            Self::Cost => cards.sort_by_key(|c| c.cost),
            Self::Rarity => cards.sort_by(|a, b| b.rarity.cmp(&a.rarity)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = crate::model::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::model::UnknownVariant {
                kind: "sort",
                value: s.to_string(),
            })
    }
}

/// Ids of the cards the player owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnedSet(HashSet<CardId>);

impl OwnedSet {
    #[must_use]
    pub fn from_cards(owned: &[Card]) -> Self {
        Self(owned.iter().map(|c| c.id).collect())
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Case-insensitive substring match on the card name. Blank queries match everything.
#[must_use]
pub fn name_matches(card: &Card, query: &str) -> bool {
    let needle = query.trim();
    needle.is_empty() || card.name.to_lowercase().contains(&needle.to_lowercase())
}

/// Everything that selects a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ViewQuery {
    pub filter: CardFilter,
    pub sort: SortKey,
    pub search: String,
}

/// Run filter → sort → search over `catalogue`.
#[must_use]
pub fn derive_view(catalogue: &[Card], owned: &OwnedSet, query: &ViewQuery) -> Vec<Card> {
    let mut cards: Vec<Card> = catalogue
        .iter()
        .filter(|card| query.filter.matches(card, owned))
        .cloned()
        .collect();
    query.sort.sort(&mut cards);
    cards.retain(|card| name_matches(card, &query.search));
    cards
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionCounts {
    pub total: usize,
    pub owned: usize,
    pub missing: usize,
}

/// Counts over the catalogue. `owned + missing == total` always holds.
#[must_use]
pub fn counts(catalogue: &[Card], owned: &OwnedSet) -> CollectionCounts {
    let owned_count = catalogue.iter().filter(|c| owned.contains(c.id)).count();
    CollectionCounts {
        total: catalogue.len(),
        owned: owned_count,
        missing: catalogue.len() - owned_count,
    }
}

/// Memoized derived view, recomputed only when the source revision or the query changes.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    key: Option<(u64, ViewQuery)>,
    cards: Vec<Card>,
}

impl ViewCache {
    pub fn get(
        &mut self,
        revision: u64,
        catalogue: &[Card],
        owned: &OwnedSet,
        query: &ViewQuery,
    ) -> &[Card] {
        let fresh = matches!(&self.key, Some((rev, q)) if *rev == revision && q == query);
        if !fresh {
            self.cards = derive_view(catalogue, owned, query);
            self.key = Some((revision, query.clone()));
        }
        &self.cards
    }

    #[must_use]
    pub fn is_warm_for(&self, revision: u64, query: &ViewQuery) -> bool {
        matches!(&self.key, Some((rev, q)) if *rev == revision && q == query)
    }
}
