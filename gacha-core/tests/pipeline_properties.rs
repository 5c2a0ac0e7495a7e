use gacha_core::pipeline::{counts, name_matches};
use gacha_core::{
    Card, CardFilter, Element, OwnedSet, Rarity, SortKey, ViewQuery, derive_view,
};

/// Deterministic catalogue with repeated stats so ties are common.
fn catalogue(size: i64) -> Vec<Card> {
    (0..size)
        .map(|i| Card {
            id: i + 1,
            name: format!("{}{}", ["aki", "Bell", "chi", "Dana"][(i % 4) as usize], i % 5),
            description: None,
            attack: (i * 7 % 5) as i32 + 1,
            defense: (i * 3 % 4) as i32,
            cost: (i % 3) as i32 + 1,
            rarity: Rarity::ALL[(i * 5 % 4) as usize],
            element: Element::ALL[(i % 6) as usize],
            image_url: None,
        })
        .collect()
}

fn owned_subset(all: &[Card]) -> Vec<Card> {
    all.iter().filter(|c| c.id % 3 == 0).cloned().collect()
}

#[test]
fn filter_result_is_exact_subset() {
    let all = catalogue(40);
    let owned = OwnedSet::from_cards(&owned_subset(&all));
    for filter in CardFilter::CHOICES {
        let query = ViewQuery {
            filter,
            ..ViewQuery::default()
        };
        let view = derive_view(&all, &owned, &query);
        assert!(view.iter().all(|c| all.contains(c)));
        assert!(view.iter().all(|c| filter.matches(c, &owned)));
        let expected = all.iter().filter(|c| filter.matches(c, &owned)).count();
        assert_eq!(view.len(), expected, "filter {filter}");
    }
}

#[test]
fn sorting_twice_is_idempotent() {
    let all = catalogue(40);
    for key in SortKey::ALL {
        let mut once = all.clone();
        key.sort(&mut once);
        let mut twice = once.clone();
        key.sort(&mut twice);
        assert_eq!(once, twice, "sort {key}");
    }
}

#[test]
fn sort_orders_hold_pairwise() {
    let all = catalogue(40);
    let mut by_cost = all.clone();
    SortKey::Cost.sort(&mut by_cost);
    assert!(by_cost.windows(2).all(|w| w[0].cost <= w[1].cost));

    let mut by_defense = all.clone();
    SortKey::Defense.sort(&mut by_defense);
    assert!(by_defense.windows(2).all(|w| w[0].defense >= w[1].defense));

    let mut by_rarity = all;
    SortKey::Rarity.sort(&mut by_rarity);
    assert!(by_rarity.windows(2).all(|w| w[0].rarity >= w[1].rarity));
}

#[test]
fn ties_keep_filter_order() {
    let all = catalogue(40);
    let mut sorted = all.clone();
    SortKey::Cost.sort(&mut sorted);
    for pair in sorted.windows(2) {
        if pair[0].cost == pair[1].cost {
            assert!(pair[0].id < pair[1].id);
        }
    }
}

#[test]
fn owned_plus_missing_is_total() {
    for size in [0, 1, 7, 40] {
        let all = catalogue(size);
        let mut owned_cards = owned_subset(&all);
        // Owned cards the catalogue no longer lists must not skew the counts.
        owned_cards.push(Card {
            id: 10_000,
            ..catalogue(1).remove(0)
        });
        let owned = OwnedSet::from_cards(&owned_cards);
        let c = counts(&all, &owned);
        assert_eq!(c.owned + c.missing, c.total);
        assert_eq!(c.total, all.len());
    }
}

#[test]
fn rarity_sort_example() {
    let mut cards: Vec<Card> = [
        Rarity::Common,
        Rarity::Legendary,
        Rarity::Rare,
        Rarity::Epic,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, rarity)| Card {
        id: i as i64,
        rarity,
        ..catalogue(1).remove(0)
    })
    .collect();
    SortKey::Rarity.sort(&mut cards);
    let order: Vec<_> = cards.iter().map(|c| c.rarity).collect();
    assert_eq!(
        order,
        vec![Rarity::Legendary, Rarity::Epic, Rarity::Rare, Rarity::Common]
    );
}

#[test]
fn search_runs_after_filter_and_sort() {
    let all = catalogue(40);
    let owned = OwnedSet::from_cards(&owned_subset(&all));
    let query = ViewQuery {
        filter: CardFilter::Owned,
        sort: SortKey::Attack,
        search: "BELL".into(),
    };
    let view = derive_view(&all, &owned, &query);
    assert!(!view.is_empty());
    assert!(view.iter().all(|c| owned.contains(c.id) && name_matches(c, "bell")));
    assert!(view.windows(2).all(|w| w[0].attack >= w[1].attack));
}
