use crate::components::card_tile::CardTile;
use crate::components::collection_list::CollectionList;
use crate::components::field::{Select, TextInput};
use crate::components::notice::ErrorBanner;
use crate::i18n::{t, tr, tr_count};
use crate::net::use_client;
use gacha_core::views::{CollectionSearch, CollectionView, GalleryBrowser};
use gacha_core::{CardFilter, SortKey, User};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CollectionPageProps {
    pub user: User,
}

fn filter_label(filter: CardFilter, view: &CollectionView) -> String {
    let counts = view.counts();
    match filter {
        CardFilter::All => tr_count("collection.filters.all", counts.total),
        CardFilter::Owned => tr_count("collection.filters.owned", counts.owned),
        CardFilter::Missing => tr_count("collection.filters.missing", counts.missing),
        CardFilter::Rarity(rarity) => {
            t(&format!("collection.filters.rarities.{}", rarity.as_str()))
        }
    }
}

#[function_component(CollectionPage)]
pub fn collection_page(props: &CollectionPageProps) -> Html {
    let client = use_client();
    let view = use_mut_ref(CollectionView::new);
    let browser = use_mut_ref(GalleryBrowser::default);
    let search = use_mut_ref(CollectionSearch::default);
    let redraw = use_force_update();

    {
        let client = client.clone();
        let view = view.clone();
        let redraw = redraw.clone();
        use_effect_with(props.user.id, move |user_id| {
            let user_id = *user_id;
            view.borrow_mut().begin_load();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.fetch_owned_and_all(user_id).await;
                view.borrow_mut().apply_load(result);
                redraw.force_update();
            });
            || ()
        });
    }

    let on_filter = |filter: CardFilter| {
        let view = view.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            view.borrow_mut().set_filter(filter);
            redraw.force_update();
        })
    };
    let on_sort = {
        let view = view.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            if let Ok(sort) = value.parse::<SortKey>() {
                view.borrow_mut().set_sort(sort);
                redraw.force_update();
            }
        })
    };
    let on_search = {
        let view = view.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            view.borrow_mut().set_search(value);
            redraw.force_update();
        })
    };
    let on_pick_card = {
        let client = client.clone();
        let browser = browser.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            let card = browser.borrow_mut().select(value.parse().ok());
            redraw.force_update();
            if let Some(card) = card {
                let client = client.clone();
                let browser = browser.clone();
                let redraw = redraw.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = client.collections_for_card(card).await;
                    browser.borrow_mut().apply_collections(card, result);
                    redraw.force_update();
                });
            }
        })
    };
    let on_query = {
        let search = search.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            search.borrow_mut().query = value;
            redraw.force_update();
        })
    };
    let on_search_collections = {
        let client = client.clone();
        let search = search.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = search.borrow_mut().submit();
            redraw.force_update();
            if let Some(name) = name {
                let client = client.clone();
                let search = search.clone();
                let redraw = redraw.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = client.search_collections(&name).await;
                    search.borrow_mut().apply_results(result);
                    redraw.force_update();
                });
            }
        })
    };
    let resolve_image = {
        let client = client.clone();
        Callback::from(move |url: String| client.asset_url(&url))
    };

    let mut state = view.borrow_mut();
    if state.is_loading() && state.catalogue().is_empty() {
        return html! { <div class="loading">{ t("collection.loading") }</div> };
    }

    let query = state.query().clone();
    let sort_options: Vec<(AttrValue, AttrValue)> = SortKey::ALL
        .iter()
        .map(|key| {
            (
                AttrValue::from(key.as_str()),
                AttrValue::from(t(&format!("collection.sort.{}", key.as_str()))),
            )
        })
        .collect();
    let filter_buttons = CardFilter::CHOICES
        .iter()
        .map(|filter| {
            let active = query.filter == *filter;
            html! {
                <button type="button" class={classes!("btn", "filter-btn", active.then_some("active"))}
                    aria-pressed={active.to_string()} onclick={on_filter(*filter)}>
                    { filter_label(*filter, &state) }
                </button>
            }
        })
        .collect::<Html>();
    let card_options: Vec<(AttrValue, AttrValue)> = state
        .catalogue()
        .iter()
        .map(|card| (AttrValue::from(card.id.to_string()), AttrValue::from(card.name.clone())))
        .collect();
    let owned = state.owned_set().clone();
    let visible = state.visible().to_vec();
    let shown = visible.len().to_string();
    let mut showing = BTreeMap::new();
    showing.insert("count", shown.as_str());

    let browser = browser.borrow();
    let search = search.borrow();

    html! {
        <section class="collection">
            <h2>{ t("collection.title") }</h2>
            <ErrorBanner notice={state.error().cloned()} />
            <div class="collection-controls">
                <div class="filter-group" role="group" aria-label={t("collection.filters.label")}>
                    { filter_buttons }
                </div>
                <label class="sort-group">
                    <span>{ t("collection.sort.label") }</span>
                    <Select options={sort_options} value={query.sort.as_str()} onchange={on_sort} />
                </label>
                <TextInput value={query.search.clone()} placeholder={t("collection.search.filterPlaceholder")}
                    oninput={on_search} />
            </div>
            <p class="showing">{ tr("collection.showing", Some(&showing)) }</p>
            if visible.is_empty() {
                <p class="empty">{ t("collection.empty") }</p>
            } else {
                <div class="card-grid">
                    { for visible.iter().map(|card| html! {
                        <CardTile key={card.id} card={card.clone()} owned={owned.contains(card.id)}
                            image_src={resolve_image.emit(card.image_url.clone().unwrap_or_default())} />
                    }) }
                </div>
            }

            <section class="card explore">
                <h3>{ t("collection.explore.title") }</h3>
                <label for="explore-card">{ t("collection.explore.selectLabel") }</label>
                <Select id="explore-card" options={card_options}
                    value={browser.selected().map(|id| id.to_string()).unwrap_or_default()}
                    placeholder={t("collection.explore.placeholder")} onchange={on_pick_card} />
                <ErrorBanner notice={browser.error().cloned()} />
                if browser.is_loading() {
                    <p class="loading">{ t("collection.explore.loading") }</p>
                } else if browser.selected().is_some() && browser.error().is_none() && browser.collections().is_empty() {
                    <p class="empty">{ t("collection.explore.none") }</p>
                } else {
                    <CollectionList collections={browser.collections().to_vec()} resolve_image={resolve_image.clone()} />
                }
            </section>

            <section class="card collection-search">
                <h3>{ t("collection.search.title") }</h3>
                <form class="search-form" onsubmit={on_search_collections}>
                    <TextInput value={search.query.clone()} placeholder={t("collection.search.placeholder")}
                        oninput={on_query} />
                    <button type="submit" class="btn" disabled={search.is_searching()}>
                        { if search.is_searching() { t("collection.search.searching") } else { t("collection.search.button") } }
                    </button>
                </form>
                <ErrorBanner notice={search.error().cloned()} />
                if search.is_empty_result() {
                    <p class="empty">{ t("collection.search.noResults") }</p>
                }
                <CollectionList collections={search.results().to_vec()} resolve_image={resolve_image}
                    keys="collection.search" />
            </section>
        </section>
    }
}
