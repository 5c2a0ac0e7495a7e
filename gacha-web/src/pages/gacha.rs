use crate::app::session::{SessionAction, use_session};
use crate::components::card_tile::CardTile;
use crate::components::notice::ErrorBanner;
use crate::i18n::{fmt_number, t, t_list, tr, tr_count};
use crate::net::use_client;
use crate::router::Route;
use gacha_core::views::GachaView;
use gacha_core::{Currency, GachaResult, PullKind, User};
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GachaPageProps {
    pub user: User,
}

fn coin_button(kind: PullKind) -> String {
    let amount = fmt_number(kind.cost(Currency::Coins));
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    tr(&format!("gacha.{}.coinButton", kind.endpoint()), Some(&args))
}

fn gem_button(kind: PullKind) -> String {
    let gems = usize::try_from(kind.cost(Currency::Gems)).unwrap_or_default();
    tr_count(&format!("gacha.{}.gemButton", kind.endpoint()), gems)
}

#[derive(Properties, PartialEq, Clone)]
pub struct PullResultsProps {
    pub result: GachaResult,
    pub on_again: Callback<MouseEvent>,
}

/// Drawn cards with the cost and the balances left afterwards.
#[function_component(PullResults)]
pub fn pull_results(p: &PullResultsProps) -> Html {
    let client = use_client();
    let result = &p.result;
    let amount = fmt_number(result.total_cost);
    let currency = if result.pull_type.currency().uses_gems() {
        t("gacha.currency.gemName")
    } else {
        t("gacha.currency.coinName")
    };
    let coins = fmt_number(result.remaining_coins);
    let gems = fmt_number(result.remaining_gems);
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    args.insert("currency", currency.as_str());
    args.insert("coins", coins.as_str());
    args.insert("gems", gems.as_str());

    html! {
        <section class="gacha-results">
            <h2>{ t("gacha.results.title") }</h2>
            <p>{ tr_count("gacha.results.summary", result.cards.len()) }</p>
            <p>{ tr("gacha.results.cost", Some(&args)) }</p>
            <p>{ tr("gacha.results.remaining", Some(&args)) }</p>
            <div class="card-grid">
                { for result.cards.iter().enumerate().map(|(i, card)| html! {
                    <CardTile key={i} card={card.clone()}
                        image_src={client.asset_url(card.image_url.as_deref().unwrap_or_default())} />
                }) }
            </div>
            <div class="result-actions">
                <button type="button" class="btn btn-large" onclick={p.on_again.clone()}>{ t("gacha.results.pullAgain") }</button>
                <Link<Route> to={Route::Collection} classes="btn btn-large">{ t("gacha.results.viewCollection") }</Link<Route>>
            </div>
        </section>
    }
}

#[function_component(GachaPage)]
pub fn gacha_page(props: &GachaPageProps) -> Html {
    let client = use_client();
    let session = use_session();
    let view = use_mut_ref(|| GachaView::new(props.user.clone()));
    let redraw = use_force_update();

    {
        let view = view.clone();
        use_effect_with(props.user.clone(), move |user| {
            view.borrow_mut().refresh_user(user.clone());
            || ()
        });
    }

    let on_pull = |kind: PullKind, currency: Currency| {
        let client = client.clone();
        let session = session.clone();
        let view = view.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let plan = view.borrow_mut().plan(kind, currency);
            redraw.force_update();
            let Some(plan) = plan else {
                return;
            };
            let user_id = view.borrow().user().id;
            let client = client.clone();
            let session = session.clone();
            let view = view.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.pull(user_id, plan.kind, plan.currency).await;
                let updated = view.borrow_mut().apply_result(result);
                if let (Some(user), Some(session)) = (updated, session) {
                    session.dispatch(SessionAction::Update(user));
                }
                redraw.force_update();
            });
        })
    };
    let on_again = {
        let view = view.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            view.borrow_mut().dismiss_result();
            redraw.force_update();
        })
    };

    let state = view.borrow();
    let busy = state.is_busy();
    let user = state.user();

    if let Some(result) = state.last_result() {
        return html! { <PullResults result={result.clone()} on_again={on_again} /> };
    }

    let coins = fmt_number(user.coins);
    let gems = fmt_number(user.gems);
    let mut coin_args = BTreeMap::new();
    coin_args.insert("amount", coins.as_str());
    let mut gem_args = BTreeMap::new();
    gem_args.insert("amount", gems.as_str());

    let pull_panel = |kind: PullKind, class: &'static str| {
        let key = kind.endpoint();
        html! {
            <div class={classes!("card", "pull-panel", class)}>
                <h3>{ t(&format!("gacha.{key}.title")) }</h3>
                <p>{ t(&format!("gacha.{key}.description")) }</p>
                <div class="pull-buttons">
                    <button type="button" class="btn btn-large" disabled={busy}
                        onclick={on_pull(kind, Currency::Coins)}>
                        { if busy { t("gacha.buttons.processing") } else { coin_button(kind) } }
                    </button>
                    <button type="button" class="btn btn-large btn-warning" disabled={busy}
                        onclick={on_pull(kind, Currency::Gems)}>
                        { if busy { t("gacha.buttons.processing") } else { gem_button(kind) } }
                    </button>
                </div>
                if kind == PullKind::Ten {
                    <p class="savings">{ format!("{} · {}", t("gacha.ten.coinSavings"), t("gacha.ten.gemSavings")) }</p>
                }
            </div>
        }
    };

    html! {
        <section class="gacha">
            <h2>{ t("gacha.title") }</h2>
            <div class="currency">
                <span>{ tr("gacha.currency.coinsLabel", Some(&coin_args)) }</span>
                <span>{ tr("gacha.currency.gemsLabel", Some(&gem_args)) }</span>
            </div>
            <ErrorBanner notice={state.error().cloned()} />
            <div class="pull-grid">
                { pull_panel(PullKind::Single, "single") }
                { pull_panel(PullKind::Ten, "ten") }
            </div>
            <div class="card rewards">
                <h3>{ t("gacha.rewards.title") }</h3>
                <ul>
                    { for t_list("gacha.rewards.points").into_iter().map(|point| html! { <li>{ point }</li> }) }
                </ul>
            </div>
        </section>
    }
}
