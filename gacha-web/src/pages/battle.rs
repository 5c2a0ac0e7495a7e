use crate::dom;
use crate::i18n::{t, t_list};
use gacha_core::views::{BattlePhase, BattleView};
use yew::prelude::*;

#[function_component(BattlePage)]
pub fn battle_page() -> Html {
    let view = use_state(BattleView::default);

    let on_find = {
        let view = view.clone();
        Callback::from(move |_| {
            let mut searching = *view;
            let Some(delay) = searching.start_search() else {
                return;
            };
            view.set(searching);
            let view = view.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = dom::sleep_ms(delay).await {
                    log::warn!("battle timer failed: {}", dom::js_error_message(&err));
                }
                let mut done = searching;
                done.finish_search();
                view.set(done);
                dom::alert(&t("battle.alert"));
                done.acknowledge();
                view.set(done);
            });
        })
    };

    let searching = view.phase() == BattlePhase::Searching;

    html! {
        <section class="battle">
            <h2>{ t("battle.title") }</h2>
            <div class="card battle-card">
                <h3>{ t("battle.pvpTitle") }</h3>
                <p class="pre-line">{ t("battle.description") }</p>
                <button type="button" class="btn btn-large" disabled={searching} onclick={on_find}>
                    { if searching { t("battle.button.searching") } else { t("battle.button.findMatch") } }
                </button>
            </div>
            <div class="card coming-soon">
                <h3>{ t("battle.comingSoon.title") }</h3>
                <ul>
                    { for t_list("battle.comingSoon.items").into_iter().map(|item| html! { <li>{ item }</li> }) }
                </ul>
            </div>
        </section>
    }
}
