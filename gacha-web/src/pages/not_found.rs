use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Shown for any path the router does not know.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    let navigator = use_navigator();
    let go_back = Callback::from(move |_| {
        if let Some(nav) = &navigator {
            nav.back();
        }
    });

    html! {
        <section class="panel not-found" aria-live="assertive">
            <div class="not-found-emoji" aria-hidden="true">{ t("notFound.emoji") }</div>
            <h1>{ t("notFound.title") }</h1>
            <p class="pre-line">{ t("notFound.description") }</p>
            <div class="not-found-actions">
                <Link<Route> to={Route::Dashboard} classes="btn">{ t("notFound.home") }</Link<Route>>
                <button type="button" class="btn btn-secondary" onclick={go_back}>
                    { t("notFound.back") }
                </button>
            </div>
        </section>
    }
}
