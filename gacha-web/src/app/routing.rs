use crate::app::layout::AppLayout;
use crate::i18n::t;
use crate::pages::{
    admin_cards::AdminCardsPage, admin_galleries::AdminGalleriesPage, battle::BattlePage,
    collection::CollectionPage, dashboard::DashboardPage, gacha::GachaPage, login::LoginPage,
    not_found::NotFound,
};
use crate::router::Route;
use gacha_core::{GuardDecision, GuardState, User};
use yew::prelude::*;
use yew_router::prelude::*;

fn checking_session() -> Html {
    html! {
        <div class="loading" role="status" aria-live="polite">{ t("route.checking") }</div>
    }
}

fn page_for(route: &Route, user: &User) -> Html {
    let user = user.clone();
    let page = match route {
        Route::Dashboard => html! { <DashboardPage user={user.clone()} /> },
        Route::Collection => html! { <CollectionPage user={user.clone()} /> },
        Route::Gacha => html! { <GachaPage user={user.clone()} /> },
        Route::Battle => html! { <BattlePage /> },
        Route::AdminCards => html! { <AdminCardsPage /> },
        Route::AdminGalleries => html! { <AdminGalleriesPage /> },
        Route::Root | Route::Login | Route::NotFound => Html::default(),
    };
    html! { <AppLayout {user}>{ page }</AppLayout> }
}

/// Render `route` for the session's current state.
#[must_use]
pub fn render_route(route: &Route, guard: GuardState, user: Option<&User>) -> Html {
    match route.decision(guard) {
        GuardDecision::Placeholder => checking_session(),
        GuardDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        GuardDecision::RedirectToDashboard => {
            html! { <Redirect<Route> to={Route::Dashboard} /> }
        }
        GuardDecision::Render => match (route, user) {
            (Route::Login, _) => html! { <LoginPage /> },
            (Route::NotFound, _) => html! { <NotFound /> },
            (_, Some(user)) => page_for(route, user),
            (_, None) => html! { <Redirect<Route> to={Route::Login} /> },
        },
    }
}
