use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(AdminNav)]
pub fn admin_nav() -> Html {
    let current = use_route::<Route>();
    let link = |route: Route, key: &str| {
        let active = current.as_ref() == Some(&route);
        html! {
            <Link<Route> to={route} classes={classes!("admin-link", active.then_some("active"))}>
                { t(key) }
            </Link<Route>>
        }
    };

    html! {
        <nav class="admin-nav">
            { link(Route::AdminCards, "admin.nav.cardManager") }
            { link(Route::AdminGalleries, "admin.nav.galleryManager") }
        </nav>
    }
}
