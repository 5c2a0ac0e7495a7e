use crate::components::language_switcher::LanguageSwitcher;
use crate::i18n::{fmt_number, t, tr};
use crate::router::{NAV_ROUTES, Route};
use gacha_core::User;
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub user: User,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let current = use_route::<Route>();
    let on_logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let level = p.user.level.to_string();
    let mut who = BTreeMap::new();
    who.insert("level", level.as_str());
    who.insert("username", p.user.username.as_str());

    html! {
        <header role="banner" class="navbar">
            <h1>{ t("header.title") }</h1>
            <nav class="nav-links" aria-label={t("header.title")}>
                { for NAV_ROUTES.iter().map(|(route, key)| {
                    let active = current.as_ref() == Some(route);
                    html! {
                        <Link<Route> to={route.clone()} classes={classes!(active.then_some("active"))}>
                            { t(key) }
                        </Link<Route>>
                    }
                }) }
            </nav>
            <div class="user-info">
                <div class="currency">
                    <span class="coins">{ format!("💰 {}", fmt_number(p.user.coins)) }</span>
                    <span class="gems">{ format!("💎 {}", fmt_number(p.user.gems)) }</span>
                </div>
                <span class="player">{ tr("header.level", Some(&who)) }</span>
                <LanguageSwitcher />
                <button type="button" class="btn" onclick={on_logout}>{ t("header.logout") }</button>
            </div>
        </header>
    }
}
