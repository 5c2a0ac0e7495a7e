use gacha_core::{GuardDecision, GuardState};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/collection")]
    Collection,
    #[at("/gacha")]
    Gacha,
    #[at("/battle")]
    Battle,
    #[at("/admin/cards")]
    AdminCards,
    #[at("/admin/galleries")]
    AdminGalleries,
    #[at("/404")]
    #[not_found]
    NotFound,
}

/// Main navigation entries, in header order, with their label keys.
pub const NAV_ROUTES: [(Route, &str); 4] = [
    (Route::Dashboard, "nav.dashboard"),
    (Route::Collection, "nav.collection"),
    (Route::Gacha, "nav.gacha"),
    (Route::Battle, "nav.battle"),
];

impl Route {
    /// Routes that need a signed-in player.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Root | Self::Login | Self::NotFound)
    }

    /// What to do with this route given the session's guard state.
    #[must_use]
    pub const fn decision(&self, guard: GuardState) -> GuardDecision {
        match self {
            Self::Root => GuardDecision::RedirectToDashboard,
            Self::NotFound => GuardDecision::Render,
            Self::Login => guard.public_only(),
            _ => guard.protected(),
        }
    }
}
