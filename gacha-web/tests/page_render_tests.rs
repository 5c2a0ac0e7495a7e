use futures::executor::block_on;
use gacha_core::views::GachaView;
use gacha_core::{
    Card, Currency, Element, GachaResult, GuardState, MemoryStorage, Notice, PullKind, PullType,
    Rarity, User,
};
use gacha_web::app::routing::render_route;
use gacha_web::app::AppShell;
use gacha_web::components::card_tile::{CardTile, Props as CardTileProps};
use gacha_web::components::notice::{ErrorBanner, Props as ErrorBannerProps};
use gacha_web::pages::battle::BattlePage;
use gacha_web::pages::gacha::{PullResults, PullResultsProps};
use gacha_web::router::Route;
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, History, MemoryHistory};
use yew_router::Router;

fn player() -> User {
    User {
        id: 7,
        username: "mai".into(),
        email: Some("mai@example.com".into()),
        coins: 1_250,
        gems: 12,
        experience_points: 340,
        level: 3,
        created_at: None,
    }
}

fn sample_card() -> Card {
    Card {
        id: 11,
        name: "Sakura".into(),
        description: None,
        attack: 7,
        defense: 4,
        cost: 3,
        rarity: Rarity::Epic,
        element: Element::Fire,
        image_url: Some("/uploads/sakura.png".into()),
    }
}

#[derive(Properties, PartialEq, Clone)]
struct HarnessProps {
    route: Route,
    guard: GuardState,
    user: Option<User>,
}

/// Route switch output for a fixed session state, under an in-memory router.
#[function_component(Harness)]
fn harness(p: &HarnessProps) -> Html {
    let history = AnyHistory::from(MemoryHistory::new());
    history.push(p.route.to_path());
    html! {
        <Router {history}>
            { render_route(&p.route, p.guard, p.user.as_ref()) }
        </Router>
    }
}

fn render(route: Route, guard: GuardState, user: Option<User>) -> String {
    gacha_web::i18n::set_lang("en");
    block_on(
        LocalServerRenderer::<Harness>::with_props(HarnessProps { route, guard, user }).render(),
    )
}

#[test]
fn login_route_renders_sign_in_form_for_anonymous_players() {
    let html = render(Route::Login, GuardState::Unauthenticated, None);
    assert!(html.contains("Sign in"));
    assert!(html.contains("Need an account?"));
    assert!(html.contains("id=\"username\""));
    assert!(!html.contains("id=\"email\""));
}

#[test]
fn protected_routes_wait_for_the_session() {
    let html = render(Route::Gacha, GuardState::Loading, None);
    assert!(html.contains("Checking your session..."));
    assert!(!html.contains("Gacha System"));
}

#[test]
fn anonymous_player_sees_nothing_of_protected_pages() {
    let html = render(Route::Dashboard, GuardState::Unauthenticated, None);
    assert!(!html.contains("Welcome back"));
    assert!(!html.contains("Log out"));
}

#[test]
fn dashboard_greets_player_inside_layout() {
    let html = render(Route::Dashboard, GuardState::Authenticated, Some(player()));
    assert!(html.contains("Welcome back, mai!"));
    assert!(html.contains("Level 3 - 340 EXP"));
    assert!(html.contains("Log out"));
    assert!(html.contains("id=\"main\""));
    assert!(html.contains("Go to Gacha"));
}

#[test]
fn gacha_page_prices_both_pull_sizes() {
    let html = render(Route::Gacha, GuardState::Authenticated, Some(player()));
    assert!(html.contains("Gacha System"));
    assert!(html.contains("100 Coins"));
    assert!(html.contains("900 Coins"));
    assert!(html.contains("1 Gem"));
    assert!(html.contains("9 Gems"));
    assert!(html.contains("Ten pull guarantees at least one Rare card"));
}

#[test]
fn admin_pages_show_loading_and_navigation() {
    let html = render(Route::AdminCards, GuardState::Authenticated, Some(player()));
    assert!(html.contains("Loading cards..."));
    assert!(html.contains("Gallery Manager"));

    let html = render(Route::AdminGalleries, GuardState::Authenticated, Some(player()));
    assert!(html.contains("Gallery Management"));
    assert!(html.contains("Select a card to see its collections."));
}

#[test]
fn unknown_path_renders_not_found() {
    let html = render(Route::NotFound, GuardState::Loading, None);
    assert!(html.contains("Page not found"));
    assert!(html.contains("Return to dashboard"));
}

#[test]
fn battle_page_lists_upcoming_features() {
    gacha_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<BattlePage>::new().render());
    assert!(html.contains("Find a Match"));
    assert!(html.contains("Ranking system"));
}

#[test]
fn shell_shows_placeholder_before_session_is_read() {
    gacha_web::i18n::set_lang("en");
    #[function_component(Shell)]
    fn shell() -> Html {
        let history = AnyHistory::from(MemoryHistory::new());
        history.push("/collection");
        html! {
            <Router {history}>
                <AppShell storage={MemoryStorage::default()} />
            </Router>
        }
    }
    let html = block_on(LocalServerRenderer::<Shell>::new().render());
    assert!(html.contains("Checking your session..."));
}

#[test]
fn card_tile_marks_locked_cards() {
    gacha_web::i18n::set_lang("en");
    let owned = CardTileProps {
        card: sample_card(),
        image_src: "http://localhost:5000/uploads/sakura.png".into(),
        owned: true,
    };
    let html = block_on(LocalServerRenderer::<CardTile>::with_props(owned.clone()).render());
    assert!(html.contains("Sakura"));
    assert!(html.contains("ATK 7"));
    assert!(html.contains("Epic"));
    assert!(html.contains("Fire"));
    assert!(!html.contains("Locked"));

    let locked = CardTileProps {
        owned: false,
        ..owned
    };
    let html = block_on(LocalServerRenderer::<CardTile>::with_props(locked).render());
    assert!(html.contains("locked"));
    assert!(html.contains("Locked"));
}

#[test]
fn error_banner_renders_only_with_a_notice() {
    gacha_web::i18n::set_lang("en");
    let html = block_on(
        LocalServerRenderer::<ErrorBanner>::with_props(ErrorBannerProps {
            notice: Some(Notice::key("gacha.errors.generic")),
        })
        .render(),
    );
    assert!(html.contains("Something went wrong while running gacha."));

    let html = block_on(
        LocalServerRenderer::<ErrorBanner>::with_props(ErrorBannerProps { notice: None }).render(),
    );
    assert!(!html.contains("error-message"));
}

#[derive(Properties, PartialEq, Clone)]
struct ResultsHarnessProps {
    result: GachaResult,
}

#[function_component(ResultsHarness)]
fn results_harness(p: &ResultsHarnessProps) -> Html {
    let history = AnyHistory::from(MemoryHistory::new());
    history.push("/gacha");
    html! {
        <Router {history}>
            <PullResults result={p.result.clone()} on_again={Callback::noop()} />
        </Router>
    }
}

#[test]
fn ten_pull_renders_every_drawn_card_and_new_balances() {
    gacha_web::i18n::set_lang("en");
    let drawn: Vec<Card> = (0..10)
        .map(|i| Card {
            id: 100 + i,
            name: format!("Pull{i}"),
            rarity: if i == 9 { Rarity::Rare } else { Rarity::Common },
            ..sample_card()
        })
        .collect();

    let mut view = GachaView::new(player());
    let plan = view.plan(PullKind::Ten, Currency::Coins).unwrap();
    assert_eq!(plan.cost, 900);
    let updated = view
        .apply_result(Ok(GachaResult {
            cards: drawn,
            pull_type: PullType::TenCoin,
            total_cost: 900,
            remaining_coins: 350,
            remaining_gems: 12,
        }))
        .unwrap();
    assert_eq!(updated.coins, 350);

    let result = view.last_result().cloned().unwrap();
    let html = block_on(
        LocalServerRenderer::<ResultsHarness>::with_props(ResultsHarnessProps { result }).render(),
    );
    assert_eq!(html.matches("class=\"card-tile").count(), 10);
    assert_eq!(html.matches("rarity-common").count(), 9);
    assert_eq!(html.matches("rarity-rare").count(), 1);
    assert!(html.contains(Rarity::Rare.color()));
    assert!(html.contains("You pulled 10 new cards!"));
    assert!(html.contains("Cost: 900 coins"));
    assert!(html.contains("Remaining: 350 coins | 12 gems"));
}
