pub mod lang;
pub mod layout;
pub mod routing;
pub mod session;

use crate::i18n::{current_lang, set_lang};
use crate::router::Route;
use crate::storage::AppStorage;
use lang::LangContext;
use session::{SessionAction, SessionContext, SessionState};
use yew::prelude::*;
use yew_router::prelude::*;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppShell />
        </BrowserRouter>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppShellProps {
    /// Where the session lives; the browser profile unless a test supplies one.
    #[prop_or_default]
    pub storage: AppStorage,
}

/// Session and language providers around the route switch. Needs a router above it.
#[function_component(AppShell)]
pub fn app_shell(props: &AppShellProps) -> Html {
    let session: SessionContext = {
        let storage = props.storage.clone();
        use_reducer(move || SessionState::new(storage))
    };
    {
        let session = session.clone();
        use_effect_with((), move |()| {
            session.dispatch(SessionAction::Init);
            || ()
        });
    }

    let lang = use_state(|| AttrValue::from(current_lang()));
    let lang_ctx = {
        let lang = lang.clone();
        LangContext {
            lang: (*lang).clone(),
            set: Callback::from(move |code: String| {
                set_lang(&code);
                lang.set(AttrValue::from(current_lang()));
            }),
        }
    };

    let render = {
        let session = session.clone();
        move |route: Route| routing::render_route(&route, session.guard_state(), session.user())
    };

    html! {
        <ContextProvider<LangContext> context={lang_ctx}>
            <ContextProvider<SessionContext> context={session}>
                <div class="App">
                    <Switch<Route> render={render} />
                </div>
            </ContextProvider<SessionContext>>
        </ContextProvider<LangContext>>
    }
}
