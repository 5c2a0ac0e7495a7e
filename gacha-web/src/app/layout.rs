use crate::app::session::{SessionAction, use_session};
use crate::components::header::Header;
use crate::net::use_client;
use gacha_core::User;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppLayoutProps {
    pub user: User,
    #[prop_or_default]
    pub children: Html,
}

/// Header plus page body for signed-in routes. Refreshes the player's
/// balances once per user on mount.
#[function_component(AppLayout)]
pub fn app_layout(props: &AppLayoutProps) -> Html {
    let session = use_session();
    let client = use_client();

    {
        let session = session.clone();
        use_effect_with(props.user.id, move |user_id| {
            let user_id = *user_id;
            wasm_bindgen_futures::spawn_local(async move {
                match client.fetch_user(user_id).await {
                    Ok(user) => {
                        if let Some(session) = session {
                            session.dispatch(SessionAction::Update(user));
                        }
                    }
                    Err(err) => log::warn!("profile refresh failed: {err}"),
                }
            });
            || ()
        });
    }

    let on_logout = Callback::from(move |()| {
        if let Some(session) = &session {
            session.dispatch(SessionAction::Logout);
        }
    });

    html! {
        <div class="app-layout">
            <Header user={props.user.clone()} {on_logout} />
            <main id="main" class="main-content">
                { props.children.clone() }
            </main>
        </div>
    }
}
