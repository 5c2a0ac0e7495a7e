use crate::app::session::{SessionAction, use_session};
use crate::components::field::TextInput;
use crate::components::notice::ErrorBanner;
use crate::i18n::t;
use crate::net::use_client;
use gacha_core::{AuthDraft, AuthMode, Notice};
use yew::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let draft = use_state(AuthDraft::default);
    let error = use_state(|| None::<Notice>);
    let working = use_state(|| false);
    let session = use_session();
    let client = use_client();

    let set_field = |apply: fn(&mut AuthDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            apply(&mut next, value);
            draft.set(next);
        })
    };
    let on_username = set_field(|d, v| d.username = v);
    let on_email = set_field(|d, v| d.email = v);
    let on_password = set_field(|d, v| d.password = v);

    let on_toggle = {
        let draft = draft.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let mut next = (*draft).clone();
            next.mode = next.mode.toggled();
            draft.set(next);
            error.set(None);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let working = working.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *working {
                return;
            }
            let credentials = match draft.validate() {
                Ok(credentials) => credentials,
                Err(err) => {
                    error.set(Some(Notice::from_validation(err)));
                    return;
                }
            };
            let mode = draft.mode;
            let client = client.clone();
            let session = session.clone();
            let error = error.clone();
            let working = working.clone();
            working.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match mode {
                    AuthMode::Login => client.login(&credentials).await,
                    AuthMode::Register => client.register(&credentials).await,
                };
                working.set(false);
                match result {
                    Ok(user) => {
                        if let Some(session) = session {
                            session.dispatch(SessionAction::Login(user));
                        }
                    }
                    Err(err) => {
                        log::warn!("authentication failed: {err}");
                        error.set(Some(Notice::from_api(&err, "auth.error")));
                    }
                }
            });
        })
    };

    let registering = draft.mode == AuthMode::Register;
    let (title, submit, toggle_prompt, toggle_action) = if registering {
        (
            "auth.registerTitle",
            "auth.submitRegister",
            "auth.toggleHaveAccount",
            "auth.toggleSignIn",
        )
    } else {
        (
            "auth.signInTitle",
            "auth.submitSignIn",
            "auth.toggleNeedAccount",
            "auth.toggleRegister",
        )
    };

    html! {
        <div class="auth-layout">
            <div class="form">
                <h2>{ t(title) }</h2>
                <ErrorBanner notice={(*error).clone()} />
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="username">{ t("auth.usernameLabel") }</label>
                        <TextInput id="username" value={draft.username.clone()} required=true
                            placeholder={t("auth.usernamePlaceholder")} oninput={on_username} />
                    </div>
                    if registering {
                        <div class="form-group">
                            <label for="email">{ t("auth.emailLabel") }</label>
                            <TextInput id="email" input_type="email" value={draft.email.clone()} required=true
                                placeholder={t("auth.emailPlaceholder")} oninput={on_email} />
                        </div>
                    }
                    <div class="form-group">
                        <label for="password">{ t("auth.passwordLabel") }</label>
                        <TextInput id="password" input_type="password" value={draft.password.clone()} required=true
                            placeholder={t("auth.passwordPlaceholder")} oninput={on_password} />
                    </div>
                    <button type="submit" class="btn btn-large" disabled={*working}>
                        { if *working { t("auth.working") } else { t(submit) } }
                    </button>
                </form>
                <p class="auth-toggle">
                    { t(toggle_prompt) }
                    <button type="button" class="link-button" onclick={on_toggle}>{ t(toggle_action) }</button>
                </p>
            </div>
        </div>
    }
}
