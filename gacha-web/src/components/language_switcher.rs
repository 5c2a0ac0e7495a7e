use crate::app::lang::LangContext;
use crate::i18n::{current_lang, locales, set_lang, t};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[function_component(LanguageSwitcher)]
pub fn language_switcher() -> Html {
    let ctx = use_context::<LangContext>();
    let current = ctx
        .as_ref()
        .map_or_else(current_lang, |c| c.lang.to_string());

    let on_change = Callback::from(move |e: web_sys::Event| {
        if let Some(sel) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            match &ctx {
                Some(ctx) => ctx.set.emit(sel.value()),
                None => set_lang(&sel.value()),
            }
        }
    });

    html! {
        <label class="language-switcher">
            <span>{ t("language.label") }</span>
            <select onchange={on_change} aria-label={t("language.label")}>
                { for locales().iter().map(|meta| html! {
                    <option value={meta.code} selected={meta.code == current}>
                        { t(meta.label_key) }
                    </option>
                }) }
            </select>
        </label>
    }
}
