use crate::i18n::{t, tr};
use gacha_core::{Notice, NoticeArg};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Translate a view's message into the active language.
#[must_use]
pub fn notice_text(notice: &Notice) -> String {
    notice.render(|key, args| {
        let values: Vec<(&str, String)> = args
            .iter()
            .map(|(name, arg)| match arg {
                NoticeArg::Text(text) => (*name, text.clone()),
                NoticeArg::Key(key) => (*name, t(key)),
            })
            .collect();
        let map: BTreeMap<&str, &str> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
        tr(key, Some(&map))
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notice: Option<Notice>,
}

/// Inline error line; renders nothing when there is no message.
#[function_component(ErrorBanner)]
pub fn error_banner(p: &Props) -> Html {
    match &p.notice {
        Some(notice) => html! {
            <div class="error-message" role="alert">{ notice_text(notice) }</div>
        },
        None => Html::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_keys_are_translated_before_substitution() {
        crate::i18n::set_lang("en");
        let notice = Notice::with_args(
            "gacha.errors.notEnough",
            [
                ("currency", NoticeArg::Key("gacha.currency.coinName")),
                ("cost", NoticeArg::Text("100".into())),
            ],
        );
        assert_eq!(notice_text(&notice), "Not enough coins. You need 100.");
    }

    #[test]
    fn backend_text_is_shown_verbatim() {
        assert_eq!(notice_text(&Notice::Text("Username taken".into())), "Username taken");
    }
}
