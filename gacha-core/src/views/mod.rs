//! Per-page state machines.
//!
//! Each view owns its loading flag, data and error message. Pages drive them
//! from async callbacks; the CLI and tests drive them directly.
pub mod battle;
pub mod collection;
pub mod editor;
pub mod gacha;
pub mod gallery;

pub use battle::{BattlePhase, BattleView};
pub use collection::CollectionView;
pub use editor::{CardEditor, EditorMode, GalleryEditor, PendingDeletion};
pub use gacha::GachaView;
pub use gallery::{CollectionSearch, GalleryBrowser};

use crate::api::ApiError;
use crate::forms::ValidationError;

/// A user-facing message: a translation key with arguments, or text the backend sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Key {
        key: &'static str,
        args: Vec<(&'static str, NoticeArg)>,
    },
    Text(String),
}

/// Interpolation value. `Key` values are translated before substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeArg {
    Text(String),
    Key(&'static str),
}

impl From<String> for NoticeArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Notice {
    #[must_use]
    pub const fn key(key: &'static str) -> Self {
        Self::Key {
            key,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I>(key: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, NoticeArg)>,
    {
        Self::Key {
            key,
            args: args.into_iter().collect(),
        }
    }

    /// The backend's own message when it sent one, else the translated fallback.
    #[must_use]
    pub fn from_api(err: &ApiError, fallback: &'static str) -> Self {
        err.backend_message()
            .map_or_else(|| Self::key(fallback), |msg| Self::Text(msg.to_string()))
    }

    /// Message for a form that failed validation.
    #[must_use]
    pub fn from_validation(err: ValidationError) -> Self {
        let key = err.i18n_key();
        match err {
            ValidationError::CardNameTooLong { max } => {
                Self::with_args(key, [("max", NoticeArg::Text(max.to_string()))])
            }
            ValidationError::AttackTooLow { min }
            | ValidationError::DefenseTooLow { min }
            | ValidationError::CostTooLow { min } => {
                Self::with_args(key, [("min", NoticeArg::Text(min.to_string()))])
            }
            _ => Self::key(key),
        }
    }

    /// Translation key, if this notice is keyed.
    #[must_use]
    pub const fn key_name(&self) -> Option<&'static str> {
        match self {
            Self::Key { key, .. } => Some(key),
            Self::Text(_) => None,
        }
    }

    /// Render with a caller-supplied translator.
    pub fn render<F>(&self, translate: F) -> String
    where
        F: FnOnce(&'static str, &[(&'static str, NoticeArg)]) -> String,
    {
        match self {
            Self::Key { key, args } => translate(key, args),
            Self::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_text_wins_over_fallback() {
        let err = ApiError::from_status(401, r#"{"error":"Invalid password"}"#);
        assert_eq!(
            Notice::from_api(&err, "auth.error"),
            Notice::Text("Invalid password".into())
        );
        let silent = ApiError::Transport("offline".into());
        assert_eq!(
            Notice::from_api(&silent, "auth.error").key_name(),
            Some("auth.error")
        );
    }

    #[test]
    fn handler_error_shows_detail_not_reason_phrase() {
        let body = r#"{"status":404,"error":"Not Found","message":"Card not found with id 9","path":"/api/cards/9"}"#;
        let err = ApiError::from_status(404, body);
        assert_eq!(
            Notice::from_api(&err, "cardManager.errors.delete"),
            Notice::Text("Card not found with id 9".into())
        );
    }

    #[test]
    fn render_uses_translator_for_keys() {
        let notice = Notice::with_args("gacha.errors.notEnough", [("cost", "100".to_string().into())]);
        let text = notice.render(|key, args| match &args[0].1 {
            NoticeArg::Text(v) => format!("{key}:{v}"),
            NoticeArg::Key(k) => format!("{key}:{k}"),
        });
        assert_eq!(text, "gacha.errors.notEnough:100");
    }

    #[test]
    fn validation_limits_become_arguments() {
        let notice = Notice::from_validation(ValidationError::CardNameTooLong { max: 100 });
        assert_eq!(
            notice,
            Notice::with_args(
                "cardManager.errors.nameTooLong",
                [("max", NoticeArg::Text("100".into()))]
            )
        );
    }
}
