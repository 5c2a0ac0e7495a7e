use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    /// Translation key of the language's display name.
    pub label_key: &'static str,
}

/// Language shown before the player picks one.
pub const DEFAULT_LANG: &str = "vi";
/// Language consulted when a key is missing from the active one.
pub const FALLBACK_LANG: &str = "en";

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "en",
        label_key: "language.english",
    },
    LocaleMeta {
        code: "vi",
        label_key: "language.vietnamese",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../../i18n/en.json")),
    ("vi", include_str!("../../i18n/vi.json")),
];

/// Supported locales in switcher order.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

/// Parse the bundled table for `lang`. Returns `None` for unknown codes.
pub fn load_translations(lang: &str) -> Option<Value> {
    let data = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;

    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("translation table {lang} is malformed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_locale_has_a_table() {
        for meta in locales() {
            let table = load_translations(meta.code);
            assert!(table.is_some_and(|v| v.is_object()), "{}", meta.code);
        }
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(!is_supported("xx"));
        assert!(load_translations("xx").is_none());
        assert!(is_supported(DEFAULT_LANG));
    }
}
