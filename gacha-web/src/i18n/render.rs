use crate::i18n::bundle::with_bundle;
use crate::i18n::locales::FALLBACK_LANG;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Intl, Object};

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn host_plural_category(lang: &str, count: f64) -> String {
    // Vietnamese has no singular form.
    if lang != "vi" && (count - 1.0).abs() < f64::EPSILON {
        "one".to_string()
    } else {
        "other".to_string()
    }
}

fn plural_category(lang: &str, count: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let locales = {
            let arr = Array::new();
            arr.push(&wasm_bindgen::JsValue::from_str(lang));
            arr
        };
        let rules = Intl::PluralRules::new(&locales, &Object::new());
        rules
            .select(count)
            .as_string()
            .unwrap_or_else(|| host_plural_category(lang, count))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        host_plural_category(lang, count)
    }
}

/// Find `key` in `table`, preferring the `key_<category>` plural variants when a count is given.
fn lookup<'a>(table: &'a Value, lang: &str, key: &str, count: Option<f64>) -> Option<&'a Value> {
    if let Some(count) = count {
        let category = plural_category(lang, count);
        for suffix in [category.as_str(), "other"] {
            if let Some(value) = get_nested_value(table, &format!("{key}_{suffix}")) {
                return Some(value);
            }
        }
    }
    get_nested_value(table, key)
}

fn interpolate(mut text: String, args: Option<&BTreeMap<&str, &str>>) -> String {
    if let Some(args_map) = args {
        for (k, v) in args_map {
            let ph1 = format!("{{{{{k}}}}}");
            let ph2 = format!("{{{k}}}");
            text = text.replace(&ph1, v);
            text = text.replace(&ph2, v);
        }
    }
    text
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    match value {
        Value::String(s) => Some(interpolate(s.clone(), args)),
        _ => None,
    }
}

fn count_of(args: Option<&BTreeMap<&str, &str>>) -> Option<f64> {
    args.and_then(|m| m.get("count"))
        .and_then(|c| c.parse::<f64>().ok())
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let count = count_of(args);
    with_bundle(|bundle| {
        lookup(&bundle.translations, &bundle.lang, key, count)
            .and_then(|v| render_value(v, args))
            .or_else(|| {
                lookup(&bundle.fallback, FALLBACK_LANG, key, count)
                    .and_then(|v| render_value(v, args))
            })
    })
}

/// Translate a key to the current language
///
/// Falls back to English when the key is missing, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key with variable substitution
///
/// Variables in the translated string use the format `{{key}}` or `{key}`.
/// A numeric `count` argument selects the `_one`/`_other` variant of the key.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Translate a pluralised key with `count` as its only argument.
#[must_use]
pub fn tr_count(key: &str, count: usize) -> String {
    let count = count.to_string();
    let mut args = BTreeMap::new();
    args.insert("count", count.as_str());
    tr(key, Some(&args))
}

/// Translate a key whose value is a list of strings, such as bullet points.
#[must_use]
pub fn t_list(key: &str) -> Vec<String> {
    fn strings(value: &Value) -> Option<Vec<String>> {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(strings)
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(strings))
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn suffix_plural_selection() {
        let table = json!({
            "status": { "images_one": "{{count}} image", "images_other": "{{count}} images" }
        });
        let one = lookup(&table, "en", "status.images", Some(1.0)).unwrap();
        assert_eq!(one, "{{count}} image");
        let many = lookup(&table, "en", "status.images", Some(3.0)).unwrap();
        assert_eq!(many, "{{count}} images");
        let vi = lookup(&table, "vi", "status.images", Some(1.0)).unwrap();
        assert_eq!(vi, "{{count}} images");
    }

    #[test]
    fn plain_key_used_without_count() {
        let table = json!({ "a": { "b": "plain" } });
        assert_eq!(lookup(&table, "en", "a.b", Some(2.0)).unwrap(), "plain");
        assert!(lookup(&table, "en", "a.c", None).is_none());
    }

    #[test]
    fn interpolation_handles_braced_forms() {
        let value = Value::String("Hello, {name}! {{name}}!".into());
        let mut args = BTreeMap::new();
        args.insert("name", "Tester");
        let resolved = render_value(&value, Some(&args)).unwrap();
        assert_eq!(resolved, "Hello, Tester! Tester!");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        crate::i18n::set_lang("en");
        assert_eq!(t("no.such.key"), "no.such.key");
    }

    #[test]
    fn lists_resolve_from_bundle() {
        crate::i18n::set_lang("en");
        let items = t_list("battle.comingSoon.items");
        assert!(!items.is_empty());
        assert!(t_list("battle.title").is_empty());
    }

    #[test]
    fn count_helper_picks_variant() {
        crate::i18n::set_lang("en");
        assert_eq!(tr_count("common.status.imageCount", 1), "1 image");
        assert_eq!(tr_count("common.status.imageCount", 4), "4 images");
    }
}
