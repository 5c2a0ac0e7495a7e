#![cfg(target_arch = "wasm32")]

use gacha_core::{SessionStorage, SessionStore, User};
use gacha_web::dom;
use gacha_web::storage::LocalStorage;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn player() -> User {
    User {
        id: 2,
        username: "linh".into(),
        email: None,
        coins: 300,
        gems: 1,
        experience_points: 0,
        level: 1,
        created_at: None,
    }
}

#[wasm_bindgen_test]
fn set_lang_updates_document_and_storage() {
    gacha_web::i18n::set_lang("en");
    let doc = dom::document().expect("document");
    let root = doc.document_element().expect("html element");
    assert_eq!(root.get_attribute("lang").as_deref(), Some("en"));
    let saved = LocalStorage
        .read(gacha_core::constants::LANGUAGE_STORAGE_KEY)
        .expect("read language");
    assert_eq!(saved.as_deref(), Some("en"));
}

#[wasm_bindgen_test]
fn session_survives_a_reload() {
    let mut store = SessionStore::new(LocalStorage);
    store.init();
    store.login(player()).expect("login persists");

    let restored = SessionStore::restore(LocalStorage);
    assert_eq!(restored.user().map(|u| u.username.as_str()), Some("linh"));

    let mut store = restored;
    store.logout().expect("logout persists");
    assert!(SessionStore::restore(LocalStorage).user().is_none());
}

#[wasm_bindgen_test]
async fn sleep_resolves() {
    dom::sleep_ms(5).await.expect("timer fires");
}
