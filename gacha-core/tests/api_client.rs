use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::executor::block_on;
use gacha_core::views::{CollectionView, GachaView, GalleryBrowser};
use gacha_core::{
    ApiError, ApiRequest, ApiResponse, ApiTransport, AuthDraft, AuthMode, CardDraft, Currency,
    GachaClient, HttpMethod, MemoryStorage, Notice, PendingUpload, PullKind, RequestBody,
    SessionStore, User,
};
use serde_json::json;

/// Answers by (method, url). Unknown routes fail like a dropped connection.
#[derive(Default)]
struct ScriptedTransport {
    routes: HashMap<(HttpMethod, String), Result<ApiResponse, ApiError>>,
    seen: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn on(mut self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) -> Self {
        self.routes.insert(
            (method, url.to_string()),
            Ok(ApiResponse::new(status, body.to_string())),
        );
        self
    }

    fn offline(mut self, method: HttpMethod, url: &str) -> Self {
        self.routes.insert(
            (method, url.to_string()),
            Err(ApiError::Transport("connection refused".into())),
        );
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.seen.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method, request.url.clone());
        self.seen.borrow_mut().push(request);
        self.routes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Transport(format!("no route for {}", key.1))))
    }
}

const BASE: &str = "http://localhost:8080";

fn user_json(coins: i64, gems: i64) -> serde_json::Value {
    json!({
        "id": 1, "username": "mika", "email": "mika@example.com",
        "coins": coins, "gems": gems, "experiencePoints": 40, "level": 2,
        "createdAt": "2024-05-01T10:00:00"
    })
}

fn card_json(id: i64, name: &str, rarity: &str) -> serde_json::Value {
    json!({
        "id": id, "name": name, "description": "",
        "attack": 3, "defense": 2, "cost": 1,
        "rarity": rarity, "element": "WATER", "imageUrl": null
    })
}

fn player(coins: i64, gems: i64) -> User {
    serde_json::from_value(user_json(coins, gems)).unwrap()
}

#[test]
fn login_stores_user_and_survives_reload() {
    let transport =
        ScriptedTransport::default().on(HttpMethod::Post, &format!("{BASE}/api/users/login"), 200, user_json(500, 5));
    let client = GachaClient::new(transport, BASE);
    let draft = AuthDraft {
        mode: AuthMode::Login,
        username: "mika".into(),
        password: "pw".into(),
        ..AuthDraft::default()
    };
    let user = block_on(client.login(&draft.validate().unwrap())).unwrap();

    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.login(user).unwrap();

    let reloaded = SessionStore::restore(storage);
    assert_eq!(reloaded.user().map(|u| u.username.as_str()), Some("mika"));

    let sent = client.transport().requests();
    assert_eq!(
        sent[0].body,
        RequestBody::Json(r#"{"username":"mika","password":"pw"}"#.into())
    );
}

#[test]
fn rejected_login_surfaces_backend_text() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Post,
        &format!("{BASE}/api/users/login"),
        401,
        json!({"error": "Invalid username or password"}),
    );
    let client = GachaClient::new(transport, BASE);
    let creds = AuthDraft {
        username: "mika".into(),
        password: "wrong".into(),
        ..AuthDraft::default()
    }
    .validate()
    .unwrap();
    let err = block_on(client.login(&creds)).unwrap_err();
    assert_eq!(
        Notice::from_api(&err, "auth.error"),
        Notice::Text("Invalid username or password".into())
    );
}

#[test]
fn unaffordable_single_pull_sends_nothing() {
    let client = GachaClient::new(ScriptedTransport::default(), BASE);
    let mut view = GachaView::new(player(50, 0));
    let plan = view.plan(PullKind::Single, Currency::Coins);
    assert!(plan.is_none());
    assert!(client.transport().requests().is_empty());
    let message = view
        .error()
        .unwrap()
        .render(|key, args| format!("{key} {args:?}"));
    assert!(message.contains("100"));
}

#[test]
fn ten_pull_returns_ten_cards_and_updates_balances() {
    let cards: Vec<_> = (1..=10).map(|i| card_json(i, &format!("C{i}"), "COMMON")).collect();
    let transport = ScriptedTransport::default().on(
        HttpMethod::Post,
        &format!("{BASE}/api/gacha/ten/1?useGems=false"),
        200,
        json!({
            "cards": cards, "totalCost": 900, "pullType": "TEN_COIN",
            "remainingCoins": 100, "remainingGems": 3
        }),
    );
    let client = GachaClient::new(transport, BASE);
    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.login(player(1_000, 3)).unwrap();

    let mut view = GachaView::new(player(1_000, 3));
    let plan = view.plan(PullKind::Ten, Currency::Coins).unwrap();
    let result = block_on(client.pull(1, plan.kind, plan.currency));
    let updated = view.apply_result(result).unwrap();
    store.update_user(updated).unwrap();

    assert_eq!(view.last_result().unwrap().cards.len(), 10);
    assert_eq!(view.user().coins, 100);
    let reloaded = SessionStore::restore(storage);
    assert_eq!(reloaded.user().unwrap().coins, 100);
    assert_eq!(reloaded.user().unwrap().gems, 3);
}

#[test]
fn collection_load_is_all_or_nothing() {
    let ok = ScriptedTransport::default()
        .on(
            HttpMethod::Get,
            &format!("{BASE}/api/cards/user/1"),
            200,
            json!([card_json(2, "Bea", "RARE")]),
        )
        .on(
            HttpMethod::Get,
            &format!("{BASE}/api/cards"),
            200,
            json!([card_json(1, "Aya", "COMMON"), card_json(2, "Bea", "RARE")]),
        );
    let client = GachaClient::new(ok, BASE);
    let mut view = CollectionView::new();
    view.apply_load(block_on(client.fetch_owned_and_all(1)));
    assert_eq!(view.counts().total, 2);
    assert_eq!(view.counts().owned, 1);

    let half = ScriptedTransport::default()
        .on(
            HttpMethod::Get,
            &format!("{BASE}/api/cards/user/1"),
            200,
            json!([card_json(2, "Bea", "RARE")]),
        )
        .offline(HttpMethod::Get, &format!("{BASE}/api/cards"));
    let client = GachaClient::new(half, BASE);
    let result = block_on(client.fetch_owned_and_all(1));
    assert!(matches!(result, Err(ApiError::Transport(_))));
    view.apply_load(result);
    assert_eq!(view.counts().total, 2);
    assert!(view.error().is_some());
}

#[test]
fn collections_error_clears_list() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Get,
        &format!("{BASE}/api/cards/7/collections"),
        500,
        json!({"status": 500, "error": "Internal Server Error", "message": "boom", "path": "/api/cards/7/collections"}),
    );
    let client = GachaClient::new(transport, BASE);
    let mut browser = GalleryBrowser::default();
    let card = browser.select(Some(7)).unwrap();
    browser.apply_collections(card, block_on(client.collections_for_card(card)));
    assert!(browser.collections().is_empty());
    assert!(browser.error().is_some());
}

#[test]
fn collections_with_null_lists_decode() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Get,
        &format!("{BASE}/api/collections?name=Beach%20Day"),
        200,
        json!([{
            "id": 3, "cardId": 7, "name": "Beach Day", "description": null,
            "images": [{"id": 1, "collectionId": 3, "imageUrl": "/uploads/a.png",
                        "title": null, "description": null, "orderIndex": 0, "dialogues": null}]
        }]),
    );
    let client = GachaClient::new(transport, BASE);
    let found = block_on(client.search_collections(" Beach Day ")).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].images[0].dialogues.is_empty());
    assert_eq!(
        client.asset_url(&found[0].images[0].image_url),
        "http://localhost:8080/uploads/a.png"
    );
}

#[test]
fn card_update_without_file_keeps_image_url_part() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Put,
        &format!("{BASE}/api/cards/4"),
        200,
        card_json(4, "Yui", "EPIC"),
    );
    let client = GachaClient::new(transport, BASE);
    let draft = CardDraft {
        id: Some(4),
        name: "Yui".into(),
        existing_image_url: Some("/uploads/yui.png".into()),
        ..CardDraft::default()
    };
    block_on(client.update_card(4, &draft.validate(false).unwrap(), None)).unwrap();

    let sent = client.transport().requests();
    let RequestBody::Multipart(parts) = &sent[0].body else {
        panic!("card update must be multipart");
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "card");
    assert_eq!(parts[0].content_type, "application/json");
    let card: serde_json::Value = serde_json::from_slice(&parts[0].bytes).unwrap();
    assert_eq!(card["imageUrl"], "/uploads/yui.png");
}

#[test]
fn card_create_with_file_sends_two_parts() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Post,
        &format!("{BASE}/api/cards"),
        201,
        card_json(9, "Nene", "COMMON"),
    );
    let client = GachaClient::new(transport, BASE);
    let draft = CardDraft {
        name: "Nene".into(),
        ..CardDraft::default()
    };
    let upload = PendingUpload {
        file_name: "nene.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, 0x50],
        preview_url: "blob:x".into(),
    };
    block_on(client.create_card(&draft.validate(true).unwrap(), Some(&upload))).unwrap();

    let sent = client.transport().requests();
    let RequestBody::Multipart(parts) = &sent[0].body else {
        panic!("card create must be multipart");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].name, "file");
    assert_eq!(parts[1].file_name.as_deref(), Some("nene.png"));
    let card: serde_json::Value = serde_json::from_slice(&parts[0].bytes).unwrap();
    assert!(card.get("imageUrl").is_none());
}

#[test]
fn malformed_body_is_a_decode_error() {
    let transport = ScriptedTransport::default().on(
        HttpMethod::Get,
        &format!("{BASE}/api/users/1"),
        200,
        json!({"unexpected": true}),
    );
    let client = GachaClient::new(transport, format!("{BASE}/"));
    assert!(matches!(
        block_on(client.fetch_user(1)),
        Err(ApiError::Decode(_))
    ));
}

#[test]
fn dialogue_and_delete_routes() {
    let transport = ScriptedTransport::default()
        .on(
            HttpMethod::Get,
            &format!("{BASE}/api/images/5/dialogues"),
            200,
            json!([{"id": 1, "imageId": 5, "text": "Hi", "speaker": "Yui", "orderIndex": 0}]),
        )
        .on(HttpMethod::Delete, &format!("{BASE}/api/dialogues/1"), 204, json!(null))
        .on(HttpMethod::Delete, &format!("{BASE}/api/collections/3"), 204, json!(null));
    let client = GachaClient::new(transport, BASE);
    let dialogues = block_on(client.dialogues_for_image(5)).unwrap();
    assert_eq!(dialogues[0].speaker, "Yui");
    block_on(client.delete_dialogue(1)).unwrap();
    block_on(client.delete_collection(3)).unwrap();
    let methods: Vec<_> = client
        .transport()
        .requests()
        .iter()
        .map(|r| r.method)
        .collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Get, HttpMethod::Delete, HttpMethod::Delete]
    );
}
