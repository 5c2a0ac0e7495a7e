use crate::components::admin_nav::AdminNav;
use crate::components::fallback_image::FallbackImage;
use crate::components::field::{Select, TextArea, TextInput};
use crate::components::notice::ErrorBanner;
use crate::dom;
use crate::i18n::t;
use crate::net::{WebClient, use_client};
use gacha_core::views::CardEditor;
use gacha_core::views::editor::CardSubmission;
use gacha_core::{CardDraft, Element, PendingUpload, Rarity, parse_number_input};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

type Shared = Rc<RefCell<CardEditor>>;

fn reload(client: Rc<WebClient>, editor: Shared, redraw: UseForceUpdateHandle) {
    editor.borrow_mut().begin_load();
    wasm_bindgen_futures::spawn_local(async move {
        let result = client.fetch_cards().await;
        editor.borrow_mut().apply_load(result);
        redraw.force_update();
    });
}

fn revoke_released(editor: &Shared) {
    for url in editor.borrow_mut().take_released_previews() {
        dom::revoke_preview_url(&url);
    }
}

async fn send(client: &WebClient, submission: CardSubmission) -> gacha_core::ApiResult<()> {
    let upload = submission.upload.as_ref();
    match submission.id {
        Some(id) => client.update_card(id, &submission.card, upload).await,
        None => client.create_card(&submission.card, upload).await,
    }
}

#[function_component(AdminCardsPage)]
pub fn admin_cards_page() -> Html {
    let client = use_client();
    let editor: Shared = use_mut_ref(CardEditor::default);
    let redraw = use_force_update();

    {
        let client = client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |()| {
            reload(client, editor, redraw);
            || ()
        });
    }

    let edit_draft = |apply: fn(&mut CardDraft, String)| {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            if let Some(draft) = editor.borrow_mut().draft_mut() {
                apply(draft, value);
            }
            redraw.force_update();
        })
    };
    let on_name = edit_draft(|d, v| d.name = v);
    let on_description = edit_draft(|d, v| d.description = v);
    let on_attack = edit_draft(|d, v| d.attack = parse_number_input(&v));
    let on_defense = edit_draft(|d, v| d.defense = parse_number_input(&v));
    let on_cost = edit_draft(|d, v| d.cost = parse_number_input(&v));
    let on_rarity = edit_draft(|d, v| {
        if let Ok(rarity) = v.parse() {
            d.rarity = rarity;
        }
    });
    let on_element = edit_draft(|d, v| {
        if let Ok(element) = v.parse() {
            d.element = element;
        }
    });

    let on_file = {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                editor.borrow_mut().set_upload(None);
                revoke_released(&editor);
                redraw.force_update();
                return;
            };
            let editor = editor.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let bytes = match dom::read_file_bytes(&file).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        log::warn!("could not read {}: {}", file.name(), dom::js_error_message(&err));
                        return;
                    }
                };
                let preview_url = dom::preview_url(&file).unwrap_or_default();
                editor.borrow_mut().set_upload(Some(PendingUpload {
                    file_name: file.name(),
                    content_type: file.type_(),
                    bytes,
                    preview_url,
                }));
                revoke_released(&editor);
                redraw.force_update();
            });
        })
    };

    let on_create = {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            editor.borrow_mut().open_create();
            revoke_released(&editor);
            redraw.force_update();
        })
    };
    let on_cancel = {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            editor.borrow_mut().close();
            revoke_released(&editor);
            redraw.force_update();
        })
    };
    let on_submit = {
        let client = client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submission = editor.borrow_mut().submit();
            redraw.force_update();
            let Ok(Some(submission)) = submission else {
                return;
            };
            let client = client.clone();
            let editor = editor.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = send(&client, submission).await;
                let saved = editor.borrow_mut().apply_saved(result);
                revoke_released(&editor);
                redraw.force_update();
                if saved {
                    reload(client, editor, redraw);
                }
            });
        })
    };
    let on_edit = |card: gacha_core::Card| {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            editor.borrow_mut().open_edit(&card);
            revoke_released(&editor);
            redraw.force_update();
        })
    };
    let on_delete = |card_id: gacha_core::CardId| {
        let client = client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let pending = editor.borrow_mut().request_delete(card_id);
            if !dom::confirm(&t(pending.confirm_key())) {
                editor.borrow_mut().cancel_delete();
                return;
            }
            let Some(card_id) = editor.borrow_mut().confirm_delete() else {
                return;
            };
            let client = client.clone();
            let editor = editor.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.delete_card(card_id).await;
                let deleted = editor.borrow_mut().apply_deleted(result);
                redraw.force_update();
                if deleted {
                    reload(client, editor, redraw);
                }
            });
        })
    };

    let state = editor.borrow();
    if state.is_loading() && state.cards().is_empty() {
        return html! {
            <section class="admin">
                <AdminNav />
                <div class="loading">{ t("cardManager.loading") }</div>
            </section>
        };
    }

    let rarity_options: Vec<(AttrValue, AttrValue)> = Rarity::ALL
        .iter()
        .map(|r| (AttrValue::from(r.as_str()), AttrValue::from(t(&format!("cards.rarity.{}", r.as_str())))))
        .collect();
    let element_options: Vec<(AttrValue, AttrValue)> = Element::ALL
        .iter()
        .map(|e| (AttrValue::from(e.as_str()), AttrValue::from(t(&format!("cards.elements.{}", e.as_str())))))
        .collect();

    let form = state.draft().map(|draft| {
        let editing = draft.id.is_some();
        let preview = state.preview_url().map(|url| {
            if state.upload().is_some() {
                url.to_string()
            } else {
                client.asset_url(url)
            }
        });
        html! {
            <form class="card card-form" onsubmit={on_submit.clone()}>
                <h3>{ t(if editing { "cardManager.form.editTitle" } else { "cardManager.form.createTitle" }) }</h3>
                <div class="form-group">
                    <label for="card-name">{ t("cardManager.form.fields.name") }</label>
                    <TextInput id="card-name" value={draft.name.clone()} required=true oninput={on_name.clone()} />
                </div>
                <div class="form-group">
                    <label for="card-image">{ t("cardManager.form.fields.image") }</label>
                    <input id="card-image" type="file" accept="image/*" onchange={on_file.clone()} />
                    if let Some(src) = preview {
                        <div class="image-preview">
                            <span>{ t("cardManager.form.fields.imagePreview") }</span>
                            <FallbackImage src={src} alt={draft.name.clone()} />
                        </div>
                    }
                </div>
                <div class="form-group">
                    <label for="card-description">{ t("cardManager.form.fields.description") }</label>
                    <TextArea id="card-description" value={draft.description.clone()} oninput={on_description.clone()} />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="card-rarity">{ t("cardManager.form.fields.rarity") }</label>
                        <Select id="card-rarity" options={rarity_options.clone()} value={draft.rarity.as_str()} onchange={on_rarity.clone()} />
                    </div>
                    <div class="form-group">
                        <label for="card-element">{ t("cardManager.form.fields.element") }</label>
                        <Select id="card-element" options={element_options.clone()} value={draft.element.as_str()} onchange={on_element.clone()} />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="card-attack">{ t("cardManager.form.fields.attack") }</label>
                        <TextInput id="card-attack" input_type="number" value={draft.attack.to_string()} oninput={on_attack.clone()} />
                    </div>
                    <div class="form-group">
                        <label for="card-defense">{ t("cardManager.form.fields.defense") }</label>
                        <TextInput id="card-defense" input_type="number" value={draft.defense.to_string()} oninput={on_defense.clone()} />
                    </div>
                    <div class="form-group">
                        <label for="card-cost">{ t("cardManager.form.fields.cost") }</label>
                        <TextInput id="card-cost" input_type="number" value={draft.cost.to_string()} oninput={on_cost.clone()} />
                    </div>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel.clone()}>
                        { t("cardManager.form.buttons.cancel") }
                    </button>
                    <button type="submit" class="btn" disabled={state.is_saving()}>
                        { t(if editing { "cardManager.form.buttons.update" } else { "cardManager.form.buttons.create" }) }
                    </button>
                </div>
            </form>
        }
    });

    html! {
        <section class="admin">
            <AdminNav />
            <header class="admin-header">
                <h2>{ t("cardManager.title") }</h2>
                <button type="button" class="btn" onclick={on_create}>{ t("cardManager.add") }</button>
            </header>
            <ErrorBanner notice={state.error().cloned()} />
            { form.unwrap_or_default() }
            if state.cards().is_empty() {
                <p class="empty">{ t("cardManager.list.empty") }</p>
            } else {
                <table class="card-table">
                    <tbody>
                        { for state.cards().iter().map(|card| html! {
                            <tr key={card.id}>
                                <td class="thumb">
                                    <FallbackImage src={client.asset_url(card.image_url.as_deref().unwrap_or_default())} alt={card.name.clone()} />
                                </td>
                                <td>{ &card.name }</td>
                                <td>{ t(&format!("cards.rarity.{}", card.rarity.as_str())) }</td>
                                <td>{ t(&format!("cards.elements.{}", card.element.as_str())) }</td>
                                <td>{ format!("{} {}", t("cardManager.list.attack"), card.attack) }</td>
                                <td>{ format!("{} {}", t("cardManager.list.defense"), card.defense) }</td>
                                <td>{ format!("{} {}", t("cardManager.list.cost"), card.cost) }</td>
                                <td class="row-actions">
                                    <button type="button" class="btn btn-small" onclick={on_edit(card.clone())}>
                                        { t("cardManager.list.edit") }
                                    </button>
                                    <button type="button" class="btn btn-small btn-danger" onclick={on_delete(card.id)}>
                                        { t("cardManager.list.delete") }
                                    </button>
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </section>
    }
}
