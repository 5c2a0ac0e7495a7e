use crate::components::admin_nav::AdminNav;
use crate::components::fallback_image::FallbackImage;
use crate::components::field::{Select, TextArea, TextInput};
use crate::components::notice::ErrorBanner;
use crate::dom;
use crate::i18n::{t, tr_count};
use crate::net::{WebClient, use_client};
use gacha_core::views::editor::GallerySubmission;
use gacha_core::views::{GalleryEditor, PendingDeletion};
use gacha_core::{
    ApiResult, CardId, CollectionImage, CollectionSummary, Dialogue, Draft, parse_number_input,
};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

type Shared = Rc<RefCell<GalleryEditor>>;

fn load_collections(
    client: Rc<WebClient>,
    editor: Shared,
    redraw: UseForceUpdateHandle,
    card: CardId,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = client.collections_for_card(card).await;
        editor.borrow_mut().apply_collections(card, result);
        redraw.force_update();
    });
}

async fn send(client: &WebClient, submission: GallerySubmission) -> ApiResult<()> {
    match submission {
        GallerySubmission::CreateCollection(p) => client.create_collection(&p).await,
        GallerySubmission::UpdateCollection(id, p) => client.update_collection(id, &p).await,
        GallerySubmission::CreateImage(p) => client.create_image(&p).await,
        GallerySubmission::UpdateImage(id, p) => client.update_image(id, &p).await,
        GallerySubmission::CreateDialogue(p) => client.create_dialogue(&p).await,
        GallerySubmission::UpdateDialogue(id, p) => client.update_dialogue(id, &p).await,
    }
}

async fn remove(client: &WebClient, target: PendingDeletion) -> ApiResult<()> {
    match target {
        PendingDeletion::Card(id) => client.delete_card(id).await,
        PendingDeletion::Collection(id) => client.delete_collection(id).await,
        PendingDeletion::Image(id) => client.delete_image(id).await,
        PendingDeletion::Dialogue(id) => client.delete_dialogue(id).await,
    }
}

/// Callbacks shared by the nested collection, image and dialogue markup.
#[derive(Clone)]
struct Handlers {
    edit: Callback<(fn(&mut Draft, String), String)>,
    submit: Callback<SubmitEvent>,
    cancel: Callback<MouseEvent>,
    toggle: Callback<i64>,
    edit_collection: Callback<CollectionSummary>,
    edit_image: Callback<CollectionImage>,
    add_dialogue: Callback<i64>,
    edit_dialogue: Callback<Dialogue>,
    delete: Callback<PendingDeletion>,
}

impl Handlers {
    fn field(&self, apply: fn(&mut Draft, String)) -> Callback<String> {
        self.edit.reform(move |value| (apply, value))
    }
}

fn collection_form(draft: &gacha_core::CollectionDraft, saving: bool, h: &Handlers) -> Html {
    let editing = draft.id.is_some();
    let button = match (saving, editing) {
        (true, _) => "gallery.form.saving",
        (false, true) => "gallery.form.buttonUpdate",
        (false, false) => "gallery.form.buttonCreate",
    };
    html! {
        <form class="card gallery-form" onsubmit={h.submit.clone()}>
            <h3>{ t(if editing { "gallery.form.editTitle" } else { "gallery.form.newTitle" }) }</h3>
            <TextInput
                id="collection-name"
                value={draft.name.clone()}
                placeholder={t("gallery.form.namePlaceholder")}
                required=true
                oninput={h.field(|d, v| if let Draft::Collection(c) = d { c.name = v })}
            />
            <TextArea
                id="collection-description"
                value={draft.description.clone()}
                placeholder={t("gallery.form.descriptionPlaceholder")}
                oninput={h.field(|d, v| if let Draft::Collection(c) = d { c.description = v })}
            />
            <div class="form-actions">
                <button type="button" class="btn btn-secondary" onclick={h.cancel.clone()}>
                    { t("gallery.actions.cancel") }
                </button>
                <button type="submit" class="btn" disabled={saving}>{ t(button) }</button>
            </div>
        </form>
    }
}

fn image_form(draft: &gacha_core::ImageDraft, saving: bool, h: &Handlers) -> Html {
    let editing = draft.id.is_some();
    let button = match (saving, editing) {
        (true, _) => "gallery.imageForm.saving",
        (false, true) => "gallery.imageForm.updateButton",
        (false, false) => "gallery.imageForm.addButton",
    };
    html! {
        <form class="image-form" onsubmit={h.submit.clone()}>
            <h4>{ t(if editing { "gallery.imageForm.editTitle" } else { "gallery.imageForm.title" }) }</h4>
            <TextInput
                id="image-url"
                value={draft.image_url.clone()}
                placeholder={t("gallery.imageForm.urlPlaceholder")}
                required=true
                oninput={h.field(|d, v| if let Draft::Image(i) = d { i.image_url = v })}
            />
            <TextInput
                id="image-title"
                value={draft.title.clone()}
                placeholder={t("gallery.imageForm.titlePlaceholder")}
                oninput={h.field(|d, v| if let Draft::Image(i) = d { i.title = v })}
            />
            <TextArea
                id="image-description"
                value={draft.description.clone()}
                placeholder={t("gallery.imageForm.descriptionPlaceholder")}
                oninput={h.field(|d, v| if let Draft::Image(i) = d { i.description = v })}
            />
            <label for="image-order">{ t("gallery.imageForm.orderLabel") }</label>
            <TextInput
                id="image-order"
                input_type="number"
                value={draft.order_index.to_string()}
                oninput={h.field(|d, v| if let Draft::Image(i) = d { i.order_index = parse_number_input(&v) })}
            />
            <div class="form-actions">
                if editing {
                    <button type="button" class="btn btn-secondary" onclick={h.cancel.clone()}>
                        { t("gallery.imageForm.cancelEdit") }
                    </button>
                }
                <button type="submit" class="btn" disabled={saving}>{ t(button) }</button>
            </div>
        </form>
    }
}

fn dialogue_form(draft: &gacha_core::DialogueDraft, saving: bool, h: &Handlers) -> Html {
    let editing = draft.id.is_some();
    html! {
        <form class="dialogue-form" onsubmit={h.submit.clone()}>
            <TextInput
                id="dialogue-speaker"
                value={draft.speaker.clone()}
                placeholder={t("gallery.dialogues.speakerPlaceholder")}
                required=true
                oninput={h.field(|d, v| if let Draft::Dialogue(l) = d { l.speaker = v })}
            />
            <TextArea
                id="dialogue-text"
                value={draft.text.clone()}
                placeholder={t("gallery.dialogues.textPlaceholder")}
                oninput={h.field(|d, v| if let Draft::Dialogue(l) = d { l.text = v })}
            />
            <TextInput
                id="dialogue-emotion"
                value={draft.emotion_type.clone()}
                placeholder={t("gallery.dialogues.emotionPlaceholder")}
                oninput={h.field(|d, v| if let Draft::Dialogue(l) = d { l.emotion_type = v })}
            />
            <label for="dialogue-order">{ t("gallery.dialogues.orderLabel") }</label>
            <TextInput
                id="dialogue-order"
                input_type="number"
                value={draft.order_index.to_string()}
                oninput={h.field(|d, v| if let Draft::Dialogue(l) = d { l.order_index = parse_number_input(&v) })}
            />
            <div class="form-actions">
                <button type="button" class="btn btn-secondary" onclick={h.cancel.clone()}>
                    { t("gallery.actions.cancel") }
                </button>
                <button type="submit" class="btn" disabled={saving}>
                    { t(if editing { "gallery.dialogues.updateButton" } else { "gallery.dialogues.addButton" }) }
                </button>
            </div>
        </form>
    }
}

fn dialogue_list(
    image: &CollectionImage,
    draft: Option<&Draft>,
    saving: bool,
    h: &Handlers,
) -> Html {
    let mut lines: Vec<&Dialogue> = image.dialogues.iter().collect();
    lines.sort_by_key(|d| d.order_index);
    let form = match draft {
        Some(Draft::Dialogue(d)) if d.image_id == image.id => dialogue_form(d, saving, h),
        _ => {
            let add = h.add_dialogue.clone();
            let image_id = image.id;
            html! {
                <button type="button" class="btn btn-small" onclick={Callback::from(move |_| add.emit(image_id))}>
                    { t("gallery.dialogues.add") }
                </button>
            }
        }
    };
    html! {
        <div class="dialogues">
            <h5>{ t("gallery.dialogues.title") }</h5>
            if lines.is_empty() {
                <p class="empty">{ t("gallery.dialogues.none") }</p>
            }
            <ul>
                { for lines.into_iter().map(|line| {
                    let edit = h.edit_dialogue.clone();
                    let delete = h.delete.clone();
                    let for_edit = line.clone();
                    let line_id = line.id;
                    html! {
                        <li key={line.id}>
                            <strong>{ &line.speaker }</strong>{ ": " }{ &line.text }
                            if let Some(emotion) = line.emotion_type.as_deref().filter(|e| !e.is_empty()) {
                                <em>{ format!(" ({emotion})") }</em>
                            }
                            <button type="button" class="btn btn-small" onclick={Callback::from(move |_| edit.emit(for_edit.clone()))}>
                                { t("gallery.dialogues.edit") }
                            </button>
                            <button type="button" class="btn btn-small btn-danger" onclick={Callback::from(move |_| delete.emit(PendingDeletion::Dialogue(line_id)))}>
                                { t("gallery.dialogues.delete") }
                            </button>
                        </li>
                    }
                }) }
            </ul>
            { form }
        </div>
    }
}

fn image_list(
    collection: &CollectionSummary,
    client: &WebClient,
    draft: Option<&Draft>,
    saving: bool,
    h: &Handlers,
) -> Html {
    let mut images: Vec<&CollectionImage> = collection.images.iter().collect();
    images.sort_by_key(|i| i.order_index);
    let form = match draft {
        Some(Draft::Image(d)) if d.collection_id == collection.id => image_form(d, saving, h),
        _ => Html::default(),
    };
    html! {
        <div class="gallery-images">
            { for images.into_iter().map(|image| {
                let edit = h.edit_image.clone();
                let delete = h.delete.clone();
                let for_edit = image.clone();
                let image_id = image.id;
                let title = image.title.clone().unwrap_or_default();
                html! {
                    <div class="gallery-image" key={image.id}>
                        <FallbackImage src={client.asset_url(&image.image_url)} alt={title.clone()} />
                        <div class="gallery-image-info">
                            <h4>{ title }</h4>
                            if let Some(description) = &image.description {
                                <p>{ description }</p>
                            }
                            <button type="button" class="btn btn-small" onclick={Callback::from(move |_| edit.emit(for_edit.clone()))}>
                                { t("gallery.collection.edit") }
                            </button>
                            <button type="button" class="btn btn-small btn-danger" onclick={Callback::from(move |_| delete.emit(PendingDeletion::Image(image_id)))}>
                                { t("gallery.collection.delete") }
                            </button>
                        </div>
                        { dialogue_list(image, draft, saving, h) }
                    </div>
                }
            }) }
            { form }
        </div>
    }
}

#[function_component(AdminGalleriesPage)]
pub fn admin_galleries_page() -> Html {
    let client = use_client();
    let editor: Shared = use_mut_ref(GalleryEditor::default);
    let redraw = use_force_update();

    {
        let client = client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.fetch_cards().await;
                editor.borrow_mut().apply_cards(result);
                redraw.force_update();
            });
            || ()
        });
    }

    let on_select = {
        let client = client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            let picked = editor.borrow_mut().select_card(value.parse().ok());
            redraw.force_update();
            if let Some(card) = picked {
                load_collections(client.clone(), editor.clone(), redraw.clone(), card);
            }
        })
    };

    let with_editor = |apply: fn(&mut GalleryEditor)| {
        let editor = editor.clone();
        let redraw = redraw.clone();
        move || {
            apply(&mut editor.borrow_mut());
            redraw.force_update();
        }
    };

    let on_create = {
        let run = with_editor(GalleryEditor::open_create_collection);
        Callback::from(move |_: MouseEvent| run())
    };

    let handlers = {
        let edit = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |(apply, value): (fn(&mut Draft, String), String)| {
                if let Some(draft) = editor.borrow_mut().draft_mut() {
                    apply(draft, value);
                }
                redraw.force_update();
            })
        };
        let submit = {
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
                    let reload = editor.borrow_mut().apply_saved(result);
                    redraw.force_update();
                    if let Some(card) = reload {
                        load_collections(client, editor, redraw, card);
                    }
                });
            })
        };
        let cancel = {
            let run = with_editor(GalleryEditor::close_draft);
            Callback::from(move |_: MouseEvent| run())
        };
        let toggle = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |id: i64| {
                editor.borrow_mut().toggle_collection(id);
                redraw.force_update();
            })
        };
        let edit_collection = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |collection: CollectionSummary| {
                editor.borrow_mut().open_edit_collection(&collection);
                redraw.force_update();
            })
        };
        let edit_image = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |image: CollectionImage| {
                editor.borrow_mut().open_edit_image(&image);
                redraw.force_update();
            })
        };
        let add_dialogue = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |image: i64| {
                editor.borrow_mut().open_create_dialogue(image);
                redraw.force_update();
            })
        };
        let edit_dialogue = {
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |dialogue: Dialogue| {
                editor.borrow_mut().open_edit_dialogue(&dialogue);
                redraw.force_update();
            })
        };
        let delete = {
            let client = client.clone();
            let editor = editor.clone();
            let redraw = redraw.clone();
            Callback::from(move |target: PendingDeletion| {
                editor.borrow_mut().request_delete(target);
                if !dom::confirm(&t(target.confirm_key())) {
                    editor.borrow_mut().cancel_delete();
                    return;
                }
                let Some(target) = editor.borrow_mut().confirm_delete() else {
                    return;
                };
                let client = client.clone();
                let editor = editor.clone();
                let redraw = redraw.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = remove(&client, target).await;
                    let reload = editor.borrow_mut().apply_deleted(target, result);
                    redraw.force_update();
                    if let Some(card) = reload {
                        load_collections(client, editor, redraw, card);
                    }
                });
            })
        };
        Handlers {
            edit,
            submit,
            cancel,
            toggle,
            edit_collection,
            edit_image,
            add_dialogue,
            edit_dialogue,
            delete,
        }
    };

    let state = editor.borrow();
    let card_options: Vec<(AttrValue, AttrValue)> = state
        .cards()
        .iter()
        .map(|card| (AttrValue::from(card.id.to_string()), AttrValue::from(card.name.clone())))
        .collect();
    let selected_value = state.selected().map(|id| id.to_string()).unwrap_or_default();

    let card_info = state.selected_card().map(|card| {
        html! {
            <div class="gallery-card-info">
                <FallbackImage src={client.asset_url(card.image_url.as_deref().unwrap_or_default())} alt={card.name.clone()} />
                <div>
                    <h3>{ &card.name }</h3>
                    <p>{ format!("{}: {}", t("gallery.cardInfo.rarity"), t(&format!("cards.rarity.{}", card.rarity.as_str()))) }</p>
                    <p>{ format!("{}: {}", t("gallery.cardInfo.element"), t(&format!("cards.elements.{}", card.element.as_str()))) }</p>
                </div>
            </div>
        }
    });

    let collection_form_html = match state.draft() {
        Some(Draft::Collection(d)) => collection_form(d, state.is_saving(), &handlers),
        _ => Html::default(),
    };

    let body = if state.selected().is_none() {
        html! { <p class="empty">{ t("gallery.messages.selectCard") }</p> }
    } else if state.is_loading() {
        html! { <div class="loading">{ t("gallery.messages.loading") }</div> }
    } else if state.collections().is_empty() {
        html! { <p class="empty">{ t("gallery.messages.none") }</p> }
    } else {
        html! {
            <div class="gallery-collections">
                { for state.collections().iter().map(|collection| {
                    let expanded = state.expanded() == Some(collection.id);
                    let toggle = handlers.toggle.clone();
                    let edit = handlers.edit_collection.clone();
                    let delete = handlers.delete.clone();
                    let for_edit = collection.clone();
                    let id = collection.id;
                    html! {
                        <article class="gallery-collection" key={collection.id}>
                            <header>
                                <h3>{ &collection.name }</h3>
                                if let Some(description) = &collection.description {
                                    <p>{ description }</p>
                                }
                                <span>{ tr_count("gallery.collection.imagesLabel", collection.images.len()) }</span>
                            </header>
                            <div class="row-actions">
                                <button type="button" class="btn btn-small" onclick={Callback::from(move |_| toggle.emit(id))}>
                                    { t(if expanded { "gallery.collection.hide" } else { "gallery.collection.open" }) }
                                </button>
                                <button type="button" class="btn btn-small" onclick={Callback::from(move |_| edit.emit(for_edit.clone()))}>
                                    { t("gallery.collection.edit") }
                                </button>
                                <button type="button" class="btn btn-small btn-danger" onclick={Callback::from(move |_| delete.emit(PendingDeletion::Collection(id)))}>
                                    { t("gallery.collection.delete") }
                                </button>
                            </div>
                            if expanded {
                                { image_list(collection, &client, state.draft(), state.is_saving(), &handlers) }
                            }
                        </article>
                    }
                }) }
            </div>
        }
    };

    html! {
        <section class="admin">
            <AdminNav />
            <header class="admin-header">
                <h2>{ t("admin.galleriesHeading") }</h2>
            </header>
            <ErrorBanner notice={state.cards_error().cloned()} />
            <div class="form-group">
                <label for="gallery-card">{ t("gallery.selectLabel") }</label>
                <Select
                    id="gallery-card"
                    options={card_options}
                    value={selected_value}
                    placeholder={t("gallery.selectPlaceholder")}
                    onchange={on_select}
                />
            </div>
            { card_info.unwrap_or_default() }
            if state.selected().is_some() {
                <div class="gallery-toolbar">
                    <button type="button" class="btn" onclick={on_create}>{ t("gallery.actions.create") }</button>
                </div>
            }
            <ErrorBanner notice={state.error().cloned()} />
            { collection_form_html }
            { body }
        </section>
    }
}
