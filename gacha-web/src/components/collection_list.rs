use crate::components::fallback_image::FallbackImage;
use crate::i18n::{t, tr_count};
use gacha_core::CollectionSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub collections: Vec<CollectionSummary>,
    /// Turns a stored image path into a loadable URL.
    pub resolve_image: Callback<String, String>,
    /// Key family for counts and fallbacks, e.g. `collection.explore`.
    #[prop_or(AttrValue::Static("collection.explore"))]
    pub keys: AttrValue,
}

/// Read-only gallery listing: each collection with its ordered images and dialogue counts.
#[function_component(CollectionList)]
pub fn collection_list(p: &Props) -> Html {
    let keys = p.keys.as_str();
    html! {
        <div class="collection-list">
            { for p.collections.iter().map(|collection| {
                let mut images = collection.images.clone();
                images.sort_by_key(|img| img.order_index);
                html! {
                    <article class="card collection-summary" key={collection.id}>
                        <header>
                            <h4>{ &collection.name }</h4>
                            <span class="badge">{ tr_count(&format!("{keys}.imageCount"), images.len()) }</span>
                        </header>
                        <p>{ collection.description.clone().unwrap_or_else(|| t("collection.explore.descriptionFallback")) }</p>
                        <div class="image-strip">
                            { for images.iter().map(|image| {
                                let title = image.title.clone().unwrap_or_else(|| t("collection.explore.imageTitleFallback"));
                                html! {
                                    <figure class="gallery-image" key={image.id}>
                                        <FallbackImage src={p.resolve_image.emit(image.image_url.clone())} alt={title.clone()} />
                                        <figcaption>
                                            <strong>{ title }</strong>
                                            <span>{ image.description.clone().unwrap_or_else(|| t("collection.explore.imageDescriptionFallback")) }</span>
                                            if !image.dialogues.is_empty() {
                                                <span class="dialogue-count">
                                                    { tr_count("collection.explore.dialogueCount", image.dialogues.len()) }
                                                </span>
                                            }
                                        </figcaption>
                                    </figure>
                                }
                            }) }
                        </div>
                    </article>
                }
            }) }
        </div>
    }
}
