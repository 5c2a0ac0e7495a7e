use crate::components::fallback_image::FallbackImage;
use crate::i18n::{t, tr};
use gacha_core::Card;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub card: Card,
    /// Resolved image URL (backend upload base already applied).
    pub image_src: AttrValue,
    #[prop_or(true)]
    pub owned: bool,
}

fn stat(key: &str, value: i32) -> String {
    let value = value.to_string();
    let mut args = BTreeMap::new();
    args.insert("value", value.as_str());
    tr(key, Some(&args))
}

#[function_component(CardTile)]
pub fn card_tile(p: &Props) -> Html {
    let card = &p.card;
    let rarity = card.rarity;
    let class = classes!(
        "card-tile",
        format!("rarity-{}", rarity.as_str().to_ascii_lowercase()),
        (!p.owned).then_some("locked")
    );

    html! {
        <article class={class} style={format!("border-color: {}", rarity.color())} data-card-id={card.id.to_string()}>
            <FallbackImage src={p.image_src.clone()} alt={card.name.clone()} class="card-image" />
            <div class="card-info">
                <h3 class="card-name">{ &card.name }</h3>
                <span class="rarity-badge" style={format!("background: {}", rarity.color())}>
                    { format!("{} {}", rarity.emoji(), t(&format!("cards.rarity.{}", rarity.as_str()))) }
                </span>
                <span class="element">
                    { format!("{} {}", card.element.emoji(), t(&format!("cards.elements.{}", card.element.as_str()))) }
                </span>
                <div class="card-stats">
                    <span>{ stat("collection.stats.attack", card.attack) }</span>
                    <span>{ stat("collection.stats.defense", card.defense) }</span>
                    <span>{ stat("collection.stats.cost", card.cost) }</span>
                </div>
                if !p.owned {
                    <div class="locked-overlay">{ format!("🔒 {}", t("common.status.locked")) }</div>
                }
            </div>
        </article>
    }
}
