use crate::paths::fallback_image;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// `<img>` that swaps to the bundled placeholder the first time it fails to load.
#[function_component(FallbackImage)]
pub fn fallback_img(p: &Props) -> Html {
    let onerror = Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<web_sys::HtmlImageElement>() {
            let data = img.dataset();
            if data.get("fallbackApplied").as_deref() == Some("true") {
                return;
            }
            let _ = data.set("fallbackApplied", "true");
            img.set_src(&fallback_image());
        }
    });

    html! {
        <img src={p.src.clone()} alt={p.alt.clone()} class={p.class.clone()} loading="lazy" {onerror} />
    }
}
