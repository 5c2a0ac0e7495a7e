use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TextInputProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub input_type: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub oninput: Callback<String>,
}

#[function_component(TextInput)]
pub fn text_input(props: &TextInputProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let input_type = props.input_type.clone().unwrap_or_else(|| "text".into());
    html! {
        <input
            id={props.id.clone()}
            type={input_type}
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            required={props.required}
            disabled={props.disabled}
            {oninput}
        />
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TextAreaProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub oninput: Callback<String>,
}

#[function_component(TextArea)]
pub fn text_area(props: &TextAreaProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                cb.emit(area.value());
            }
        })
    };
    html! {
        <textarea
            id={props.id.clone()}
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            rows="3"
            {oninput}
        />
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SelectProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    /// `(value, label)` pairs in display order.
    pub options: Vec<(AttrValue, AttrValue)>,
    #[prop_or_default]
    pub value: AttrValue,
    /// Leading empty option, shown when nothing is selected.
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub onchange: Callback<String>,
}

#[function_component(Select)]
pub fn select(props: &SelectProps) -> Html {
    let onchange = {
        let cb = props.onchange.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                cb.emit(sel.value());
            }
        })
    };
    html! {
        <select id={props.id.clone()} {onchange}>
            if let Some(placeholder) = &props.placeholder {
                <option value="" selected={props.value.is_empty()}>{ placeholder.clone() }</option>
            }
            { for props.options.iter().map(|(value, label)| html! {
                <option value={value.clone()} selected={*value == props.value}>{ label.clone() }</option>
            }) }
        </select>
    }
}
