use yew::prelude::*;

/// Active language plus a setter that re-renders the tree.
#[derive(Clone, PartialEq)]
pub struct LangContext {
    pub lang: AttrValue,
    pub set: Callback<String>,
}
