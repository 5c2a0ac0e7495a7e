//! `fetch`-backed transport for the typed backend client.
use async_trait::async_trait;
use gacha_core::{ApiError, ApiRequest, ApiResponse, ApiTransport, GachaClient};
use std::rc::Rc;
use yew::prelude::*;

/// Client type shared by every page.
pub type WebClient = GachaClient<BrowserTransport>;

/// Client pointed at the configured backend.
#[must_use]
pub fn web_client() -> WebClient {
    GachaClient::new(BrowserTransport, crate::paths::api_base())
}

/// Backend client shared by a component's callbacks.
#[hook]
pub fn use_client() -> Rc<WebClient> {
    use_memo((), |()| web_client())
}

/// Sends requests through `window.fetch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl ApiTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        browser::send(request)
            .await
            .map_err(|e| ApiError::Transport(crate::dom::js_error_message(&e)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl ApiTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Transport(format!(
            "{} {}: fetch is only available in the browser",
            request.method.as_str(),
            request.url
        )))
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use gacha_core::{ApiRequest, ApiResponse, MultipartPart, RequestBody};
    use js_sys::{Array, Uint8Array};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

    fn part_blob(part: &MultipartPart) -> Result<Blob, JsValue> {
        let bytes = Uint8Array::from(part.bytes.as_slice());
        let parts = Array::new();
        parts.push(&bytes.buffer());
        let options = BlobPropertyBag::new();
        options.set_type(&part.content_type);
        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
    }

    fn form_data(parts: &[MultipartPart]) -> Result<FormData, JsValue> {
        let form = FormData::new()?;
        for part in parts {
            let blob = part_blob(part)?;
            match &part.file_name {
                Some(file_name) => form.append_with_blob_and_filename(&part.name, &blob, file_name)?,
                None => form.append_with_blob(&part.name, &blob)?,
            }
        }
        Ok(form)
    }

    pub(super) async fn send(request: ApiRequest) -> Result<ApiResponse, JsValue> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        let mut json = false;
        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(text) => {
                init.set_body(&JsValue::from_str(text));
                json = true;
            }
            RequestBody::Multipart(parts) => {
                // The browser writes the multipart boundary header itself.
                init.set_body(&JsValue::from(form_data(parts)?));
            }
        }

        let req = Request::new_with_str_and_init(&request.url, &init)?;
        if json {
            req.headers().set("Content-Type", "application/json")?;
        }
        let window = crate::dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
        let resp: Response = JsFuture::from(window.fetch_with_request(&req))
            .await?
            .dyn_into()?;
        let body = JsFuture::from(resp.text()?)
            .await?
            .as_string()
            .unwrap_or_default();
        Ok(ApiResponse::new(resp.status(), body))
    }
}
