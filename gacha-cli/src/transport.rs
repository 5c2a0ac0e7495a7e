//! `reqwest`-backed transport for the typed backend client.
use async_trait::async_trait;
use gacha_core::{
    ApiError, ApiRequest, ApiResponse, ApiTransport, HttpMethod, MultipartPart, RequestBody,
};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn form(parts: Vec<MultipartPart>) -> Result<Form, ApiError> {
    parts.into_iter().try_fold(Form::new(), |form, part| {
        let mut body = Part::bytes(part.bytes)
            .mime_str(&part.content_type)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        if let Some(name) = part.file_name {
            body = body.file_name(name);
        }
        Ok(form.part(part.name, body))
    })
}

#[async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        let builder = self.client.request(method(request.method), &request.url);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json),
            RequestBody::Multipart(parts) => builder.multipart(form(parts)?),
        };
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_one_to_one() {
        assert_eq!(method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(method(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn bad_mime_type_is_an_encode_error() {
        let parts = vec![MultipartPart {
            name: "image".into(),
            content_type: "not a mime".into(),
            file_name: Some("card.png".into()),
            bytes: vec![1, 2, 3],
        }];
        assert!(matches!(form(parts), Err(ApiError::Encode(_))));
    }

    #[test]
    fn unreachable_backend_is_a_transport_error() {
        let transport = ReqwestTransport::new();
        let result = tokio_test::block_on(
            transport.send(ApiRequest::new(HttpMethod::Get, "http://127.0.0.1:9/api/cards")),
        );
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
