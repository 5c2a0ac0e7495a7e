use super::transport::encode_query_value;
use super::{
    ApiError, ApiRequest, ApiResponse, ApiResult, ApiTransport, HttpMethod, MultipartPart,
    RequestBody,
};
use crate::constants::DEFAULT_API_BASE;
use crate::forms::{
    CardPayload, CollectionPayload, Credentials, DialoguePayload, ImagePayload, PendingUpload,
};
use crate::gacha::PullKind;
use crate::model::{
    Card, CardId, CollectionId, CollectionSummary, Currency, Dialogue, DialogueId, GachaResult,
    ImageId, User, UserId,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed client for the game backend. One method per endpoint; no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaClient<T> {
    transport: T,
    base: String,
}

impl<T: ApiTransport> GachaClient<T> {
    pub fn new(transport: T, base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            transport,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_default_base(transport: T) -> Self {
        Self::new(transport, DEFAULT_API_BASE)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for an image path. Relative upload paths are served by the backend.
    #[must_use]
    pub fn asset_url(&self, image_url: &str) -> String {
        if image_url.starts_with("http") {
            image_url.to_string()
        } else if image_url.is_empty() {
            String::new()
        } else if image_url.starts_with('/') {
            format!("{}{image_url}", self.base)
        } else {
            format!("{}/{image_url}", self.base)
        }
    }

    // Users ----------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] when the credentials are rejected or the call fails.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        self.send_json(HttpMethod::Post, "/api/users/login", credentials)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] when registration is refused or the call fails.
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<User> {
        self.send_json(HttpMethod::Post, "/api/users/register", credentials)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the profile cannot be fetched.
    pub async fn fetch_user(&self, user_id: UserId) -> ApiResult<User> {
        self.get_json(&format!("/api/users/{user_id}")).await
    }

    // Cards ----------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the catalogue cannot be fetched.
    pub async fn fetch_cards(&self) -> ApiResult<Vec<Card>> {
        self.get_json("/api/cards").await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the owned cards cannot be fetched.
    pub async fn fetch_owned_cards(&self, user_id: UserId) -> ApiResult<Vec<Card>> {
        self.get_json(&format!("/api/cards/user/{user_id}")).await
    }

    /// Owned cards and the full catalogue, fetched concurrently. Either
    /// failure fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] of the two requests.
    pub async fn fetch_owned_and_all(&self, user_id: UserId) -> ApiResult<(Vec<Card>, Vec<Card>)> {
        futures::future::try_join(self.fetch_owned_cards(user_id), self.fetch_cards()).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the card cannot be created.
    pub async fn create_card(
        &self,
        card: &CardPayload,
        upload: Option<&PendingUpload>,
    ) -> ApiResult<()> {
        let body = card_form(card, upload)?;
        self.send_unit(HttpMethod::Post, "/api/cards", body).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the card cannot be updated.
    pub async fn update_card(
        &self,
        card_id: CardId,
        card: &CardPayload,
        upload: Option<&PendingUpload>,
    ) -> ApiResult<()> {
        let body = card_form(card, upload)?;
        self.send_unit(HttpMethod::Put, &format!("/api/cards/{card_id}"), body)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the card cannot be deleted.
    pub async fn delete_card(&self, card_id: CardId) -> ApiResult<()> {
        self.send_unit(
            HttpMethod::Delete,
            &format!("/api/cards/{card_id}"),
            RequestBody::Empty,
        )
        .await
    }

    // Gacha ----------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend refuses the pull.
    pub async fn pull(
        &self,
        user_id: UserId,
        kind: PullKind,
        currency: Currency,
    ) -> ApiResult<GachaResult> {
        let path = format!(
            "/api/gacha/{}/{user_id}?useGems={}",
            kind.endpoint(),
            currency.uses_gems()
        );
        let response = self
            .execute(ApiRequest::new(HttpMethod::Post, self.url(&path)))
            .await?;
        decode(&response)
    }

    // Collections ----------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the collections cannot be fetched.
    pub async fn collections_for_card(&self, card_id: CardId) -> ApiResult<Vec<CollectionSummary>> {
        self.get_json(&format!("/api/cards/{card_id}/collections"))
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the search fails.
    pub async fn search_collections(&self, name: &str) -> ApiResult<Vec<CollectionSummary>> {
        self.get_json(&format!(
            "/api/collections?name={}",
            encode_query_value(name.trim())
        ))
        .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the collection cannot be created.
    pub async fn create_collection(&self, collection: &CollectionPayload) -> ApiResult<()> {
        let body = json_body(collection)?;
        self.send_unit(
            HttpMethod::Post,
            &format!("/api/cards/{}/collections", collection.card_id),
            body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the collection cannot be updated.
    pub async fn update_collection(
        &self,
        collection_id: CollectionId,
        collection: &CollectionPayload,
    ) -> ApiResult<()> {
        let body = json_body(collection)?;
        self.send_unit(
            HttpMethod::Put,
            &format!("/api/collections/{collection_id}"),
            body,
        )
        .await
    }

    /// Deleting a collection also removes its images on the backend.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the collection cannot be deleted.
    pub async fn delete_collection(&self, collection_id: CollectionId) -> ApiResult<()> {
        self.send_unit(
            HttpMethod::Delete,
            &format!("/api/collections/{collection_id}"),
            RequestBody::Empty,
        )
        .await
    }

    // Images ---------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the image cannot be added.
    pub async fn create_image(&self, image: &ImagePayload) -> ApiResult<()> {
        let body = json_body(image)?;
        self.send_unit(
            HttpMethod::Post,
            &format!("/api/collections/{}/images", image.collection_id),
            body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the image cannot be updated.
    pub async fn update_image(&self, image_id: ImageId, image: &ImagePayload) -> ApiResult<()> {
        let body = json_body(image)?;
        self.send_unit(HttpMethod::Put, &format!("/api/images/{image_id}"), body)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the image cannot be deleted.
    pub async fn delete_image(&self, image_id: ImageId) -> ApiResult<()> {
        self.send_unit(
            HttpMethod::Delete,
            &format!("/api/images/{image_id}"),
            RequestBody::Empty,
        )
        .await
    }

    // Dialogues ------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the dialogues cannot be fetched.
    pub async fn dialogues_for_image(&self, image_id: ImageId) -> ApiResult<Vec<Dialogue>> {
        self.get_json(&format!("/api/images/{image_id}/dialogues"))
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the dialogue cannot be created.
    pub async fn create_dialogue(&self, dialogue: &DialoguePayload) -> ApiResult<()> {
        let body = json_body(dialogue)?;
        self.send_unit(
            HttpMethod::Post,
            &format!("/api/images/{}/dialogues", dialogue.image_id),
            body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the dialogue cannot be updated.
    pub async fn update_dialogue(
        &self,
        dialogue_id: DialogueId,
        dialogue: &DialoguePayload,
    ) -> ApiResult<()> {
        let body = json_body(dialogue)?;
        self.send_unit(
            HttpMethod::Put,
            &format!("/api/dialogues/{dialogue_id}"),
            body,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the dialogue cannot be deleted.
    pub async fn delete_dialogue(&self, dialogue_id: DialogueId) -> ApiResult<()> {
        self.send_unit(
            HttpMethod::Delete,
            &format!("/api/dialogues/{dialogue_id}"),
            RequestBody::Empty,
        )
        .await
    }

    // Plumbing -------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = request.method;
        let url = request.url.clone();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{} {url} failed: {err}", method.as_str());
                return Err(err);
            }
        };
        if response.is_success() {
            log::debug!("{} {url} -> {}", method.as_str(), response.status);
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, &response.body);
            log::warn!("{} {url} -> {err}", method.as_str());
            Err(err)
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self
            .execute(ApiRequest::new(HttpMethod::Get, self.url(path)))
            .await?;
        decode(&response)
    }

    async fn send_json<B, R>(&self, method: HttpMethod, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(method, self.url(path)).with_body(json_body(body)?);
        let response = self.execute(request).await?;
        decode(&response)
    }

    async fn send_unit(&self, method: HttpMethod, path: &str, body: RequestBody) -> ApiResult<()> {
        self.execute(ApiRequest::new(method, self.url(path)).with_body(body))
            .await
            .map(drop)
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> ApiResult<R> {
    serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<RequestBody> {
    serde_json::to_string(body)
        .map(RequestBody::Json)
        .map_err(|err| ApiError::Encode(err.to_string()))
}

/// `card` JSON part plus the optional `file` part.
fn card_form(card: &CardPayload, upload: Option<&PendingUpload>) -> ApiResult<RequestBody> {
    let json = serde_json::to_vec(card).map_err(|err| ApiError::Encode(err.to_string()))?;
    let mut parts = vec![MultipartPart {
        name: "card".to_string(),
        content_type: "application/json".to_string(),
        file_name: None,
        bytes: json,
    }];
    if let Some(upload) = upload {
        parts.push(MultipartPart {
            name: "file".to_string(),
            content_type: upload.content_type.clone(),
            file_name: Some(upload.file_name.clone()),
            bytes: upload.bytes.clone(),
        });
    }
    Ok(RequestBody::Multipart(parts))
}
