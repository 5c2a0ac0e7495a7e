//! Admin managers: card catalogue and card galleries.
//!
//! Both follow the same cycle. Create opens an empty buffer, edit opens a
//! filled one, submit validates and hands back the request to send, and a
//! successful save or delete asks the page to reload everything.
use super::Notice;
use crate::api::ApiResult;
use crate::forms::{
    CardDraft, CardPayload, CollectionDraft, CollectionPayload, DialogueDraft, DialoguePayload,
    Draft, ImageDraft, ImagePayload, PendingUpload, ValidationError,
};
use crate::model::{
    Card, CardId, CollectionId, CollectionImage, CollectionSummary, Dialogue, DialogueId, ImageId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Closed,
    Creating,
    Editing,
}

/// A delete the user has asked for but not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDeletion {
    Card(CardId),
    Collection(CollectionId),
    Image(ImageId),
    Dialogue(DialogueId),
}

impl PendingDeletion {
    /// Translation key of the confirmation prompt.
    #[must_use]
    pub const fn confirm_key(self) -> &'static str {
        match self {
            Self::Card(_) => "common.confirmations.deleteCard",
            Self::Collection(_) => "common.confirmations.deleteCollection",
            Self::Image(_) => "common.confirmations.deleteImage",
            Self::Dialogue(_) => "common.confirmations.deleteDialogue",
        }
    }
}

// Card manager -------------------------------------------------------------

/// What the card form asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSubmission {
    pub id: Option<CardId>,
    pub card: CardPayload,
    pub upload: Option<PendingUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEditor {
    cards: Vec<Card>,
    loading: bool,
    saving: bool,
    draft: Option<CardDraft>,
    upload: Option<PendingUpload>,
    released_previews: Vec<String>,
    pending_deletion: Option<CardId>,
    error: Option<Notice>,
}

impl Default for CardEditor {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            loading: true,
            saving: false,
            draft: None,
            upload: None,
            released_previews: Vec::new(),
            pending_deletion: None,
            error: None,
        }
    }
}

impl CardEditor {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn apply_load(&mut self, result: ApiResult<Vec<Card>>) {
        self.loading = false;
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.error = None;
            }
            Err(err) => {
                log::warn!("card list failed: {err}");
                self.error = Some(Notice::key("cardManager.errors.load"));
            }
        }
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        match &self.draft {
            None => EditorMode::Closed,
            Some(d) if d.id.is_some() => EditorMode::Editing,
            Some(_) => EditorMode::Creating,
        }
    }

    pub fn open_create(&mut self) {
        self.draft = Some(CardDraft::default());
        self.replace_upload(None);
    }

    pub fn open_edit(&mut self, card: &Card) {
        self.draft = Some(CardDraft::from_card(card));
        self.replace_upload(None);
    }

    pub fn close(&mut self) {
        self.draft = None;
        self.replace_upload(None);
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&CardDraft> {
        self.draft.as_ref()
    }

    pub const fn draft_mut(&mut self) -> Option<&mut CardDraft> {
        self.draft.as_mut()
    }

    /// Hold a chosen file until submit. `None` clears it.
    pub fn set_upload(&mut self, upload: Option<PendingUpload>) {
        self.replace_upload(upload);
    }

    fn replace_upload(&mut self, upload: Option<PendingUpload>) {
        if let Some(old) = self.upload.take()
            && !old.preview_url.is_empty()
        {
            self.released_previews.push(old.preview_url);
        }
        self.upload = upload;
    }

    /// Preview URLs of uploads the editor has let go of since the last call.
    /// The page must revoke each one.
    pub fn take_released_previews(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released_previews)
    }

    #[must_use]
    pub const fn upload(&self) -> Option<&PendingUpload> {
        self.upload.as_ref()
    }

    /// Local preview of a pending file, else the stored image of the card being edited.
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.upload
            .as_ref()
            .map(|u| u.preview_url.as_str())
            .or_else(|| self.draft.as_ref()?.existing_image_url.as_deref())
    }

    /// Validate the open buffer and hand back what to send.
    ///
    /// # Errors
    ///
    /// Returns the first rule the buffer breaks; nothing should be sent and
    /// the message is also kept for display.
    pub fn submit(&mut self) -> Result<Option<CardSubmission>, ValidationError> {
        let Some(draft) = &self.draft else {
            return Ok(None);
        };
        if self.saving {
            return Ok(None);
        }
        let card = match draft.validate(self.upload.is_some()) {
            Ok(card) => card,
            Err(err) => {
                self.error = Some(Notice::from_validation(err));
                return Err(err);
            }
        };
        self.saving = true;
        self.error = None;
        Ok(Some(CardSubmission {
            id: draft.id,
            card,
            upload: self.upload.clone(),
        }))
    }

    /// Returns `true` when the list should be reloaded.
    pub fn apply_saved(&mut self, result: ApiResult<()>) -> bool {
        self.saving = false;
        let editing = self.mode() == EditorMode::Editing;
        match result {
            Ok(()) => {
                self.close();
                self.error = None;
                true
            }
            Err(err) => {
                log::warn!("card save failed: {err}");
                let key = if editing {
                    "cardManager.errors.update"
                } else {
                    "cardManager.errors.create"
                };
                self.error = Some(Notice::from_api(&err, key));
                false
            }
        }
    }

    pub fn request_delete(&mut self, card_id: CardId) -> PendingDeletion {
        self.pending_deletion = Some(card_id);
        PendingDeletion::Card(card_id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    /// Confirm the pending delete. Returns the card to delete.
    pub fn confirm_delete(&mut self) -> Option<CardId> {
        self.pending_deletion.take()
    }

    /// Returns `true` when the list should be reloaded.
    pub fn apply_deleted(&mut self, result: ApiResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(err) => {
                log::warn!("card delete failed: {err}");
                self.error = Some(Notice::from_api(&err, "cardManager.errors.delete"));
                false
            }
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub const fn pending_deletion(&self) -> Option<CardId> {
        self.pending_deletion
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }
}

// Gallery manager ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GallerySubmission {
    CreateCollection(CollectionPayload),
    UpdateCollection(CollectionId, CollectionPayload),
    CreateImage(ImagePayload),
    UpdateImage(ImageId, ImagePayload),
    CreateDialogue(DialoguePayload),
    UpdateDialogue(DialogueId, DialoguePayload),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryEditor {
    cards: Vec<Card>,
    cards_error: Option<Notice>,
    selected: Option<CardId>,
    collections: Vec<CollectionSummary>,
    loading: bool,
    expanded: Option<CollectionId>,
    draft: Option<Draft>,
    saving: bool,
    pending_deletion: Option<PendingDeletion>,
    error: Option<Notice>,
}

impl GalleryEditor {
    pub fn apply_cards(&mut self, result: ApiResult<Vec<Card>>) {
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.cards_error = None;
            }
            Err(err) => {
                log::warn!("gallery card list failed: {err}");
                self.cards_error = Some(Notice::key("gallery.messages.cardsError"));
            }
        }
    }

    /// Choose the card whose galleries are managed. Returns the card to fetch collections for.
    pub fn select_card(&mut self, card: Option<CardId>) -> Option<CardId> {
        self.selected = card;
        self.collections.clear();
        self.expanded = None;
        self.draft = None;
        self.error = None;
        self.loading = card.is_some();
        card
    }

    pub fn apply_collections(&mut self, card: CardId, result: ApiResult<Vec<CollectionSummary>>) {
        if self.selected != Some(card) {
            return;
        }
        self.loading = false;
        match result {
            Ok(collections) => {
                if let Some(open) = self.expanded
                    && !collections.iter().any(|c| c.id == open)
                {
                    self.expanded = None;
                }
                self.collections = collections;
            }
            Err(err) => {
                log::warn!("gallery collections failed: {err}");
                self.collections.clear();
                self.error = Some(Notice::key("gallery.messages.error"));
            }
        }
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        let id = self.selected?;
        self.cards.iter().find(|c| c.id == id)
    }

    /// Mode of the collection form specifically.
    #[must_use]
    pub const fn collection_mode(&self) -> EditorMode {
        match &self.draft {
            Some(Draft::Collection(d)) if d.id.is_some() => EditorMode::Editing,
            Some(Draft::Collection(_)) => EditorMode::Creating,
            _ => EditorMode::Closed,
        }
    }

    pub fn open_create_collection(&mut self) {
        if let Some(card) = self.selected {
            self.draft = Some(Draft::Collection(CollectionDraft::new(card)));
        }
    }

    pub fn open_edit_collection(&mut self, collection: &CollectionSummary) {
        self.draft = Some(Draft::Collection(CollectionDraft::from_collection(
            collection,
        )));
    }

    /// Expand or collapse a collection. Expanding opens a fresh image form for it.
    pub fn toggle_collection(&mut self, collection: CollectionId) {
        if self.expanded == Some(collection) {
            self.expanded = None;
            if matches!(self.draft, Some(Draft::Image(_) | Draft::Dialogue(_))) {
                self.draft = None;
            }
            return;
        }
        self.expanded = Some(collection);
        self.draft = Some(Draft::Image(ImageDraft::new(collection)));
    }

    pub fn open_edit_image(&mut self, image: &CollectionImage) {
        self.expanded = Some(image.collection_id);
        self.draft = Some(Draft::Image(ImageDraft::from_image(image)));
    }

    pub fn open_create_dialogue(&mut self, image: ImageId) {
        self.draft = Some(Draft::Dialogue(DialogueDraft::new(image)));
    }

    pub fn open_edit_dialogue(&mut self, dialogue: &Dialogue) {
        self.draft = Some(Draft::Dialogue(DialogueDraft::from_dialogue(dialogue)));
    }

    pub fn close_draft(&mut self) {
        self.draft = None;
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub const fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    /// Validate the open buffer and hand back the request to send.
    ///
    /// # Errors
    ///
    /// Returns the first rule the buffer breaks; the message is also kept for display.
    pub fn submit(&mut self) -> Result<Option<GallerySubmission>, ValidationError> {
        if self.saving {
            return Ok(None);
        }
        let submission = match &self.draft {
            None => return Ok(None),
            Some(Draft::Card(_)) => return Ok(None),
            Some(Draft::Collection(d)) => d.validate().map(|p| match d.id {
                Some(id) => GallerySubmission::UpdateCollection(id, p),
                None => GallerySubmission::CreateCollection(p),
            }),
            Some(Draft::Image(d)) => d.validate().map(|p| match d.id {
                Some(id) => GallerySubmission::UpdateImage(id, p),
                None => GallerySubmission::CreateImage(p),
            }),
            Some(Draft::Dialogue(d)) => d.validate().map(|p| match d.id {
                Some(id) => GallerySubmission::UpdateDialogue(id, p),
                None => GallerySubmission::CreateDialogue(p),
            }),
        };
        match submission {
            Ok(submission) => {
                self.saving = true;
                self.error = None;
                Ok(Some(submission))
            }
            Err(err) => {
                self.error = Some(Notice::from_validation(err));
                Err(err)
            }
        }
    }

    /// Apply a save. Returns the card whose collections should be reloaded.
    pub fn apply_saved(&mut self, result: ApiResult<()>) -> Option<CardId> {
        self.saving = false;
        match result {
            Ok(()) => {
                self.draft = match self.draft.take() {
                    Some(Draft::Image(d)) => Some(Draft::Image(ImageDraft::new(d.collection_id))),
                    _ => None,
                };
                self.error = None;
                self.selected
            }
            Err(err) => {
                log::warn!("gallery save failed: {err}");
                let key = match &self.draft {
                    Some(Draft::Image(_)) => "gallery.messages.saveImage",
                    Some(Draft::Dialogue(_)) => "gallery.messages.saveDialogue",
                    _ => "gallery.messages.saveCollection",
                };
                self.error = Some(Notice::from_api(&err, key));
                None
            }
        }
    }

    pub fn request_delete(&mut self, target: PendingDeletion) {
        self.pending_deletion = Some(target);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    pub fn confirm_delete(&mut self) -> Option<PendingDeletion> {
        self.pending_deletion.take()
    }

    /// Apply a delete. Returns the card whose collections should be reloaded.
    pub fn apply_deleted(
        &mut self,
        target: PendingDeletion,
        result: ApiResult<()>,
    ) -> Option<CardId> {
        match result {
            Ok(()) => {
                match target {
                    PendingDeletion::Collection(id) if self.expanded == Some(id) => {
                        self.expanded = None;
                        self.draft = None;
                    }
                    PendingDeletion::Image(id)
                        if matches!(&self.draft, Some(Draft::Image(d)) if d.id == Some(id)) =>
                    {
                        self.draft = self.expanded.map(|c| Draft::Image(ImageDraft::new(c)));
                    }
                    _ => {}
                }
                self.selected
            }
            Err(err) => {
                log::warn!("gallery delete failed: {err}");
                let key = match target {
                    PendingDeletion::Image(_) => "gallery.messages.cannotDeleteImage",
                    PendingDeletion::Dialogue(_) => "gallery.messages.cannotDeleteDialogue",
                    _ => "gallery.messages.cannotDelete",
                };
                self.error = Some(Notice::from_api(&err, key));
                None
            }
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub const fn cards_error(&self) -> Option<&Notice> {
        self.cards_error.as_ref()
    }

    #[must_use]
    pub const fn selected(&self) -> Option<CardId> {
        self.selected
    }

    #[must_use]
    pub fn collections(&self) -> &[CollectionSummary] {
        &self.collections
    }

    #[must_use]
    pub const fn expanded(&self) -> Option<CollectionId> {
        self.expanded
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub const fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.pending_deletion
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{Element, Rarity};

    fn card() -> Card {
        Card {
            id: 11,
            name: "Sora".into(),
            description: None,
            attack: 4,
            defense: 2,
            cost: 2,
            rarity: Rarity::Rare,
            element: Element::Air,
            image_url: Some("/uploads/sora.png".into()),
        }
    }

    fn upload() -> PendingUpload {
        PendingUpload {
            file_name: "new.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
            preview_url: "blob:preview".into(),
        }
    }

    #[test]
    fn card_editor_modes() {
        let mut editor = CardEditor::default();
        assert_eq!(editor.mode(), EditorMode::Closed);
        editor.open_create();
        assert_eq!(editor.mode(), EditorMode::Creating);
        editor.open_edit(&card());
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert_eq!(editor.preview_url(), Some("/uploads/sora.png"));
        editor.set_upload(Some(upload()));
        assert_eq!(editor.preview_url(), Some("blob:preview"));
        editor.close();
        assert_eq!(editor.mode(), EditorMode::Closed);
        assert!(editor.upload().is_none());
    }

    #[test]
    fn card_submit_carries_upload_and_drops_stored_url() {
        let mut editor = CardEditor::default();
        editor.open_edit(&card());
        editor.set_upload(Some(upload()));
        let submission = editor.submit().unwrap().unwrap();
        assert_eq!(submission.id, Some(11));
        assert!(submission.card.image_url.is_none());
        assert!(submission.upload.is_some());
        assert!(editor.is_saving());
        assert!(editor.submit().unwrap().is_none());

        assert!(editor.apply_saved(Ok(())));
        assert_eq!(editor.mode(), EditorMode::Closed);
    }

    #[test]
    fn dropped_uploads_release_their_previews() {
        let mut editor = CardEditor::default();
        editor.open_edit(&card());
        editor.set_upload(Some(upload()));
        editor.set_upload(Some(PendingUpload {
            preview_url: "blob:second".into(),
            ..upload()
        }));
        assert_eq!(editor.take_released_previews(), vec!["blob:preview".to_string()]);

        editor.close();
        assert_eq!(editor.take_released_previews(), vec!["blob:second".to_string()]);
        assert!(editor.take_released_previews().is_empty());

        editor.open_create();
        if let Some(draft) = editor.draft_mut() {
            draft.name = "Hana".into();
        }
        editor.set_upload(Some(upload()));
        assert!(editor.submit().unwrap().is_some());
        assert!(editor.take_released_previews().is_empty());
        assert!(editor.apply_saved(Ok(())));
        assert_eq!(editor.take_released_previews(), vec!["blob:preview".to_string()]);
    }

    #[test]
    fn invalid_card_is_not_submitted() {
        let mut editor = CardEditor::default();
        editor.open_create();
        if let Some(draft) = editor.draft_mut() {
            draft.name = "Valid".into();
            draft.defense = -1;
        }
        assert_eq!(
            editor.submit(),
            Err(ValidationError::DefenseTooLow { min: 0 })
        );
        assert!(!editor.is_saving());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut editor = CardEditor::default();
        let pending = editor.request_delete(11);
        assert_eq!(pending.confirm_key(), "common.confirmations.deleteCard");
        editor.cancel_delete();
        assert_eq!(editor.confirm_delete(), None);

        editor.request_delete(11);
        assert_eq!(editor.confirm_delete(), Some(11));
        assert!(!editor.apply_deleted(Err(ApiError::Transport("x".into()))));
        assert_eq!(
            editor.error().and_then(Notice::key_name),
            Some("cardManager.errors.delete")
        );
    }

    #[test]
    fn gallery_collection_cycle() {
        let mut editor = GalleryEditor::default();
        editor.apply_cards(Ok(vec![card()]));
        assert_eq!(editor.select_card(Some(11)), Some(11));
        assert_eq!(editor.selected_card().map(|c| c.name.as_str()), Some("Sora"));

        editor.open_create_collection();
        assert_eq!(editor.collection_mode(), EditorMode::Creating);
        assert_eq!(
            editor.submit(),
            Err(ValidationError::CollectionNameRequired)
        );
        assert_eq!(
            editor.error().and_then(Notice::key_name),
            Some("gallery.errors.collectionNameRequired")
        );

        if let Some(Draft::Collection(d)) = editor.draft_mut() {
            d.name = "Festival".into();
        }
        let submission = editor.submit().unwrap().unwrap();
        assert!(matches!(
            submission,
            GallerySubmission::CreateCollection(ref p) if p.card_id == 11 && p.name == "Festival"
        ));
        assert_eq!(editor.apply_saved(Ok(())), Some(11));
        assert_eq!(editor.collection_mode(), EditorMode::Closed);
    }

    #[test]
    fn expanding_collection_opens_image_form() {
        let mut editor = GalleryEditor::default();
        editor.select_card(Some(11));
        editor.toggle_collection(3);
        assert_eq!(editor.expanded(), Some(3));
        assert!(matches!(editor.draft(), Some(Draft::Image(d)) if d.collection_id == 3));

        if let Some(Draft::Image(d)) = editor.draft_mut() {
            d.image_url = "https://img/x.png".into();
        }
        assert!(matches!(
            editor.submit().unwrap(),
            Some(GallerySubmission::CreateImage(_))
        ));
        editor.apply_saved(Ok(()));
        assert!(matches!(editor.draft(), Some(Draft::Image(d)) if d.image_url.is_empty()));

        editor.toggle_collection(3);
        assert_eq!(editor.expanded(), None);
        assert!(editor.draft().is_none());
    }

    #[test]
    fn deleting_expanded_collection_collapses_it() {
        let mut editor = GalleryEditor::default();
        editor.select_card(Some(11));
        editor.toggle_collection(5);
        editor.request_delete(PendingDeletion::Collection(5));
        let target = editor.confirm_delete().unwrap();
        assert_eq!(editor.apply_deleted(target, Ok(())), Some(11));
        assert_eq!(editor.expanded(), None);
    }
}
