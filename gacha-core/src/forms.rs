//! Form buffers for login and the admin managers.
//!
//! A draft holds exactly what the form shows. `validate` turns it into the
//! payload the backend receives, or names the first rule it breaks.
use crate::constants::{CARD_MIN_ATTACK, CARD_MIN_COST, CARD_MIN_DEFENSE, CARD_NAME_MAX_LEN};
use crate::model::{
    Card, CardId, CollectionId, CollectionImage, CollectionSummary, Dialogue, Element, ImageId,
    Rarity,
};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username is required")]
    UsernameRequired,
    #[error("password is required")]
    PasswordRequired,
    #[error("email address is invalid")]
    EmailInvalid,
    #[error("card name is required")]
    CardNameRequired,
    #[error("card name is longer than {max} characters")]
    CardNameTooLong { max: usize },
    #[error("attack must be at least {min}")]
    AttackTooLow { min: i32 },
    #[error("defense must be at least {min}")]
    DefenseTooLow { min: i32 },
    #[error("cost must be at least {min}")]
    CostTooLow { min: i32 },
    #[error("collection name is required")]
    CollectionNameRequired,
    #[error("image URL is required")]
    ImageUrlRequired,
    #[error("order index cannot be negative")]
    OrderIndexNegative,
    #[error("speaker is required")]
    SpeakerRequired,
    #[error("dialogue text is required")]
    DialogueTextRequired,
}

impl ValidationError {
    /// Translation key for the message shown next to the form.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::UsernameRequired => "auth.errors.usernameRequired",
            Self::PasswordRequired => "auth.errors.passwordRequired",
            Self::EmailInvalid => "auth.errors.emailInvalid",
            Self::CardNameRequired => "cardManager.errors.nameRequired",
            Self::CardNameTooLong { .. } => "cardManager.errors.nameTooLong",
            Self::AttackTooLow { .. } => "cardManager.errors.attackTooLow",
            Self::DefenseTooLow { .. } => "cardManager.errors.defenseTooLow",
            Self::CostTooLow { .. } => "cardManager.errors.costTooLow",
            Self::CollectionNameRequired => "gallery.errors.collectionNameRequired",
            Self::ImageUrlRequired => "gallery.errors.imageUrlRequired",
            Self::OrderIndexNegative => "gallery.errors.orderIndexNegative",
            Self::SpeakerRequired => "gallery.errors.speakerRequired",
            Self::DialogueTextRequired => "gallery.errors.dialogueTextRequired",
        }
    }
}

/// Parse a numeric text input. Anything unparseable counts as zero.
#[must_use]
pub fn parse_number_input(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn trimmed_or_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthDraft {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/login` and `/api/users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl AuthDraft {
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = trimmed_or_none(&self.username).ok_or(ValidationError::UsernameRequired)?;
        if self.password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        let email = match self.mode {
            AuthMode::Login => None,
            AuthMode::Register => {
                if !is_email_valid(&self.email) {
                    return Err(ValidationError::EmailInvalid);
                }
                Some(self.email.trim().to_string())
            }
        };
        Ok(Credentials {
            username,
            email,
            password: self.password.clone(),
        })
    }
}

/// A locally chosen file, held until the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Object URL (browser) or path (CLI) used for the preview.
    pub preview_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub id: Option<CardId>,
    pub name: String,
    pub description: String,
    pub attack: i32,
    pub defense: i32,
    pub cost: i32,
    pub rarity: Rarity,
    pub element: Element,
    /// Image already stored on the backend for the card being edited.
    pub existing_image_url: Option<String>,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            attack: CARD_MIN_ATTACK,
            defense: CARD_MIN_DEFENSE,
            cost: CARD_MIN_COST,
            rarity: Rarity::Common,
            element: Element::Fire,
            existing_image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub name: String,
    pub description: String,
    pub attack: i32,
    pub defense: i32,
    pub cost: i32,
    pub rarity: Rarity,
    pub element: Element,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CardDraft {
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: Some(card.id),
            name: card.name.clone(),
            description: card.description.clone().unwrap_or_default(),
            attack: card.attack,
            defense: card.defense,
            cost: card.cost,
            rarity: card.rarity,
            element: card.element,
            existing_image_url: card.image_url.clone(),
        }
    }

    /// Validate and build the `card` part. The stored image URL is carried
    /// only when editing without a replacement file.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(&self, has_new_file: bool) -> Result<CardPayload, ValidationError> {
        let name = trimmed_or_none(&self.name).ok_or(ValidationError::CardNameRequired)?;
        if name.chars().count() > CARD_NAME_MAX_LEN {
            return Err(ValidationError::CardNameTooLong {
                max: CARD_NAME_MAX_LEN,
            });
        }
        if self.attack < CARD_MIN_ATTACK {
            return Err(ValidationError::AttackTooLow {
                min: CARD_MIN_ATTACK,
            });
        }
        if self.defense < CARD_MIN_DEFENSE {
            return Err(ValidationError::DefenseTooLow {
                min: CARD_MIN_DEFENSE,
            });
        }
        if self.cost < CARD_MIN_COST {
            return Err(ValidationError::CostTooLow { min: CARD_MIN_COST });
        }
        let image_url = if self.id.is_some() && !has_new_file {
            self.existing_image_url.clone()
        } else {
            None
        };
        Ok(CardPayload {
            name,
            description: self.description.trim().to_string(),
            attack: self.attack,
            defense: self.defense,
            cost: self.cost,
            rarity: self.rarity,
            element: self.element,
            image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDraft {
    pub id: Option<CollectionId>,
    pub card_id: CardId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub card_id: CardId,
    pub name: String,
    pub description: String,
}

impl CollectionDraft {
    #[must_use]
    pub const fn new(card_id: CardId) -> Self {
        Self {
            id: None,
            card_id,
            name: String::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn from_collection(collection: &CollectionSummary) -> Self {
        Self {
            id: Some(collection.id),
            card_id: collection.card_id,
            name: collection.name.clone(),
            description: collection.description.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::CollectionNameRequired`] for a blank name.
    pub fn validate(&self) -> Result<CollectionPayload, ValidationError> {
        let name = trimmed_or_none(&self.name).ok_or(ValidationError::CollectionNameRequired)?;
        Ok(CollectionPayload {
            card_id: self.card_id,
            name,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDraft {
    pub id: Option<ImageId>,
    pub collection_id: CollectionId,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub collection_id: CollectionId,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub order_index: i32,
}

impl ImageDraft {
    #[must_use]
    pub const fn new(collection_id: CollectionId) -> Self {
        Self {
            id: None,
            collection_id,
            image_url: String::new(),
            title: String::new(),
            description: String::new(),
            order_index: 0,
        }
    }

    #[must_use]
    pub fn from_image(image: &CollectionImage) -> Self {
        Self {
            id: Some(image.id),
            collection_id: image.collection_id,
            image_url: image.image_url.clone(),
            title: image.title.clone().unwrap_or_default(),
            description: image.description.clone().unwrap_or_default(),
            order_index: image.order_index,
        }
    }

    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(&self) -> Result<ImagePayload, ValidationError> {
        let image_url = trimmed_or_none(&self.image_url).ok_or(ValidationError::ImageUrlRequired)?;
        if self.order_index < 0 {
            return Err(ValidationError::OrderIndexNegative);
        }
        Ok(ImagePayload {
            collection_id: self.collection_id,
            image_url,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            order_index: self.order_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueDraft {
    pub id: Option<crate::model::DialogueId>,
    pub image_id: ImageId,
    pub speaker: String,
    pub text: String,
    pub order_index: i32,
    pub emotion_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialoguePayload {
    pub image_id: ImageId,
    pub text: String,
    pub speaker: String,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_type: Option<String>,
}

impl DialogueDraft {
    #[must_use]
    pub const fn new(image_id: ImageId) -> Self {
        Self {
            id: None,
            image_id,
            speaker: String::new(),
            text: String::new(),
            order_index: 0,
            emotion_type: String::new(),
        }
    }

    #[must_use]
    pub fn from_dialogue(dialogue: &Dialogue) -> Self {
        Self {
            id: Some(dialogue.id),
            image_id: dialogue.image_id,
            speaker: dialogue.speaker.clone(),
            text: dialogue.text.clone(),
            order_index: dialogue.order_index,
            emotion_type: dialogue.emotion_type.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(&self) -> Result<DialoguePayload, ValidationError> {
        let speaker = trimmed_or_none(&self.speaker).ok_or(ValidationError::SpeakerRequired)?;
        let text = trimmed_or_none(&self.text).ok_or(ValidationError::DialogueTextRequired)?;
        if self.order_index < 0 {
            return Err(ValidationError::OrderIndexNegative);
        }
        Ok(DialoguePayload {
            image_id: self.image_id,
            text,
            speaker,
            order_index: self.order_index,
            emotion_type: trimmed_or_none(&self.emotion_type),
        })
    }
}

/// The one buffer an admin manager has open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Card(CardDraft),
    Collection(CollectionDraft),
    Image(ImageDraft),
    Dialogue(DialogueDraft),
}

impl Draft {
    /// Whether this buffer edits an existing record rather than creating one.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        match self {
            Self::Card(d) => d.id.is_some(),
            Self::Collection(d) => d.id.is_some(),
            Self::Image(d) => d.id.is_some(),
            Self::Dialogue(d) => d.id.is_some(),
        }
    }

    /// Run the rules for whichever buffer this is.
    ///
    /// # Errors
    ///
    /// Returns the first rule the buffer breaks.
    pub fn validate(&self, has_new_file: bool) -> Result<(), ValidationError> {
        match self {
            Self::Card(d) => d.validate(has_new_file).map(drop),
            Self::Collection(d) => d.validate().map(drop),
            Self::Image(d) => d.validate().map(drop),
            Self::Dialogue(d) => d.validate().map(drop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_card() -> Card {
        Card {
            id: 3,
            name: "Yuki".into(),
            description: Some("Snow mage".into()),
            attack: 7,
            defense: 4,
            cost: 3,
            rarity: Rarity::Epic,
            element: Element::Water,
            image_url: Some("/uploads/yuki.png".into()),
        }
    }

    #[test]
    fn email_pattern_is_compiled_once() {
        let first = email_pattern().unwrap();
        let second = email_pattern().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(is_email_valid(" mai@example.vn "));
        assert!(!is_email_valid("mai@localhost"));
        assert!(!is_email_valid("mai example@site.com"));
    }

    #[test]
    fn unparseable_numbers_become_zero() {
        assert_eq!(parse_number_input("12"), 12);
        assert_eq!(parse_number_input(" 4 "), 4);
        assert_eq!(parse_number_input("abc"), 0);
        assert_eq!(parse_number_input(""), 0);
    }

    #[test]
    fn default_card_draft_matches_form_defaults() {
        let draft = CardDraft::default();
        assert_eq!((draft.attack, draft.defense, draft.cost), (1, 0, 1));
        assert_eq!(draft.rarity, Rarity::Common);
        assert_eq!(draft.element, Element::Fire);
        assert_eq!(draft.validate(false), Err(ValidationError::CardNameRequired));
    }

    #[test]
    fn card_limits_are_enforced() {
        let mut draft = CardDraft {
            name: "x".repeat(101),
            ..CardDraft::default()
        };
        assert_eq!(
            draft.validate(false),
            Err(ValidationError::CardNameTooLong { max: 100 })
        );
        draft.name = "Ok".into();
        draft.attack = parse_number_input("zero");
        assert_eq!(
            draft.validate(false),
            Err(ValidationError::AttackTooLow { min: 1 })
        );
        draft.attack = 2;
        draft.cost = 0;
        assert_eq!(draft.validate(false), Err(ValidationError::CostTooLow { min: 1 }));
    }

    #[test]
    fn edit_without_file_keeps_stored_image() {
        let draft = CardDraft::from_card(&stored_card());
        let payload = draft.validate(false).unwrap();
        assert_eq!(payload.image_url.as_deref(), Some("/uploads/yuki.png"));

        let with_file = draft.validate(true).unwrap();
        assert!(with_file.image_url.is_none());
        let json = serde_json::to_string(&with_file).unwrap();
        assert!(!json.contains("imageUrl"));
    }

    #[test]
    fn new_card_never_sends_image_url() {
        let draft = CardDraft {
            name: "Hana".into(),
            existing_image_url: Some("/stale.png".into()),
            ..CardDraft::default()
        };
        assert!(draft.validate(false).unwrap().image_url.is_none());
    }

    #[test]
    fn gallery_drafts_require_their_fields() {
        let mut collection = CollectionDraft::new(4);
        collection.name = "   ".into();
        assert_eq!(
            collection.validate(),
            Err(ValidationError::CollectionNameRequired)
        );
        collection.name = " Beach ".into();
        assert_eq!(collection.validate().unwrap().name, "Beach");

        let mut image = ImageDraft::new(2);
        assert_eq!(image.validate(), Err(ValidationError::ImageUrlRequired));
        image.image_url = "https://img/1.png".into();
        image.order_index = -1;
        assert_eq!(image.validate(), Err(ValidationError::OrderIndexNegative));

        let mut dialogue = DialogueDraft::new(9);
        dialogue.speaker = "Yuki".into();
        assert_eq!(
            dialogue.validate(),
            Err(ValidationError::DialogueTextRequired)
        );
        dialogue.text = "Hello".into();
        assert!(dialogue.validate().unwrap().emotion_type.is_none());
    }

    #[test]
    fn register_requires_a_plausible_email() {
        let mut draft = AuthDraft {
            mode: AuthMode::Register,
            username: "rin".into(),
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::EmailInvalid));
        draft.email = "rin@example.com".into();
        let creds = draft.validate().unwrap();
        assert_eq!(creds.email.as_deref(), Some("rin@example.com"));

        draft.mode = AuthMode::Login;
        let json = serde_json::to_string(&draft.validate().unwrap()).unwrap();
        assert_eq!(json, r#"{"username":"rin","password":"secret"}"#);
    }

    #[test]
    fn tagged_draft_dispatches() {
        let draft = Draft::Card(CardDraft::from_card(&stored_card()));
        assert!(draft.is_edit());
        assert!(draft.validate(false).is_ok());
        assert!(!Draft::Collection(CollectionDraft::new(1)).is_edit());
        assert_eq!(
            Draft::Collection(CollectionDraft::new(1)).validate(false),
            Err(ValidationError::CollectionNameRequired)
        );
    }
}
