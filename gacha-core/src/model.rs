//! Wire-level data model shared by every view.
//!
//! Field names follow the backend's camelCase JSON. Lists that the backend
//! may send as `null` deserialize to empty vectors.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type CardId = i64;
pub type CollectionId = i64;
pub type ImageId = i64;
pub type DialogueId = i64;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Authenticated player record as returned by login, register and profile refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub gems: i64,
    #[serde(default)]
    pub experience_points: i64,
    #[serde(default)]
    pub level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    #[must_use]
    pub const fn balance(&self, currency: Currency) -> i64 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Gems => self.gems,
        }
    }
}

/// The two balances a pull can be paid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Coins,
    Gems,
}

impl Currency {
    #[must_use]
    pub const fn uses_gems(self) -> bool {
        matches!(self, Self::Gems)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Gems => "gems",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rarity tier. The derived `Ord` is the one and only tier ordering:
/// `Common < Rare < Epic < Legendary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
        }
    }

    /// Border/badge colour used by every view that colour-codes rarity.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Common => "#808080",
            Self::Rare => "#0066cc",
            Self::Epic => "#9933cc",
            Self::Legendary => "#ff9900",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Common => "⚪",
            Self::Rare => "🔵",
            Self::Epic => "🟣",
            Self::Legendary => "🟡",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("rarity", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
}

impl Element {
    pub const ALL: [Self; 6] = [
        Self::Fire,
        Self::Water,
        Self::Earth,
        Self::Air,
        Self::Light,
        Self::Dark,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "FIRE",
            Self::Water => "WATER",
            Self::Earth => "EARTH",
            Self::Air => "AIR",
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Fire => "🔥",
            Self::Water => "💧",
            Self::Earth => "🌍",
            Self::Air => "💨",
            Self::Light => "✨",
            Self::Dark => "🌙",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("element", s))
    }
}

/// Returned when a select box or CLI flag names an enum variant that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Catalogue card. Read-only outside the admin card manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub attack: i32,
    pub defense: i32,
    pub cost: i32,
    pub rarity: Rarity,
    pub element: Element,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Curated gallery attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub id: CollectionId,
    pub card_id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<CollectionImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionImage {
    pub id: ImageId,
    pub collection_id: CollectionId,
    pub image_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dialogues: Vec<Dialogue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub id: DialogueId,
    pub image_id: ImageId,
    pub text: String,
    pub speaker: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub emotion_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Which pull was performed and how it was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullType {
    SingleCoin,
    SingleGem,
    TenCoin,
    TenGem,
}

impl PullType {
    #[must_use]
    pub const fn currency(self) -> Currency {
        match self {
            Self::SingleCoin | Self::TenCoin => Currency::Coins,
            Self::SingleGem | Self::TenGem => Currency::Gems,
        }
    }
}

/// Response body of both pull endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GachaResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards: Vec<Card>,
    pub pull_type: PullType,
    pub total_cost: i64,
    pub remaining_coins: i64,
    pub remaining_gems: i64,
}

impl GachaResult {
    /// Copy the post-pull balances onto the session user.
    #[must_use]
    pub fn apply_to(&self, user: &User) -> User {
        User {
            coins: self.remaining_coins,
            gems: self.remaining_gems,
            ..user.clone()
        }
    }
}
