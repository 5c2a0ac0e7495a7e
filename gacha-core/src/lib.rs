//! Waifu Card client core
//!
//! Platform-agnostic client logic for the Waifu Card gacha game: the session
//! lifecycle, route guard, typed backend client, the derived card pipeline,
//! admin form drafts and the per-page state machines. Browser and terminal
//! front ends plug in storage and HTTP through [`SessionStorage`] and
//! [`ApiTransport`].
#![forbid(unsafe_code)]

pub mod api;
pub mod constants;
pub mod forms;
pub mod gacha;
pub mod guard;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod views;

// Re-export commonly used types
pub use api::{
    ApiError, ApiRequest, ApiResponse, ApiResult, ApiTransport, GachaClient, HttpMethod,
    MultipartPart, RequestBody,
};
pub use forms::{
    AuthDraft, AuthMode, CardDraft, CollectionDraft, Credentials, DialogueDraft, Draft, ImageDraft,
    PendingUpload, ValidationError, parse_number_input,
};
pub use gacha::{GachaError, PullKind, PullPlan, plan_pull};
pub use guard::{GuardDecision, GuardState};
pub use model::{
    Card, CardId, CollectionImage, CollectionSummary, Currency, Dialogue, Element, GachaResult,
    PullType, Rarity, User, UserId,
};
pub use pipeline::{
    CardFilter, CollectionCounts, OwnedSet, SortKey, ViewCache, ViewQuery, derive_view,
};
pub use session::{MemoryStorage, SessionError, SessionStorage, SessionStore};
pub use views::{Notice, NoticeArg};
