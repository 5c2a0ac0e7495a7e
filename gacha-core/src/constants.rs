//! Centralized client constants for the gacha game.
//!
//! Pull prices mirror the backend table so the client can refuse an
//! unaffordable pull before any request leaves the browser. The backend
//! remains authoritative: it re-validates and deducts on its side.

// Backend ------------------------------------------------------------------
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

// Durable client state -----------------------------------------------------
pub const SESSION_STORAGE_KEY: &str = "waifuCardUser";
pub const LANGUAGE_STORAGE_KEY: &str = "waifu-lang";

// Pull pricing -------------------------------------------------------------
pub const SINGLE_PULL_COST_COINS: i64 = 100;
pub const SINGLE_PULL_COST_GEMS: i64 = 1;
pub const TEN_PULL_COST_COINS: i64 = 900;
pub const TEN_PULL_COST_GEMS: i64 = 9;
pub const TEN_PULL_SIZE: usize = 10;

// Admin form limits --------------------------------------------------------
pub const CARD_NAME_MAX_LEN: usize = 100;
pub const CARD_MIN_ATTACK: i32 = 1;
pub const CARD_MIN_DEFENSE: i32 = 0;
pub const CARD_MIN_COST: i32 = 1;

// Presentation -------------------------------------------------------------
pub const FALLBACK_IMAGE: &str = "/404.jpg";
pub const BATTLE_SEARCH_DELAY_MS: u32 = 2_000;
