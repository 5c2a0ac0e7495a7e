pub mod admin_nav;
pub mod card_tile;
pub mod collection_list;
pub mod fallback_image;
pub mod field;
pub mod header;
pub mod language_switcher;
pub mod notice;
