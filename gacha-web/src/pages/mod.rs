pub mod admin_cards;
pub mod admin_galleries;
pub mod battle;
pub mod collection;
pub mod dashboard;
pub mod gacha;
pub mod login;
pub mod not_found;
