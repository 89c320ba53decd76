// Handlers module - one thin axum handler per forwarded resource

pub mod catalog;
pub mod clubs;
pub mod events;
pub mod session;
