// Presentation layer - HTTP front for user events and the drawn board
pub mod app_state;
pub mod error;
pub mod handlers;
