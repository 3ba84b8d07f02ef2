//! Utilities around the core engine: match running and test support.
pub mod bot_game;
pub mod tiny;
