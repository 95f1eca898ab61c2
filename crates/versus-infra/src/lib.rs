//! Infrastructure layer for Versus.
//!
//! Contains implementations of the traits defined in `versus-core`: SQLite
//! storage, the IGDB content provider, and the config/data-dir loaders.

pub mod config;
pub mod content;
pub mod sqlite;
