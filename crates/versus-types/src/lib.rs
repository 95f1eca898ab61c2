//! Shared domain types for Versus.
//!
//! This crate contains the domain types used across the Versus workspace:
//! users, catalog items, choice records, the derived taste reports, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod choice;
pub mod config;
pub mod error;
pub mod id;
pub mod item;
pub mod taste;
pub mod user;
