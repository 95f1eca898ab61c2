//! Taste pipeline and repository trait definitions for Versus.
//!
//! This crate holds the scoring core (pure functions over choice histories)
//! and the "ports" (repository and content-provider traits) that the
//! infrastructure layer implements. It depends only on `versus-types` --
//! never on `versus-infra` or any database/IO crate.

pub mod content;
pub mod repository;
pub mod service;
pub mod taste;
pub mod tally;
