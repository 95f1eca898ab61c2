//! Remote content catalog adapters.

pub mod igdb;
