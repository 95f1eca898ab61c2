//! Remote content catalog port.

pub mod provider;
