//! Observability for Versus: subscriber setup and shared span attribute names.

pub mod taste_attrs;
pub mod tracing_setup;
