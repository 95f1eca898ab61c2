//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and the pure taste pipeline. They
//! depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod catalog;
pub mod taste;
pub mod user;
pub mod vote;

#[cfg(test)]
pub(crate) mod mock;
