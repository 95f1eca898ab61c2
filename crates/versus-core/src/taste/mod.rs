//! The taste pipeline: pure functions turning a user's choice history into
//! rankings, recommendations and affinity reports.
//!
//! Nothing here touches storage. Services in [`crate::service`] fetch the
//! inputs, call these functions step by step, and fetch whatever the next
//! step needs.

pub mod aggregate;
pub mod exclusion;
pub mod keywords;
pub mod leaderboard;
pub mod motivation;
pub mod similarity;
