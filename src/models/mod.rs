//! Data models for the Lente marketplace client.
//!
//! These models match the backend JSON contract exactly for seamless interoperability.

mod availability;
mod comment;

pub use availability::*;
pub use comment::*;
