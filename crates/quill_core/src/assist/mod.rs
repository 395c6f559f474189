//! AI-assisted post writing.
//!
//! The concrete API client lives outside core; only the
//! [`generator::ContentGenerator`] trait crosses the boundary.

pub mod generator;
