//! Blog catalog domain model.
//!
//! # Responsibility
//! - Define canonical records for posts, comments, users, media assets and
//!   the category/tag reference vocabulary.
//! - Keep write-side validation next to the input shapes it checks.
//!
//! # Invariants
//! - Identifiers are assigned by storage, never by callers.
//! - Deletion is a hard delete; there are no tombstones.

pub mod comment;
pub mod media;
pub mod post;
pub mod taxonomy;
pub mod user;
