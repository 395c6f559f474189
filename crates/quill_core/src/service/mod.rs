//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply write-side defaults and emit metadata-only audit logs.
//!
//! # Invariants
//! - Services never bypass repository contracts.
//! - Services remain storage-agnostic (generic over repository traits).

pub mod comment_service;
pub mod media_service;
pub mod post_service;
pub mod user_service;
