//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts, one per collection.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories are the only code that issues catalog SQL.
//! - Missing ids on mutations are reported as `false`, not as errors; only
//!   writes that *reference* another record (comment -> post) fail with
//!   `PostNotFound`.

pub mod comment_repo;
pub mod media_repo;
pub mod post_repo;
pub mod stats;
pub mod taxonomy_repo;
pub mod user_repo;
