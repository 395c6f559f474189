//! Core domain logic for the Quill blog catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod access;
pub mod assist;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use access::policy::{allowed_actions, is_allowed, AccessError, Action, Session};
pub use assist::generator::{
    AssistError, AssistService, ContentGenerator, GenerationError, TextTarget,
    UnconfiguredGenerator,
};
pub use config::{CatalogConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::comment::{Comment, CommentDraft, CommentId};
pub use model::media::{MediaAsset, MediaId};
pub use model::post::{Post, PostDraft, PostId};
pub use model::taxonomy::{Category, Tag};
pub use model::user::{NewUser, User, UserId, UserRole};
pub use query::view::{query_posts, BrowseState, PostFilter, PostPage};
pub use repo::stats::CatalogStats;
pub use store::{CatalogError, CatalogResult, CatalogStore, ListingPage};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
