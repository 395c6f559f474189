//! Catalog store: the single owner of all blog collections.
//!
//! # Responsibility
//! - Own the in-memory connection and configuration for one process.
//! - Expose every catalog read/mutation through one API, delegating to the
//!   use-case services.
//! - Map repository/assist failures onto the caller-facing error taxonomy.
//!
//! # Invariants
//! - Mutations take `&mut self`: one writer at a time by construction.
//! - Missing ids on delete/update/moderation are no-ops reported by return
//!   value (`false` / `None`), never errors.
//! - State is volatile; dropping the store drops every collection.

use crate::assist::generator::{AssistError, AssistService, ContentGenerator};
use crate::config::{CatalogConfig, ConfigError};
use crate::db::{open_db_in_memory, DbError};
use crate::model::comment::{Comment, CommentDraft, CommentId};
use crate::model::media::{MediaAsset, MediaId};
use crate::model::post::{Post, PostDraft, PostId};
use crate::model::taxonomy::{Category, Tag};
use crate::model::user::{NewUser, User, UserId, UserRole};
use crate::query::view::{featured_posts, query_posts, PostFilter};
use crate::repo::comment_repo::SqliteCommentRepository;
use crate::repo::media_repo::SqliteMediaRepository;
use crate::repo::post_repo::{PostOrder, RepoError, SqlitePostRepository};
use crate::repo::stats::{load_catalog_stats, CatalogStats};
use crate::repo::taxonomy_repo::{SqliteTaxonomyRepository, TaxonomyRepository};
use crate::repo::user_repo::SqliteUserRepository;
use crate::seed::seed_demo_catalog;
use crate::service::comment_service::CommentService;
use crate::service::media_service::MediaService;
use crate::service::post_service::{PostDefaults, PostService};
use crate::service::user_service::UserService;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Caller-facing catalog error.
#[derive(Debug)]
pub enum CatalogError {
    /// Input rejected before any write.
    Validation(String),
    /// A write referenced a post that does not exist.
    NotFound(PostId),
    /// Username or email already taken.
    Duplicate { field: &'static str, value: String },
    /// Generator failed or produced nothing. Not retried.
    ExternalService(String),
    Config(ConfigError),
    Storage(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "post not found: {id}"),
            Self::Duplicate { field, value } => write!(f, "{field} already exists: `{value}`"),
            Self::ExternalService(message) => write!(f, "content generation failed: {message}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidPost(err) => Self::Validation(err.to_string()),
            RepoError::InvalidComment(err) => Self::Validation(err.to_string()),
            RepoError::InvalidUser(err) => Self::Validation(err.to_string()),
            RepoError::PostNotFound(id) => Self::NotFound(id),
            RepoError::Duplicate { field, value } => Self::Duplicate { field, value },
            other => Self::Storage(other),
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

impl From<ConfigError> for CatalogError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<AssistError> for CatalogError {
    fn from(value: AssistError) -> Self {
        match value {
            AssistError::ExternalService(message) => Self::ExternalService(message),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// One page of the public listing, detached from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub posts: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Authoritative owner of posts, comments, users, taxonomy and media.
pub struct CatalogStore {
    conn: Connection,
    config: CatalogConfig,
}

impl CatalogStore {
    /// Opens an empty catalog (reference vocabulary only).
    pub fn open(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let conn = open_db_in_memory()?;
        info!(
            "event=catalog_open module=catalog status=ok page_size={} featured={}",
            config.page_size,
            config.featured_post_ids.len()
        );
        Ok(Self { conn, config })
    }

    /// Opens a catalog populated with the demo posts, comments and users.
    pub fn open_seeded(config: CatalogConfig) -> CatalogResult<Self> {
        let store = Self::open(config)?;
        seed_demo_catalog(&store.conn)?;
        info!("event=catalog_seed module=catalog status=ok");
        Ok(store)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn post_service(&self) -> PostService<SqlitePostRepository<'_>> {
        PostService::new(
            SqlitePostRepository::new(&self.conn),
            PostDefaults {
                author: self.config.default_post_author.clone(),
                image_url: self.config.default_cover_image.clone(),
            },
        )
    }

    fn comment_service(&self) -> CommentService<SqliteCommentRepository<'_>> {
        CommentService::new(
            SqliteCommentRepository::new(&self.conn),
            self.config.guest_comment_author.as_str(),
        )
    }

    fn user_service(&self) -> UserService<SqliteUserRepository<'_>> {
        UserService::new(SqliteUserRepository::new(&self.conn))
    }

    fn media_service(&self) -> MediaService<SqliteMediaRepository<'_>> {
        MediaService::new(SqliteMediaRepository::new(&self.conn))
    }

    fn taxonomy(&self) -> SqliteTaxonomyRepository<'_> {
        SqliteTaxonomyRepository::new(&self.conn)
    }

    // Posts

    /// Creates a post at the front of the collection.
    pub fn create_post(&mut self, draft: &PostDraft) -> CatalogResult<Post> {
        Ok(self.post_service().create_post(draft)?)
    }

    /// Replaces a post in place. `Ok(None)` when `id` is absent.
    pub fn update_post(&mut self, id: PostId, draft: &PostDraft) -> CatalogResult<Option<Post>> {
        Ok(self.post_service().update_post(id, draft)?)
    }

    /// Deletes a post and its comments. `Ok(false)` when `id` is absent.
    pub fn delete_post(&mut self, id: PostId) -> CatalogResult<bool> {
        Ok(self.post_service().delete_post(id)?)
    }

    /// Posts in collection order.
    pub fn posts(&self) -> CatalogResult<Vec<Post>> {
        Ok(self.post_service().list_posts(PostOrder::Collection)?)
    }

    /// Posts sorted by timestamp, newest first (admin listing).
    pub fn posts_newest_first(&self) -> CatalogResult<Vec<Post>> {
        Ok(self.post_service().list_posts(PostOrder::NewestFirst)?)
    }

    pub fn post(&self, id: PostId) -> CatalogResult<Option<Post>> {
        Ok(self.post_service().get_post(id)?)
    }

    pub fn post_by_slug(&self, slug: &str) -> CatalogResult<Option<Post>> {
        Ok(self.post_service().get_post_by_slug(slug)?)
    }

    /// Runs the public listing query over the current collection.
    pub fn listing(&self, filter: &PostFilter, page: usize) -> CatalogResult<ListingPage> {
        let posts = self.posts()?;
        let result = query_posts(&posts, filter, page, self.config.page_size());
        Ok(ListingPage {
            posts: result.posts.into_iter().cloned().collect(),
            page: result.page,
            total_pages: result.total_pages,
            total_matches: result.total_matches,
        })
    }

    /// Configured featured posts present in the collection.
    pub fn featured_posts(&self) -> CatalogResult<Vec<Post>> {
        let posts = self.posts()?;
        Ok(featured_posts(&posts, &self.config.featured_post_ids)
            .into_iter()
            .cloned()
            .collect())
    }

    // Comments

    /// Submits an unapproved comment.
    ///
    /// # Errors
    /// - `NotFound` when `post_id` does not exist.
    /// - `Validation` for a blank body.
    pub fn add_comment(&mut self, post_id: PostId, draft: &CommentDraft) -> CatalogResult<Comment> {
        Ok(self.comment_service().add_comment(post_id, draft)?)
    }

    /// `Ok(false)` when `id` is absent.
    pub fn set_comment_approval(&mut self, id: CommentId, approved: bool) -> CatalogResult<bool> {
        Ok(self.comment_service().set_approval(id, approved)?)
    }

    /// `Ok(false)` when `id` is absent.
    pub fn delete_comment(&mut self, id: CommentId) -> CatalogResult<bool> {
        Ok(self.comment_service().delete_comment(id)?)
    }

    pub fn comment(&self, id: CommentId) -> CatalogResult<Option<Comment>> {
        Ok(self.comment_service().get_comment(id)?)
    }

    /// Approved comments of a post, newest first.
    pub fn public_comments(&self, post_id: PostId) -> CatalogResult<Vec<Comment>> {
        Ok(self.comment_service().public_comments(post_id)?)
    }

    /// All comments, newest first.
    pub fn comments_for_moderation(&self) -> CatalogResult<Vec<Comment>> {
        Ok(self.comment_service().comments_for_moderation()?)
    }

    // Users

    /// # Errors
    /// - `Duplicate` when username or email is taken.
    /// - `Validation` for blank fields.
    pub fn create_user(&mut self, candidate: &NewUser) -> CatalogResult<User> {
        Ok(self.user_service().create_user(candidate)?)
    }

    /// `Ok(false)` when `id` is absent.
    pub fn set_user_role(&mut self, id: UserId, role: UserRole) -> CatalogResult<bool> {
        Ok(self.user_service().set_role(id, role)?)
    }

    /// `Ok(false)` when `id` is absent.
    pub fn delete_user(&mut self, id: UserId) -> CatalogResult<bool> {
        Ok(self.user_service().delete_user(id)?)
    }

    pub fn user(&self, id: UserId) -> CatalogResult<Option<User>> {
        Ok(self.user_service().get_user(id)?)
    }

    /// Users sorted by username.
    pub fn users(&self) -> CatalogResult<Vec<User>> {
        Ok(self.user_service().list_users()?)
    }

    // Taxonomy

    pub fn categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.taxonomy().list_categories()?)
    }

    pub fn tags(&self) -> CatalogResult<Vec<Tag>> {
        Ok(self.taxonomy().list_tags()?)
    }

    /// Resolves a `?category=<slug>` link to its category.
    pub fn category_by_slug(&self, slug: &str) -> CatalogResult<Option<Category>> {
        Ok(self.taxonomy().category_by_slug(slug)?)
    }

    /// Resolves a `?tag=<slug>` link to its tag.
    pub fn tag_by_slug(&self, slug: &str) -> CatalogResult<Option<Tag>> {
        Ok(self.taxonomy().tag_by_slug(slug)?)
    }

    // Media

    pub fn upload_media(&mut self, name: &str, url: &str) -> CatalogResult<MediaAsset> {
        Ok(self.media_service().add_asset(name, url)?)
    }

    /// Generates an image and stores it in the library.
    ///
    /// # Errors
    /// - `Validation` for a blank prompt.
    /// - `ExternalService` when generation fails; nothing is stored.
    pub fn generate_media<G: ContentGenerator>(
        &mut self,
        assist: &AssistService<G>,
        prompt: &str,
    ) -> CatalogResult<MediaAsset> {
        let url = assist.generate_image(prompt)?;
        Ok(self.media_service().add_generated_asset(prompt, &url)?)
    }

    /// `Ok(false)` when `id` is absent.
    pub fn delete_media(&mut self, id: MediaId) -> CatalogResult<bool> {
        Ok(self.media_service().delete_asset(id)?)
    }

    /// Newest first.
    pub fn media(&self) -> CatalogResult<Vec<MediaAsset>> {
        Ok(self.media_service().list_assets()?)
    }

    // Dashboard

    pub fn stats(&self) -> CatalogResult<CatalogStats> {
        Ok(load_catalog_stats(&self.conn)?)
    }
}
