//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `posts` and `post_tags` tables.
//! - Own collection placement (front/back insertion) and tag ordering.
//! - Define the repository-wide error type shared by every catalog repository.
//!
//! # Invariants
//! - Post row and its tag rows are written in one transaction.
//! - `position` never changes after insertion; replacement keeps it.
//! - Missing ids on replace/delete are reported as `false`, never as errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{bool_to_int, DbError};
use crate::model::comment::CommentValidationError;
use crate::model::post::{Post, PostId, PostValidationError};
use crate::model::user::UserValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const POST_SELECT_SQL: &str = "SELECT
    id,
    slug,
    title,
    author,
    published_at,
    category,
    excerpt,
    content,
    image_url,
    featured,
    views
FROM posts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all catalog repositories.
#[derive(Debug)]
pub enum RepoError {
    InvalidPost(PostValidationError),
    InvalidComment(CommentValidationError),
    InvalidUser(UserValidationError),
    Db(DbError),
    /// A write referenced a post that does not exist.
    PostNotFound(PostId),
    /// A unique field already holds this value.
    Duplicate {
        field: &'static str,
        value: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPost(err) => write!(f, "{err}"),
            Self::InvalidComment(err) => write!(f, "{err}"),
            Self::InvalidUser(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::Duplicate { field, value } => write!(f, "{field} already exists: `{value}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPost(err) => Some(err),
            Self::InvalidComment(err) => Some(err),
            Self::InvalidUser(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::PostNotFound(_) | Self::Duplicate { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<PostValidationError> for RepoError {
    fn from(value: PostValidationError) -> Self {
        Self::InvalidPost(value)
    }
}

impl From<CommentValidationError> for RepoError {
    fn from(value: CommentValidationError) -> Self {
        Self::InvalidComment(value)
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Full stored shape of a post, minus its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub published_at: i64,
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub featured: bool,
    pub views: u64,
}

/// Where a new post lands in the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

/// Listing order for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// Collection order: front insertions first.
    #[default]
    Collection,
    /// Timestamp descending, id descending on ties.
    NewestFirst,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    /// Inserts a post and its tags, returning the assigned id.
    fn insert_post(&self, record: &PostRecord, placement: Placement) -> RepoResult<PostId>;
    /// Replaces every stored field of an existing post. Returns `false` when absent.
    fn replace_post(&self, id: PostId, record: &PostRecord) -> RepoResult<bool>;
    /// Hard-deletes a post (comments cascade). Returns `false` when absent.
    fn delete_post(&self, id: PostId) -> RepoResult<bool>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>>;
    fn list_posts(&self, order: PostOrder) -> RepoResult<Vec<Post>>;
    /// Whether another post (other than `exclude`) already uses `slug`.
    fn slug_in_use(&self, slug: &str, exclude: Option<PostId>) -> RepoResult<bool>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn insert_post(&self, record: &PostRecord, placement: Placement) -> RepoResult<PostId> {
        let views = views_to_db(record.views)?;
        let tx = self.conn.unchecked_transaction()?;

        let position_sql = match placement {
            Placement::Front => "SELECT COALESCE(MIN(position), 0) - 1 FROM posts;",
            Placement::Back => "SELECT COALESCE(MAX(position), 0) + 1 FROM posts;",
        };
        let position: i64 = tx.query_row(position_sql, [], |row| row.get(0))?;

        tx.execute(
            "INSERT INTO posts (
                position,
                slug,
                title,
                author,
                published_at,
                category,
                excerpt,
                content,
                image_url,
                featured,
                views
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                position,
                record.slug.as_str(),
                record.title.as_str(),
                record.author.as_str(),
                record.published_at,
                record.category.as_str(),
                record.excerpt.as_str(),
                record.content.as_str(),
                record.image_url.as_str(),
                bool_to_int(record.featured),
                views,
            ],
        )?;
        let id = tx.last_insert_rowid();
        write_tags(&tx, id, &record.tags)?;
        tx.commit()?;

        Ok(PostId(id))
    }

    fn replace_post(&self, id: PostId, record: &PostRecord) -> RepoResult<bool> {
        let views = views_to_db(record.views)?;
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE posts
             SET
                slug = ?1,
                title = ?2,
                author = ?3,
                published_at = ?4,
                category = ?5,
                excerpt = ?6,
                content = ?7,
                image_url = ?8,
                featured = ?9,
                views = ?10
             WHERE id = ?11;",
            params![
                record.slug.as_str(),
                record.title.as_str(),
                record.author.as_str(),
                record.published_at,
                record.category.as_str(),
                record.excerpt.as_str(),
                record.content.as_str(),
                record.image_url.as_str(),
                bool_to_int(record.featured),
                views,
                id.0,
            ],
        )?;

        if changed == 0 {
            return Ok(false);
        }

        tx.execute("DELETE FROM post_tags WHERE post_id = ?1;", [id.0])?;
        write_tags(&tx, id.0, &record.tags)?;
        tx.commit()?;
        Ok(true)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id.0])?;
        Ok(changed > 0)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.0])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn list_posts(&self, order: PostOrder) -> RepoResult<Vec<Post>> {
        let order_sql = match order {
            PostOrder::Collection => "ORDER BY position ASC",
            PostOrder::NewestFirst => "ORDER BY published_at DESC, id DESC",
        };
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} {order_sql};"))?;
        let mut rows = stmt.query([])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(self.conn, row)?);
        }
        Ok(posts)
    }

    fn slug_in_use(&self, slug: &str, exclude: Option<PostId>) -> RepoResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM posts WHERE slug = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1;",
                params![slug, exclude.map(|id| id.0)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn write_tags(conn: &Connection, post_id: i64, tags: &[String]) -> RepoResult<()> {
    for (position, tag) in tags.iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|_| RepoError::InvalidData(format!("tag position overflow for post {post_id}")))?;
        conn.execute(
            "INSERT INTO post_tags (post_id, position, name) VALUES (?1, ?2, ?3);",
            params![post_id, position, tag.as_str()],
        )?;
    }
    Ok(())
}

fn load_tags(conn: &Connection, post_id: i64) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM post_tags
         WHERE post_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([post_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}

fn parse_post_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Post> {
    let id: i64 = row.get("id")?;

    let featured = match row.get::<_, i64>("featured")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid featured value `{other}` in posts.featured"
            )));
        }
    };

    let raw_views: i64 = row.get("views")?;
    let views = u64::try_from(raw_views).map_err(|_| {
        RepoError::InvalidData(format!("invalid views value `{raw_views}` in posts.views"))
    })?;

    Ok(Post {
        id: PostId(id),
        slug: row.get("slug")?,
        title: row.get("title")?,
        author: row.get("author")?,
        published_at: row.get("published_at")?,
        category: row.get("category")?,
        tags: load_tags(conn, id)?,
        excerpt: row.get("excerpt")?,
        content: row.get("content")?,
        image_url: row.get("image_url")?,
        featured,
        views,
    })
}

fn views_to_db(views: u64) -> RepoResult<i64> {
    i64::try_from(views)
        .map_err(|_| RepoError::InvalidData(format!("view counter `{views}` exceeds storage range")))
}
