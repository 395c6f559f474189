//! Comment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Inserts into a missing post fail with `PostNotFound` and write nothing.
//! - Listing is newest first (`created_at DESC, id DESC`).

use crate::db::bool_to_int;
use crate::model::comment::{Comment, CommentId};
use crate::model::post::PostId;
use crate::repo::post_repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    post_id,
    author,
    created_at,
    content,
    approved
FROM comments";

/// Fully-resolved comment row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub post_id: PostId,
    pub author: String,
    pub created_at: i64,
    pub content: String,
    pub approved: bool,
}

/// Query options for listing comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentListQuery {
    pub post_id: Option<PostId>,
    pub approved_only: bool,
}

/// Repository interface for comment operations.
pub trait CommentRepository {
    /// Whether `post_id` names an existing post that can own comments.
    fn post_exists(&self, post_id: PostId) -> RepoResult<bool>;
    fn insert_comment(&self, record: &CommentRecord) -> RepoResult<CommentId>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Returns `false` when the comment does not exist.
    fn set_approval(&self, id: CommentId, approved: bool) -> RepoResult<bool>;
    /// Returns `false` when the comment does not exist.
    fn delete_comment(&self, id: CommentId) -> RepoResult<bool>;
    fn list_comments(&self, query: &CommentListQuery) -> RepoResult<Vec<Comment>>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn post_exists(&self, post_id: PostId) -> RepoResult<bool> {
        post_exists(self.conn, post_id)
    }

    fn insert_comment(&self, record: &CommentRecord) -> RepoResult<CommentId> {
        let tx = self.conn.unchecked_transaction()?;
        if !post_exists(&tx, record.post_id)? {
            return Err(RepoError::PostNotFound(record.post_id));
        }

        tx.execute(
            "INSERT INTO comments (
                post_id,
                author,
                created_at,
                content,
                approved
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.post_id.0,
                record.author.as_str(),
                record.created_at,
                record.content.as_str(),
                bool_to_int(record.approved),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(CommentId(id))
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.0])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }
        Ok(None)
    }

    fn set_approval(&self, id: CommentId, approved: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE comments SET approved = ?1 WHERE id = ?2;",
            params![bool_to_int(approved), id.0],
        )?;
        Ok(changed > 0)
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id.0])?;
        Ok(changed > 0)
    }

    fn list_comments(&self, query: &CommentListQuery) -> RepoResult<Vec<Comment>> {
        let mut sql = format!("{COMMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(post_id) = query.post_id {
            sql.push_str(" AND post_id = ?");
            bind_values.push(Value::Integer(post_id.0));
        }
        if query.approved_only {
            sql.push_str(" AND approved = 1");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }
}

fn post_exists(conn: &Connection, post_id: PostId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1);",
        [post_id.0],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let approved = match row.get::<_, i64>("approved")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid approved value `{other}` in comments.approved"
            )));
        }
    };

    Ok(Comment {
        id: CommentId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        author: row.get("author")?,
        created_at: row.get("created_at")?,
        content: row.get("content")?,
        approved,
    })
}
