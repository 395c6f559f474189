//! Aggregate counters for the admin dashboard.

use crate::repo::post_repo::{RepoError, RepoResult};
use rusqlite::Connection;
use serde::Serialize;

/// Dashboard snapshot computed in one pass over the catalog tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_posts: u64,
    pub total_comments: u64,
    pub unapproved_comments: u64,
    pub total_users: u64,
    pub total_views: u64,
}

/// Loads dashboard counters.
pub fn load_catalog_stats(conn: &Connection) -> RepoResult<CatalogStats> {
    let (posts, comments, unapproved, users, views): (i64, i64, i64, i64, i64) = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM posts),
            (SELECT COUNT(*) FROM comments),
            (SELECT COUNT(*) FROM comments WHERE approved = 0),
            (SELECT COUNT(*) FROM users),
            (SELECT COALESCE(SUM(views), 0) FROM posts);",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
    )?;

    Ok(CatalogStats {
        total_posts: count_to_u64("posts", posts)?,
        total_comments: count_to_u64("comments", comments)?,
        unapproved_comments: count_to_u64("unapproved comments", unapproved)?,
        total_users: count_to_u64("users", users)?,
        total_views: count_to_u64("views", views)?,
    })
}

fn count_to_u64(label: &str, value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative {label} count `{value}`")))
}
