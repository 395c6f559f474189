//! Read-only access to the category/tag reference vocabulary.

use crate::model::taxonomy::{Category, Tag};
use crate::repo::post_repo::RepoResult;
use rusqlite::{Connection, OptionalExtension};

pub trait TaxonomyRepository {
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
    fn category_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;
    fn tag_by_slug(&self, slug: &str) -> RepoResult<Option<Tag>>;
}

pub struct SqliteTaxonomyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaxonomyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn list_pairs(&self, table: &'static str) -> RepoResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name, slug FROM {table} ORDER BY position ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next()? {
            pairs.push((row.get(0)?, row.get(1)?));
        }
        Ok(pairs)
    }

    fn pair_by_slug(&self, table: &'static str, slug: &str) -> RepoResult<Option<(String, String)>> {
        let pair = self
            .conn
            .query_row(
                &format!("SELECT name, slug FROM {table} WHERE slug = ?1 COLLATE NOCASE;"),
                [slug.trim()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(pair)
    }
}

impl TaxonomyRepository for SqliteTaxonomyRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self
            .list_pairs("categories")?
            .into_iter()
            .map(|(name, slug)| Category { name, slug })
            .collect())
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        Ok(self
            .list_pairs("tags")?
            .into_iter()
            .map(|(name, slug)| Tag { name, slug })
            .collect())
    }

    fn category_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        Ok(self
            .pair_by_slug("categories", slug)?
            .map(|(name, slug)| Category { name, slug }))
    }

    fn tag_by_slug(&self, slug: &str) -> RepoResult<Option<Tag>> {
        Ok(self
            .pair_by_slug("tags", slug)?
            .map(|(name, slug)| Tag { name, slug }))
    }
}
