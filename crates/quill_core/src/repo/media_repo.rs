//! Media library repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Asset ids are UUID strings; unparsable ids are rejected on read.
//! - Listing is newest first.

use crate::model::media::{MediaAsset, MediaId};
use crate::repo::post_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub trait MediaRepository {
    fn insert_asset(&self, asset: &MediaAsset) -> RepoResult<MediaId>;
    /// Returns `false` when the asset does not exist.
    fn delete_asset(&self, id: MediaId) -> RepoResult<bool>;
    fn list_assets(&self) -> RepoResult<Vec<MediaAsset>>;
}

pub struct SqliteMediaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMediaRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MediaRepository for SqliteMediaRepository<'_> {
    fn insert_asset(&self, asset: &MediaAsset) -> RepoResult<MediaId> {
        self.conn.execute(
            "INSERT INTO media_assets (id, name, url, uploaded_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                asset.id.to_string(),
                asset.name.as_str(),
                asset.url.as_str(),
                asset.uploaded_at,
            ],
        )?;
        Ok(asset.id)
    }

    fn delete_asset(&self, id: MediaId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM media_assets WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn list_assets(&self) -> RepoResult<Vec<MediaAsset>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, url, uploaded_at
             FROM media_assets
             ORDER BY uploaded_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut assets = Vec::new();
        while let Some(row) = rows.next()? {
            assets.push(parse_asset_row(row)?);
        }
        Ok(assets)
    }
}

fn parse_asset_row(row: &Row<'_>) -> RepoResult<MediaAsset> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in media_assets.id"))
    })?;

    Ok(MediaAsset {
        id,
        name: row.get("name")?,
        url: row.get("url")?,
        uploaded_at: row.get("uploaded_at")?,
    })
}
