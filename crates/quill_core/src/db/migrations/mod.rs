//! Catalog schema steps.
//!
//! A catalog database lives only as long as its `CatalogStore`, so every
//! store starts at version 0 and runs the full chain on open:
//!
//! 1. `catalog`: posts, ordered post tags, comments (cascading on post
//!    delete) and user accounts with folded uniqueness keys.
//! 2. `reference_vocabulary`: the fixed category and tag lists. No runtime
//!    path inserts into those tables, so this step is their only writer.
//! 3. `media`: the media library.
//!
//! The chain runs inside one transaction and `PRAGMA user_version` records
//! the last step applied. A connection that reports a version above the
//! chain's tail was written by a newer build and is refused.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "catalog",
        sql: include_str!("0001_catalog.sql"),
    },
    SchemaStep {
        version: 2,
        name: "reference_vocabulary",
        sql: include_str!("0002_reference_vocabulary.sql"),
    },
    SchemaStep {
        version: 3,
        name: "media",
        sql: include_str!("0003_media.sql"),
    },
];

/// Schema version a fully bootstrapped catalog reports.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Already-current connections are left untouched. Fails with
/// [`DbError::UnsupportedSchemaVersion`] when the recorded version is ahead
/// of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let recorded = current_user_version(conn)?;
    let latest = latest_version();
    if recorded > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: recorded,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > recorded)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=schema_apply module=db status=ok from_version={} to_version={} steps={}",
        recorded,
        latest,
        pending
            .iter()
            .map(|step| step.name)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(())
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, current_user_version, latest_version, SCHEMA_STEPS};
    use rusqlite::Connection;

    #[test]
    fn step_versions_are_contiguous_from_one() {
        for (index, step) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
    }

    #[test]
    fn vocabulary_step_follows_the_schema_it_fills() {
        let catalog = SCHEMA_STEPS.iter().position(|s| s.name == "catalog");
        let vocabulary = SCHEMA_STEPS
            .iter()
            .position(|s| s.name == "reference_vocabulary");
        assert!(catalog.unwrap() < vocabulary.unwrap());
    }

    #[test]
    fn second_apply_keeps_vocabulary_rows_single() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let categories: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
            .unwrap();

        apply_migrations(&mut conn).unwrap();

        let again: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(categories, again);
        assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    }
}
