use quill_core::db::migrations::{apply_migrations, latest_version};
use quill_core::db::{open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "posts",
        "post_tags",
        "comments",
        "users",
        "categories",
        "tags",
        "media_assets",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reference_vocabulary_is_seeded_by_migration() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(count_rows(&conn, "categories"), 6);
    assert_eq!(count_rows(&conn, "tags"), 17);
    assert_eq!(count_rows(&conn, "posts"), 0);
}

#[test]
fn reapplying_migrations_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();

    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(count_rows(&conn, "categories"), 6);
}

#[test]
fn database_with_newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO comments (post_id, author, created_at, content, approved)
         VALUES (42, 'Guest User', 0, 'orphan', 0);",
        [],
    );
    assert!(result.is_err(), "comment without post must be rejected");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count_rows(conn: &Connection, table_name: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table_name};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
