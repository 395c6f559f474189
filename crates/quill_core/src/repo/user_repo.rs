//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Username and email uniqueness is checked on Unicode-lowercased keys
//!   (`username_key`, `email_key`); the `UNIQUE` key columns back that up.
//! - Listing is sorted by username key.

use crate::model::user::{NewUser, User, UserId, UserRole};
use crate::repo::post_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT id, username, email, role FROM users";

/// Repository interface for account operations.
pub trait UserRepository {
    /// Inserts a validated account; fails with `Duplicate` on collisions.
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Returns `false` when the user does not exist.
    fn set_role(&self, id: UserId, role: UserRole) -> RepoResult<bool>;
    /// Returns `false` when the user does not exist.
    fn delete_user(&self, id: UserId) -> RepoResult<bool>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId> {
        user.validate()?;
        let username = user.username.trim();
        let email = user.email.trim();

        let username_key = fold_key(username);
        let email_key = fold_key(email);

        if key_exists(self.conn, "username_key", &username_key)? {
            return Err(RepoError::Duplicate {
                field: "username",
                value: username.to_string(),
            });
        }
        if key_exists(self.conn, "email_key", &email_key)? {
            return Err(RepoError::Duplicate {
                field: "email",
                value: email.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO users (username, email, username_key, email_key, role)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![username, email, username_key, email_key, user.role.as_str()],
        )?;
        Ok(UserId(self.conn.last_insert_rowid()))
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.0])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn set_role(&self, id: UserId, role: UserRole) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2;",
            params![role.as_str(), id.0],
        )?;
        Ok(changed > 0)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.0])?;
        Ok(changed > 0)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} ORDER BY username_key ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }
}

/// Comparison key for usernames and emails. Unicode-aware, unlike SQLite's
/// ASCII-only `NOCASE`.
fn fold_key(value: &str) -> String {
    value.trim().to_lowercase()
}

fn key_exists(conn: &Connection, column: &'static str, key: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM users WHERE {column} = ?1);"),
        [key],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let role_text: String = row.get("role")?;
    let role = UserRole::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    Ok(User {
        id: UserId(row.get("id")?),
        username: row.get("username")?,
        email: row.get("email")?,
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::fold_key;

    #[test]
    fn fold_key_lowercases_beyond_ascii() {
        assert_eq!(fold_key(" Émile "), "émile");
        assert_eq!(fold_key("ÖSTER@Example.COM"), "öster@example.com");
    }
}
