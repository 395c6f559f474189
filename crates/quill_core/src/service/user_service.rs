//! Account management service.

use crate::model::user::{NewUser, User, UserId, UserRole};
use crate::repo::post_repo::{RepoError, RepoResult};
use crate::repo::user_repo::UserRepository;
use log::{debug, info, warn};

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an account.
    ///
    /// # Errors
    /// - `Duplicate` when the username or email is taken (case-insensitive).
    /// - `InvalidUser` for blank username/email.
    pub fn create_user(&self, candidate: &NewUser) -> RepoResult<User> {
        let id = match self.repo.insert_user(candidate) {
            Ok(id) => id,
            Err(err) => {
                if let RepoError::Duplicate { field, .. } = &err {
                    warn!("event=user_create module=catalog status=error error_code=duplicate_{field}");
                }
                return Err(err);
            }
        };
        info!(
            "event=user_create module=catalog status=ok user_id={id} role={}",
            candidate.role
        );

        self.repo.get_user(id)?.ok_or_else(|| {
            RepoError::InvalidData("created user not found in read-back".to_string())
        })
    }

    /// Changes a role. No last-administrator protection. `Ok(false)` when absent.
    pub fn set_role(&self, id: UserId, role: UserRole) -> RepoResult<bool> {
        let changed = self.repo.set_role(id, role)?;
        if changed {
            info!("event=user_role module=catalog status=ok user_id={id} role={role}");
        } else {
            debug!("event=user_role module=catalog status=noop user_id={id}");
        }
        Ok(changed)
    }

    /// Deletes an account. `Ok(false)` when absent.
    pub fn delete_user(&self, id: UserId) -> RepoResult<bool> {
        let deleted = self.repo.delete_user(id)?;
        if deleted {
            info!("event=user_delete module=catalog status=ok user_id={id}");
        } else {
            debug!("event=user_delete module=catalog status=noop user_id={id}");
        }
        Ok(deleted)
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.get_user(id)
    }

    /// All users sorted by username.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }
}
