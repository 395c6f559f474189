//! Comment submission and moderation service.
//!
//! # Invariants
//! - Submissions are stored unapproved with the current timestamp.
//! - Public listings only ever contain approved comments.

use crate::db::now_epoch_ms;
use crate::model::comment::{Comment, CommentDraft, CommentId};
use crate::model::post::PostId;
use crate::repo::comment_repo::{CommentListQuery, CommentRecord, CommentRepository};
use crate::repo::post_repo::{RepoError, RepoResult};
use log::{debug, info, warn};

pub struct CommentService<R: CommentRepository> {
    repo: R,
    guest_author: String,
}

impl<R: CommentRepository> CommentService<R> {
    pub fn new(repo: R, guest_author: impl Into<String>) -> Self {
        Self {
            repo,
            guest_author: guest_author.into(),
        }
    }

    /// Submits a comment for moderation.
    ///
    /// # Errors
    /// - `PostNotFound` when `post_id` does not exist; nothing is stored.
    ///   Checked before the body, so a missing post wins over a blank body.
    /// - `InvalidComment` for a blank body.
    pub fn add_comment(&self, post_id: PostId, draft: &CommentDraft) -> RepoResult<Comment> {
        if !self.repo.post_exists(post_id)? {
            warn!("event=comment_add module=catalog status=error post_id={post_id} error_code=post_not_found");
            return Err(RepoError::PostNotFound(post_id));
        }
        draft.validate()?;
        let author = match draft.author.trim() {
            "" => self.guest_author.clone(),
            name => name.to_string(),
        };
        let record = CommentRecord {
            post_id,
            author,
            created_at: now_epoch_ms(),
            content: draft.content.trim().to_string(),
            approved: false,
        };

        let id = match self.repo.insert_comment(&record) {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "event=comment_add module=catalog status=error post_id={post_id} error={err}"
                );
                return Err(err);
            }
        };
        info!("event=comment_add module=catalog status=ok post_id={post_id} comment_id={id}");

        self.repo.get_comment(id)?.ok_or_else(|| {
            RepoError::InvalidData("created comment not found in read-back".to_string())
        })
    }

    /// Approves or unapproves a comment. `Ok(false)` when `id` is absent.
    pub fn set_approval(&self, id: CommentId, approved: bool) -> RepoResult<bool> {
        let changed = self.repo.set_approval(id, approved)?;
        if changed {
            info!("event=comment_moderate module=catalog status=ok comment_id={id} approved={approved}");
        } else {
            debug!("event=comment_moderate module=catalog status=noop comment_id={id}");
        }
        Ok(changed)
    }

    /// Deletes a comment. `Ok(false)` when `id` is absent.
    pub fn delete_comment(&self, id: CommentId) -> RepoResult<bool> {
        let deleted = self.repo.delete_comment(id)?;
        if deleted {
            info!("event=comment_delete module=catalog status=ok comment_id={id}");
        } else {
            debug!("event=comment_delete module=catalog status=noop comment_id={id}");
        }
        Ok(deleted)
    }

    pub fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        self.repo.get_comment(id)
    }

    /// Approved comments of one post, newest first.
    pub fn public_comments(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.repo.list_comments(&CommentListQuery {
            post_id: Some(post_id),
            approved_only: true,
        })
    }

    /// Every comment, newest first, for the moderation queue.
    pub fn comments_for_moderation(&self) -> RepoResult<Vec<Comment>> {
        self.repo.list_comments(&CommentListQuery::default())
    }
}
