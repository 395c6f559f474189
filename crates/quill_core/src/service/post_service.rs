//! Post use-case service.
//!
//! # Responsibility
//! - Turn admin drafts into stored posts: slug, timestamp, defaults, tags.
//! - Keep slugs unique across the collection.
//!
//! # Invariants
//! - New posts land at the front of the collection with `views = 0`.
//! - Edits keep collection position and view counter, refresh the timestamp
//!   and re-derive the slug.
//! - Colliding slugs get the smallest free `-N` suffix, starting at 2.

use crate::db::now_epoch_ms;
use crate::model::post::{normalize_tags, slug_base, Post, PostDraft, PostId};
use crate::repo::post_repo::{
    Placement, PostOrder, PostRecord, PostRepository, RepoError, RepoResult,
};
use log::{debug, info};

/// Fallback values for blank draft fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDefaults {
    pub author: String,
    pub image_url: String,
}

/// Post service facade over repository implementations.
pub struct PostService<R: PostRepository> {
    repo: R,
    defaults: PostDefaults,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R, defaults: PostDefaults) -> Self {
        Self { repo, defaults }
    }

    /// Creates a post from a draft and returns the stored record.
    pub fn create_post(&self, draft: &PostDraft) -> RepoResult<Post> {
        draft.validate()?;
        let slug = self.unique_slug(&draft.title, None)?;
        let record = self.record_from_draft(draft, slug, now_epoch_ms(), 0);
        let id = self.repo.insert_post(&record, Placement::Front)?;
        info!("event=post_create module=catalog status=ok post_id={id}");

        self.repo.get_post(id)?.ok_or_else(|| {
            RepoError::InvalidData("created post not found in read-back".to_string())
        })
    }

    /// Replaces an existing post with a draft. `Ok(None)` when `id` is absent.
    ///
    /// A missing id is reported before the draft is validated.
    pub fn update_post(&self, id: PostId, draft: &PostDraft) -> RepoResult<Option<Post>> {
        let Some(existing) = self.repo.get_post(id)? else {
            debug!("event=post_update module=catalog status=noop post_id={id}");
            return Ok(None);
        };
        draft.validate()?;

        let slug = self.unique_slug(&draft.title, Some(id))?;
        let record = self.record_from_draft(draft, slug, now_epoch_ms(), existing.views);
        if !self.repo.replace_post(id, &record)? {
            debug!("event=post_update module=catalog status=noop post_id={id}");
            return Ok(None);
        }
        info!("event=post_update module=catalog status=ok post_id={id}");
        self.repo.get_post(id)
    }

    /// Deletes a post and its comments. `Ok(false)` when `id` is absent.
    pub fn delete_post(&self, id: PostId) -> RepoResult<bool> {
        let deleted = self.repo.delete_post(id)?;
        if deleted {
            info!("event=post_delete module=catalog status=ok post_id={id}");
        } else {
            debug!("event=post_delete module=catalog status=noop post_id={id}");
        }
        Ok(deleted)
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        self.repo.get_post_by_slug(slug)
    }

    pub fn list_posts(&self, order: PostOrder) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(order)
    }

    /// Slug for `title` that no other post uses.
    pub fn unique_slug(&self, title: &str, exclude: Option<PostId>) -> RepoResult<String> {
        let base = slug_base(title);
        if !self.repo.slug_in_use(&base, exclude)? {
            return Ok(base);
        }

        let mut suffix: u64 = 2;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.repo.slug_in_use(&candidate, exclude)? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    fn record_from_draft(
        &self,
        draft: &PostDraft,
        slug: String,
        published_at: i64,
        views: u64,
    ) -> PostRecord {
        PostRecord {
            slug,
            title: draft.title.trim().to_string(),
            author: non_blank_or(&draft.author, &self.defaults.author),
            published_at,
            category: draft.category.trim().to_string(),
            tags: normalize_tags(&draft.tags),
            excerpt: draft.excerpt.clone(),
            content: draft.content.clone(),
            image_url: non_blank_or(&draft.image_url, &self.defaults.image_url),
            featured: draft.featured,
            views,
        }
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
