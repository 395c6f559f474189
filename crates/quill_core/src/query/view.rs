//! Public listing query: filter, then paginate.
//!
//! # Responsibility
//! - Compute the visible post slice and total page count for a filter.
//! - Track browse state so filter changes reset pagination.
//!
//! # Invariants
//! - Output order is input order; nothing here sorts.
//! - Concatenating every page reproduces the filtered list exactly once.
//! - No error conditions: out-of-range pages are simply empty.

use crate::model::post::{Post, PostId};
use std::num::NonZeroUsize;

/// Filter criteria for the public listing.
///
/// Blank strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Category name, matched exactly after case folding.
    pub category: Option<String>,
    /// Tag name, matched exactly after case folding against any post tag.
    pub tag: Option<String>,
    /// Search box text; wins over `search_param`.
    pub header_query: Option<String>,
    /// `q` query-string parameter.
    pub search_param: Option<String>,
}

impl PostFilter {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn by_query(query: impl Into<String>) -> Self {
        Self {
            header_query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Effective free-text query after precedence.
    pub fn active_query(&self) -> Option<&str> {
        non_blank(&self.header_query).or_else(|| non_blank(&self.search_param))
    }

    /// True when no criterion is set; the featured strip is shown only then.
    pub fn is_unfiltered(&self) -> bool {
        non_blank(&self.category).is_none()
            && non_blank(&self.tag).is_none()
            && self.active_query().is_none()
    }

    /// Returns whether a post passes every set criterion.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = non_blank(&self.category) {
            if post.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }

        if let Some(tag) = non_blank(&self.tag) {
            let folded = tag.to_lowercase();
            if !post.tags.iter().any(|value| value.to_lowercase() == folded) {
                return false;
            }
        }

        if let Some(query) = self.active_query() {
            let needle = query.to_lowercase();
            let hit = [&post.title, &post.excerpt, &post.content]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// One page of the public listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage<'a> {
    pub posts: Vec<&'a Post>,
    /// Requested page number (1-based), echoed back.
    pub page: usize,
    pub total_pages: usize,
    /// Number of posts that passed the filter across all pages.
    pub total_matches: usize,
}

/// Filters `posts` and returns page `page` (1-based).
pub fn query_posts<'a>(
    posts: &'a [Post],
    filter: &PostFilter,
    page: usize,
    page_size: NonZeroUsize,
) -> PostPage<'a> {
    let filtered: Vec<&Post> = posts.iter().filter(|post| filter.matches(post)).collect();
    let total_matches = filtered.len();
    let size = page_size.get();

    let visible = match page.checked_sub(1).and_then(|index| index.checked_mul(size)) {
        Some(start) if start < total_matches => {
            let end = start.saturating_add(size).min(total_matches);
            filtered[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    PostPage {
        posts: visible,
        page,
        total_pages: total_pages(total_matches, page_size),
        total_matches,
    }
}

/// `ceil(count / page_size)`.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// Posts whose id is on the allow-list, in collection order. Ignores filters.
pub fn featured_posts<'a>(posts: &'a [Post], allow_list: &[PostId]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| allow_list.contains(&post.id))
        .collect()
}

/// Filter + page cursor for one browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    filter: PostFilter,
    page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            filter: PostFilter::default(),
            page: 1,
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replaces the filter. Returns `true` (and resets to page 1) only when
    /// the criteria actually changed.
    pub fn set_filter(&mut self, filter: PostFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Runs the listing query for the current state.
    pub fn query<'a>(&self, posts: &'a [Post], page_size: NonZeroUsize) -> PostPage<'a> {
        query_posts(posts, &self.filter, self.page, page_size)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}
