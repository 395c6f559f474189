//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `quill_core` linkage and print a deterministic view of the
//!   seeded catalog.
//! - `quill_cli [query]` renders listing page 1, optionally searched.
//! - `QUILL_LOG_DIR` (absolute path) enables file logging.

use log::error;
use quill_core::{CatalogConfig, CatalogError, CatalogStore, PostFilter};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("quill_core ping={}", quill_core::ping());
    println!("quill_core version={}", quill_core::core_version());

    if let Ok(log_dir) = std::env::var("QUILL_LOG_DIR") {
        if let Err(err) = quill_core::init_logging(quill_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let query = std::env::args().nth(1);
    match render_listing(query.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_render module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_listing(query: Option<&str>) -> Result<(), CatalogError> {
    let store = CatalogStore::open_seeded(CatalogConfig::default())?;
    let filter = query.map(PostFilter::by_query).unwrap_or_default();
    let listing = store.listing(&filter, 1)?;

    println!(
        "page {}/{} ({} matching posts)",
        listing.page, listing.total_pages, listing.total_matches
    );
    for post in &listing.posts {
        println!(
            "#{:<3} {:<48} {:<14} {:>5} views  /{}",
            post.id, post.title, post.category, post.views, post.slug
        );
    }

    let featured = store.featured_posts()?;
    let titles: Vec<&str> = featured.iter().map(|post| post.title.as_str()).collect();
    println!("featured: {}", titles.join(" | "));

    let stats = store.stats()?;
    println!(
        "stats: posts={} comments={} pending={} users={} views={}",
        stats.total_posts,
        stats.total_comments,
        stats.unapproved_comments,
        stats.total_users,
        stats.total_views
    );
    Ok(())
}
