use quill_core::{
    CatalogConfig, CatalogError, CatalogStats, CatalogStore, CommentDraft, ConfigError, PostDraft,
    PostId,
};

#[test]
fn seeded_store_lists_demo_posts_in_order() {
    let store = CatalogStore::open_seeded(CatalogConfig::default()).unwrap();

    let posts = store.posts().unwrap();
    let slugs: Vec<&str> = posts.iter().map(|post| post.slug.as_str()).collect();

    assert_eq!(
        slugs,
        vec![
            "the-future-of-ai-in-web-development",
            "mastering-react-hooks-a-comprehensive-guide",
            "a-beginner-s-guide-to-tailwind-css",
            "exploring-the-wonders-of-quantum-computing",
            "healthy-eating-habits-for-a-productive-lifestyle",
            "the-art-of-photography-capturing-moments",
        ]
    );
    assert_eq!(posts[0].tags, vec!["AI", "Web Development", "Future"]);
    assert_eq!(posts[0].published_at, 1_698_314_400_000);
    assert_eq!(posts[5].image_url, "https://picsum.photos/1200/600?random=6");
}

#[test]
fn editing_a_seeded_post_without_retitling_keeps_its_url() {
    let mut store = CatalogStore::open_seeded(CatalogConfig::default()).unwrap();
    let original = store.post(PostId(1)).unwrap().unwrap();

    let edited = PostDraft::new(original.title.clone(), original.category.clone())
        .with_tags(original.tags.clone())
        .with_body("A shorter excerpt.", original.content.clone());
    let updated = store.update_post(PostId(1), &edited).unwrap().unwrap();

    assert_eq!(updated.slug, original.slug);
    assert_eq!(updated.excerpt, "A shorter excerpt.");
    assert_eq!(
        store.post_by_slug(&original.slug).unwrap().map(|post| post.id),
        Some(PostId(1))
    );
}

#[test]
fn empty_store_has_vocabulary_but_no_content() {
    let store = CatalogStore::open(CatalogConfig::default()).unwrap();

    assert!(store.posts().unwrap().is_empty());
    assert!(store.users().unwrap().is_empty());
    assert_eq!(store.categories().unwrap().len(), 6);
    assert_eq!(store.tags().unwrap().len(), 17);
    assert_eq!(store.stats().unwrap(), CatalogStats::default());
}

#[test]
fn taxonomy_links_resolve_by_slug() {
    let store = CatalogStore::open(CatalogConfig::default()).unwrap();

    let category = store.category_by_slug("art-culture").unwrap().unwrap();
    assert_eq!(category.name, "Art & Culture");
    let tag = store.tag_by_slug("web-development").unwrap().unwrap();
    assert_eq!(tag.name, "Web Development");
    assert_eq!(store.category_by_slug("gardening").unwrap(), None);
}

#[test]
fn dashboard_stats_track_mutations() {
    let mut store = CatalogStore::open_seeded(CatalogConfig::default()).unwrap();

    assert_eq!(
        store.stats().unwrap(),
        CatalogStats {
            total_posts: 6,
            total_comments: 5,
            unapproved_comments: 1,
            total_users: 3,
            total_views: 4780,
        }
    );

    store
        .add_comment(PostId(5), &CommentDraft::guest("Meal prep saved my week"))
        .unwrap();
    store.delete_post(PostId(1)).unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_posts, 5);
    assert_eq!(stats.total_comments, 4);
    assert_eq!(stats.unapproved_comments, 2);
    assert_eq!(stats.total_views, 3530);
}

#[test]
fn zero_page_size_is_rejected_at_open() {
    let config = CatalogConfig {
        page_size: 0,
        ..CatalogConfig::default()
    };

    let err = CatalogStore::open(config).err().unwrap();

    assert!(matches!(err, CatalogError::Config(ConfigError::ZeroPageSize)));
}
