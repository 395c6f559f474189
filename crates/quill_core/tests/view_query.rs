use quill_core::{
    query_posts, BrowseState, CatalogConfig, CatalogStore, PostDraft, PostFilter, PostId,
};
use std::num::NonZeroUsize;

fn seeded_store() -> CatalogStore {
    CatalogStore::open_seeded(CatalogConfig::default()).unwrap()
}

fn ids(posts: &[quill_core::Post]) -> Vec<i64> {
    posts.iter().map(|post| post.id.0).collect()
}

#[test]
fn seven_posts_split_into_two_pages() {
    let mut store = seeded_store();
    let created = store
        .create_post(&PostDraft::new("Seventh Post", "Technology"))
        .unwrap();

    let first = store.listing(&PostFilter::default(), 1).unwrap();
    let second = store.listing(&PostFilter::default(), 2).unwrap();

    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total_matches, 7);
    assert_eq!(first.posts.len(), 6);
    assert_eq!(first.posts[0].id, created.id);
    assert_eq!(second.posts.len(), 1);
    assert_eq!(second.page, 2);
    assert_eq!(ids(&second.posts), vec![6]);
}

#[test]
fn category_without_matches_has_zero_pages() {
    let store = seeded_store();

    let page = store.listing(&PostFilter::by_category("Gardening"), 1).unwrap();

    assert!(page.posts.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.total_matches, 0);
}

#[test]
fn category_filter_is_case_insensitive_and_exact() {
    let store = seeded_store();

    let page = store.listing(&PostFilter::by_category("web design"), 1).unwrap();
    assert_eq!(ids(&page.posts), vec![3]);

    let partial = store.listing(&PostFilter::by_category("Web"), 1).unwrap();
    assert!(partial.posts.is_empty());
}

#[test]
fn tag_filter_matches_any_post_tag() {
    let store = seeded_store();

    let page = store.listing(&PostFilter::by_tag("technology"), 1).unwrap();

    assert_eq!(ids(&page.posts), vec![4]);
}

#[test]
fn text_query_searches_title_excerpt_and_content() {
    let store = seeded_store();

    let by_title = store.listing(&PostFilter::by_query("QUANTUM"), 1).unwrap();
    assert_eq!(ids(&by_title.posts), vec![4]);

    let by_content = store.listing(&PostFilter::by_query("useEffect"), 1).unwrap();
    assert_eq!(ids(&by_content.posts), vec![2]);
}

#[test]
fn header_query_takes_precedence_over_search_param() {
    let store = seeded_store();
    let filter = PostFilter {
        header_query: Some("photography".to_string()),
        search_param: Some("tailwind".to_string()),
        ..PostFilter::default()
    };

    let page = store.listing(&filter, 1).unwrap();
    assert_eq!(ids(&page.posts), vec![6]);

    let blank_header = PostFilter {
        header_query: Some("   ".to_string()),
        search_param: Some("tailwind".to_string()),
        ..PostFilter::default()
    };
    let page = store.listing(&blank_header, 1).unwrap();
    assert_eq!(ids(&page.posts), vec![3]);
}

#[test]
fn filters_combine_with_and() {
    let store = seeded_store();
    let filter = PostFilter {
        category: Some("Science".to_string()),
        tag: Some("Quantum".to_string()),
        header_query: Some("qubits".to_string()),
        ..PostFilter::default()
    };

    assert_eq!(ids(&store.listing(&filter, 1).unwrap().posts), vec![4]);

    let mismatched = PostFilter {
        category: Some("Health".to_string()),
        ..filter
    };
    assert!(store.listing(&mismatched, 1).unwrap().posts.is_empty());
}

#[test]
fn page_zero_and_out_of_range_pages_are_empty() {
    let store = seeded_store();

    let zero = store.listing(&PostFilter::default(), 0).unwrap();
    let beyond = store.listing(&PostFilter::default(), 5).unwrap();

    assert!(zero.posts.is_empty());
    assert!(beyond.posts.is_empty());
    assert_eq!(beyond.total_pages, 1);
}

#[test]
fn union_of_pages_reconstructs_filtered_collection() {
    let store = seeded_store();
    let posts = store.posts().unwrap();
    let size = NonZeroUsize::new(4).unwrap();
    let filter = PostFilter::default();

    let first = query_posts(&posts, &filter, 1, size);
    let mut collected: Vec<i64> = first.posts.iter().map(|post| post.id.0).collect();
    for page in 2..=first.total_pages {
        let next = query_posts(&posts, &filter, page, size);
        collected.extend(next.posts.iter().map(|post| post.id.0));
    }

    assert_eq!(first.total_pages, 2);
    assert_eq!(collected, ids(&posts));
}

#[test]
fn browse_state_resets_page_only_on_filter_change() {
    let store = seeded_store();
    let posts = store.posts().unwrap();
    let size = NonZeroUsize::new(2).unwrap();
    let mut state = BrowseState::new();

    state.set_page(3);
    assert_eq!(state.query(&posts, size).posts.len(), 2);

    assert!(!state.set_filter(PostFilter::default()));
    assert_eq!(state.page(), 3);

    assert!(state.set_filter(PostFilter::by_tag("Tailwind")));
    assert_eq!(state.page(), 1);
    let page = state.query(&posts, size);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.posts[0].id, PostId(3));
}

#[test]
fn featured_strip_follows_allow_list_not_filters() {
    let mut store = seeded_store();

    let featured: Vec<PostId> = store
        .featured_posts()
        .unwrap()
        .iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(featured, vec![PostId(1), PostId(3), PostId(5)]);

    store.delete_post(PostId(3)).unwrap();
    let featured: Vec<PostId> = store
        .featured_posts()
        .unwrap()
        .iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(featured, vec![PostId(1), PostId(5)]);
}

#[test]
fn configured_page_size_drives_listing() {
    let config = CatalogConfig::from_json_str(r#"{ "page_size": 4 }"#).unwrap();
    let store = CatalogStore::open_seeded(config).unwrap();

    let page = store.listing(&PostFilter::default(), 2).unwrap();

    assert_eq!(page.total_pages, 2);
    assert_eq!(ids(&page.posts), vec![5, 6]);
}
