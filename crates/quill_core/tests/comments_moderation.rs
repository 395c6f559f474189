use quill_core::{
    CatalogConfig, CatalogError, CatalogStore, CommentDraft, CommentId, PostDraft, PostId,
};

fn seeded_store() -> CatalogStore {
    CatalogStore::open_seeded(CatalogConfig::default()).unwrap()
}

#[test]
fn submitted_comment_waits_for_moderation() {
    let mut store = seeded_store();
    let public_before = store.public_comments(PostId(4)).unwrap();

    let comment = store
        .add_comment(PostId(4), &CommentDraft::new("Ada", "Superposition finally clicked."))
        .unwrap();

    assert!(!comment.approved);
    assert_eq!(comment.post_id, PostId(4));
    assert_eq!(comment.author, "Ada");
    assert_eq!(store.public_comments(PostId(4)).unwrap(), public_before);
    assert_eq!(store.comment(comment.id).unwrap(), Some(comment));
}

#[test]
fn anonymous_comment_uses_guest_author() {
    let mut store = seeded_store();

    let comment = store
        .add_comment(PostId(1), &CommentDraft::guest("Nice read"))
        .unwrap();

    assert_eq!(comment.author, "Guest User");
}

#[test]
fn comment_on_missing_post_is_rejected_and_nothing_is_stored() {
    let mut store = seeded_store();
    let before = store.comments_for_moderation().unwrap();

    let err = store
        .add_comment(PostId(99), &CommentDraft::guest("hello?"))
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(PostId(99))));
    assert_eq!(store.comments_for_moderation().unwrap(), before);
}

#[test]
fn blank_comment_is_rejected() {
    let mut store = seeded_store();

    let err = store
        .add_comment(PostId(1), &CommentDraft::guest("  \n "))
        .unwrap_err();

    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn approval_toggles_public_visibility() {
    let mut store = seeded_store();
    let comment = store
        .add_comment(PostId(2), &CommentDraft::guest("useEffect tips please"))
        .unwrap();

    assert!(store.set_comment_approval(comment.id, true).unwrap());
    let public = store.public_comments(PostId(2)).unwrap();
    assert!(public.iter().any(|item| item.id == comment.id));

    assert!(store.set_comment_approval(comment.id, false).unwrap());
    let public = store.public_comments(PostId(2)).unwrap();
    assert!(public.iter().all(|item| item.id != comment.id));
}

#[test]
fn public_comments_only_contain_approved_newest_first() {
    let store = seeded_store();

    let post_one = store.public_comments(PostId(1)).unwrap();
    let authors: Vec<&str> = post_one.iter().map(|c| c.author.as_str()).collect();
    assert_eq!(authors, vec!["Jane Smith", "John Doe"]);

    let post_three = store.public_comments(PostId(3)).unwrap();
    assert_eq!(post_three.len(), 1);
    assert_eq!(post_three[0].author, "Mark Johnson");
    assert!(post_three.iter().all(|c| c.approved));
}

#[test]
fn moderation_queue_lists_every_comment() {
    let store = seeded_store();

    let queue = store.comments_for_moderation().unwrap();

    assert_eq!(queue.len(), 5);
    assert_eq!(queue.iter().filter(|c| !c.approved).count(), 1);
    assert_eq!(queue[0].author, "Jane Smith");
}

#[test]
fn moderation_of_missing_comment_is_noop() {
    let mut store = seeded_store();

    assert!(!store.set_comment_approval(CommentId(404), true).unwrap());
    assert!(!store.delete_comment(CommentId(404)).unwrap());
    assert_eq!(store.comments_for_moderation().unwrap().len(), 5);
}

#[test]
fn deleting_a_post_removes_its_comments() {
    let mut store = seeded_store();

    assert!(store.delete_post(PostId(1)).unwrap());

    let queue = store.comments_for_moderation().unwrap();
    assert_eq!(queue.len(), 3);
    assert!(queue.iter().all(|c| c.post_id != PostId(1)));
    assert!(store.public_comments(PostId(1)).unwrap().is_empty());
}

#[test]
fn comments_on_new_post_are_scoped_to_it() {
    let mut store = seeded_store();
    let post = store
        .create_post(&PostDraft::new("Fresh", "Science"))
        .unwrap();
    let comment = store
        .add_comment(post.id, &CommentDraft::guest("first!"))
        .unwrap();
    store.set_comment_approval(comment.id, true).unwrap();

    let public = store.public_comments(post.id).unwrap();

    assert_eq!(public.len(), 1);
    assert_eq!(public[0].content, "first!");
    assert!(store.delete_comment(comment.id).unwrap());
    assert!(store.public_comments(post.id).unwrap().is_empty());
}

#[test]
fn missing_post_is_reported_before_blank_body() {
    let mut store = seeded_store();

    let err = store
        .add_comment(PostId(999), &CommentDraft::guest("  "))
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(PostId(999))));
    assert_eq!(store.comments_for_moderation().unwrap().len(), 5);
}
