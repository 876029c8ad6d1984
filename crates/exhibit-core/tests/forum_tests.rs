// Host-side tests for the forum store.

use exhibit_core::{ForumError, ForumSnapshot, ForumStore, NewComment, NewPost};

const SNAPSHOT: &str = r#"{
  "users": [
    {"id": 1, "username": "ada", "displayName": "Ada"},
    {"id": 2, "username": "lin"}
  ],
  "posts": [
    {"id": 1, "authorId": 1, "title": "Welcome", "body": "Say hi", "createdAt": 100, "tags": ["meta"]},
    {"id": 4, "authorId": 2, "title": "Reef photos", "body": "Look", "createdAt": 300, "tags": ["aquarium"]}
  ],
  "comments": [
    {"id": 7, "postId": 1, "authorId": 2, "body": "hi!", "createdAt": 150},
    {"id": 3, "postId": 1, "authorId": 1, "body": "welcome", "createdAt": 120}
  ]
}"#;

fn store() -> ForumStore {
    ForumStore::from_json(SNAPSHOT).expect("snapshot parses")
}

fn post(title: &str, body: &str) -> NewPost {
    NewPost {
        author_id: 1,
        title: title.into(),
        body: body.into(),
        tags: vec![" news ".into(), "".into()],
    }
}

#[test]
fn posts_are_listed_newest_first() {
    let s = store();
    let ids: Vec<u32> = s.posts_newest_first().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 1]);
}

#[test]
fn comments_are_listed_oldest_first() {
    let s = store();
    let ids: Vec<u32> = s.comments_for(1).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 7]);
    assert!(s.comments_for(4).is_empty());
}

#[test]
fn new_post_gets_next_id_and_bumps_revision() {
    let mut s = store();
    let rev = s.revision();
    let id = s.add_post(post("  Hello ", "World"), 500).expect("valid post");
    assert_eq!(id, 5);
    assert!(s.revision() > rev);
    let p = s.post(id).expect("post exists");
    assert_eq!(p.title, "Hello");
    assert_eq!(p.tags, vec!["news".to_string()]);
    assert_eq!(s.posts_newest_first()[0].id, 5);
}

#[test]
fn invalid_posts_are_rejected_without_side_effects() {
    let mut s = store();
    let rev = s.revision();
    assert_eq!(s.add_post(post(" ", "x"), 1), Err(ForumError::EmptyTitle));
    assert_eq!(s.add_post(post("x", ""), 1), Err(ForumError::EmptyBody));
    let mut stranger = post("x", "y");
    stranger.author_id = 99;
    assert_eq!(s.add_post(stranger, 1), Err(ForumError::UnknownUser(99)));
    assert_eq!(s.revision(), rev);
    assert_eq!(s.post_count(), 2);
}

#[test]
fn comments_require_an_existing_post() {
    let mut s = store();
    let err = s.add_comment(
        NewComment {
            post_id: 42,
            author_id: 1,
            body: "?".into(),
        },
        10,
    );
    assert_eq!(err, Err(ForumError::UnknownPost(42)));
    let id = s
        .add_comment(
            NewComment {
                post_id: 4,
                author_id: 1,
                body: "nice".into(),
            },
            400,
        )
        .expect("valid comment");
    assert_eq!(id, 8);
}

#[test]
fn deleting_a_post_cascades_to_its_comments() {
    let mut s = store();
    let removed = s.delete_post(1).expect("post 1 exists");
    assert_eq!(removed.title, "Welcome");
    assert!(s.comments_for(1).is_empty());
    assert_eq!(s.snapshot().comments.len(), 0);
    assert_eq!(s.delete_post(1), Err(ForumError::UnknownPost(1)));
}

#[test]
fn edit_and_delete_comment() {
    let mut s = store();
    s.edit_post(4, "Reef photos (2)", "More").expect("edit ok");
    assert_eq!(s.post(4).map(|p| p.body.as_str()), Some("More"));
    assert_eq!(s.edit_post(4, "", "x"), Err(ForumError::EmptyTitle));
    assert!(s.delete_comment(7).is_ok());
    assert_eq!(s.delete_comment(7).map(|c| c.id), Err(ForumError::UnknownComment(7)));
}

#[test]
fn json_round_trip_preserves_store() {
    let mut s = store();
    s.add_post(post("Round", "trip"), 900).expect("valid post");
    let json = s.to_json().expect("serializes");
    let back = ForumStore::from_json(&json).expect("parses");
    assert_eq!(back.snapshot(), s.snapshot());
}

#[test]
fn replace_resets_content_and_invalidates() {
    let mut s = store();
    let rev = s.revision();
    s.replace(ForumSnapshot::default());
    assert_eq!(s.post_count(), 0);
    assert!(s.revision() > rev);
    assert!(s.user(1).is_none());
}

#[test]
fn tag_filter_and_user_labels() {
    let s = store();
    assert_eq!(s.posts_tagged("AQUARIUM").len(), 1);
    assert_eq!(s.user(1).map(|u| u.label()), Some("Ada"));
    assert_eq!(s.user(2).map(|u| u.label()), Some("lin"));
}

#[test]
fn exhausted_post_ids_are_an_error_not_a_wrap() {
    let mut s = store();
    let json = format!(
        r#"{{"users": [{{"id": 1, "username": "ada"}}],
            "posts": [{{"id": {}, "authorId": 1, "title": "Last", "body": "b"}}],
            "comments": [{{"id": {}, "postId": {}, "authorId": 1, "body": "c"}}]}}"#,
        u32::MAX,
        u32::MAX,
        u32::MAX
    );
    s.replace(serde_json::from_str(&json).expect("snapshot parses"));
    let before = s.revision();

    assert_eq!(
        s.add_post(post("Another", "b"), 10),
        Err(ForumError::IdsExhausted("post"))
    );
    let comment = NewComment {
        post_id: u32::MAX,
        author_id: 1,
        body: "more".into(),
    };
    assert_eq!(
        s.add_comment(comment, 10),
        Err(ForumError::IdsExhausted("comment"))
    );
    assert_eq!(s.post_count(), 1);
    assert_eq!(s.revision(), before);
}

#[test]
fn duplicate_ids_in_a_snapshot_keep_the_first_row() {
    let json = r#"{
      "users": [{"id": 1, "username": "ada"}, {"id": 1, "username": "impostor"}],
      "posts": [
        {"id": 3, "authorId": 1, "title": "a", "body": "b"},
        {"id": 3, "authorId": 1, "title": "c", "body": "d"}
      ],
      "comments": [
        {"id": 9, "postId": 3, "authorId": 1, "body": "first"},
        {"id": 9, "postId": 3, "authorId": 1, "body": "second"}
      ]
    }"#;
    let mut s = ForumStore::from_json(json).expect("snapshot parses");
    assert_eq!(s.post_count(), 1);
    assert_eq!(s.post(3).map(|p| p.title.as_str()), Some("a"));
    assert_eq!(s.user(1).map(|u| u.username.as_str()), Some("ada"));
    let bodies: Vec<&str> = s.comments_for(3).iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["first"]);

    s.delete_post(3).expect("post exists");
    assert!(s.post(3).is_none());
    assert!(s.comments_for(3).is_empty());
}

#[test]
fn replace_also_drops_duplicate_ids() {
    let mut s = store();
    let mut snapshot = s.snapshot();
    let dup = snapshot.posts[0].clone();
    snapshot.posts.push(dup);
    s.replace(snapshot);
    assert_eq!(s.post_count(), 2);
}
