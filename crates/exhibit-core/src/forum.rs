//! Forum data held in an explicitly constructed store.
//!
//! The store is filled from the flat JSON snapshot (or a copy persisted by the
//! frontend), mutated locally, and exported back to the same snapshot shape.
//! Every mutation bumps [`ForumStore::revision`] so views can tell when their
//! rendering is stale.

use crate::error::{ExhibitError, ForumError};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
}

impl User {
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub author_id: u32,
    pub title: String,
    pub body: String,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub author_id: u32,
    pub body: String,
    #[serde(default)]
    pub created_at: i64,
}

/// The on-disk / localStorage shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug)]
pub struct NewPost {
    pub author_id: u32,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NewComment {
    pub post_id: u32,
    pub author_id: u32,
    pub body: String,
}

#[derive(Clone, Debug, Default)]
pub struct ForumStore {
    users: FnvHashMap<u32, User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    revision: u64,
}

impl ForumStore {
    pub fn from_snapshot(snapshot: ForumSnapshot) -> Self {
        let mut store = Self::default();
        store.load(snapshot);
        store
    }

    pub fn from_json(json: &str) -> Result<Self, ExhibitError> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    /// Discards local state and reloads from `snapshot`.
    pub fn replace(&mut self, snapshot: ForumSnapshot) {
        self.load(snapshot);
        self.revision += 1;
    }

    /// Duplicate ids keep their first occurrence.
    fn load(&mut self, snapshot: ForumSnapshot) {
        self.users = FnvHashMap::default();
        for u in snapshot.users {
            if self.users.contains_key(&u.id) {
                log::warn!("[forum] duplicate user id {}; keeping the first", u.id);
                continue;
            }
            self.users.insert(u.id, u);
        }
        self.posts = dedup_by_id(snapshot.posts, |p| p.id, "post");
        self.comments = dedup_by_id(snapshot.comments, |c| c.id, "comment");
    }

    pub fn snapshot(&self) -> ForumSnapshot {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        ForumSnapshot {
            users,
            posts: self.posts.clone(),
            comments: self.comments.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExhibitError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn post(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Newest first; ties broken by higher id.
    pub fn posts_newest_first(&self) -> Vec<&Post> {
        let mut v: Vec<&Post> = self.posts.iter().collect();
        v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        v
    }

    pub fn posts_tagged(&self, tag: &str) -> Vec<&Post> {
        self.posts_newest_first()
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Oldest first.
    pub fn comments_for(&self, post_id: u32) -> Vec<&Comment> {
        let mut v: Vec<&Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        v.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        v
    }

    pub fn add_post(&mut self, new: NewPost, now: i64) -> Result<u32, ForumError> {
        let title = new.title.trim();
        let body = new.body.trim();
        if title.is_empty() {
            return Err(ForumError::EmptyTitle);
        }
        if body.is_empty() {
            return Err(ForumError::EmptyBody);
        }
        self.require_user(new.author_id)?;
        let id = next_id(self.posts.iter().map(|p| p.id), "post")?;
        self.posts.push(Post {
            id,
            author_id: new.author_id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            tags: new
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        });
        self.revision += 1;
        log::info!("[forum] added post {}", id);
        Ok(id)
    }

    pub fn add_comment(&mut self, new: NewComment, now: i64) -> Result<u32, ForumError> {
        let body = new.body.trim();
        if body.is_empty() {
            return Err(ForumError::EmptyBody);
        }
        self.require_user(new.author_id)?;
        if self.post(new.post_id).is_none() {
            return Err(ForumError::UnknownPost(new.post_id));
        }
        let id = next_id(self.comments.iter().map(|c| c.id), "comment")?;
        self.comments.push(Comment {
            id,
            post_id: new.post_id,
            author_id: new.author_id,
            body: body.to_string(),
            created_at: now,
        });
        self.revision += 1;
        Ok(id)
    }

    pub fn edit_post(&mut self, id: u32, title: &str, body: &str) -> Result<(), ForumError> {
        let (title, body) = (title.trim(), body.trim());
        if title.is_empty() {
            return Err(ForumError::EmptyTitle);
        }
        if body.is_empty() {
            return Err(ForumError::EmptyBody);
        }
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ForumError::UnknownPost(id))?;
        post.title = title.to_string();
        post.body = body.to_string();
        self.revision += 1;
        Ok(())
    }

    /// Removes the post and all of its comments.
    pub fn delete_post(&mut self, id: u32) -> Result<Post, ForumError> {
        let idx = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(ForumError::UnknownPost(id))?;
        let post = self.posts.remove(idx);
        self.comments.retain(|c| c.post_id != id);
        self.revision += 1;
        log::info!("[forum] deleted post {}", id);
        Ok(post)
    }

    pub fn delete_comment(&mut self, id: u32) -> Result<Comment, ForumError> {
        let idx = self
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(ForumError::UnknownComment(id))?;
        self.revision += 1;
        Ok(self.comments.remove(idx))
    }

    fn require_user(&self, id: u32) -> Result<(), ForumError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(ForumError::UnknownUser(id))
        }
    }
}

/// One past the largest id in use.
fn next_id(ids: impl Iterator<Item = u32>, table: &'static str) -> Result<u32, ForumError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(ForumError::IdsExhausted(table))
}

fn dedup_by_id<T>(rows: Vec<T>, id: impl Fn(&T) -> u32, table: &str) -> Vec<T> {
    let mut seen = fnv::FnvHashSet::default();
    rows.into_iter()
        .filter(|row| {
            let fresh = seen.insert(id(row));
            if !fresh {
                log::warn!("[forum] duplicate {} id {}; keeping the first", table, id(row));
            }
            fresh
        })
        .collect()
}
