use crate::constants::{DEFAULT_PAGE_SIZE, FORUM_STORAGE_KEY, TRANSITION_FACTOR};
use serde::{Deserialize, Serialize};

/// Per-site settings. Pages may override any field through a JSON
/// `data-config` attribute; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub species_url: String,
    pub books_url: String,
    pub articles_url: String,
    pub forum_users_url: String,
    pub forum_posts_url: String,
    pub forum_comments_url: String,
    pub page_size: usize,
    pub transition_factor: f32,
    pub forum_storage_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            species_url: "data/species.json".into(),
            books_url: "data/books.json".into(),
            articles_url: "data/articles.json".into(),
            forum_users_url: "data/forum/users.json".into(),
            forum_posts_url: "data/forum/posts.json".into(),
            forum_comments_url: "data/forum/comments.json".into(),
            page_size: DEFAULT_PAGE_SIZE,
            transition_factor: TRANSITION_FACTOR,
            forum_storage_key: FORUM_STORAGE_KEY.into(),
        }
    }
}

impl SiteConfig {
    /// Defaults overlaid with `json`; a malformed override is logged and
    /// ignored.
    pub fn with_overrides(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(s) => match serde_json::from_str::<SiteConfig>(s) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("[config] ignoring malformed data-config: {}", e);
                    Self::default()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = SiteConfig::with_overrides(Some(r#"{"pageSize": 5}"#));
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.species_url, SiteConfig::default().species_url);
    }

    #[test]
    fn malformed_override_falls_back() {
        assert_eq!(SiteConfig::with_overrides(Some("{nope")), SiteConfig::default());
        assert_eq!(SiteConfig::with_overrides(None), SiteConfig::default());
    }
}
