//! Read-only content tables (species, books, articles) with the letter
//! filter, text search and pager used by the content browsers.

use crate::constants::{DEFAULT_PAGE_SIZE, SCROLL_PAGE_THRESHOLD};
use crate::error::ExhibitError;
use fnv::FnvHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;
use std::str::FromStr;

pub trait CatalogEntry {
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    /// Text matched by free-text search; defaults to the title.
    fn search_text(&self) -> String {
        self.title().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CatalogEntry for Species {
    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.scientific_name, self.habitat)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover: Option<String>,
}

impl CatalogEntry for Book {
    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.author,
            self.genre.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CatalogEntry for Article {
    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Initial-letter filter selected in the browser's A-Z bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LetterSelector {
    #[default]
    All,
    Letter(char),
}

impl LetterSelector {
    pub fn matches(self, title: &str) -> bool {
        match self {
            LetterSelector::All => true,
            LetterSelector::Letter(c) => initial(title) == Some(c),
        }
    }
}

impl FromStr for LetterSelector {
    type Err = ExhibitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("all") || t == "*" {
            return Ok(LetterSelector::All);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphanumeric() => Ok(LetterSelector::Letter(upper(c))),
            _ => Err(ExhibitError::BadSelector(s.to_string())),
        }
    }
}

#[inline]
fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// First alphanumeric character of a title, upper-cased.
pub fn initial(title: &str) -> Option<char> {
    title.chars().find(|c| c.is_alphanumeric()).map(upper)
}

pub fn filter_by_letter<T: CatalogEntry>(entries: &[T], selector: LetterSelector) -> Vec<&T> {
    entries
        .iter()
        .filter(|e| selector.matches(e.title()))
        .collect()
}

/// Sorted initials present in `entries`, for enabling letter buttons.
pub fn available_letters<T: CatalogEntry>(entries: &[T]) -> Vec<char> {
    entries
        .iter()
        .filter_map(|e| initial(e.title()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Case-insensitive substring search; a blank query keeps everything.
pub fn search<'a, T: CatalogEntry>(entries: &[&'a T], query: &str) -> Vec<&'a T> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .copied()
        .filter(|e| e.search_text().to_lowercase().contains(&q))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile<T> {
    List(Vec<T>),
    Wrapped { items: Vec<T> },
}

/// Immutable table of entries with slug lookup.
#[derive(Clone, Debug)]
pub struct Catalog<T> {
    entries: Vec<T>,
    by_slug: FnvHashMap<String, usize>,
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let mut by_slug = FnvHashMap::default();
        for (i, e) in entries.iter().enumerate() {
            if by_slug.insert(e.slug().to_string(), i).is_some() {
                log::warn!("[catalog] duplicate slug `{}`; last entry wins", e.slug());
            }
        }
        Self { entries, by_slug }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, slug: &str) -> Option<&T> {
        self.by_slug.get(slug).map(|i| &self.entries[*i])
    }
}

impl<T: CatalogEntry + DeserializeOwned> Catalog<T> {
    /// Accepts either a bare JSON array or `{ "items": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self, ExhibitError> {
        let entries = match serde_json::from_str::<CatalogFile<T>>(json)? {
            CatalogFile::List(v) => v,
            CatalogFile::Wrapped { items } => items,
        };
        Ok(Self::new(entries))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerCommand {
    Next,
    Prev,
    First,
    Last,
}

/// Page cursor over a filtered list; clamps at both ends.
#[derive(Clone, Debug)]
pub struct Pager {
    page_size: usize,
    page: usize,
    total: usize,
    scroll_accum: f64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

impl Pager {
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            total,
            scroll_accum: 0.0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Index range of the current page within the filtered list.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Back to the first page for a new result set.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.page = 0;
        self.scroll_accum = 0.0;
    }

    /// Returns whether the page changed.
    pub fn apply(&mut self, cmd: PagerCommand) -> bool {
        let last = self.page_count() - 1;
        let next = match cmd {
            PagerCommand::Next => (self.page + 1).min(last),
            PagerCommand::Prev => self.page.saturating_sub(1),
            PagerCommand::First => 0,
            PagerCommand::Last => last,
        };
        let changed = next != self.page;
        self.page = next;
        changed
    }

    /// Feeds a wheel delta (positive = down); turns a page each time the
    /// accumulated delta crosses the threshold.
    pub fn on_scroll(&mut self, delta_y: f64) -> bool {
        if !delta_y.is_finite() {
            return false;
        }
        // Reversing direction discards the partial accumulation.
        if self.scroll_accum != 0.0 && self.scroll_accum.signum() != delta_y.signum() {
            self.scroll_accum = 0.0;
        }
        self.scroll_accum += delta_y;
        if self.scroll_accum >= SCROLL_PAGE_THRESHOLD {
            self.scroll_accum = 0.0;
            self.apply(PagerCommand::Next)
        } else if self.scroll_accum <= -SCROLL_PAGE_THRESHOLD {
            self.scroll_accum = 0.0;
            self.apply(PagerCommand::Prev)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_skips_punctuation_and_uppercases() {
        assert_eq!(initial("\"angel\" fish"), Some('A'));
        assert_eq!(initial("  zebra"), Some('Z'));
        assert_eq!(initial("..."), None);
    }

    #[test]
    fn selector_parsing() {
        assert_eq!("all".parse::<LetterSelector>().ok(), Some(LetterSelector::All));
        assert_eq!("b".parse::<LetterSelector>().ok(), Some(LetterSelector::Letter('B')));
        assert!("bc".parse::<LetterSelector>().is_err());
        assert!("#".parse::<LetterSelector>().is_err());
    }

    #[test]
    fn empty_total_still_has_one_page() {
        let p = Pager::new(10, 0);
        assert_eq!(p.page_count(), 1);
        assert_eq!(p.page_range(), 0..0);
    }
}
