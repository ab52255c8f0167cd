//! Category name → listing URL mapping
//!
//! The index is read from the site root's sidebar once per session and is
//! immutable afterwards. A refresh is a full rebuild.

use crate::crawler::parser::extract_categories;
use crate::crawler::Fetcher;
use crate::{NetworkError, ScraperError};
use url::Url;

/// A resolved category entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: Url,
}

/// Ordered mapping from category display name to absolute listing URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: Vec<Category>,
}

impl CategoryIndex {
    /// Builds an index from the site root markup
    ///
    /// Hrefs are resolved against `root`. Entries whose href cannot be
    /// resolved are dropped. A repeated name keeps its first position and
    /// takes the later URL.
    pub fn from_html(html: &str, root: &Url) -> Self {
        let mut index = Self::default();

        for link in extract_categories(html) {
            match crate::url::resolve(root, &link.href) {
                Ok(url) => {
                    tracing::debug!("Category: {}, Link: {}", link.name, url);
                    index.insert(link.name, url);
                }
                Err(e) => {
                    tracing::debug!("Skipping category '{}': {}", link.name, e);
                }
            }
        }

        index
    }

    /// Builds an index from explicit entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Url)>,
    {
        let mut index = Self::default();
        for (name, url) in entries {
            index.insert(name, url);
        }
        index
    }

    /// Fetches the site root and builds the index from its sidebar
    pub async fn fetch(fetcher: &Fetcher, root: &Url) -> Result<Self, NetworkError> {
        tracing::info!("Fetching category index from {}", root);
        let html = fetcher.fetch_text(root).await?;
        let index = Self::from_html(&html, root);
        tracing::info!("Found {} categories", index.len());
        Ok(index)
    }

    fn insert(&mut self, name: String, url: Url) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.url = url,
            None => self.entries.push(Category { name, url }),
        }
    }

    /// Returns the listing URL for an exact category name
    pub fn get(&self, name: &str) -> Option<&Url> {
        self.entries
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.url)
    }

    /// Like [`CategoryIndex::get`], failing with `CategoryNotFound`
    pub fn lookup(&self, name: &str) -> Result<&Url, ScraperError> {
        self.get(name).ok_or_else(|| ScraperError::CategoryNotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Category names in sidebar order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
