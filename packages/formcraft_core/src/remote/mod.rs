//! Paged remote lists
//!
//! The browsing view reads remote collections one page at a time:
//! `{page}` in, `{results, next, previous, count}` out.

mod http;

pub use http::HttpPagedSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Page {0} does not exist")]
    NoSuchPage(u32),
}

/// A request for one page. Pages are numbered from 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
}

impl PageQuery {
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }
}

/// One page of results plus links to its neighbours.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Total number of items across all pages.
    pub count: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[async_trait]
pub trait PagedSource<T>: Send + Sync {
    async fn fetch(&self, query: PageQuery) -> Result<Page<T>, RemoteError>;
}

/// A fixed list served in pages, shaped like the remote API.
pub struct InMemoryPagedSource<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T> InMemoryPagedSource<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl<T> PagedSource<T> for InMemoryPagedSource<T>
where
    T: Clone + Send + Sync,
{
    async fn fetch(&self, query: PageQuery) -> Result<Page<T>, RemoteError> {
        let page = query.page.max(1);
        let start = (page as usize - 1)
            .checked_mul(self.page_size)
            .ok_or(RemoteError::NoSuchPage(page))?;
        if start >= self.items.len() && !(page == 1 && self.items.is_empty()) {
            return Err(RemoteError::NoSuchPage(page));
        }
        let end = start.saturating_add(self.page_size).min(self.items.len());

        Ok(Page {
            results: self.items[start..end].to_vec(),
            next: (end < self.items.len()).then(|| format!("?page={}", page + 1)),
            previous: (page > 1).then(|| format!("?page={}", page - 1)),
            count: self.items.len() as u64,
        })
    }
}

/// Browsing state over a paged source: current page and its contents.
pub struct Pager<T> {
    page: u32,
    page_size: usize,
    current: Option<Page<T>>,
}

impl<T> Pager<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            current: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn current(&self) -> Option<&Page<T>> {
        self.current.as_ref()
    }

    /// Number of pages implied by the last fetched `count`.
    pub fn total_pages(&self) -> Option<u32> {
        let count = self.current.as_ref()?.count;
        let size = self.page_size as u64;
        Some(((count + size - 1) / size).max(1) as u32)
    }

    pub fn has_next(&self) -> bool {
        self.current.as_ref().map(Page::has_next).unwrap_or(false)
    }

    pub fn has_previous(&self) -> bool {
        self.current.as_ref().map(Page::has_previous).unwrap_or(false)
    }

    /// Fetch `page` and make it current. The pager is unchanged on failure.
    pub async fn go_to(&mut self, source: &dyn PagedSource<T>, page: u32) -> Result<&Page<T>, RemoteError> {
        let query = PageQuery::new(page);
        let fetched = source.fetch(query).await?;
        log::debug!(
            "fetched page {} ({} of {} item(s))",
            query.page,
            fetched.results.len(),
            fetched.count
        );
        self.page = query.page;
        Ok(self.current.insert(fetched))
    }

    pub async fn next(&mut self, source: &dyn PagedSource<T>) -> Result<&Page<T>, RemoteError> {
        self.go_to(source, self.page.saturating_add(1)).await
    }

    pub async fn previous(&mut self, source: &dyn PagedSource<T>) -> Result<&Page<T>, RemoteError> {
        self.go_to(source, self.page.saturating_sub(1)).await
    }
}
