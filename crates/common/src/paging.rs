//! Paging primitives shared by repositories and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Default number of entries per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: usize,

    /// Number of entries per page.
    pub size: usize,
}

impl PageRequest {
    /// Creates a page request, clamping the size to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Creates a page request for the first page with the given size.
    pub fn first(size: usize) -> Self {
        Self::new(0, size)
    }

    /// Number of entries to skip.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// A page of results together with the total number of matching entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Slices a page out of an already filtered and ordered list.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self {
            items,
            page: request.page,
            size: request.size,
            total,
        }
    }

    /// Returns the number of pages needed to hold `total` entries.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.size.max(1))
    }

    /// Maps every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }

    /// Like [`Page::map`] but with a fallible mapping.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            page: self.page,
            size: self.size,
            total: self.total,
        })
    }
}
