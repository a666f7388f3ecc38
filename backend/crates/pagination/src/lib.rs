//! Offset pagination primitives shared by backend endpoints.
//!
//! Endpoints that return collections use a stable envelope shape:
//! `content`, `page`, `size`, `totalPages`, `totalElements`. This crate owns
//! the envelope arithmetic and the validation of inbound page parameters so
//! every endpoint pages identically.
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing,
        reason = "tests assert by panicking"
    )
)]

use serde::{Deserialize, Serialize};

/// Default page index when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 0;
/// Default page size when the caller omits `size`.
pub const DEFAULT_SIZE: u32 = 10;
/// Upper bound on `size` to keep result sets bounded.
pub const MAX_SIZE: u32 = 100;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `size` was zero.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// `size` exceeded [`MAX_SIZE`].
    #[error("page size must be at most {max}")]
    SizeTooLarge { max: u32 },
}

/// Validated request for one page of results.
///
/// ## Invariants
/// - `size` is in `1..=MAX_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate and construct a page request.
    pub fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_SIZE {
            return Err(PageRequestError::SizeTooLarge { max: MAX_SIZE });
        }
        Ok(Self { page, size })
    }

    /// Build a request from optional query parameters, applying defaults.
    pub fn from_params(page: Option<u32>, size: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), size.unwrap_or(DEFAULT_SIZE))
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of elements per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row offset for the backing query.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Row limit for the backing query.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the totals clients need to iterate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
    pub total_elements: u64,
}

impl<T> PageEnvelope<T> {
    /// Assemble an envelope from page content and the total element count.
    ///
    /// `total_pages` is `ceil(total_elements / size)`; an empty result set
    /// yields zero pages.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size);
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_pages,
            total_elements,
        }
    }

    /// Map the content type while preserving the envelope totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}
