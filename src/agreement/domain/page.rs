//! Paged list requests and responses.

use super::{Agreement, AgreementDomainError};
use serde::Deserialize;

/// Sort direction on the creation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest first, used for work queues.
    OldestFirst,
    /// Newest first, used for personal listings.
    NewestFirst,
}

impl SortOrder {
    /// Returns the backend `sort` query value.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::OldestFirst => "createdAt,asc",
            Self::NewestFirst => "createdAt,desc",
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: SortOrder,
}

impl PageRequest {
    /// Default page size used by listing views.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`AgreementDomainError::InvalidPageSize`] when `size` is zero.
    pub const fn new(page: u32, size: u32, sort: SortOrder) -> Result<Self, AgreementDomainError> {
        if size == 0 {
            return Err(AgreementDomainError::InvalidPageSize);
        }
        Ok(Self { page, size, sort })
    }

    /// First page of a personal listing, newest first.
    #[must_use]
    pub const fn newest_first(size: u32) -> Self {
        Self {
            page: 0,
            size: clamp_size(size),
            sort: SortOrder::NewestFirst,
        }
    }

    /// First page of a work queue, oldest first.
    #[must_use]
    pub const fn oldest_first(size: u32) -> Self {
        Self {
            page: 0,
            size: clamp_size(size),
            sort: SortOrder::OldestFirst,
        }
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn sort(self) -> SortOrder {
        self.sort
    }
}

const fn clamp_size(size: u32) -> u32 {
    if size == 0 { PageRequest::DEFAULT_SIZE } else { size }
}

/// One page of agreements as returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementPage {
    agreements: Vec<Agreement>,
    total_elements: u64,
}

impl AgreementPage {
    /// Creates a page.
    #[must_use]
    pub const fn new(agreements: Vec<Agreement>, total_elements: u64) -> Self {
        Self {
            agreements,
            total_elements,
        }
    }

    /// Returns the agreements in backend order.
    #[must_use]
    pub fn agreements(&self) -> &[Agreement] {
        &self.agreements
    }

    /// Returns the total number of matching agreements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Consumes the page, returning its agreements.
    #[must_use]
    pub fn into_agreements(self) -> Vec<Agreement> {
        self.agreements
    }
}

/// List response body.
///
/// The backend answers either with a page envelope or with a bare array;
/// both decode into an [`AgreementPage`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    /// `{content: [...], totalElements: n}`.
    #[serde(rename_all = "camelCase")]
    Paged {
        /// Agreements on this page.
        content: Vec<Agreement>,
        /// Total across pages; absent in some responses.
        #[serde(default)]
        total_elements: Option<u64>,
    },
    /// `[...]`.
    Bare(Vec<Agreement>),
}

impl From<ListEnvelope> for AgreementPage {
    fn from(envelope: ListEnvelope) -> Self {
        match envelope {
            ListEnvelope::Paged {
                content,
                total_elements,
            } => {
                let total = total_elements.unwrap_or(content.len() as u64);
                Self::new(content, total)
            }
            ListEnvelope::Bare(content) => {
                let total = content.len() as u64;
                Self::new(content, total)
            }
        }
    }
}
