//! Limit/offset paging shared by repository list queries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Error returned when a page request is out of range.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("page limit {0} is outside 1..={max}", max = PageRequest::MAX_LIMIT)]
pub struct PageLimitError(pub u32);

/// Validated limit/offset window over a result set.
///
/// Deserialising goes through [`PageRequest::new`]; a missing limit means
/// [`PageRequest::DEFAULT_LIMIT`] and a missing offset means zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Limit applied when the caller does not supply one.
    pub const DEFAULT_LIMIT: u32 = 50;
    /// Largest limit a caller may request.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageLimitError`] when `limit` is zero or exceeds
    /// [`Self::MAX_LIMIT`].
    pub const fn new(limit: u32, offset: u32) -> Result<Self, PageLimitError> {
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(PageLimitError(limit));
        }
        Ok(Self { limit, offset })
    }

    /// Returns the maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of items skipped before the page.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Cuts this page out of an already filtered and sorted result set.
    #[must_use]
    pub fn paginate<T>(self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let page_items = items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect();
        Page {
            items: page_items,
            total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

const fn default_limit() -> u32 {
    PageRequest::DEFAULT_LIMIT
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageLimitError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.limit, raw.offset)
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Number of items matching the query before paging.
    pub total: usize,
    /// Limit the page was cut with.
    pub limit: u32,
    /// Offset the page was cut at.
    pub offset: u32,
}

impl<T> Page<T> {
    /// Transforms every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Orients an ascending comparison result in this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}
