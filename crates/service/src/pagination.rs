//! Pagination utilities for service layer
//!
//! Provides `PageRequest`/`Page` and helpers to normalize inputs.

use std::str::FromStr;

/// Bounds applied when normalizing a requested page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self { Self { default_size: 10, max_size: 100 } }
}

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl PageRequest {
    /// Apply defaults and clamp `size` to `1..=max_size`.
    pub fn normalize(page: Option<u64>, size: Option<u64>, limits: PageLimits) -> Self {
        let size = size.unwrap_or(limits.default_size).clamp(1, limits.max_size.max(1));
        Self { page: page.unwrap_or(0), size }
    }

    pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }
}

impl Default for PageRequest {
    fn default() -> Self { Self::normalize(None, None, PageLimits::default()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("direction must be 'asc' or 'desc', got '{other}'")),
        }
    }
}

impl From<SortDirection> for sea_orm::Order {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

/// One slice of a result set plus the counts needed to navigate it.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self { items, total_count, page: request.page, size: request.size }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 { 0 } else { self.total_count.div_ceil(self.size) }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults() {
        let p = PageRequest::normalize(None, None, PageLimits::default());
        assert_eq!(p, PageRequest { page: 0, size: 10 });
    }

    #[test]
    fn normalize_clamps_zero_and_upper_bound() {
        assert_eq!(PageRequest::normalize(Some(2), Some(0), PageLimits::default()).size, 1);
        assert_eq!(PageRequest::normalize(Some(2), Some(1000), PageLimits::default()).size, 100);
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest { page: 3, size: 20 }.offset(), 60);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!(" asc ".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page { items: vec![], total_count: 21, page: 0, size: 10 };
        assert_eq!(page.total_pages(), 3);
        let empty: Page<u8> = Page { items: vec![], total_count: 0, page: 0, size: 10 };
        assert_eq!(empty.total_pages(), 0);
    }
}
