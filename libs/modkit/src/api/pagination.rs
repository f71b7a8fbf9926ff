//! Offset pagination shared by list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 1000,
        }
    }
}

/// `?limit=&offset=` as received.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page size; clamped to the configured maximum.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
}

/// Validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("limit must be greater than 0")]
pub struct ZeroLimit;

impl PageParams {
    pub fn resolve(&self, limits: PageLimits) -> Result<PageRequest, ZeroLimit> {
        let limit = match self.limit {
            Some(0) => return Err(ZeroLimit),
            Some(n) => n.min(limits.max_limit),
            None => limits.default_limit,
        };
        Ok(PageRequest {
            limit,
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// A page of results with the total row count.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, req: PageRequest) -> Self {
        Self {
            items,
            total,
            limit: req.limit,
            offset: req.offset,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let req = PageParams::default().resolve(PageLimits::default()).unwrap();
        assert_eq!(req, PageRequest::new(50, 0));
    }

    #[test]
    fn limit_is_clamped_and_zero_rejected() {
        let limits = PageLimits::default();
        let big = PageParams {
            limit: Some(5000),
            offset: Some(10),
        };
        assert_eq!(big.resolve(limits).unwrap(), PageRequest::new(1000, 10));

        let zero = PageParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(zero.resolve(limits), Err(ZeroLimit));
    }

    #[test]
    fn map_keeps_window() {
        let page = Page::new(vec![1, 2], 7, PageRequest::new(2, 4)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.total, page.limit, page.offset), (7, 2, 4));
    }
}
