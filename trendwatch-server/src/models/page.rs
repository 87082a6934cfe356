//! Limit/offset pagination

use serde::Deserialize;

/// Maximum rows per request
pub const MAX_LIMIT: i64 = 100;

/// Default rows per request
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated limit/offset slice of the default ordering
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Create a page with validation.
    ///
    /// - Limit is clamped to 1..=100
    /// - Offset is clamped to a minimum of 0
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Query parameters for paginated reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Self::new(
            params.limit.unwrap_or(DEFAULT_LIMIT),
            params.offset.unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::from(PageParams::default());
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn clamps_limit() {
        let page = Page::new(0, 0);
        assert_eq!(page.limit, 1);

        let page = Page::new(999, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn clamps_negative_offset() {
        let page = Page::new(10, -5);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn passes_through_explicit_params() {
        let page = Page::from(PageParams {
            limit: Some(25),
            offset: Some(50),
        });
        assert_eq!(page.limit, 25);
        assert_eq!(page.offset, 50);
    }
}
