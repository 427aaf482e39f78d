//! Page parameters for the record listing endpoint.
//!
//! The API is one-based (`p=1` is the first page); the store works with a
//! zero-based page index.

use crate::error::CoreError;

/// Page number used when `p` is omitted.
pub const DEFAULT_PAGE: i32 = 1;

/// Page size used when `c` is omitted.
pub const DEFAULT_PAGE_SIZE: i32 = 100;

/// Page sizes at or below this value are rejected.
pub const MIN_PAGE_SIZE_EXCLUSIVE: i32 = 10;

/// A validated, zero-based page request handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: i64,
    pub size: i64,
}

impl PageRequest {
    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        self.index * self.size
    }
}

/// Validate API page parameters and convert them to a [`PageRequest`].
///
/// `page` must be at least 1 and `count` strictly greater than
/// [`MIN_PAGE_SIZE_EXCLUSIVE`].
pub fn page_request(page: Option<i32>, count: Option<i32>) -> Result<PageRequest, CoreError> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let count = count.unwrap_or(DEFAULT_PAGE_SIZE);

    if page <= 0 {
        return Err(CoreError::Validation(format!(
            "page must be >= 1, got {page}"
        )));
    }
    if count <= MIN_PAGE_SIZE_EXCLUSIVE {
        return Err(CoreError::Validation(format!(
            "count must be > {MIN_PAGE_SIZE_EXCLUSIVE}, got {count}"
        )));
    }

    Ok(PageRequest {
        index: i64::from(page) - 1,
        size: i64::from(count),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_map_to_first_page_of_100() {
        let req = page_request(None, None).unwrap();
        assert_eq!(req, PageRequest { index: 0, size: 100 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn second_page_of_50_starts_at_offset_50() {
        let req = page_request(Some(2), Some(50)).unwrap();
        assert_eq!(req.index, 1);
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn zero_page_rejected() {
        assert_matches!(page_request(Some(0), Some(50)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_page_rejected() {
        assert_matches!(page_request(Some(-3), None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn count_of_ten_rejected() {
        assert_matches!(page_request(None, Some(10)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn count_of_eleven_accepted() {
        assert_eq!(page_request(None, Some(11)).unwrap().size, 11);
    }

    #[test]
    fn largest_offset_does_not_overflow() {
        let req = page_request(Some(i32::MAX), Some(i32::MAX)).unwrap();
        assert!(req.offset() > 0);
    }
}
