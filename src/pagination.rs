use crate::error::ApiError;

pub const QUESTIONS_PER_PAGE: u32 = 10;

/// A validated, 1-based page of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub fn new(number: Option<u32>) -> Result<Self, ApiError> {
        Self::with_size(number, QUESTIONS_PER_PAGE)
    }

    pub fn with_size(number: Option<u32>, size: u32) -> Result<Self, ApiError> {
        let number = number.unwrap_or(1);
        if number == 0 || size == 0 {
            return Err(ApiError::BadRequest);
        }
        Ok(Page { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }

    /// A page past the end is a missing resource, except page 1 which is
    /// simply empty when there is nothing to list.
    pub fn ensure_in_range(&self, returned: usize) -> Result<(), ApiError> {
        if returned == 0 && self.number != 1 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let page = Page::new(None).unwrap();
        assert_eq!(page.number(), 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let page = Page::new(Some(3)).unwrap();
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn page_zero_is_bad_request() {
        assert!(matches!(Page::new(Some(0)), Err(ApiError::BadRequest)));
    }

    #[test]
    fn largest_page_does_not_overflow() {
        let page = Page::new(Some(u32::MAX)).unwrap();
        assert_eq!(page.offset(), (i64::from(u32::MAX) - 1) * 10);
    }

    #[test]
    fn empty_first_page_is_allowed() {
        assert!(Page::new(Some(1)).unwrap().ensure_in_range(0).is_ok());
        assert!(matches!(
            Page::new(Some(2)).unwrap().ensure_in_range(0),
            Err(ApiError::NotFound)
        ));
        assert!(Page::new(Some(2)).unwrap().ensure_in_range(3).is_ok());
    }
}
