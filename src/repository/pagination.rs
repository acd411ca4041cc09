use serde::Deserialize;

/// Page selection for list queries.
///
/// `page < 1` reads as the first page; a size outside `1..=100` reads as 20.
/// With `disable` set, offset and limit are not applied at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub disable: bool,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub size: i64,
}

impl Pagination {
    pub const DEFAULT_SIZE: i64 = 20;
    pub const MAX_SIZE: i64 = 100;

    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self {
            disable: false,
            page,
            size,
        }
    }

    #[must_use]
    pub const fn unpaged() -> Self {
        Self {
            disable: true,
            page: 0,
            size: 0,
        }
    }

    #[must_use]
    pub const fn page(&self) -> i64 {
        if self.page < 1 {
            1
        } else {
            self.page
        }
    }

    #[must_use]
    pub const fn limit(&self) -> i64 {
        if self.size < 1 || self.size > Self::MAX_SIZE {
            Self::DEFAULT_SIZE
        } else {
            self.size
        }
    }

    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_out_of_range_size_falls_back() {
        assert_eq!(Pagination::new(1, 0).limit(), 20);
        assert_eq!(Pagination::new(1, 101).limit(), 20);
        assert_eq!(Pagination::new(1, 100).limit(), 100);
        assert_eq!(Pagination::new(1, 1).limit(), 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(-3, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 500).offset(), 40);
    }
}
