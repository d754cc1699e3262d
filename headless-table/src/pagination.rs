//! Page math
//!
//! Pages are 1-based. Every page request is clamped into `[1, page_count]`
//! after rounding fractional input up, so no request is ever rejected.

use std::ops::Range;

/// Page numbers and sizes accepted by [`Pagination`]. Floats are rounded
/// up; NaN counts as zero.
pub trait PageNumber: Copy {
    fn to_page(self) -> i64;
}

macro_rules! int_page_number {
    ($($t:ty),*) => {
        $(impl PageNumber for $t {
            fn to_page(self) -> i64 {
                i64::try_from(self).unwrap_or(i64::MAX)
            }
        })*
    };
}

int_page_number!(i32, i64, u32, u64, usize);

impl PageNumber for f64 {
    fn to_page(self) -> i64 {
        if self.is_nan() { 0 } else { self.ceil() as i64 }
    }
}

impl PageNumber for f32 {
    fn to_page(self) -> i64 {
        f64::from(self).to_page()
    }
}

/// `max(1, min(page, max))`.
fn calculate_page(page: i64, max: usize) -> usize {
    let max = i64::try_from(max).unwrap_or(i64::MAX);
    page.min(max).max(1) as usize
}

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 5,
        }
    }
}

impl Pagination {
    /// Values below 1 become 1. The current page is clamped lazily, on the
    /// first navigation.
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`; zero for an empty table.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page within `total` rows. Empty when the
    /// current page lies past the end.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.page_size).min(total);
        let end = self.current_page.saturating_mul(self.page_size).min(total);
        start..end
    }

    /// The rows of the current page.
    pub fn page_rows<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.page_range(rows.len())]
    }

    /// Moves to `page`, clamped into `[1, page_count]`. Returns `true` if the
    /// current page changed.
    pub fn set_page(&mut self, page: impl PageNumber, total: usize) -> bool {
        let page = calculate_page(page.to_page(), self.page_count(total));
        let changed = page != self.current_page;
        self.current_page = page;
        changed
    }

    /// Moves to the page computed from the current one.
    pub fn set_page_with(&mut self, f: impl FnOnce(usize) -> i64, total: usize) -> bool {
        let page = f(self.current_page);
        self.set_page(page, total)
    }

    pub fn next_page(&mut self, total: usize) -> bool {
        self.set_page_with(|page| page as i64 + 1, total)
    }

    pub fn previous_page(&mut self, total: usize) -> bool {
        self.set_page_with(|page| page as i64 - 1, total)
    }

    pub fn first_page(&mut self, total: usize) -> bool {
        self.set_page(1, total)
    }

    pub fn last_page(&mut self, total: usize) -> bool {
        let last = self.page_count(total);
        self.set_page(last, total)
    }

    /// Sets the page size (at least 1, fractions rounded up) and clamps the
    /// current page against the page count for the new size.
    pub fn set_page_size(&mut self, size: impl PageNumber, total: usize) -> bool {
        let size = size.to_page().max(1) as usize;
        let page = calculate_page(self.current_page as i64, total.div_ceil(size));
        let changed = size != self.page_size || page != self.current_page;
        self.page_size = size;
        self.current_page = page;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_page() {
        assert_eq!(calculate_page(0, 5), 1);
        assert_eq!(calculate_page(-3, 5), 1);
        assert_eq!(calculate_page(9, 5), 5);
        assert_eq!(calculate_page(3, 0), 1);
    }

    #[test]
    fn test_fractional_input_rounds_up() {
        let mut pagination = Pagination::default();
        pagination.set_page(2.1, 25);
        assert_eq!(pagination.current_page(), 3);
        pagination.set_page_size(3.5, 25);
        assert_eq!(pagination.page_size(), 4);
        pagination.set_page_size(0, 25);
        assert_eq!(pagination.page_size(), 1);
        pagination.set_page(f64::NAN, 25);
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_empty_table() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.page_count(0), 0);
        pagination.next_page(0);
        assert_eq!(pagination.current_page(), 1);
        pagination.last_page(0);
        assert_eq!(pagination.current_page(), 1);
        assert!(pagination.page_rows::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_page_rows() {
        let rows: Vec<usize> = (1..=12).collect();
        let mut pagination = Pagination::new(1, 5);
        pagination.last_page(rows.len());
        assert_eq!(pagination.page_rows(&rows), &[11, 12]);
    }

    #[test]
    fn test_stale_page_past_end_is_empty() {
        let pagination = Pagination::new(9, 5);
        assert_eq!(pagination.page_range(12), 12..12);
    }
}
