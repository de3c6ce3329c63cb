//! Pagination calculator

/// Number of page buttons shown before the sequence collapses with ellipses
const MAX_UNCOLLAPSED_PAGES: usize = 7;

/// One slot in the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// The (page, page_size, total) triple the footer is derived from.
/// Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page,
            page_size,
            total,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            (self.total + self.page_size - 1) / self.page_size
        }
    }

    /// 1-based index of the first item on the current page
    pub fn start_item(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size + 1
    }

    /// 1-based index of the last item on the current page
    pub fn end_item(&self) -> usize {
        std::cmp::min(self.page * self.page_size, self.total)
    }

    /// Zero-based slice bounds of the current page within `total` items
    pub fn offset_range(&self) -> std::ops::Range<usize> {
        let start = std::cmp::min(self.page.saturating_sub(1) * self.page_size, self.total);
        let end = std::cmp::min(start + self.page_size, self.total);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page != self.total_pages()
    }

    /// Visible page-number sequence, collapsing with ellipses past seven pages
    pub fn page_items(&self) -> Vec<PageItem> {
        let total_pages = self.total_pages();
        let page = self.page;

        if total_pages <= MAX_UNCOLLAPSED_PAGES {
            return (1..=total_pages).map(PageItem::Page).collect();
        }

        let mut items = Vec::with_capacity(MAX_UNCOLLAPSED_PAGES);
        if page <= 4 {
            items.extend((1..=5).map(PageItem::Page));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_pages));
        } else if page >= total_pages - 3 {
            items.push(PageItem::Page(1));
            items.push(PageItem::Ellipsis);
            items.extend((total_pages - 4..=total_pages).map(PageItem::Page));
        } else {
            items.push(PageItem::Page(1));
            items.push(PageItem::Ellipsis);
            items.extend((page - 1..=page + 1).map(PageItem::Page));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_pages));
        }
        items
    }

    /// Footer controls, or `None` when there is at most one page
    pub fn controls(&self) -> Option<PaginationControls> {
        if self.total_pages() <= 1 {
            return None;
        }

        Some(PaginationControls {
            summary: format!(
                "Showing {} to {} of {} results",
                self.start_item(),
                self.end_item(),
                self.total
            ),
            items: self.page_items(),
            current: self.page,
            previous_enabled: self.has_previous(),
            next_enabled: self.has_next(),
        })
    }

    /// Page requested by the Previous control, if it is enabled
    pub fn previous_request(&self) -> Option<usize> {
        if self.total_pages() > 1 {
            self.page.checked_sub(1).filter(|page| *page >= 1)
        } else {
            None
        }
    }

    /// Page requested by the Next control, if it is enabled
    pub fn next_request(&self) -> Option<usize> {
        if self.total_pages() > 1 && self.has_next() {
            Some(self.page + 1)
        } else {
            None
        }
    }
}

/// Everything the footer needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub summary: String,
    pub items: Vec<PageItem>,
    pub current: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    fn items(page: usize, total_pages: usize) -> Vec<PageItem> {
        Pagination::new(page, 10, total_pages * 10).page_items()
    }

    #[test]
    fn test_no_controls_for_single_page() {
        assert_eq!(Pagination::new(1, 10, 0).controls(), None);
        assert_eq!(Pagination::new(1, 10, 7).controls(), None);
        assert_eq!(Pagination::new(1, 10, 10).controls(), None);
        assert!(Pagination::new(1, 10, 11).controls().is_some());
    }

    #[test]
    fn test_derived_values() {
        let p = Pagination::new(3, 10, 42);
        assert_eq!(p.total_pages(), 5);
        assert_eq!(p.start_item(), 21);
        assert_eq!(p.end_item(), 30);

        let last = Pagination::new(5, 10, 42);
        assert_eq!(last.start_item(), 41);
        assert_eq!(last.end_item(), 42);
        assert_eq!(last.offset_range(), 40..42);
    }

    #[test]
    fn test_zero_page_size_has_no_pages() {
        let p = Pagination::new(1, 0, 5);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.controls(), None);
    }

    #[test]
    fn test_short_sequences_are_not_collapsed() {
        assert_eq!(items(2, 7), (1..=7).map(Page).collect::<Vec<_>>());
        assert_eq!(items(1, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn test_windowing_near_start() {
        assert_eq!(
            items(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            items(4, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_windowing_near_end() {
        assert_eq!(
            items(10, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            items(7, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_windowing_middle() {
        assert_eq!(
            items(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            items(6, 10),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_windowing_eight_pages() {
        // page 4 is both <= 4 and >= total - 3; the first rule wins
        assert_eq!(
            items(4, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(8)]
        );
        assert_eq!(
            items(5, 8),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn test_boundary_controls_are_disabled() {
        let first = Pagination::new(1, 10, 30);
        assert_eq!(first.previous_request(), None);
        assert_eq!(first.next_request(), Some(2));

        let last = Pagination::new(3, 10, 30);
        assert_eq!(last.next_request(), None);
        assert_eq!(last.previous_request(), Some(2));

        let controls = last.controls().unwrap();
        assert!(controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert_eq!(controls.summary, "Showing 21 to 30 of 30 results");
    }

    #[test]
    fn test_page_zero_has_no_previous() {
        let pagination = Pagination::new(0, 10, 30);
        assert!(!pagination.has_previous());
        assert_eq!(pagination.previous_request(), None);
        assert_eq!(pagination.next_request(), Some(1));
    }
}
