pub const ITEMS_PER_PAGE: usize = 20;

/// How many page buttons are shown at once.
const WINDOW: usize = 5;

/// Page buttons and the 1-based inclusive item bounds of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub pages: Vec<usize>,
    pub start_item: usize,
    pub end_item: usize,
    pub total_pages: usize,
}

impl PageRange {
    /// A single page needs no pagination controls.
    pub fn needs_controls(&self) -> bool {
        self.total_pages > 1
    }
}

pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// `page` pulled into `[1, total_pages]`; 1 when there is nothing to show.
pub fn clamp_page(page: usize, total_items: usize, items_per_page: usize) -> usize {
    page.clamp(1, total_pages(total_items, items_per_page).max(1))
}

/// The slice of `items` shown on `page`.
pub fn paginate<T>(items: &[T], page: usize, items_per_page: usize) -> &[T] {
    let per_page = items_per_page.max(1);
    let page = clamp_page(page, items.len(), per_page);
    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn page_range(total_items: usize, items_per_page: usize, current_page: usize) -> PageRange {
    let per_page = items_per_page.max(1);
    let total = total_pages(total_items, per_page);
    if total == 0 {
        return PageRange { pages: Vec::new(), start_item: 0, end_item: 0, total_pages: 0 };
    }

    let current = current_page.clamp(1, total);
    let last = (current.saturating_sub(WINDOW / 2).max(1) + WINDOW - 1).min(total);
    let first = last.saturating_sub(WINDOW - 1).max(1);

    PageRange {
        pages: (first..=last).collect(),
        start_item: ((current - 1) * per_page + 1).min(total_items),
        end_item: (current * per_page).min(total_items),
        total_pages: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_slides_near_edges() {
        assert_eq!(page_range(200, 20, 1).pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(page_range(200, 20, 2).pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(page_range(200, 20, 6).pages, vec![4, 5, 6, 7, 8]);
        assert_eq!(page_range(200, 20, 9).pages, vec![6, 7, 8, 9, 10]);
        assert_eq!(page_range(200, 20, 10).pages, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let range = page_range(0, 20, 1);
        assert!(range.pages.is_empty());
        assert_eq!((range.start_item, range.end_item), (0, 0));
        assert!(paginate::<u8>(&[], 4, 20).is_empty());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<usize> = (1..=47).collect();
        assert_eq!(paginate(&items, 9, 20), &items[40..]);
        assert_eq!(paginate(&items, 0, 20), &items[..20]);
        assert_eq!(page_range(47, 20, 9).start_item, 41);
    }
}
