//! Paging over already-fetched search results.

use serde::Serialize;

/// One page of results plus the page buttons to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    /// Total number of pages; 0 when there are no items.
    pub pages: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Slice out page `page` (1-based) of `items`.
///
/// Out-of-range page numbers are clamped to the first or last page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let pages = items.len().div_ceil(per_page);
    let page = page.clamp(1, pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    let slice = items.get(start..end).unwrap_or_default();

    Page {
        items: slice.to_vec(),
        page,
        pages,
        prev: (page > 1).then(|| page - 1),
        next: (page < pages).then(|| page + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_has_only_next() {
        let page = paginate(&numbers(25), 1, 10);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.pages, 3);
        assert_eq!(page.prev, None);
        assert_eq!(page.next, Some(2));
    }

    #[test]
    fn test_middle_page_has_both() {
        let page = paginate(&numbers(25), 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.prev, Some(1));
        assert_eq!(page.next, Some(3));
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = paginate(&numbers(25), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.prev, Some(2));
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_single_page_has_no_buttons() {
        let page = paginate(&numbers(4), 1, 10);
        assert_eq!(page.pages, 1);
        assert_eq!(page.prev, None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(paginate(&numbers(25), 9, 10).page, 3);
        assert_eq!(paginate(&numbers(25), 0, 10).page, 1);
    }

    #[test]
    fn test_empty() {
        let page = paginate::<usize>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.next, None);
    }
}
