use std::fmt;
use std::ops::Range;

/// Pages shown on each side of the current page.
const SIBLINGS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page arithmetic for a list whose total size is known.
///
/// `total` comes from the source of truth (the server for audit logs), not
/// from the length of what was fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Pager {
    /// `page` is 1-based and clamped into range. A zero page size is treated as 1.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = total.div_ceil(page_size).max(1);
        Pager {
            page: page.clamp(1, page_count),
            page_size,
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Never less than 1, an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Index range of the current page within the full list.
    pub fn slice_bounds(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Page numbers for a pager control. The first and last pages are always
    /// present, plus up to two pages either side of the current one. Each gap
    /// collapses into a single [`PageItem::Ellipsis`].
    pub fn items(&self) -> Vec<PageItem> {
        let last = self.page_count();
        let window_start = self.page.saturating_sub(SIBLINGS).max(1);
        let window_end = (self.page + SIBLINGS).min(last);

        let mut items = vec![PageItem::Page(1)];

        if window_start > 2 {
            items.push(PageItem::Ellipsis);
        }

        for page in window_start.max(2)..=window_end.min(last - 1) {
            items.push(PageItem::Page(page));
        }

        if window_end + 1 < last {
            items.push(PageItem::Ellipsis);
        }

        if last > 1 {
            items.push(PageItem::Page(last));
        }

        items
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// The records of the current page. Bounds are clamped to `records`.
pub fn paginate<'a, T>(records: &'a [T], pager: &Pager) -> &'a [T] {
    let bounds = pager.slice_bounds();
    let start = bounds.start.min(records.len());
    let end = bounds.end.min(records.len());
    &records[start..end]
}
