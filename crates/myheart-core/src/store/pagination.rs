//! Fixed-size, 1-based pagination.

use log::debug;
use serde::Serialize;

/// Rows per page for every section except pharmacies.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `count` items; never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    count.div_ceil(size).max(1)
}

/// One page of results plus the "showing X to Y of N" range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first item shown, 0 when empty
    pub first_index: usize,
    /// 1-based index of the last item shown, 0 when empty
    pub last_index: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` to the half-open range `[(n-1)*size, n*size)`.
///
/// Out-of-range pages (including page 0) yield an empty page rather than
/// an error.
pub fn paginate<T: Clone>(items: &[T], number: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let start = number.saturating_sub(1).saturating_mul(size);
    let end = start.saturating_add(size).min(items.len());
    let slice = if number == 0 || start >= items.len() {
        &[][..]
    } else {
        &items[start..end]
    };

    Page {
        items: slice.to_vec(),
        number,
        page_size: size,
        total_pages: total_pages(items.len(), size),
        total_items: items.len(),
        first_index: if slice.is_empty() { 0 } else { start + 1 },
        last_index: if slice.is_empty() { 0 } else { end },
    }
}

/// Current-page cursor with guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Paginator {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    /// Advance one page. No-op on the last page.
    pub fn next(&mut self, count: usize) -> bool {
        if self.current < self.total_pages(count) {
            self.current += 1;
            debug!("page -> {}", self.current);
            true
        } else {
            false
        }
    }

    /// Go back one page. No-op on page 1.
    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            debug!("page -> {}", self.current);
            true
        } else {
            false
        }
    }

    /// Jump to a page if it exists.
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        if page >= 1 && page <= self.total_pages(count) {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// Pull the cursor back into `[1, total_pages]` after the item count changed.
    pub fn clamp(&mut self, count: usize) {
        let last = self.total_pages(count);
        if self.current > last {
            debug!("page {} out of range, clamped to {}", self.current, last);
            self.current = last;
        }
        if self.current == 0 {
            self.current = 1;
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// The current page of `items`.
    pub fn page<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.current, self.page_size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
