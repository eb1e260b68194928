use gate_access_api::PaginationMeta;

/// Offset window into the newest-first access log.
///
/// ```
/// use gate_access_db::repository::pagination::PageRequest;
///
/// let third = PageRequest::for_page(20, 3);
/// assert_eq!(third.offset, 40);
/// assert_eq!(third.page_number(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Window for a 1-based page number. Page 0 is read as page 1.
    /// The offset saturates; use [`PageRequest::try_for_page`] for caller input.
    pub fn for_page(per_page: usize, page: usize) -> Self {
        Self {
            limit: per_page,
            offset: page.saturating_sub(1).saturating_mul(per_page),
        }
    }

    /// Like `for_page`, but `None` when the window cannot be expressed as a
    /// SQL `LIMIT`/`OFFSET` pair (both must fit in a signed 64-bit integer).
    pub fn try_for_page(per_page: usize, page: usize) -> Option<Self> {
        let offset = page.saturating_sub(1).checked_mul(per_page)?;
        let fits = |n: usize| i64::try_from(n).is_ok();
        (fits(offset) && fits(per_page)).then_some(Self {
            limit: per_page,
            offset,
        })
    }

    pub fn page_number(&self) -> usize {
        self.offset.checked_div(self.limit).unwrap_or(0).saturating_add(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::for_page(20, 1)
    }
}

/// One window of rows together with the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Rows matching the filter, ignoring the window.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self { items, total, limit, offset }
    }

    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total
    }

    pub fn page_number(&self) -> usize {
        PageRequest::new(self.limit, self.offset).page_number()
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return usize::from(self.total > 0);
        }
        self.total.div_ceil(self.limit)
    }

    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last_page(&self) -> bool {
        !self.has_more()
    }

    /// Navigation block returned alongside `/api/logs` results.
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            total_logs: self.total,
            total_pages: self.total_pages(),
            current_page: self.page_number(),
            per_page: self.limit,
            has_next: self.has_more(),
            has_prev: !self.is_first_page(),
        }
    }
}
