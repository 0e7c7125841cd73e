use crate::models::JobResult;
use crate::view::filter::FilterCriteria;
use crate::view::pager::{PageItem, PageSize, PageWindow, page_count};

/// Everything needed to derive what the results table currently shows.
///
/// Three inputs are independent: the full result set, the filter, and the
/// pagination settings. Changing any of them sends the user back to page 1.
/// Navigation requests outside `[1, total_pages]` are ignored, never errors.
#[derive(Debug, Clone)]
pub struct ViewState {
    results: Vec<JobResult>,
    filter: FilterCriteria,
    /// Indices into `results` that pass `filter`.
    filtered: Vec<usize>,
    page: usize,
    page_size: PageSize,
    window: PageWindow,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSize::default(), PageWindow::default())
    }
}

impl ViewState {
    pub fn new(page_size: PageSize, window: PageWindow) -> Self {
        Self {
            results: Vec::new(),
            filter: FilterCriteria::default(),
            filtered: Vec::new(),
            page: 1,
            page_size,
            window,
        }
    }

    /// Replace the whole result set. Filter and page size are kept.
    pub fn set_results(&mut self, results: Vec<JobResult>) {
        self.results = results;
        self.refilter();
        self.page = 1;
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.filter = criteria;
        self.refilter();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 1;
    }

    pub fn set_window(&mut self, window: PageWindow) {
        self.window = window;
    }

    /// Jump to page `n`; out-of-range requests are ignored.
    pub fn go_to_page(&mut self, n: usize) {
        if (1..=self.total_pages()).contains(&n) {
            self.page = n;
        }
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// The unfiltered result set, in server order.
    pub fn results(&self) -> &[JobResult] {
        &self.results
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// `ceil(filtered_count / page_size)`; zero when nothing passes the filter.
    pub fn total_pages(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }

    /// The rows on the current page, in result-set order.
    pub fn visible_rows(&self) -> Vec<&JobResult> {
        self.page_bounds()
            .map(|(start, end)| {
                self.filtered[start..end]
                    .iter()
                    .map(|&i| &self.results[i])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn page_number_sequence(&self) -> Vec<PageItem> {
        self.window.sequence(self.page, self.total_pages())
    }

    /// 1-based `(first, last, total)` for a "Showing X to Y of Z" label.
    pub fn showing_range(&self) -> Option<(usize, usize, usize)> {
        self.page_bounds()
            .map(|(start, end)| (start + 1, end, self.filtered.len()))
    }

    fn page_bounds(&self) -> Option<(usize, usize)> {
        let size = self.page_size.get();
        let start = (self.page - 1) * size;
        if start >= self.filtered.len() {
            return None;
        }
        let end = (start + size).min(self.filtered.len());
        Some((start, end))
    }

    fn refilter(&mut self) {
        self.filtered = self
            .results
            .iter()
            .enumerate()
            .filter(|(_, job)| self.filter.matches(job))
            .map(|(i, _)| i)
            .collect();
    }
}
