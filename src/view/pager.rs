use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rows per page, restricted to the sizes the page-size picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("page size must be one of 5, 10, 25, 50, 100 (got {value})"))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|e| format!("invalid page size {s:?}: {e}"))?;
        PageSize::try_from(n)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// How page numbers are windowed once there are too many to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageWindow {
    /// Up to 7 entries: first, last, and the current page with one neighbour
    /// on each side; an ellipsis marks every gap.
    #[default]
    Standard,
    /// Up to 5 page numbers: the first four or last four when the current page
    /// is near an edge, otherwise first, current ±1 and last.
    Compact,
}

impl PageWindow {
    fn max_listed(self) -> usize {
        match self {
            PageWindow::Standard => 7,
            PageWindow::Compact => 5,
        }
    }

    /// Labels for a pagination control. `current` is clamped to
    /// `[1, total_pages]`; zero pages yields an empty sequence.
    pub fn sequence(self, current: usize, total_pages: usize) -> Vec<PageItem> {
        if total_pages == 0 {
            return Vec::new();
        }
        if total_pages <= self.max_listed() {
            return (1..=total_pages).map(PageItem::Page).collect();
        }

        let current = current.clamp(1, total_pages);
        let pages: Vec<usize> = match self {
            PageWindow::Standard => {
                let mut pages = vec![1, total_pages];
                pages.extend(current.saturating_sub(1).max(1)..=(current + 1).min(total_pages));
                pages.sort_unstable();
                pages.dedup();
                pages
            }
            PageWindow::Compact => {
                if current <= 3 {
                    (1..=4).chain([total_pages]).collect()
                } else if current >= total_pages - 2 {
                    [1].into_iter().chain(total_pages - 3..=total_pages).collect()
                } else {
                    vec![1, current - 1, current, current + 1, total_pages]
                }
            }
        };

        with_gaps(&pages)
    }
}

impl FromStr for PageWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "7" => Ok(PageWindow::Standard),
            "compact" | "5" => Ok(PageWindow::Compact),
            other => Err(format!("unknown page window {other:?} (expected standard or compact)")),
        }
    }
}

/// Turns sorted page numbers into items, inserting an ellipsis at each gap.
fn with_gaps(pages: &[usize]) -> Vec<PageItem> {
    let mut items = Vec::with_capacity(pages.len() * 2);
    let mut previous: Option<usize> = None;
    for &page in pages {
        if previous.is_some_and(|prev| page > prev + 1) {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

/// Number of pages needed for `count` rows.
pub fn page_count(count: usize, size: PageSize) -> usize {
    count.div_ceil(size.get())
}
