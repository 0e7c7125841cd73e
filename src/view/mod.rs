//! Client-side view of a search: filtering and pagination over the last
//! result set the backend returned.

pub mod filter;
pub mod pager;
pub mod state;

pub use filter::FilterCriteria;
pub use pager::{PageItem, PageSize, PageWindow};
pub use state::ViewState;
