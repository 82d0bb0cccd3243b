//! Client-side list handling for the console views: search, status filter,
//! sort, paging, and the debounce that sits in front of the search box.

pub mod debounce;
pub mod filter;
pub mod pager;
pub mod records;
pub mod state;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::{
    Categorized, ListQuery, Searchable, SortOrder, SortValue, Sortable, StatusFilter, filter_sort,
};
pub use pager::{PageItem, Pager, paginate};
pub use state::{FilterAction, FilterState};
