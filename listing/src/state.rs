use crate::filter::{ListQuery, SortOrder, StatusFilter};
use crate::pager::Pager;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// User-driven changes to a list view.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterAction<K, S> {
    /// Raw search input changed. Does not refilter until [`FilterAction::SearchSettled`].
    SetSearch(String),
    /// The debounced search query settled on a value.
    SearchSettled(String),
    SetStatus(StatusFilter<S>),
    SetSort(K),
    ToggleOrder,
    SetPage(usize),
    SetPageSize(usize),
    Reset,
}

/// Filter, sort and paging state of one list view.
///
/// Immutable: every change goes through [`FilterState::reduce`], which returns
/// the next state.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState<K, S> {
    pub search_query: String,
    pub debounced_search_query: String,
    pub status: StatusFilter<S>,
    pub sort_by: K,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    default_sort: (K, SortOrder),
}

impl<K: Copy, S> FilterState<K, S> {
    pub fn new(sort_by: K, sort_order: SortOrder) -> Self {
        FilterState {
            search_query: String::new(),
            debounced_search_query: String::new(),
            status: StatusFilter::All,
            sort_by,
            sort_order,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: (sort_by, sort_order),
        }
    }

    pub fn reduce(self, action: FilterAction<K, S>) -> Self {
        match action {
            FilterAction::SetSearch(search_query) => Self {
                search_query,
                ..self
            },
            FilterAction::SearchSettled(query) => Self {
                debounced_search_query: query,
                page: 1,
                ..self
            },
            FilterAction::SetStatus(status) => Self {
                status,
                page: 1,
                ..self
            },
            FilterAction::SetSort(sort_by) => Self { sort_by, ..self },
            FilterAction::ToggleOrder => Self {
                sort_order: self.sort_order.toggled(),
                ..self
            },
            FilterAction::SetPage(page) => Self {
                page: page.max(1),
                ..self
            },
            FilterAction::SetPageSize(page_size) => Self {
                page_size: page_size.max(1),
                page: 1,
                ..self
            },
            FilterAction::Reset => {
                let (sort_by, sort_order) = self.default_sort;
                Self::new(sort_by, sort_order)
            }
        }
    }

    /// Query built from the settled search, never the raw input.
    pub fn query(&self) -> ListQuery<K, S>
    where
        S: Clone,
    {
        ListQuery {
            search: self.debounced_search_query.clone(),
            status: self.status.clone(),
            sort_by: self.sort_by,
            order: self.sort_order,
        }
    }

    pub fn pager(&self, total: usize) -> Pager {
        Pager::new(self.page, self.page_size, total)
    }

    pub fn is_filtered(&self) -> bool
    where
        S: PartialEq,
    {
        !self.debounced_search_query.trim().is_empty() || self.status != StatusFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Key {
        Name,
        Created,
    }

    type State = FilterState<Key, &'static str>;

    #[test]
    fn test_search_settles_separately() {
        let state = State::new(Key::Name, SortOrder::Asc)
            .reduce(FilterAction::SetPage(3))
            .reduce(FilterAction::SetSearch("pay".into()));
        assert_eq!(state.search_query, "pay");
        assert_eq!(state.query().search, "");
        assert_eq!(state.page, 3);

        let state = state.reduce(FilterAction::SearchSettled("pay".into()));
        assert_eq!(state.query().search, "pay");
        assert_eq!(state.page, 1);
        assert!(state.is_filtered());
    }

    #[test]
    fn test_sort_and_status() {
        let state = State::new(Key::Name, SortOrder::Asc)
            .reduce(FilterAction::SetSort(Key::Created))
            .reduce(FilterAction::ToggleOrder)
            .reduce(FilterAction::SetPage(2))
            .reduce(FilterAction::SetStatus(StatusFilter::Only("active")));

        let query = state.query();
        assert_eq!(query.sort_by, Key::Created);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.status, StatusFilter::Only("active"));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_size_resets_page() {
        let state = State::new(Key::Name, SortOrder::Asc)
            .reduce(FilterAction::SetPage(4))
            .reduce(FilterAction::SetPageSize(50));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 50);

        let state = state.reduce(FilterAction::SetPage(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let initial = State::new(Key::Created, SortOrder::Desc);
        let state = initial
            .clone()
            .reduce(FilterAction::SetSearch("x".into()))
            .reduce(FilterAction::SearchSettled("x".into()))
            .reduce(FilterAction::SetSort(Key::Name))
            .reduce(FilterAction::ToggleOrder)
            .reduce(FilterAction::SetPageSize(5))
            .reduce(FilterAction::Reset);
        assert_eq!(state, initial);
        assert!(!state.is_filtered());
    }
}
