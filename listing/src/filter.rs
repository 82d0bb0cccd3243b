//! Search, status filter and sort over already fetched records.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Categorical filter. `All` lets every record through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, value: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == value,
        }
    }
}

/// Value a record exposes for one sort key.
#[derive(Clone, Debug, PartialEq)]
pub enum SortValue<'a> {
    /// Compared case-insensitively
    Text(&'a str),
    Time(DateTime<Utc>),
    Number(i64),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Text(_) => 0,
            SortValue::Time(_) => 1,
            SortValue::Number(_) => 2,
        }
    }
}

pub trait Searchable {
    /// Fields the search query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

pub trait Sortable {
    type Key: Copy;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_>;
}

pub trait Categorized {
    type Category: PartialEq;

    fn category(&self) -> Self::Category;
}

/// Inputs of one filter/sort pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery<K, S> {
    pub search: String,
    pub status: StatusFilter<S>,
    pub sort_by: K,
    pub order: SortOrder,
}

impl<K, S> ListQuery<K, S> {
    pub fn new(sort_by: K) -> Self {
        ListQuery {
            search: String::new(),
            status: StatusFilter::All,
            sort_by,
            order: SortOrder::Asc,
        }
    }
}

/// Case-insensitive substring match against any of the record's search fields.
/// An empty or blank query matches everything.
pub fn matches_search<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Applies the search query, then the status filter, then the sort.
/// Records comparing equal keep no particular order.
pub fn filter_sort<'a, T>(records: &'a [T], query: &ListQuery<T::Key, T::Category>) -> Vec<&'a T>
where
    T: Searchable + Sortable + Categorized,
{
    let mut result: Vec<&T> = records
        .iter()
        .filter(|record| matches_search(*record, &query.search))
        .filter(|record| query.status.matches(&record.category()))
        .collect();

    result.sort_unstable_by(|a, b| {
        let ordering = a
            .sort_value(query.sort_by)
            .compare(&b.sort_value(query.sort_by));
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    result
}
