//! One view model per tab.
//!
//! Each module turns decoded REST payloads
//! into what its panel renders and wraps
//! the calls behind it. Failures carry the
//! message the user sees; the UI decides
//! where to show it.

pub mod dashboard;
pub mod gantt;
pub mod header;
pub mod ml;
pub mod notes;
pub mod panels;
pub mod projects;
pub mod reports;
pub mod tasks;

/// A list panel: either rows, or the
/// message shown when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
  Empty(&'static str),
  Items(Vec<T>)
}

impl<T> Listing<T> {
  pub fn from_items(
    items: Vec<T>,
    empty: &'static str
  ) -> Self {
    if items.is_empty() {
      Listing::Empty(empty)
    } else {
      Listing::Items(items)
    }
  }

  pub fn items(&self) -> &[T] {
    match self {
      | Listing::Empty(_) => &[],
      | Listing::Items(items) => items
    }
  }

  pub fn empty_message(
    &self
  ) -> Option<&'static str> {
    match self {
      | Listing::Empty(message) => {
        Some(*message)
      }
      | Listing::Items(_) => None
    }
  }

  pub fn map<U>(
    self,
    f: impl FnMut(T) -> U
  ) -> Listing<U> {
    match self {
      | Listing::Empty(message) => {
        Listing::Empty(message)
      }
      | Listing::Items(items) => {
        Listing::Items(
          items.into_iter().map(f).collect()
        )
      }
    }
  }
}
