//! Custom widgets for the browser

pub mod chrome;
pub mod detail_view;
pub mod entry_list;

pub use chrome::{BoxHeader, Separator, StatusLine};
pub use detail_view::DetailView;
pub use entry_list::EntryList;
