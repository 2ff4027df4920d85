//! Moon log journal tools.

pub mod add;
pub mod delete;
pub mod list;

pub use add::{JournalAddParams, add_impl};
pub use delete::{JournalDeleteParams, delete_impl};
pub use list::{JournalListParams, list_impl};
