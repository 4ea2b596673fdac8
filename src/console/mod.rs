//! Client-side console engine: API client, foreign-key options, form/grid models and the per-table view.

pub mod api;
pub mod fk;
pub mod form;
#[cfg(test)]
pub(crate) mod testing;
pub mod view;

pub use api::{ConsoleApi, ConsoleError, HttpConsoleApi};
pub use fk::{build_label, lookup_label, ForeignKeyResolver, OptionEntry, OptionSets, OPTION_FETCH_LIMIT};
pub use form::{display_cell, form_fields, grid, select_label, Control, Draft, FormField, Grid};
pub use view::{LoadTicket, Resume, TableView, ViewState, INITIAL_PAGE_SIZE};
