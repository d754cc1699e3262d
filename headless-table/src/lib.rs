//! Headless table engine
//!
//! An in-memory table that turns row data and column descriptors into a
//! searchable, filterable, sortable, selectable and paginated projection.
//! Rendering is left to the host.
//!
//! ```
//! use headless_table::column::Column;
//! use headless_table::model::Record;
//! use headless_table::{Options, Table};
//!
//! let rows = (1..=12).map(|n| Record::new().set("n", n));
//! let mut table = Table::new(Options::default(), vec![Column::number("n")], rows);
//!
//! table.last_page();
//! let page = table.page();
//! assert_eq!(page.current_page, 3);
//! assert_eq!(page.page_rows.len(), 2);
//! ```

pub mod column;
pub mod deferred;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod model;
pub mod options;
pub mod pagination;
pub mod search;
pub mod selection;
pub mod sort;
pub mod state;
pub mod stringify;

mod table;

pub use error::Error;
pub use error::Result;
pub use options::Options;
pub use options::OptionsPatch;
pub use state::State;
pub use table::*;
