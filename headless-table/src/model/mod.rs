//! Row data model

mod record;
mod row;
mod value;

pub use record::Record;
pub use row::IdFn;
pub use row::Row;
pub use row::RowData;
pub use row::assign_ids;
pub use row::field_id;
pub use row::random_id;
pub use value::Value;
pub use value::parse_iso_datetime;
