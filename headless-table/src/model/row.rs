//! Rows and row identity

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use super::Record;
use super::Value;

/// Field lookup over opaque row data.
///
/// Default column accessors read a row through this trait. Implementations
/// return [`Value::Null`] for fields they don't have.
pub trait RowData {
    /// Returns the value stored under `field`.
    fn field(&self, field: &str) -> Value;
}

impl RowData for Record {
    fn field(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl RowData for serde_json::Value {
    fn field(&self, field: &str) -> Value {
        self.get(field).map(Value::from).unwrap_or_default()
    }
}

impl RowData for serde_json::Map<String, serde_json::Value> {
    fn field(&self, field: &str) -> Value {
        self.get(field).map(Value::from).unwrap_or_default()
    }
}

impl RowData for HashMap<String, Value> {
    fn field(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl RowData for BTreeMap<String, Value> {
    fn field(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl<T: RowData + ?Sized> RowData for Arc<T> {
    fn field(&self, field: &str) -> Value {
        (**self).field(field)
    }
}

/// A row of the table: the caller's data plus its stable identity.
///
/// `selected` is written by the projection from the selection set; it never
/// touches `data`.
pub struct Row<R> {
    pub id: String,
    pub data: Arc<R>,
    pub selected: bool,
}

impl<R> Row<R> {
    pub fn new(id: impl Into<String>, data: impl Into<Arc<R>>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            selected: false,
        }
    }
}

impl<R> Clone for Row<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            data: Arc::clone(&self.data),
            selected: self.selected,
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Row<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("data", &self.data)
            .field("selected", &self.selected)
            .finish()
    }
}

impl<R: PartialEq> PartialEq for Row<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.data == other.data && self.selected == other.selected
    }
}

/// Generates the id of a row from its data. Called once per row when rows are
/// (re)derived.
pub type IdFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// The default id generator: a random UUID v4 per call.
pub fn random_id<R>() -> IdFn<R> {
    Arc::new(|_| Uuid::new_v4().to_string())
}

/// An id generator reading a field of the row data as text.
///
/// Rows without the field fall back to a random UUID.
pub fn field_id<R: RowData + 'static>(
    field: impl Into<String>,
) -> impl Fn(&R) -> String + Send + Sync + 'static {
    let field = field.into();
    move |data: &R| {
        data.field(&field)
            .to_text()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// Wraps raw row data into rows, assigning ids in input order.
pub fn assign_ids<R>(raw: &[Arc<R>], id_fn: &IdFn<R>) -> Vec<Row<R>> {
    raw.iter()
        .map(|data| Row {
            id: id_fn(data),
            data: Arc::clone(data),
            selected: false,
        })
        .collect()
}
