//! Column specifications and dot-path row access.

use serde_json::Value;

/// Which filter control a column header carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    None,
    Text,
    Number,
    Date,
    Dropdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pinned {
    #[default]
    None,
    Left,
    Right,
}

/// One grid column. Immutable once constructed; a grid rebuilds its column
/// list only when the owning page swaps callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Dot-path into the row record, e.g. `jenjang_studi.code`.
    pub field: String,
    pub header: String,
    pub width: u16,
    pub sortable: bool,
    pub filter: FilterKind,
    pub pinned: Pinned,
}

impl ColumnSpec {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        ColumnSpec {
            field: field.into(),
            header: header.into(),
            width: 120,
            sortable: false,
            filter: FilterKind::None,
            pinned: Pinned::None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = kind;
        self
    }

    pub fn pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }
}

/// Resolve a dot-path into a row record.
///
/// Missing segments resolve to `None` rather than erroring: rows are
/// schemaless and a column may predate the backend field it displays.
pub fn field_value<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Cell text for display: scalars render bare (no JSON quoting), missing
/// values render empty.
pub fn display_value(row: &Value, column: &ColumnSpec) -> String {
    match field_value(row, &column.field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> Value {
        json!({
            "id": 42,
            "title": "Matematika Kelas 4",
            "price": 45000,
            "jenjang_studi": {"code": "SD", "name": "Sekolah Dasar"},
            "penerbit": {"name": "Erlangga"},
            "active": true,
            "deleted_at": null
        })
    }

    #[test]
    fn test_field_value_flat() {
        assert_eq!(field_value(&row(), "title").unwrap(), "Matematika Kelas 4");
    }

    #[test]
    fn test_field_value_nested() {
        assert_eq!(field_value(&row(), "jenjang_studi.code").unwrap(), "SD");
        assert_eq!(field_value(&row(), "penerbit.name").unwrap(), "Erlangga");
    }

    #[test]
    fn test_field_value_missing() {
        assert!(field_value(&row(), "missing").is_none());
        assert!(field_value(&row(), "jenjang_studi.missing").is_none());
        assert!(field_value(&row(), "title.nested").is_none());
    }

    #[test]
    fn test_display_value() {
        let r = row();
        let title = ColumnSpec::new("title", "Title");
        assert_eq!(display_value(&r, &title), "Matematika Kelas 4");

        let price = ColumnSpec::new("price", "Price");
        assert_eq!(display_value(&r, &price), "45000");

        let active = ColumnSpec::new("active", "Active");
        assert_eq!(display_value(&r, &active), "true");

        let gone = ColumnSpec::new("deleted_at", "Deleted");
        assert_eq!(display_value(&r, &gone), "");

        let missing = ColumnSpec::new("nope", "Nope");
        assert_eq!(display_value(&r, &missing), "");
    }

    #[test]
    fn test_builder() {
        let col = ColumnSpec::new("price", "Price")
            .width(80)
            .sortable()
            .filter(FilterKind::Number)
            .pinned(Pinned::Right);
        assert_eq!(col.width, 80);
        assert!(col.sortable);
        assert_eq!(col.filter, FilterKind::Number);
        assert_eq!(col.pinned, Pinned::Right);
    }
}
