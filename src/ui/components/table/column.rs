use std::collections::{HashMap, HashSet};
use std::fmt;

use ratatui::layout::{Alignment, Constraint};
use ratatui::text::Line;

/// A record that can be shown as a table row.
///
/// Columns without a render function read the field named by their id
/// through this trait and show it verbatim. `None` leaves the cell empty.
pub trait Record {
    fn field(&self, id: &str) -> Option<String>;
}

impl Record for serde_json::Value {
    fn field(&self, id: &str) -> Option<String> {
        match self.get(id)? {
            Self::Null => None,
            Self::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl Record for HashMap<String, String> {
    fn field(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

type RenderFn<T> = Box<dyn Fn(&T) -> Line<'static> + Send + Sync>;

/// One column of a [`DataTable`](super::DataTable).
///
/// The type parameter ties the render function to the row type, so a column
/// written for bookings can only be used in a bookings table.
pub struct Column<T> {
    id: &'static str,
    label: &'static str,
    align: Option<Alignment>,
    width: Constraint,
    render: Option<RenderFn<T>>,
}

impl<T> Column<T> {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            align: None,
            width: Constraint::Fill(1),
            render: None,
        }
    }

    #[must_use]
    pub const fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub const fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// Display cells through `render` instead of the raw field.
    ///
    /// Render functions own their placeholders: a missing nested field should
    /// come back as `"-"` or similar, not as an empty cell.
    #[must_use]
    pub fn render<F, L>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> L + Send + Sync + 'static,
        L: Into<Line<'static>>,
    {
        self.render = Some(Box::new(move |row| render(row).into()));
        self
    }

    pub const fn id(&self) -> &'static str {
        self.id
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }

    pub const fn alignment(&self) -> Option<Alignment> {
        self.align
    }

    pub const fn constraint(&self) -> Constraint {
        self.width
    }

    pub const fn has_renderer(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: Record> Column<T> {
    /// Content of this column's cell for `row`.
    pub fn cell(&self, row: &T) -> Line<'static> {
        match &self.render {
            Some(render) => render(row),
            None => Line::from(row.field(self.id).unwrap_or_default()),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// First column id that appears more than once, if any.
pub fn duplicate_id<T>(columns: &[Column<T>]) -> Option<&'static str> {
    let mut seen = HashSet::new();
    columns.iter().map(Column::id).find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_field_is_shown_verbatim() {
        let column = Column::<serde_json::Value>::new("roomNumber", "Room Number");
        let row = json!({ "roomNumber": "A-101", "price": 120 });

        assert_eq!(column.cell(&row), Line::from("A-101"));
    }

    #[test]
    fn test_non_string_json_fields_use_json_text() {
        let column = Column::<serde_json::Value>::new("price", "Price");
        let row = json!({ "price": 120.5 });

        assert_eq!(column.cell(&row), Line::from("120.5"));
    }

    #[test]
    fn test_missing_field_is_empty() {
        let column = Column::<serde_json::Value>::new("discount", "Discount");
        let row = json!({ "discount": null });

        assert_eq!(column.cell(&row), Line::from(""));
        assert_eq!(column.cell(&json!({})), Line::from(""));
    }

    #[test]
    fn test_render_function_wins_over_field() {
        let column = Column::<serde_json::Value>::new("user", "User").render(|row| {
            row.pointer("/user/userName")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("-")
                .to_string()
        });

        assert!(column.has_renderer());
        assert_eq!(
            column.cell(&json!({ "user": { "userName": "nora" } })),
            Line::from("nora")
        );
        assert_eq!(column.cell(&json!({ "user": null })), Line::from("-"));
    }

    #[test]
    fn test_hash_map_record() {
        let column = Column::<HashMap<String, String>>::new("email", "Email");
        let row = HashMap::from([("email".to_string(), "a@b.c".to_string())]);

        assert_eq!(column.cell(&row), Line::from("a@b.c"));
    }

    #[test]
    fn test_duplicate_id() {
        let columns: Vec<Column<serde_json::Value>> = vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("name", "Full name"),
        ];
        assert_eq!(duplicate_id(&columns), Some("name"));
        assert_eq!(duplicate_id(&columns[..2]), None);
    }
}
