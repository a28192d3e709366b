use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row};

use super::column::{Column, Record};
use crate::Theme;

/// Glyph drawn in every row's action cell.
pub const ACTION_GLYPH: &str = "⋮";

/// Width of the trailing action column.
pub const ACTION_WIDTH: u16 = 3;

/// Projects one record into its display cells, one per column.
pub fn render_row<T: Record>(row: &T, columns: &[Column<T>]) -> Vec<Line<'static>> {
    columns.iter().map(|column| column.cell(row)).collect()
}

/// Body row: the record's cells followed by the action cell.
pub(super) fn body_row<T: Record>(
    row: &T,
    columns: &[Column<T>],
    menu_open: bool,
    theme: &Theme,
) -> Row<'static> {
    let mut cells: Vec<Cell<'static>> = render_row(row, columns)
        .into_iter()
        .zip(columns)
        .map(|(mut line, column)| {
            if line.alignment.is_none() {
                line.alignment = Some(column.alignment().unwrap_or(Alignment::Left));
            }
            Cell::from(line)
        })
        .collect();

    let glyph_style = if menu_open {
        Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.overlay1())
    };
    cells.push(Cell::from(Line::from(ACTION_GLYPH).alignment(Alignment::Center)).style(glyph_style));

    Row::new(cells).style(Style::default().fg(theme.text()))
}

/// Header row built from the column labels, plus an empty action header.
pub(super) fn header_row<T>(columns: &[Column<T>], theme: &Theme) -> Row<'static> {
    let mut cells: Vec<Cell<'static>> = columns
        .iter()
        .map(|column| {
            Cell::from(
                Line::from(column.label().to_uppercase())
                    .alignment(column.alignment().unwrap_or(Alignment::Center)),
            )
        })
        .collect();
    cells.push(Cell::from(""));

    Row::new(cells).height(1).style(
        Style::default()
            .fg(theme.header())
            .bg(theme.surface0())
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<Column<serde_json::Value>> {
        vec![
            Column::new("status", "Room Status"),
            Column::new("totalPrice", "Total Price").render(|row: &serde_json::Value| {
                row["totalPrice"]
                    .as_f64()
                    .map_or_else(|| "-".to_string(), |price| format!("${price:.2}"))
            }),
        ]
    }

    #[test]
    fn test_render_row_projects_every_column() {
        let row = json!({ "status": "pending", "totalPrice": 350.0 });

        assert_eq!(
            render_row(&row, &columns()),
            vec![Line::from("pending"), Line::from("$350.00")]
        );
    }

    #[test]
    fn test_render_row_does_not_touch_unrequested_fields() {
        let row = json!({ "status": "completed", "totalPrice": 1, "secret": "x" });
        let cells = render_row(&row, &columns());

        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|line| line.to_string() != "x"));
    }
}
