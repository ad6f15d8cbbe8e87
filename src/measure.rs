use unicode_width::UnicodeWidthStr;

use crate::layout::anchors::{row_offset, table_height};
use crate::layout::types::{Point3, TablePlacement};

/// Label sizing for table faces, in diagram units.
pub struct TextMetrics {
    /// Advance of one narrow glyph at row label size.
    pub char_width: f64,
    /// Row text is inset this far from the table's left and right edges.
    pub inset_x: f64,
    pub table_width: f64,
    /// Title baseline distance below the table's top edge.
    pub title_drop: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 0.14,
            inset_x: 0.1,
            table_width: 5.0,
            title_drop: 0.6,
        }
    }
}

/// Text placed on a table, relative to the table origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point3,
}

/// Labels for one row: name on the left, type right-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabels {
    pub column: String,
    pub name: Label,
    pub typ: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLabels {
    pub title: Label,
    pub rows: Vec<RowLabels>,
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    fn left_edge(&self) -> f64 {
        -self.table_width / 2.0 + self.inset_x
    }

    fn right_edge(&self) -> f64 {
        self.table_width / 2.0 - self.inset_x
    }

    pub fn table_labels(&self, placement: &TablePlacement) -> TableLabels {
        let table = &placement.table;
        let size = table.columns.len();
        let left = self.left_edge();

        let title = Label {
            text: table.name.clone(),
            position: Point3::new(left, table_height(size) / 2.0 - self.title_drop, 0.0),
        };

        let rows = table
            .columns
            .iter()
            .enumerate()
            .map(|(j, column)| {
                let y = row_offset(size, j);
                let type_text = column.type_label();
                let type_x = self.right_edge() - self.text_width(&type_text);

                RowLabels {
                    column: column.name.clone(),
                    name: Label {
                        text: column.name.clone(),
                        position: Point3::new(left, y, 0.0),
                    },
                    typ: Label {
                        text: type_text,
                        position: Point3::new(type_x, y, 0.0),
                    },
                }
            })
            .collect();

        TableLabels { title, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parse_ddl;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert!(approx(m.text_width("INT"), 3.0 * 0.14));
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // Full-width characters take two cells.
        assert!(approx(m.text_width("名前"), 4.0 * 0.14));
    }

    #[test]
    fn test_table_labels() {
        let schema = parse_ddl("CREATE TABLE users (id INT, name VARCHAR(50) NOT NULL);");
        let placement = TablePlacement {
            table: schema.tables[0].clone(),
            position: Point3::new(10.0, 0.0, 0.0),
        };
        let m = TextMetrics::default();
        let labels = m.table_labels(&placement);

        assert_eq!(labels.title.text, "users");
        assert!(approx(labels.title.position.x, -2.4));
        assert!(approx(labels.title.position.y, table_height(2) / 2.0 - 0.6));

        assert_eq!(labels.rows.len(), 2);
        let name_row = &labels.rows[1];
        assert_eq!(name_row.column, "name");
        assert_eq!(name_row.typ.text, "VARCHAR(50)*");
        assert!(approx(name_row.name.position.y, row_offset(2, 1)));
        assert!(approx(
            name_row.typ.position.x + m.text_width("VARCHAR(50)*"),
            2.4
        ));
    }
}
