//! Turns a located `<table>` snapshot into a [`LapTable`].

use crate::browser::ElementSnapshot;
use crate::error::ParseError;
use crate::model::LapTable;
use scraper::{ElementRef, Html, Selector};

/// Creates a CSS selector from a string, converting parse failures into [`ParseError`].
pub fn html_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}

fn cell_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct TableExtractor;

impl TableExtractor {
    /// Reads header labels and body rows in document order.
    ///
    /// Rows without any `<td>` are dropped. Rows shorter than the header (a `colspan`
    /// summary row, say) are kept as they are. Returns `Ok(None)` when no row with data
    /// remains.
    ///
    /// # Errors
    ///
    /// [`ParseError::RowWidth`] when the widest row does not have exactly one cell per
    /// header; such a table cannot be labelled.
    pub fn extract(table: &ElementSnapshot) -> Result<Option<LapTable>, ParseError> {
        let fragment = Html::parse_fragment(&table.outer_html);
        let header_selector = html_selector("th")?;
        let row_selector = html_selector("tbody tr")?;
        let cell_selector = html_selector("td")?;

        let headers: Vec<String> = fragment.select(&header_selector).map(cell_text).collect();

        let mut rows = Vec::new();
        for row in fragment.select(&row_selector) {
            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            if cells.is_empty() {
                continue;
            }
            rows.push(cells);
        }

        let Some(width) = rows.iter().map(Vec::len).max() else {
            return Ok(None);
        };
        if width != headers.len() {
            return Err(ParseError::RowWidth {
                expected: headers.len(),
                found: width,
            });
        }
        Ok(Some(LapTable { headers, rows }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::html::table;

    fn snapshot(html: String) -> ElementSnapshot {
        ElementSnapshot {
            outer_html: html,
            ..Default::default()
        }
    }

    mod succeeds {
        use super::*;

        #[test]
        fn drops_rows_without_cells() {
            let html = r#"<table>
                <thead><tr><th>A</th><th>B</th></tr></thead>
                <tbody>
                    <tr><td>a</td><td>b</td></tr>
                    <tr></tr>
                    <tr><td>c</td><td>d</td></tr>
                </tbody>
            </table>"#;

            let table = TableExtractor::extract(&snapshot(html.to_string())).unwrap().unwrap();

            assert_eq!(table.headers, vec!["A", "B"]);
            assert_eq!(table.rows, vec![vec!["a", "b"], vec!["c", "d"]]);
        }

        #[test]
        fn header_only_rows_in_body_are_skipped() {
            let html = r#"<table><tbody>
                <tr><th>Volta</th><th>Tempo</th></tr>
                <tr><td>1</td><td>1:02</td></tr>
            </tbody></table>"#;

            let table = TableExtractor::extract(&snapshot(html.to_string())).unwrap().unwrap();

            assert_eq!(table.headers, vec!["Volta", "Tempo"]);
            assert_eq!(table.rows, vec![vec!["1", "1:02"]]);
        }

        #[test]
        fn normalizes_cell_whitespace() {
            let html = table(
                r#"id="efforts-table""#,
                &["Tempo"],
                &[&["\n   1:02\n  <span>min</span> "]],
            );

            let table = TableExtractor::extract(&snapshot(html)).unwrap().unwrap();

            assert_eq!(table.rows, vec![vec!["1:02 min"]]);
        }

        #[test]
        fn keeps_rows_shorter_than_header() {
            let html = r#"<table id="efforts-table">
                <thead><tr><th>Volta</th><th>Tempo</th></tr></thead>
                <tbody>
                    <tr><td>1</td><td>1:02</td></tr>
                    <tr><td colspan="2">Total</td></tr>
                </tbody>
            </table>"#;

            let table = TableExtractor::extract(&snapshot(html.to_string())).unwrap().unwrap();

            assert_eq!(table.headers, vec!["Volta", "Tempo"]);
            assert_eq!(table.rows, vec![vec!["1", "1:02"], vec!["Total"]]);
        }

        #[test]
        fn table_without_data_rows_is_empty() {
            let html = table(r#"class="table dense""#, &["A"], &[]);

            assert_eq!(TableExtractor::extract(&snapshot(html)).unwrap(), None);
        }
    }

    mod fails {
        use super::*;

        #[test]
        fn row_width_mismatch() {
            let html = table("", &["A", "B"], &[&["only one"]]);

            let err = TableExtractor::extract(&snapshot(html)).unwrap_err();

            assert!(matches!(err, ParseError::RowWidth { expected: 2, found: 1 }));
        }

        #[test]
        fn row_wider_than_header() {
            let html = table("", &["A", "B"], &[&["1", "2"], &["1", "2", "3"]]);

            let err = TableExtractor::extract(&snapshot(html)).unwrap_err();

            assert!(matches!(err, ParseError::RowWidth { expected: 2, found: 3 }));
        }

        #[test]
        fn invalid_selector() {
            assert!(matches!(
                html_selector("td["),
                Err(ParseError::InvalidSelector { .. })
            ));
        }
    }
}
