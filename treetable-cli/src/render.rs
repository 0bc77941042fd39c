//! Plain-text table rendering.

use treetable_lib::columns::FixedColumn;
use treetable_view::VisibleRow;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";
const GAP: &str = "  ";

/// Renders a header line followed by one line per row.
///
/// The first column is the tree column; selected rows are prefixed with `>`.
pub fn render_table(columns: &[FixedColumn], rows: &[VisibleRow]) -> String {
    let header: Vec<String> = columns.iter().map(|c| c.title.clone()).collect();
    let body: Vec<Vec<String>> = rows.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, "  ", &header, &widths);
    for (row, cells) in rows.iter().zip(&body) {
        let marker = if row.is_selected { "> " } else { "  " };
        push_line(&mut out, marker, cells, &widths);
    }
    out
}

fn row_cells(row: &VisibleRow) -> Vec<String> {
    let marker = match (row.has_children, row.is_expanded) {
        (false, _) => "  ",
        (true, true) => "▼ ",
        (true, false) => "▶ ",
    };
    let mut cells = vec![format!("{}{}{}", INDENT.repeat(row.depth), marker, row.main)];
    cells.extend(row.cells.iter().map(ToString::to_string));
    cells
}

fn push_line(out: &mut String, prefix: &str, cells: &[String], widths: &[usize]) {
    let mut line = String::from(prefix);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
