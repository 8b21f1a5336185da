//! Help Table
//!
//! Renders the full outcome grid as a bordered ASCII table. Rows are the
//! mover whose result is shown; columns are the opposing move.

use crate::game::rules::RuleTable;

/// Label of the top-left header cell.
pub const CORNER_LABEL: &str = "v Move \\ Opponent >";

/// Render the outcome table for `rules`.
///
/// ```text
/// +---------------------+------+-------+----------+
/// | v Move \ Opponent > | rock | paper | scissors |
/// +---------------------+------+-------+----------+
/// | rock                | Draw | Lose  | Win      |
/// ...
/// ```
pub fn render_table(rules: &RuleTable) -> String {
    let moves = rules.moves();
    let grid = rules.outcome_grid();

    let mut header: Vec<&str> = vec![CORNER_LABEL];
    header.extend(moves.iter());

    let rows: Vec<Vec<&str>> = moves
        .iter()
        .zip(&grid)
        .map(|(name, cells)| {
            let mut row = vec![name];
            row.extend(cells.iter().map(|o| o.as_str()));
            row
        })
        .collect();

    // Column width = widest cell in that column (header included).
    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format_row(header.as_slice()));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row.as_slice()));
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');
    out
}
