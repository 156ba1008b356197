//! Terminal rendering for grid pages, via tabled.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::grid::GridState;
use crate::grid::columns::display_value;

/// Render the grid's current rows as a table string.
pub fn render_table(grid: &GridState) -> String {
    let mut builder = Builder::default();
    builder.push_record(grid.columns().iter().map(|c| c.header.clone()));
    for row in grid.rows() {
        builder.push_record(
            grid.columns()
                .iter()
                .map(|column| display_value(row, column)),
        );
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// One-line footer: pagination summary plus the non-blocking error
/// indicator when the latest fetch failed.
pub fn render_footer(grid: &GridState) -> String {
    let mut parts = Vec::new();
    if let Some(p) = grid.pagination() {
        parts.push(format!(
            "page {}/{} ({} total)",
            p.page,
            p.total_pages.max(1),
            p.total
        ));
    }
    if let Some(err) = grid.error() {
        parts.push(format!("{} {}", "!".red(), err));
    }
    parts.join("  ")
}
