//! Plain-text rendering for terminal output.

use importer::{ImportOutcome, ParseReport};
use listing::Pager;
use std::fmt;

pub const MASK: &str = "********";

pub fn display_value(value: &str, sensitive: bool, reveal: bool) -> &str {
    if sensitive && !reveal { MASK } else { value }
}

/// Left-aligned columns separated by two spaces, sized to the widest cell.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

fn write_row<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_row(f, self.headers.iter().copied(), &widths)?;
        for row in &self.rows {
            write_row(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

/// One line per parsed record, then the `Line N: reason` list.
pub fn render_report(report: &ParseReport) -> String {
    let mut table = Table::new(vec!["LINE", "KEY", "VALUE", "STATUS"]);
    for variable in &report.variables {
        let status = match &variable.error {
            None if variable.sensitive => "ok (sensitive)".to_string(),
            None => "ok".to_string(),
            Some(e) => e.to_string(),
        };
        table.push(vec![
            variable.line.to_string(),
            variable.key.clone(),
            display_value(&variable.value, variable.sensitive, false).to_string(),
            status,
        ]);
    }

    let mut out = String::new();
    if !table.is_empty() {
        out.push_str(&table.to_string());
        out.push('\n');
    }
    for error in &report.errors {
        out.push_str(error);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} valid, {} invalid\n",
        report.valid_count(),
        report.invalid_count()
    ));
    out
}

pub fn render_outcome(outcome: &ImportOutcome) -> String {
    let mut out = format!("Import finished: {outcome}\n");
    for failure in &outcome.failed {
        out.push_str(&format!("  {}: {}\n", failure.key, failure.reason));
    }
    out
}

/// `Page 6 of 10 (197 total)  1 … 4 5 6 7 8 … 10`
pub fn render_pager(pager: &Pager) -> String {
    let items = pager
        .items()
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Page {} of {} ({} total)  {}",
        pager.page(),
        pager.page_count(),
        pager.total(),
        items
    )
}
