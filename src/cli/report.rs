//! Rendering module reports.
//!
//! Separate from the core so that the engine can be used as a library.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::{Color, ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use super::args::OutputMode;
use crate::core::data::ModuleReport;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print `reports` to stdout in the requested mode.
pub fn print(source: &Path, reports: &[ModuleReport], output: OutputMode) -> Result<()> {
    print_to(source, reports, output, &mut io::stdout().lock())
}

pub fn print_to<W: Write>(
    source: &Path,
    reports: &[ModuleReport],
    output: OutputMode,
    writer: &mut W,
) -> Result<()> {
    let rendered = match output {
        OutputMode::Summary => render_summary(source, reports),
        OutputMode::Text => render_text(source, reports),
        OutputMode::Json => render_json(reports)?,
        OutputMode::Silent => return Ok(()),
    };
    write!(writer, "{}", rendered).context("Failed to write report")?;
    Ok(())
}

/// Print the files that could not be parsed to stderr.
pub fn print_skipped(reports: &[ModuleReport], verbose: bool) {
    print_skipped_to(reports, verbose, &mut io::stderr().lock());
}

pub fn print_skipped_to<W: Write>(reports: &[ModuleReport], verbose: bool, writer: &mut W) {
    let skipped: Vec<_> = reports.iter().flat_map(|r| r.skipped.iter()).collect();
    if skipped.is_empty() {
        return;
    }
    if verbose {
        for file in &skipped {
            let _ = writeln!(
                writer,
                "{} could not parse {}: {}",
                "warning:".bold().yellow(),
                file.file_path,
                file.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            skipped.len(),
            "-v".cyan()
        );
    }
}

/// `./<path relative to source>`, with `/` separators.
pub fn display_path(source: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    if relative.starts_with('/') || relative.starts_with("./") {
        relative
    } else {
        format!("./{}", relative)
    }
}

struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    fn plain(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            color: None,
        }
    }

    fn colored(text: impl ToString, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color: Some(color),
        }
    }

    fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }

    fn paint(&self) -> ColoredString {
        match self.color {
            Some(color) => self.text.as_str().color(color),
            None => self.text.as_str().normal(),
        }
    }
}

fn border(widths: &[usize], left: &str, middle: &str, right: &str) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(middle), right)
}

fn row(cells: &[Cell], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width - cell.width();
        line.push_str(&format!(" {}{} │", cell.paint(), " ".repeat(padding)));
    }
    line.push('\n');
    line
}

fn render_table(header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(&header[i]))
                .map(Cell::width)
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut table = border(&widths, "┌", "┬", "┐");
    table.push_str(&row(&header, &widths));
    table.push_str(&border(&widths, "├", "┼", "┤"));
    for cells in &rows {
        table.push_str(&row(cells, &widths));
    }
    table.push_str(&border(&widths, "└", "┴", "┘"));
    table
}

fn status_color(bad: bool) -> Color {
    if bad { Color::Red } else { Color::Green }
}

fn render_summary(source: &Path, reports: &[ModuleReport]) -> String {
    let header = ["Module", "Used", "Missings", "Results"]
        .map(|title| Cell::colored(title, Color::Yellow))
        .into_iter()
        .collect();

    let rows = reports
        .iter()
        .map(|report| {
            let used = report.used.len();
            let missing = report.missing.len();
            let compatible = report.compatible.len();
            vec![
                Cell::plain(display_path(source, &report.path)),
                Cell::plain(used),
                Cell::colored(missing, status_color(missing > 0)),
                Cell::colored(compatible, status_color(compatible == 0 && used > 0)),
            ]
        })
        .collect();

    let mut output = render_table(header, rows);

    for report in reports {
        if let Some(file) = &report.translation_file {
            output.push_str(&format!(
                "{} Wrote {} ({} keys)\n",
                SUCCESS_MARK.green(),
                display_path(source, file),
                report.compatible.len()
            ));
        }
    }

    let missing: usize = reports.iter().map(|r| r.missing.len()).sum();
    let line = if missing == 0 {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No missing keys in {} module(s)", reports.len()).green()
        )
    } else {
        let modules = reports.iter().filter(|r| !r.missing.is_empty()).count();
        format!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} missing key(s) in {} module(s)", missing, modules).red()
        )
    };
    output.push_str(&line);
    output.push('\n');
    output
}

fn render_text(source: &Path, reports: &[ModuleReport]) -> String {
    let mut output = String::new();
    for report in reports {
        output.push_str(&format!(
            "{}\n",
            display_path(source, &report.path).bold().yellow()
        ));

        output.push_str("  used:\n");
        for key in &report.used {
            let painted = if report.missing.contains(key) {
                key.as_str().red()
            } else if report.compatible.contains_key(key.as_str()) {
                key.as_str().green()
            } else {
                key.as_str().blue().italic()
            };
            output.push_str(&format!("    {}\n", painted));
        }

        output.push_str("  missing:\n");
        for key in &report.missing {
            output.push_str(&format!("    {}\n", key));
        }

        output.push_str("  compatible:\n");
        for (key, value) in &report.compatible {
            output.push_str(&format!(
                "    {}: \"{}\"\n",
                key.as_str().green(),
                value.as_str().cyan().italic()
            ));
        }
    }
    output
}

fn render_json(reports: &[ModuleReport]) -> Result<String> {
    let json = serde_json::to_string_pretty(reports).context("Failed to serialize report")?;
    Ok(format!("{}\n", json))
}
