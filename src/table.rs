//! Column aligned quota table

use std::fmt;

use ansi_term::Colour::{Red, Yellow};
use ansi_term::Style;
use itertools::Itertools as _;

use crate::config::UsageConfig;
use crate::usage::{Severity, Usage};

const HEADERS: [&str; 4] = ["NAME", "USED", "HARD", "USAGE"];

/// Spaces added after the widest cell of each column
const COLUMN_PADDING: usize = 2;

/// One line of the table
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResourceRow {
    /// Resource name
    pub(crate) name: String,
    /// Formatted used value
    pub(crate) used: String,
    /// Formatted hard value
    pub(crate) hard: String,
    /// Used / hard ratio
    pub(crate) usage: Usage,
}

impl ResourceRow {
    fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.used.clone(),
            self.hard.clone(),
            self.usage.to_string(),
        ]
    }
}

/// Table of one quota object
pub(crate) struct Table<'a> {
    rows: &'a [ResourceRow],
    colors: Option<&'a UsageConfig>,
}

impl<'a> Table<'a> {
    /// Plain table
    pub(crate) fn new(rows: &'a [ResourceRow]) -> Self {
        Self { rows, colors: None }
    }

    /// Colorize the usage column according to thresholds
    pub(crate) fn with_colors(mut self, cfg: &'a UsageConfig) -> Self {
        self.colors = Some(cfg);
        self
    }

    /// Width of each column, padding included
    pub(crate) fn column_widths(&self) -> [usize; 4] {
        let mut widths = HEADERS.map(str::len);
        for row in self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths.map(|w| w + COLUMN_PADDING)
    }

    fn usage_style(&self, usage: Usage) -> Style {
        match self.colors.map(|cfg| usage.severity(cfg)) {
            Some(Severity::Critical) => Red.normal(),
            Some(Severity::Warning) => Yellow.normal(),
            Some(Severity::Normal) | None => Style::new(),
        }
    }
}

impl fmt::Display for Table<'_> {
    /// Output header, separator, rows and a trailing blank line
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.column_widths();

        writeln!(
            f,
            "{}",
            HEADERS
                .iter()
                .zip(widths)
                .map(|(header, width)| format!("{:<width$}", header))
                .join("")
        )?;
        writeln!(f, "{}", "-".repeat(widths.iter().sum()))?;

        for row in self.rows {
            let style = self.usage_style(row.usage);
            let line = row
                .cells()
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (cell, width))| {
                    let pad = " ".repeat(width - cell.chars().count());
                    if i == HEADERS.len() - 1 {
                        format!("{}{}", style.paint(cell.as_str()), pad)
                    } else {
                        format!("{}{}", cell, pad)
                    }
                })
                .join("");
            writeln!(f, "{}", line)?;
        }

        writeln!(f)
    }
}
