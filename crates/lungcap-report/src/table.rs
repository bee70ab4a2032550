//! Fixed-width console tables

use std::fmt;

/// Fixed-point text, `NaN` for missing values
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Three decimals, used for coefficients, intervals and p-values
pub fn coef(value: f64) -> String {
    fixed(value, 3)
}

/// Percentage of a fraction or an already-scaled value, one decimal
pub fn percent(value: f64) -> String {
    format!("{}%", fixed(value, 1))
}

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A table of pre-formatted cells; the first column is left-aligned
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    title: Option<String>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a row; short rows are padded with empty cells
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len().max(row.len()), String::new());
        self.rows.push(row);
    }

    /// Label followed by numbers at a fixed precision
    pub fn push_numeric(&mut self, label: impl Into<String>, values: &[f64], decimals: usize) {
        let cells = std::iter::once(label.into()).chain(values.iter().map(|&v| fixed(v, decimals)));
        self.push_row(cells);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        let cols = self.rows.iter().map(Vec::len).chain([self.headers.len()]).max().unwrap_or(0);
        (0..cols)
            .map(|j| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(j))
                    .chain(self.headers.get(j))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn align(j: usize) -> Align {
        if j == 0 {
            Align::Left
        } else {
            Align::Right
        }
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(j, &w)| {
            let cell = cells.get(j).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            match Table::align(j) {
                Align::Left => format!("{cell}{}", " ".repeat(pad)),
                Align::Right => format!("{}{cell}", " ".repeat(pad)),
            }
        })
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        let widths = self.widths();
        write_cells(f, &self.headers, &widths)?;
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(rule))?;
        for row in &self.rows {
            write_cells(f, row, &widths)?;
        }
        Ok(())
    }
}
