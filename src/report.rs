//! Console report assembled by an analysis unit

use std::fmt;
use std::path::PathBuf;

/// Text sections in print order plus any chart files written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    sections: Vec<String>,
    charts: Vec<PathBuf>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section; sections are separated by a blank line
    pub fn section(&mut self, text: impl fmt::Display) -> &mut Self {
        self.sections.push(text.to_string().trim_end().to_string());
        self
    }

    /// Append a `=== heading ===` section
    pub fn titled(&mut self, heading: &str, body: impl fmt::Display) -> &mut Self {
        self.section(format!("=== {heading} ===\n{body}"))
    }

    pub fn add_charts(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.charts.extend(paths);
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn charts(&self) -> &[PathBuf] {
        &self.charts
    }

    /// Whether any section contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.sections.iter().any(|s| s.contains(needle))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{section}")?;
        }
        if !self.charts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Charts written:")?;
            for path in &self.charts {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}
