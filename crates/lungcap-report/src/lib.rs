//! Report output for the lung capacity pipelines
//!
//! - [`Table`]: plain-text tables with fixed decimal formatting
//! - [`charts`]: scatter, box/strip, Q–Q and residual plots written as PNG and SVG
//! - [`lowess`]: the smoother behind the residual trend line
//! - [`ReportStyle`]: figure size, resolution, palette and font scale shared by all charts
//!
//! # Usage
//!
//! ```rust
//! use lungcap_report::{fixed, Table};
//!
//! let mut table = Table::new(["Term", "Estimate"]);
//! table.push_row(["Height", fixed(0.26228, 3).as_str()]);
//! assert!(table.to_string().contains("0.262"));
//! ```

pub mod charts;
mod error;
mod smooth;
mod style;
mod table;

pub use charts::{
    save_chart, BoxJitterChart, Chart, QqChart, ResidualChart, ScatterChart, Series,
};
pub use error::{Error, Result};
pub use smooth::{lowess, LowessOptions};
pub use style::{Palette, ReportStyle};
pub use table::{coef, fixed, percent, Align, Table};
