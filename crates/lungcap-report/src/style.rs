//! Chart styling passed explicitly to every renderer

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Named color cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Palette {
    /// Ten-color cycle distinguishable under common color vision deficiencies
    #[default]
    Colorblind,
    Grayscale,
}

const COLORBLIND: [(u8, u8, u8); 10] = [
    (0x01, 0x73, 0xB2),
    (0xDE, 0x8F, 0x05),
    (0x02, 0x9E, 0x73),
    (0xD5, 0x5E, 0x00),
    (0xCC, 0x78, 0xBC),
    (0xCA, 0x91, 0x61),
    (0xFB, 0xAF, 0xE4),
    (0x94, 0x94, 0x94),
    (0xEC, 0xE1, 0x33),
    (0x56, 0xB4, 0xE9),
];

const GRAYSCALE: [(u8, u8, u8); 4] = [(0x20, 0x20, 0x20), (0x70, 0x70, 0x70), (0xA0, 0xA0, 0xA0), (0x50, 0x50, 0x50)];

impl Palette {
    /// Color `i` of the cycle, wrapping around
    pub fn color(&self, i: usize) -> RGBColor {
        let colors: &[(u8, u8, u8)] = match self {
            Self::Colorblind => &COLORBLIND,
            Self::Grayscale => &GRAYSCALE,
        };
        let (r, g, b) = colors[i % colors.len()];
        RGBColor(r, g, b)
    }
}

/// Figure geometry and typography
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportStyle {
    /// Width and height in inches
    pub figure_size: (f64, f64),
    /// Raster resolution
    pub dpi: u32,
    pub palette: Palette,
    /// Multiplier applied to every font size
    pub font_scale: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            figure_size: (8.5, 6.0),
            dpi: 300,
            palette: Palette::Colorblind,
            font_scale: 1.6,
        }
    }
}

/// Points per inch for vector output
const POINTS_PER_INCH: f64 = 72.0;

impl ReportStyle {
    pub fn with_figure_size(mut self, width: f64, height: f64) -> Self {
        self.figure_size = (width, height);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_font_scale(mut self, scale: f64) -> Self {
        self.font_scale = scale;
        self
    }

    /// Raster size in pixels: figure size times dpi
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            (w * f64::from(self.dpi)).round() as u32,
            (h * f64::from(self.dpi)).round() as u32,
        )
    }

    /// Vector canvas size in points
    pub fn vector_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            (w * POINTS_PER_INCH).round() as u32,
            (h * POINTS_PER_INCH).round() as u32,
        )
    }
}
