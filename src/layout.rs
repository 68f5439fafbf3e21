// ABOUTME: Layout selection for the html2pptx application
// ABOUTME: Maps a layout token to a preset or custom page geometry

use crate::errors::{Html2PptxError, Result};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LAYOUT: &str = "widescreen";

/// English Metric Units per inch, as used by OOXML
pub const EMU_PER_INCH: f64 = 914_400.0;

/// CSS pixels per inch
pub const PX_PER_INCH: f64 = 96.0;

/// Built-in page sizes understood by the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPreset {
    /// 13.33 x 7.5 in (12192000 x 6858000 EMU)
    Wide,
    /// 10 x 7.5 in
    Standard,
}

impl LayoutPreset {
    pub fn id(self) -> &'static str {
        match self {
            LayoutPreset::Wide => "LAYOUT_WIDE",
            LayoutPreset::Standard => "LAYOUT_4x3",
        }
    }

    pub fn size_inches(self) -> (f64, f64) {
        match self {
            LayoutPreset::Wide => (12_192_000.0 / EMU_PER_INCH, 7.5),
            LayoutPreset::Standard => (10.0, 7.5),
        }
    }
}

/// A page geometry defined by the caller instead of a built-in preset
#[derive(Debug, Clone, PartialEq)]
pub struct CustomLayout {
    pub name: String,
    pub width_in: f64,
    pub height_in: f64,
}

impl CustomLayout {
    /// ISO A1 in portrait orientation
    pub fn a1() -> Self {
        Self {
            name: "A1".to_string(),
            width_in: 23.39,
            height_in: 33.11,
        }
    }
}

/// The single page geometry applied to every slide of a presentation
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutDirective {
    Preset(LayoutPreset),
    Custom(CustomLayout),
}

impl LayoutDirective {
    /// Identifier of the active layout: the preset id or the custom layout's name
    pub fn name(&self) -> &str {
        match self {
            LayoutDirective::Preset(preset) => preset.id(),
            LayoutDirective::Custom(custom) => &custom.name,
        }
    }

    pub fn size_inches(&self) -> (f64, f64) {
        match self {
            LayoutDirective::Preset(preset) => preset.size_inches(),
            LayoutDirective::Custom(custom) => (custom.width_in, custom.height_in),
        }
    }

    /// Slide size in EMU (cx, cy)
    pub fn size_emu(&self) -> (u64, u64) {
        let (w, h) = self.size_inches();
        ((w * EMU_PER_INCH).round() as u64, (h * EMU_PER_INCH).round() as u64)
    }

    /// Page size in CSS pixels (width, height)
    pub fn size_px(&self) -> (u32, u32) {
        let (w, h) = self.size_inches();
        ((w * PX_PER_INCH).round() as u32, (h * PX_PER_INCH).round() as u32)
    }

    /// Human readable format name written to docProps/app.xml
    pub fn format_name(&self) -> String {
        match self {
            LayoutDirective::Preset(LayoutPreset::Wide) => "Widescreen".to_string(),
            LayoutDirective::Preset(LayoutPreset::Standard) => "On-screen Show (4:3)".to_string(),
            LayoutDirective::Custom(custom) => custom.name.clone(),
        }
    }
}

impl FromStr for LayoutDirective {
    type Err = Html2PptxError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "widescreen" => Ok(LayoutDirective::Preset(LayoutPreset::Wide)),
            "normal" => Ok(LayoutDirective::Preset(LayoutPreset::Standard)),
            "A1" => Ok(LayoutDirective::Custom(CustomLayout::a1())),
            other => Err(Html2PptxError::UnsupportedLayout(other.to_string())),
        }
    }
}

impl fmt::Display for LayoutDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.size_inches();
        write!(f, "{} ({} x {} in)", self.name(), w, h)
    }
}

/// Resolve a `--layout` token
pub fn resolve_layout(token: &str) -> Result<LayoutDirective> {
    token.parse()
}
