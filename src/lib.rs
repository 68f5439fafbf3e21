// ABOUTME: Library module for the html2pptx program.
// ABOUTME: Contains input resolution, layout selection, rendering and PPTX writing.

pub mod config;
pub mod convert;
pub mod errors;
pub mod inputs;
pub mod layout;
pub mod pptx;
pub mod presentation;
pub mod render;
pub mod utils;

// Reexport common types and functions
pub use config::{Config, InputSources, InvocationConfig};
pub use convert::{convert_all, finalize, run, Outcome};
pub use errors::{Html2PptxError, Result};
pub use inputs::{resolve_inputs, ResolvedInputs};
pub use layout::{resolve_layout, CustomLayout, LayoutDirective, LayoutPreset};
pub use pptx::{generate_pptx, PptxConfig, PptxWriter, PresentationWriter};
pub use presentation::{Presentation, Slide};
pub use render::{ChromeRenderer, RenderConfig, SlideRenderer};
