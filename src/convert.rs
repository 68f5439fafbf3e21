// ABOUTME: Conversion pipeline for the html2pptx application
// ABOUTME: Validates the invocation, converts inputs in order and writes or discards the result

use crate::config::InvocationConfig;
use crate::errors::{Html2PptxError, Result};
use crate::inputs::{resolve_inputs, ResolvedInputs};
use crate::layout::resolve_layout;
use crate::pptx::PresentationWriter;
use crate::presentation::Presentation;
use crate::render::SlideRenderer;
use crate::utils;
use log::info;
use std::path::{Path, PathBuf};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Validate mode: everything converted, nothing written
    Validated { slides: usize },
    Written { path: PathBuf, slides: usize },
}

/// Run the whole pipeline for one invocation.
///
/// All invocation checks happen before the first file is rendered.
pub async fn run<R, W>(invocation: &InvocationConfig, renderer: &R, writer: &W) -> Result<Outcome>
where
    R: SlideRenderer + ?Sized,
    W: PresentationWriter + ?Sized,
{
    let inputs = resolve_inputs(&invocation.inputs)?;

    let output = match (&invocation.output, invocation.validate_only) {
        (_, true) => None,
        (Some(output), false) => Some(output.as_path()),
        (None, false) => return Err(Html2PptxError::MissingOutput),
    };

    let layout = resolve_layout(&invocation.layout)?;
    info!("Using layout {}", layout);

    let presentation = convert_all(renderer, &inputs, Presentation::new(layout)).await?;
    finalize(presentation, output, writer).await
}

/// Feed every input to the renderer, one at a time and in order.
///
/// The first failure stops the run; later files are not rendered.
pub async fn convert_all<R>(
    renderer: &R,
    inputs: &ResolvedInputs,
    mut presentation: Presentation,
) -> Result<Presentation>
where
    R: SlideRenderer + ?Sized,
{
    let total = inputs.len();
    for (i, html_path) in inputs.iter().enumerate() {
        info!("Converting {}/{}: {:?}", i + 1, total, html_path);
        renderer.convert(html_path, &mut presentation).await?;
    }
    info!(
        "Converted {} file(s) into {} slide(s)",
        total,
        presentation.slide_count()
    );
    Ok(presentation)
}

/// Write the presentation to `output`, or drop it when there is no output (validate mode)
pub async fn finalize<W>(
    presentation: Presentation,
    output: Option<&Path>,
    writer: &W,
) -> Result<Outcome>
where
    W: PresentationWriter + ?Sized,
{
    let slides = presentation.slide_count();
    let Some(output) = output else {
        info!("Validation passed; no output written");
        return Ok(Outcome::Validated { slides });
    };

    let path = utils::get_absolute_path(output)?;
    utils::ensure_parent_directory_exists(&path)?;
    writer.write(presentation, &path).await?;
    Ok(Outcome::Written { path, slides })
}
