// ABOUTME: In-memory presentation for the html2pptx application
// ABOUTME: One layout fixed at creation and an append-only list of slides

use crate::layout::LayoutDirective;
use log::debug;
use std::path::{Path, PathBuf};

/// A rendered slide: the image captured for one HTML page
#[derive(Debug, Clone)]
pub struct Slide {
    pub source: PathBuf,
    pub image: Vec<u8>,
}

impl Slide {
    pub fn new(source: &Path, image: Vec<u8>) -> Self {
        Self {
            source: source.to_path_buf(),
            image,
        }
    }
}

/// The presentation being built for a single run.
///
/// The layout cannot be changed once the presentation exists, and slides can
/// only be appended.
#[derive(Debug)]
pub struct Presentation {
    layout: LayoutDirective,
    slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(layout: LayoutDirective) -> Self {
        debug!("Applying layout {}", layout);
        Self {
            layout,
            slides: Vec::new(),
        }
    }

    pub fn layout(&self) -> &LayoutDirective {
        &self.layout
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Append a slide after every slide added so far
    pub fn add_slide(&mut self, slide: Slide) {
        debug!(
            "Adding slide {} from {:?}",
            self.slides.len() + 1,
            slide.source
        );
        self.slides.push(slide);
    }
}
