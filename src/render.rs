// ABOUTME: Browser rendering module for the html2pptx application
// ABOUTME: Renders one HTML page per call into a slide image using a headless browser

use crate::errors::{Html2PptxError, Result};
use crate::presentation::{Presentation, Slide};
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page::{CaptureScreenshotFormatOption, Viewport};
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use url::Url;

/// Content may exceed the page by this many pixels before it counts as overflow
const OVERFLOW_TOLERANCE_PX: f64 = 1.0;

/// Turns one HTML document into slides appended to a presentation.
///
/// Implementations must only append; slides already in the presentation keep
/// their position.
#[async_trait]
pub trait SlideRenderer: Send + Sync {
    async fn convert(&self, html_path: &Path, presentation: &mut Presentation) -> Result<()>;
}

/// Configuration for browser rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub browser_path: Option<String>,
    pub timeout_ms: u64,
    pub settle_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            browser_path: None,
            timeout_ms: 30000,
            settle_ms: 500,
        }
    }
}

/// Renders each HTML file as a single screenshot at the presentation's page size
pub struct ChromeRenderer {
    config: RenderConfig,
}

impl ChromeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SlideRenderer for ChromeRenderer {
    async fn convert(&self, html_path: &Path, presentation: &mut Presentation) -> Result<()> {
        let path = html_path.to_path_buf();
        let size = presentation.layout().size_px();
        let config = self.config.clone();

        let image = tokio::task::spawn_blocking(move || capture_page(&path, size, &config)).await??;

        presentation.add_slide(Slide::new(html_path, image));
        Ok(())
    }
}

fn browser_error(message: String) -> impl FnOnce(anyhow::Error) -> Html2PptxError {
    move |e| Html2PptxError::Browser {
        message: format!("{}: {}", message, e),
        source: Some(e.into()),
    }
}

/// Load `html_path` in a fresh headless browser sized to `(width, height)` and
/// capture the page as PNG.
fn capture_page(html_path: &Path, (width, height): (u32, u32), config: &RenderConfig) -> Result<Vec<u8>> {
    info!("Rendering HTML: {:?}", html_path);
    let start_time = Instant::now();

    if !html_path.is_file() {
        return Err(Html2PptxError::Conversion {
            path: html_path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }

    let url = Url::from_file_path(html_path).map_err(|_| Html2PptxError::Conversion {
        path: html_path.to_path_buf(),
        message: "path cannot be expressed as a file:// URL".to_string(),
    })?;

    let mut launch_options_builder = LaunchOptionsBuilder::default();
    launch_options_builder.window_size(Some((width, height)));
    launch_options_builder.headless(true);
    if let Some(browser_path) = &config.browser_path {
        launch_options_builder.path(Some(PathBuf::from(browser_path)));
    }

    let launch_options = launch_options_builder
        .build()
        .map_err(|e| Html2PptxError::Browser {
            message: format!("Failed to build browser options: {:?}", e),
            source: None,
        })?;

    debug!("Launching headless browser at {}x{}px", width, height);
    let browser = Browser::new(launch_options)
        .map_err(browser_error("Failed to launch browser".to_string()))?;

    let tab = browser
        .new_tab()
        .map_err(browser_error("Failed to create new tab".to_string()))?;

    info!("Opening page at URL: {}", url);
    tab.navigate_to(url.as_str())
        .map_err(browser_error(format!("Failed to navigate to {}", url)))?;
    tab.wait_until_navigated()
        .map_err(browser_error("Navigation failed".to_string()))?;
    tab.wait_for_element_with_custom_timeout("body", Duration::from_millis(config.timeout_ms))
        .map_err(browser_error("Failed to wait for body element".to_string()))?;

    // Give fonts and images a moment to settle
    std::thread::sleep(Duration::from_millis(config.settle_ms));

    check_overflow(&tab, html_path, (width, height))?;

    let clip = Viewport {
        x: 0.0,
        y: 0.0,
        width: f64::from(width),
        height: f64::from(height),
        scale: 1.0,
    };
    let image = tab
        .capture_screenshot(CaptureScreenshotFormatOption::Png, None, Some(clip), true)
        .map_err(browser_error("Failed to capture screenshot".to_string()))?;

    info!(
        "Rendered {:?} in {:.2} seconds",
        html_path,
        start_time.elapsed().as_secs_f64()
    );
    Ok(image)
}

fn evaluate_number(tab: &Tab, expression: &str) -> Option<f64> {
    match tab.evaluate(expression, false) {
        Ok(result) => result.value.as_ref().and_then(|v| v.as_f64()),
        Err(e) => {
            warn!("Failed to evaluate {}: {}", expression, e);
            None
        }
    }
}

/// Fail when the document body is larger than the page
fn check_overflow(tab: &Tab, html_path: &Path, (width, height): (u32, u32)) -> Result<()> {
    let body_width = evaluate_number(tab, "document.body.scrollWidth");
    let body_height = evaluate_number(tab, "document.body.scrollHeight");

    let (Some(body_width), Some(body_height)) = (body_width, body_height) else {
        warn!("Could not measure body of {:?}; skipping overflow check", html_path);
        return Ok(());
    };

    debug!("Body of {:?} measures {}x{}px", html_path, body_width, body_height);
    if body_width > f64::from(width) + OVERFLOW_TOLERANCE_PX
        || body_height > f64::from(height) + OVERFLOW_TOLERANCE_PX
    {
        return Err(Html2PptxError::Conversion {
            path: html_path.to_path_buf(),
            message: format!(
                "content overflows the page: body is {}x{}px, page is {}x{}px",
                body_width, body_height, width, height
            ),
        });
    }
    Ok(())
}
