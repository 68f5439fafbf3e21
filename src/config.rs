// ABOUTME: Configuration module for the html2pptx application
// ABOUTME: Environment-driven render defaults and the per-run invocation settings

use crate::render::RenderConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_TIMEOUT_MS: u64 = 30000;
const DEFAULT_SETTLE_MS: u64 = 500;

/// Global configuration for the application
pub struct Config {
    pub browser_path: Option<String>,
    pub default_timeout_ms: u64,
    pub settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_path: None,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let browser_path = env::var("BROWSER_PATH").ok().filter(|s| !s.is_empty());
        let default_timeout_ms = env::var("DEFAULT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let settle_ms = env::var("RENDER_SETTLE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SETTLE_MS);

        Self {
            browser_path,
            default_timeout_ms,
            settle_ms,
        }
    }

    /// Get a render configuration, letting explicit values win over this config
    pub fn get_render_config(
        &self,
        browser_path: Option<String>,
        timeout_ms: Option<u64>,
    ) -> RenderConfig {
        RenderConfig {
            browser_path: browser_path.or_else(|| self.browser_path.clone()),
            timeout_ms: timeout_ms.unwrap_or(self.default_timeout_ms),
            settle_ms: self.settle_ms,
        }
    }
}

/// Where the HTML inputs come from, exactly as supplied by the caller.
///
/// Both fields may be set here; the input resolver rejects that combination.
#[derive(Debug, Clone, Default)]
pub struct InputSources {
    pub html_dir: Option<PathBuf>,
    pub html_files: Vec<String>,
}

/// Settings for a single run, built once from the command line
#[derive(Debug, Clone)]
pub struct InvocationConfig {
    pub layout: String,
    pub output: Option<PathBuf>,
    pub validate_only: bool,
    pub inputs: InputSources,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            layout: crate::layout::DEFAULT_LAYOUT.to_string(),
            output: None,
            validate_only: false,
            inputs: InputSources::default(),
        }
    }
}
