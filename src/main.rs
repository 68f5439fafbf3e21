// ABOUTME: Main entry point for the html2pptx program.
// ABOUTME: Parses the command line, runs the pipeline and maps failures to exit codes.

use clap::Parser;
use html2pptx::{
    ChromeRenderer, Config, InputSources, InvocationConfig, Outcome, PptxConfig, PptxWriter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page layout: widescreen, normal or A1
    #[arg(long, default_value = html2pptx::layout::DEFAULT_LAYOUT)]
    layout: String,

    /// Path to the output PPTX file (required unless --validate)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run the conversion without writing a file
    #[arg(long)]
    validate: bool,

    /// Directory whose *.html files become slides, in filename order
    #[arg(long = "html-dir", alias = "html_dir")]
    html_dir: Option<PathBuf>,

    /// HTML file(s) to convert, in the given order (repeatable, comma separated)
    #[arg(long, value_delimiter = ',')]
    html: Vec<String>,

    /// Presentation title stored in the document properties
    #[arg(long, default_value = "Presentation")]
    title: String,

    /// Chrome/Chromium executable (defaults to BROWSER_PATH or autodetection)
    #[arg(long)]
    browser_path: Option<String>,

    /// Page load timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn invocation(&self) -> InvocationConfig {
        InvocationConfig {
            layout: self.layout.clone(),
            output: self.output.clone(),
            validate_only: self.validate,
            inputs: InputSources {
                html_dir: self.html_dir.clone(),
                html_files: self.html.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let app_config = Config::from_env();
    let renderer = ChromeRenderer::new(
        app_config.get_render_config(cli.browser_path.clone(), cli.timeout_ms),
    );
    let writer = PptxWriter::new(PptxConfig {
        title: cli.title.clone(),
    });

    match html2pptx::run(&cli.invocation(), &renderer, &writer).await {
        Ok(Outcome::Validated { slides }) => {
            println!("Validation succeeded: {} slide(s) rendered", slides);
        }
        Ok(Outcome::Written { path, slides }) => {
            println!("PPTX generated successfully: {:?} ({} slides)", path, slides);
        }
        Err(e) if e.is_usage_error() => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:?}", anyhow::Error::new(e));
            std::process::exit(1);
        }
    }
}
