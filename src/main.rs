//! PDF Workbench - Entry point

use clap::Parser;
use pdf_workbench::{convert::ToolConfig, run_server, ServerConfig};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pdf-workbench")]
#[command(about = "Browser form for merging, splitting, converting and securing PDFs")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "100")]
    max_upload_mb: usize,

    /// Number of finished downloads kept in memory
    #[arg(long, default_value = "64")]
    store_entries: usize,

    /// Memory budget for finished downloads, in megabytes
    #[arg(long, default_value = "512")]
    store_mb: usize,

    /// Time limit for one external tool run, in seconds
    #[arg(long, default_value = "120")]
    tool_timeout_secs: u64,

    /// Render resolution for OCR
    #[arg(long, default_value = "300")]
    ocr_dpi: u16,

    /// tesseract language code(s)
    #[arg(long, default_value = "eng")]
    ocr_lang: String,

    /// Path to the tesseract binary
    #[arg(long, default_value = "tesseract")]
    tesseract: String,

    /// Path to the LibreOffice binary
    #[arg(long, default_value = "soffice")]
    soffice: String,

    /// Path to Calibre's ebook-convert binary
    #[arg(long, default_value = "ebook-convert")]
    ebook_convert: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_upload_bytes: args.max_upload_mb * 1024 * 1024,
            store_max_entries: args.store_entries,
            store_max_bytes: args.store_mb * 1024 * 1024,
            tools: ToolConfig {
                tesseract: args.tesseract,
                soffice: args.soffice,
                ebook_convert: args.ebook_convert,
                timeout: Duration::from_secs(args.tool_timeout_secs),
                ocr_dpi: args.ocr_dpi,
                ocr_lang: args.ocr_lang,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "pdf_workbench=debug,tower_http=debug"
    } else {
        "pdf_workbench=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting PDF Workbench");

    run_server(args.into()).await
}
