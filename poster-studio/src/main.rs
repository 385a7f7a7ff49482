//! Poster Studio CLI
//!
//! Generates poster variants with Gemini, applies optional edits and writes
//! the exports to disk.

use clap::Parser;
use poster_studio::{run, CliArgs, GeminiClient, StudioConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with optional JSON output.
///
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,poster_core=debug,poster_studio=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let gemini = GeminiClient::new(args.gemini_config()?)?;
    let config = StudioConfig::try_from(args)?;

    let report = run(&config, &gemini).await?;
    for path in &report.exports {
        println!("{}", path.display());
    }
    tracing::info!(
        "Done: {} files in {}",
        report.len(),
        config.out_dir.display()
    );
    Ok(())
}
