//! pdf-page-filter - Entry point

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_page_filter::cli::Cli;
use pdf_page_filter::extract::{extract_pages, render_map_json, ExtractOptions};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "extraction failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let options = ExtractOptions {
        physical: cli.physical,
        password: cli.password.clone(),
    };

    let summary = extract_pages(&cli.input, &cli.pages, &cli.output, &options)?;

    if cli.show_map {
        match &summary.map {
            Some(map) => println!("{}", render_map_json(map)?),
            None => tracing::warn!("selection was physical, no page-number map to show"),
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_page_filter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
