use std::error::Error;

use clap::Parser;
use colored::Colorize;
use language_source::{CachedRemoteSource, SourceConfig};
use linguist_core::Linguist;
use tracing::info;

mod telemetry;

/// Resolve the language of files by their path.
#[derive(Debug, Parser)]
#[command(name = "linguist", version)]
struct Args {
    /// Fetch a fresh registry before resolving.
    #[arg(long)]
    refresh: bool,

    /// Also report whether each path matches any of these language names.
    #[arg(long = "lang", value_name = "NAME")]
    langs: Vec<String>,

    /// Paths to resolve.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Optional .env with LINGUIST_* overrides.
    dotenvy::dotenv().ok();
    telemetry::init();

    let args = Args::parse();

    let cfg = SourceConfig::from_env()?;
    info!(
        cache = %cfg.cache_dir.display(),
        registry = %cfg.registry_url,
        "using language registry"
    );

    let linguist = Linguist::from_source(CachedRemoteSource::from_config(&cfg)?).await?;
    if args.refresh {
        linguist.refresh().await?;
    }

    let resolver = linguist.resolver();
    for path in &args.paths {
        let languages = resolver.languages_for(path);
        if languages.is_empty() {
            println!("{}: {}", path.bold(), "unknown".dimmed());
        } else {
            let rendered: Vec<String> = languages
                .iter()
                .map(|lang| match &lang.group {
                    Some(group) => format!("{} ({}, {})", lang.name.green(), lang.kind, group),
                    None => format!("{} ({})", lang.name.green(), lang.kind),
                })
                .collect();
            println!("{}: {}", path.bold(), rendered.join(", "));
        }

        if !args.langs.is_empty() {
            let verdict = if resolver.matches(path, args.langs.as_slice()) {
                "yes".green()
            } else {
                "no".red()
            };
            println!("  matches {}: {}", args.langs.join(", "), verdict);
        }
    }

    Ok(())
}
