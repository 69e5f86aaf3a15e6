//! Operator CLI for the storefront search pipeline.
//!
//! `search` runs a query through the full pipeline (index → normalize →
//! hydrate); `show` fetches one record from the catalog and prints its
//! canonical hit. Both construct the HTTP clients once from `AppConfig`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rrsearch_pipeline::{
    to_canonical_hit, SearchFilters, SearchPipeline, SearchRequest, SortOrder,
};

#[derive(Debug, Parser)]
#[command(name = "rrsearch-cli")]
#[command(about = "Remorseless Records catalog search pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a search query through the pipeline.
    Search {
        /// Free-text query; empty matches everything.
        #[arg(default_value = "")]
        query: String,
        /// Filter by genre (repeatable).
        #[arg(long = "genre")]
        genres: Vec<String>,
        /// Filter by format (repeatable).
        #[arg(long = "format")]
        formats: Vec<String>,
        /// Filter by category handle (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Exclude sold-out releases.
        #[arg(long)]
        in_stock: bool,
        /// Sort order: alphabetical, newest, price-low, price-high.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Print the raw JSON response instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Fetch one catalog record by handle and print its canonical hit.
    Show {
        handle: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = rrsearch_core::load_app_config_from_env()
        .context("failed to load configuration from environment")?;

    // RUST_LOG wins when set; otherwise the configured level applies.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| configured_filter(&config.log_level)),
        )
        .init();
    tracing::info!(env = %config.env, "rrsearch-cli starting");

    let pipeline = SearchPipeline::from_config(&config).context("failed to construct clients")?;

    match cli.command {
        Commands::Search {
            query,
            genres,
            formats,
            categories,
            in_stock,
            sort,
            limit,
            offset,
            json,
        } => {
            let request = SearchRequest {
                query,
                limit,
                offset,
                filters: SearchFilters {
                    genres,
                    formats,
                    categories,
                    ..SearchFilters::default()
                },
                sort: sort.as_deref().and_then(SortOrder::parse),
                in_stock_only: in_stock,
            };

            let results = pipeline.search(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_summary(&results);
            }
        }
        Commands::Show { handle, json } => {
            let record = pipeline
                .catalog()
                .get_by_handle(&handle)
                .await?
                .with_context(|| format!("no catalog record for handle '{handle}'"))?;
            let hit = to_canonical_hit(&record);
            if json {
                println!("{}", serde_json::to_string_pretty(&hit)?);
            } else {
                print_hit(&hit);
            }
        }
    }

    Ok(())
}

fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::new(level)
}

fn print_summary(results: &rrsearch_pipeline::SearchResults) {
    println!(
        "{} of {} hits (offset {})",
        results.hits.len(),
        results.total,
        results.offset
    );
    for hit in &results.hits {
        print_hit(hit);
    }
    if !results.facets.genres.is_empty() {
        let mut genres: Vec<_> = results.facets.genres.iter().collect();
        genres.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        let rendered: Vec<String> = genres
            .iter()
            .map(|(value, count)| format!("{value} ({count})"))
            .collect();
        println!("genres: {}", rendered.join(", "));
    }
}

fn print_hit(hit: &rrsearch_core::SearchHit) {
    let price = hit
        .price_amount
        .map_or_else(|| "-".to_owned(), |amount| format!("{amount:.2}"));
    let stock = hit
        .stock_status
        .map_or_else(|| "unknown".to_owned(), |s| s.to_string());
    let format = hit.formats.first().map_or("-", String::as_str);
    println!(
        "  {} — {} [{}] {} {} ({})",
        hit.artist, hit.album, format, price, stock, hit.handle
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_uses_app_config_level() {
        assert_eq!(configured_filter("debug").to_string(), "debug");
        assert_eq!(configured_filter("warn").to_string(), "warn");
    }
}
