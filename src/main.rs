mod analyzer;
mod fetch;
mod menu;
mod parser;
mod platform;
mod suggest;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::menu::{AnalysisResult, Suggestion};
use crate::platform::Platform;

#[derive(Parser)]
#[command(
    name = "menu_auditor",
    about = "Delivery menu analyzer: extract items, suggest improvements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a live menu URL
    Analyze {
        url: String,
        /// Emit the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Analyze a list of URLs (one per line) concurrently
    Batch {
        file: PathBuf,
        /// Parallel analyses
        #[arg(short = 'c', long, default_value = "4")]
        concurrency: usize,
        /// Emit one JSON array with every outcome
        #[arg(long)]
        json: bool,
    },
    /// Extract items from a saved HTML file without fetching
    Extract {
        file: PathBuf,
        /// Platform whose selectors to use (ifood, ubereats, rappi); generic
        /// fallback when omitted
        #[arg(short, long)]
        platform: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { url, json } => {
            let result = analyzer::analyze(&url).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
            Ok(())
        }
        Commands::Batch {
            file,
            concurrency,
            json,
        } => run_batch(file, concurrency, json).await,
        Commands::Extract { file, platform } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let tag = match platform {
                Some(name) => Platform::from_name(&name)
                    .with_context(|| format!("unknown platform: {}", name))?,
                None => Platform::Unknown,
            };
            print_items(&parser::parse(&html, tag));
            Ok(())
        }
    }
}

/// Analyze every URL in the file, capped at `concurrency` in flight, results
/// streamed back as they finish.
async fn run_batch(file: PathBuf, concurrency: usize, json: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use tokio::sync::Semaphore;

    let urls: Vec<String> = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        println!("No URLs in {}.", file.display());
        return Ok(());
    }

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let (tx, mut rx) = tokio::sync::mpsc::channel::<(
        String,
        Result<AnalysisResult, analyzer::AnalyzeError>,
    )>(concurrency.max(1) * 2);

    for url in urls {
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let result = analyzer::analyze(&url).await;
            let _ = tx.send((url, result)).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut ok = 0usize;
    let mut errors = 0usize;
    let mut outcomes = Vec::new();

    while let Some((url, result)) = rx.recv().await {
        match result {
            Ok(result) => {
                ok += 1;
                if json {
                    outcomes.push(serde_json::json!({ "url": url, "results": result }));
                } else {
                    pb.suspend(|| {
                        println!(
                            "{}: {} items, {} suggestions ({})",
                            url,
                            result.total_items,
                            result.suggestions.len(),
                            result.platform
                        )
                    });
                }
            }
            Err(e) => {
                errors += 1;
                if json {
                    outcomes.push(serde_json::json!({ "url": url, "error": e.to_string() }));
                } else {
                    pb.suspend(|| println!("{}: {}", url, e));
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("Done: {} analyzed ({} ok, {} errors).", ok + errors, ok, errors);
    }
    Ok(())
}

fn print_report(result: &AnalysisResult) {
    println!("Platform:    {}", result.platform);
    println!("Total items: {}", result.total_items);

    if result.suggestions.is_empty() {
        println!("\nNo suggestions. The menu looks well put together.");
    } else {
        println!("\n--- Suggestions ---");
        for suggestion in &result.suggestions {
            print_suggestion(suggestion);
        }
    }

    println!("\n--- Sample items ---");
    for item in &result.sample_items {
        let name = if item.name.is_empty() { "(unnamed)" } else { item.name.as_str() };
        let price = if item.price.is_empty() { "-" } else { item.price.as_str() };
        println!("  {} ({})", name, price);
    }
}

fn print_suggestion(suggestion: &Suggestion) {
    println!("\n* {}", suggestion.title);
    println!("  {}", suggestion.description);
    if !suggestion.affected_items.is_empty() {
        let preview = suggestion.affected_items.join(", ");
        let hidden = suggestion.affected_count - suggestion.affected_items.len();
        if hidden > 0 {
            println!("  e.g. {} (+{} more)", preview, hidden);
        } else {
            println!("  e.g. {}", preview);
        }
    }
    if let (Some(min), Some(max), Some(avg)) = (
        suggestion.min_price,
        suggestion.max_price,
        suggestion.avg_price,
    ) {
        println!("  prices: min {:.2}, max {:.2}, avg {:.2}", min, max, avg);
    }
}

fn print_items(items: &[menu::MenuItem]) {
    if items.is_empty() {
        println!("No items extracted.");
        return;
    }

    println!(
        "{:>3} | {:<30} | {:>10} | {:<5} | {:<5}",
        "#", "Name", "Price", "Desc", "Image"
    );
    println!("{}", "-".repeat(66));

    for (i, item) in items.iter().enumerate() {
        println!(
            "{:>3} | {:<30} | {:>10} | {:<5} | {:<5}",
            i + 1,
            truncate(&item.name, 30),
            truncate(&item.price, 10),
            if item.description.is_empty() { "-" } else { "yes" },
            if item.image_url.is_empty() { "-" } else { "yes" },
        );
    }

    println!("\n{} items", items.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
