mod clean;
mod config;
mod dataset;
mod db;
mod load;
mod merge;
mod model;
mod parser;
mod scrape;
mod segment;

use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "leet_pipeline", about = "leetcode.ca problem scraper and dataset pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing page and each problem's description to CSV
    Scrape {
        /// Max problems to scrape (default: all listed)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Output CSV path (default: configured csv_path)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Re-fetch descriptions for rows stuck on a placeholder
    Backfill {
        /// Input CSV (default: configured csv_path)
        #[arg(long)]
        csv: Option<String>,
        /// Placeholder text marking a broken description
        #[arg(long, default_value = "SQL Schema")]
        marker: String,
        /// Output CSV path (default: rewrite the input)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Append a newly scraped CSV onto the main dataset
    Merge {
        /// CSV of newly scraped problems to append
        new_csv: String,
        /// Main dataset CSV (default: configured csv_path)
        #[arg(long)]
        existing: Option<String>,
        /// Only append new rows with id >= this floor
        #[arg(long)]
        min_id: Option<i64>,
        /// Output CSV path (default: rewrite the main dataset)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Normalize fields and split descriptions into sections
    Clean {
        /// Input CSV (default: configured csv_path)
        #[arg(long)]
        csv: Option<String>,
        /// Output CSV path (default: rewrite the input)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Load a cleaned CSV into the SQLite database
    Load {
        /// Input CSV (default: configured csv_path)
        #[arg(long)]
        csv: Option<String>,
    },
    /// Show database statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = config::Settings::load()?;

    let result = match cli.command {
        Commands::Scrape { limit, out } => {
            let client = scrape::build_client(&settings)?;
            let mut problems = scrape::fetch_listing(&client, &settings).await?;
            if problems.is_empty() {
                println!("No problems found on the listing page.");
                return Ok(());
            }
            if let Some(n) = limit {
                problems.truncate(n);
            }
            println!("Scraping {} problem pages...", problems.len());
            let rows = scrape::scrape_problems(&client, &settings, problems).await?;
            let path = out.unwrap_or_else(|| settings.csv_path.clone());
            dataset::write_csv(&path, &rows)?;
            println!("Wrote {} rows to {}", rows.len(), path);
            Ok(())
        }
        Commands::Backfill { csv, marker, out } => {
            let path = csv.unwrap_or_else(|| settings.csv_path.clone());
            let mut rows = dataset::read_csv(&path)?;
            if rows.is_empty() {
                println!("No rows in {}.", path);
                return Ok(());
            }
            let client = scrape::build_client(&settings)?;
            let stats =
                scrape::backfill_descriptions(&client, &settings, &mut rows, &marker).await?;
            if stats.total == 0 {
                println!("No rows matched the {:?} placeholder.", marker);
                return Ok(());
            }
            let out_path = out.unwrap_or(path);
            dataset::write_csv(&out_path, &rows)?;
            println!(
                "Backfilled {} of {} placeholder rows ({} skipped); wrote {}",
                stats.fixed, stats.total, stats.skipped, out_path
            );
            Ok(())
        }
        Commands::Merge { new_csv, existing, min_id, out } => {
            let existing_path = existing.unwrap_or_else(|| settings.csv_path.clone());
            let current = dataset::read_csv(&existing_path)?;
            let incoming = dataset::read_csv(&new_csv)?;
            let (merged, report) = merge::merge_datasets(current, incoming, min_id);
            let out_path = out.unwrap_or(existing_path);
            dataset::write_csv(&out_path, &merged)?;
            println!(
                "Appended {} rows ({} total); wrote {}",
                report.appended, report.total, out_path
            );
            Ok(())
        }
        Commands::Clean { csv, out } => {
            let path = csv.unwrap_or_else(|| settings.csv_path.clone());
            let rows = dataset::read_csv(&path)?;
            if rows.is_empty() {
                println!("No rows in {}.", path);
                return Ok(());
            }
            println!("Cleaning {} rows...", rows.len());
            let report = clean::clean_dataset(rows);
            let out_path = out.unwrap_or(path);
            dataset::write_csv(&out_path, &report.rows)?;
            report.print();
            Ok(())
        }
        Commands::Load { csv } => {
            let path = csv.unwrap_or_else(|| settings.csv_path.clone());
            let rows = dataset::read_csv(&path)?;
            if rows.is_empty() {
                println!("No rows in {}.", path);
                return Ok(());
            }
            let mut conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            println!("Loading {} rows into {}...", rows.len(), settings.db_path);
            let loaded = load::load_dataset(&mut conn, &rows, &settings.base_url)?;
            println!("Upserted {} problems.", loaded);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Problems:      {}", s.problems);
            println!("Companies:     {}", s.companies);
            println!("Topics:        {}", s.topics);
            println!("Company links: {}", s.company_links);
            println!("Topic links:   {}", s.topic_links);
            println!("Similar pairs: {}", s.similar);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
