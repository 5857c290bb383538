use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Settings;
use crate::model::{ProblemRecord, ProblemSummary};
use crate::parser;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Backfill stats returned after completion.
pub struct BackfillStats {
    pub total: usize,
    pub fixed: usize,
    pub skipped: usize,
}

pub fn build_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch the homepage and parse the problem listing out of it.
pub async fn fetch_listing(client: &Client, settings: &Settings) -> Result<Vec<ProblemSummary>> {
    info!("Fetching problem listing: {}", settings.base_url);
    let html = fetch_page(client, &settings.base_url)
        .await
        .context("Failed to fetch problem listing")?;
    let problems = parser::parse_listing(&html, &settings.base_url)?;
    info!("Problems on listing page: {}", problems.len());
    Ok(problems)
}

/// Fetch each problem page sequentially with a polite delay and extract
/// its description. A page that fails to fetch or parse is warned about
/// and leaves the description empty; it never aborts the run.
pub async fn scrape_problems(
    client: &Client,
    settings: &Settings,
    problems: Vec<ProblemSummary>,
) -> Result<Vec<ProblemRecord>> {
    let pb = ProgressBar::new(problems.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let delay = Duration::from_millis(settings.request_delay_ms);
    let mut rows = Vec::with_capacity(problems.len());

    for p in problems {
        let description = match fetch_page(client, &p.url).await {
            Ok(html) => match parser::extract_description(&html) {
                Some(text) => text,
                None => {
                    warn!("No description block in {}", p.url);
                    String::new()
                }
            },
            Err(e) => {
                warn!("Failed to fetch {}: {}", p.url, e);
                String::new()
            }
        };

        rows.push(ProblemRecord {
            id: p.id,
            title: p.title,
            url: p.url,
            description,
            ..Default::default()
        });
        pb.inc(1);
        tokio::time::sleep(delay).await;
    }

    pb.finish_and_clear();
    Ok(rows)
}

/// Re-fetch descriptions for rows still holding the placeholder marker.
/// The hub page at `/all/<id>.html` links to the full writeup; the row is
/// rewritten in place when a description is recovered.
pub async fn backfill_descriptions(
    client: &Client,
    settings: &Settings,
    rows: &mut [ProblemRecord],
    marker: &str,
) -> Result<BackfillStats> {
    let targets: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.description.trim() == marker)
        .map(|(i, _)| i)
        .collect();
    info!("Rows with {:?} placeholder: {}", marker, targets.len());

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let delay = Duration::from_millis(settings.request_delay_ms);
    let mut stats = BackfillStats {
        total: targets.len(),
        fixed: 0,
        skipped: 0,
    };

    for idx in targets {
        let Some(id) = rows[idx].id else {
            warn!("Placeholder row without id (title {:?}), skipping", rows[idx].title);
            stats.skipped += 1;
            pb.inc(1);
            continue;
        };

        let hub_url = format!("{}/all/{}.html", settings.base_url.trim_end_matches('/'), id);
        match fetch_via_hub(client, &hub_url, settings).await {
            Ok(Some(description)) => {
                rows[idx].description = description;
                stats.fixed += 1;
            }
            Ok(None) => {
                warn!("No description recovered for problem {}", id);
                stats.skipped += 1;
            }
            Err(e) => {
                warn!("Backfill failed for problem {}: {}", id, e);
                stats.skipped += 1;
            }
        }
        pb.inc(1);
        tokio::time::sleep(delay).await;
    }

    pb.finish_and_clear();
    Ok(stats)
}

/// Hop from the hub page to the solution writeup and pull its description.
async fn fetch_via_hub(
    client: &Client,
    hub_url: &str,
    settings: &Settings,
) -> Result<Option<String>> {
    let hub_html = fetch_page(client, hub_url).await?;
    let Some(link) = parser::solution_link(&hub_html, &settings.base_url) else {
        return Ok(None);
    };
    let problem_html = fetch_page(client, &link).await?;
    Ok(parser::extract_description(&problem_html))
}

async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(text)
}
