use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::delta::{compute_rank_delta, RankDelta, ScoreBand, Tone};
use crate::model::{EngineRanks, RankedItem, SiteSummary};
use crate::stats::{aggregate_with_limit, AggregateStats};
use crate::utils::{format_number, redact_url, url_for_filename};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRow {
    pub id: u64,
    pub keyword: String,
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_rank: Option<u32>,
    pub last_updated: NaiveDate,
    pub delta: RankDelta,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    pub id: u64,
    pub url: String,
    pub score: u8,
    pub band: ScoreBand,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_rank: Option<u32>,
    pub rankings: EngineRanks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check: Option<NaiveDate>,
    pub keywords: Vec<KeywordRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub stats: AggregateStats,
    pub sites: Vec<SiteReport>,
}

/// Keyword rankings of one site.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub url: String,
    pub date: DateTime<Utc>,
    pub keywords: Vec<KeywordRow>,
}

pub fn keyword_rows(items: &[RankedItem]) -> Vec<KeywordRow> {
    items
        .iter()
        .map(|item| {
            let delta = compute_rank_delta(item.rank, item.previous_rank);
            KeywordRow {
                id: item.id,
                keyword: item.keyword.clone(),
                rank: item.rank,
                previous_rank: item.previous_rank,
                last_updated: item.last_updated,
                delta,
                tone: delta.tone(),
            }
        })
        .collect()
}

pub fn build_report(sites: &[SiteSummary], top_n: usize, generated_at: DateTime<Utc>) -> Report {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "report_build",
        site_count = sites.len(),
        top_n,
        "Building ranking report"
    );

    let stats = aggregate_with_limit(sites, top_n);
    let site_reports = sites
        .iter()
        .map(|site| {
            let band = ScoreBand::from_score(site.score);
            SiteReport {
                id: site.id,
                url: site.url.clone(),
                score: site.score,
                band,
                tone: band.tone(),
                best_rank: site.best_rank(),
                rankings: site.rankings.clone(),
                last_check: site.last_check,
                keywords: keyword_rows(site.keywords()),
            }
        })
        .collect();

    info!(
        action = "complete",
        component = "report_build",
        total_keywords = stats.total_keywords,
        duration_ms = start_time.elapsed().as_millis(),
        "Ranking report built"
    );

    Report {
        generated_at,
        stats,
        sites: site_reports,
    }
}

pub fn build_keyword_report(url: &str, items: &[RankedItem], date: DateTime<Utc>) -> KeywordReport {
    KeywordReport {
        url: url.to_string(),
        date,
        keywords: keyword_rows(items),
    }
}

fn display_url(url: &str, redact: bool) -> String {
    if redact {
        redact_url(url)
    } else {
        url.to_string()
    }
}

pub fn print_report(report: &Report, redact: bool) {
    let stats = &report.stats;

    println!("\n--- SEO Dashboard ---");
    println!("Tracked sites: {}", format_number(stats.total_sites));
    println!(
        "Average score: {} ({})",
        stats.average_score,
        ScoreBand::from_score(stats.average_score.min(100) as u8)
    );
    match stats.best_ranking {
        Some(rank) => println!("Best ranking: #{}", rank),
        None => println!("Best ranking: –"),
    }
    println!("Tracked keywords: {}", format_number(stats.total_keywords));
    println!(
        "Keyword movement: {} up, {} down, {} unchanged, {} without history",
        stats.movement.improved,
        stats.movement.declined,
        stats.movement.unchanged,
        stats.movement.untracked
    );

    println!("\nMost tracked keywords:");
    if stats.top_keywords.is_empty() {
        println!("- none");
    }
    for item in &stats.top_keywords {
        println!("- {}: {} sites", item.keyword, format_number(item.count));
    }

    println!("\nBest performing sites:");
    if stats.top_sites_by_score.is_empty() {
        println!("- none");
    }
    for item in &stats.top_sites_by_score {
        println!("- {}: score {}", display_url(&item.url, redact), item.score);
    }

    println!("\nSites with most keywords:");
    if stats.sites_by_keyword_count.is_empty() {
        println!("- none");
    }
    for item in &stats.sites_by_keyword_count {
        println!(
            "- {}: {} keywords",
            display_url(&item.url, redact),
            format_number(item.count)
        );
    }

    for site in &report.sites {
        println!(
            "\n{} (score {}, {})",
            display_url(&site.url, redact),
            site.score,
            site.band
        );
        let engines: Vec<String> = site
            .rankings
            .iter()
            .map(|(engine, rank)| format!("{}: #{}", engine, rank))
            .collect();
        if !engines.is_empty() {
            println!("  Rankings: {}", engines.join(", "));
        }
        print_keyword_rows(&site.keywords);
    }
}

pub fn print_keyword_report(report: &KeywordReport, redact: bool) {
    println!(
        "\n--- Keyword rankings for {} ---",
        display_url(&report.url, redact)
    );
    if report.keywords.is_empty() {
        println!("No keywords tracked for this site");
        return;
    }
    print_keyword_rows(&report.keywords);
}

fn print_keyword_rows(rows: &[KeywordRow]) {
    for row in rows {
        let history = match row.previous_rank {
            Some(previous) => format!("previous #{}", previous),
            None => "no previous data".to_string(),
        };
        println!(
            "  - {}: #{} {} ({}, updated {})",
            row.keyword, row.rank, row.delta, history, row.last_updated
        );
    }
}

pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    write_json(report, dir, "seo-report", "all-sites", report.generated_at)
}

pub fn write_keyword_report(report: &KeywordReport, dir: &Path) -> Result<PathBuf> {
    write_json(
        report,
        dir,
        "keyword-report",
        &url_for_filename(&report.url),
        report.date,
    )
}

fn write_json<T: Serialize>(
    value: &T,
    dir: &Path,
    prefix: &str,
    slug: &str,
    timestamp: DateTime<Utc>,
) -> Result<PathBuf> {
    let filename = format!(
        "{}-{}-{}.json",
        prefix,
        slug,
        timestamp.format("%Y-%m-%dT%H-%M-%S")
    );
    let path = dir.join(filename);

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let body = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(&path, body).with_context(|| format!("Failed to write {:?}", path))?;

    info!(action = "write", component = "report_file", file_path = ?path, "Report written");
    Ok(path)
}
