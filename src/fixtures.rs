use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::model::{RankedItem, SiteSummary};

// Sample data shipped with the binary, used when no fixture file is found
const DEFAULT_SITES_BYTES: &[u8] = include_bytes!("../default_sites.json");

pub const DEFAULT_SITES_FILE: &str = "sites.json";

pub fn load_sites(sites_path: Option<&Path>) -> Result<Vec<SiteSummary>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "site_loading",
        "Starting tracked site loading"
    );

    let sites = if let Some(path) = sites_path {
        info!(action = "load", component = "sites_file", file_path = ?path, "Loading sites from specified file");
        if !path.exists() {
            anyhow::bail!("Sites file not found: {:?}", path);
        }
        read_sites_file(path)?
    } else {
        let default_file = Path::new(DEFAULT_SITES_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_sites_file", file_path = ?default_file, "Loading sites from default file");
            read_sites_file(default_file)?
        } else {
            info!(
                action = "load",
                component = "embedded_sites",
                "Using embedded sample sites"
            );
            parse_sites(embedded_sites()?).context("Failed to parse embedded sample sites")?
        }
    };

    if sites.is_empty() {
        warn!(
            action = "complete",
            component = "site_loading",
            "No tracked sites found"
        );
    }

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "site_loading",
        site_count = sites.len(),
        duration_ms = load_time.as_millis(),
        "Successfully loaded sites"
    );
    Ok(sites)
}

fn read_sites_file(path: &Path) -> Result<Vec<SiteSummary>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    parse_sites(&content).with_context(|| format!("Invalid sites file {:?}", path))
}

fn embedded_sites() -> Result<&'static str> {
    std::str::from_utf8(DEFAULT_SITES_BYTES).context("Failed to decode embedded sample sites")
}

/// Parse a JSON array of tracked sites and check every record.
pub fn parse_sites(content: &str) -> Result<Vec<SiteSummary>> {
    let sites: Vec<SiteSummary> =
        serde_json::from_str(content).context("Failed to parse sites JSON")?;
    for site in &sites {
        validate_site(site)?;
    }
    Ok(sites)
}

pub fn validate_site(site: &SiteSummary) -> Result<()> {
    if site.url.trim().is_empty() {
        anyhow::bail!("Site {} has an empty URL", site.id);
    }
    let parsed = Url::parse(&site.url)
        .with_context(|| format!("Site {} URL is not absolute: {}", site.id, site.url))?;
    if !matches!(parsed.scheme(), "http" | "https") || !is_site_url(&site.url) {
        anyhow::bail!("Site {} URL is not an http(s) site address: {}", site.id, site.url);
    }

    if site.score > 100 {
        anyhow::bail!("Site {} score {} is outside 0-100", site.id, site.score);
    }

    for (engine, rank) in &site.rankings {
        if *rank == 0 {
            anyhow::bail!("Site {} has rank 0 on {}", site.id, engine);
        }
    }

    for item in site.keywords() {
        validate_keyword(site, item)?;
    }
    Ok(())
}

fn validate_keyword(site: &SiteSummary, item: &RankedItem) -> Result<()> {
    if item.rank == 0 {
        anyhow::bail!(
            "Keyword '{}' on {} has rank 0",
            item.keyword,
            site.url
        );
    }
    if item.previous_rank == Some(0) {
        anyhow::bail!(
            "Keyword '{}' on {} has previous rank 0",
            item.keyword,
            site.url
        );
    }
    Ok(())
}

fn site_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://)?([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$").expect("valid site URL regex")
    })
}

/// Whether `url` looks like a web site address, with or without a scheme.
pub fn is_site_url(url: &str) -> bool {
    site_url_pattern().is_match(url.trim())
}

/// Prefix bare hosts such as `example.com` with `https://`.
pub fn normalize_site_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Keyword rankings tracked for `url`, empty when the site is unknown.
/// Bare hosts match their `https://` entry.
pub fn keywords_for_url<'a>(sites: &'a [SiteSummary], url: &str) -> &'a [RankedItem] {
    let url = normalize_site_url(url);
    sites
        .iter()
        .find(|site| site.url == url)
        .map(SiteSummary::keywords)
        .unwrap_or_default()
}

pub fn init_default_fixture() -> Result<()> {
    let default_file = Path::new(DEFAULT_SITES_FILE);

    if default_file.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            DEFAULT_SITES_FILE
        );
    }

    fs::write(default_file, embedded_sites()?)?;
    println!("Created {} with sample sites", DEFAULT_SITES_FILE);

    Ok(())
}
