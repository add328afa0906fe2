use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};

use serptrack::{fixtures, report, utils, Args};

fn run(args: &Args) -> Result<()> {
    let sites = fixtures::load_sites(args.sites.as_deref())?;
    let now = Utc::now();

    if let Some(url) = &args.url {
        let url = fixtures::normalize_site_url(url);
        let keywords = fixtures::keywords_for_url(&sites, &url);
        info!(action = "lookup", component = "keyword_view", url = %url, keyword_count = keywords.len(), "Resolved site keywords");
        let keyword_report = report::build_keyword_report(&url, keywords, now);

        if let Some(dir) = &args.report {
            let path = report::write_keyword_report(&keyword_report, dir)?;
            eprintln!("Report written to {}", path.display());
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(&keyword_report)?);
        } else {
            report::print_keyword_report(&keyword_report, args.redact);
        }
        return Ok(());
    }

    let full_report = report::build_report(&sites, args.top, now);

    if let Some(dir) = &args.report {
        let path = report::write_report(&full_report, dir)?;
        eprintln!("Report written to {}", path.display());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&full_report)?);
    } else {
        report::print_report(&full_report, args.redact);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.init {
        return fixtures::init_default_fixture();
    }

    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Ranking summary failed");
            Err(e)
        }
    }
}
