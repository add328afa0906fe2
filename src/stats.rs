use serde::Serialize;
use std::collections::HashMap;

use crate::delta::{compute_rank_delta, RankDirection};
use crate::model::SiteSummary;

/// Default length of every top-N table.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteScore {
    pub url: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteKeywordCount {
    pub url: String,
    pub count: usize,
}

/// Rank movement of every tracked keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeywordMovement {
    pub improved: usize,
    pub declined: usize,
    pub unchanged: usize,
    pub untracked: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_sites: usize,
    pub average_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_ranking: Option<u32>,
    pub total_keywords: usize,
    pub top_keywords: Vec<KeywordCount>,
    pub top_sites_by_score: Vec<SiteScore>,
    pub sites_by_keyword_count: Vec<SiteKeywordCount>,
    pub movement: KeywordMovement,
}

pub fn aggregate(sites: &[SiteSummary]) -> AggregateStats {
    aggregate_with_limit(sites, DEFAULT_TOP_N)
}

pub fn aggregate_with_limit(sites: &[SiteSummary], top_n: usize) -> AggregateStats {
    let total_sites = sites.len();
    let best_ranking = sites.iter().filter_map(SiteSummary::best_rank).min();
    let total_keywords = sites.iter().map(|site| site.keywords().len()).sum();

    let mut top_sites_by_score: Vec<SiteScore> = sites
        .iter()
        .map(|site| SiteScore {
            url: site.url.clone(),
            score: site.score,
        })
        .collect();
    // sort_by is stable, so equal scores keep input order
    top_sites_by_score.sort_by(|a, b| b.score.cmp(&a.score));
    top_sites_by_score.truncate(top_n);

    AggregateStats {
        total_sites,
        average_score: average_score(sites),
        best_ranking,
        total_keywords,
        top_keywords: keyword_frequencies(sites, top_n),
        top_sites_by_score,
        sites_by_keyword_count: keyword_counts_by_url(sites, top_n),
        movement: keyword_movement(sites),
    }
}

/// Mean score rounded to the nearest integer, halves rounding up.
fn average_score(sites: &[SiteSummary]) -> u32 {
    if sites.is_empty() {
        return 0;
    }
    let total: u64 = sites.iter().map(|site| u64::from(site.score)).sum();
    let count = sites.len() as u64;
    ((2 * total + count) / (2 * count)) as u32
}

fn keyword_frequencies(sites: &[SiteSummary], top_n: usize) -> Vec<KeywordCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for item in sites.iter().flat_map(|site| site.keywords()) {
        match positions.get(item.keyword.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(&item.keyword, counts.len());
                counts.push(KeywordCount {
                    keyword: item.keyword.clone(),
                    count: 1,
                });
            }
        }
    }

    // counts is in first-seen order; the stable sort keeps it for ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

/// One row per distinct URL. A repeated URL keeps its first position and
/// takes the keyword count of its last record.
fn keyword_counts_by_url(sites: &[SiteSummary], top_n: usize) -> Vec<SiteKeywordCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SiteKeywordCount> = Vec::new();

    for site in sites {
        let count = site.keywords().len();
        match positions.get(site.url.as_str()) {
            Some(&idx) => counts[idx].count = count,
            None => {
                positions.insert(&site.url, counts.len());
                counts.push(SiteKeywordCount {
                    url: site.url.clone(),
                    count,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

fn keyword_movement(sites: &[SiteSummary]) -> KeywordMovement {
    sites
        .iter()
        .flat_map(|site| site.keywords())
        .map(|item| compute_rank_delta(item.rank, item.previous_rank))
        .fold(KeywordMovement::default(), |mut acc, delta| {
            match delta.direction {
                RankDirection::Improved => acc.improved += 1,
                RankDirection::Declined => acc.declined += 1,
                RankDirection::None if delta.is_untracked() => acc.untracked += 1,
                RankDirection::None => acc.unchanged += 1,
            }
            acc
        })
}
