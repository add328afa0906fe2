use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search engine name mapped to the rank a site holds there.
pub type EngineRanks = BTreeMap<String, u32>;

/// A keyword (or URL) position tracked over time. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub id: u64,
    pub keyword: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_rank: Option<u32>,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: u64,
    pub url: String,
    pub score: u8,
    #[serde(default)]
    pub rankings: EngineRanks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<RankedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<NaiveDate>,
}

impl SiteSummary {
    /// Tracked keywords, empty when the site has none recorded.
    pub fn keywords(&self) -> &[RankedItem] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Best (lowest) rank across every engine.
    pub fn best_rank(&self) -> Option<u32> {
        self.rankings.values().copied().min()
    }
}
