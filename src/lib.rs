pub mod args;
pub mod delta;
pub mod fixtures;
pub mod model;
pub mod report;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use delta::{compute_rank_delta, RankDelta, RankDirection, ScoreBand, Tone};
pub use fixtures::{init_default_fixture, load_sites};
pub use model::{EngineRanks, RankedItem, SiteSummary};
pub use stats::{aggregate, aggregate_with_limit, AggregateStats, KeywordCount, SiteScore};
