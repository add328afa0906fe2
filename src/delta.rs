//! Rank-change and score descriptors shared by every view.
//!
//! Lower ranks are better, so a rank going from 5 to 3 is an improvement.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    Improved,
    Declined,
    None,
}

/// How a delta should be colored when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankDelta {
    pub direction: RankDirection,
    pub magnitude: u32,
    /// Rank the comparison was made against. `None` means the item has no history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u32>,
}

pub fn compute_rank_delta(current: u32, previous: Option<u32>) -> RankDelta {
    let Some(prev) = previous else {
        return RankDelta {
            direction: RankDirection::None,
            magnitude: 0,
            previous: None,
        };
    };

    let direction = match current.cmp(&prev) {
        std::cmp::Ordering::Less => RankDirection::Improved,
        std::cmp::Ordering::Greater => RankDirection::Declined,
        std::cmp::Ordering::Equal => RankDirection::None,
    };

    RankDelta {
        direction,
        magnitude: current.abs_diff(prev),
        previous: Some(prev),
    }
}

impl RankDelta {
    /// True when there was no previous rank to compare against.
    pub fn is_untracked(&self) -> bool {
        self.previous.is_none()
    }

    pub fn arrow(&self) -> &'static str {
        match self.direction {
            RankDirection::Improved => "↑",
            RankDirection::Declined => "↓",
            RankDirection::None => "–",
        }
    }

    pub fn tone(&self) -> Tone {
        match self.direction {
            RankDirection::Improved => Tone::Positive,
            RankDirection::Declined => Tone::Negative,
            RankDirection::None => Tone::Neutral,
        }
    }

    /// `"(n)"` for a non-zero change, empty otherwise.
    pub fn difference_label(&self) -> String {
        if self.magnitude > 0 {
            format!("({})", self.magnitude)
        } else {
            String::new()
        }
    }
}

impl fmt::Display for RankDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.difference_label();
        if label.is_empty() {
            write!(f, "{}", self.arrow())
        } else {
            write!(f, "{} {}", self.arrow(), label)
        }
    }
}

/// Quality band of an SEO score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ScoreBand::Good => Tone::Positive,
            ScoreBand::Fair => Tone::Neutral,
            ScoreBand::Poor => Tone::Negative,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ranks_are_unchanged() {
        for rank in [1, 7, 100] {
            let delta = compute_rank_delta(rank, Some(rank));
            assert_eq!(delta.direction, RankDirection::None);
            assert_eq!(delta.magnitude, 0);
            assert!(!delta.is_untracked());
        }
    }

    #[test]
    fn missing_previous_is_untracked() {
        let delta = compute_rank_delta(4, None);
        assert_eq!(delta.direction, RankDirection::None);
        assert_eq!(delta.magnitude, 0);
        assert!(delta.is_untracked());
        assert_eq!(delta.difference_label(), "");
    }

    #[test]
    fn lower_rank_is_improvement() {
        let delta = compute_rank_delta(3, Some(5));
        assert_eq!(delta.direction, RankDirection::Improved);
        assert_eq!(delta.magnitude, 2);
        assert_eq!(delta.arrow(), "↑");
        assert_eq!(delta.tone(), Tone::Positive);
        assert_eq!(delta.to_string(), "↑ (2)");
    }

    #[test]
    fn higher_rank_is_decline() {
        let delta = compute_rank_delta(16, Some(12));
        assert_eq!(delta.direction, RankDirection::Declined);
        assert_eq!(delta.magnitude, 4);
        assert_eq!(delta.tone(), Tone::Negative);
        assert_eq!(delta.to_string(), "↓ (4)");
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }
}
