//! Final tier classification.
//!
//! Maps a total score to a named tier with its display color, message and
//! badge. Thresholds are inclusive lower bounds checked highest-first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum score for the Gold tier.
pub const GOLD_THRESHOLD: i64 = 36;
/// Minimum score for the Silver tier.
pub const SILVER_THRESHOLD: i64 = 21;

/// The three result tiers, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// All tiers, highest first (evaluation order).
    pub const ALL: [Tier; 3] = [Tier::Gold, Tier::Silver, Tier::Bronze];

    /// Inclusive lower bound, or `None` for the catch-all Bronze tier.
    pub fn threshold(self) -> Option<i64> {
        match self {
            Tier::Gold => Some(GOLD_THRESHOLD),
            Tier::Silver => Some(SILVER_THRESHOLD),
            Tier::Bronze => None,
        }
    }

    /// Hex display color.
    pub fn color(self) -> &'static str {
        match self {
            Tier::Gold => "#D4AF37",
            Tier::Silver => "#C0C0C0",
            Tier::Bronze => "#cd7f32",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Gold => "Excellent! You have mastered digital safety.",
            Tier::Silver => "Very good! You have solid digital safety habits.",
            Tier::Bronze => "Careful! You need to improve to protect yourself against scams.",
        }
    }

    /// Badge image reference.
    pub fn badge(self) -> &'static str {
        match self {
            Tier::Gold => "img/medalhaouro.png",
            Tier::Silver => "img/medalhaprata.png",
            Tier::Bronze => "img/medalhabronze.png",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Gold => write!(f, "Gold"),
            Tier::Silver => write!(f, "Silver"),
            Tier::Bronze => write!(f, "Bronze"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" => Ok(Tier::Gold),
            "silver" => Ok(Tier::Silver),
            "bronze" => Ok(Tier::Bronze),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// Everything the summary screen needs to present a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierResult {
    pub tier: Tier,
    pub color: String,
    pub message: String,
    pub badge: String,
}

impl From<Tier> for TierResult {
    fn from(tier: Tier) -> Self {
        Self {
            tier,
            color: tier.color().to_string(),
            message: tier.message().to_string(),
            badge: tier.badge().to_string(),
        }
    }
}

/// Pick the tier for a score. Negative scores fall through to Bronze.
pub fn tier_for(score: i64) -> Tier {
    Tier::ALL
        .into_iter()
        .find(|t| t.threshold().is_some_and(|min| score >= min))
        .unwrap_or(Tier::Bronze)
}

/// Classify a total score into its full tier result.
///
/// Thresholds are inclusive lower bounds, so 35 is Silver and 36 is Gold.
pub fn classify(score: i64) -> TierResult {
    TierResult::from(tier_for(score))
}
