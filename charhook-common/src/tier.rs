//! Score tiers and the level classifier
//!
//! A tier is derived from a character's score. Thresholds are evaluated
//! high to low:
//!
//! | score        | tier           |
//! |--------------|----------------|
//! | >= 90        | `légendaire`   |
//! | 75 ..= 89    | `expert`       |
//! | 50 ..= 74    | `intermédiaire`|
//! | < 50         | `débutant`     |
//!
//! Scores are not range-checked: negative scores classify as beginner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Lowest score classified as [`Tier::Legendary`]
pub const LEGENDARY_THRESHOLD: i64 = 90;
/// Lowest score classified as [`Tier::Expert`]
pub const EXPERT_THRESHOLD: i64 = 75;
/// Lowest score classified as [`Tier::Intermediate`]
pub const INTERMEDIATE_THRESHOLD: i64 = 50;

/// Glyph used for levels outside the tier table
pub const DEFAULT_BADGE: &str = "🔶";

/// Discrete level derived from a score
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// the score ordering. On the wire tiers use their French labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "débutant")]
    Beginner,
    #[serde(rename = "intermédiaire")]
    Intermediate,
    #[serde(rename = "expert")]
    Expert,
    #[serde(rename = "légendaire")]
    Legendary,
}

impl Tier {
    /// All tiers, lowest first
    pub const ALL: [Tier; 4] = [
        Tier::Beginner,
        Tier::Intermediate,
        Tier::Expert,
        Tier::Legendary,
    ];

    /// Wire label, as serialized in `niveau`
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Beginner => "débutant",
            Tier::Intermediate => "intermédiaire",
            Tier::Expert => "expert",
            Tier::Legendary => "légendaire",
        }
    }

    /// English name
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Beginner => "beginner",
            Tier::Intermediate => "intermediate",
            Tier::Expert => "expert",
            Tier::Legendary => "legendary",
        }
    }

    /// Decorative badge glyph for this tier
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Beginner => "🔸 DÉBUTANT 🔸",
            Tier::Intermediate => "🔹 INTERMÉDIAIRE 🔹",
            Tier::Expert => "🥇 EXPERT 🥇",
            Tier::Legendary => "⭐⭐⭐ LÉGENDAIRE ⭐⭐⭐",
        }
    }

    /// Badge glyph for an arbitrary level string
    ///
    /// Unknown levels get [`DEFAULT_BADGE`].
    pub fn badge_for(level: &str) -> &'static str {
        level
            .parse::<Tier>()
            .map(|tier| tier.badge())
            .unwrap_or(DEFAULT_BADGE)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = Error;

    /// Accepts the French wire label or the English name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.label() == s || tier.name() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown level: {}", s)))
    }
}

/// Map a score to its tier
///
/// Total function: every `i64` has a tier.
pub fn classify(score: i64) -> Tier {
    if score >= LEGENDARY_THRESHOLD {
        Tier::Legendary
    } else if score >= EXPERT_THRESHOLD {
        Tier::Expert
    } else if score >= INTERMEDIATE_THRESHOLD {
        Tier::Intermediate
    } else {
        Tier::Beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(90), Tier::Legendary);
        assert_eq!(classify(89), Tier::Expert);
        assert_eq!(classify(75), Tier::Expert);
        assert_eq!(classify(74), Tier::Intermediate);
        assert_eq!(classify(50), Tier::Intermediate);
        assert_eq!(classify(49), Tier::Beginner);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(i64::MAX), Tier::Legendary);
        assert_eq!(classify(i64::MIN), Tier::Beginner);
        assert_eq!(classify(-5), Tier::Beginner);
        assert_eq!(classify(0), Tier::Beginner);
        assert_eq!(classify(1000), Tier::Legendary);
    }

    #[test]
    fn test_classify_monotonic() {
        let mut previous = classify(-200);
        for score in -199..=200 {
            let current = classify(score);
            assert!(current >= previous, "tier dropped at score {}", score);
            previous = current;
        }
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(serde_json::to_string(&Tier::Legendary).unwrap(), "\"légendaire\"");
        assert_eq!(serde_json::to_string(&Tier::Intermediate).unwrap(), "\"intermédiaire\"");
        let tier: Tier = serde_json::from_str("\"débutant\"").unwrap();
        assert_eq!(tier, Tier::Beginner);
    }

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!("légendaire".parse::<Tier>().unwrap(), Tier::Legendary);
        assert_eq!("legendary".parse::<Tier>().unwrap(), Tier::Legendary);
        assert_eq!("expert".parse::<Tier>().unwrap(), Tier::Expert);
        assert!("grandmaster".parse::<Tier>().is_err());
    }

    #[test]
    fn test_badge_table() {
        assert_eq!(Tier::badge_for("légendaire"), "⭐⭐⭐ LÉGENDAIRE ⭐⭐⭐");
        assert_eq!(Tier::badge_for("expert"), "🥇 EXPERT 🥇");
        assert_eq!(Tier::badge_for("intermediate"), "🔹 INTERMÉDIAIRE 🔹");
        assert_eq!(Tier::badge_for("débutant"), "🔸 DÉBUTANT 🔸");
        assert_eq!(Tier::badge_for("mystery"), DEFAULT_BADGE);
    }
}
