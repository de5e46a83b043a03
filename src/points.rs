//! Point valuation rules: promotion bonus and the variable-value formulas.
//!
//! Every displayed or compared point value goes through this module so that
//! sorting, cart totals, and validation agree on what an achievement is
//! worth.

use serde::{Deserialize, Serialize};

use crate::catalog::Achievement;
use crate::numbers::{ceil_f64_to_i32, round_f64_to_i32};

/// Multiplier applied to the base value of promoted achievements.
pub(crate) const PROMOTION_MULTIPLIER: f64 = 1.1;

/// Fraction of a certification's base points granted on renewal.
pub(crate) const RENEWAL_FRACTION: f64 = 0.25;

/// Minimum base points for a certification to qualify for a circle.
pub const CIRCLE_MIN_CERT_POINTS: i32 = 130;

/// Group size of a certification circle. `SevenPlus` covers seven or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircleSize {
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    SevenPlus,
}

impl CircleSize {
    /// Parse a raw form value. Empty or unrecognized input means no size is
    /// selected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "3" => Some(Self::Three),
            "4" => Some(Self::Four),
            "5" => Some(Self::Five),
            "6" => Some(Self::Six),
            "7" => Some(Self::SevenPlus),
            _ => None,
        }
    }

    /// Additive bonus fraction for this group size.
    #[must_use]
    pub const fn bonus(self) -> f64 {
        match self {
            Self::Three => 0.08,
            Self::Four => 0.10,
            Self::Five => 0.13,
            Self::Six => 0.17,
            Self::SevenPlus => 0.22,
        }
    }
}

/// Reservist count in a certification circle. `TwoPlus` covers two or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Reservists {
    #[default]
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    TwoPlus,
}

impl Reservists {
    /// Parse a raw form value, falling back to zero reservists.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self::One,
            "2" => Self::TwoPlus,
            _ => Self::Zero,
        }
    }

    /// Additive bonus fraction for this reservist count.
    #[must_use]
    pub const fn bonus(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::One => 0.05,
            Self::TwoPlus => 0.10,
        }
    }
}

/// Effective point value of an achievement with the promotion bonus applied.
#[must_use]
pub fn effective_points(achievement: &Achievement) -> i32 {
    if achievement.promoted {
        round_f64_to_i32(f64::from(achievement.points) * PROMOTION_MULTIPLIER)
    } else {
        achievement.points
    }
}

/// Renewal value: a quarter of the certification's base points, rounded up.
#[must_use]
pub fn renewal_points(certification_points: i32) -> i32 {
    ceil_f64_to_i32(f64::from(certification_points) * RENEWAL_FRACTION)
}

/// Circle value: the certification's base points scaled by the combined
/// size and reservist bonuses.
#[must_use]
pub fn circle_points(certification_points: i32, size: CircleSize, reservists: Reservists) -> i32 {
    let multiplier = 1.0 + size.bonus() + reservists.bonus();
    round_f64_to_i32(f64::from(certification_points) * multiplier)
}
