//! Level requirements, mandatory items, and cart validation.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Lowest selectable target level.
pub const MIN_LEVEL: u8 = 1;
/// Highest selectable target level.
pub const MAX_LEVEL: u8 = 10;

/// Point threshold per level, indexed by `level - 1`.
/// Monotonically non-decreasing.
const LEVEL_REQUIREMENTS: [i32; 10] = [850, 850, 1000, 1000, 1200, 1200, 1500, 1500, 1700, 1700];

/// Title substrings that must appear in every valid cart, matched
/// case-insensitively.
pub const MANDATORY_ITEMS: [&str; 2] = ["Billable hours", "Weekly Reports"];

/// Points required to reach a level, or `None` for out-of-range levels.
#[must_use]
pub fn required_points(level: u8) -> Option<i32> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        LEVEL_REQUIREMENTS.get(usize::from(level) - 1).copied()
    } else {
        None
    }
}

/// Outcome of checking the cart against a target level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ValidationResult {
    /// No level selected; nothing to evaluate.
    #[default]
    NotEvaluated,
    /// All requirements met.
    Passed {
        level: u8,
        required: i32,
        current: i32,
        /// Points beyond the requirement, always >= 0.
        surplus: i32,
    },
    /// Point shortfall and missing mandatory items are reported together,
    /// never short-circuited.
    Failed {
        level: u8,
        required: i32,
        current: i32,
        /// Points still needed; 0 when only mandatory items are missing.
        shortfall: i32,
        missing_mandatory: Vec<String>,
    },
}

impl ValidationResult {
    /// Whether every requirement was met.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Mandatory item names absent from the cart, empty unless failed.
    #[must_use]
    pub fn missing_mandatory(&self) -> &[String] {
        match self {
            Self::Failed {
                missing_mandatory, ..
            } => missing_mandatory,
            _ => &[],
        }
    }
}

/// Mandatory item names with no case-insensitive match among cart titles.
#[must_use]
pub fn missing_mandatory(cart: &Cart) -> Vec<String> {
    MANDATORY_ITEMS
        .iter()
        .filter(|mandatory| {
            let needle = mandatory.to_lowercase();
            !cart
                .items()
                .iter()
                .any(|item| item.title.to_lowercase().contains(&needle))
        })
        .map(|mandatory| (*mandatory).to_string())
        .collect()
}

/// Validate the cart against a target level.
///
/// `None` (no level selected) and out-of-range levels yield
/// [`ValidationResult::NotEvaluated`], distinct from pass or fail.
#[must_use]
pub fn validate_level(level: Option<u8>, cart: &Cart) -> ValidationResult {
    let Some(level) = level else {
        return ValidationResult::NotEvaluated;
    };
    let Some(required) = required_points(level) else {
        return ValidationResult::NotEvaluated;
    };
    let current = cart.total_points();
    let missing = missing_mandatory(cart);
    if current >= required && missing.is_empty() {
        ValidationResult::Passed {
            level,
            required,
            current,
            surplus: current - required,
        }
    } else {
        ValidationResult::Failed {
            level,
            required,
            current,
            shortfall: (required - current).max(0),
            missing_mandatory: missing,
        }
    }
}
