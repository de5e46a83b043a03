//! Catalog sorting for the browsing views.

use serde::{Deserialize, Serialize};

use crate::catalog::Achievement;
use crate::points::effective_points;

/// Ordering applied to a category before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Catalog order, unchanged.
    #[default]
    Default,
    /// Descending effective points.
    PointsHigh,
    /// Ascending effective points.
    PointsLow,
}

impl SortMode {
    /// Parse a raw form value; unknown input falls back to catalog order.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "points-high" => Self::PointsHigh,
            "points-low" => Self::PointsLow,
            _ => Self::Default,
        }
    }
}

/// Return a sorted copy of the achievements.
///
/// Sorting is stable, so equal effective values keep catalog order, and
/// `Default` restores catalog order regardless of any prior mode.
#[must_use]
pub fn sort_achievements(achievements: &[Achievement], mode: SortMode) -> Vec<Achievement> {
    let mut sorted = achievements.to_vec();
    match mode {
        SortMode::Default => {}
        SortMode::PointsHigh => {
            sorted.sort_by(|a, b| effective_points(b).cmp(&effective_points(a)));
        }
        SortMode::PointsLow => {
            sorted.sort_by_key(effective_points);
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn achievements() -> Vec<Achievement> {
        vec![
            Achievement {
                id: 1,
                title: "Mid".to_string(),
                points: 100,
                ..Achievement::default()
            },
            Achievement {
                id: 2,
                title: "Promoted".to_string(),
                points: 227,
                promoted: true,
                ..Achievement::default()
            },
            Achievement {
                id: 3,
                title: "Low".to_string(),
                points: 50,
                ..Achievement::default()
            },
        ]
    }

    #[test]
    fn points_high_orders_by_effective_value() {
        // The promoted item sorts by its bonus-applied 250, not its base 227.
        let sorted = sort_achievements(&achievements(), SortMode::PointsHigh);
        let order: Vec<u32> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn points_low_orders_ascending() {
        let sorted = sort_achievements(&achievements(), SortMode::PointsLow);
        let order: Vec<u32> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn default_preserves_catalog_order() {
        let sorted = sort_achievements(&achievements(), SortMode::Default);
        let order: Vec<u32> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let tied = vec![
            Achievement {
                id: 1,
                points: 100,
                ..Achievement::default()
            },
            Achievement {
                id: 2,
                points: 100,
                ..Achievement::default()
            },
        ];
        let sorted = sort_achievements(&tied, SortMode::PointsHigh);
        let order: Vec<u32> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn parse_falls_back_to_default() {
        assert_eq!(SortMode::parse("points-high"), SortMode::PointsHigh);
        assert_eq!(SortMode::parse("points-low"), SortMode::PointsLow);
        assert_eq!(SortMode::parse("alphabetical"), SortMode::Default);
    }
}
