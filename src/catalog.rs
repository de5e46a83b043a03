//! Achievement catalog: categories, lookups, and load-time validation.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::points::{CircleSize, Reservists};

/// Name of the category holding the certifications eligible for renewal and
/// circle selection.
pub const TECH_CATEGORY: &str = "tech";

/// Behavior discriminant for an achievement.
///
/// Keeps titles free-text for display: renaming an achievement never
/// changes how its value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementKind {
    /// Fixed point value, no extra inputs.
    #[default]
    Standard,
    /// User-editable point value carried over from the previous level.
    PreviousLevelPoints,
    /// Worth a quarter of a selected certification's base points.
    CertificationRenewal,
    /// Worth a selected certification's points scaled by group-size and
    /// reservist bonuses.
    CertificationCircle,
}

/// A single earnable catalog entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u32,
    pub title: String,
    /// Base point value; mutable for the variable-value kinds.
    pub points: i32,
    #[serde(default)]
    pub kind: AchievementKind,
    /// Carries a 10% point bonus when set.
    #[serde(default)]
    pub promoted: bool,
    /// Display-only flag; the validation rules match by title instead.
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Chosen certification for the renewal and circle kinds.
    #[serde(default)]
    pub selected_certification: Option<u32>,
    #[serde(default)]
    pub circle_size: Option<CircleSize>,
    #[serde(default)]
    pub reservists: Reservists,
}

/// Errors raised when catalog data violates load-time invariants.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("failed to parse catalog JSON: {0}")]
    Parse(String),
    #[error("duplicate achievement id {id} in categories '{first}' and '{second}'")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },
}

/// Read-only-by-default mapping from category name to an ordered sequence
/// of achievements.
///
/// Categories iterate in sorted name order so catalog-wide lookups stay
/// deterministic. Achievement ids are unique catalog-wide; duplicates are
/// rejected at load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: BTreeMap<String, Vec<Achievement>>,
}

impl Catalog {
    /// Create an empty catalog (degraded mode, also useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON mapping of category name to achievements.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or an achievement id
    /// appears more than once across the whole catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let categories: BTreeMap<String, Vec<Achievement>> =
            serde_json::from_str(json).map_err(|error| CatalogError::Parse(error.to_string()))?;
        Self::from_categories(categories)
    }

    /// Build a catalog from pre-parsed categories, enforcing id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if an achievement id appears more than once.
    pub fn from_categories(
        categories: BTreeMap<String, Vec<Achievement>>,
    ) -> Result<Self, CatalogError> {
        let mut seen: HashMap<u32, &str> = HashMap::new();
        for (name, achievements) in &categories {
            for achievement in achievements {
                if let Some(first) = seen.insert(achievement.id, name) {
                    return Err(CatalogError::DuplicateId {
                        id: achievement.id,
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
            }
        }
        Ok(Self { categories })
    }

    /// Whether the catalog holds no achievements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }

    /// Iterate categories in sorted name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Achievement])> {
        self.categories
            .iter()
            .map(|(name, achievements)| (name.as_str(), achievements.as_slice()))
    }

    /// Achievements of one category, in catalog order.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&[Achievement]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Find an achievement by id across all categories.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Achievement> {
        self.categories
            .values()
            .flatten()
            .find(|achievement| achievement.id == id)
    }

    /// Find a mutable achievement by id across all categories.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut Achievement> {
        self.categories
            .values_mut()
            .flatten()
            .find(|achievement| achievement.id == id)
    }

    /// First achievement whose title contains the given substring,
    /// case-insensitively, in category iteration order.
    #[must_use]
    pub fn find_by_title(&self, needle: &str) -> Option<&Achievement> {
        let needle = needle.to_lowercase();
        self.categories
            .values()
            .flatten()
            .find(|achievement| achievement.title.to_lowercase().contains(&needle))
    }

    /// The certification pool offered for renewal selection.
    #[must_use]
    pub fn tech_certifications(&self) -> &[Achievement] {
        self.category(TECH_CATEGORY).unwrap_or(&[])
    }

    /// Certifications eligible for a certification circle.
    #[must_use]
    pub fn circle_certifications(&self) -> Vec<&Achievement> {
        self.tech_certifications()
            .iter()
            .filter(|cert| cert.points >= crate::points::CIRCLE_MIN_CERT_POINTS)
            .collect()
    }

    /// Every promoted achievement catalog-wide, in category iteration order.
    #[must_use]
    pub fn promoted(&self) -> Vec<&Achievement> {
        self.categories
            .values()
            .flatten()
            .filter(|achievement| achievement.promoted)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_category_json() -> &'static str {
        r#"{
            "tech": [
                { "id": 10, "title": "GCP Architect", "points": 200, "promoted": true },
                { "id": 11, "title": "Terraform Associate", "points": 100 }
            ],
            "extra": [
                { "id": 40, "title": "Certification renewal", "points": 0, "kind": "certification-renewal" }
            ]
        }"#
    }

    #[test]
    fn loads_categories_and_defaults_optional_fields() {
        let catalog = Catalog::from_json(two_category_json()).unwrap();
        let cert = catalog.find(10).unwrap();
        assert!(cert.promoted);
        assert!(!cert.mandatory);
        assert_eq!(cert.kind, AchievementKind::Standard);
        assert_eq!(cert.selected_certification, None);
        let renewal = catalog.find(40).unwrap();
        assert_eq!(renewal.kind, AchievementKind::CertificationRenewal);
    }

    #[test]
    fn duplicate_ids_are_rejected_at_load() {
        let json = r#"{
            "tech": [{ "id": 7, "title": "A", "points": 10 }],
            "extra": [{ "id": 7, "title": "B", "points": 20 }]
        }"#;
        let error = Catalog::from_json(json).unwrap_err();
        assert_eq!(
            error,
            CatalogError::DuplicateId {
                id: 7,
                first: "extra".to_string(),
                second: "tech".to_string(),
            }
        );
    }

    #[test]
    fn title_lookup_is_case_insensitive_substring() {
        let catalog = Catalog::from_json(two_category_json()).unwrap();
        assert_eq!(catalog.find_by_title("terraform").unwrap().id, 11);
        assert_eq!(catalog.find_by_title("RENEWAL").unwrap().id, 40);
        assert!(catalog.find_by_title("kubernetes").is_none());
    }

    #[test]
    fn circle_pool_filters_low_value_certifications() {
        let catalog = Catalog::from_json(two_category_json()).unwrap();
        let eligible: Vec<u32> = catalog
            .circle_certifications()
            .iter()
            .map(|cert| cert.id)
            .collect();
        assert_eq!(eligible, vec![10]);
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.find(1).is_none());
        assert!(catalog.tech_certifications().is_empty());
    }
}
