//! DCR Simulator Engine
//!
//! Platform-agnostic catalog, cart, and level-validation logic for the DCR
//! achievement program. This crate provides every business rule without UI
//! or platform-specific dependencies; the rendering layer drives it through
//! typed commands and reads back accessors and change notifications.

pub mod cart;
pub mod catalog;
pub mod levels;
pub mod numbers;
pub mod points;
pub mod session;
pub mod sort;

// Re-export commonly used types
pub use cart::{Cart, CartItem};
pub use catalog::{Achievement, AchievementKind, Catalog, CatalogError, TECH_CATEGORY};
pub use levels::{
    MANDATORY_ITEMS, MAX_LEVEL, MIN_LEVEL, ValidationResult, missing_mandatory, required_points,
    validate_level,
};
pub use points::{
    CIRCLE_MIN_CERT_POINTS, CircleSize, Reservists, circle_points, effective_points,
    renewal_points,
};
pub use session::{
    CartSummary, ChangeEvent, Command, Outcome, PREVIOUS_LEVEL_POINTS_MAX, Session,
};
pub use sort::{SortMode, sort_achievements};

/// Trait for abstracting catalog loading operations
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the achievement catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Startup wrapper binding a catalog source to fresh sessions.
pub struct SimulatorEngine<L>
where
    L: CatalogSource,
{
    source: L,
}

impl<L> SimulatorEngine<L>
where
    L: CatalogSource,
{
    /// Create a new engine over the provided catalog source.
    pub const fn new(source: L) -> Self {
        Self { source }
    }

    /// Start a session, treating a load failure as a hard startup error.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn try_start_session(&self) -> Result<Session, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let catalog = self.source.load_catalog().map_err(Into::into)?;
        Ok(Session::new(catalog))
    }

    /// Start a session, degrading to an empty catalog when the load fails.
    ///
    /// The failure is logged once; every catalog-dependent operation on the
    /// returned session then resolves to not-found.
    pub fn start_session(&self) -> Session {
        match self.source.load_catalog() {
            Ok(catalog) => Session::new(catalog),
            Err(error) => {
                log::error!("Failed to load achievement catalog: {error}");
                Session::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureSource;

    impl CatalogSource for FixtureSource {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            let catalog = Catalog::from_json(
                r#"{
                    "tech": [
                        { "id": 1, "title": "GCP Architect", "points": 200, "promoted": true }
                    ]
                }"#,
            )
            .unwrap();
            Ok(catalog)
        }
    }

    #[derive(Clone, Copy, Default)]
    struct BrokenSource;

    impl CatalogSource for BrokenSource {
        type Error = std::io::Error;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Err(std::io::Error::other("resource unavailable"))
        }
    }

    #[test]
    fn engine_starts_session_from_source() {
        let engine = SimulatorEngine::new(FixtureSource);
        let mut session = engine.try_start_session().unwrap();
        let outcome = session.apply(Command::AddToCart { id: 1 });
        assert!(outcome.changed());
        assert_eq!(session.cart().total_points(), 220);
    }

    #[test]
    fn load_failure_degrades_to_empty_catalog() {
        let engine = SimulatorEngine::new(BrokenSource);
        assert!(engine.try_start_session().is_err());

        let mut session = engine.start_session();
        assert!(session.catalog().is_empty());
        let outcome = session.apply(Command::AddToCart { id: 1 });
        assert!(!outcome.changed());
        assert!(session.cart().is_empty());
    }
}
