//! Session state and the typed command interface driven by the rendering
//! layer.
//!
//! All user actions arrive as [`Command`] values; the session mutates
//! catalog and cart fully, then reports what changed through the returned
//! [`Outcome`] so dependent displays can refresh. Unknown ids, kind
//! mismatches, and malformed form input degrade to defined defaults rather
//! than erroring.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::catalog::{Achievement, AchievementKind, Catalog};
use crate::levels::{ValidationResult, required_points, validate_level};
use crate::points::{
    CIRCLE_MIN_CERT_POINTS, CircleSize, Reservists, circle_points, renewal_points,
};
use crate::sort::{SortMode, sort_achievements};

/// Upper bound for the user-editable previous-level points field.
pub const PREVIOUS_LEVEL_POINTS_MAX: i32 = 2000;

/// A typed user action processed by [`Session::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddToCart {
        id: u32,
    },
    RemoveFromCart {
        id: u32,
    },
    ClearCart,
    SetSortMode {
        mode: SortMode,
    },
    /// Select the target level for validation; `None` clears the selection.
    SelectLevel {
        level: Option<u8>,
    },
    /// Raw form value for the editable previous-level points field.
    SetPreviousLevelPoints {
        id: u32,
        raw: String,
    },
    /// Choose (or clear) the certification backing a renewal achievement.
    SelectRenewalCertification {
        id: u32,
        certification: Option<u32>,
    },
    /// Set the full configuration of a certification circle at once.
    ConfigureCircle {
        id: u32,
        certification: Option<u32>,
        size: Option<CircleSize>,
        reservists: Reservists,
    },
    /// Resolve a missing mandatory item by title and add it to the cart.
    QuickAddMandatory {
        name: String,
    },
}

/// Which piece of session state a command touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    CartChanged,
    CatalogChanged,
    SortModeChanged,
    LevelSelectionChanged,
}

/// Result of applying a command: the change notifications for dependent
/// displays plus the refreshed validation when a level is selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub changes: Vec<ChangeEvent>,
    pub validation: Option<ValidationResult>,
}

impl Outcome {
    /// Whether the command changed any session state.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }

    fn record(&mut self, event: ChangeEvent) {
        if !self.changes.contains(&event) {
            self.changes.push(event);
        }
    }
}

/// Item count and total points shown next to the simulator menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: usize,
    pub total_points: i32,
}

/// Owns all simulator state for one browsing session.
///
/// Constructed at startup from the loaded catalog, passed by reference to
/// every operation, and dropped at session end; nothing persists. All
/// execution is single-threaded and synchronous: each command runs to
/// completion, mutating state fully before its notifications are produced.
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    sort_mode: SortMode,
    selected_level: Option<u8>,
    last_validation: ValidationResult,
}

impl Session {
    /// Start a session over a loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Degraded-mode session: every catalog-dependent operation resolves to
    /// not-found.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The underlying catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current sort mode for the browsing views.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Currently selected target level, if any.
    #[must_use]
    pub const fn selected_level(&self) -> Option<u8> {
        self.selected_level
    }

    /// Result of the most recent validation.
    #[must_use]
    pub const fn last_validation(&self) -> &ValidationResult {
        &self.last_validation
    }

    /// Menu badge data; `None` while the cart is empty.
    #[must_use]
    pub fn cart_summary(&self) -> Option<CartSummary> {
        if self.cart.is_empty() {
            return None;
        }
        Some(CartSummary {
            item_count: self.cart.len(),
            total_points: self.cart.total_points(),
        })
    }

    /// A category's achievements under the current sort mode.
    /// Unknown categories yield an empty list.
    #[must_use]
    pub fn sorted_category(&self, name: &str) -> Vec<Achievement> {
        self.catalog
            .category(name)
            .map(|achievements| sort_achievements(achievements, self.sort_mode))
            .unwrap_or_default()
    }

    /// Promoted achievements catalog-wide, for the highlights carousel.
    #[must_use]
    pub fn promoted_achievements(&self) -> Vec<&Achievement> {
        self.catalog.promoted()
    }

    /// Cart items in insertion order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Process one user action, returning what changed and, when a level is
    /// selected, the refreshed validation result.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let mut outcome = Outcome::default();
        let level_command = matches!(command, Command::SelectLevel { .. });
        match command {
            Command::AddToCart { id } => self.add_to_cart(id, &mut outcome),
            Command::RemoveFromCart { id } => {
                if self.cart.remove(id) {
                    outcome.record(ChangeEvent::CartChanged);
                }
            }
            Command::ClearCart => {
                if !self.cart.is_empty() {
                    outcome.record(ChangeEvent::CartChanged);
                }
                self.cart.clear();
            }
            Command::SetSortMode { mode } => {
                if self.sort_mode != mode {
                    self.sort_mode = mode;
                    outcome.record(ChangeEvent::SortModeChanged);
                }
            }
            Command::SelectLevel { level } => {
                let level = level.filter(|candidate| required_points(*candidate).is_some());
                if self.selected_level != level {
                    self.selected_level = level;
                    outcome.record(ChangeEvent::LevelSelectionChanged);
                }
            }
            Command::SetPreviousLevelPoints { id, raw } => {
                self.set_previous_level_points(id, &raw, &mut outcome);
            }
            Command::SelectRenewalCertification { id, certification } => {
                self.select_renewal_certification(id, certification, &mut outcome);
            }
            Command::ConfigureCircle {
                id,
                certification,
                size,
                reservists,
            } => {
                self.configure_circle(id, certification, size, reservists, &mut outcome);
            }
            Command::QuickAddMandatory { name } => {
                if let Some(id) = self.catalog.find_by_title(&name).map(|found| found.id) {
                    self.add_to_cart(id, &mut outcome);
                }
            }
        }

        if outcome.changed() || level_command {
            self.last_validation = validate_level(self.selected_level, &self.cart);
            if self.selected_level.is_some() || level_command {
                outcome.validation = Some(self.last_validation.clone());
            }
        }
        outcome
    }

    fn add_to_cart(&mut self, id: u32, outcome: &mut Outcome) {
        let Some(achievement) = self.catalog.find(id) else {
            return;
        };
        if self.cart.add(achievement) {
            outcome.record(ChangeEvent::CartChanged);
        }
    }

    fn set_previous_level_points(&mut self, id: u32, raw: &str, outcome: &mut Outcome) {
        let value = parse_points_input(raw);
        let Some(achievement) = self.catalog.find_mut(id) else {
            return;
        };
        if achievement.kind != AchievementKind::PreviousLevelPoints {
            return;
        }
        if achievement.points != value {
            achievement.points = value;
            outcome.record(ChangeEvent::CatalogChanged);
        }
        if let Some(item) = self.cart.find_mut(id)
            && item.points != value
        {
            item.points = value;
            outcome.record(ChangeEvent::CartChanged);
        }
    }

    fn select_renewal_certification(
        &mut self,
        id: u32,
        certification: Option<u32>,
        outcome: &mut Outcome,
    ) {
        // An unresolvable certification id counts as a cleared selection.
        let resolved = certification.and_then(|cert_id| {
            self.catalog
                .tech_certifications()
                .iter()
                .find(|cert| cert.id == cert_id)
                .map(|cert| (cert.id, renewal_points(cert.points)))
        });
        let (selection, points) = resolved.map_or((None, 0), |(cert_id, value)| {
            (Some(cert_id), value)
        });

        let Some(achievement) = self.catalog.find_mut(id) else {
            return;
        };
        if achievement.kind != AchievementKind::CertificationRenewal {
            return;
        }
        if achievement.selected_certification != selection || achievement.points != points {
            achievement.selected_certification = selection;
            achievement.points = points;
            outcome.record(ChangeEvent::CatalogChanged);
        }
        if let Some(item) = self.cart.find_mut(id)
            && (item.selected_certification != selection || item.points != points)
        {
            item.selected_certification = selection;
            item.points = points;
            outcome.record(ChangeEvent::CartChanged);
        }
    }

    fn configure_circle(
        &mut self,
        id: u32,
        certification: Option<u32>,
        size: Option<CircleSize>,
        reservists: Reservists,
        outcome: &mut Outcome,
    ) {
        // Only high-value tech certifications qualify for a circle.
        let base = certification.and_then(|cert_id| {
            self.catalog
                .tech_certifications()
                .iter()
                .find(|cert| cert.id == cert_id && cert.points >= CIRCLE_MIN_CERT_POINTS)
                .map(|cert| (cert.id, cert.points))
        });
        // The value is defined only when both certification and size are set.
        let (selection, points) = match (base, size) {
            (Some((cert_id, base_points)), Some(selected_size)) => (
                Some(cert_id),
                circle_points(base_points, selected_size, reservists),
            ),
            (Some((cert_id, _)), None) => (Some(cert_id), 0),
            (None, _) => (None, 0),
        };

        let Some(achievement) = self.catalog.find_mut(id) else {
            return;
        };
        if achievement.kind != AchievementKind::CertificationCircle {
            return;
        }
        if achievement.selected_certification != selection
            || achievement.circle_size != size
            || achievement.reservists != reservists
            || achievement.points != points
        {
            achievement.selected_certification = selection;
            achievement.circle_size = size;
            achievement.reservists = reservists;
            achievement.points = points;
            outcome.record(ChangeEvent::CatalogChanged);
        }
        if let Some(item) = self.cart.find_mut(id)
            && (item.selected_certification != selection
                || item.circle_size != size
                || item.reservists != reservists
                || item.points != points)
        {
            item.selected_certification = selection;
            item.circle_size = size;
            item.reservists = reservists;
            item.points = points;
            outcome.record(ChangeEvent::CartChanged);
        }
    }
}

/// Coerce a raw form value into the previous-level points domain.
/// Non-numeric or empty input becomes 0; the result is clamped to
/// `[0, PREVIOUS_LEVEL_POINTS_MAX]`.
fn parse_points_input(raw: &str) -> i32 {
    raw.trim()
        .parse::<i32>()
        .unwrap_or(0)
        .clamp(0, PREVIOUS_LEVEL_POINTS_MAX)
}
