//! Cart state: selected achievement copies and aggregate totals.

use serde::{Deserialize, Serialize};

use crate::catalog::{Achievement, AchievementKind};
use crate::points::{CircleSize, Reservists, effective_points};

/// A snapshot of an achievement taken at the moment it was added.
///
/// Promoted items lock the bonus-applied value into `points` at add time.
/// Later catalog edits reach an existing cart item only through the
/// explicit variable-value update commands, which write both sides in
/// lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub title: String,
    pub points: i32,
    pub promoted: bool,
    pub kind: AchievementKind,
    pub icon: String,
    pub provider: Option<String>,
    pub selected_certification: Option<u32>,
    pub circle_size: Option<CircleSize>,
    pub reservists: Reservists,
}

impl CartItem {
    /// Copy an achievement into the cart, locking in the promotion bonus.
    #[must_use]
    pub fn from_achievement(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id,
            title: achievement.title.clone(),
            points: effective_points(achievement),
            promoted: achievement.promoted,
            kind: achievement.kind,
            icon: achievement.icon.clone(),
            provider: achievement.provider.clone(),
            selected_certification: achievement.selected_certification,
            circle_size: achievement.circle_size,
            reservists: achievement.reservists,
        }
    }
}

/// Ordered selection of achievements; insertion order is display order.
///
/// Holds at most one item per achievement id. Fully transient: lost at
/// session end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an item with the given id is in the cart.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Find a cart item by achievement id.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find a mutable cart item by achievement id.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append a copy of the achievement to the cart.
    ///
    /// Idempotent: an id already present leaves the cart unchanged.
    /// Returns whether the cart changed.
    pub fn add(&mut self, achievement: &Achievement) -> bool {
        if self.contains(achievement.id) {
            return false;
        }
        self.items.push(CartItem::from_achievement(achievement));
        true
    }

    /// Remove the item with the given id; no-op when absent.
    /// Returns whether the cart changed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of stored item points. Promoted items already carry the locked-in
    /// bonus value.
    #[must_use]
    pub fn total_points(&self) -> i32 {
        self.items.iter().map(|item| item.points).sum()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}
