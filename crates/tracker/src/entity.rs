use abysspath_common::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Metadata path shared by every abyss path object.
pub const ABYSS_CATEGORY_PREFIX: &str = "Metadata/MiscellaneousObjects/Abyss/";

/// Small side nodes that are not part of the main path.
pub const EXCLUDED_CATEGORY: &str = "Metadata/MiscellaneousObjects/Abyss/AbyssNodeMini";

/// Substrings marking the last node of a path.
pub const TERMINAL_MARKERS: [&str; 2] = ["Final", "End"];

/// Whether an entity with this category belongs on the path.
pub fn is_abyss_category(category: &str) -> bool {
    category.starts_with(ABYSS_CATEGORY_PREFIX) && category != EXCLUDED_CATEGORY
}

/// Whether this category ends a path.
pub fn is_terminal_category(category: &str) -> bool {
    TERMINAL_MARKERS.iter().any(|m| category.contains(m))
}

/// An "entity appeared" notification from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySighting {
    pub id: EntityId,
    pub category: String,
    #[serde(default)]
    pub grid: Vec2,
}

impl EntitySighting {
    pub fn new(id: u64, category: impl Into<String>, grid: Vec2) -> Self {
        Self {
            id: EntityId(id),
            category: category.into(),
            grid,
        }
    }
}

/// An abyss entity the overlay is following.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub category: String,
    /// Grid position; the origin means the host has not resolved it yet.
    pub grid: Vec2,
}

impl TrackedEntity {
    pub fn is_terminal(&self) -> bool {
        is_terminal_category(&self.category)
    }

    pub fn has_position(&self) -> bool {
        self.grid != Vec2::ZERO
    }

    /// Grid-space distance to another entity.
    pub fn distance(&self, other: &TrackedEntity) -> f32 {
        self.grid.distance(other.grid)
    }
}

impl From<EntitySighting> for TrackedEntity {
    fn from(s: EntitySighting) -> Self {
        Self {
            id: s.id,
            category: s.category,
            grid: s.grid,
        }
    }
}
