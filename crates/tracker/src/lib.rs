//! Entity tracking: which abyss entities exist in the current area, and in
//! what order their path is drawn.
//!
//! # Invariants
//! - The draw order is a permutation of the tracked set at the time it is taken.
//! - Removal may come from another thread; every mutation holds the set's lock.
//! - Tracked ids are only meaningful inside one area and are dropped on change.

mod entity;
mod tracker;

pub use entity::{
    is_abyss_category, is_terminal_category, EntitySighting, TrackedEntity, ABYSS_CATEGORY_PREFIX,
    EXCLUDED_CATEGORY, TERMINAL_MARKERS,
};
pub use tracker::{DrawOrder, EntityTracker};

pub fn crate_info() -> &'static str {
    "abysspath-tracker v0.1.0"
}
