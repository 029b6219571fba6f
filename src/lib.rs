//! # wikibox - Variant-Aware Infobox Field Resolution
//!
//! A resolution core for flattened wiki infobox records that encode
//! multiple "variants" (versions/forms) of one real-world object in a
//! single key→value template:
//! - **Deterministic** variant identification (lowest slot wins)
//! - **Total** field resolution (defaults, never errors)
//! - **OR-style** fallback (falsy variant values yield to defaults)
//! - **Pure** projections (no state between resolutions)
//!
//! ## Core Concepts
//!
//! ### Resolution Pipeline
//!
//! Every resolution is a pure function of one record and one id:
//!
//! ```text
//! [AttributeBox] + instance id → [VariantSlot?] → field lookups → projection
//! ```
//!
//! 1. **Variant resolution** decides which of the eight suffixed field
//!    sets (`name1`..`name8`, `id1`..`id8`, ...) the instance id
//!    belongs to, using one of two identifier conventions detected
//!    per record
//! 2. **Field resolution** reads each base name through the variant
//!    slot with OR-style fallback to the shared default
//! 3. **Projections** assemble the grouped output shapes (items with
//!    equipment bonuses, monsters with stat sub-groups) and derive
//!    display flags for worn gear
//!
//! ### Key Properties
//!
//! - **No failure mode**: missing and unparsable fields degrade to
//!   `0` / `None` / `false` / `"Missing"`; batch callers never abort
//! - **Order-sensitive only where specified**: slot scan order and
//!   bonus-section overlay order are fixed; everything else is
//!   independent
//! - **Serialization-ready**: every output is a plain serde value
//!   object with camelCase wire names
//!
//! ## Example
//!
//! ```rust
//! use wikibox::{project_item, resolve_variant, AttributeBox, FieldValue};
//!
//! let boxed = AttributeBox::new()
//!     .with("name", FieldValue::text("Iron sword"))
//!     .with("id1", FieldValue::number(101.0))
//!     .with("weight1", FieldValue::text("2.5"))
//!     .with("equipable", FieldValue::text("Yes"));
//!
//! assert_eq!(resolve_variant(&boxed, 101).map(|s| s.get()), Some(1));
//!
//! let item = project_item(&boxed, &[], 101, None);
//! assert_eq!(item.name, "Iron sword");
//! assert_eq!(item.weight, 2.5);
//! assert!(item.equipable);
//! ```
//!
//! ## Modules
//!
//! - [`field`] - Attribute box data model and field resolution
//! - [`variant`] - Variant slot identification
//! - [`numeric`] - Numeric normalization for encoded field text
//! - [`item`] - Item projection with equipment bonuses
//! - [`monster`] - Monster projection with stat sub-groups
//! - [`visual`] - Display heuristics for equipped gear
//! - [`error`] - Ingest error types

pub mod error;
pub mod field;
pub mod item;
pub mod monster;
pub mod numeric;
pub mod variant;
pub mod visual;

// Re-export main types for convenience
pub use error::BoxError;
pub use field::{AttributeBox, FieldRef, FieldValue};
pub use variant::{detect_mode, match_slot, resolve_variant, IdentifierMode, VariantSlot};

// Re-export projections
pub use item::{project_item, Equipment, Item, MISSING_NAME};
pub use monster::{
    project_monster, CombatInfo, CombatStats, Immunities, Monster, MonsterInfo, Slayer,
};

// Re-export numeric normalization and display heuristics
pub use numeric::normalize;
pub use visual::{derive_flags, VisualFlags};
