//! Variant identification.
//!
//! A record template packs up to eight variants of one entity, and the
//! `id1`..`id8` fields say which instance ids belong to which slot.
//! Two conventions exist and are never mixed within a record:
//!
//! - **list mode** — a slot's id text is a comma-separated list and an
//!   instance matches by integer membership;
//! - **scalar mode** — a slot's parsed id number must equal the
//!   instance id exactly.
//!
//! The convention is a record-wide property decided once by
//! [`detect_mode`]: a single slot with a multi-token id list puts the
//! whole record in list mode. [`resolve_variant`] then scans the slots
//! in ascending order and the lowest matching slot wins, even when
//! malformed data makes several slots claim the same id.

use std::fmt;

use crate::error::BoxError;
use crate::field::AttributeBox;
use crate::numeric::int_prefix;

/// Base name of the per-slot identifier fields.
const ID_BASE: &str = "id";

/// A validated variant slot, `1..=8`.
///
/// # Examples
///
/// ```rust
/// use wikibox::VariantSlot;
///
/// let slot = VariantSlot::try_from(3).unwrap();
/// assert_eq!(slot.get(), 3);
/// assert!(VariantSlot::try_from(0).is_err());
/// assert!(VariantSlot::try_from(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantSlot(u8);

impl VariantSlot {
    /// Number of variant slots a record can carry.
    pub const COUNT: usize = 8;

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = VariantSlot> {
        (1..=Self::COUNT as u8).map(VariantSlot)
    }

    /// The slot number, `1..=8`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into the variant array.
    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for VariantSlot {
    type Error = BoxError;

    fn try_from(n: u8) -> Result<Self, BoxError> {
        if (1..=Self::COUNT as u8).contains(&n) {
            Ok(VariantSlot(n))
        } else {
            Err(BoxError::InvalidSlot(n))
        }
    }
}

impl fmt::Display for VariantSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifier-matching convention a record uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierMode {
    /// Ids match by membership in comma-separated text lists.
    List,
    /// Ids match by exact equality against the parsed number.
    Scalar,
}

/// Decide the identifier-matching convention for a record.
///
/// A slot whose id field carries text contributes its comma-token
/// count; any count other than one flips the whole record into list
/// mode. A slot with only a parsed number counts as a single token,
/// and an absent slot contributes nothing, so records that identify
/// their variants purely numerically stay scalar.
///
/// # Examples
///
/// ```rust
/// use wikibox::{detect_mode, AttributeBox, FieldValue, IdentifierMode};
///
/// let scalar = AttributeBox::new().with("id1", FieldValue::new("101", 101.0));
/// assert_eq!(detect_mode(&scalar), IdentifierMode::Scalar);
///
/// let list = AttributeBox::new()
///     .with("id1", FieldValue::text("10,11,12"))
///     .with("id2", FieldValue::text("20"));
/// assert_eq!(detect_mode(&list), IdentifierMode::List);
/// ```
pub fn detect_mode(boxed: &AttributeBox) -> IdentifierMode {
    for slot in VariantSlot::all() {
        if let Some(text) = boxed.variant(slot, ID_BASE).and_then(|v| v.text.as_deref()) {
            if text.split(',').count() != 1 {
                return IdentifierMode::List;
            }
        }
    }
    IdentifierMode::Scalar
}

/// Parsed integer tokens of one slot's id text.
///
/// Unparsable tokens stay in the list as `None` so they count toward
/// the token total without ever matching an instance id.
fn id_tokens(boxed: &AttributeBox, slot: VariantSlot) -> Vec<Option<i64>> {
    boxed
        .variant(slot, ID_BASE)
        .and_then(|v| v.text.as_deref())
        .map(|t| t.split(',').map(|tok| int_prefix(tok.trim())).collect())
        .unwrap_or_default()
}

/// Whether `id` belongs to `slot` under the given convention.
///
/// List mode consults only the text tokens; scalar mode consults only
/// the parsed number. An absent slot never matches.
pub fn match_slot(boxed: &AttributeBox, mode: IdentifierMode, slot: VariantSlot, id: i64) -> bool {
    match mode {
        IdentifierMode::List => id_tokens(boxed, slot).contains(&Some(id)),
        IdentifierMode::Scalar => {
            boxed.variant(slot, ID_BASE).and_then(|v| v.number) == Some(id as f64)
        }
    }
}

/// Resolve which variant slot an instance id belongs to.
///
/// Slots are evaluated in ascending order and the first match wins;
/// `None` means the id is not claimed by any slot and every field
/// resolves to its shared default.
///
/// # Examples
///
/// ```rust
/// use wikibox::{resolve_variant, AttributeBox, FieldValue};
///
/// let boxed = AttributeBox::new()
///     .with("id1", FieldValue::text("10,11,12"))
///     .with("id2", FieldValue::text("20"));
///
/// assert_eq!(resolve_variant(&boxed, 11).map(|s| s.get()), Some(1));
/// assert_eq!(resolve_variant(&boxed, 20).map(|s| s.get()), Some(2));
/// assert_eq!(resolve_variant(&boxed, 99), None);
/// ```
pub fn resolve_variant(boxed: &AttributeBox, id: i64) -> Option<VariantSlot> {
    let mode = detect_mode(boxed);
    VariantSlot::all().find(|&slot| match_slot(boxed, mode, slot, id))
}
