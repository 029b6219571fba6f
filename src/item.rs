//! Item projection.
//!
//! Composes variant resolution and field resolution into the item
//! output shape: identity and descriptive fields, plus an optional
//! equipment record when the item is equipable and a bonus-bearing
//! section exists. The projection is a pure function of its inputs
//! and never fails; unresolvable fields land on their defaults.

use serde::{Deserialize, Serialize};

use crate::field::AttributeBox;
use crate::numeric::normalize;
use crate::variant::resolve_variant;
use crate::visual::{derive_flags, VisualFlags};

/// Sentinel name for records where nothing resolves, not even a title.
pub const MISSING_NAME: &str = "Missing";

/// One resolved item instance.
///
/// # Examples
///
/// ```rust
/// use wikibox::{project_item, AttributeBox, FieldValue};
///
/// let boxed = AttributeBox::new()
///     .with("name", FieldValue::text("Iron sword"))
///     .with("id1", FieldValue::number(101.0))
///     .with("weight1", FieldValue::text("2.5"))
///     .with("equipable", FieldValue::text("Yes"));
///
/// let item = project_item(&boxed, &[], 101, None);
/// assert_eq!(item.name, "Iron sword");
/// assert_eq!(item.weight, 2.5);
/// assert!(item.equipable);
/// assert!(item.equipment.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// The instance id this projection was resolved for.
    pub item_id: i64,

    /// Resolved display name, the document title, or [`MISSING_NAME`].
    pub name: String,

    /// Release note text.
    pub release: Option<String>,

    /// Update note text.
    pub update: Option<String>,

    /// Whether the item can be noted at a bank.
    pub noteable: bool,

    /// Whether the item can be equipped.
    pub equipable: bool,

    /// Text shown when the player destroys the item.
    pub destroy_option: Option<String>,

    /// Weight in kilograms.
    pub weight: f64,

    /// Combat bonuses; present only for equipable items with a
    /// non-empty bonus section.
    pub equipment: Option<Equipment>,
}

/// Combat bonuses and wear metadata for an equipable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub attack_stab: i64,
    pub attack_slash: i64,
    pub attack_crush: i64,
    pub attack_magic: i64,
    pub attack_ranged: i64,
    pub defence_stab: i64,
    pub defence_slash: i64,
    pub defence_crush: i64,
    pub defence_magic: i64,
    pub defence_ranged: i64,
    pub strength_bonus: i64,
    pub ranged_strength: i64,
    /// Magic damage is a percentage and keeps its fraction.
    pub magic_damage: f64,
    pub prayer: i64,
    pub equipment_slot: Option<String>,
    pub attack_speed: Option<i64>,
    pub attack_range: Option<i64>,
    pub combat_style: Option<String>,

    /// Presentation flags for the `body` and `head` slots.
    #[serde(flatten)]
    pub visual: VisualFlags,
}

/// Project one attribute box into an [`Item`] for a given instance id.
///
/// `bonus_sections` are the auxiliary record sections that may carry
/// equipment bonuses, in priority order: when two sections define the
/// same field, the earlier-listed section wins. `title` is the
/// document-level fallback for the name.
///
/// The equipment record is attached only when the item resolves as
/// equipable *and* the overlaid bonus sections are non-empty.
///
/// # Examples
///
/// ```rust
/// use wikibox::{project_item, AttributeBox, FieldValue};
///
/// let boxed = AttributeBox::new().with("equipable", FieldValue::text("Yes"));
/// let bonuses = AttributeBox::new()
///     .with("astab", FieldValue::text("+10"))
///     .with("slot", FieldValue::text("weapon"));
///
/// let item = project_item(&boxed, &[bonuses], 4151, Some("Abyssal whip"));
/// assert_eq!(item.name, "Abyssal whip");
///
/// let equipment = item.equipment.unwrap();
/// assert_eq!(equipment.attack_stab, 10);
/// assert_eq!(equipment.equipment_slot.as_deref(), Some("weapon"));
/// ```
pub fn project_item(
    boxed: &AttributeBox,
    bonus_sections: &[AttributeBox],
    item_id: i64,
    title: Option<&str>,
) -> Item {
    let variant = resolve_variant(boxed, item_id);

    let name = boxed
        .field(variant, "name")
        .text()
        .or(title)
        .unwrap_or(MISSING_NAME)
        .to_owned();

    let equipable = boxed.field(variant, "equipable").is_yes();
    let equipment = if equipable {
        let bonuses = AttributeBox::overlay(bonus_sections);
        (!bonuses.is_empty()).then(|| project_equipment(&bonuses, &name))
    } else {
        None
    };

    Item {
        item_id,
        release: boxed.field(variant, "release").text().map(str::to_owned),
        update: boxed.field(variant, "update").text().map(str::to_owned),
        noteable: boxed.field(variant, "noteable").is_yes(),
        equipable,
        destroy_option: boxed.field(variant, "destroy").text().map(str::to_owned),
        weight: normalize(boxed.field(variant, "weight").text(), true),
        equipment,
        name,
    }
}

/// An integer bonus field, affix-stripped and defaulted to zero.
fn bonus(bonuses: &AttributeBox, key: &str) -> i64 {
    normalize(bonuses.field(None, key).text(), false) as i64
}

fn project_equipment(bonuses: &AttributeBox, name: &str) -> Equipment {
    let slot = bonuses.field(None, "slot").text().map(str::to_owned);
    Equipment {
        attack_stab: bonus(bonuses, "astab"),
        attack_slash: bonus(bonuses, "aslash"),
        attack_crush: bonus(bonuses, "acrush"),
        attack_magic: bonus(bonuses, "amagic"),
        attack_ranged: bonus(bonuses, "arange"),
        defence_stab: bonus(bonuses, "dstab"),
        defence_slash: bonus(bonuses, "dslash"),
        defence_crush: bonus(bonuses, "dcrush"),
        defence_magic: bonus(bonuses, "dmagic"),
        defence_ranged: bonus(bonuses, "drange"),
        strength_bonus: bonus(bonuses, "str"),
        ranged_strength: bonus(bonuses, "rstr"),
        magic_damage: normalize(bonuses.field(None, "mdmg").text(), true),
        prayer: bonus(bonuses, "prayer"),
        attack_speed: bonuses.field(None, "speed").number().map(|n| n as i64),
        attack_range: bonuses.field(None, "attackrange").number().map(|n| n as i64),
        combat_style: bonuses.field(None, "combatstyle").text().map(str::to_owned),
        visual: derive_flags(name, slot.as_deref()),
        equipment_slot: slot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    #[test]
    fn test_variant_resolved_fields() {
        let boxed = AttributeBox::new()
            .with("name", FieldValue::text("Iron sword"))
            .with("id1", FieldValue::number(101.0))
            .with("weight1", FieldValue::text("2.5"))
            .with("equipable", FieldValue::text("Yes"));

        let item = project_item(&boxed, &[], 101, None);
        assert_eq!(item.item_id, 101);
        assert_eq!(item.name, "Iron sword");
        assert_eq!(item.weight, 2.5);
        assert!(item.equipable);
        assert!(!item.noteable);
        assert!(item.equipment.is_none());
    }

    #[test]
    fn test_unmatched_id_uses_shared_defaults() {
        let boxed = AttributeBox::new()
            .with("name", FieldValue::text("Cake"))
            .with("name2", FieldValue::text("2/3 cake"))
            .with("id1", FieldValue::number(1891.0))
            .with("id2", FieldValue::number(1893.0))
            .with("weight", FieldValue::text("0.2"));

        let item = project_item(&boxed, &[], 9999, None);
        assert_eq!(item.name, "Cake");
        assert_eq!(item.weight, 0.2);
    }

    #[test]
    fn test_name_falls_back_to_title_then_sentinel() {
        let boxed = AttributeBox::new().with("weight", FieldValue::text("1"));
        let item = project_item(&boxed, &[], 1, Some("Dwarven rock"));
        assert_eq!(item.name, "Dwarven rock");

        let item = project_item(&boxed, &[], 1, None);
        assert_eq!(item.name, MISSING_NAME);
    }

    #[test]
    fn test_weight_normalization() {
        let boxed = AttributeBox::new().with("weight", FieldValue::text("+1.8"));
        assert_eq!(project_item(&boxed, &[], 1, None).weight, 1.8);

        let boxed = AttributeBox::new().with("weight", FieldValue::text("varies"));
        assert_eq!(project_item(&boxed, &[], 1, None).weight, 0.0);
    }

    #[test]
    fn test_unequipable_never_carries_equipment() {
        let boxed = AttributeBox::new().with("name", FieldValue::text("Cake"));
        let bonuses = AttributeBox::new().with("astab", FieldValue::text("+10"));

        let item = project_item(&boxed, &[bonuses], 1, None);
        assert!(!item.equipable);
        assert!(item.equipment.is_none());
    }

    #[test]
    fn test_equipable_without_bonus_sections() {
        let boxed = AttributeBox::new().with("equipable", FieldValue::text("Yes"));
        let item = project_item(&boxed, &[], 1, None);
        assert!(item.equipable);
        assert!(item.equipment.is_none());
    }

    #[test]
    fn test_equipment_fields() {
        let boxed = AttributeBox::new()
            .with("name", FieldValue::text("Rune scimitar"))
            .with("equipable", FieldValue::text("Yes"));
        let bonuses = AttributeBox::new()
            .with("astab", FieldValue::text("+7"))
            .with("aslash", FieldValue::text("+45"))
            .with("str", FieldValue::text("+44"))
            .with("mdmg", FieldValue::text("+2.5%"))
            .with("slot", FieldValue::text("weapon"))
            .with("speed", FieldValue::number(4.0))
            .with("combatstyle", FieldValue::text("Slash"));

        let equipment = project_item(&boxed, &[bonuses], 1333, None)
            .equipment
            .unwrap();
        assert_eq!(equipment.attack_stab, 7);
        assert_eq!(equipment.attack_slash, 45);
        assert_eq!(equipment.attack_crush, 0);
        assert_eq!(equipment.strength_bonus, 44);
        assert_eq!(equipment.magic_damage, 2.5);
        assert_eq!(equipment.attack_speed, Some(4));
        assert_eq!(equipment.attack_range, None);
        assert_eq!(equipment.combat_style.as_deref(), Some("Slash"));
        // "weapon" is neither body nor head, so no visual flags.
        assert_eq!(equipment.visual, VisualFlags::default());
    }

    #[test]
    fn test_bonus_section_priority() {
        let boxed = AttributeBox::new().with("equipable", FieldValue::text("Yes"));
        let first = AttributeBox::new().with("astab", FieldValue::text("+10"));
        let second = AttributeBox::new()
            .with("astab", FieldValue::text("+99"))
            .with("prayer", FieldValue::text("+3"));
        let third = AttributeBox::new().with("prayer", FieldValue::text("+8"));

        let equipment = project_item(&boxed, &[first, second, third], 1, None)
            .equipment
            .unwrap();
        assert_eq!(equipment.attack_stab, 10);
        assert_eq!(equipment.prayer, 3);
    }

    #[test]
    fn test_head_slot_gets_hair_flags() {
        let boxed = AttributeBox::new()
            .with("name", FieldValue::text("Iron med helm"))
            .with("equipable", FieldValue::text("Yes"));
        let bonuses = AttributeBox::new().with("slot", FieldValue::text("head"));

        let equipment = project_item(&boxed, &[bonuses], 1137, None)
            .equipment
            .unwrap();
        assert_eq!(equipment.visual.hide_hair, Some(true));
        assert_eq!(equipment.visual.show_beard, Some(true));
        assert_eq!(equipment.visual.hide_arms, None);
    }

    #[test]
    fn test_serialization_shape() {
        let boxed = AttributeBox::new()
            .with("name", FieldValue::text("Dragon chainbody"))
            .with("equipable", FieldValue::text("Yes"));
        let bonuses = AttributeBox::new().with("slot", FieldValue::text("body"));

        let item = project_item(&boxed, &[bonuses], 3140, None);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["itemId"], 3140);
        assert_eq!(json["equipment"]["equipmentSlot"], "body");
        assert_eq!(json["equipment"]["hideArms"], true);
        // Head-only flags are omitted, not null.
        assert!(json["equipment"].get("hideHair").is_none());
    }
}
