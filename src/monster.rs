//! Monster projection.
//!
//! Composes variant resolution and field resolution into the monster
//! output shape: a flat set of combat stat numbers plus grouped
//! sub-records (immunities, slayer metadata, combat info, misc info).
//! A sub-group is attached only when at least one of its fields
//! resolved to a non-default value; empty groups are omitted rather
//! than emitted as all-zero shells.

use serde::{Deserialize, Serialize};

use crate::field::AttributeBox;
use crate::variant::{resolve_variant, VariantSlot};

/// Raw text values that count as an immunity.
pub const IMMUNE_TEXT: [&str; 2] = ["Yes", "Immune"];

/// One resolved monster instance.
///
/// # Examples
///
/// ```rust
/// use wikibox::{project_monster, AttributeBox, FieldValue};
///
/// let boxed = AttributeBox::new()
///     .with("hitpoints", FieldValue::number(100.0))
///     .with("att", FieldValue::number(75.0))
///     .with("immunepoison", FieldValue::text("Immune"));
///
/// let monster = project_monster(&boxed, 415, "Abyssal demon");
/// assert_eq!(monster.levels.unwrap().hitpoints, 100);
/// assert!(monster.immunities.unwrap().poison_immune);
/// assert!(monster.slayer.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    /// The instance id this projection was resolved for.
    pub npc_id: i64,

    /// Display name, as recorded by the upstream source.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<MonsterInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat_info: Option<CombatInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slayer: Option<Slayer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<CombatStats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immunities: Option<Immunities>,
}

/// Combat levels and per-damage-type bonuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub hitpoints: i64,
    pub attack_level: i64,
    pub strength_level: i64,
    pub defence_level: i64,
    pub magic_level: i64,
    pub ranged_level: i64,
    pub attack_bonus: i64,
    pub strength_bonus: i64,
    pub attack_magic: i64,
    pub magic_damage: i64,
    pub attack_ranged: i64,
    pub ranged_strength: i64,
    pub defence_stab: i64,
    pub defence_slash: i64,
    pub defence_crush: i64,
    pub defence_magic: i64,
    pub defence_ranged: i64,
}

impl CombatStats {
    /// Whether every stat resolved to zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Damage-class immunities, matched against [`IMMUNE_TEXT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunities {
    pub poison_immune: bool,
    pub venom_immune: bool,
    pub cannon_immune: bool,
    pub thrall_immune: bool,
}

impl Immunities {
    /// Whether no immunity flag is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Slayer assignment metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slayer {
    pub slayer_level: Option<i64>,
    pub slayer_xp: Option<f64>,
    pub category: Option<Vec<String>>,
    pub assigned_by: Option<Vec<String>>,
}

impl Slayer {
    /// Whether no slayer field resolved.
    pub fn is_empty(&self) -> bool {
        self.slayer_level.is_none()
            && self.slayer_xp.is_none()
            && self.category.is_none()
            && self.assigned_by.is_none()
    }
}

/// Combat behavior info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatInfo {
    pub combat_level: Option<i64>,
    pub attributes: Option<Vec<String>>,
    pub max_hit: Option<Vec<String>>,
    pub aggressive: Option<bool>,
    pub poisonous: bool,
    pub attack_styles: Option<Vec<String>>,
    pub attack_speed: Option<i64>,
}

impl CombatInfo {
    /// Whether no combat-info field resolved.
    pub fn is_empty(&self) -> bool {
        self.combat_level.is_none()
            && self.attributes.is_none()
            && self.max_hit.is_none()
            && self.aggressive.is_none()
            && !self.poisonous
            && self.attack_styles.is_none()
            && self.attack_speed.is_none()
    }
}

/// Miscellaneous descriptive info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterInfo {
    pub release: Option<String>,
    pub update: Option<String>,
    pub members: Option<bool>,
    pub race: Option<bool>,
    pub examine: Option<String>,
    pub size: Option<f64>,
    pub xp_bonus: Option<f64>,
    pub respawn: Option<i64>,
}

impl MonsterInfo {
    /// Whether no info field resolved.
    pub fn is_empty(&self) -> bool {
        self.release.is_none()
            && self.update.is_none()
            && self.members.is_none()
            && self.race.is_none()
            && self.examine.is_none()
            && self.size.is_none()
            && self.xp_bonus.is_none()
            && self.respawn.is_none()
    }
}

/// Project one attribute box into a [`Monster`] for a given instance id.
///
/// The name comes from the upstream record rather than the box; the
/// variant slot is resolved once and shared by every field lookup.
pub fn project_monster(boxed: &AttributeBox, npc_id: i64, name: impl Into<String>) -> Monster {
    let variant = resolve_variant(boxed, npc_id);

    let info = project_info(boxed, variant);
    let combat_info = project_combat_info(boxed, variant);
    let slayer = project_slayer(boxed, variant);
    let levels = project_stats(boxed, variant);
    let immunities = project_immunities(boxed, variant);

    Monster {
        npc_id,
        name: name.into(),
        info: (!info.is_empty()).then_some(info),
        combat_info: (!combat_info.is_empty()).then_some(combat_info),
        slayer: (!slayer.is_empty()).then_some(slayer),
        levels: (!levels.is_empty()).then_some(levels),
        immunities: (!immunities.is_empty()).then_some(immunities),
    }
}

/// A stat field truncated to an integer, defaulted to zero.
fn stat(boxed: &AttributeBox, variant: Option<VariantSlot>, key: &str) -> i64 {
    boxed
        .field(variant, key)
        .number()
        .map(|n| n as i64)
        .unwrap_or(0)
}

fn project_stats(boxed: &AttributeBox, variant: Option<VariantSlot>) -> CombatStats {
    CombatStats {
        hitpoints: stat(boxed, variant, "hitpoints"),
        attack_level: stat(boxed, variant, "att"),
        strength_level: stat(boxed, variant, "str"),
        defence_level: stat(boxed, variant, "def"),
        magic_level: stat(boxed, variant, "mage"),
        ranged_level: stat(boxed, variant, "range"),
        attack_bonus: stat(boxed, variant, "attbns"),
        strength_bonus: stat(boxed, variant, "strbns"),
        attack_magic: stat(boxed, variant, "amagic"),
        magic_damage: stat(boxed, variant, "mbns"),
        attack_ranged: stat(boxed, variant, "arange"),
        ranged_strength: stat(boxed, variant, "rngbns"),
        defence_stab: stat(boxed, variant, "dstab"),
        defence_slash: stat(boxed, variant, "dslash"),
        defence_crush: stat(boxed, variant, "dcrush"),
        defence_magic: stat(boxed, variant, "dmagic"),
        defence_ranged: stat(boxed, variant, "drange"),
    }
}

fn project_immunities(boxed: &AttributeBox, variant: Option<VariantSlot>) -> Immunities {
    Immunities {
        poison_immune: boxed.field(variant, "immunepoison").text_in(&IMMUNE_TEXT),
        venom_immune: boxed.field(variant, "immunevenom").text_in(&IMMUNE_TEXT),
        cannon_immune: boxed.field(variant, "immunecannon").text_in(&IMMUNE_TEXT),
        thrall_immune: boxed.field(variant, "immunethrall").text_in(&IMMUNE_TEXT),
    }
}

fn project_slayer(boxed: &AttributeBox, variant: Option<VariantSlot>) -> Slayer {
    Slayer {
        slayer_level: boxed.field(variant, "slaylvl").number().map(|n| n as i64),
        slayer_xp: boxed.field(variant, "slayxp").number(),
        category: boxed.field(variant, "cat").list(),
        assigned_by: boxed.field(variant, "assignedby").list_untrimmed(),
    }
}

fn project_combat_info(boxed: &AttributeBox, variant: Option<VariantSlot>) -> CombatInfo {
    CombatInfo {
        combat_level: boxed.field(variant, "combat").number().map(|n| n as i64),
        attributes: boxed.field(variant, "attributes").list(),
        max_hit: boxed.field(variant, "max hit").list(),
        aggressive: boxed.field(variant, "aggressive").contains_yes().then_some(true),
        poisonous: boxed.field(variant, "poisonous").is_yes(),
        attack_styles: boxed.field(variant, "attack style").list(),
        attack_speed: boxed
            .field(variant, "attack speed")
            .number()
            .map(|n| n as i64),
    }
}

fn project_info(boxed: &AttributeBox, variant: Option<VariantSlot>) -> MonsterInfo {
    MonsterInfo {
        release: boxed.field(variant, "release").text().map(str::to_owned),
        update: boxed.field(variant, "update").text().map(str::to_owned),
        members: boxed.field(variant, "members").is_yes().then_some(true),
        race: boxed.field(variant, "race").is_yes().then_some(true),
        examine: boxed.field(variant, "examine").text().map(str::to_owned),
        size: boxed.field(variant, "size").number(),
        xp_bonus: boxed.field(variant, "xpbonus").number(),
        respawn: boxed.field(variant, "respawn").number().map(|n| n as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    #[test]
    fn test_stats_resolve_with_variant() {
        let boxed = AttributeBox::new()
            .with("id1", FieldValue::text("415"))
            .with("id2", FieldValue::text("416,417"))
            .with("hitpoints", FieldValue::number(150.0))
            .with("hitpoints2", FieldValue::number(300.0))
            .with("att", FieldValue::number(99.0));

        let monster = project_monster(&boxed, 416, "Abyssal Sire");
        let levels = monster.levels.unwrap();
        assert_eq!(levels.hitpoints, 300);
        assert_eq!(levels.attack_level, 99);
        assert_eq!(levels.defence_level, 0);
    }

    #[test]
    fn test_all_zero_stats_omit_group() {
        let boxed = AttributeBox::new().with("examine", FieldValue::text("A rat."));
        let monster = project_monster(&boxed, 1, "Rat");
        assert!(monster.levels.is_none());
        assert_eq!(monster.info.unwrap().examine.as_deref(), Some("A rat."));
    }

    #[test]
    fn test_immunities_allow_list() {
        let boxed = AttributeBox::new()
            .with("immunepoison", FieldValue::text("Immune"))
            .with("immunevenom", FieldValue::text("Yes"))
            .with("immunecannon", FieldValue::text("No"))
            .with("immunethrall", FieldValue::text("Not immune"));

        let immunities = project_monster(&boxed, 1, "Zulrah").immunities.unwrap();
        assert!(immunities.poison_immune);
        assert!(immunities.venom_immune);
        assert!(!immunities.cannon_immune);
        assert!(!immunities.thrall_immune);
    }

    #[test]
    fn test_no_immunities_omits_group() {
        let boxed = AttributeBox::new()
            .with("immunepoison", FieldValue::text("No"))
            .with("hitpoints", FieldValue::number(10.0));

        let monster = project_monster(&boxed, 1, "Goblin");
        assert!(monster.immunities.is_none());
        assert!(monster.levels.is_some());
    }

    #[test]
    fn test_slayer_lists() {
        let boxed = AttributeBox::new()
            .with("slaylvl", FieldValue::number(85.0))
            .with("slayxp", FieldValue::number(150.5))
            .with("cat", FieldValue::text("Abyssal demons, Demons"))
            .with("assignedby", FieldValue::text("duradel, nieve"));

        let slayer = project_monster(&boxed, 415, "Abyssal demon").slayer.unwrap();
        assert_eq!(slayer.slayer_level, Some(85));
        assert_eq!(slayer.slayer_xp, Some(150.5));
        assert_eq!(
            slayer.category.unwrap(),
            vec!["Abyssal demons".to_owned(), "Demons".to_owned()]
        );
        // Assigned-by entries are kept verbatim.
        assert_eq!(
            slayer.assigned_by.unwrap(),
            vec!["duradel".to_owned(), " nieve".to_owned()]
        );
    }

    #[test]
    fn test_combat_info_flags() {
        let boxed = AttributeBox::new()
            .with("combat", FieldValue::number(124.0))
            .with("aggressive", FieldValue::text("Yes, when provoked"))
            .with("poisonous", FieldValue::text("Yes"))
            .with("max hit", FieldValue::text("8, 12 (ranged)"));

        let combat = project_monster(&boxed, 1, "Guard").combat_info.unwrap();
        assert_eq!(combat.combat_level, Some(124));
        assert_eq!(combat.aggressive, Some(true));
        assert!(combat.poisonous);
        assert_eq!(
            combat.max_hit.unwrap(),
            vec!["8".to_owned(), "12 (ranged)".to_owned()]
        );
    }

    #[test]
    fn test_aggressive_requires_yes_substring() {
        let boxed = AttributeBox::new()
            .with("aggressive", FieldValue::text("No"))
            .with("combat", FieldValue::number(3.0));

        let combat = project_monster(&boxed, 1, "Chicken").combat_info.unwrap();
        assert_eq!(combat.aggressive, None);
    }

    #[test]
    fn test_serialization_omits_empty_groups() {
        let boxed = AttributeBox::new().with("hitpoints", FieldValue::number(5.0));
        let monster = project_monster(&boxed, 44, "Rat");
        let json = serde_json::to_value(&monster).unwrap();

        assert_eq!(json["npcId"], 44);
        assert_eq!(json["levels"]["hitpoints"], 5);
        assert!(json.get("immunities").is_none());
        assert!(json.get("slayer").is_none());
        assert!(json.get("combatInfo").is_none());
    }
}
