//! Display heuristics for equipped gear.
//!
//! A rendering layer needs to know whether a worn item should hide the
//! character's arms or hair, or leave a beard visible. The rules here
//! are pure functions of the resolved item name and only apply to the
//! `body` and `head` equipment slots; other slots get no flags at all.
//!
//! The headgear keyword check runs keyword-contains-name, which only
//! fires for names that are substrings of a keyword. The
//! `strict-headgear` feature flips it to the conventional
//! name-contains-keyword direction; the default build keeps the legacy
//! behavior so existing outputs stay stable.

use serde::{Deserialize, Serialize};

/// Headgear keywords that keep hair visible.
pub const SHOW_HAIR: [&str; 6] = ["partyhat", "tiara", "crown", "glasses", "spectacles", "hat"];

/// Names that always keep the beard visible.
pub const SHOW_BEARD: [&str; 7] = ["horns", "hat", "afro", "cowl", "tattoo", "headdress", "hood"];

/// Presentation hints for a worn item.
///
/// Flags are `None` for slots they do not apply to, and omitted from
/// serialized output when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualFlags {
    /// Whether the arms are hidden. Set only for the `body` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_arms: Option<bool>,

    /// Whether the hair is hidden. Set only for the `head` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_hair: Option<bool>,

    /// Whether the beard stays visible. Set only for the `head` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_beard: Option<bool>,
}

/// Derive the presentation flags for a resolved name and equipment slot.
///
/// # Examples
///
/// ```rust
/// use wikibox::visual::derive_flags;
///
/// let body = derive_flags("Iron platebody", Some("body"));
/// assert_eq!(body.hide_arms, Some(true));
/// assert_eq!(body.hide_hair, None);
///
/// let head = derive_flags("Iron med helm", Some("head"));
/// assert_eq!(head.hide_hair, Some(true));
/// assert_eq!(head.show_beard, Some(true));
///
/// let ring = derive_flags("Gold ring", Some("ring"));
/// assert_eq!(ring, Default::default());
/// ```
pub fn derive_flags(name: &str, slot: Option<&str>) -> VisualFlags {
    match slot {
        Some("body") => VisualFlags {
            hide_arms: Some(hide_arms(name)),
            ..Default::default()
        },
        Some("head") => VisualFlags {
            hide_hair: Some(hide_hair(name)),
            show_beard: Some(show_beard(name)),
            ..Default::default()
        },
        _ => VisualFlags::default(),
    }
}

/// Arms are hidden for everything except non-dragon chainbodies.
pub fn hide_arms(name: &str) -> bool {
    name.to_lowercase().contains("dragon chainbody") || !name.contains("chainbody")
}

/// Hair is hidden for med helms and keyword-matched headgear.
pub fn hide_hair(name: &str) -> bool {
    if name.contains("med helm") {
        return true;
    }
    #[cfg(feature = "strict-headgear")]
    {
        SHOW_HAIR.iter().any(|keyword| name.contains(keyword))
    }
    #[cfg(not(feature = "strict-headgear"))]
    {
        SHOW_HAIR.iter().any(|keyword| keyword.contains(name))
    }
}

/// The beard stays visible unless the hair rule hides it, with carve-outs
/// for named headgear, non-h'ween masks, and non-full helms.
pub fn show_beard(name: &str) -> bool {
    !hide_hair(name)
        || SHOW_BEARD.contains(&name)
        || (name.contains("mask") && !name.contains("h'ween"))
        || (name.contains("helm") && !name.contains("full"))
}
