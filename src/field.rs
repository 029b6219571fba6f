//! Attribute box data model and field resolution.
//!
//! An attribute box is one flattened key→value record extracted from a
//! structured markup block. A key either names a shared default
//! (`name`, `weight`) or a variant copy with a trailing slot digit
//! (`name3`, `id5`). The box splits the two apart at construction
//! time: a shared map plus a fixed array of eight variant maps, so
//! lookups never concatenate key strings.
//!
//! [`AttributeBox::field`] resolves a base name against a resolved
//! variant slot and returns a [`FieldRef`], whose typed accessors all
//! apply OR-style fallback: a variant value that resolves to something
//! falsy (empty text, zero number, a flag that is not `"Yes"`) falls
//! through to the shared default, and a falsy default falls through to
//! the caller's empty value. Key presence alone never short-circuits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::variant::VariantSlot;

/// A single field node: raw text plus an optionally parsed-out number.
///
/// Both representations are independently optional; the upstream
/// parser fills in whichever it could extract.
///
/// # Examples
///
/// ```rust
/// use wikibox::FieldValue;
///
/// let weight = FieldValue::text("2.5");
/// assert_eq!(weight.text.as_deref(), Some("2.5"));
/// assert_eq!(weight.number, None);
///
/// let id = FieldValue::new("4151", 4151.0);
/// assert_eq!(id.number, Some(4151.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The literal string content of the field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// A leading numeric token parsed out by the upstream parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
}

impl FieldValue {
    /// A field carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            number: None,
        }
    }

    /// A field carrying only a number.
    pub fn number(number: f64) -> Self {
        Self {
            text: None,
            number: Some(number),
        }
    }

    /// A field carrying both representations.
    pub fn new(text: impl Into<String>, number: f64) -> Self {
        Self {
            text: Some(text.into()),
            number: Some(number),
        }
    }
}

/// One flattened record template shared by up to eight entity variants.
///
/// # Examples
///
/// ```rust
/// use wikibox::{AttributeBox, FieldValue};
///
/// let boxed = AttributeBox::new()
///     .with("name", FieldValue::text("Iron sword"))
///     .with("id1", FieldValue::number(101.0))
///     .with("weight1", FieldValue::text("2.5"));
///
/// // "weight1" landed in variant slot 1 under the base name "weight".
/// let slot = wikibox::VariantSlot::try_from(1).unwrap();
/// assert!(boxed.variant(slot, "weight").is_some());
/// assert!(boxed.shared("weight").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, FieldValue>", into = "HashMap<String, FieldValue>")]
pub struct AttributeBox {
    shared: HashMap<String, FieldValue>,
    variants: [HashMap<String, FieldValue>; 8],
}

impl AttributeBox {
    /// Create an empty attribute box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an attribute box from the upstream parser's JSON tree.
    ///
    /// The tree must decode into a flat map of field nodes; unknown
    /// keys inside a node are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wikibox::AttributeBox;
    ///
    /// let json = serde_json::json!({
    ///     "name": { "text": "Iron sword" },
    ///     "id1": { "text": "101", "number": 101 }
    /// });
    /// let boxed = AttributeBox::from_json(json).unwrap();
    /// assert!(!boxed.is_empty());
    /// ```
    pub fn from_json(value: serde_json::Value) -> Result<Self, BoxError> {
        let fields: HashMap<String, FieldValue> = serde_json::from_value(value)?;
        Ok(fields.into())
    }

    /// Insert a field under its flattened key.
    ///
    /// A key with a non-empty stem and a trailing `1`..`8` digit is
    /// stored as a variant field; everything else is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match variant_key(&key) {
            Some((base, idx)) => {
                self.variants[idx].insert(base.to_owned(), value);
            }
            None => {
                self.shared.insert(key, value);
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a shared (unsuffixed) field.
    pub fn shared(&self, base: &str) -> Option<&FieldValue> {
        self.shared.get(base)
    }

    /// Look up a variant field by slot and base name.
    pub fn variant(&self, slot: VariantSlot, base: &str) -> Option<&FieldValue> {
        self.variants[slot.index()].get(base)
    }

    /// Resolve a base name against an already-resolved variant slot.
    ///
    /// With `variant = None` only the shared default participates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wikibox::{resolve_variant, AttributeBox, FieldValue};
    ///
    /// let boxed = AttributeBox::new()
    ///     .with("name", FieldValue::text("Iron sword"))
    ///     .with("name2", FieldValue::text("Iron sword (broken)"))
    ///     .with("id1", FieldValue::number(101.0))
    ///     .with("id2", FieldValue::number(102.0));
    ///
    /// let variant = resolve_variant(&boxed, 102);
    /// let name = boxed.field(variant, "name").text();
    /// assert_eq!(name, Some("Iron sword (broken)"));
    /// ```
    pub fn field(&self, variant: Option<VariantSlot>, base: &str) -> FieldRef<'_> {
        FieldRef {
            variant: variant.and_then(|slot| self.variant(slot, base)),
            shared: self.shared(base),
        }
    }

    /// Whether the box holds no fields at all.
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.variants.iter().all(HashMap::is_empty)
    }

    /// Overlay several record sections into one box.
    ///
    /// Sections are given in priority order: when two sections carry
    /// the same key, the earlier-listed section wins. Equivalent to
    /// applying the sections last-to-first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wikibox::{AttributeBox, FieldValue};
    ///
    /// let primary = AttributeBox::new().with("slot", FieldValue::text("head"));
    /// let fallback = AttributeBox::new()
    ///     .with("slot", FieldValue::text("body"))
    ///     .with("prayer", FieldValue::text("+1"));
    ///
    /// let merged = AttributeBox::overlay(&[primary, fallback]);
    /// assert_eq!(merged.shared("slot").unwrap().text.as_deref(), Some("head"));
    /// assert!(merged.shared("prayer").is_some());
    /// ```
    pub fn overlay(sections: &[AttributeBox]) -> AttributeBox {
        let mut merged = AttributeBox::new();
        for section in sections.iter().rev() {
            merged
                .shared
                .extend(section.shared.iter().map(|(k, v)| (k.clone(), v.clone())));
            for (target, source) in merged.variants.iter_mut().zip(&section.variants) {
                target.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }
}

impl From<HashMap<String, FieldValue>> for AttributeBox {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        let mut boxed = AttributeBox::new();
        for (key, value) in fields {
            boxed.insert(key, value);
        }
        boxed
    }
}

impl From<AttributeBox> for HashMap<String, FieldValue> {
    fn from(boxed: AttributeBox) -> Self {
        let mut fields = boxed.shared;
        for (idx, variant) in boxed.variants.into_iter().enumerate() {
            for (base, value) in variant {
                fields.insert(format!("{}{}", base, idx + 1), value);
            }
        }
        fields
    }
}

/// Split a flattened key into (base name, variant array index).
///
/// Multibyte endings are safe to probe byte-wise: a UTF-8 continuation
/// byte can never look like an ASCII digit.
fn variant_key(key: &str) -> Option<(&str, usize)> {
    let last = *key.as_bytes().last()?;
    if key.len() >= 2 && (b'1'..=b'8').contains(&last) {
        Some((&key[..key.len() - 1], (last - b'1') as usize))
    } else {
        None
    }
}

/// A resolved view of one base name: the variant value (if any) in
/// front of the shared default.
///
/// Every accessor applies value-level OR fallback down the chain and
/// yields the caller's empty value (`None` / `false`) when nothing
/// resolves truthy.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    variant: Option<&'a FieldValue>,
    shared: Option<&'a FieldValue>,
}

impl<'a> FieldRef<'a> {
    fn chain(&self) -> impl Iterator<Item = &'a FieldValue> {
        self.variant.into_iter().chain(self.shared)
    }

    /// First non-empty text down the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wikibox::{AttributeBox, FieldValue, VariantSlot};
    ///
    /// let boxed = AttributeBox::new()
    ///     .with("examine", FieldValue::text("A razor-sharp sword."))
    ///     .with("examine2", FieldValue::text(""));
    ///
    /// // The empty variant text falls through to the shared default.
    /// let slot = VariantSlot::try_from(2).ok();
    /// assert_eq!(
    ///     boxed.field(slot, "examine").text(),
    ///     Some("A razor-sharp sword.")
    /// );
    /// ```
    pub fn text(&self) -> Option<&'a str> {
        self.chain()
            .filter_map(|v| v.text.as_deref())
            .find(|t| !t.is_empty())
    }

    /// First finite non-zero number down the chain.
    ///
    /// An explicit variant `0` falls through to the shared default,
    /// and a shared `0` resolves to `None`.
    pub fn number(&self) -> Option<f64> {
        self.chain()
            .filter_map(|v| v.number)
            .find(|n| *n != 0.0 && !n.is_nan())
    }

    /// Whether any value down the chain is exactly `"Yes"`.
    pub fn is_yes(&self) -> bool {
        self.chain().any(|v| v.text.as_deref() == Some("Yes"))
    }

    /// Whether any value down the chain contains `"Yes"`.
    pub fn contains_yes(&self) -> bool {
        self.chain()
            .any(|v| v.text.as_deref().is_some_and(|t| t.contains("Yes")))
    }

    /// Whether any value down the chain matches an allow-list entry
    /// exactly.
    pub fn text_in(&self, allowed: &[&str]) -> bool {
        self.chain()
            .any(|v| v.text.as_deref().is_some_and(|t| allowed.contains(&t)))
    }

    /// Comma-split list of the resolved text, entries trimmed.
    pub fn list(&self) -> Option<Vec<String>> {
        self.text()
            .map(|t| t.split(',').map(|s| s.trim().to_owned()).collect())
    }

    /// Comma-split list of the resolved text, entries kept verbatim.
    pub fn list_untrimmed(&self) -> Option<Vec<String>> {
        self.text()
            .map(|t| t.split(',').map(str::to_owned).collect())
    }
}
