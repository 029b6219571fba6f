//! Item example: resolving a multi-variant record for two instance ids
//!
//! This example demonstrates:
//! - Ingesting an attribute box from the upstream parser's JSON
//! - Variant identification (list mode)
//! - Item projection with an equipment bonus section

use wikibox::*;

fn main() -> Result<(), BoxError> {
    // One template covering a charged and an uncharged form.
    let boxed = AttributeBox::from_json(serde_json::json!({
        "name": { "text": "Amulet of glory" },
        "name2": { "text": "Amulet of glory (uncharged)" },
        "id1": { "text": "1712,1710,1708,1706" },
        "id2": { "text": "1704" },
        "weight": { "text": "0.01" },
        "equipable": { "text": "Yes" }
    }))?;

    let bonuses = AttributeBox::from_json(serde_json::json!({
        "amagic": { "text": "+10" },
        "dmagic": { "text": "+10" },
        "str": { "text": "+6" },
        "prayer": { "text": "+3" },
        "slot": { "text": "neck" }
    }))?;

    for id in [1712, 1704, 9999] {
        println!("Resolving instance {id}...");
        match resolve_variant(&boxed, id) {
            Some(slot) => println!("  matched variant slot {slot}"),
            None => println!("  no variant matched, shared defaults apply"),
        }

        let item = project_item(&boxed, std::slice::from_ref(&bonuses), id, None);
        println!("  name: {}", item.name);
        println!("  weight: {}", item.weight);
        if let Some(equipment) = &item.equipment {
            println!(
                "  equipment: slot={:?} str=+{} prayer=+{}",
                equipment.equipment_slot, equipment.strength_bonus, equipment.prayer
            );
        }
        println!();
    }

    Ok(())
}
