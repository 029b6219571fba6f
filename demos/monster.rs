//! Monster example: projecting combat stats and sub-groups
//!
//! This example demonstrates:
//! - Building an attribute box by hand
//! - Sub-group omission (empty groups disappear from the output)
//! - Serializing the projection to JSON

use wikibox::*;

fn main() -> Result<(), BoxError> {
    let boxed = AttributeBox::new()
        .with("id1", FieldValue::text("415,416"))
        .with("id2", FieldValue::text("7410"))
        .with("hitpoints", FieldValue::number(150.0))
        .with("hitpoints2", FieldValue::number(400.0))
        .with("att", FieldValue::number(97.0))
        .with("def", FieldValue::number(135.0))
        .with("slaylvl", FieldValue::number(85.0))
        .with("cat", FieldValue::text("Abyssal demons"))
        .with("immunepoison", FieldValue::text("Immune"))
        .with("examine", FieldValue::text("A denizen of the Abyss!"));

    for (id, label) in [(415, "regular"), (7410, "boss")] {
        let monster = project_monster(&boxed, id, "Abyssal demon");
        println!("=== {} (id {}) ===", label, id);
        if let Some(levels) = &monster.levels {
            println!("hitpoints: {}", levels.hitpoints);
            println!("attack:    {}", levels.attack_level);
        }
        if let Some(slayer) = &monster.slayer {
            println!("slayer:    level {:?}, {:?}", slayer.slayer_level, slayer.category);
        }
        println!("json:\n{}\n", serde_json::to_string_pretty(&monster).unwrap());
    }

    Ok(())
}
