// example/src/main.rs

use brine_fbs::*;
use brine_fbs_schema::{EnumRef, StructRef};

/// A small game model: a union of weapons carried by a monster.
fn monster_schema() -> Schema {
    let ns = Namespace::new(["MyGame", "Sample"]);
    let float = TypeRef::scalar(ScalarKind::Float);

    let color = EnumDef::new("Color", ns.clone(), ScalarKind::Byte, vec![
        EnumVal::new("Red", 0),
        EnumVal::new("Green", 1),
        EnumVal::new("Blue", 2),
    ]);
    let equipment = EnumDef::union("Equipment", ns.clone(), vec![
        EnumVal::member("Weapon", 1, TypeRef::Struct(StructRef(1))),
    ]);

    let vec3 = StructDef::fixed("Vec3", ns.clone(), vec![
        FieldDef::inline("x", float.clone(), 0, 0),
        FieldDef::inline("y", float.clone(), 4, 0),
        FieldDef::inline("z", float, 8, 0),
    ], 12, 4);
    let weapon = StructDef::table("Weapon", ns.clone(), vec![
        FieldDef::slot("name", TypeRef::String, 0),
        FieldDef::slot("damage", TypeRef::scalar(ScalarKind::Short), 1),
    ]);
    let monster = StructDef::table("Monster", ns.clone(), vec![
        FieldDef::slot("pos", TypeRef::Struct(StructRef(0)), 0),
        FieldDef::slot("mana", TypeRef::scalar(ScalarKind::Short), 1).with_default("150"),
        FieldDef::slot("hp", TypeRef::scalar(ScalarKind::Short), 2).with_default("100"),
        FieldDef::slot("name", TypeRef::String, 3),
        FieldDef::slot("friendly", TypeRef::Bool, 4).deprecated(),
        FieldDef::slot("inventory", TypeRef::vector(TypeRef::scalar(ScalarKind::UByte)), 5),
        FieldDef::slot("color", TypeRef::enumeration(ScalarKind::Byte, EnumRef(0)), 6).with_default("2"),
        FieldDef::slot("weapons", TypeRef::vector(TypeRef::Struct(StructRef(1))), 7),
        FieldDef::slot("equipped_type", TypeRef::enumeration(ScalarKind::UType, EnumRef(1)), 8),
        FieldDef::slot("equipped", TypeRef::Union(EnumRef(1)), 9),
    ])
    .with_doc(" A monster roaming the sample world.");

    Schema {
        enums: vec![color, equipment],
        structs: vec![vec3, weapon, monster],
        namespaces: vec![ns],
        root: Some(StructRef(2)),
    }
}

fn main() -> Result<(), CodegenError> {
    let schema = monster_schema();

    // The model travels as JSON between a schema front end and the generator.
    let json = schema_to_json(&schema)?;
    println!("model: {} bytes of JSON", json.len());

    let options = GenOptions {
        generate_mutators: true,
        generate_native_objects: true,
        ..GenOptions::default()
    };
    let units = generate_go_from_json(&json, &options)?;

    for unit in &units {
        println!("==== {} (package {}) ====", unit.path.display(), unit.package);
        println!("{}", unit.contents);
    }

    let single = GenOptions { one_file_output: true, file_stem: "monster".to_owned(), ..options };
    let combined = generate_go(&schema, &single)?;
    println!("one-file mode: {} ({} bytes)", combined[0].path.display(), combined[0].contents.len());

    let value: serde_json::Value = serde_json::from_str(&json)?;
    println!("root type index: {}", value["root"]);
    Ok(())
}
