#![allow(dead_code)]

use brine_fbs_schema::{
    EnumDef, EnumRef, EnumVal, FieldDef, Namespace, ScalarKind, Schema, StructDef, StructRef, TypeRef,
};

/// enum Color : byte { Red, Green, Blue }
/// table Point { x:int; y:int; c:Color; }
pub fn color_point() -> Schema {
    let ns = Namespace::new(["Sample"]);
    Schema {
        enums: vec![EnumDef::new("Color", ns.clone(), ScalarKind::Byte, vec![
            EnumVal::new("Red", 0),
            EnumVal::new("Green", 1),
            EnumVal::new("Blue", 2),
        ])],
        structs: vec![StructDef::table("Point", ns.clone(), vec![
            FieldDef::slot("x", TypeRef::scalar(ScalarKind::Int), 0),
            FieldDef::slot("y", TypeRef::scalar(ScalarKind::Int), 1),
            FieldDef::slot("c", TypeRef::enumeration(ScalarKind::Byte, EnumRef(0)), 2),
        ])],
        namespaces: vec![ns],
        root: Some(StructRef(0)),
    }
}

/// struct Vec3 { x:float; y:float; z:float; }
/// table Body { v:Vec3; }
pub fn vec3_body() -> Schema {
    let ns = Namespace::new(["Physics"]);
    let float = TypeRef::scalar(ScalarKind::Float);
    Schema {
        enums: vec![],
        structs: vec![
            StructDef::fixed("Vec3", ns.clone(), vec![
                FieldDef::inline("x", float.clone(), 0, 0),
                FieldDef::inline("y", float.clone(), 4, 0),
                FieldDef::inline("z", float, 8, 0),
            ], 12, 4),
            StructDef::table("Body", ns.clone(), vec![
                FieldDef::slot("v", TypeRef::Struct(StructRef(0)), 0),
            ]),
        ],
        namespaces: vec![ns],
        root: Some(StructRef(1)),
    }
}

/// table Circle { radius:int; }
/// table Square { side:int; }
/// union Shape { Circle, Square }
/// table Canvas { shape:Shape; }
pub fn shape_canvas() -> Schema {
    let ns = Namespace::new(["Draw"]);
    Schema {
        enums: vec![EnumDef::union("Shape", ns.clone(), vec![
            EnumVal::member("Circle", 1, TypeRef::Struct(StructRef(0))),
            EnumVal::member("Square", 2, TypeRef::Struct(StructRef(1))),
        ])],
        structs: vec![
            StructDef::table("Circle", ns.clone(), vec![
                FieldDef::slot("radius", TypeRef::scalar(ScalarKind::Int), 0),
            ]),
            StructDef::table("Square", ns.clone(), vec![
                FieldDef::slot("side", TypeRef::scalar(ScalarKind::Int), 0),
            ]),
            StructDef::table("Canvas", ns.clone(), vec![
                FieldDef::slot("shape_type", TypeRef::enumeration(ScalarKind::UType, EnumRef(0)), 0),
                FieldDef::slot("shape", TypeRef::Union(EnumRef(0)), 1),
            ]),
        ],
        namespaces: vec![ns],
        root: Some(StructRef(2)),
    }
}

/// namespace B: enum Kind; struct Pair
/// namespace A: table Holder { kind:B.Kind; pair:B.Pair; kinds:[B.Kind]; }
pub fn foreign_refs() -> Schema {
    let a = Namespace::new(["A"]);
    let b = Namespace::new(["B"]);
    let kind = TypeRef::enumeration(ScalarKind::Short, EnumRef(0));
    Schema {
        enums: vec![EnumDef::new("Kind", b.clone(), ScalarKind::Short, vec![
            EnumVal::new("Small", 0),
            EnumVal::new("Large", 1),
        ])],
        structs: vec![
            StructDef::fixed("Pair", b.clone(), vec![
                FieldDef::inline("a", TypeRef::scalar(ScalarKind::Int), 0, 0),
                FieldDef::inline("b", TypeRef::scalar(ScalarKind::Int), 4, 0),
            ], 8, 4),
            StructDef::table("Holder", a.clone(), vec![
                FieldDef::slot("kind", kind.clone(), 0),
                FieldDef::slot("pair", TypeRef::Struct(StructRef(0)), 1),
                FieldDef::slot("kinds", TypeRef::vector(kind), 2),
            ]),
        ],
        namespaces: vec![a, b],
        root: None,
    }
}

/// table Tagged { type:int; type_:int; }
pub fn keyword_fields() -> Schema {
    let ns = Namespace::new(["Tags"]);
    Schema {
        enums: vec![],
        structs: vec![StructDef::table("Tagged", ns.clone(), vec![
            FieldDef::slot("type", TypeRef::scalar(ScalarKind::Int), 0),
            FieldDef::slot("type_", TypeRef::scalar(ScalarKind::Int), 1),
        ])],
        namespaces: vec![ns],
        root: None,
    }
}

/// struct Grid { cells:[int:4]; }
pub fn grid() -> Schema {
    let ns = Namespace::new(["Maps"]);
    Schema {
        enums: vec![],
        structs: vec![StructDef::fixed("Grid", ns.clone(), vec![
            FieldDef::inline("cells", TypeRef::array(TypeRef::scalar(ScalarKind::Int), 4), 0, 0),
        ], 16, 4)],
        namespaces: vec![ns],
        root: None,
    }
}

/// table Note { text:string; }
/// union Content { Note, Label:string }
/// table Board { items:[Content]; pinned:Content; }
pub fn content_board() -> Schema {
    let ns = Namespace::new(["Pin"]);
    let selector = TypeRef::enumeration(ScalarKind::UType, EnumRef(0));
    Schema {
        enums: vec![EnumDef::union("Content", ns.clone(), vec![
            EnumVal::member("Note", 1, TypeRef::Struct(StructRef(0))),
            EnumVal::member("Label", 2, TypeRef::String),
        ])],
        structs: vec![
            StructDef::table("Note", ns.clone(), vec![
                FieldDef::slot("text", TypeRef::String, 0),
            ]),
            StructDef::table("Board", ns.clone(), vec![
                FieldDef::slot("items_type", TypeRef::vector(selector.clone()), 0),
                FieldDef::slot("items", TypeRef::vector(TypeRef::Union(EnumRef(0))), 1),
                FieldDef::slot("pinned_type", selector, 2),
                FieldDef::slot("pinned", TypeRef::Union(EnumRef(0)), 3),
            ]),
        ],
        namespaces: vec![ns],
        root: Some(StructRef(1)),
    }
}
