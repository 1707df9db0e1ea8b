use brine_fbs_schema::FieldPosition;

use super::{offset_prefix, receiver, Field};
use crate::{
    context::{cast_to_basic, GenContext},
    types::{Elem, Shape},
};

/// In-place setters. Only scalars can be overwritten without moving data:
/// scalar fields, scalar elements of vectors and of fixed-length arrays.
pub fn gen_mutator(ctx: &mut GenContext, name: &str, field: &Field, code: &mut String) {
    let f = &field.name;
    match (field.shape, field.def.position) {
        (Shape::Scalar(s), FieldPosition::Inline { offset, .. }) => {
            let ty = ctx.scalar_type(s);
            code.push_str(&receiver(name));
            code.push_str(&format!("Mutate{}(n {}) bool {{\n", f, ty));
            code.push_str(&format!(
                "\treturn rcv._tab.Mutate{}(rcv._tab.Pos+flatbuffers.UOffsetT({}), {})\n",
                s.basic.method(),
                offset,
                cast_to_basic(s, "n")
            ));
            code.push_str("}\n\n");
        }
        (Shape::Scalar(s), FieldPosition::Slot(slot)) => {
            let ty = ctx.scalar_type(s);
            code.push_str(&receiver(name));
            code.push_str(&format!("Mutate{}(n {}) bool {{\n", f, ty));
            code.push_str(&format!(
                "\treturn rcv._tab.Mutate{}Slot({}, {})\n",
                s.basic.method(),
                FieldPosition::vtable_offset(slot),
                cast_to_basic(s, "n")
            ));
            code.push_str("}\n\n");
        }
        (Shape::Vector(Elem::Scalar(s)), FieldPosition::Slot(slot)) => {
            let ty = ctx.scalar_type(s);
            code.push_str(&receiver(name));
            code.push_str(&format!("Mutate{}(j int, n {}) bool", f, ty));
            code.push_str(&offset_prefix(slot));
            code.push_str("\t\ta := rcv._tab.Vector(o)\n");
            code.push_str(&format!(
                "\t\treturn rcv._tab.Mutate{}(a+flatbuffers.UOffsetT(j*{}), {})\n",
                s.basic.method(),
                s.basic.size(),
                cast_to_basic(s, "n")
            ));
            code.push_str("\t}\n");
            code.push_str("\treturn false\n");
            code.push_str("}\n\n");
        }
        (Shape::Array(Elem::Scalar(s), n), FieldPosition::Inline { offset, .. }) => {
            let ty = ctx.scalar_type(s);
            code.push_str(&receiver(name));
            code.push_str(&format!("Mutate{}(j int, n {}) bool {{\n", f, ty));
            code.push_str(&format!("\tif j < 0 || j >= {} {{\n\t\treturn false\n\t}}\n", n));
            code.push_str(&format!(
                "\treturn rcv._tab.Mutate{}(rcv._tab.Pos+flatbuffers.UOffsetT({}+j*{}), {})\n",
                s.basic.method(),
                offset,
                s.basic.size(),
                cast_to_basic(s, "n")
            ));
            code.push_str("}\n\n");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_fbs_schema::{EnumDef, EnumRef, EnumVal, FieldDef, Namespace, ScalarKind, Schema, StructDef, TypeRef};

    use crate::{ident::resolve, options::GenOptions};

    fn mutator(schema: &Schema, def: usize, field: usize) -> String {
        let opts = GenOptions::default();
        let mut ctx = GenContext::new(schema, &opts);
        let def = &schema.structs[def];
        ctx.enter(&def.namespace);
        let f = &def.fields[field];
        let field = Field {
            def:   f,
            shape: Shape::of(schema, &def.name, &f.ty).unwrap(),
            name:  resolve(&f.name, true),
            var:   resolve(&f.name, false),
        };
        let mut code = String::new();
        gen_mutator(&mut ctx, &def.name, &field, &mut code);
        code
    }

    fn schema() -> Schema {
        let ns = Namespace::new(["S"]);
        let color = TypeRef::enumeration(ScalarKind::Byte, EnumRef(0));
        Schema {
            enums: vec![EnumDef::new("Color", ns.clone(), ScalarKind::Byte, vec![EnumVal::new("Red", 0)])],
            structs: vec![
                StructDef::fixed("Cell", ns.clone(), vec![
                    FieldDef::inline("hp", TypeRef::scalar(ScalarKind::Short), 0, 2),
                    FieldDef::inline("marks", TypeRef::array(TypeRef::Bool, 3), 4, 1),
                ], 8, 2),
                StructDef::table("Body", ns, vec![
                    FieldDef::slot("color", color.clone(), 0),
                    FieldDef::slot("name", TypeRef::String, 1),
                    FieldDef::slot("scores", TypeRef::vector(TypeRef::scalar(ScalarKind::UShort)), 2),
                    FieldDef::slot("palette", TypeRef::vector(color), 3),
                ]),
            ],
            ..Schema::default()
        }
    }

    #[test]
    fn test_struct_scalar_mutator() {
        let code = mutator(&schema(), 0, 0);
        assert_eq!(
            code,
            "func (rcv *Cell) MutateHp(n int16) bool {\n\treturn rcv._tab.MutateInt16(rcv._tab.Pos+flatbuffers.UOffsetT(0), n)\n}\n\n"
        );
    }

    #[test]
    fn test_array_element_mutator_is_bounds_checked() {
        let code = mutator(&schema(), 0, 1);
        assert!(code.contains("func (rcv *Cell) MutateMarks(j int, n bool) bool {\n\tif j < 0 || j >= 3 {\n"));
        assert!(code.contains("\treturn rcv._tab.MutateBool(rcv._tab.Pos+flatbuffers.UOffsetT(4+j*1), n)\n"));
    }

    #[test]
    fn test_enum_slot_mutator_casts_to_underlying() {
        let code = mutator(&schema(), 1, 0);
        assert_eq!(
            code,
            "func (rcv *Body) MutateColor(n Color) bool {\n\treturn rcv._tab.MutateInt8Slot(4, int8(n))\n}\n\n"
        );
    }

    #[test]
    fn test_no_mutator_for_strings() {
        assert!(mutator(&schema(), 1, 1).is_empty());
    }

    #[test]
    fn test_vector_element_mutators() {
        let code = mutator(&schema(), 1, 2);
        assert!(code.contains("func (rcv *Body) MutateScores(j int, n uint16) bool {\n"));
        assert!(code.contains("\t\treturn rcv._tab.MutateUint16(a+flatbuffers.UOffsetT(j*2), n)\n"));

        let code = mutator(&schema(), 1, 3);
        assert!(code.contains("\t\treturn rcv._tab.MutateInt8(a+flatbuffers.UOffsetT(j*1), int8(n))\n"));
    }
}
