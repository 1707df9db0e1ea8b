use brine_fbs_schema::{FieldPosition, StructDef};

use super::Field;
use crate::{
    context::{cast_to_basic, GenContext},
    error::CodegenError,
    ident::resolve,
    types::{Elem, Shape},
};

/// Builder arguments of nested structs are flattened. The path from the outer
/// struct to a leaf becomes the leaf's argument prefix, so `pos.x` is `pos__x`
/// and `corners[1].x` is `corners1_x`.
#[derive(Debug, Clone, Default)]
struct BuilderPath {
    prefix: String,
}

impl BuilderPath {
    fn field(&self, name: &str) -> Self {
        BuilderPath { prefix: format!("{}{}__", self.prefix, resolve(name, false)) }
    }

    fn element(&self, name: &str, index: u16) -> Self {
        BuilderPath { prefix: format!("{}{}{}_", self.prefix, resolve(name, false), index) }
    }

    fn leaf(&self, name: &str) -> String {
        format!("{}{}", self.prefix, resolve(name, false))
    }
}

/// `CreateName(builder, leaves...)`: writes a struct back to front.
pub fn gen_struct_builder(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    code: &mut String,
) -> Result<(), CodegenError> {
    let mut params = vec!["builder *flatbuffers.Builder".to_owned()];
    struct_params(ctx, def, &BuilderPath::default(), &mut params)?;

    if params.len() > 4 {
        code.push_str(&format!("func Create{}(\n", name));
        for param in &params {
            code.push_str(&format!("\t{},\n", param));
        }
        code.push_str(") flatbuffers.UOffsetT {\n");
    } else {
        code.push_str(&format!("func Create{}({}) flatbuffers.UOffsetT {{\n", name, params.join(", ")));
    }
    struct_body(ctx, def, &BuilderPath::default(), code)?;
    code.push_str("\treturn builder.Offset()\n");
    code.push_str("}\n\n");
    Ok(())
}

fn struct_params(
    ctx: &mut GenContext,
    def: &StructDef,
    path: &BuilderPath,
    params: &mut Vec<String>,
) -> Result<(), CodegenError> {
    for field in &def.fields {
        match Shape::of(ctx.schema, &def.name, &field.ty)? {
            Shape::Struct(inner) => struct_params(ctx, inner, &path.field(&field.name), params)?,
            Shape::Array(Elem::Struct(inner), n) => {
                for i in 0..n {
                    struct_params(ctx, inner, &path.element(&field.name, i), params)?;
                }
            }
            Shape::Array(Elem::Scalar(s), n) => {
                params.push(format!("{} [{}]{}", path.leaf(&field.name), n, ctx.scalar_type(s)));
            }
            Shape::Scalar(s) => {
                params.push(format!("{} {}", path.leaf(&field.name), ctx.scalar_type(s)));
            }
            _ => return Err(CodegenError::invariant(&def.name, "struct fields must be stored inline")),
        }
    }
    Ok(())
}

/// Fields are prepended last to first, each preceded by its trailing padding.
/// Nested structs and array elements recurse with their own alignment.
fn struct_body(
    ctx: &mut GenContext,
    def: &StructDef,
    path: &BuilderPath,
    code: &mut String,
) -> Result<(), CodegenError> {
    code.push_str(&format!("\tbuilder.Prep({}, {})\n", def.min_align, def.byte_size));
    for field in def.fields.iter().rev() {
        if let FieldPosition::Inline { padding, .. } = field.position {
            if padding > 0 {
                code.push_str(&format!("\tbuilder.Pad({})\n", padding));
            }
        }
        match Shape::of(ctx.schema, &def.name, &field.ty)? {
            Shape::Struct(inner) => struct_body(ctx, inner, &path.field(&field.name), code)?,
            Shape::Array(Elem::Struct(inner), n) => {
                for i in (0..n).rev() {
                    struct_body(ctx, inner, &path.element(&field.name, i), code)?;
                }
            }
            Shape::Array(Elem::Scalar(s), n) => {
                let value = format!("{}[j]", path.leaf(&field.name));
                code.push_str(&format!("\tfor j := {}; j >= 0; j-- {{\n", n as i32 - 1));
                code.push_str(&format!("\t\tbuilder.Prepend{}({})\n", s.basic.method(), cast_to_basic(s, &value)));
                code.push_str("\t}\n");
            }
            Shape::Scalar(s) => {
                let value = path.leaf(&field.name);
                code.push_str(&format!("\tbuilder.Prepend{}({})\n", s.basic.method(), cast_to_basic(s, &value)));
            }
            _ => return Err(CodegenError::invariant(&def.name, "struct fields must be stored inline")),
        }
    }
    Ok(())
}

/// `NameStart`, one `NameAddField` per field, vector helpers and `NameEnd`.
pub fn gen_table_builders(ctx: &mut GenContext, def: &StructDef, name: &str, fields: &[Field], code: &mut String) {
    code.push_str(&format!("func {}Start(builder *flatbuffers.Builder) {{\n", name));
    code.push_str(&format!("\tbuilder.StartObject({})\n", def.slot_count()));
    code.push_str("}\n\n");

    for field in fields {
        let slot = match field.def.position {
            FieldPosition::Slot(slot) => slot,
            FieldPosition::Inline { .. } => continue,
        };
        gen_add(ctx, name, field, slot, code);
        if let Shape::Vector(elem) = field.shape {
            gen_vector_helpers(name, &field.name, elem, code);
        }
    }

    code.push_str(&format!("func {}End(builder *flatbuffers.Builder) flatbuffers.UOffsetT {{\n", name));
    code.push_str("\treturn builder.EndObject()\n");
    code.push_str("}\n\n");
}

fn gen_add(ctx: &mut GenContext, name: &str, field: &Field, slot: u16, code: &mut String) {
    let v = &field.var;
    let (param_ty, call) = match field.shape {
        Shape::Scalar(s) => (
            ctx.scalar_type(s),
            format!(
                "builder.Prepend{}Slot({}, {}, {})",
                s.basic.method(),
                slot,
                cast_to_basic(s, v),
                s.literal(&field.def.default)
            ),
        ),
        Shape::Struct(inner) if inner.fixed => (
            "flatbuffers.UOffsetT".to_owned(),
            format!("builder.PrependStructSlot({}, flatbuffers.UOffsetT({}), 0)", slot, v),
        ),
        _ => (
            "flatbuffers.UOffsetT".to_owned(),
            format!("builder.PrependUOffsetTSlot({}, flatbuffers.UOffsetT({}), 0)", slot, v),
        ),
    };
    code.push_str(&format!(
        "func {}Add{}(builder *flatbuffers.Builder, {} {}) {{\n",
        name, field.name, v, param_ty
    ));
    code.push_str(&format!("\t{}\n", call));
    code.push_str("}\n\n");
}

fn gen_vector_helpers(name: &str, f: &str, elem: Elem, code: &mut String) {
    code.push_str(&format!(
        "func {}Start{}Vector(builder *flatbuffers.Builder, numElems int) flatbuffers.UOffsetT {{\n",
        name, f
    ));
    code.push_str(&format!("\treturn builder.StartVector({}, numElems, {})\n", elem.size(), elem.alignment()));
    code.push_str("}\n\n");

    code.push_str(&format!(
        "func {}End{}Vector(builder *flatbuffers.Builder, numElems int) flatbuffers.UOffsetT {{\n",
        name, f
    ));
    code.push_str("\treturn builder.EndVector(numElems)\n");
    code.push_str("}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_fbs_schema::{EnumDef, EnumRef, EnumVal, FieldDef, Namespace, ScalarKind, Schema, StructRef, TypeRef};

    use crate::options::GenOptions;

    fn schema() -> Schema {
        let ns = Namespace::new(["S"]);
        let float = TypeRef::scalar(ScalarKind::Float);
        Schema {
            enums: vec![EnumDef::new("Color", ns.clone(), ScalarKind::Byte, vec![EnumVal::new("Red", 0)])],
            structs: vec![
                StructDef::fixed("Vec2", ns.clone(), vec![
                    FieldDef::inline("x", float.clone(), 0, 0),
                    FieldDef::inline("y", float, 4, 0),
                ], 8, 4),
                StructDef::fixed("Tile", ns.clone(), vec![
                    FieldDef::inline("color", TypeRef::enumeration(ScalarKind::Byte, EnumRef(0)), 0, 3),
                    FieldDef::inline("pos", TypeRef::Struct(StructRef(0)), 4, 0),
                    FieldDef::inline("corners", TypeRef::array(TypeRef::Struct(StructRef(0)), 2), 12, 0),
                    FieldDef::inline("heights", TypeRef::array(TypeRef::scalar(ScalarKind::Short), 3), 28, 2),
                ], 36, 4),
                StructDef::table("Map", ns, vec![
                    FieldDef::slot("name", TypeRef::String, 0),
                    FieldDef::slot("old", TypeRef::scalar(ScalarKind::Int), 1).deprecated(),
                    FieldDef::slot("origin", TypeRef::Struct(StructRef(0)), 2),
                    FieldDef::slot("visible", TypeRef::Bool, 3).with_default("1"),
                    FieldDef::slot("tiles", TypeRef::vector(TypeRef::Struct(StructRef(1))), 4),
                ]),
            ],
            namespaces: vec![Namespace::new(["S"])],
            ..Schema::default()
        }
    }

    fn struct_builder(schema: &Schema, index: usize) -> String {
        let opts = GenOptions::default();
        let mut ctx = GenContext::new(schema, &opts);
        let def = &schema.structs[index];
        ctx.enter(&def.namespace);
        let mut code = String::new();
        gen_struct_builder(&mut ctx, def, &def.name, &mut code).unwrap();
        code
    }

    #[test]
    fn test_simple_struct_builder() {
        let code = struct_builder(&schema(), 0);
        assert_eq!(
            code,
            "func CreateVec2(builder *flatbuffers.Builder, x float32, y float32) flatbuffers.UOffsetT {\n\
             \tbuilder.Prep(4, 8)\n\
             \tbuilder.PrependFloat32(y)\n\
             \tbuilder.PrependFloat32(x)\n\
             \treturn builder.Offset()\n\
             }\n\n"
        );
    }

    #[test]
    fn test_nested_struct_builder_flattens_arguments() {
        let code = struct_builder(&schema(), 1);
        assert!(code.contains("\tcolor Color,\n\tpos__x float32,\n\tpos__y float32,\n"));
        assert!(code.contains("\tcorners0_x float32,\n\tcorners0_y float32,\n\tcorners1_x float32,\n"));
        assert!(code.contains("\theights [3]int16,\n) flatbuffers.UOffsetT {\n"));
    }

    #[test]
    fn test_nested_struct_builder_writes_back_to_front() {
        let code = struct_builder(&schema(), 1);
        let expected = "\tbuilder.Prep(4, 36)\n\
                        \tbuilder.Pad(2)\n\
                        \tfor j := 2; j >= 0; j-- {\n\
                        \t\tbuilder.PrependInt16(heights[j])\n\
                        \t}\n\
                        \tbuilder.Prep(4, 8)\n\
                        \tbuilder.PrependFloat32(corners1_y)\n\
                        \tbuilder.PrependFloat32(corners1_x)\n\
                        \tbuilder.Prep(4, 8)\n\
                        \tbuilder.PrependFloat32(corners0_y)\n\
                        \tbuilder.PrependFloat32(corners0_x)\n\
                        \tbuilder.Prep(4, 8)\n\
                        \tbuilder.PrependFloat32(pos__y)\n\
                        \tbuilder.PrependFloat32(pos__x)\n\
                        \tbuilder.Pad(3)\n\
                        \tbuilder.PrependInt8(int8(color))\n\
                        \treturn builder.Offset()\n";
        assert!(code.contains(expected), "{}", code);
    }

    #[test]
    fn test_table_builders() {
        let schema = schema();
        let opts = GenOptions::default();
        let mut ctx = GenContext::new(&schema, &opts);
        let def = &schema.structs[2];
        ctx.enter(&def.namespace);
        let fields = super::super::fields(&schema, def).unwrap();
        let mut code = String::new();
        gen_table_builders(&mut ctx, def, "Map", &fields, &mut code);

        assert!(code.starts_with("func MapStart(builder *flatbuffers.Builder) {\n\tbuilder.StartObject(5)\n}\n\n"));
        assert!(code.contains("func MapAddName(builder *flatbuffers.Builder, name flatbuffers.UOffsetT) {\n\tbuilder.PrependUOffsetTSlot(0, flatbuffers.UOffsetT(name), 0)\n}\n"));
        assert!(!code.contains("MapAddOld"));
        assert!(code.contains("\tbuilder.PrependStructSlot(2, flatbuffers.UOffsetT(origin), 0)\n"));
        assert!(code.contains("func MapAddVisible(builder *flatbuffers.Builder, visible bool) {\n\tbuilder.PrependBoolSlot(3, visible, true)\n}\n"));
        assert!(code.contains("func MapStartTilesVector(builder *flatbuffers.Builder, numElems int) flatbuffers.UOffsetT {\n\treturn builder.StartVector(36, numElems, 4)\n}\n"));
        assert!(code.contains("func MapEndTilesVector(builder *flatbuffers.Builder, numElems int) flatbuffers.UOffsetT {\n\treturn builder.EndVector(numElems)\n}\n"));
        assert!(code.ends_with("func MapEnd(builder *flatbuffers.Builder) flatbuffers.UOffsetT {\n\treturn builder.EndObject()\n}\n\n"));
    }
}
