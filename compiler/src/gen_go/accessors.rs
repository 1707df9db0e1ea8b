use brine_fbs_schema::{FieldPosition, StructDef};

use super::{offset_prefix, receiver, Field};
use crate::{
    context::GenContext,
    error::CodegenError,
    types::{Elem, Scalar, Shape},
};

/// `type Name struct { _tab flatbuffers.Table }`, or `flatbuffers.Struct` for structs.
pub fn gen_type_decl(def: &StructDef, name: &str, code: &mut String) {
    let tab = if def.fixed { "Struct" } else { "Table" };
    code.push_str(&format!("type {} struct {{\n\t_tab flatbuffers.{}\n}}\n\n", name, tab));
}

/// Package-level constructors (root, union member, vector-of-unions member),
/// then `Init` and `Table`.
pub fn gen_shortcuts(def: &StructDef, name: &str, code: &mut String) {
    if !def.fixed {
        code.push_str(&format!("// GetRootAs{} shortcut to access root table\n", name));
        code.push_str(&format!(
            "func GetRootAs{0}(buf []byte, offset flatbuffers.UOffsetT) *{0} {{\n",
            name
        ));
        code.push_str("\tn := flatbuffers.GetUOffsetT(buf[offset:])\n");
        code.push_str(&format!("\tx := &{}{{}}\n", name));
        code.push_str("\tx.Init(buf, n+offset)\n");
        code.push_str("\treturn x\n");
        code.push_str("}\n\n");
    }

    let kind = if def.fixed { "Struct" } else { "Table" };
    let noun = kind.to_lowercase();
    code.push_str(&format!(
        "// Get{0}VectorAs{1} shortcut to access {2} in vector of unions\n",
        kind, name, noun
    ));
    code.push_str(&format!("func Get{}VectorAs{1}(table *flatbuffers.Table) *{1} {{\n", kind, name));
    code.push_str("\tn := flatbuffers.GetUOffsetT(table.Bytes[table.Pos:])\n");
    code.push_str(&format!("\tx := &{}{{}}\n", name));
    code.push_str("\tx.Init(table.Bytes, n+table.Pos)\n");
    code.push_str("\treturn x\n");
    code.push_str("}\n\n");

    code.push_str(&format!(
        "// Get{0}As{1} shortcut to access {2} in single union field\n",
        kind, name, noun
    ));
    code.push_str(&format!("func Get{}As{1}(table *flatbuffers.Table) *{1} {{\n", kind, name));
    code.push_str(&format!("\tx := &{}{{}}\n", name));
    code.push_str("\tx.Init(table.Bytes, table.Pos)\n");
    code.push_str("\treturn x\n");
    code.push_str("}\n\n");

    code.push_str(&receiver(name));
    code.push_str("Init(buf []byte, i flatbuffers.UOffsetT) {\n");
    code.push_str("\trcv._tab.Bytes = buf\n");
    code.push_str("\trcv._tab.Pos = i\n");
    code.push_str("}\n\n");

    code.push_str(&receiver(name));
    code.push_str("Table() flatbuffers.Table {\n");
    if def.fixed {
        code.push_str("\treturn rcv._tab.Table\n");
    } else {
        code.push_str("\treturn rcv._tab\n");
    }
    code.push_str("}\n\n");
}

pub fn gen_accessor(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    field: &Field,
    code: &mut String,
) -> Result<(), CodegenError> {
    match field.def.position {
        FieldPosition::Inline { offset, .. } => gen_inline(ctx, def, name, field, offset, code),
        FieldPosition::Slot(slot) => gen_slot(ctx, def, name, field, slot, code),
    }
}

fn getter(ctx: &mut GenContext, scalar: Scalar, at: &str) -> String {
    let raw = format!("rcv._tab.Get{}({})", scalar.basic.method(), at);
    ctx.cast_to_enum(scalar, &raw)
}

/// Fields of a struct, read at a fixed offset from the struct's position.
fn gen_inline(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    field: &Field,
    offset: u32,
    code: &mut String,
) -> Result<(), CodegenError> {
    let f = &field.name;
    match field.shape {
        Shape::Scalar(s) => {
            let ty = ctx.scalar_type(s);
            let at = format!("rcv._tab.Pos + flatbuffers.UOffsetT({})", offset);
            code.push_str(&receiver(name));
            code.push_str(&format!("{}() {} {{\n", f, ty));
            code.push_str(&format!("\treturn {}\n", getter(ctx, s, &at)));
            code.push_str("}\n\n");
        }
        Shape::Struct(inner) => {
            let ty = ctx.struct_name(inner);
            code.push_str(&receiver(name));
            code.push_str(&format!("{}(obj *{1}) *{1} {{\n", f, ty));
            code.push_str("\tif obj == nil {\n");
            code.push_str(&format!("\t\tobj = new({})\n", ty));
            code.push_str("\t}\n");
            code.push_str(&format!("\tobj.Init(rcv._tab.Bytes, rcv._tab.Pos+{})\n", offset));
            code.push_str("\treturn obj\n");
            code.push_str("}\n\n");
        }
        Shape::Array(elem, n) => {
            let elem_ty = ctx.elem_type(elem);
            let size = elem.size();
            let result_ty = match elem {
                Elem::Struct(_) => format!("[{}]*{}", n, elem_ty),
                _ => format!("[{}]{}", n, elem_ty),
            };
            code.push_str(&receiver(name));
            code.push_str(&format!("{}() {} {{\n", f, result_ty));
            code.push_str(&format!("\tresult := {}{{}}\n", result_ty));
            code.push_str(&format!("\ta := rcv._tab.Pos + flatbuffers.UOffsetT({})\n", offset));
            code.push_str(&format!("\tfor j := 0; j < {}; j++ {{\n", n));
            match elem {
                Elem::Struct(_) => {
                    code.push_str(&format!("\t\tresult[j] = new({})\n", elem_ty));
                    code.push_str(&format!("\t\tresult[j].Init(rcv._tab.Bytes, a+flatbuffers.UOffsetT(j*{}))\n", size));
                }
                Elem::Scalar(s) => {
                    let at = format!("a + flatbuffers.UOffsetT(j*{})", size);
                    code.push_str(&format!("\t\tresult[j] = {}\n", getter(ctx, s, &at)));
                }
                Elem::String | Elem::Union(_) => {
                    return Err(CodegenError::invariant(&def.name, "arrays hold scalars or structs only"));
                }
            }
            code.push_str("\t}\n");
            code.push_str("\treturn result\n");
            code.push_str("}\n\n");

            code.push_str(&receiver(name));
            code.push_str(&format!("{}Length() int {{\n\treturn {}\n}}\n\n", f, n));
        }
        Shape::String | Shape::Union(_) | Shape::Vector(_) => {
            return Err(CodegenError::invariant(
                &def.name,
                format!("struct field {} is not stored inline", field.def.name),
            ));
        }
    }
    Ok(())
}

/// Fields of a table, reached through the vtable and absent when the slot is empty.
fn gen_slot(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    field: &Field,
    slot: u16,
    code: &mut String,
) -> Result<(), CodegenError> {
    let f = &field.name;
    let prefix = offset_prefix(slot);
    match field.shape {
        Shape::Scalar(s) => {
            let ty = ctx.scalar_type(s);
            code.push_str(&receiver(name));
            code.push_str(&format!("{}() {}", f, ty));
            code.push_str(&prefix);
            code.push_str(&format!("\t\treturn {}\n", getter(ctx, s, "o + rcv._tab.Pos")));
            code.push_str("\t}\n");
            code.push_str(&format!("\treturn {}\n", s.literal(&field.def.default)));
            code.push_str("}\n\n");
        }
        Shape::String => {
            code.push_str(&receiver(name));
            code.push_str(&format!("{}() []byte", f));
            code.push_str(&prefix);
            code.push_str("\t\treturn rcv._tab.ByteVector(o + rcv._tab.Pos)\n");
            code.push_str("\t}\n");
            code.push_str("\treturn nil\n");
            code.push_str("}\n\n");
        }
        Shape::Struct(inner) => {
            let ty = ctx.struct_name(inner);
            code.push_str(&receiver(name));
            code.push_str(&format!("{}(obj *{1}) *{1}", f, ty));
            code.push_str(&prefix);
            if inner.fixed {
                code.push_str("\t\tx := o + rcv._tab.Pos\n");
            } else {
                code.push_str("\t\tx := rcv._tab.Indirect(o + rcv._tab.Pos)\n");
            }
            code.push_str("\t\tif obj == nil {\n");
            code.push_str(&format!("\t\t\tobj = new({})\n", ty));
            code.push_str("\t\t}\n");
            code.push_str("\t\tobj.Init(rcv._tab.Bytes, x)\n");
            code.push_str("\t\treturn obj\n");
            code.push_str("\t}\n");
            code.push_str("\treturn nil\n");
            code.push_str("}\n\n");
        }
        Shape::Union(_) => {
            code.push_str(&receiver(name));
            code.push_str(&format!("{}(obj *flatbuffers.Table) bool", f));
            code.push_str(&prefix);
            code.push_str("\t\trcv._tab.Union(obj, o)\n");
            code.push_str("\t\treturn true\n");
            code.push_str("\t}\n");
            code.push_str("\treturn false\n");
            code.push_str("}\n\n");
        }
        Shape::Vector(elem) => {
            gen_vector_element(ctx, name, f, elem, &prefix, code);

            code.push_str(&receiver(name));
            code.push_str(&format!("{}Length() int", f));
            code.push_str(&prefix);
            code.push_str("\t\treturn rcv._tab.VectorLen(o)\n");
            code.push_str("\t}\n");
            code.push_str("\treturn 0\n");
            code.push_str("}\n\n");

            if elem.is_ubyte() {
                code.push_str(&receiver(name));
                code.push_str(&format!("{}Bytes() []byte", f));
                code.push_str(&prefix);
                code.push_str("\t\treturn rcv._tab.ByteVector(o + rcv._tab.Pos)\n");
                code.push_str("\t}\n");
                code.push_str("\treturn nil\n");
                code.push_str("}\n\n");
            }
        }
        Shape::Array(..) => {
            return Err(CodegenError::invariant(
                &def.name,
                format!("fixed-length array {} is only allowed in structs", field.def.name),
            ));
        }
    }
    Ok(())
}

/// Indexed access to one element of a vector field.
fn gen_vector_element(ctx: &mut GenContext, name: &str, f: &str, elem: Elem, prefix: &str, code: &mut String) {
    let size = elem.size();
    code.push_str(&receiver(name));
    match elem {
        Elem::Struct(inner) => {
            let ty = ctx.struct_name(inner);
            code.push_str(&format!("{}(obj *{}, j int) bool", f, ty));
            code.push_str(prefix);
            code.push_str("\t\tx := rcv._tab.Vector(o)\n");
            code.push_str(&format!("\t\tx += flatbuffers.UOffsetT(j) * {}\n", size));
            if !inner.fixed {
                code.push_str("\t\tx = rcv._tab.Indirect(x)\n");
            }
            code.push_str("\t\tobj.Init(rcv._tab.Bytes, x)\n");
            code.push_str("\t\treturn true\n");
            code.push_str("\t}\n");
            code.push_str("\treturn false\n");
        }
        Elem::Union(_) => {
            code.push_str(&format!("{}(j int, obj *flatbuffers.Table) bool", f));
            code.push_str(prefix);
            code.push_str("\t\ta := rcv._tab.Vector(o)\n");
            code.push_str(&format!("\t\tobj.Pos = a + flatbuffers.UOffsetT(j*{})\n", size));
            code.push_str("\t\tobj.Bytes = rcv._tab.Bytes\n");
            code.push_str("\t\treturn true\n");
            code.push_str("\t}\n");
            code.push_str("\treturn false\n");
        }
        Elem::String => {
            code.push_str(&format!("{}(j int) []byte", f));
            code.push_str(prefix);
            code.push_str("\t\ta := rcv._tab.Vector(o)\n");
            code.push_str(&format!("\t\treturn rcv._tab.ByteVector(a + flatbuffers.UOffsetT(j*{}))\n", size));
            code.push_str("\t}\n");
            code.push_str("\treturn nil\n");
        }
        Elem::Scalar(s) => {
            let ty = ctx.scalar_type(s);
            let at = format!("a + flatbuffers.UOffsetT(j*{})", size);
            code.push_str(&format!("{}(j int) {}", f, ty));
            code.push_str(prefix);
            code.push_str("\t\ta := rcv._tab.Vector(o)\n");
            code.push_str(&format!("\t\treturn {}\n", getter(ctx, s, &at)));
            code.push_str("\t}\n");
            code.push_str(&format!("\treturn {}\n", s.zero()));
        }
    }
    code.push_str("}\n\n");
}
