use brine_fbs_schema::StructDef;

use super::Field;
use crate::{
    context::{cast_to_basic, GenContext},
    error::CodegenError,
    types::{Elem, Shape},
    utils::pad,
};

/// The native mirror of a struct or table with its `Pack`, `UnPackTo` and `UnPack`.
pub fn gen_native_object(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    fields: &[Field],
    code: &mut String,
) -> Result<(), CodegenError> {
    let native = ctx.native_name(&def.name, &def.namespace);
    let visible: Vec<&Field> = fields.iter().filter(|f| !f.is_selector(ctx.schema)).collect();

    gen_native_type(ctx, &native, &visible, code);
    if def.fixed {
        gen_struct_pack(ctx, def, name, &native, code)?;
        gen_struct_unpack(name, &native, &visible, code);
    } else {
        gen_table_pack(ctx, name, &native, &visible, code);
        gen_table_unpack(ctx, name, &native, &visible, code);
    }
    gen_unpack(name, &native, code);
    Ok(())
}

/// Plain `[ubyte]` vectors travel as one byte string rather than element by element.
fn raw_bytes(elem: Elem) -> bool {
    elem.is_ubyte() && matches!(elem, Elem::Scalar(s) if s.enum_ref.is_none())
}

fn gen_native_type(ctx: &mut GenContext, native: &str, fields: &[&Field], code: &mut String) {
    let width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    code.push_str(&format!("type {} struct {{\n", native));
    for field in fields {
        let ty = ctx.native_type(field.shape);
        code.push_str(&format!("\t{} {}\n", pad(&field.name, width), ty));
    }
    code.push_str("}\n\n");
}

fn pack_header(native: &str, code: &mut String) {
    code.push_str(&format!("// {} object pack function\n", native));
    code.push_str(&format!("func (t *{}) Pack(builder *flatbuffers.Builder) flatbuffers.UOffsetT {{\n", native));
    code.push_str("\tif t == nil {\n\t\treturn 0\n\t}\n");
}

/// Every child object is written before the table is opened; the table then
/// only records offsets and inline values.
fn gen_table_pack(ctx: &mut GenContext, name: &str, native: &str, fields: &[&Field], code: &mut String) {
    pack_header(native, code);

    for field in fields {
        let (f, v) = (&field.name, &field.var);
        match field.shape {
            Shape::Scalar(_) => {}
            Shape::String => {
                code.push_str(&format!("\t{}Offset := flatbuffers.UOffsetT(0)\n", v));
                code.push_str(&format!("\tif t.{} != \"\" {{\n", f));
                code.push_str(&format!("\t\t{}Offset = builder.CreateString(t.{})\n", v, f));
                code.push_str("\t}\n");
            }
            Shape::Struct(inner) if inner.fixed => {}
            Shape::Struct(_) | Shape::Union(_) => {
                code.push_str(&format!("\t{}Offset := t.{}.Pack(builder)\n", v, f));
            }
            Shape::Vector(elem) if raw_bytes(elem) => {
                code.push_str(&format!("\t{}Offset := flatbuffers.UOffsetT(0)\n", v));
                code.push_str(&format!("\tif t.{} != nil {{\n", f));
                code.push_str(&format!("\t\t{}Offset = builder.CreateByteString(t.{})\n", v, f));
                code.push_str("\t}\n");
            }
            Shape::Vector(elem) => gen_vector_pack(name, field, elem, code),
            Shape::Array(..) => {}
        }
    }

    code.push_str(&format!("\t{}Start(builder)\n", name));
    for field in fields {
        let (f, v) = (&field.name, &field.var);
        match field.shape {
            Shape::Scalar(_) => {
                code.push_str(&format!("\t{}Add{}(builder, t.{})\n", name, f, f));
            }
            Shape::Struct(inner) if inner.fixed => {
                code.push_str(&format!("\t{}Offset := t.{}.Pack(builder)\n", v, f));
                code.push_str(&format!("\t{}Add{}(builder, {}Offset)\n", name, f, v));
            }
            Shape::Union(_) => {
                code.push_str(&format!("\tif t.{} != nil {{\n", f));
                code.push_str(&format!("\t\t{}Add{}(builder, t.{}.Type)\n", name, field.selector_name(), f));
                code.push_str("\t}\n");
                code.push_str(&format!("\t{}Add{}(builder, {}Offset)\n", name, f, v));
            }
            Shape::Vector(Elem::Union(_)) => {
                code.push_str(&format!("\t{}Add{}(builder, {}TypeOffset)\n", name, field.selector_name(), v));
                code.push_str(&format!("\t{}Add{}(builder, {}Offset)\n", name, f, v));
            }
            Shape::String | Shape::Struct(_) | Shape::Vector(_) => {
                code.push_str(&format!("\t{}Add{}(builder, {}Offset)\n", name, f, v));
            }
            Shape::Array(..) => {}
        }
    }
    code.push_str(&format!("\treturn {}End(builder)\n", name));
    code.push_str("}\n\n");
}

/// Offsets of out-of-line elements are collected first, since no object may be
/// written while a vector is open; inline elements go straight into the vector.
fn gen_vector_pack(name: &str, field: &Field, elem: Elem, code: &mut String) {
    let (f, v) = (&field.name, &field.var);
    code.push_str(&format!("\t{}Offset := flatbuffers.UOffsetT(0)\n", v));
    if let Elem::Union(_) = elem {
        code.push_str(&format!("\t{}TypeOffset := flatbuffers.UOffsetT(0)\n", v));
    }
    code.push_str(&format!("\tif t.{} != nil {{\n", f));
    code.push_str(&format!("\t\t{}Length := len(t.{})\n", v, f));

    let out_of_line = match elem {
        Elem::String => Some(format!("builder.CreateString(t.{}[j])", f)),
        Elem::Struct(inner) if !inner.fixed => Some(format!("t.{}[j].Pack(builder)", f)),
        Elem::Union(_) => Some(format!("t.{}[j].Pack(builder)", f)),
        Elem::Struct(_) | Elem::Scalar(_) => None,
    };
    if let Some(create) = &out_of_line {
        code.push_str(&format!("\t\t{}Offsets := make([]flatbuffers.UOffsetT, {}Length)\n", v, v));
        code.push_str(&format!("\t\tfor j := 0; j < {}Length; j++ {{\n", v));
        code.push_str(&format!("\t\t\t{}Offsets[j] = {}\n", v, create));
        code.push_str("\t\t}\n");
    }

    if let Elem::Union(_) = elem {
        let selector = field.selector_name();
        code.push_str(&format!("\t\t{}Start{}Vector(builder, {}Length)\n", name, selector, v));
        code.push_str(&format!("\t\tfor j := {}Length - 1; j >= 0; j-- {{\n", v));
        code.push_str(&format!("\t\t\tbuilder.PrependByte(byte(t.{}[j].Type))\n", f));
        code.push_str("\t\t}\n");
        code.push_str(&format!("\t\t{}TypeOffset = {}End{}Vector(builder, {}Length)\n", v, name, selector, v));
    }

    code.push_str(&format!("\t\t{}Start{}Vector(builder, {}Length)\n", name, f, v));
    code.push_str(&format!("\t\tfor j := {}Length - 1; j >= 0; j-- {{\n", v));
    match elem {
        Elem::Scalar(s) => {
            let value = format!("t.{}[j]", f);
            code.push_str(&format!("\t\t\tbuilder.Prepend{}({})\n", s.basic.method(), cast_to_basic(s, &value)));
        }
        Elem::Struct(inner) if inner.fixed => {
            code.push_str(&format!("\t\t\tt.{}[j].Pack(builder)\n", f));
        }
        Elem::String | Elem::Struct(_) | Elem::Union(_) => {
            code.push_str(&format!("\t\t\tbuilder.PrependUOffsetT({}Offsets[j])\n", v));
        }
    }
    code.push_str("\t\t}\n");
    code.push_str(&format!("\t\t{}Offset = {}End{}Vector(builder, {}Length)\n", v, name, f, v));
    code.push_str("\t}\n");
}

fn gen_table_unpack(ctx: &mut GenContext, name: &str, native: &str, fields: &[&Field], code: &mut String) {
    code.push_str(&format!("// {} object unpack function\n", native));
    code.push_str(&format!("func (rcv *{}) UnPackTo(t *{}) {{\n", name, native));
    for field in fields {
        let (f, v) = (&field.name, &field.var);
        match field.shape {
            Shape::Scalar(_) => code.push_str(&format!("\tt.{} = rcv.{}()\n", f, f)),
            Shape::String => code.push_str(&format!("\tt.{} = string(rcv.{}())\n", f, f)),
            Shape::Struct(_) => code.push_str(&format!("\tt.{} = rcv.{}(nil).UnPack()\n", f, f)),
            Shape::Union(_) => {
                code.push_str(&format!("\t{}Table := flatbuffers.Table{{}}\n", v));
                code.push_str(&format!("\tif rcv.{}(&{}Table) {{\n", f, v));
                code.push_str(&format!("\t\tt.{} = rcv.{}().UnPack({}Table)\n", f, field.selector_name(), v));
                code.push_str("\t}\n");
            }
            Shape::Vector(elem) if raw_bytes(elem) => {
                // the mirror owns its bytes
                code.push_str(&format!("\tt.{} = append([]byte(nil), rcv.{}Bytes()...)\n", f, f));
            }
            Shape::Vector(elem) => {
                let native_ty = ctx.native_type(field.shape);
                code.push_str(&format!("\t{}Length := rcv.{}Length()\n", v, f));
                code.push_str(&format!("\tt.{} = make({}, {}Length)\n", f, native_ty, v));
                code.push_str(&format!("\tfor j := 0; j < {}Length; j++ {{\n", v));
                match elem {
                    Elem::Scalar(_) => code.push_str(&format!("\t\tt.{}[j] = rcv.{}(j)\n", f, f)),
                    Elem::String => code.push_str(&format!("\t\tt.{}[j] = string(rcv.{}(j))\n", f, f)),
                    Elem::Struct(inner) => {
                        let ty = ctx.struct_name(inner);
                        code.push_str(&format!("\t\tx := {}{{}}\n", ty));
                        code.push_str(&format!("\t\trcv.{}(&x, j)\n", f));
                        code.push_str(&format!("\t\tt.{}[j] = x.UnPack()\n", f));
                    }
                    Elem::Union(_) => {
                        code.push_str(&format!("\t\t{}Type := rcv.{}(j)\n", v, field.selector_name()));
                        code.push_str(&format!("\t\t{}Table := flatbuffers.Table{{}}\n", v));
                        code.push_str(&format!("\t\tif rcv.{}(j, &{}Table) {{\n", f, v));
                        code.push_str(&format!("\t\t\tt.{}[j] = {}Type.UnPackVector({}Table)\n", f, v, v));
                        code.push_str("\t\t}\n");
                    }
                }
                code.push_str("\t}\n");
            }
            Shape::Array(..) => {}
        }
    }
    code.push_str("}\n\n");
}

/// Fixed structs pack through their `Create` function, nested values flattened
/// in the same order as its parameters.
fn gen_struct_pack(
    ctx: &mut GenContext,
    def: &StructDef,
    name: &str,
    native: &str,
    code: &mut String,
) -> Result<(), CodegenError> {
    pack_header(native, code);
    let mut args = String::new();
    struct_pack_args(ctx, def, "", &mut args)?;
    code.push_str(&format!("\treturn Create{}(builder{})\n", name, args));
    code.push_str("}\n\n");
    Ok(())
}

fn struct_pack_args(ctx: &mut GenContext, def: &StructDef, prefix: &str, args: &mut String) -> Result<(), CodegenError> {
    for field in &def.fields {
        let f = crate::ident::resolve(&field.name, true);
        match Shape::of(ctx.schema, &def.name, &field.ty)? {
            Shape::Struct(inner) => {
                struct_pack_args(ctx, inner, &format!("{}{}.", prefix, f), args)?;
            }
            Shape::Array(Elem::Struct(inner), n) => {
                for i in 0..n {
                    struct_pack_args(ctx, inner, &format!("{}{}[{}].", prefix, f, i), args)?;
                }
            }
            _ => args.push_str(&format!(", t.{}{}", prefix, f)),
        }
    }
    Ok(())
}

fn gen_struct_unpack(name: &str, native: &str, fields: &[&Field], code: &mut String) {
    code.push_str(&format!("// {} object unpack function\n", native));
    code.push_str(&format!("func (rcv *{}) UnPackTo(t *{}) {{\n", name, native));
    for field in fields {
        let f = &field.name;
        match field.shape {
            Shape::Struct(_) => code.push_str(&format!("\tt.{} = rcv.{}(nil).UnPack()\n", f, f)),
            Shape::Array(Elem::Struct(_), _) => {
                code.push_str(&format!("\tfor j, x := range rcv.{}() {{\n", f));
                code.push_str(&format!("\t\tt.{}[j] = x.UnPack()\n", f));
                code.push_str("\t}\n");
            }
            _ => code.push_str(&format!("\tt.{} = rcv.{}()\n", f, f)),
        }
    }
    code.push_str("}\n\n");
}

fn gen_unpack(name: &str, native: &str, code: &mut String) {
    code.push_str(&format!("func (rcv *{}) UnPack() *{} {{\n", name, native));
    code.push_str("\tif rcv == nil {\n\t\treturn nil\n\t}\n");
    code.push_str(&format!("\tt := &{}{{}}\n", native));
    code.push_str("\trcv.UnPackTo(t)\n");
    code.push_str("\treturn t\n");
    code.push_str("}\n\n");
}
