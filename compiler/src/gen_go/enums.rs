use brine_fbs_schema::{EnumDef, EnumVal, ScalarKind, Schema};

use crate::{
    context::GenContext,
    error::CodegenError,
    ident::resolve,
    types::{Basic, Shape},
    utils::{comment, pad, quote},
};

/// Emits an enum: the type, its constants, the name/value maps and `String()`.
/// For unions with native objects, also the native union container.
///
/// Returns whether the code needs the runtime import block.
pub fn gen_enum(ctx: &mut GenContext, def: &EnumDef, code: &mut String) -> Result<bool, CodegenError> {
    let name = resolve(&def.name, true);

    comment(&def.doc, "", code);
    code.push_str(&format!("type {} {}\n\n", name, Basic::Num(def.underlying).go_type()));

    gen_constants(def, &name, code);
    gen_name_maps(def, &name, code);
    gen_stringer(&name, def.underlying, code);

    if def.is_union && ctx.options.generate_native_objects {
        gen_native_union(ctx, def, &name, code)?;
        return Ok(true);
    }
    Ok(false)
}

fn constant(enum_name: &str, val: &EnumVal) -> String {
    format!("{}{}", enum_name, val.name)
}

fn gen_constants(def: &EnumDef, name: &str, code: &mut String) {
    let width = def
        .values
        .iter()
        .map(|v| constant(name, v).len())
        .max()
        .unwrap_or(0);

    code.push_str("const (\n");
    for val in &def.values {
        comment(&val.doc, "\t", code);
        code.push_str(&format!("\t{} {} = {}\n", pad(&constant(name, val), width), name, val.value));
    }
    if !def.bit_flags {
        if let (Some(min), Some(max)) = (def.min_value(), def.max_value()) {
            code.push('\n');
            code.push_str(&format!("\t{}VerifyValueMin {} = {}\n", name, name, min.value));
            code.push_str(&format!("\t{}VerifyValueMax {} = {}\n", name, name, max.value));
        }
    }
    code.push_str(")\n\n");
}

fn gen_name_maps(def: &EnumDef, name: &str, code: &mut String) {
    // Aliases share a value; only the first name of each value goes into the reverse map.
    let mut seen = Vec::new();
    let named: Vec<&EnumVal> = def
        .values
        .iter()
        .filter(|v| {
            let first = !seen.contains(&v.value);
            seen.push(v.value);
            first
        })
        .collect();

    let width = named.iter().map(|v| constant(name, v).len() + 1).max().unwrap_or(0);
    code.push_str(&format!("var EnumNames{} = map[{}]string{{\n", name, name));
    for val in &named {
        let key = format!("{}:", constant(name, val));
        code.push_str(&format!("\t{} {},\n", pad(&key, width), quote(&val.name)));
    }
    code.push_str("}\n\n");

    let width = def.values.iter().map(|v| quote(&v.name).len() + 1).max().unwrap_or(0);
    code.push_str(&format!("var EnumValues{} = map[string]{}{{\n", name, name));
    for val in &def.values {
        let key = format!("{}:", quote(&val.name));
        code.push_str(&format!("\t{} {},\n", pad(&key, width), constant(name, val)));
    }
    code.push_str("}\n\n");
}

fn gen_stringer(name: &str, underlying: ScalarKind, code: &mut String) {
    code.push_str(&format!("func (v {}) String() string {{\n", name));
    code.push_str(&format!("\tif s, ok := EnumNames{}[v]; ok {{\n", name));
    code.push_str("\t\treturn s\n");
    code.push_str("\t}\n");
    let number = if underlying.is_unsigned() {
        "strconv.FormatUint(uint64(v), 10)"
    } else {
        "strconv.FormatInt(int64(v), 10)"
    };
    code.push_str(&format!("\treturn \"{}(\" + {} + \")\"\n", name, number));
    code.push_str("}\n\n");
}

/// Members that carry a payload, each with its classified payload type.
fn members<'s, 'd>(
    schema: &'s Schema,
    def: &'d EnumDef,
) -> Result<Vec<(&'d EnumVal, Shape<'s>)>, CodegenError> {
    let mut out = Vec::new();
    for val in &def.values {
        if let Some(ty) = &val.union_type {
            out.push((val, Shape::of(schema, &def.name, ty)?));
        }
    }
    Ok(out)
}

fn gen_native_union(ctx: &mut GenContext, def: &EnumDef, name: &str, code: &mut String) -> Result<(), CodegenError> {
    let native = ctx.native_name(&def.name, &def.namespace);
    let members = members(ctx.schema, def)?;

    code.push_str(&format!("type {} struct {{\n", native));
    code.push_str(&format!("\tType  {}\n", name));
    code.push_str("\tValue interface{}\n");
    code.push_str("}\n\n");

    // Pack
    code.push_str(&format!("func (t *{}) Pack(builder *flatbuffers.Builder) flatbuffers.UOffsetT {{\n", native));
    code.push_str("\tif t == nil {\n\t\treturn 0\n\t}\n");
    code.push_str("\tswitch t.Type {\n");
    for (val, shape) in &members {
        code.push_str(&format!("\tcase {}:\n", constant(name, val)));
        match shape {
            Shape::String => code.push_str("\t\treturn builder.CreateString(t.Value.(string))\n"),
            other => {
                let native_type = ctx.native_type(*other);
                code.push_str(&format!("\t\treturn t.Value.({}).Pack(builder)\n", native_type));
            }
        }
    }
    code.push_str("\t}\n");
    code.push_str("\treturn 0\n");
    code.push_str("}\n\n");

    gen_union_unpack(ctx, name, &native, &members, false, code);
    gen_union_unpack(ctx, name, &native, &members, true, code);
    Ok(())
}

/// `UnPack` reads a payload reached through a union field, `UnPackVector` one
/// reached through an element of a vector of unions (one more indirection).
fn gen_union_unpack(
    ctx: &mut GenContext,
    name: &str,
    native: &str,
    members: &[(&EnumVal, Shape)],
    vector: bool,
    code: &mut String,
) {
    let (method, usage) = if vector {
        ("UnPackVector", "vector of unions")
    } else {
        ("UnPack", "single union field")
    };
    code.push_str(&format!("// {} use for {}\n", method, usage));
    code.push_str(&format!("func (rcv {}) {}(table flatbuffers.Table) *{} {{\n", name, method, native));
    code.push_str("\tswitch rcv {\n");
    for (val, shape) in members {
        code.push_str(&format!("\tcase {}:\n", constant(name, val)));
        match shape {
            Shape::String if vector => {
                code.push_str("\t\tx := string(table.ByteVector(table.Pos))\n");
            }
            Shape::String => {
                code.push_str("\t\tl := flatbuffers.GetUOffsetT(table.Bytes[table.Pos:])\n");
                code.push_str("\t\tstart := table.Pos + flatbuffers.SizeUOffsetT\n");
                code.push_str("\t\tx := string(table.Bytes[start : start+l])\n");
            }
            Shape::Struct(def) => {
                let kind = if def.fixed { "Struct" } else { "Table" };
                let getter = if vector { format!("Get{}VectorAs", kind) } else { format!("Get{}As", kind) };
                let func = ctx.struct_func(def, &getter);
                code.push_str(&format!("\t\tx := {}(&table)\n", func));
            }
            _ => {}
        }
        let value = match shape {
            Shape::String => "x",
            _ => "x.UnPack()",
        };
        code.push_str(&format!("\t\treturn &{}{{Type: {}, Value: {}}}\n", native, constant(name, val), value));
    }
    code.push_str("\t}\n");
    code.push_str("\treturn nil\n");
    code.push_str("}\n\n");
}
