use brine_fbs_schema::{inline_alignment, inline_size, FieldDef, FieldPosition, Namespace, Schema, StructDef, TypeRef};

use crate::{
    error::CodegenError,
    ident::is_identifier,
    options::GenOptions,
    types::{union_def, Elem, Shape},
    utils::quote,
};

/// Checks that the model is internally consistent: every reference resolves and
/// every field has a shape its container can hold. A model produced by a working
/// front end always passes; failures are reported as `CodegenError::Invariant`.
pub fn verify_model(schema: &Schema) -> Result<(), CodegenError> {
    // 1) Root type
    if let Some(root) = schema.root {
        match schema.struct_def(root) {
            Some(def) if !def.fixed => {}
            Some(def) => return Err(CodegenError::invariant(&def.name, "the root type must be a table")),
            None => return Err(CodegenError::invariant("root", format!("struct #{} does not exist", root.0))),
        }
    }

    // 2) Enum members: payloads only on unions, and only strings or structs
    for def in &schema.enums {
        if def.values.is_empty() {
            return Err(CodegenError::invariant(&def.name, "enum has no values"));
        }
        for val in &def.values {
            match (&val.union_type, def.is_union) {
                (None, _) => {}
                (Some(_), false) => {
                    return Err(CodegenError::invariant(
                        &def.name,
                        format!("plain enum value {} carries a payload type", quote(&val.name)),
                    ));
                }
                (Some(ty), true) => match Shape::of(schema, &def.name, ty)? {
                    Shape::String | Shape::Struct(_) => {}
                    _ => {
                        return Err(CodegenError::invariant(
                            &def.name,
                            format!("union member {} must be a string, struct or table", quote(&val.name)),
                        ));
                    }
                },
            }
        }
    }

    // 3) Fields of structs and tables
    for def in &schema.structs {
        for field in &def.fields {
            check_enum_refs(schema, def, &field.ty)?;
            let shape = Shape::of(schema, &def.name, &field.ty)?;
            if def.fixed {
                verify_struct_field(schema, def, field, shape)?;
            } else {
                verify_table_field(schema, def, &field.name, field.position, shape)?;
            }
        }
    }

    Ok(())
}

fn check_enum_refs(schema: &Schema, def: &StructDef, ty: &TypeRef) -> Result<(), CodegenError> {
    match ty {
        TypeRef::Scalar { enum_ref: Some(r), .. } if schema.enum_def(*r).is_none() => {
            Err(CodegenError::invariant(&def.name, format!("enum #{} does not exist", r.0)))
        }
        TypeRef::Union(r) => union_def(schema, &def.name, *r).map(|_| ()),
        TypeRef::Vector { element, .. } => check_enum_refs(schema, def, element),
        _ => Ok(()),
    }
}

fn verify_struct_field(schema: &Schema, def: &StructDef, field: &FieldDef, shape: Shape) -> Result<(), CodegenError> {
    let (offset, padding) = match field.position {
        FieldPosition::Inline { offset, padding } => (offset as usize, padding as usize),
        FieldPosition::Slot(_) => {
            return Err(CodegenError::invariant(
                &def.name,
                format!("struct field {} has a vtable slot", quote(&field.name)),
            ));
        }
    };
    let inline = match shape {
        Shape::Scalar(_) => true,
        Shape::Struct(inner) | Shape::Array(Elem::Struct(inner), _) => inner.fixed,
        Shape::Array(Elem::Scalar(_), _) => true,
        _ => false,
    };
    if !inline {
        return Err(CodegenError::invariant(
            &def.name,
            format!("struct field {} is not stored inline", quote(&field.name)),
        ));
    }

    // The builder writes fields back to front at these offsets
    let align = inline_alignment(schema, &field.ty);
    if align > 0 && offset % align != 0 {
        return Err(CodegenError::invariant(
            &def.name,
            format!("struct field {} at offset {} is not {}-byte aligned", quote(&field.name), offset, align),
        ));
    }
    if offset + inline_size(schema, &field.ty) + padding > def.byte_size {
        return Err(CodegenError::invariant(
            &def.name,
            format!("struct field {} overruns the struct size {}", quote(&field.name), def.byte_size),
        ));
    }
    Ok(())
}

fn verify_table_field(
    schema: &Schema,
    def: &StructDef,
    field: &str,
    position: FieldPosition,
    shape: Shape,
) -> Result<(), CodegenError> {
    if let FieldPosition::Inline { .. } = position {
        return Err(CodegenError::invariant(&def.name, format!("table field {} has no vtable slot", quote(field))));
    }
    match shape {
        Shape::Array(..) => Err(CodegenError::invariant(
            &def.name,
            format!("fixed-length array {} is only allowed in structs", quote(field)),
        )),
        Shape::Union(_) | Shape::Vector(Elem::Union(_)) => {
            let selector = format!("{}_type", field);
            let paired = def
                .field(&selector)
                .and_then(|f| Shape::of(schema, &def.name, &f.ty).ok())
                .map_or(false, |s| match s {
                    Shape::Scalar(s) | Shape::Vector(Elem::Scalar(s)) => s.is_union_selector(schema),
                    _ => false,
                });
            if paired {
                Ok(())
            } else {
                Err(CodegenError::invariant(
                    &def.name,
                    format!("union field {} has no selector field {}", quote(field), quote(&selector)),
                ))
            }
        }
        _ => Ok(()),
    }
}

/// Checks the options against the schema before anything is generated.
pub fn verify_options(schema: &Schema, options: &GenOptions) -> Result<(), CodegenError> {
    // 1) The override must be a dotted list of identifiers
    if let Some(dotted) = &options.namespace_override {
        if dotted.is_empty() || !dotted.split('.').all(is_identifier) {
            return Err(CodegenError::InvalidNamespace(quote(dotted)));
        }
    }

    // 2) Every unit needs a package
    if options.one_file_output {
        one_file_namespace(schema, options)?;
    } else {
        for def in &schema.enums {
            output_namespace(schema, options, &def.namespace, &def.name)?;
        }
        for def in &schema.structs {
            output_namespace(schema, options, &def.namespace, &def.name)?;
        }
    }
    Ok(())
}

/// Namespace (directory and package) a per-definition unit is written under.
pub fn output_namespace(
    schema: &Schema,
    options: &GenOptions,
    declared: &Namespace,
    name: &str,
) -> Result<Namespace, CodegenError> {
    let ns = match &options.namespace_override {
        Some(dotted) => Namespace::parse(dotted),
        None => schema.effective_namespace(declared),
    };
    if ns.is_empty() {
        return Err(CodegenError::MissingNamespace(quote(name)));
    }
    Ok(ns)
}

/// Namespace of the single unit produced in one-file mode.
pub fn one_file_namespace(schema: &Schema, options: &GenOptions) -> Result<Namespace, CodegenError> {
    let distinct = schema.distinct_namespaces();
    if distinct.len() > 1 {
        return Err(CodegenError::OneFileMultipleNamespaces { count: distinct.len() });
    }
    if let Some(dotted) = &options.namespace_override {
        return Ok(Namespace::parse(dotted));
    }
    if let Some(ns) = distinct.into_iter().next() {
        return Ok(ns);
    }
    match schema.root_def() {
        Some(root) => Ok(Namespace::new([root.name.as_str()])),
        None => Err(CodegenError::MissingNamespace("one-file output".to_owned())),
    }
}
