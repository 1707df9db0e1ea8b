//! Go emission, one module per concern. `gen_enum` and `gen_struct` each write
//! a complete definition into a buffer; `file` wraps buffers into units.

pub mod accessors;
pub mod builders;
pub mod enums;
pub mod file;
pub mod mutators;
pub mod native;

use brine_fbs_schema::{FieldDef, FieldPosition, Schema, StructDef};
use tracing::warn;

use crate::{
    context::GenContext,
    error::CodegenError,
    ident::resolve,
    types::{Elem, Shape},
    utils::comment,
};

pub use enums::gen_enum;
pub use file::{begin_file, OutputUnit};

/// A non-deprecated field with its classified type and Go spellings.
pub struct Field<'a> {
    pub def:   &'a FieldDef,
    pub shape: Shape<'a>,
    /// Exported name: accessor and native field.
    pub name:  String,
    /// Unexported name: parameters and locals.
    pub var:   String,
}

impl<'a> Field<'a> {
    /// Hidden selector of a union field or of a vector of unions.
    pub fn is_selector(&self, schema: &Schema) -> bool {
        match self.shape {
            Shape::Scalar(s) | Shape::Vector(Elem::Scalar(s)) => s.is_union_selector(schema),
            _ => false,
        }
    }

    /// Exported name of the selector paired with this union field.
    pub fn selector_name(&self) -> String {
        resolve(&format!("{}_type", self.def.name), true)
    }
}

fn fields<'a>(schema: &'a Schema, def: &'a StructDef) -> Result<Vec<Field<'a>>, CodegenError> {
    def.fields
        .iter()
        .filter(|f| !f.deprecated)
        .map(|f| {
            Ok(Field {
                def:   f,
                shape: Shape::of(schema, &def.name, &f.ty)?,
                name:  resolve(&f.name, true),
                var:   resolve(&f.name, false),
            })
        })
        .collect()
}

/// `func (rcv *Name) `
pub(crate) fn receiver(type_name: &str) -> String {
    format!("func (rcv *{}) ", type_name)
}

/// Opening of a table field accessor: look the slot up, test for presence.
pub(crate) fn offset_prefix(slot: u16) -> String {
    format!(
        " {{\n\to := flatbuffers.UOffsetT(rcv._tab.Offset({}))\n\tif o != 0 {{\n",
        FieldPosition::vtable_offset(slot)
    )
}

/// Emits a struct or table: native object (optional), accessor type with its
/// shortcut constructors, per-field accessors and mutators, then builders.
pub fn gen_struct<'a>(ctx: &mut GenContext<'a>, def: &'a StructDef, code: &mut String) -> Result<(), CodegenError> {
    if def.fields.is_empty() {
        warn!(definition = %def.name, "skipping definition without fields");
        return Ok(());
    }
    let fields = fields(ctx.schema, def)?;
    let name = resolve(&def.name, true);

    if ctx.options.generate_native_objects {
        native::gen_native_object(ctx, def, &name, &fields, code)?;
    }

    comment(&def.doc, "", code);
    accessors::gen_type_decl(def, &name, code);
    accessors::gen_shortcuts(def, &name, code);

    for field in &fields {
        comment(&field.def.doc, "", code);
        accessors::gen_accessor(ctx, def, &name, field, code)?;
        if ctx.options.generate_mutators {
            mutators::gen_mutator(ctx, &name, field, code);
        }
    }

    if def.fixed {
        builders::gen_struct_builder(ctx, def, &name, code)?;
    } else {
        builders::gen_table_builders(ctx, def, &name, &fields, code);
    }
    Ok(())
}
