//! Read-only layout queries over an already laid-out schema.

use crate::schema::Schema;
use crate::types::TypeRef;

/// Size of the unsigned offset used for every out-of-line reference.
pub const SIZE_UOFFSET: usize = 4;

/// Bytes a value of `ty` occupies where it is stored: inline for scalars,
/// fixed structs and arrays, an offset for everything else.
pub fn inline_size(schema: &Schema, ty: &TypeRef) -> usize {
    match ty {
        TypeRef::Scalar { kind, .. } => kind.size(),
        TypeRef::Bool => 1,
        TypeRef::Struct(r) => match schema.struct_def(*r) {
            Some(def) if def.fixed => def.byte_size,
            _ => SIZE_UOFFSET,
        },
        TypeRef::Vector { element, fixed_length: Some(n) } => {
            inline_size(schema, element) * *n as usize
        }
        TypeRef::Vector { fixed_length: None, .. } | TypeRef::String | TypeRef::Union(_) => {
            SIZE_UOFFSET
        }
    }
}

/// Alignment required where a value of `ty` is stored.
pub fn inline_alignment(schema: &Schema, ty: &TypeRef) -> usize {
    match ty {
        TypeRef::Struct(r) => match schema.struct_def(*r) {
            Some(def) if def.fixed => def.min_align,
            _ => SIZE_UOFFSET,
        },
        TypeRef::Vector { element, fixed_length: Some(_) } => inline_alignment(schema, element),
        other => inline_size(schema, other),
    }
}
