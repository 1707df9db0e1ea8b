//! Classification of schema types into the shapes the Go emitters handle.

use brine_fbs_schema::{EnumDef, EnumRef, ScalarKind, Schema, StructDef, TypeRef, SIZE_UOFFSET};

use crate::error::CodegenError;

/// A scalar as Go sees it: `bool` or one of the numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basic {
    Bool,
    Num(ScalarKind),
}

impl Basic {
    /// The Go type name.
    pub fn go_type(self) -> &'static str {
        match self {
            Basic::Bool => "bool",
            Basic::Num(kind) => match kind {
                ScalarKind::UType | ScalarKind::UByte => "byte",
                ScalarKind::Byte => "int8",
                ScalarKind::Short => "int16",
                ScalarKind::UShort => "uint16",
                ScalarKind::Int => "int32",
                ScalarKind::UInt => "uint32",
                ScalarKind::Long => "int64",
                ScalarKind::ULong => "uint64",
                ScalarKind::Float => "float32",
                ScalarKind::Double => "float64",
            },
        }
    }

    /// Suffix of the runtime `Get*`, `Mutate*` and `Prepend*` methods.
    pub fn method(self) -> &'static str {
        match self {
            Basic::Bool => "Bool",
            Basic::Num(kind) => match kind {
                ScalarKind::UType | ScalarKind::UByte => "Byte",
                ScalarKind::Byte => "Int8",
                ScalarKind::Short => "Int16",
                ScalarKind::UShort => "Uint16",
                ScalarKind::Int => "Int32",
                ScalarKind::UInt => "Uint32",
                ScalarKind::Long => "Int64",
                ScalarKind::ULong => "Uint64",
                ScalarKind::Float => "Float32",
                ScalarKind::Double => "Float64",
            },
        }
    }

    pub fn size(self) -> usize {
        match self {
            Basic::Bool => 1,
            Basic::Num(kind) => kind.size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    pub basic:    Basic,
    pub enum_ref: Option<EnumRef>,
}

impl Scalar {
    /// Whether this is the hidden selector of a union field.
    pub fn is_union_selector(&self, schema: &Schema) -> bool {
        self.enum_ref
            .and_then(|r| schema.enum_def(r))
            .map_or(false, |e| e.is_union)
    }

    /// Renders a default constant as a Go literal.
    pub fn literal(&self, constant: &str) -> String {
        match self.basic {
            Basic::Bool => {
                let off = matches!(constant.trim(), "0" | "false" | "");
                if off { "false" } else { "true" }.to_owned()
            }
            Basic::Num(_) => constant.to_owned(),
        }
    }

    /// Go zero value, returned by element accessors when the vector is absent.
    pub fn zero(&self) -> &'static str {
        match self.basic {
            Basic::Bool => "false",
            Basic::Num(_) => "0",
        }
    }
}

/// Element of a vector or of a fixed-length array.
#[derive(Debug, Clone, Copy)]
pub enum Elem<'s> {
    Scalar(Scalar),
    String,
    Struct(&'s StructDef),
    Union(&'s EnumDef),
}

impl<'s> Elem<'s> {
    fn of(schema: &'s Schema, owner: &str, ty: &TypeRef) -> Result<Self, CodegenError> {
        Ok(match ty {
            TypeRef::Scalar { kind, enum_ref } => Elem::Scalar(Scalar { basic: Basic::Num(*kind), enum_ref: *enum_ref }),
            TypeRef::Bool => Elem::Scalar(Scalar { basic: Basic::Bool, enum_ref: None }),
            TypeRef::String => Elem::String,
            TypeRef::Struct(r) => Elem::Struct(
                schema
                    .struct_def(*r)
                    .ok_or_else(|| CodegenError::invariant(owner, format!("struct #{} does not exist", r.0)))?,
            ),
            TypeRef::Union(r) => Elem::Union(union_def(schema, owner, *r)?),
            TypeRef::Vector { .. } => {
                return Err(CodegenError::invariant(owner, "vectors cannot hold vectors or arrays"));
            }
        })
    }

    /// Bytes between consecutive elements.
    pub fn size(&self) -> usize {
        match self {
            Elem::Scalar(s) => s.basic.size(),
            Elem::Struct(def) if def.fixed => def.byte_size,
            Elem::String | Elem::Struct(_) | Elem::Union(_) => SIZE_UOFFSET,
        }
    }

    pub fn alignment(&self) -> usize {
        match self {
            Elem::Struct(def) if def.fixed => def.min_align,
            other => other.size(),
        }
    }

    /// The plain `ubyte` element, whose vectors are exposed as a byte slice.
    pub fn is_ubyte(&self) -> bool {
        matches!(self, Elem::Scalar(Scalar { basic: Basic::Num(ScalarKind::UByte), .. }))
    }
}

/// What a field's type looks like to the emitters.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'s> {
    Scalar(Scalar),
    String,
    Struct(&'s StructDef),
    Union(&'s EnumDef),
    Vector(Elem<'s>),
    Array(Elem<'s>, u16),
}

impl<'s> Shape<'s> {
    /// Classifies `ty`, a type used inside the definition named `owner`.
    pub fn of(schema: &'s Schema, owner: &str, ty: &TypeRef) -> Result<Self, CodegenError> {
        Ok(match ty {
            TypeRef::Vector { element, fixed_length: None } => Shape::Vector(Elem::of(schema, owner, element)?),
            TypeRef::Vector { element, fixed_length: Some(n) } => match Elem::of(schema, owner, element)? {
                elem @ (Elem::Scalar(_) | Elem::Struct(_)) => Shape::Array(elem, *n),
                Elem::String | Elem::Union(_) => {
                    return Err(CodegenError::invariant(owner, "arrays hold scalars or structs only"));
                }
            },
            other => match Elem::of(schema, owner, other)? {
                Elem::Scalar(s) => Shape::Scalar(s),
                Elem::String => Shape::String,
                Elem::Struct(def) => Shape::Struct(def),
                Elem::Union(def) => Shape::Union(def),
            },
        })
    }
}

pub fn union_def<'s>(schema: &'s Schema, owner: &str, r: EnumRef) -> Result<&'s EnumDef, CodegenError> {
    match schema.enum_def(r) {
        Some(def) if def.is_union => Ok(def),
        Some(def) => Err(CodegenError::invariant(owner, format!("{} is used as a union but is a plain enum", def.name))),
        None => Err(CodegenError::invariant(owner, format!("enum #{} does not exist", r.0))),
    }
}
