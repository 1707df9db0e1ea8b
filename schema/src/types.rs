use serde::{Deserialize, Serialize};

/// Index of an enum (or union) in [`crate::Schema::enums`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumRef(pub usize);

/// Index of a struct or table in [`crate::Schema::structs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructRef(pub usize);

/// Numeric scalar kinds of the binary format. `UType` is the one-byte union selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    UType,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
}

impl ScalarKind {
    /// Inline size in bytes.
    pub fn size(self) -> usize {
        match self {
            ScalarKind::UType | ScalarKind::Byte | ScalarKind::UByte => 1,
            ScalarKind::Short | ScalarKind::UShort => 2,
            ScalarKind::Int | ScalarKind::UInt | ScalarKind::Float => 4,
            ScalarKind::Long | ScalarKind::ULong | ScalarKind::Double => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, ScalarKind::Float | ScalarKind::Double)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            ScalarKind::UType | ScalarKind::UByte | ScalarKind::UShort | ScalarKind::UInt | ScalarKind::ULong
        )
    }
}

/// The type of a field, or of a vector element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Scalar {
        kind:     ScalarKind,
        #[serde(default)]
        enum_ref: Option<EnumRef>,
    },
    Bool,
    String,
    /// `fixed_length: None` is a variable-length vector, `Some(n)` an inline array of `n`.
    Vector {
        element:      Box<TypeRef>,
        #[serde(default)]
        fixed_length: Option<u16>,
    },
    Struct(StructRef),
    Union(EnumRef),
}

impl TypeRef {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeRef::Scalar { kind, enum_ref: None }
    }

    pub fn enumeration(kind: ScalarKind, enum_ref: EnumRef) -> Self {
        TypeRef::Scalar { kind, enum_ref: Some(enum_ref) }
    }

    pub fn vector(element: TypeRef) -> Self {
        TypeRef::Vector { element: Box::new(element), fixed_length: None }
    }

    pub fn array(element: TypeRef, length: u16) -> Self {
        TypeRef::Vector { element: Box::new(element), fixed_length: Some(length) }
    }

    /// Scalars and bools: everything stored inline with a default value.
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeRef::Scalar { .. } | TypeRef::Bool)
    }

    /// The enum a scalar is typed with, if any.
    pub fn enum_ref(&self) -> Option<EnumRef> {
        match self {
            TypeRef::Scalar { enum_ref, .. } => *enum_ref,
            _ => None,
        }
    }

    pub fn is_fixed_array(&self) -> bool {
        matches!(self, TypeRef::Vector { fixed_length: Some(_), .. })
    }
}
