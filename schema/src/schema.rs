use serde::{Deserialize, Serialize};

use crate::types::{EnumRef, ScalarKind, StructRef, TypeRef};

/// A dotted namespace such as `MyGame.Sample`, stored as its components.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    pub components: Vec<String>,
}

impl Namespace {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Namespace { components: components.into_iter().map(Into::into).collect() }
    }

    /// Splits `A.B.C` into components. Empty input gives the empty namespace.
    pub fn parse(dotted: &str) -> Self {
        Namespace::new(dotted.split('.').filter(|c| !c.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Last component, used as the package name.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// `A__B`, the alias under which this namespace is imported.
    pub fn import_alias(&self) -> String {
        self.components.join("__")
    }

    /// `A/B`, used both as import path suffix and output directory.
    pub fn path(&self) -> String {
        self.components.join("/")
    }

    /// `A.B`
    pub fn dotted(&self) -> String {
        self.components.join(".")
    }
}

/// Where a field lives: at a fixed offset inside a struct, or behind a vtable slot in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPosition {
    /// Byte offset from the start of the struct, and padding bytes that follow the field.
    Inline { offset: u32, padding: u32 },
    /// Zero-based vtable slot.
    Slot(u16),
}

impl FieldPosition {
    /// Byte offset of a slot entry inside the vtable.
    pub fn vtable_offset(slot: u16) -> u32 {
        4 + 2 * slot as u32
    }
}

fn default_constant() -> String {
    "0".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name:       String,
    pub ty:         TypeRef,
    pub position:   FieldPosition,
    #[serde(default = "default_constant")]
    pub default:    String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub doc:        Vec<String>,
}

impl FieldDef {
    /// A field of a fixed struct.
    pub fn inline(name: &str, ty: TypeRef, offset: u32, padding: u32) -> Self {
        FieldDef {
            name:       name.to_owned(),
            ty,
            position:   FieldPosition::Inline { offset, padding },
            default:    default_constant(),
            deprecated: false,
            doc:        Vec::new(),
        }
    }

    /// A field of a table.
    pub fn slot(name: &str, ty: TypeRef, slot: u16) -> Self {
        FieldDef {
            name:       name.to_owned(),
            ty,
            position:   FieldPosition::Slot(slot),
            default:    default_constant(),
            deprecated: false,
            doc:        Vec::new(),
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = default.to_owned();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn with_doc(mut self, line: &str) -> Self {
        self.doc.push(line.to_owned());
        self
    }
}

/// A struct (`fixed == true`) or a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name:      String,
    #[serde(default)]
    pub namespace: Namespace,
    pub fixed:     bool,
    pub fields:    Vec<FieldDef>,
    #[serde(default)]
    pub byte_size: usize,
    #[serde(default = "one")]
    pub min_align: usize,
    #[serde(default)]
    pub doc:       Vec<String>,
}

fn one() -> usize {
    1
}

impl StructDef {
    pub fn table(name: &str, namespace: Namespace, fields: Vec<FieldDef>) -> Self {
        StructDef {
            name: name.to_owned(),
            namespace,
            fixed: false,
            fields,
            byte_size: 0,
            min_align: 1,
            doc: Vec::new(),
        }
    }

    pub fn fixed(
        name: &str,
        namespace: Namespace,
        fields: Vec<FieldDef>,
        byte_size: usize,
        min_align: usize,
    ) -> Self {
        StructDef {
            name: name.to_owned(),
            namespace,
            fixed: true,
            fields,
            byte_size,
            min_align,
            doc: Vec::new(),
        }
    }

    pub fn with_doc(mut self, line: &str) -> Self {
        self.doc.push(line.to_owned());
        self
    }

    /// Number of vtable slots a table declares, deprecated fields included.
    pub fn slot_count(&self) -> usize {
        self.fields
            .iter()
            .filter_map(|f| match f.position {
                FieldPosition::Slot(s) => Some(s as usize + 1),
                FieldPosition::Inline { .. } => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumVal {
    pub name:       String,
    /// Wide enough for every `long` and `ulong` value.
    #[serde(with = "enum_value")]
    pub value:      i128,
    #[serde(default)]
    pub doc:        Vec<String>,
    /// Payload type of a union member. `None` for plain enums and the `NONE` member.
    #[serde(default)]
    pub union_type: Option<TypeRef>,
}

impl EnumVal {
    pub fn new(name: &str, value: impl Into<i128>) -> Self {
        EnumVal { name: name.to_owned(), value: value.into(), doc: Vec::new(), union_type: None }
    }

    pub fn member(name: &str, value: impl Into<i128>, payload: TypeRef) -> Self {
        EnumVal { name: name.to_owned(), value: value.into(), doc: Vec::new(), union_type: Some(payload) }
    }

    pub fn with_doc(mut self, line: &str) -> Self {
        self.doc.push(line.to_owned());
        self
    }
}

/// Enum values travel as plain JSON integers, signed or unsigned 64-bit.
mod enum_value {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Signed(i64),
        Unsigned(u64),
    }

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(v) = i64::try_from(*value) {
            serializer.serialize_i64(v)
        } else if let Ok(v) = u64::try_from(*value) {
            serializer.serialize_u64(v)
        } else {
            Err(serde::ser::Error::custom(format!("enum value {} does not fit 64 bits", value)))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        match Wire::deserialize(deserializer) {
            Ok(Wire::Signed(v)) => Ok(v as i128),
            Ok(Wire::Unsigned(v)) => Ok(v as i128),
            Err(_) => Err(de::Error::custom("enum value must be a 64-bit integer")),
        }
    }
}

/// An enum or, with `is_union`, a union whose members carry payload types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name:       String,
    #[serde(default)]
    pub namespace:  Namespace,
    pub underlying: ScalarKind,
    pub values:     Vec<EnumVal>,
    #[serde(default)]
    pub is_union:   bool,
    #[serde(default)]
    pub bit_flags:  bool,
    #[serde(default)]
    pub doc:        Vec<String>,
}

impl EnumDef {
    pub fn new(name: &str, namespace: Namespace, underlying: ScalarKind, values: Vec<EnumVal>) -> Self {
        EnumDef {
            name: name.to_owned(),
            namespace,
            underlying,
            values,
            is_union: false,
            bit_flags: false,
            doc: Vec::new(),
        }
    }

    /// A union; the `NONE` member is prepended.
    pub fn union(name: &str, namespace: Namespace, members: Vec<EnumVal>) -> Self {
        let mut values = vec![EnumVal::new("NONE", 0)];
        values.extend(members);
        EnumDef {
            name: name.to_owned(),
            namespace,
            underlying: ScalarKind::UType,
            values,
            is_union: true,
            bit_flags: false,
            doc: Vec::new(),
        }
    }

    pub fn with_bit_flags(mut self) -> Self {
        self.bit_flags = true;
        self
    }

    pub fn with_doc(mut self, line: &str) -> Self {
        self.doc.push(line.to_owned());
        self
    }

    pub fn min_value(&self) -> Option<&EnumVal> {
        self.values.iter().min_by_key(|v| v.value)
    }

    pub fn max_value(&self) -> Option<&EnumVal> {
        self.values.iter().max_by_key(|v| v.value)
    }
}

/// A resolved schema. Immutable once handed to the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub enums:      Vec<EnumDef>,
    #[serde(default)]
    pub structs:    Vec<StructDef>,
    /// Every namespace the schema declared, in declaration order.
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub root:       Option<StructRef>,
}

impl Schema {
    pub fn enum_def(&self, r: EnumRef) -> Option<&EnumDef> {
        self.enums.get(r.0)
    }

    pub fn struct_def(&self, r: StructRef) -> Option<&StructDef> {
        self.structs.get(r.0)
    }

    pub fn root_def(&self) -> Option<&StructDef> {
        self.root.and_then(|r| self.struct_def(r))
    }

    /// The namespace a definition is generated under. A definition outside any
    /// namespace borrows the root type's name.
    pub fn effective_namespace(&self, declared: &Namespace) -> Namespace {
        match self.root_def() {
            Some(root) if declared.is_empty() => Namespace::new([root.name.as_str()]),
            _ => declared.clone(),
        }
    }

    /// Distinct non-empty namespaces, whether declared or carried by a definition.
    pub fn distinct_namespaces(&self) -> Vec<Namespace> {
        let mut seen: Vec<Namespace> = Vec::new();
        let declared = self.namespaces.iter();
        let used = self
            .enums
            .iter()
            .map(|e| &e.namespace)
            .chain(self.structs.iter().map(|s| &s.namespace));
        for ns in declared.chain(used) {
            if !ns.is_empty() && !seen.contains(ns) {
                seen.push(ns.clone());
            }
        }
        seen
    }
}
