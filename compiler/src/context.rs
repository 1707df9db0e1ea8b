use std::collections::BTreeSet;

use brine_fbs_schema::{EnumDef, Namespace, Schema, StructDef};

use crate::ident::resolve;
use crate::options::GenOptions;
use crate::types::{Elem, Scalar, Shape};

/// State carried through the generation of one output unit: the namespace of the
/// definition being emitted and the foreign namespaces its code refers to.
pub struct GenContext<'a> {
    pub schema:  &'a Schema,
    pub options: &'a GenOptions,
    current:     Namespace,
    imports:     BTreeSet<Namespace>,
}

impl<'a> GenContext<'a> {
    pub fn new(schema: &'a Schema, options: &'a GenOptions) -> Self {
        GenContext {
            schema,
            options,
            current: Namespace::default(),
            imports: BTreeSet::new(),
        }
    }

    /// Package a definition declared in `declared` ends up in: the override when
    /// one is set, else the declared namespace with the root-name substitution.
    pub fn placement(&self, declared: &Namespace) -> Namespace {
        match &self.options.namespace_override {
            Some(dotted) => Namespace::parse(dotted),
            None => self.schema.effective_namespace(declared),
        }
    }

    /// Makes `declared` the namespace of the code being emitted.
    pub fn enter(&mut self, declared: &Namespace) {
        self.current = self.placement(declared);
    }

    pub fn current(&self) -> &Namespace {
        &self.current
    }

    /// Forgets the imports recorded so far, at the start of a new unit.
    pub fn reset_imports(&mut self) {
        self.imports.clear();
    }

    /// Foreign namespaces referenced since the last reset, in import order.
    pub fn imports(&self) -> &BTreeSet<Namespace> {
        &self.imports
    }

    /// `symbol` as written from the current namespace: bare when `declared` is the
    /// current namespace, `Alias.symbol` otherwise, recording the import.
    pub fn track_and_qualify(&mut self, declared: &Namespace, symbol: &str) -> String {
        let ns = self.placement(declared);
        if ns == self.current {
            return symbol.to_owned();
        }
        let qualified = format!("{}.{}", ns.import_alias(), symbol);
        self.imports.insert(ns);
        qualified
    }

    /// Go name of a struct or table accessor type, qualified.
    pub fn struct_name(&mut self, def: &StructDef) -> String {
        self.track_and_qualify(&def.namespace, &resolve(&def.name, true))
    }

    /// Go name of a package-level function belonging to `def`, e.g. `GetStructAsVec3`.
    pub fn struct_func(&mut self, def: &StructDef, prefix: &str) -> String {
        let symbol = format!("{}{}", prefix, resolve(&def.name, true));
        self.track_and_qualify(&def.namespace, &symbol)
    }

    pub fn enum_name(&mut self, def: &EnumDef) -> String {
        self.track_and_qualify(&def.namespace, &resolve(&def.name, true))
    }

    /// Name of a native mirror type, for structs/tables and unions alike.
    pub fn native_name(&mut self, name: &str, declared: &Namespace) -> String {
        let symbol = self.options.native_name(&resolve(name, true));
        self.track_and_qualify(declared, &symbol)
    }

    /// `Color` for enum-typed scalars, the Go basic type otherwise.
    pub fn scalar_type(&mut self, scalar: Scalar) -> String {
        let schema = self.schema;
        match scalar.enum_ref.and_then(|r| schema.enum_def(r)) {
            Some(def) => self.enum_name(def),
            None => scalar.basic.go_type().to_owned(),
        }
    }

    /// Type returned by an accessor for one value of `elem`.
    pub fn elem_type(&mut self, elem: Elem) -> String {
        match elem {
            Elem::Scalar(s) => self.scalar_type(s),
            Elem::String => "[]byte".to_owned(),
            Elem::Struct(def) => self.struct_name(def),
            Elem::Union(_) => "*flatbuffers.Table".to_owned(),
        }
    }

    /// Type of a native mirror field holding one `elem`.
    pub fn native_elem(&mut self, elem: Elem) -> String {
        match elem {
            Elem::Scalar(s) => self.scalar_type(s),
            Elem::String => "string".to_owned(),
            Elem::Struct(def) => format!("*{}", self.native_name(&def.name, &def.namespace)),
            Elem::Union(def) => format!("*{}", self.native_name(&def.name, &def.namespace)),
        }
    }

    pub fn native_type(&mut self, shape: Shape) -> String {
        match shape {
            Shape::Scalar(s) => self.scalar_type(s),
            Shape::String => "string".to_owned(),
            Shape::Struct(def) => self.native_elem(Elem::Struct(def)),
            Shape::Union(def) => self.native_elem(Elem::Union(def)),
            Shape::Vector(elem) => format!("[]{}", self.native_elem(elem)),
            Shape::Array(elem, n) => format!("[{}]{}", n, self.native_elem(elem)),
        }
    }

    /// Wraps `expr`, a raw scalar, in the enum type conversion when there is one.
    pub fn cast_to_enum(&mut self, scalar: Scalar, expr: &str) -> String {
        if scalar.enum_ref.is_some() {
            format!("{}({})", self.scalar_type(scalar), expr)
        } else {
            expr.to_owned()
        }
    }
}

/// Converts an enum-typed `expr` back to its underlying Go type.
pub fn cast_to_basic(scalar: Scalar, expr: &str) -> String {
    if scalar.enum_ref.is_some() {
        format!("{}({})", scalar.basic.go_type(), expr)
    } else {
        expr.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_fbs_schema::{EnumRef, EnumVal, ScalarKind};
    use crate::types::Basic;

    fn two_namespaces() -> Schema {
        Schema {
            enums: vec![EnumDef::new("Color", Namespace::new(["A"]), ScalarKind::Byte, vec![EnumVal::new("Red", 0)])],
            structs: vec![StructDef::table("Body", Namespace::new(["B", "C"]), vec![])],
            namespaces: vec![Namespace::new(["A"]), Namespace::new(["B", "C"])],
            root: None,
        }
    }

    #[test]
    fn test_same_namespace_is_bare() {
        let schema = two_namespaces();
        let opts = GenOptions::default();
        let mut ctx = GenContext::new(&schema, &opts);
        ctx.enter(&Namespace::new(["A"]));
        assert_eq!(ctx.enum_name(&schema.enums[0]), "Color");
        assert!(ctx.imports().is_empty());
    }

    #[test]
    fn test_foreign_namespace_is_tracked_once() {
        let schema = two_namespaces();
        let opts = GenOptions::default();
        let mut ctx = GenContext::new(&schema, &opts);
        ctx.enter(&Namespace::new(["B", "C"]));
        let color = Scalar { basic: Basic::Num(ScalarKind::Byte), enum_ref: Some(EnumRef(0)) };
        assert_eq!(ctx.scalar_type(color), "A.Color");
        assert_eq!(ctx.cast_to_enum(color, "x"), "A.Color(x)");
        assert_eq!(cast_to_basic(color, "x"), "int8(x)");
        assert_eq!(ctx.imports().len(), 1);

        ctx.reset_imports();
        assert!(ctx.imports().is_empty());
    }

    #[test]
    fn test_override_places_everything_in_one_package() {
        let schema = two_namespaces();
        let opts = GenOptions { namespace_override: Some("Flat".to_owned()), ..GenOptions::default() };
        let mut ctx = GenContext::new(&schema, &opts);
        ctx.enter(&Namespace::new(["B", "C"]));
        assert_eq!(ctx.enum_name(&schema.enums[0]), "Color");
        assert!(ctx.imports().is_empty());
    }

    #[test]
    fn test_native_names_use_prefix_and_suffix() {
        let schema = two_namespaces();
        let opts = GenOptions { object_prefix: "N".to_owned(), ..GenOptions::default() };
        let mut ctx = GenContext::new(&schema, &opts);
        ctx.enter(&Namespace::new(["A"]));
        assert_eq!(ctx.native_elem(Elem::Struct(&schema.structs[0])), "*B__C.NBodyT");
    }
}
