//! The resolved schema model a FlatBuffers front end hands to the brine-fbs
//! generator: enums, unions, structs, tables and namespaces, with struct layout
//! and vtable slots already assigned.
//!
//! ```
//! use brine_fbs_schema::*;
//!
//! let float = TypeRef::scalar(ScalarKind::Float);
//! let schema = Schema {
//!     structs: vec![StructDef::fixed("Point", Namespace::new(["Geo"]), vec![
//!         FieldDef::inline("x", float.clone(), 0, 0),
//!         FieldDef::inline("y", float, 4, 0),
//!     ], 8, 4)],
//!     namespaces: vec![Namespace::new(["Geo"])],
//!     ..Schema::default()
//! };
//!
//! assert_eq!(inline_size(&schema, &TypeRef::Struct(StructRef(0))), 8);
//! assert_eq!(schema.structs[0].namespace.import_alias(), "Geo");
//! ```

pub mod layout;
pub mod schema;
pub mod types;

pub use layout::*;
pub use schema::*;
pub use types::*;
