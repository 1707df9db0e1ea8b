//! brine-fbs
//!
//! Entry point for embedding the Go generator.
//!
//! - The schema model (re-exported from `brine-fbs-schema`)
//! - `GenOptions`, `OutputUnit` and `generate_go` (re-exported from the compiler)
//! - Helpers for moving models in and out of JSON

pub use brine_fbs_compiler::error::CodegenError;
pub use brine_fbs_compiler::{generate_go, GenOptions, OutputUnit};
pub use brine_fbs_schema::{EnumDef, EnumVal, FieldDef, Namespace, ScalarKind, Schema, StructDef, TypeRef};

/// Parse a schema model from JSON.
pub fn schema_from_json(json: &str) -> Result<Schema, CodegenError> {
    brine_fbs_compiler::load_schema(json)
}

/// Serialize a schema model to pretty-printed JSON.
pub fn schema_to_json(schema: &Schema) -> Result<String, CodegenError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

/// Parse a JSON model and generate Go sources for it in one step.
pub fn generate_go_from_json(json: &str, options: &GenOptions) -> Result<Vec<OutputUnit>, CodegenError> {
    let schema = schema_from_json(json)?;
    generate_go(&schema, options)
}

pub mod error {
    pub use brine_fbs_compiler::error::CodegenError;
}

pub mod schema {
    pub use brine_fbs_schema::*;
}

pub mod options {
    pub use brine_fbs_compiler::options::{GenOptions, DEFAULT_GO_IMPORT};
}
