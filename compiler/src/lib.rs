//! brine-fbs-compiler
//!
//! This crate implements:
//!  1) Identifier escaping and namespace-qualified naming with import tracking,
//!  2) A verifier for generation options and model integrity,
//!  3) Go emission of enums and unions, zero-copy accessors, in-place mutators,
//!     struct/table builders and native object pack/unpack,
//!  4) The driver (`generate_go` → `Vec<OutputUnit>`), per definition or one file,
//!  5) Error types (`CodegenError`).

pub mod error;
pub mod options;
pub mod types;
pub mod utils;
pub mod ident;
pub mod context;
pub mod verifier;
pub mod gen_go;
pub mod compiler;

pub use compiler::generate_go;
pub use compiler::load_schema;
pub use gen_go::OutputUnit;
pub use options::GenOptions;
