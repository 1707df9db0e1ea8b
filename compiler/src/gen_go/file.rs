use std::path::PathBuf;

use crate::context::GenContext;

pub const HEADER: &str = "// Code generated by the FlatBuffers compiler. DO NOT EDIT.\n\n";

/// One generated Go file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputUnit {
    /// Path relative to the output directory.
    pub path:     PathBuf,
    pub package:  String,
    pub contents: String,
}

/// Header, package clause and import block of a unit.
///
/// `needs_imports` pulls in the runtime library and every tracked namespace;
/// `is_enum` adds `strconv` for the enum `String()` methods.
pub fn begin_file(ctx: &GenContext, package: &str, needs_imports: bool, is_enum: bool) -> String {
    let mut code = String::from(HEADER);
    code.push_str(&format!("package {}\n\n", package));

    if needs_imports {
        code.push_str("import (\n");
        if is_enum {
            code.push_str("\t\"strconv\"\n\n");
        }
        code.push_str(&format!("\tflatbuffers \"{}\"\n", ctx.options.go_import()));
        for ns in ctx.imports() {
            code.push_str(&format!(
                "\t{} \"{}{}\"\n",
                ns.import_alias(),
                ctx.options.module_prefix,
                ns.path()
            ));
        }
        code.push_str(")\n\n");
    } else if is_enum {
        code.push_str("import \"strconv\"\n\n");
    }
    code
}
