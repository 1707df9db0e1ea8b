use std::fs;
use std::path::{Path, PathBuf};

use brine_fbs_schema::{Namespace, Schema};
use tracing::{debug, info};

use crate::{
    context::GenContext,
    error::CodegenError,
    gen_go::{begin_file, gen_enum, gen_struct, OutputUnit},
    options::GenOptions,
    utils::trim_trailing_blank_lines,
    verifier::{one_file_namespace, output_namespace, verify_model, verify_options},
};

/// Load a schema model from its JSON form.
pub fn load_schema(json: &str) -> Result<Schema, CodegenError> {
    Ok(serde_json::from_str(json)?)
}

/// Generate Go sources for every definition of `schema`.
/// Returns `Err(CodegenError)` before producing anything if the options cannot be
/// honoured for this schema or the model is malformed.
pub fn generate_go(schema: &Schema, options: &GenOptions) -> Result<Vec<OutputUnit>, CodegenError> {
    verify_model(schema)?;
    verify_options(schema, options)?;

    let mut ctx = GenContext::new(schema, options);
    let units = if options.one_file_output {
        vec![generate_one_file(&mut ctx)?]
    } else {
        generate_per_definition(&mut ctx)?
    };

    info!(units = units.len(), one_file = options.one_file_output, "generated Go sources");
    Ok(units)
}

fn generate_per_definition(ctx: &mut GenContext) -> Result<Vec<OutputUnit>, CodegenError> {
    let schema = ctx.schema;
    let mut units = Vec::new();

    for def in &schema.enums {
        debug!(definition = %def.name, union = def.is_union, "generating enum");
        ctx.reset_imports();
        ctx.enter(&def.namespace);
        let mut code = String::new();
        let needs_imports = gen_enum(ctx, def, &mut code)?;
        units.push(save_type(ctx, &def.namespace, &def.name, &code, needs_imports, true)?);
    }

    for def in &schema.structs {
        debug!(definition = %def.name, fixed = def.fixed, "generating struct");
        ctx.reset_imports();
        ctx.enter(&def.namespace);
        let mut code = String::new();
        gen_struct(ctx, def, &mut code)?;
        if code.is_empty() {
            continue;
        }
        units.push(save_type(ctx, &def.namespace, &def.name, &code, true, false)?);
    }

    Ok(units)
}

/// Wraps one definition's code into its own file under the namespace directory.
fn save_type(
    ctx: &GenContext,
    declared: &Namespace,
    name: &str,
    code: &str,
    needs_imports: bool,
    is_enum: bool,
) -> Result<OutputUnit, CodegenError> {
    let ns = output_namespace(ctx.schema, ctx.options, declared, name)?;
    let package = ns.last().unwrap_or(name).to_owned();

    let mut contents = begin_file(ctx, &package, needs_imports, is_enum);
    contents.push_str(code);
    trim_trailing_blank_lines(&mut contents);

    Ok(OutputUnit {
        path: PathBuf::from(ns.path()).join(format!("{}.go", name)),
        package,
        contents,
    })
}

/// Every definition in one unit. Imports accumulate across all of them.
fn generate_one_file(ctx: &mut GenContext) -> Result<OutputUnit, CodegenError> {
    let schema = ctx.schema;
    let ns = one_file_namespace(schema, ctx.options)?;
    ctx.reset_imports();

    let mut body = String::new();
    let mut needs_imports = false;
    for def in &schema.enums {
        debug!(definition = %def.name, "generating enum");
        ctx.enter(&def.namespace);
        needs_imports |= gen_enum(ctx, def, &mut body)?;
    }
    for def in &schema.structs {
        debug!(definition = %def.name, "generating struct");
        ctx.enter(&def.namespace);
        let before = body.len();
        gen_struct(ctx, def, &mut body)?;
        needs_imports |= body.len() > before;
    }

    let package = ns.last().unwrap_or(ctx.options.file_stem.as_str()).to_owned();
    let mut contents = begin_file(ctx, &package, needs_imports, !schema.enums.is_empty());
    contents.push_str(&body);
    trim_trailing_blank_lines(&mut contents);

    Ok(OutputUnit {
        path: PathBuf::from(format!("{}_generated.go", ctx.options.file_stem)),
        package,
        contents,
    })
}

impl OutputUnit {
    /// Writes the unit below `root`, creating namespace directories as needed.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf, CodegenError> {
        let path = root.join(&self.path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, &self.contents)?;
        debug!(path = %path.display(), "wrote unit");
        Ok(path)
    }
}
