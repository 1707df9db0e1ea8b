use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use brine_fbs::{error::CodegenError, generate_go, schema_from_json, GenOptions};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bfbs")]
#[command(about = "Generate Go code from FlatBuffers schema models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go sources from a JSON schema model
    GenGo {
        /// Input schema model (`.json`)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory the Go files are written under (prints to stdout if omitted)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Put every definition into a single file
        #[arg(long)]
        one_file: bool,

        /// Emit in-place mutators
        #[arg(long)]
        gen_mutable: bool,

        /// Emit native objects with Pack/UnPack
        #[arg(long)]
        gen_object_api: bool,

        /// Place every definition in this dotted namespace
        #[arg(long)]
        go_namespace: Option<String>,

        /// Import path of the FlatBuffers Go runtime
        #[arg(long)]
        go_import: Option<String>,

        /// Module path prepended to the imports of other namespaces
        #[arg(long, default_value = "")]
        go_module: String,
    },

    /// Validate a schema model and the namespaces it would generate into
    Check {
        /// Input schema model (`.json`)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), CodegenError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenGo {
            input,
            out_dir,
            one_file,
            gen_mutable,
            gen_object_api,
            go_namespace,
            go_import,
            go_module,
        } => {
            let text = fs::read_to_string(&input)?;
            let schema = schema_from_json(&text)?;
            let options = GenOptions {
                one_file_output: one_file,
                generate_mutators: gen_mutable,
                generate_native_objects: gen_object_api,
                namespace_override: go_namespace,
                import_path_override: go_import,
                module_prefix: go_module,
                ..GenOptions::default()
            };

            let units = generate_go(&schema, &options)?;
            match out_dir {
                Some(dir) => {
                    for unit in &units {
                        let path = unit.write_to(&dir)?;
                        info!(path = %path.display(), "wrote");
                    }
                    println!("Generated {} file(s) from {} → {}", units.len(), input.display(), dir.display());
                }
                None => {
                    for unit in &units {
                        println!("// {}\n{}", unit.path.display(), unit.contents);
                    }
                }
            }
            Ok(())
        }

        Commands::Check { input } => {
            let text = fs::read_to_string(&input)?;
            let schema = schema_from_json(&text)?;
            let units = generate_go(&schema, &GenOptions::default())?;
            println!(
                "{}: {} enum(s), {} struct(s), {} unit(s)",
                input.display(),
                schema.enums.len(),
                schema.structs.len(),
                units.len()
            );
            Ok(())
        }
    }
}
