use serde::Deserialize;

/// Import path of the Go runtime library.
pub const DEFAULT_GO_IMPORT: &str = "github.com/google/flatbuffers/go";

/// Generation switches. Everything defaults off except the native type suffix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenOptions {
    /// Emit every definition into a single unit instead of one file per definition.
    pub one_file_output:         bool,
    /// Emit in-place scalar mutators.
    pub generate_mutators:       bool,
    /// Emit native mirror types with `Pack` / `UnPack`.
    pub generate_native_objects: bool,
    /// Dotted namespace replacing each definition's own for placement and package name.
    pub namespace_override:      Option<String>,
    /// Replaces the runtime library import path.
    pub import_path_override:    Option<String>,
    /// Prepended to the import path of every foreign namespace.
    pub module_prefix:           String,
    pub object_prefix:           String,
    pub object_suffix:           String,
    /// One-file output is written to `<file_stem>_generated.go`.
    pub file_stem:               String,
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions {
            one_file_output:         false,
            generate_mutators:       false,
            generate_native_objects: false,
            namespace_override:      None,
            import_path_override:    None,
            module_prefix:           String::new(),
            object_prefix:           String::new(),
            object_suffix:           "T".to_owned(),
            file_stem:               "schema".to_owned(),
        }
    }
}

impl GenOptions {
    pub fn go_import(&self) -> &str {
        self.import_path_override.as_deref().unwrap_or(DEFAULT_GO_IMPORT)
    }

    /// Name of the native mirror type for a definition named `name`.
    pub fn native_name(&self, name: &str) -> String {
        format!("{}{}{}", self.object_prefix, name, self.object_suffix)
    }
}
