//! Generation configuration consumed by the core from the options layer.

/// Configuration surface for a generation run.
///
/// Produced by the CLI options layer (or restored from a snapshot) and
/// handed to [`crate::TypeRegistry::new`] and the pipeline driver. The core
/// never reads process arguments itself.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Override for the module name every discovered type renders under.
    /// Rewrites only mapped output names, never registry lookup keys.
    pub default_namespace: Option<String>,
    /// Type names excluded from emission and reference resolution.
    pub excluded: Vec<String>,
    /// Attribute names whose presence excludes a declaration.
    pub excluded_attributes: Vec<String>,
    /// Types assumed to exist but never observed as declarations (e.g. open
    /// generic parameters). Resolve as known but map to the unknown marker.
    pub known_types: Vec<String>,
    /// Whether the discovery pass runs before emission.
    pub preprocess: bool,
    /// Whether walkers register the types they visit.
    pub discover_types: bool,
    /// Suppress diagnostic output to stderr.
    pub silent: bool,
}
