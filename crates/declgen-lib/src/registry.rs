//! Cross-file type registry.
//!
//! Process-wide map from fully-qualified type name to mapped output name,
//! split into discovered and excluded sets. Populated by the discovery pass
//! (or restored from a snapshot) and consulted read-mostly during emission.
//! Keys are unique per run: the first registration wins, later attempts log
//! a warning and are dropped.

use indexmap::IndexMap;

use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Registry of discovered and excluded types for one run.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    default_namespace: Option<String>,
    excluded_names: Vec<String>,
    excluded_attributes: Vec<String>,
    known_types: Vec<String>,
    discovered: IndexMap<String, String>,
    excluded: IndexMap<String, String>,
}

impl TypeRegistry {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            default_namespace: config.default_namespace.clone(),
            excluded_names: config.excluded.clone(),
            excluded_attributes: config.excluded_attributes.clone(),
            known_types: config.known_types.clone(),
            discovered: IndexMap::new(),
            excluded: IndexMap::new(),
        }
    }

    /// Register a declared type as an emittable, referenceable target.
    ///
    /// Inserts three alias keys pointing at the same mapped value: the
    /// qualified name with its type-parameter suffix, the qualified name
    /// without it, and the bare identifier. The default-namespace override
    /// rewrites only the mapped value, never the lookup keys. Returns false
    /// without touching the map when the full key is already present.
    pub fn register_discovered(
        &mut self,
        namespace: &str,
        identifier: &str,
        type_params: &str,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        Self::register(
            &mut self.discovered,
            self.default_namespace.as_deref(),
            namespace,
            identifier,
            type_params,
            diagnostics,
        )
    }

    /// Symmetric to [`Self::register_discovered`], into the excluded set.
    pub fn register_excluded(
        &mut self,
        namespace: &str,
        identifier: &str,
        type_params: &str,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        Self::register(
            &mut self.excluded,
            self.default_namespace.as_deref(),
            namespace,
            identifier,
            type_params,
            diagnostics,
        )
    }

    fn register(
        map: &mut IndexMap<String, String>,
        default_namespace: Option<&str>,
        namespace: &str,
        identifier: &str,
        type_params: &str,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        // Types outside any namespace are never registered; references to
        // them fall back to the unknown marker like any unresolved name.
        if namespace.is_empty() || identifier.is_empty() {
            return false;
        }

        let full = format!("{namespace}.{identifier}{type_params}");
        let qualified = format!("{namespace}.{identifier}");

        if map.contains_key(&full) {
            diagnostics.report(
                DiagnosticKind::DuplicateRegistration,
                format!("type already registered: {full}"),
            );
            return false;
        }

        // All aliases share one mapped value, with the namespace override
        // applied to the value only.
        let mapped = match default_namespace {
            Some(ns) => qualified.replacen(namespace, ns, 1),
            None => qualified.clone(),
        };

        map.insert(full.clone(), mapped.clone());
        if qualified != full && !map.contains_key(&qualified) {
            map.insert(qualified, mapped.clone());
        }
        if identifier != full && !map.contains_key(identifier) {
            map.insert(identifier.to_string(), mapped);
        }
        true
    }

    /// Whether the name is in the configured known-types list. Such types
    /// resolve as known but deliberately map to the unknown marker: their
    /// shape was never observed, so no concrete name may be asserted.
    pub fn is_opaque(&self, name: &str) -> bool {
        self.known_types.iter().any(|k| k == name)
    }

    /// Whether the name resolves at all (opaque-known or discovered).
    pub fn is_known(&self, name: &str) -> bool {
        self.is_opaque(name) || self.discovered.contains_key(name)
    }

    /// Whether the name is excluded, by configuration or by observation.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|e| e == name) || self.excluded.contains_key(name)
    }

    /// Whether any of the attribute names matches the configured
    /// exclusion-attribute set.
    pub fn is_attribute_excluded(&self, attributes: &[String]) -> bool {
        if self.excluded_attributes.is_empty() {
            return false;
        }
        attributes
            .iter()
            .any(|a| self.excluded_attributes.iter().any(|e| e == a))
    }

    /// Mapped output name for a discovered key, if present.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.discovered.get(name).map(String::as_str)
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    pub fn excluded_names(&self) -> &[String] {
        &self.excluded_names
    }

    pub fn excluded_attributes(&self) -> &[String] {
        &self.excluded_attributes
    }

    pub fn known_types(&self) -> &[String] {
        &self.known_types
    }

    pub fn discovered(&self) -> &IndexMap<String, String> {
        &self.discovered
    }

    pub fn excluded(&self) -> &IndexMap<String, String> {
        &self.excluded
    }

    /// Replace both maps wholesale, used when restoring a snapshot.
    pub fn restore_maps(
        &mut self,
        discovered: IndexMap<String, String>,
        excluded: IndexMap<String, String>,
    ) {
        self.discovered = discovered;
        self.excluded = excluded;
    }
}
