//! Persisted registry state shared across process invocations.
//!
//! One invocation per output target would otherwise re-parse every input in
//! every process; the snapshot lets later invocations start from the first
//! one's discovery results. Save and load are both best-effort: failure is
//! logged and the run continues with in-memory state only.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::registry::TypeRegistry;

/// Snapshot document, stored as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub default_namespace: Option<String>,
    pub excluded: Vec<String>,
    pub excluded_attributes: Vec<String>,
    pub known_types: Vec<String>,
    pub namespaces: Vec<String>,
    pub discovered_types: IndexMap<String, String>,
    pub excluded_types: IndexMap<String, String>,
}

impl Snapshot {
    /// Capture the registry's configuration and both type maps. The
    /// namespace stack is empty between files, so it is stored empty.
    pub fn capture(registry: &TypeRegistry) -> Self {
        Self {
            default_namespace: registry.default_namespace().map(str::to_string),
            excluded: registry.excluded_names().to_vec(),
            excluded_attributes: registry.excluded_attributes().to_vec(),
            known_types: registry.known_types().to_vec(),
            namespaces: Vec::new(),
            discovered_types: registry.discovered().clone(),
            excluded_types: registry.excluded().clone(),
        }
    }

    /// Rebuild a registry from this snapshot.
    pub fn restore(self) -> TypeRegistry {
        let config = GeneratorConfig {
            default_namespace: self.default_namespace,
            excluded: self.excluded,
            excluded_attributes: self.excluded_attributes,
            known_types: self.known_types,
            ..GeneratorConfig::default()
        };
        let mut registry = TypeRegistry::new(&config);
        registry.restore_maps(self.discovered_types, self.excluded_types);
        registry
    }

    /// Load a snapshot from disk. Failure logs and returns `None`.
    pub fn load(path: &Path, diagnostics: &mut Diagnostics) -> Option<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                diagnostics.report(
                    DiagnosticKind::SnapshotLoad,
                    format!("{}: {err}", path.display()),
                );
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                diagnostics.report(
                    DiagnosticKind::SnapshotLoad,
                    format!("{}: {err}", path.display()),
                );
                None
            }
        }
    }

    /// Save the snapshot to disk. Failure logs and continues.
    pub fn save(&self, path: &Path, diagnostics: &mut Diagnostics) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                diagnostics.report(
                    DiagnosticKind::SnapshotSave,
                    format!("{}: {err}", path.display()),
                );
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            diagnostics.report(
                DiagnosticKind::SnapshotSave,
                format!("{}: {err}", path.display()),
            );
        }
    }
}
