//! declgen: ambient TypeScript declaration generation from parsed
//! declaration trees.
//!
//! The pipeline runs in two passes over the same walker. Pass 1 registers
//! every declared type into a shared [`TypeRegistry`] without producing
//! text; pass 2 re-walks each tree and emits `.d.ts` blocks, resolving
//! every type reference against the registry populated in pass 1. Forward
//! references across files resolve because the registry is complete before
//! any text is produced.
//!
//! # Example
//!
//! ```
//! use declgen_lib::{Diagnostics, Emitter, GeneratorConfig, TypeRegistry};
//!
//! let config = GeneratorConfig::default();
//! let mut registry = TypeRegistry::new(&config);
//! let mut diagnostics = Diagnostics::new();
//! let decls: Vec<declgen_lib::ast::Declaration> = Vec::new();
//!
//! let mut pass1 = Emitter::discovery(&mut registry, &mut diagnostics);
//! pass1.process_all(&decls);
//!
//! let mut pass2 = Emitter::emission(&mut registry, &mut diagnostics, false);
//! pass2.process_all(&decls);
//! let output = pass2.into_output();
//! assert!(output.is_empty());
//! ```

use std::path::PathBuf;

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod lock;
pub mod mapper;
pub mod registry;
pub mod snapshot;
pub mod utils;

#[cfg(test)]
mod emit_tests;

pub use config::GeneratorConfig;
pub use diagnostics::{DiagnosticKind, Diagnostics, Severity};
pub use emit::Emitter;
pub use mapper::{MappedType, UNKNOWN_TYPE, map_type};
pub use registry::TypeRegistry;
pub use snapshot::Snapshot;

/// Fatal errors. Everything below the file boundary is absorbed into
/// [`Diagnostics`] instead; only these conditions abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source file could not be read.
    #[error("unreadable source file {path}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file was empty.
    #[error("empty source file {path}")]
    SourceEmpty { path: PathBuf },

    /// Declaration tree document did not deserialize.
    #[error("malformed declaration tree in {path}")]
    MalformedTree {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output file could not be written or promoted into place.
    #[error("failed to write output {path}")]
    OutputFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for declgen operations.
pub type Result<T> = std::result::Result<T, Error>;
