//! Collected diagnostics for a generation run.
//!
//! Per-node anomalies never abort a run: the walker and mapper degrade
//! locally (skip the node or fall back to the unknown marker) and record
//! what happened here. The driver renders the collection once at the end
//! and reflects the maximum observed severity in the process exit code.

use std::fmt::Write;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong. Kinds carry their default severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Declaration-tree node kind this version does not recognize.
    UnknownDeclKind,
    /// Primitive keyword with no entry in the mapping table.
    UnknownTypeKeyword,
    /// Type reference that resolved to nothing.
    UnresolvedType,
    /// Array rank other than 1.
    UnsupportedArrayRank,
    /// Generic shape with no structural translation.
    UnsupportedGenericShape,
    /// Dictionary-like generic with a non-string key type.
    NonStringMapKey,
    /// Type already registered under an identical key.
    DuplicateRegistration,
    /// Snapshot could not be loaded.
    SnapshotLoad,
    /// Snapshot could not be saved.
    SnapshotSave,
    /// Source file unreadable, empty, or malformed.
    FatalSource,
    /// Output file could not be written or promoted into place.
    OutputWrite,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            Self::FatalSource | Self::OutputWrite => Severity::Error,
            _ => Severity::Warning,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::UnknownDeclKind => "unknown declaration kind",
            Self::UnknownTypeKeyword => "unknown type keyword",
            Self::UnresolvedType => "unresolved type",
            Self::UnsupportedArrayRank => "unsupported array rank",
            Self::UnsupportedGenericShape => "unsupported generic shape",
            Self::NonStringMapKey => "non-string map key",
            Self::DuplicateRegistration => "duplicate registration",
            Self::SnapshotLoad => "snapshot load failed",
            Self::SnapshotSave => "snapshot save failed",
            Self::FatalSource => "fatal source error",
            Self::OutputWrite => "output write failed",
        }
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic with the kind's default severity.
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.messages.push(Diagnostic {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.messages.iter().map(|d| d.severity).max()
    }

    /// Process exit code for the run: 0 clean, 1 warnings, 2 errors.
    pub fn exit_code(&self) -> i32 {
        match self.max_severity() {
            None => 0,
            Some(Severity::Warning) => 1,
            Some(Severity::Error) => 2,
        }
    }

    /// Render all diagnostics as plain text, one per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diag in &self.messages {
            let level = match diag.severity {
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            writeln!(out, "{level}: {}: {}", diag.kind.label(), diag.message)
                .expect("String write never fails");
        }
        out
    }

    /// Print the rendered diagnostics to stderr unless silenced.
    pub fn print(&self, silent: bool) {
        if silent || self.messages.is_empty() {
            return;
        }
        eprint!("{}", self.render());
    }
}
