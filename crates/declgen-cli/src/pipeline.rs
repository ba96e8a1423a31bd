//! Generation driver: loads declaration trees, runs the two passes, and
//! promotes the output into place.

use std::fs;
use std::path::{Path, PathBuf};

use declgen_lib::ast::Declaration;
use declgen_lib::lock::{FileLocker, Locker};
use declgen_lib::{
    DiagnosticKind, Diagnostics, Emitter, Error, GeneratorConfig, Result, Snapshot, TypeRegistry,
};

use crate::cli::Cli;

/// Run one generation invocation. Returns the process exit code: 0 clean,
/// 1 when warnings were recorded, 2 on errors.
pub fn run(cli: &Cli) -> i32 {
    let config = GeneratorConfig {
        default_namespace: cli.namespace.clone(),
        excluded: cli.excluded.clone(),
        excluded_attributes: cli.excluded_attributes.clone(),
        known_types: cli.known_types.clone(),
        preprocess: !cli.skip_preprocess,
        discover_types: true,
        silent: cli.silent,
    };

    let mut diagnostics = Diagnostics::new();

    // An existing snapshot carries configuration and discovery results from
    // an earlier invocation against the same target.
    let mut registry = match cli.snapshot.as_deref().filter(|p| p.exists()) {
        Some(path) => match Snapshot::load(path, &mut diagnostics) {
            Some(snapshot) => snapshot.restore(),
            None => TypeRegistry::new(&config),
        },
        None => TypeRegistry::new(&config),
    };

    if let Err(err) = generate(cli, &config, &mut registry, &mut diagnostics) {
        let kind = match &err {
            Error::OutputFailed { .. } => DiagnosticKind::OutputWrite,
            _ => DiagnosticKind::FatalSource,
        };
        diagnostics.report(kind, err.to_string());
    }

    if let Some(path) = &cli.snapshot {
        save_snapshot(path, &registry, &mut diagnostics);
    }

    diagnostics.print(config.silent);
    diagnostics.exit_code()
}

fn generate(
    cli: &Cli,
    config: &GeneratorConfig,
    registry: &mut TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let mut trees = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        trees.push((path.as_path(), load_tree(path)?));
    }

    if config.preprocess {
        let mut pass1 = Emitter::discovery(registry, diagnostics);
        for (_, decls) in &trees {
            pass1.process_all(decls);
        }
    }

    // With the discovery pass done the registry is complete; without it,
    // emission registers types as it encounters them.
    let discover = config.discover_types && !config.preprocess;
    let per_file = cli.output.is_dir();
    let mut combined = String::new();

    for (path, decls) in &trees {
        let mut pass2 = Emitter::emission(registry, diagnostics, discover).echo(cli.verbose);
        pass2.process_all(decls);
        let text = pass2.into_output();

        if per_file {
            let target = cli.output.join(declaration_file_name(path));
            promote(&target, &text)?;
            if !config.silent {
                println!("Generated {}", target.display());
            }
        } else {
            combined.push_str(&text);
        }
    }

    if !per_file {
        promote(&cli.output, &combined)?;
        if !config.silent {
            println!("Generated {}", cli.output.display());
        }
    }

    Ok(())
}

/// Parse one declaration-tree document.
fn load_tree(path: &Path) -> Result<Vec<Declaration>> {
    let text = fs::read_to_string(path).map_err(|source| Error::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(Error::SourceEmpty {
            path: path.to_path_buf(),
        });
    }
    serde_json::from_str(&text).map_err(|source| Error::MalformedTree {
        path: path.to_path_buf(),
        source,
    })
}

/// `<stem>.d.ts` name for per-file output into a folder.
fn declaration_file_name(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".d.ts");
    PathBuf::from(name)
}

/// Write the text to a `.tmp` sibling, then rename it over the target under
/// the target's named lock, so concurrent invocations never interleave
/// partial writes.
fn promote(target: &Path, text: &str) -> Result<()> {
    let mut tmp_name = target.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let fail = |source| Error::OutputFailed {
        path: target.to_path_buf(),
        source,
    };

    fs::write(&tmp, text).map_err(fail)?;
    let _guard = FileLocker.lock(target).map_err(fail)?;
    fs::rename(&tmp, target).map_err(fail)
}

/// Persist the registry under the snapshot's named lock. Best-effort, like
/// the save itself.
fn save_snapshot(path: &Path, registry: &TypeRegistry, diagnostics: &mut Diagnostics) {
    match FileLocker.lock(path) {
        Ok(_guard) => Snapshot::capture(registry).save(path, diagnostics),
        Err(err) => diagnostics.report(
            DiagnosticKind::SnapshotSave,
            format!("{}: {err}", path.display()),
        ),
    }
}
