use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "declgen", bin_name = "declgen")]
#[command(about = "Generates ambient TypeScript declaration files from parsed declaration trees")]
pub struct Cli {
    /// Declaration-tree files to translate (JSON, one per source file)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output file (combined), or existing folder for one .d.ts per input
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Alternate module namespace to use in the generated declarations
    #[arg(short = 'n', long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Type names to exclude, comma separated (e.g. MyClass,MyEnum)
    #[arg(short = 'e', long, value_delimiter = ',', value_name = "NAMES")]
    pub excluded: Vec<String>,

    /// Attribute names that exclude a declaration, comma separated
    /// (e.g. JsonIgnore,NotMapped)
    #[arg(
        short = 'f',
        long = "excluded-attributes",
        value_delimiter = ',',
        value_name = "NAMES"
    )]
    pub excluded_attributes: Vec<String>,

    /// Known type names never observed as declarations, comma separated
    /// (e.g. T as in MyClass<T>)
    #[arg(short = 'k', long = "known", value_delimiter = ',', value_name = "NAMES")]
    pub known_types: Vec<String>,

    /// Skip the discovery pass; emission registers types as it walks
    #[arg(short = 'p', long)]
    pub skip_preprocess: bool,

    /// Registry snapshot file shared across invocations
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Echo every emitted line to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Turn off all console messages
    #[arg(short, long)]
    pub silent: bool,
}
