mod cli;
mod pipeline;


use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    let code = pipeline::run(&cli);
    std::process::exit(code);
}
