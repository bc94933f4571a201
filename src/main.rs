#![forbid(unsafe_code)]
//! combine-code command line interface

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use combine::commands::{execute_archive, ArchiveOptions};
use combine::Config;

#[derive(Parser)]
#[command(name = "combine-code")]
#[command(about = "Concatenate a project's text sources into one annotated archive file")]
#[command(version)]
struct Cli {
    /// Project root (default: parent of the tools/ dir holding this binary, else the current directory)
    #[arg(short, long, env = "COMBINE_CODE_ROOT")]
    root: Option<PathBuf>,

    /// Archive file path (default: <root>/full_project_source.txt)
    #[arg(short, long, env = "COMBINE_CODE_OUTPUT")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,combine=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ArchiveOptions {
        root: cli.root,
        output: cli.output,
    };

    if let Err(e) = execute_archive(options, Config::default()) {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }
}
