use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const OUTPUT_EXTENSION: &str = "hack";

/// Assembles a Hack `.asm` file into a `.hack` file next to it.
#[derive(Parser, Debug)]
#[command(name = "hasm", version)]
struct Cli {
    /// assembly source
    source: PathBuf,
    /// log symbol allocation and encoding to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli.source) {
        Ok(out) => {
            tracing::info!(output = %out.display(), "wrote");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(source: &Path) -> anyhow::Result<PathBuf> {
    let bytes =
        std::fs::read(source).with_context(|| format!("cannot open {}", source.display()))?;
    let src = String::from_utf8(bytes)
        .with_context(|| format!("{} is not a text file", source.display()))?;
    let out = hasm::assemble_source(&src)
        .with_context(|| format!("failed to assemble {}", source.display()))?;
    let path = output_path(source);
    std::fs::write(&path, out).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(path)
}

fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}
