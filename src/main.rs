use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print Repository Snapshot Format files as human-readable text.
#[derive(Parser)]
#[command(name = "rspm-print", about = "Dump RSF package snapshot files to stdout")]
struct Cli {
    /// Snapshot files to print, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn run(cli: &Cli) -> Result<()> {
    // Check every path up front so a bad argument fails the invocation
    // before any output is produced.
    for f in &cli.files {
        std::fs::metadata(f).with_context(|| format!("unable to read {}", f.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for f in &cli.files {
        let file =
            File::open(f).with_context(|| format!("unable to open {} for reading", f.display()))?;
        let mut buf = BufReader::new(file);
        rsf::print(&mut out, &mut buf)
            .with_context(|| format!("error printing RSF data from {}", f.display()))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
