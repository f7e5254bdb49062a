use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::Parser;
use expressiv::{
    convert,
    io::{convert_file, write_html},
};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Convert expressiv markup to HTML")]
struct Cli {
    /// Write `<file>.html` next to each input instead of printing
    #[arg(long = "write", requires = "files")]
    write: bool,
    /// Log each conversion to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Documents to convert; standard input is read when none are given
    files: Vec<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn process_file(path: &Path, write: bool) -> anyhow::Result<Option<String>> {
    if write {
        let target =
            write_html(path).with_context(|| format!("failed to convert {}", path.display()))?;
        info!(source = %path.display(), target = %target.display(), "wrote html");
        return Ok(None);
    }
    let html = convert_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!(source = %path.display(), "converted");
    Ok(Some(html))
}

/// Entry point for the command-line converter.
///
/// With no file arguments the document is read from standard input and the
/// HTML fragment printed to standard output. Files are converted in parallel
/// and printed in argument order; with `--write` each result is saved as
/// `<file>.html` instead.
///
/// # Examples
///
/// ```sh
/// # Convert a file and print the fragment
/// expressiv notes.x
///
/// # Write notes.html next to the source
/// expressiv --write notes.x
///
/// # Convert standard input
/// cat notes.x | expressiv
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read standard input")?;
        println!("{}", convert(&input));
        return Ok(());
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| process_file(path, cli.write))
        .collect();

    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(Some(html)) => println!("{html}"),
            Ok(None) => {}
            Err(err) => {
                eprintln!("expressiv: {err:#}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} file(s) failed to convert");
    }
    Ok(())
}
