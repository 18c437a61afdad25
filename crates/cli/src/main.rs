use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::debug;

use statx_report::render_status;
use statx_runtime::{PROGRAM_NAME, logging};
use statx_sys::{QueryError, QueryOptions, SystemNames, query_status};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Report file status using the Linux statx(2) syscall"
)]
pub struct Cli {
    /// Follow symlinks
    #[arg(short = 'L', long = "follow")]
    pub follow: bool,

    /// Disable automount
    #[arg(short = 'A', long = "no-automount")]
    pub no_automount: bool,

    /// Basic stat(2) compatible stats only
    #[arg(short = 'b', long = "basic")]
    pub basic: bool,

    /// Files to report on
    #[arg(required = true, value_name = "FILE")]
    pub paths: Vec<String>,
}

impl Cli {
    fn query_options(&self) -> QueryOptions {
        QueryOptions {
            follow_symlinks: self.follow,
            no_automount: self.no_automount,
            basic_only: self.basic,
        }
    }
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match execute(&cli, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("statx: {e}");
            ExitCode::from(2)
        }
    }
}

/// Process every requested path in order, writing reports to `out` and
/// per-path diagnostics to stderr.
///
/// A path-specific failure does not stop the run; an unsupported syscall
/// does, since no later path could succeed either.
fn execute<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<u8> {
    let opts = cli.query_options();
    let names = SystemNames;

    let mut failed = false;
    for raw in &cli.paths {
        match query_status(Path::new(raw), &opts) {
            Ok(rec) => {
                debug!("statx '{raw}' mask={:#x}", rec.mask.bits());
                let report = render_status(raw, &rec, &names);
                out.write_all(report.as_bytes())
                    .with_context(|| format!("failed to write report for '{raw}'"))?;
            }
            Err(err @ QueryError::Unsupported) => {
                eprintln!("statx: {err}");
                return Ok(1);
            }
            Err(err) => {
                eprintln!("statx: {err}");
                failed = true;
            }
        }
    }

    Ok(if failed { 1 } else { 0 })
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
