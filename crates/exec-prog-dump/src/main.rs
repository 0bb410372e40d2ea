#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use exec_prog::{
    decode_exec_with, DecodeOptions, SyscallCatalog, SyscallTable, MAX_PROGRAM_BYTES, MAX_VARS,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_ANONYMOUS_SYSCALLS: usize = 4096;

#[derive(Parser, Debug)]
#[command(
    name = "exec-prog-dump",
    about = "Decode a binary exec program and print its calls, arguments, copyins and copyouts."
)]
struct Args {
    /// Encoded exec program
    program: PathBuf,

    /// Syscall catalog: a JSON array of names or {"name", "call_name", "nr"} objects, indexed
    /// by position
    #[arg(long, value_name = "PATH", conflicts_with = "syscalls")]
    catalog: Option<PathBuf>,

    /// Without --catalog, decode against this many placeholder syscalls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_ANONYMOUS_SYSCALLS)]
    syscalls: usize,

    /// Print the program as JSON instead of the text dump
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,

    /// Reject programs larger than this many bytes
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = MAX_PROGRAM_BYTES,
        value_parser = parse_nonzero
    )]
    max_bytes: usize,

    /// Reject variable indices at or above this
    #[arg(long, value_name = "N", default_value_t = MAX_VARS)]
    max_vars: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let catalog = load_catalog(&args)?;
    tracing::debug!(syscalls = catalog.len(), "loaded syscall catalog");

    let bytes = fs::read(&args.program)
        .with_context(|| format!("read program {}", args.program.display()))?;
    let options = DecodeOptions {
        max_program_bytes: args.max_bytes,
        max_vars: args.max_vars,
    };
    let prog = decode_exec_with(&catalog, &bytes, &options)
        .with_context(|| format!("decode program {}", args.program.display()))?;
    tracing::info!(
        calls = prog.calls.len(),
        vars = prog.vars.len(),
        bytes = bytes.len(),
        "decoded {}",
        args.program.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &prog).context("serialize program")?;
        writeln!(out)?;
    } else {
        write!(out, "{prog}")?;
    }
    out.flush()?;
    Ok(())
}

fn load_catalog(args: &Args) -> anyhow::Result<SyscallTable> {
    let Some(path) = &args.catalog else {
        return Ok(SyscallTable::anonymous(args.syscalls));
    };
    let json =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    SyscallTable::from_json(&json).with_context(|| format!("parse catalog {}", path.display()))
}

fn parse_nonzero(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be non-zero".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}
