//! Extension packager CLI entrypoint.
//!
//! Thin wrapper around [`webext_packager::pipeline::run`]: parses arguments,
//! runs the packaging pipeline against the real process streams, and maps
//! failures to a non-zero exit status.

use clap::Parser;
use std::io::Write;
use webext_packager::cli::Cli;
use webext_packager::error::Result;
use webext_packager::output::write_stderr_line;
use webext_packager::pipeline::run;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr).map(|_| ());
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}
