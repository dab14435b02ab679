use std::process::ExitCode;

use clap::Parser;
use standards_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    standards_core::tracing::init_tracing(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(standards_cli::run(cli, &mut out))
}
