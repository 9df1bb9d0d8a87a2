use clap::Parser;
use quotefolio::cli::{Cli, run};
use quotefolio::log::init_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
