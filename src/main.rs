use clap::Parser;
use sentibt::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
