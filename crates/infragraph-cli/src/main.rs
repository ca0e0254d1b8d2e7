mod cli;
mod cmd;
mod error;
mod io;

use clap::Parser as _;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Layout {
            file,
            direction,
            ranker,
            format,
        } => {
            let doc = load(file, cli.max_file_size)?;
            cmd::layout::run(&doc, *direction, *ranker, format)
        }
        Command::Cycles { file, format } => {
            let doc = load(file, cli.max_file_size)?;
            cmd::cycles::run(&doc, format)
        }
        Command::Impact {
            file,
            node_id,
            depth,
            format,
        } => {
            let doc = load(file, cli.max_file_size)?;
            cmd::impact::run(&doc, node_id, *depth, format)
        }
        Command::Direction { file } => {
            let doc = load(file, cli.max_file_size)?;
            cmd::direction::run(&doc)
        }
        Command::Version => {
            println!("{}", infragraph_core::version());
            Ok(())
        }
    }
}

fn load(file: &cli::PathOrStdin, max_file_size: u64) -> Result<io::GraphDocument, CliError> {
    let content = io::read_input(file, max_file_size)?;
    io::parse_document(&content)
}
