use std::io::Write as _;

use clap::Parser as _;

mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod logging;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use cmd::Globals;
use error::CliError;
use format::FormatterConfig;

fn main() {
    let cli = Cli::parse();

    let style = FormatterConfig::from_flags(cli.no_color);
    logging::init(cli.quiet, cli.verbose, style.colors);

    let globals = Globals {
        format: cli.format,
        max_file_size: cli.max_file_size,
        style,
    };

    if let Err(e) = dispatch(cli.command, &globals) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn dispatch(command: Command, globals: &Globals) -> Result<(), CliError> {
    match command {
        Command::Ratio {
            file,
            top,
            node,
            run,
        } => cmd::ratio::run(&file, top, node.as_deref(), &run, globals),
        Command::Cycles { file, node, run } => {
            cmd::cycles::run(&file, node.as_deref(), &run, globals)
        }
        Command::Inspect { file, run } => cmd::inspect::run(&file, &run, globals),
        Command::Report { file, to, run } => cmd::report::run(&file, to, &run, globals),
        Command::Demo => cmd::demo::run(globals),
        Command::Version => cmd::emit(|out| writeln!(out, "{}", cyclerank_core::version())),
    }
}
