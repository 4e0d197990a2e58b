use std::{
    fs,
    io::{stderr, stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use frontend::{
    display_errors,
    parser::parser::parse_source,
    repl::{self, Mode},
};

#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// File to parse; starts the interactive shell when omitted
    file: Option<PathBuf>,
    /// What the shell prints for each line
    #[arg(long, value_enum, default_value_t = Mode::Ast)]
    mode: Mode,
}

fn run_file(path: PathBuf) -> anyhow::Result<ExitCode> {
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (program, errors) = parse_source(&source);

    if !program.is_empty() {
        writeln!(stdout(), "{}", program)?;
    }
    if errors.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    display_errors(&mut stderr().lock(), &errors)?;
    Ok(ExitCode::FAILURE)
}

fn run_prompt(mode: Mode) -> anyhow::Result<ExitCode> {
    println!("Type '{}' to quit.", repl::QUIT);
    repl::start(stdin().lock(), stdout().lock(), mode)?;

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match args.file {
        Some(file) => run_file(file),
        None => run_prompt(args.mode),
    }
}
