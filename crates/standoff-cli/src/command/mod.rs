use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{count::CountArg, cross_check::CrossCheckArg, list::ListArg};

mod count;
mod cross_check;
mod list;
mod problem;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug); `RUST_LOG` overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in (defaults to `count`)
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    count: CountArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print the number of non-attacking placements
    Count(#[clap(flatten)] CountArg),
    /// Draw every non-attacking placement
    List(#[clap(flatten)] ListArg),
    /// Compare the incremental enumerator against brute force on a small board
    CrossCheck(#[clap(flatten)] CrossCheckArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode.unwrap_or(Mode::Count(args.count)) {
        Mode::Count(arg) => count::run(&arg)?,
        Mode::List(arg) => list::run(&arg)?,
        Mode::CrossCheck(arg) => cross_check::run(&arg)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
