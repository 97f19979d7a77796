use standoff_engine::{Problem, pieces_to_symbols};

use super::problem::{EngineArg, ProblemArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CountArg {
    #[clap(flatten)]
    problem: ProblemArg,
    /// Print the pieces to be placed on the board
    #[arg(long)]
    print_pieces: bool,
    #[clap(flatten)]
    engine: EngineArg,
}

impl CountArg {
    pub(crate) fn problem(&self) -> anyhow::Result<Problem> {
        self.problem.to_problem()
    }
}

pub(crate) fn run(arg: &CountArg) -> anyhow::Result<()> {
    let problem = arg.problem()?;
    if arg.print_pieces {
        println!("{}", pieces_to_symbols(problem.pieces()));
    }
    let placements = arg.engine.enumerate(&problem)?;
    println!("{}", placements.len());
    Ok(())
}
