use anyhow::bail;
use standoff_engine::{Enumerator, Placement, enumerate_valid_naive};

use super::problem::{ProblemArg, ensure_naive_feasible};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CrossCheckArg {
    #[clap(flatten)]
    problem: ProblemArg,
}

pub(crate) fn run(arg: &CrossCheckArg) -> anyhow::Result<()> {
    let problem = arg.problem.to_problem()?;
    ensure_naive_feasible(&problem)?;

    let incremental = Enumerator::new().enumerate(&problem);
    let naive = enumerate_valid_naive(&problem);

    println!("incremental: {}", incremental.len());
    println!("naive:       {}", naive.len());

    let mut missing: Vec<&Placement> = naive.difference(&incremental).collect();
    let mut extra: Vec<&Placement> = incremental.difference(&naive).collect();
    if missing.is_empty() && extra.is_empty() {
        println!("results agree");
        return Ok(());
    }

    missing.sort_unstable();
    extra.sort_unstable();
    for placement in &missing {
        println!("missing: {placement}");
    }
    for placement in &extra {
        println!("extra:   {placement}");
    }
    bail!(
        "enumerators disagree: {} missing, {} extra",
        missing.len(),
        extra.len()
    )
}
