use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use standoff_engine::{Placement, RenderBoard, SymbolStyle};

use super::problem::{EngineArg, ProblemArg};
use crate::util::Output;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum Symbols {
    /// Chess glyphs, empty cells as `□`
    #[default]
    Unicode,
    /// Letters KQBNR, empty cells as `.`
    Ascii,
}

impl From<Symbols> for SymbolStyle {
    fn from(symbols: Symbols) -> Self {
        match symbols {
            Symbols::Unicode => SymbolStyle::Unicode,
            Symbols::Ascii => SymbolStyle::Ascii,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum Format {
    /// One drawn board per placement
    #[default]
    Text,
    /// JSON array of placements, each an array of `"K@x,y"` entries
    Json,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ListArg {
    #[clap(flatten)]
    problem: ProblemArg,
    #[clap(flatten)]
    engine: EngineArg,
    /// Symbols used to draw the board
    #[arg(long, value_enum, default_value_t = Symbols::Unicode)]
    symbols: Symbols,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ListArg) -> anyhow::Result<()> {
    let ListArg {
        problem,
        engine,
        symbols,
        format,
        output,
    } = arg;

    let problem = problem.to_problem()?;
    let mut placements: Vec<Placement> = engine.enumerate(&problem)?.into_iter().collect();
    placements.sort_unstable();

    let mut out = Output::create(output.as_deref())?;
    match format {
        Format::Json => out.write_json(&placements)?,
        Format::Text => {
            let board = problem.board();
            let style = SymbolStyle::from(*symbols);
            let separator = "-".repeat(board.width());
            for placement in &placements {
                let render = RenderBoard::from_placement(placement, board);
                writeln!(out, "{}{separator}", render.display(style))
                    .with_context(|| format!("Failed to write to {}", out.target()))?;
            }
        }
    }
    out.finish()?;
    Ok(())
}
