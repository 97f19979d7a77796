use std::{collections::HashSet, num::NonZeroUsize, path::PathBuf, time::Instant};

use anyhow::{Context as _, bail};
use standoff_engine::{
    BoardSize, Enumerator, PieceCounts, Placement, Problem, enumerate_valid_naive, parse_pieces,
};
use tracing::info;

use crate::util;

/// Largest board (in cells) the brute-force enumerator is allowed on.
pub(crate) const NAIVE_MAX_CELLS: usize = 16;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ProblemArg {
    /// First board dimension (width)
    #[arg(value_name = "N")]
    width: Option<usize>,
    /// Second board dimension (height)
    #[arg(value_name = "M")]
    height: Option<usize>,
    /// Number of king pieces to place on the board
    #[arg(long, value_name = "n", default_value_t = 0)]
    kings: usize,
    /// Number of queen pieces to place on the board
    #[arg(long, value_name = "n", default_value_t = 0)]
    queens: usize,
    /// Number of bishop pieces to place on the board
    #[arg(long, value_name = "n", default_value_t = 0)]
    bishops: usize,
    /// Number of knight pieces to place on the board
    #[arg(long, value_name = "n", default_value_t = 0)]
    knights: usize,
    /// Number of rook pieces to place on the board
    #[arg(long, value_name = "n", default_value_t = 0)]
    rooks: usize,
    /// Pieces to place, in placement order, as letters or glyphs (e.g. `KKR`, `♔♔♖`)
    #[arg(long, conflicts_with_all = ["kings", "queens", "bishops", "knights", "rooks"])]
    pieces: Option<String>,
    /// Read the board size and piece counts from a JSON problem file
    #[arg(long, value_name = "PATH", conflicts_with_all = ["width", "height", "pieces", "kings", "queens", "bishops", "knights", "rooks"])]
    problem: Option<PathBuf>,
}

impl ProblemArg {
    pub(crate) fn to_problem(&self) -> anyhow::Result<Problem> {
        let Self {
            width,
            height,
            kings,
            queens,
            bishops,
            knights,
            rooks,
            pieces,
            problem,
        } = self;

        if let Some(path) = problem {
            let file = util::read_problem_file(path)?;
            return file
                .to_problem()
                .with_context(|| format!("Invalid problem in {}", path.display()));
        }

        let (Some(width), Some(height)) = (width, height) else {
            bail!("board dimensions N and M are required unless --problem is given");
        };
        let board = BoardSize::new(*width, *height)?;
        let problem = match pieces {
            Some(symbols) => Problem::new(board, parse_pieces(symbols)?)?,
            None => {
                let counts = PieceCounts {
                    kings: *kings,
                    queens: *queens,
                    bishops: *bishops,
                    knights: *knights,
                    rooks: *rooks,
                };
                Problem::from_counts(board, &counts)?
            }
        };
        Ok(problem)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EngineArg {
    /// Number of worker threads used to extend the frontier
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    threads: NonZeroUsize,
    /// Use the brute-force enumerator (tiny boards only)
    #[arg(long, conflicts_with = "threads")]
    naive: bool,
}

impl Default for EngineArg {
    fn default() -> Self {
        Self {
            threads: NonZeroUsize::MIN,
            naive: false,
        }
    }
}

impl EngineArg {
    pub(crate) fn enumerate(&self, problem: &Problem) -> anyhow::Result<HashSet<Placement>> {
        let started = Instant::now();
        let placements = if self.naive {
            ensure_naive_feasible(problem)?;
            enumerate_valid_naive(problem)
        } else {
            Enumerator::with_threads(self.threads).enumerate(problem)
        };
        info!(
            naive = self.naive,
            threads = self.threads.get(),
            placements = placements.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "enumerated placements"
        );
        Ok(placements)
    }
}

pub(crate) fn ensure_naive_feasible(problem: &Problem) -> anyhow::Result<()> {
    let board = problem.board();
    if board.area() > NAIVE_MAX_CELLS {
        bail!(
            "brute-force enumeration is limited to {NAIVE_MAX_CELLS} cells, got a {board} board"
        );
    }
    Ok(())
}
