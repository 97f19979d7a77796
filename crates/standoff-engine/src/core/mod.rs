pub use self::{attack::*, cell::*, cell_set::*, piece::*, placement::*, render_board::*};

pub(crate) mod attack;
pub(crate) mod cell;
pub(crate) mod cell_set;
pub(crate) mod piece;
pub(crate) mod placement;
pub(crate) mod render_board;
