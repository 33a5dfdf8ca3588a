//! Block grid, player inventory and the interfaces a tick-driven client uses
//! to observe and mutate them.

mod block;
mod flat;
mod grid;
mod inventory;
mod sandbox;
mod view;

pub use block::*;
pub use flat::*;
pub use grid::*;
pub use inventory::*;
pub use sandbox::*;
pub use view::*;
