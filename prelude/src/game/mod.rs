//! Playing pieces and the stacks that group them on the board.

pub mod stack;
pub mod unit;

pub use stack::{KeyedStacks, Stack, StackCreationError};
pub use unit::{Counter, Unit, UnitType};
