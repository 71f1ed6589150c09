pub mod game;
pub mod lang;

pub use game::*;
