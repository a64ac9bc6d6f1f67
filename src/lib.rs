pub mod bits;
pub mod game;
pub mod masks;
pub mod repl;
pub mod save;

pub use game::*;
pub use masks::{Masks, masks, square_is_dark};
pub use save::{SaveError, load_game, save_game};
