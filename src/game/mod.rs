mod fish;
mod game;
mod player;
mod roster;
mod rules;
mod snapshot;
mod stub;

pub use fish::*;
pub use game::*;
pub use player::*;
pub use roster::*;
pub use rules::*;
pub use snapshot::*;
pub use stub::*;
