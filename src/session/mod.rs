mod directory;
mod error;
mod session;
mod table;
mod tournament;
mod viewer;

pub use directory::*;
pub use error::*;
pub use session::*;
pub use table::*;
pub use tournament::*;
pub use viewer::*;
