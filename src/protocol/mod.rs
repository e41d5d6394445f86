//! Line-level helpers shared by the reader and the dispatcher.
mod command;
mod words;

pub use command::*;
pub use words::*;
