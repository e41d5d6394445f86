mod dispatcher;
mod event;

pub use dispatcher::*;
pub use event::*;
