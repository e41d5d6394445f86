mod error;
mod handler;
mod lifeline;
mod login;
mod outbox;
mod reader;
mod writer;

pub use error::*;
pub use handler::*;
pub use lifeline::*;
pub use login::*;
pub use outbox::*;
pub use reader::*;
pub use writer::*;
