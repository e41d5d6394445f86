mod context;
mod controller;
mod policy;
mod task;

pub use context::*;
pub use controller::*;
pub use policy::*;
pub use task::*;
