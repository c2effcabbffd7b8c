mod args;
pub use args::*;
mod context;
pub use context::*;
mod driver;
pub use driver::*;
mod plugin;
pub use plugin::*;

pub use async_trait;
