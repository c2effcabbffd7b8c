mod build_context;
pub use build_context::*;
mod builtins;
pub use builtins::*;
mod externals;
pub use externals::*;
mod fetcher;
pub use fetcher::*;
mod format_registry;
pub use format_registry::*;
mod generator;
pub use generator::*;
mod interop;
pub use interop::*;
mod load;
pub use load::*;
mod minify;
pub use minify::*;
mod options;
pub use options::*;
mod plugin;
pub use plugin::*;
mod resolve_id;
pub use resolve_id::*;
mod transform;
pub use transform::*;
