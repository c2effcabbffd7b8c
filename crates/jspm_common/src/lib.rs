use std::borrow::Cow;

mod module_id;
pub use module_id::*;
mod format;
pub use format::*;
mod builtin;
pub use builtin::*;

pub type StaticStr = Cow<'static, str>;
