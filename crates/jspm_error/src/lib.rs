//! Errors shared by every jspm crate. Each [ErrorKind] has a stable code in
//! [error_code].
mod error;
pub use error::*;
mod error_kind;
pub use error_kind::*;

pub type Result<T> = std::result::Result<T, Error>;

pub use anyhow::{self, format_err};
