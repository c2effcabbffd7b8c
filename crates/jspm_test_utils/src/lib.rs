mod collaborators;
pub use collaborators::*;
mod test_config;
pub use test_config::*;
mod tester;
pub use tester::*;
