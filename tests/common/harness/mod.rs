//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic outline creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod outline;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::SyllabusCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use outline::{TestNode, TestOutline};
