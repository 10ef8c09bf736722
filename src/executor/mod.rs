//! Test execution engine
//!
//! Resolves the ginkgo toolchain, builds its command line and runs it.

pub mod command;
mod runner;
pub mod toolchain;

pub use command::{ginkgo_args, split_ginkgo_args, SuitePaths};
pub use runner::GinkgoRunner;
pub use toolchain::Toolchain;
