//! Shared imports for the integration test crates.
//!
//! Each test crate uses a different subset of these helpers.
#![allow(unused_imports, dead_code, unused_macros)]

pub use assert_cmd::Command;
pub use predicates::prelude::*;
pub use rstest::rstest;

#[macro_use]
#[path = "../common/mod.rs"]
mod common;
pub use common::*;
