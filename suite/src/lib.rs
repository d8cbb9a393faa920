#![deny(clippy::all)]
//! Test harness for the workbench backend: configuration, fixture
//! generators, response assertions and resource guards shared by the live
//! suites and the `wbsuite` runner.

pub mod assertions;
pub mod config;
pub mod context;
pub mod fixtures;
pub mod smoke;
