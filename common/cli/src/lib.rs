//! Shared setup for the command line binaries.

pub mod tracing;
