//! The tools module provides helper functions for the huffcore command line tool.
//!
//! The tools are:
//! - cli: Command line interface and run options.
//! - freq_count: Byte frequency count, the input to the tree builder.
//!
pub mod cli;
pub mod freq_count;
