//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod ranking;
pub mod simulate;
