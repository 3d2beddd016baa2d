//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod clear;
mod config_gen;
mod copy;
mod recent;
mod shorten;

pub use clear::*;
pub use config_gen::*;
pub use copy::*;
pub use recent::*;
pub use shorten::*;
