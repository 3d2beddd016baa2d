//! User interfaces
//!
//! - `cli`: one-shot commands
//! - `shell`: interactive session

pub mod cli;
pub mod shell;
