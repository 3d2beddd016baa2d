//! shortlinker-client - a terminal client for link-shortening services
//!
//! This library holds the client-side pipeline: input validation, the
//! shorten request, a durable recent-links history and a single-slot
//! notification channel, plus the CLI and shell front ends built on it.
//!
//! # Features
//! - **clipboard**: system clipboard support via arboard (default)
//!
//! # Architecture
//! - `validator`: form input normalization
//! - `client`: shorten request with timeout and response classification
//! - `cache`: recent-links history (newest first, capped at five)
//! - `notification`: one visible notification with auto-dismiss
//! - `storage`: key-value persistence backends
//! - `app`: ties the pipeline together for a front end
//! - `interfaces`: user interfaces (CLI, shell)
//! - `config`: Configuration management
//! - `system`: logging setup

pub mod app;
pub mod cache;
pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod notification;
pub mod storage;
pub mod system;
pub mod validator;
