//! todomd - a markdown todo list kept in sync with a GitHub repository.
//!
//! This crate provides the core functionality for the `tmd` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`markdown`] - Document parsing, the todo line codec, due dates
//! - [`model`] - Todo item type
//! - [`storage`] - Local document and sync state files
//! - [`remote`] - Contents API client behind the `ContentStore` trait
//! - [`sync`] - Reconciliation and the todo session
//! - [`config`] - Repository settings and credentials
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod markdown;
pub mod model;
pub mod remote;
pub mod storage;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};

/// Global silent mode flag for `--silent` output.
///
/// When set, mutating commands print only the todo ID.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}
