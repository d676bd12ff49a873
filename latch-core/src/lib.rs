//! Core types and functionality for the latch command binder.
//!
//! This crate provides the pieces a command-line application is assembled
//! from: the [`Options`] interface holder types implement to expose their
//! fields, the [`bind`] function that fills a holder from a token list, and
//! the [`App`] registry that maps command names to actions and holders.

mod app;
mod bind;
mod error;
mod options;

// Re-export core types
pub use app::{Action, App, Command};
pub use bind::bind;
pub use error::{LatchError, Result};
pub use options::{FieldKind, Options, Slot, REST_FIELD};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
