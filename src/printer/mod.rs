//! # Printer Module
//!
//! Stateful printer sessions built on the pure frame builders of
//! [`protocol`](crate::protocol).
//!
//! ## Modules
//!
//! - [`config`]: Per-session configuration
//! - [`state`]: The style record a session tracks
//! - [`options`]: Typed parameters for text, feed and cut calls
//! - [`session`]: The [`Printer`] itself

pub mod config;
pub mod options;
pub mod session;
pub mod state;

pub use config::PrinterConfig;
pub use options::{CutOptions, FeedOptions, TextStyle};
pub use session::Printer;
pub use state::PrinterState;
